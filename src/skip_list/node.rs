/// Index of a node slot inside the list's node arena
pub(crate) type NodeId = usize;

/// A forward link at one level; `None` terminates the level
pub(crate) type Link = Option<NodeId>;

/// A position in the list: the sentinel head or a linked node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cursor {
    Head,
    Node(NodeId),
}

/// A linked entry
///
/// The node takes part in every level `0..=height`, where `height` is fixed
/// at creation as `forward.len() - 1`.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) fingerprint: u64,
    pub(crate) value: V,
    pub(crate) forward: Box<[Link]>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, fingerprint: u64, value: V, height: usize) -> Self {
        Node {
            key,
            fingerprint,
            value,
            forward: vec![None; height + 1].into_boxed_slice(),
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.forward.len() - 1
    }
}
