use std::borrow::Borrow;
use std::mem;

use tracing::{debug, trace};

use super::node::{Cursor, Link, Node, NodeId};
use crate::fingerprint::Fingerprint;
use crate::level::LevelGenerator;

/// Unsynchronized list state. Every access goes through the owning lock.
///
/// <head> --> [1] --> [3] --> [5] --> [9] --> [12] -->
/// <head> ----------> [3] ----------> [9] ----------->
/// <head> ----------------------------[9] ----------->
#[derive(Debug)]
pub(crate) struct Inner<K, V> {
    /// Sentinel forward links, one per level `0..=max_level`
    pub(crate) head: Box<[Link]>,
    /// Node arena; `None` marks a reclaimed slot
    pub(crate) nodes: Vec<Option<Node<K, V>>>,
    /// Reclaimed slots available for reuse
    free: Vec<NodeId>,
    /// Highest level currently carrying a node (0 when empty)
    pub(crate) top_level: usize,
    pub(crate) len: usize,
    levels: LevelGenerator,
}

impl<K, V> Inner<K, V> {
    pub(crate) fn new(levels: LevelGenerator) -> Self {
        Inner {
            head: vec![None; levels.max_level() + 1].into_boxed_slice(),
            nodes: Vec::new(),
            free: Vec::new(),
            top_level: 0,
            len: 0,
            levels,
        }
    }

    pub(crate) fn max_level(&self) -> usize {
        self.levels.max_level()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V>> {
        self.nodes.get_mut(id).and_then(Option::as_mut)
    }

    /// The link leaving `cursor` at `level`
    #[inline]
    pub(crate) fn forward(&self, cursor: Cursor, level: usize) -> Link {
        match cursor {
            Cursor::Head => self.head.get(level).copied().flatten(),
            Cursor::Node(id) => self
                .node(id)
                .and_then(|node| node.forward.get(level).copied().flatten()),
        }
    }

    fn set_forward(&mut self, cursor: Cursor, level: usize, link: Link) {
        match cursor {
            Cursor::Head => self.head[level] = link,
            Cursor::Node(id) => {
                if let Some(node) = self.node_mut(id) {
                    node.forward[level] = link;
                }
            }
        }
    }

    /// Walk from `top_level` down to level 0 and return the last position
    /// whose fingerprint is strictly below `fingerprint`.
    ///
    /// `visit` receives that position once per level. Nodes equal to the
    /// target fingerprint are never skipped, since any of them may hold the
    /// key being looked for.
    fn descend(&self, fingerprint: u64, mut visit: impl FnMut(usize, Cursor)) -> Cursor {
        let mut cursor = Cursor::Head;
        for level in (0..=self.top_level).rev() {
            while let Some(next) = self.forward(cursor, level) {
                match self.node(next) {
                    Some(node) if node.fingerprint < fingerprint => cursor = Cursor::Node(next),
                    _ => break,
                }
            }
            visit(level, cursor);
        }
        cursor
    }

    /// Scan the level-0 run of `fingerprint` after `predecessor` for `key`
    fn find_in_run<Q>(&self, predecessor: Cursor, fingerprint: u64, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let mut link = self.forward(predecessor, 0);
        while let Some(id) = link {
            let node = self.node(id)?;
            if node.fingerprint != fingerprint {
                return None;
            }
            let stored: &Q = node.key.borrow();
            if stored == key {
                return Some(id);
            }
            link = node.forward[0];
        }
        None
    }

    fn locate<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Fingerprint + PartialEq + ?Sized,
    {
        let fingerprint = key.fingerprint();
        let predecessor = self.descend(fingerprint, |_, _| {});
        self.find_in_run(predecessor, fingerprint, key)
            .and_then(|id| self.node(id))
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Fingerprint + PartialEq + ?Sized,
    {
        self.locate(key).map(|node| &node.value)
    }

    fn allocate(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Insert or overwrite. Returns the previous value when the key was present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Fingerprint + PartialEq,
    {
        let fingerprint = key.fingerprint();
        let mut predecessors = vec![Cursor::Head; self.max_level() + 1];
        let predecessor = self.descend(fingerprint, |level, cursor| predecessors[level] = cursor);

        if let Some(id) = self.find_in_run(predecessor, fingerprint, &key) {
            if let Some(node) = self.node_mut(id) {
                trace!(fingerprint, "updated value in place");
                return Some(mem::replace(&mut node.value, value));
            }
        }

        // Fully link the new node's own forward pointers before any
        // predecessor points at it.
        let height = self.levels.draw_height();
        let mut node = Node::new(key, fingerprint, value, height);
        for (level, link) in node.forward.iter_mut().enumerate() {
            *link = self.forward(predecessors[level], level);
        }
        let id = self.allocate(node);
        for (level, predecessor) in predecessors.iter().enumerate().take(height + 1) {
            self.set_forward(*predecessor, level, Some(id));
        }

        self.top_level = self.top_level.max(height);
        self.len += 1;
        trace!(fingerprint, height, len = self.len, "inserted node");
        None
    }

    /// Unlink the node holding `key` from every level and return its value
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Fingerprint + PartialEq + ?Sized,
    {
        let fingerprint = key.fingerprint();
        let mut predecessors = vec![Cursor::Head; self.max_level() + 1];
        let predecessor = self.descend(fingerprint, |level, cursor| predecessors[level] = cursor);

        let target = self.find_in_run(predecessor, fingerprint, key)?;
        let height = self.node(target)?.height();

        for (level, start) in predecessors.iter().enumerate().take(height + 1) {
            // Nodes sharing the fingerprint may sit between the recorded
            // predecessor and the target.
            let mut cursor = *start;
            while let Some(next) = self.forward(cursor, level) {
                if next == target {
                    let successor = self.forward(Cursor::Node(target), level);
                    self.set_forward(cursor, level, successor);
                    break;
                }
                cursor = Cursor::Node(next);
            }
        }

        let node = self.nodes.get_mut(target)?.take()?;
        self.free.push(target);
        self.len -= 1;
        trace!(fingerprint, height, len = self.len, "removed node");

        if height == self.top_level {
            self.shrink_top_level();
        }
        if self.len == 0 {
            self.nodes.clear();
            self.free.clear();
        }
        Some(node.value)
    }

    fn shrink_top_level(&mut self) {
        let previous = self.top_level;
        while self.top_level > 0 && self.head[self.top_level].is_none() {
            self.top_level -= 1;
        }
        if self.top_level != previous {
            debug!(from = previous, to = self.top_level, "lowered top level");
        }
    }

    pub(crate) fn clear(&mut self) {
        self.head.iter_mut().for_each(|link| *link = None);
        self.nodes.clear();
        self.free.clear();
        self.top_level = 0;
        self.len = 0;
    }

    /// Iterate the nodes linked at `level`, in list order
    pub(crate) fn level_iter(&self, level: usize) -> LevelIter<'_, K, V> {
        LevelIter {
            inner: self,
            level,
            next: self.forward(Cursor::Head, level),
        }
    }
}

pub(crate) struct LevelIter<'a, K, V> {
    inner: &'a Inner<K, V>,
    level: usize,
    next: Link,
}

impl<'a, K, V> Iterator for LevelIter<'a, K, V> {
    type Item = (NodeId, &'a Node<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.inner.node(id)?;
        self.next = node.forward.get(self.level).copied().flatten();
        Some((id, node))
    }
}
