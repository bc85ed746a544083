use std::fmt::{self, Debug, Write};

use super::inner::Inner;
use super::node::Link;
use crate::error::{Result, SkipListError};

fn corrupted(level: usize, reason: impl Into<String>) -> SkipListError {
    SkipListError::Corrupted {
        level,
        reason: reason.into(),
    }
}

impl<K, V> Inner<K, V> {
    fn check_link(&self, level: usize, link: Link) -> Result<()> {
        match link {
            Some(next) if self.node(next).is_none() => {
                Err(corrupted(level, format!("link to reclaimed slot {}", next)))
            }
            _ => Ok(()),
        }
    }

    /// Check the ordering, membership and top-level invariants
    pub(crate) fn validate(&self) -> Result<()>
    where
        K: PartialEq,
    {
        let slots = self.nodes.len();
        // Level-0 rank of every linked node, used to check that each upper
        // level is a sub-sequence of level 0.
        let mut rank = vec![usize::MAX; slots];
        // Number of level-0 nodes of each height
        let mut heights = vec![0usize; self.max_level() + 1];
        let mut count = 0;
        let mut max_height = 0;
        let mut previous_fingerprint = None;
        let mut run = Vec::new();

        self.check_link(0, self.head[0])?;
        for (id, node) in self.level_iter(0).take(slots + 1) {
            if count == slots {
                return Err(corrupted(0, "cycle in forward links"));
            }
            self.check_link(0, node.forward[0])?;
            match heights.get_mut(node.height()) {
                Some(tally) => *tally += 1,
                None => {
                    return Err(corrupted(
                        0,
                        format!("node of height {} above max level", node.height()),
                    ));
                }
            }
            match previous_fingerprint {
                Some(previous) if previous > node.fingerprint => {
                    return Err(corrupted(
                        0,
                        format!("fingerprint {} follows {}", node.fingerprint, previous),
                    ));
                }
                Some(previous) if previous == node.fingerprint => {
                    if run.iter().any(|key| *key == &node.key) {
                        return Err(corrupted(0, "duplicate key"));
                    }
                }
                _ => run.clear(),
            }
            run.push(&node.key);
            previous_fingerprint = Some(node.fingerprint);
            rank[id] = count;
            count += 1;
            max_height = max_height.max(node.height());
        }

        if count != self.len {
            return Err(corrupted(
                0,
                format!("{} linked nodes but length is {}", count, self.len),
            ));
        }
        if max_height != self.top_level {
            return Err(corrupted(
                self.top_level,
                format!("top level is {} but tallest node is {}", self.top_level, max_height),
            ));
        }

        for level in 1..=self.max_level() {
            if level > self.top_level {
                if self.head[level].is_some() {
                    return Err(corrupted(level, "populated above top level"));
                }
                continue;
            }

            // Every node of height >= level must be linked at this level
            let expected: usize = heights[level..].iter().sum();
            let mut seen = 0;
            let mut last_rank = None;
            self.check_link(level, self.head[level])?;
            for (id, node) in self.level_iter(level).take(slots + 1) {
                if seen == slots {
                    return Err(corrupted(level, "cycle in forward links"));
                }
                if node.height() < level {
                    return Err(corrupted(level, format!("node of height {}", node.height())));
                }
                self.check_link(level, node.forward[level])?;
                let node_rank = rank[id];
                if node_rank == usize::MAX {
                    return Err(corrupted(level, "node missing from level 0"));
                }
                if last_rank.is_some_and(|last| last >= node_rank) {
                    return Err(corrupted(level, "order differs from level 0"));
                }
                last_rank = Some(node_rank);
                seen += 1;
            }
            if seen != expected {
                return Err(corrupted(
                    level,
                    format!("{} linked nodes but {} reach this level", seen, expected),
                ));
            }
        }

        Ok(())
    }

    /// One line per level, top first: `||->` then each value and `->`
    pub(crate) fn dump(&self, out: &mut impl Write) -> fmt::Result
    where
        V: Debug,
    {
        for level in (0..=self.top_level).rev() {
            out.write_str("||->")?;
            for (_, node) in self.level_iter(level) {
                write!(out, "{:?}->", node.value)?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelGenerator;

    #[test]
    fn test_dump_flat_list() {
        // max level 0 is not reachable through the public constructor, but it
        // pins every node to level 0 here
        let mut inner: Inner<u32, u32> = Inner::new(LevelGenerator::with_seed(0, 3));
        for key in [3u32, 1, 2] {
            inner.insert(key, key * 10);
        }
        let mut out = String::new();
        inner.dump(&mut out).unwrap();
        assert_eq!(out, "||->10->20->30->\n");
    }

    #[test]
    fn test_validate_detects_length_mismatch() {
        let mut inner: Inner<u32, u32> = Inner::new(LevelGenerator::with_seed(4, 3));
        inner.insert(1, 1);
        inner.len = 2;
        assert!(matches!(
            inner.validate(),
            Err(SkipListError::Corrupted { level: 0, .. })
        ));
    }

    #[test]
    fn test_validate_detects_out_of_order_links() {
        let mut inner: Inner<u32, u32> = Inner::new(LevelGenerator::with_seed(0, 3));
        inner.insert(1, 1);
        inner.insert(2, 2);
        assert!(inner.validate().is_ok());

        // Slots 0 and 1 hold keys 1 and 2; relink them as head -> 2 -> 1
        inner.head[0] = Some(1);
        inner.nodes[1].as_mut().unwrap().forward[0] = Some(0);
        inner.nodes[0].as_mut().unwrap().forward[0] = None;
        assert!(inner.validate().is_err());
    }

    fn tall_list() -> Inner<u32, u32> {
        let mut inner: Inner<u32, u32> = Inner::new(LevelGenerator::with_seed(8, 17));
        for key in 0..200u32 {
            inner.insert(key, key);
        }
        assert!(inner.top_level >= 1);
        assert!(inner.validate().is_ok());
        inner
    }

    #[test]
    fn test_validate_detects_dangling_upper_link() {
        let mut inner = tall_list();
        inner.head[1] = Some(10_000);
        assert!(matches!(
            inner.validate(),
            Err(SkipListError::Corrupted { level: 1, .. })
        ));
    }

    #[test]
    fn test_validate_detects_link_to_reclaimed_slot() {
        let mut inner = tall_list();
        let first = inner.head[1].unwrap();
        inner.nodes.push(None);
        let reclaimed = inner.nodes.len() - 1;
        inner.nodes[first].as_mut().unwrap().forward[1] = Some(reclaimed);
        assert!(matches!(
            inner.validate(),
            Err(SkipListError::Corrupted { level: 1, .. })
        ));
    }

    #[test]
    fn test_validate_detects_tall_node_skipped_on_upper_level() {
        let mut inner = tall_list();
        // Unlink the first level-1 node from level 1 only
        let first = inner.head[1].unwrap();
        inner.head[1] = inner.nodes[first].as_ref().unwrap().forward[1];
        assert!(matches!(
            inner.validate(),
            Err(SkipListError::Corrupted { level: 1, .. })
        ));
    }
}
