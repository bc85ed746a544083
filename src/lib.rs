//! An in-memory skip list keyed by 64-bit fingerprints, safe for concurrent
//! callers.
//!
//! ```
//! use hashskip::SkipList;
//!
//! let list: SkipList<String, u64> = SkipList::new(18).unwrap();
//! list.insert("apple".to_string(), 1);
//! assert_eq!(list.get("apple"), Some(1));
//! assert!(list.delete("apple"));
//! assert_eq!(list.get("apple"), None);
//! ```
pub mod error;
pub mod fingerprint;
pub mod level;
pub mod options;
pub mod skip_list;

pub use error::{Result, SkipListError};
pub use fingerprint::{Fingerprint, Hashed};
pub use level::{LevelGenerator, PROMOTION_PROBABILITY};
pub use options::{DEFAULT_MAX_LEVEL, MAX_LEVEL_LIMIT, SkipListOptions};
pub use skip_list::SkipList;
