use siphasher::sip::SipHasher;
use std::hash::{Hash, Hasher};

use super::{Fingerprint, private};

/// Wraps any hashable value so it can be used as a skip list key
///
/// The fingerprint is a SipHash of the wrapped value under fixed keys, so it
/// is stable across runs of the same build. Ordering follows the hash, not the
/// wrapped value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hashed<T>(pub T);

impl<T> Hashed<T> {
    pub fn new(value: T) -> Self {
        Hashed(value)
    }

    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Hashed<T> {
    fn from(value: T) -> Self {
        Hashed(value)
    }
}

impl<T: Hash> private::Sealed for Hashed<T> {}

impl<T: Hash> Fingerprint for Hashed<T> {
    fn fingerprint(&self) -> u64 {
        let mut hasher = SipHasher::new_with_keys(0x0123456789ABCDEF, 0xFEDCBA9876543210);
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashed_is_deterministic() {
        let a = Hashed((1u32, "one"));
        let b = Hashed((1u32, "one"));
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), Hashed((2u32, "two")).fingerprint());
    }

    #[test]
    fn test_hashed_accessors() {
        let key: Hashed<Vec<u32>> = vec![1, 2, 3].into();
        assert_eq!(key.get(), &vec![1, 2, 3]);
        assert_eq!(key.into_inner(), vec![1, 2, 3]);
    }
}
