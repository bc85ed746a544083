//! Key fingerprints: the 64-bit ordering keys the skip list is sorted by.
//!
//! Only a fixed set of key kinds can be fingerprinted. The [`Fingerprint`]
//! trait is sealed, so presenting any other kind is a compile error rather
//! than a runtime failure.
//!
//! Integer and float kinds map to their raw bit pattern, which keeps
//! ascending keys of the same signedness in ascending order. Negative signed
//! keys are sign-extended and therefore sort after every non-negative key.
//! Both float zeros map to fingerprint 0, since `-0.0 == 0.0` and equal keys
//! must share a fingerprint.
//! Text and byte keys fold a 32-bit FNV accumulation into the fingerprint, so
//! distinct keys may collide; the list always confirms a match with key
//! equality.

mod hashed;

use std::time::{SystemTime, UNIX_EPOCH};

pub use hashed::Hashed;

/// FNV offset basis for the 32-bit accumulation
const FNV_OFFSET_BASIS: u32 = 2166136261;
/// FNV prime for the 32-bit accumulation
const FNV_PRIME: u32 = 16777619;

mod private {
    pub trait Sealed {}
}

/// A key kind the skip list knows how to order
///
/// Key kinds outside the supported set do not implement this trait, so a
/// list keyed by them fails to compile:
///
/// ```compile_fail
/// use hashskip::SkipList;
///
/// let list: SkipList<Vec<u32>, u8> = SkipList::new(8).unwrap();
/// list.insert(vec![1], 1);
/// ```
///
/// Nor can it be implemented outside this crate:
///
/// ```compile_fail
/// struct Custom;
///
/// impl hashskip::Fingerprint for Custom {
///     fn fingerprint(&self) -> u64 {
///         0
///     }
/// }
/// ```
pub trait Fingerprint: private::Sealed {
    /// Returns the 64-bit ordering key for this value
    fn fingerprint(&self) -> u64;
}

/// 32-bit FNV accumulation (multiply, then xor each byte), zero-extended
pub fn fnv32(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash = hash.wrapping_mul(FNV_PRIME);
        hash ^= u32::from(byte);
    }
    u64::from(hash)
}

impl<T: Fingerprint + ?Sized> private::Sealed for &T {}

impl<T: Fingerprint + ?Sized> Fingerprint for &T {
    #[inline]
    fn fingerprint(&self) -> u64 {
        (**self).fingerprint()
    }
}

impl private::Sealed for str {}

impl Fingerprint for str {
    #[inline]
    fn fingerprint(&self) -> u64 {
        fnv32(self.as_bytes())
    }
}

impl private::Sealed for String {}

impl Fingerprint for String {
    #[inline]
    fn fingerprint(&self) -> u64 {
        fnv32(self.as_bytes())
    }
}

impl private::Sealed for [u8] {}

impl Fingerprint for [u8] {
    #[inline]
    fn fingerprint(&self) -> u64 {
        fnv32(self)
    }
}

impl private::Sealed for Vec<u8> {}

impl Fingerprint for Vec<u8> {
    #[inline]
    fn fingerprint(&self) -> u64 {
        fnv32(self)
    }
}

impl private::Sealed for bool {}

impl Fingerprint for bool {
    #[inline]
    fn fingerprint(&self) -> u64 {
        // true sorts first
        if *self { 0 } else { 1 }
    }
}

impl private::Sealed for SystemTime {}

impl Fingerprint for SystemTime {
    /// Signed nanoseconds since the Unix epoch, reinterpreted as unsigned.
    /// Instants outside the `i64` nanosecond range (about 1677 to 2262)
    /// saturate at `i64::MIN` or `i64::MAX`.
    fn fingerprint(&self) -> u64 {
        let nanos = match self.duration_since(UNIX_EPOCH) {
            Ok(since) => i64::try_from(since.as_nanos()).unwrap_or(i64::MAX),
            Err(before) => {
                i64::try_from(before.duration().as_nanos()).map_or(i64::MIN, |nanos| -nanos)
            }
        };
        nanos as u64
    }
}

macro_rules! impl_unsigned_fingerprint {
    ($($t:ty),*) => {
        $(
            impl private::Sealed for $t {}

            impl Fingerprint for $t {
                #[inline]
                fn fingerprint(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

macro_rules! impl_signed_fingerprint {
    ($($t:ty),*) => {
        $(
            impl private::Sealed for $t {}

            impl Fingerprint for $t {
                #[inline]
                fn fingerprint(&self) -> u64 {
                    *self as i64 as u64
                }
            }
        )*
    };
}

impl_unsigned_fingerprint!(u8, u16, u32, u64, usize);
impl_signed_fingerprint!(i8, i16, i32, i64, isize);

impl private::Sealed for f32 {}

impl Fingerprint for f32 {
    #[inline]
    fn fingerprint(&self) -> u64 {
        f64::from(*self).fingerprint()
    }
}

impl private::Sealed for f64 {}

impl Fingerprint for f64 {
    #[inline]
    fn fingerprint(&self) -> u64 {
        // -0.0 folds onto 0.0
        if *self == 0.0 { 0 } else { self.to_bits() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fnv32_matches_reference_vectors() {
        assert_eq!(fnv32(b""), 0x811c9dc5);
        assert_eq!(fnv32(b"a"), 0x050c5d7e);
        assert_eq!(fnv32(b"foobar"), 0x31f0b262);
    }

    #[test]
    fn test_text_and_bytes_agree() {
        let owned = String::from("hello");
        assert_eq!(owned.fingerprint(), "hello".fingerprint());
        assert_eq!(owned.fingerprint(), b"hello".to_vec().fingerprint());
        assert_eq!(owned.fingerprint(), b"hello"[..].fingerprint());
        assert!(owned.fingerprint() <= u64::from(u32::MAX));
    }

    #[test]
    fn test_integer_bit_patterns() {
        assert_eq!(42u8.fingerprint(), 42);
        assert_eq!(u64::MAX.fingerprint(), u64::MAX);
        assert_eq!(7usize.fingerprint(), 7);
        assert_eq!(100i32.fingerprint(), 100);
        assert_eq!((-1i8).fingerprint(), u64::MAX);
        assert_eq!((-2i64).fingerprint(), u64::MAX - 1);
        assert!((-1i32).fingerprint() > i32::MAX.fingerprint());
    }

    #[test]
    fn test_float_bit_patterns() {
        assert_eq!(1.5f64.fingerprint(), 1.5f64.to_bits());
        assert_eq!(1.5f32.fingerprint(), 1.5f64.to_bits());
        assert!(1.0f64.fingerprint() < 2.0f64.fingerprint());
        assert_eq!((-0.0f64).fingerprint(), 0.0f64.fingerprint());
        assert_eq!((-0.0f32).fingerprint(), 0);
        assert_eq!((-1.0f64).fingerprint(), (-1.0f64).to_bits());
    }

    #[test]
    fn test_bool_and_time() {
        assert_eq!(true.fingerprint(), 0);
        assert_eq!(false.fingerprint(), 1);

        let later = UNIX_EPOCH + Duration::from_nanos(1_500);
        assert_eq!(later.fingerprint(), 1_500);
        let earlier = UNIX_EPOCH - Duration::from_nanos(1);
        assert_eq!(earlier.fingerprint(), u64::MAX);
    }

    #[test]
    fn test_time_saturates_outside_nanosecond_range() {
        // Year 2286, past the last instant i64 nanoseconds can hold
        let far_future = UNIX_EPOCH + Duration::from_secs(10_000_000_000);
        assert_eq!(far_future.fingerprint(), i64::MAX as u64);
        let far_past = UNIX_EPOCH - Duration::from_secs(10_000_000_000);
        assert_eq!(far_past.fingerprint(), i64::MIN as u64);
    }

    #[test]
    fn test_reference_forwards() {
        let key = 9u16;
        assert_eq!((&key).fingerprint(), 9);
        assert_eq!((&"abc").fingerprint(), "abc".fingerprint());
    }
}
