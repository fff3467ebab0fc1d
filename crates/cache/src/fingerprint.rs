//! Cache keys: SHA-512 over a field signature and region, rendered in a
//! filename-safe base64 alphabet.
//!
//! The first 384 bits of the digest encode to exactly 64 characters with no
//! padding.

use base64::alphabet::Alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::Engine as _;
use sha2::{Digest, Sha512};
use sigfield_core::{Region, SignalField};

/// Base64 alphabet with `-` in place of `/`, safe in URLs and file names.
pub const FILENAME_SAFE_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-";

/// Digest bytes kept in a fingerprint.
pub const FINGERPRINT_BYTES: usize = 48;

/// Length of a fingerprint string.
pub const FINGERPRINT_LEN: usize = 64;

const FILENAME_SAFE: Alphabet = match Alphabet::new(FILENAME_SAFE_CHARS) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("filename-safe base64 alphabet is valid"),
};

const FILENAME_SAFE_ENGINE: GeneralPurpose = GeneralPurpose::new(&FILENAME_SAFE, PAD);

/// Encodes bytes with the filename-safe alphabet (padded like standard base64).
pub fn encode(bytes: &[u8]) -> String {
    FILENAME_SAFE_ENGINE.encode(bytes)
}

/// Content-derived cache key of `field` rendered over `region`.
pub fn fingerprint(field: &dyn SignalField, region: &Region) -> String {
    let mut hasher = Sha512::new();
    hasher.update(field.signature());
    hasher.update(region.to_be_bytes());
    let digest = hasher.finalize();
    encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigfield_core::Signature;

    struct Stub(Vec<u8>);

    impl SignalField for Stub {
        fn signature(&self) -> Vec<u8> {
            self.0.clone()
        }

        fn range(&self) -> (f64, f64) {
            (0.0, 1.0)
        }

        fn eval(&self, _x: f64, _y: f64) -> f64 {
            0.0
        }
    }

    fn one() -> Stub {
        Stub(Signature::new().push_real(1.0).finish())
    }

    #[test]
    fn encode_uses_filename_safe_alphabet() {
        assert_eq!(encode(b"Man"), "TWFu");
        assert_eq!(encode(&[0xFB, 0xFF, 0xFF]), "+---");
    }

    #[test]
    fn fingerprint_golden_values() {
        // Changing these invalidates every cache directory on disk.
        let r = Region::new(0, 0, 16, 16).unwrap();
        assert_eq!(
            fingerprint(&one(), &r),
            "dP95VxYF+CINjxLnpwaBFFDpb3WlEmUf0GnafPF4oog2CedrA6JBPCw-xN5oZhzO"
        );
        let r = Region::new(0, 0, 1, 1).unwrap();
        assert_eq!(
            fingerprint(&Stub(Vec::new()), &r),
            "jEORwBa4YGbxytbw9A-0nxgUjr6zBwzdWLi3mOJhjZT5MY+-r-EyViGHhnm5YZjL"
        );
    }

    #[test]
    fn negative_origin_is_twos_complement() {
        let r = Region::new(-3, 5, 16, 16).unwrap();
        assert_eq!(
            fingerprint(&one(), &r),
            "D+Jt3d4P3KWOAlaZyO8923fj6M6OTzWHpHFIAY1qK09B3Tb+O+f19skwi-P4Droa"
        );
    }

    #[test]
    fn fingerprint_depends_on_region() {
        let a = fingerprint(&one(), &Region::new(0, 0, 16, 16).unwrap());
        let b = fingerprint(&one(), &Region::new(0, 0, 16, 17).unwrap());
        assert_ne!(a, b);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fingerprint_is_64_filename_safe_chars(
                sig in prop::collection::vec(any::<u8>(), 0..64),
                x in -1000_i64..1000,
                y in -1000_i64..1000,
                w in 1_i64..4096,
                h in 1_i64..4096,
            ) {
                let key = fingerprint(&Stub(sig), &Region::new(x, y, w, h).unwrap());
                prop_assert_eq!(key.len(), FINGERPRINT_LEN);
                prop_assert!(key.chars().all(|c| FILENAME_SAFE_CHARS.contains(c)));
            }
        }
    }
}
