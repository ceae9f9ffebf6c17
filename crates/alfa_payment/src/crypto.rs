//! Digest primitives behind the gateway request hash.

use secrecy::{ExposeSecret, Secret};

use crate::{
    errors::{self, CustomResult},
    fields::FieldMap,
};

/// Trait for generating a digest of a message
pub trait GenerateDigest {
    /// takes a message and creates a digest for it
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError>;
}

/// SHA-512 hashing algorithm
#[derive(Debug)]
pub struct Sha512;

impl GenerateDigest for Sha512 {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError> {
        let digest = ring::digest::digest(&ring::digest::SHA512, message);
        Ok(digest.as_ref().to_vec())
    }
}

/// Computes the request hash the gateway verifies server side.
///
/// The signed message is the concatenation of the field values in the exact
/// iteration order of `fields`, followed by `secret_key_1`, then
/// `secret_key_2`. The output is the lowercase hex encoding of the SHA-512
/// digest. No sorting or canonicalization happens here; callers own the
/// field order.
///
/// An unset field contributes an empty placeholder to the message, which
/// silently changes the signed content. Empty secret keys behave the same
/// way and still yield a deterministic hash.
pub fn generate_request_hash(
    fields: &FieldMap,
    secret_key_1: &Secret<String>,
    secret_key_2: &Secret<String>,
) -> CustomResult<String, errors::CryptoError> {
    let mut message = fields.concatenated_values();
    message.push_str(secret_key_1.expose_secret());
    message.push_str(secret_key_2.expose_secret());
    let digest = Sha512.generate_digest(message.as_bytes())?;
    Ok(hex::encode(digest))
}

#[cfg(test)]
mod crypto_tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn field_map(entries: &[(&'static str, &str)]) -> FieldMap {
        let mut map = FieldMap::with_capacity(entries.len());
        for (name, value) in entries.iter().copied() {
            map.push(name, value.to_string());
        }
        map
    }

    fn secret(value: &str) -> Secret<String> {
        Secret::new(value.to_string())
    }

    #[test]
    fn sha512_digest_matches_known_vector() {
        let message = "test";
        let digest = Sha512
            .generate_digest(message.as_bytes())
            .expect("digest should not fail");
        let expected = "ee26b0dd4af7e749aa1a8ee3c10ae9923f618980772e473f8819a5d4940e0db27ac185f8a0e1d5f84f88bc887fd67b143732c304cc5fa9ad8e6f57f50028a8ff";
        assert_eq!(hex::encode(digest), expected);
    }

    #[test]
    fn request_hash_covers_values_then_both_keys() {
        let fields = field_map(&[("A", "a"), ("B", "b")]);
        let hash = generate_request_hash(&fields, &secret("k1"), &secret("k2"))
            .expect("hashing should not fail");
        // SHA-512 of "abk1k2"
        let expected = "3eeef3360a87a064a048482e95213347c99107ba3e2b86ba3e029da0a75ff2ddace82d9ebe45f9bd5dabb4d2c7f60ab89482960dafd8de298369e05455323789";
        assert_eq!(hash, expected);
    }

    #[test]
    fn request_hash_is_deterministic() {
        let fields = field_map(&[("A", "a"), ("B", "b")]);
        let first = generate_request_hash(&fields, &secret("k1"), &secret("k2"))
            .expect("hashing should not fail");
        let second = generate_request_hash(&fields, &secret("k1"), &secret("k2"))
            .expect("hashing should not fail");
        assert_eq!(first, second);
    }

    #[test]
    fn request_hash_is_order_sensitive() {
        let forward = field_map(&[("A", "a"), ("B", "b")]);
        let reversed = field_map(&[("B", "b"), ("A", "a")]);
        let first = generate_request_hash(&forward, &secret("k1"), &secret("k2"))
            .expect("hashing should not fail");
        let second = generate_request_hash(&reversed, &secret("k1"), &secret("k2"))
            .expect("hashing should not fail");
        assert_ne!(first, second);
    }

    #[test]
    fn request_hash_with_empty_keys_covers_values_only() {
        let fields = field_map(&[("A", "a"), ("B", "b")]);
        let hash = generate_request_hash(&fields, &secret(""), &secret(""))
            .expect("hashing should not fail");
        // SHA-512 of "ab"
        let expected = "2d408a0717ec188158278a796c689044361dc6fdde28d6f04973b80896e1823975cdbf12eb63f9e0591328ee235d80e9b5bf1aa6a44f4617ff3caf6400eb172d";
        assert_eq!(hash, expected);
    }

    #[test]
    fn empty_field_value_keeps_its_position() {
        let with_placeholder = field_map(&[("A", "1"), ("B", ""), ("C", "2")]);
        let hash = generate_request_hash(&with_placeholder, &secret("k1"), &secret("k2"))
            .expect("hashing should not fail");
        // SHA-512 of "12k1k2"
        let expected = "302d7fec9c40baca064198089c6018fbe22bdd94f3106b2da04e0364e88cd477caa01a0b00c565e8910a331593e7ede725354eec881f051b036df76e72bf6090";
        assert_eq!(hash, expected);
    }
}
