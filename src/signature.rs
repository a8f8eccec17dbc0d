// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Signature verification seam.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

use crate::types::id::AuthKey;

/// Checks that `signature` over `message` was produced by the holder of `key`.
///
/// Implementations must answer `false` for malformed keys or signatures and
/// must not panic.
pub trait SignatureVerifier {
    fn verify(&self, key: &AuthKey, message: &[u8], signature: &[u8]) -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn verify(&self, key: &AuthKey, message: &[u8], signature: &[u8]) -> bool {
        (**self).verify(key, message, signature)
    }
}

/// Ed25519 with strict verification (rejects small-order keys and
/// non-canonical encodings).
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, key: &AuthKey, message: &[u8], signature: &[u8]) -> bool {
        let Ok(vk) = VerifyingKey::from_bytes(key.as_bytes()) else {
            return false;
        };
        let Ok(sig) = Signature::from_slice(signature) else {
            return false;
        };
        vk.verify_strict(message, &sig).is_ok()
    }
}

/// Signs `message` with an ed25519 key, returning the 64 signature bytes.
pub fn sign(key: &SigningKey, message: &[u8]) -> Vec<u8> {
    key.sign(message).to_bytes().to_vec()
}
