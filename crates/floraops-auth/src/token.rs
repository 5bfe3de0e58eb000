//! Opaque session token generation and digesting.
//!
//! A token is 32 bytes (256 bits) from the OS CSPRNG, hex-encoded. The
//! raw token goes to the client once; storage only ever sees its SHA-256
//! digest, so a leaked sessions table cannot be replayed.

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Raw entropy per token, in bytes.
pub const TOKEN_BYTES: usize = 32;

/// Generate a new opaque session token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest a token for storage or lookup.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
