//! Running hash state over the supported algorithms

use crate::config::HashAlgorithm;
use sha2::Digest;
use std::fmt;

/// Unified hash state that supports all algorithms.
///
/// Created once per computation, fed by every update in order, and consumed
/// by [`HashState::finalize`]. Cloning snapshots the state so a partial
/// contribution can be discarded.
#[derive(Clone)]
pub enum HashState {
    /// SHA-256
    Sha256(sha2::Sha256),
    /// MD5
    Md5(md5::Md5),
    /// SHA-1
    Sha1(sha1::Sha1),
    /// BLAKE2b-512
    Blake2b(blake2::Blake2b512),
}

impl HashState {
    /// Create a new state for the given algorithm
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Self::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Md5 => Self::Md5(md5::Md5::new()),
            HashAlgorithm::Sha1 => Self::Sha1(sha1::Sha1::new()),
            HashAlgorithm::Blake2b => Self::Blake2b(blake2::Blake2b512::new()),
        }
    }

    /// Get the algorithm this state uses
    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Sha256(_) => HashAlgorithm::Sha256,
            Self::Md5(_) => HashAlgorithm::Md5,
            Self::Sha1(_) => HashAlgorithm::Sha1,
            Self::Blake2b(_) => HashAlgorithm::Blake2b,
        }
    }

    /// Feed more bytes
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha256(h) => h.update(data),
            Self::Md5(h) => h.update(data),
            Self::Sha1(h) => h.update(data),
            Self::Blake2b(h) => h.update(data),
        }
    }

    /// Finalize and get the raw digest bytes
    pub fn finalize(self) -> Vec<u8> {
        match self {
            Self::Sha256(h) => h.finalize().to_vec(),
            Self::Md5(h) => h.finalize().to_vec(),
            Self::Sha1(h) => h.finalize().to_vec(),
            Self::Blake2b(h) => h.finalize().to_vec(),
        }
    }

    /// Finalize and get the digest as lowercase hex
    pub fn finalize_hex(self) -> String {
        hex::encode(self.finalize())
    }
}

impl fmt::Debug for HashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashState").field(&self.algorithm()).finish()
    }
}

/// Hex digest of bytes held in memory
pub fn hash_bytes(data: &[u8], algorithm: HashAlgorithm) -> String {
    let mut state = HashState::new(algorithm);
    state.update(data);
    state.finalize_hex()
}
