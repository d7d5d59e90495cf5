//! SHA-256 content digests.

use std::fmt;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a blob; always 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// The hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the hex string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ContentDigest> for String {
    fn from(d: ContentDigest) -> Self {
        d.0
    }
}

/// Incremental SHA-256 hasher.
#[derive(Clone, Default)]
pub struct ContentHasher {
    inner: Sha256,
}

impl fmt::Debug for ContentHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentHasher").finish_non_exhaustive()
    }
}

impl ContentHasher {
    /// Start a new digest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk.
    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
    }

    /// Finish and hex-encode.
    pub fn finalize(self) -> ContentDigest {
        ContentDigest(hex::encode(self.inner.finalize()))
    }

    /// Digest a whole buffer.
    pub fn digest(data: &[u8]) -> ContentDigest {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}
