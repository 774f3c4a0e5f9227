//! Content hashing for the asset store
//!
//! Store entries are addressed by the blake3 digest of their bytes, so the
//! same payload always maps to the same `ref://` URI across processes.

use std::fmt;
use std::io;

// =============================================================================
// ContentHash
// =============================================================================

/// blake3 digest identifying a store entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(blake3::Hash);

impl ContentHash {
    /// Hash a complete byte slice.
    pub fn of(data: &[u8]) -> Self {
        Self(blake3::hash(data))
    }

    /// Raw digest bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Lowercase hex form, as used in `ref://` URIs and on-disk file names.
    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.to_hex().as_str())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self)
    }
}

// =============================================================================
// ContentHasher - incremental hashing while a writer fills a sink
// =============================================================================

/// Incremental blake3 hasher.
///
/// Unlike `std::hash::Hasher`, the result is stable across process restarts.
pub struct ContentHasher {
    inner: blake3::Hasher,
}

impl ContentHasher {
    /// Create a new hasher
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Feed raw bytes
    #[inline]
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finish and return the digest
    #[inline]
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.inner.finalize())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for ContentHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
