//! In-memory content store.

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::hash::ContentHash;

use super::{
    ContentStore, EntryData, EntryKind, FileEntry, PendingFile, StoreError, StoreResult, ext_of,
    io_error, mime,
};

/// Store that keeps every entry's bytes in memory.
///
/// Entries are kept in insertion order so exports are deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<ContentHash, Arc<FileEntry>>,
    order: Vec<ContentHash>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<FileEntry>> {
        self.order.iter().filter_map(|h| self.entries.get(h))
    }

    /// Total bytes held across all entries.
    pub fn total_bytes(&self) -> u64 {
        self.entries.values().map(|e| e.size()).sum()
    }

    /// Bytes of an entry, if present.
    pub fn bytes(&self, hash: &ContentHash) -> Option<&[u8]> {
        match self.entries.get(hash)?.data() {
            EntryData::Bytes(bytes) => Some(bytes),
            EntryData::Path(_) => None,
        }
    }

    fn insert(&mut self, hash: ContentHash, make: impl FnOnce() -> FileEntry) -> Arc<FileEntry> {
        if let Some(existing) = self.entries.get(&hash) {
            tracing::trace!(%hash, "memory store: content already present");
            return Arc::clone(existing);
        }
        let entry = Arc::new(make());
        self.entries.insert(hash, Arc::clone(&entry));
        self.order.push(hash);
        entry
    }
}

impl ContentStore for MemoryStore {
    fn entry_kind(&self) -> EntryKind {
        EntryKind::Memory
    }

    fn commit(&mut self, file: PendingFile) -> StoreResult<Arc<FileEntry>> {
        let (hash, ext, mime, bytes) = file.finish();
        Ok(self.insert(hash, || {
            let size = bytes.len() as u64;
            FileEntry::new(hash, ext, mime, size, EntryKind::Memory, EntryData::Bytes(bytes.into()))
        }))
    }

    fn load_file(&mut self, path: &Path) -> StoreResult<Arc<FileEntry>> {
        let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
        let hash = ContentHash::of(&bytes);
        let ext = ext_of(path);
        let mime = mime::guess(&ext);
        Ok(self.insert(hash, || {
            let size = bytes.len() as u64;
            FileEntry::new(hash, ext, mime, size, EntryKind::Memory, EntryData::Bytes(bytes.into()))
        }))
    }

    fn add_file(&mut self, entry: &Arc<FileEntry>) -> StoreResult<()> {
        if entry.kind() != EntryKind::Memory {
            return Err(StoreError::KindMismatch {
                expected: EntryKind::Memory,
                found: entry.kind(),
            });
        }
        let hash = entry.hash();
        if !self.entries.contains_key(&hash) {
            self.entries.insert(hash, Arc::clone(entry));
            self.order.push(hash);
        }
        Ok(())
    }

    fn get(&self, hash: &ContentHash) -> Option<Arc<FileEntry>> {
        self.entries.get(hash).cloned()
    }

    fn files(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn commit_bytes(store: &mut MemoryStore, data: &[u8]) -> Arc<FileEntry> {
        let mut file = store.get_file("txt", "text/plain");
        file.write_all(data).unwrap();
        store.commit(file).unwrap()
    }

    #[test]
    fn test_commit_dedups_by_content() {
        let mut store = MemoryStore::new();
        let a = commit_bytes(&mut store, b"same");
        let b = commit_bytes(&mut store, b"same");
        let c = commit_bytes(&mut store, b"other");

        assert!(Arc::ptr_eq(&a, &b));
        assert_ne!(a.hash(), c.hash());
        assert_eq!(store.files(), 2);
        assert_eq!(store.total_bytes(), 9);
        assert_eq!(store.bytes(&a.hash()), Some(&b"same"[..]));
    }

    #[test]
    fn test_add_file_is_idempotent() {
        let mut store = MemoryStore::new();
        let entry = commit_bytes(&mut store, b"x");
        store.add_file(&entry).unwrap();
        store.add_file(&entry).unwrap();
        assert_eq!(store.files(), 1);

        let mut other = MemoryStore::new();
        other.add_file(&entry).unwrap();
        assert_eq!(other.get(&entry.hash()).unwrap().mime(), "text/plain");
    }

    #[test]
    fn test_add_file_rejects_foreign_kind() {
        let hash = ContentHash::of(b"x");
        let entry = Arc::new(FileEntry::new(
            hash,
            "txt",
            "text/plain",
            1,
            EntryKind::Disk,
            EntryData::Path("x.txt".into()),
        ));
        let mut store = MemoryStore::new();
        assert!(matches!(store.add_file(&entry), Err(StoreError::KindMismatch { .. })));
    }

    #[test]
    fn test_iter_insertion_order() {
        let mut store = MemoryStore::new();
        let first = commit_bytes(&mut store, b"1");
        let second = commit_bytes(&mut store, b"2");
        let hashes: Vec<_> = store.iter().map(|e| e.hash()).collect();
        assert_eq!(hashes, vec![first.hash(), second.hash()]);
    }

    #[test]
    fn test_load_missing_file() {
        let mut store = MemoryStore::new();
        let err = store.load_file(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
