//! On-disk content store.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::hash::ContentHash;

use super::{
    ContentStore, EntryData, EntryKind, FileEntry, PendingFile, StoreError, StoreResult, ext_of,
    io_error, mime,
};

/// Store that persists each entry as `<root>/<hash>.<ext>`.
///
/// A file is written only the first time its hash is seen.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
    entries: FxHashMap<ContentHash, Arc<FileEntry>>,
}

impl DirStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            entries: FxHashMap::default(),
        })
    }

    /// Directory holding the stored files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths of all stored files.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries
            .values()
            .filter_map(|e| match e.data() {
                EntryData::Path(p) => Some(p.clone()),
                EntryData::Bytes(_) => None,
            })
            .collect()
    }

    fn persist(
        &mut self,
        hash: ContentHash,
        ext: String,
        mime: String,
        bytes: &[u8],
    ) -> StoreResult<Arc<FileEntry>> {
        if let Some(existing) = self.entries.get(&hash) {
            tracing::trace!(%hash, "dir store: content already present");
            return Ok(Arc::clone(existing));
        }

        let size = bytes.len() as u64;
        let placeholder = EntryData::Path(PathBuf::new());
        let mut entry = FileEntry::new(hash, ext, mime, size, EntryKind::Disk, placeholder);
        let path = self.root.join(entry.file_name());
        if !path.exists() {
            self.write_atomic(&path, bytes)?;
            tracing::debug!(path = %path.display(), size, "dir store: wrote entry");
        }
        entry.data = EntryData::Path(path);

        let entry = Arc::new(entry);
        self.entries.insert(hash, Arc::clone(&entry));
        Ok(entry)
    }

    /// Write `bytes` to a temp file under the root, then rename it onto `target`.
    ///
    /// The target either does not exist or holds the complete content.
    fn write_atomic(&self, target: &Path, bytes: &[u8]) -> StoreResult<()> {
        let temp = self.root.join(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        let written = File::create(&temp)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&temp, target));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp);
            return Err(io_error(target, e));
        }
        Ok(())
    }
}

impl ContentStore for DirStore {
    fn entry_kind(&self) -> EntryKind {
        EntryKind::Disk
    }

    fn commit(&mut self, file: PendingFile) -> StoreResult<Arc<FileEntry>> {
        let (hash, ext, mime, bytes) = file.finish();
        self.persist(hash, ext, mime, &bytes)
    }

    fn load_file(&mut self, path: &Path) -> StoreResult<Arc<FileEntry>> {
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        let ext = ext_of(path);
        let mime = mime::guess(&ext).to_string();
        self.persist(ContentHash::of(&bytes), ext, mime, &bytes)
    }

    fn add_file(&mut self, entry: &Arc<FileEntry>) -> StoreResult<()> {
        if entry.kind() != EntryKind::Disk {
            return Err(StoreError::KindMismatch {
                expected: EntryKind::Disk,
                found: entry.kind(),
            });
        }
        if self.entries.contains_key(&entry.hash()) {
            return Ok(());
        }

        // Entry may come from another store instance; make sure it lives under our root
        let target = self.root.join(entry.file_name());
        let local = match entry.data() {
            EntryData::Path(source) if *source == target => Arc::clone(entry),
            data => {
                if !target.exists() {
                    match data {
                        EntryData::Path(source) => {
                            let bytes = fs::read(source).map_err(|e| io_error(source, e))?;
                            self.write_atomic(&target, &bytes)?;
                        }
                        EntryData::Bytes(bytes) => self.write_atomic(&target, bytes)?,
                    }
                }
                let mut copy = FileEntry::clone(entry);
                copy.data = EntryData::Path(target);
                Arc::new(copy)
            }
        };
        self.entries.insert(entry.hash(), local);
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
    use super::*;
    use crate::store::MemoryStore;

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_commit_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::new(dir.path().join("assets")).unwrap();

        let mut file = store.get_file("svg", "image/svg+xml");
        file.write_all(b"<svg/>").unwrap();
        let first = store.commit(file).unwrap();

        let mut file = store.get_file("svg", "image/svg+xml");
        file.write_all(b"<svg/>").unwrap();
        let second = store.commit(file).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.files(), 1);

        let path = store.root().join(first.file_name());
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
        assert_eq!(store.paths(), vec![path]);
        assert_eq!(first.read_bytes().unwrap(), b"<svg/>");
    }

    #[test]
    fn test_load_file_copies_into_root() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("report.csv");
        fs::write(&source, "a,b\n1,2\n").unwrap();

        let mut store = DirStore::new(dir.path().join("assets")).unwrap();
        let entry = store.load_file(&source).unwrap();

        assert_eq!(entry.ext(), "csv");
        assert_eq!(entry.mime(), "text/csv");
        assert!(store.root().join(entry.file_name()).exists());
    }

    #[test]
    fn test_add_file_from_other_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = DirStore::new(dir.path().join("one")).unwrap();
        let mut file = first.get_file("txt", "text/plain");
        file.write_all(b"hello").unwrap();
        let entry = first.commit(file).unwrap();

        let mut second = DirStore::new(dir.path().join("two")).unwrap();
        second.add_file(&entry).unwrap();
        second.add_file(&entry).unwrap();

        assert_eq!(second.files(), 1);
        let copied = second.get(&entry.hash()).unwrap();
        assert_eq!(copied.read_bytes().unwrap(), b"hello");
        assert!(second.root().join(entry.file_name()).exists());
    }

    #[test]
    fn test_writes_leave_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::new(dir.path().join("assets")).unwrap();

        let mut file = store.get_file("svg", "image/svg+xml");
        file.write_all(b"<svg/>").unwrap();
        let svg = store.commit(file).unwrap();

        let mut other = MemoryStore::new();
        let mut file = other.get_file("txt", "text/plain");
        file.write_all(b"hello").unwrap();
        let text = other.commit(file).unwrap();
        let mut copy = FileEntry::clone(&text);
        copy.kind = EntryKind::Disk;
        store.add_file(&Arc::new(copy)).unwrap();

        let mut expected = vec![svg.file_name(), text.file_name()];
        expected.sort();
        assert_eq!(listing(store.root()), expected);
    }

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path().join("assets")).unwrap();
        let target = store.root().join("missing").join("x.txt");

        assert!(store.write_atomic(&target, b"x").is_err());
        assert!(listing(store.root()).is_empty());
        assert_eq!(store.files(), 0);
    }
}
