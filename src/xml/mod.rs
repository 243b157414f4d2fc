//! # XML persistence
//!
//! Saves the collection to the fixed `<workers>` schema and loads it back.
//!
//! - **`writer`**: collection → document
//! - **`reader`**: document → workers, skipping malformed `<worker>` elements
//!
//! Saving goes through a temporary file in the target directory that is renamed over the
//! destination, so a failed save never leaves a truncated file behind. A replaced file keeps
//! its permissions.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::errors::CodecError;
use crate::store::WorkerStore;

pub mod reader;
pub mod writer;

pub use reader::{decode, Decoded, Skipped};
pub use writer::encode;

/// Element names of the persisted schema.
pub mod tags {
    pub const ROOT: &str = "workers";
    pub const WORKER: &str = "worker";
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const COORDINATES: &str = "coordinates";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const CREATION_DATE: &str = "creationDate";
    pub const SALARY: &str = "salary";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const POSITION: &str = "position";
    pub const PERSON: &str = "person";
    pub const BIRTHDAY: &str = "birthday";
    pub const EYE_COLOR: &str = "eyeColor";
    pub const HAIR_COLOR: &str = "hairColor";
    pub const NATIONALITY: &str = "nationality";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The collection was empty; no file was touched.
    NothingToSave,
    Written { count: usize },
}

/// Writes `store` to `path`. An empty store is a no-op.
pub fn save(path: &Path, store: &WorkerStore) -> Result<SaveOutcome, CodecError> {
    if store.is_empty() {
        return Ok(SaveOutcome::NothingToSave);
    }
    let document = encode(store.iter())?;
    replace_file(path, document.as_bytes()).map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), count = store.len(), "collection saved");
    Ok(SaveOutcome::Written { count: store.len() })
}

/// Reads and decodes `path`. The caller decides what to do with skipped elements.
pub fn load(path: &Path) -> Result<Decoded, CodecError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CodecError::Missing {
            path: path.to_path_buf(),
        },
        _ => CodecError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let decoded = decode(&path.display().to_string(), &text)?;
    for skipped in &decoded.skipped {
        tracing::warn!(
            path = %path.display(),
            element = skipped.index,
            reason = %skipped.error,
            "worker element skipped"
        );
    }
    tracing::info!(
        path = %path.display(),
        loaded = decoded.workers.len(),
        skipped = decoded.skipped.len(),
        "collection loaded"
    );
    Ok(decoded)
}

fn replace_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    if let Ok(existing) = fs::metadata(path) {
        staged.as_file().set_permissions(existing.permissions())?;
    }
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::worker;

    #[test]
    fn empty_store_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workers.xml");
        let outcome = save(&path, &WorkerStore::new()).unwrap();
        assert_eq!(outcome, SaveOutcome::NothingToSave);
        assert!(!path.exists());
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workers.xml");
        fs::write(&path, "old contents").unwrap();

        let store: WorkerStore = [worker(1, "Ann", None)].into_iter().collect();
        assert_eq!(save(&path, &store).unwrap(), SaveOutcome::Written { count: 1 });

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<name>Ann</name>"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_the_permissions_of_the_replaced_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workers.xml");
        fs::write(&path, "old contents").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store: WorkerStore = [worker(1, "Ann", None)].into_iter().collect();
        save(&path, &store).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn failed_save_leaves_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing-dir").join("workers.xml");
        let store: WorkerStore = [worker(1, "Ann", None)].into_iter().collect();
        let err = save(&target, &store).unwrap_err();
        assert!(matches!(err, CodecError::Write { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, CodecError::Missing { .. }));
    }

    #[test]
    fn load_reads_back_what_save_wrote() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workers.xml");
        let store: WorkerStore = [worker(3, "Ann", None), worker(9, "Bob", None)]
            .into_iter()
            .collect();
        save(&path, &store).unwrap();

        let decoded = load(&path).unwrap();
        let original: Vec<_> = store.iter().cloned().collect();
        assert_eq!(decoded.workers, original);
    }
}
