//! Advisory marker-file lock guarding the refresh job.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

/// A non-reentrant host-wide lock backed by a marker file.
///
/// There is no TTL and no retry: a holder that crashes before releasing
/// leaves the marker behind, and the marker must then be removed by hand
/// before another refresh can run.
#[derive(Debug)]
pub struct UpdateLock {
    path: PathBuf,
}

impl UpdateLock {
    /// Attempts to claim the lock at `path`.
    ///
    /// `create_new` is the atomic create-if-absent primitive; `Ok(None)`
    /// means another holder already owns the marker.
    pub fn acquire(path: &Path) -> io::Result<Option<UpdateLock>> {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(Some(UpdateLock {
                path: path.to_path_buf(),
            })),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Releases the lock by deleting the marker. Idempotent when the marker
    /// is already absent.
    pub fn release(self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}
