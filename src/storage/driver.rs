//! Defines the service provider interface for storage back-end implementors.

use super::{BoxMetadata, Fileinfo, Result};
use async_trait::async_trait;
use std::fmt::Debug;
use tokio::io::AsyncRead;

/// The reader handed out by [`Driver::get_file`]. It is uniquely owned by the
/// transfer that requested it and released when that transfer finishes.
pub type BoxReader = Box<dyn AsyncRead + Send + Sync + Unpin>;

/// The `Driver` trait can be implemented to create custom virtual file
/// systems for the server to serve. All paths passed to a driver are
/// absolute, use `/` separators and contain no `..` components; it is still
/// the driver's job to decide what part of the real world, if any, they map
/// to.
///
/// A driver instance belongs to exactly one control-stream dialog, so
/// implementations are free to keep per-dialog state.
#[async_trait]
pub trait Driver: Send + Sync + Debug {
    /// Implement to set the name of the driver. By default it returns the
    /// type signature.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Checks that `path` refers to a directory the dialog may change into.
    async fn change_dir(&self, path: &str) -> Result<()>;

    /// Returns the [`Metadata`](super::Metadata) for the given path, or
    /// `None` if the back-end can express "no such entry" without an error.
    async fn stat(&self, path: &str) -> Result<Option<BoxMetadata>>;

    /// Returns the entries of the directory at `path`.
    async fn list_dir(&self, path: &str) -> Result<Vec<Fileinfo>>;

    /// Removes the directory at `path`.
    async fn delete_dir(&self, path: &str) -> Result<()>;

    /// Removes the file at `path`.
    async fn delete_file(&self, path: &str) -> Result<()>;

    /// Renames `from` to `to`.
    async fn rename(&self, from: &str, to: &str) -> Result<()>;

    /// Creates the directory at `path`.
    async fn make_dir(&self, path: &str) -> Result<()>;

    /// Opens the file at `path` for reading, starting at byte `start_pos`.
    /// Returns the number of bytes the reader will yield along with the
    /// reader itself.
    async fn get_file(&self, path: &str, start_pos: i64) -> Result<(i64, BoxReader)>;

    /// Writes the bytes yielded by `reader` to the file at `path`, appending
    /// when `append` is set and replacing the file otherwise. Returns the
    /// number of bytes written.
    async fn put_file(&self, path: &str, reader: &mut (dyn AsyncRead + Send + Unpin), append: bool) -> Result<i64>;
}

/// Produces one [`Driver`] instance per control-stream dialog.
///
/// The factory is consulted every time a client opens a new control stream,
/// and once more per session as a liveness check before the session is
/// served at all.
pub trait DriverFactory: Send + Sync + Debug {
    /// Creates a fresh driver instance.
    fn new_driver(&self) -> Result<Box<dyn Driver>>;
}
