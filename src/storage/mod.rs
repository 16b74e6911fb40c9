//! Contains the service provider interface for storage back-ends (called
//! *drivers*) along with a ready to use local filesystem implementation.
//!
//! Every control-stream dialog gets its own driver instance from a
//! [`DriverFactory`], so drivers never have to synchronise per-dialog state.

pub(crate) mod driver;
mod error;
mod filesystem;

pub use driver::{BoxReader, Driver, DriverFactory};
pub use error::{Error, ErrorKind};
pub use filesystem::{Filesystem, FilesystemFactory};

use chrono::prelude::{DateTime, Utc};
use std::{
    fmt::{self, Formatter, Write},
    result,
    time::SystemTime,
};

/// Result type used by the traits in this module.
pub type Result<T> = result::Result<T, Error>;

/// Represents the metadata of a file or directory as seen by a driver.
pub trait Metadata: fmt::Debug {
    /// Returns the length (size) of the file in bytes.
    fn len(&self) -> u64;

    /// Returns `self.len() == 0`.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the path is a directory.
    fn is_dir(&self) -> bool;

    /// Returns true if the path is a file.
    fn is_file(&self) -> bool;

    /// Returns true if the path is a symbolic link.
    fn is_symlink(&self) -> bool;

    /// Returns the last modified time of the path.
    fn modified(&self) -> Result<SystemTime>;

    /// Returns the `gid` of the file.
    fn gid(&self) -> u32;

    /// Returns the `uid` of the file.
    fn uid(&self) -> u32;

    /// Returns the number of links to the file. The default implementation
    /// always returns `1`.
    fn links(&self) -> u64 {
        1
    }

    /// Returns the `permissions` of the file. The default implementation
    /// assumes unix permissions and defaults to "rwxr-xr-x" (octal 0755).
    fn permissions(&self) -> Permissions {
        Permissions(0o755)
    }
}

/// Metadata as handed across the driver object boundary.
pub type BoxMetadata = Box<dyn Metadata + Send + Sync>;

/// Represents the permission bits of a file.
pub struct Permissions(pub u32);

const PERM_READ: u32 = 0b100100100;
const PERM_WRITE: u32 = 0b010010010;
const PERM_EXEC: u32 = 0b001001001;
const PERM_USER: u32 = 0b111000000;
const PERM_GROUP: u32 = 0b000111000;
const PERM_OTHERS: u32 = 0b000000111;

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(if self.0 & PERM_USER & PERM_READ > 0 { 'r' } else { '-' })?;
        f.write_char(if self.0 & PERM_USER & PERM_WRITE > 0 { 'w' } else { '-' })?;
        f.write_char(if self.0 & PERM_USER & PERM_EXEC > 0 { 'x' } else { '-' })?;
        f.write_char(if self.0 & PERM_GROUP & PERM_READ > 0 { 'r' } else { '-' })?;
        f.write_char(if self.0 & PERM_GROUP & PERM_WRITE > 0 { 'w' } else { '-' })?;
        f.write_char(if self.0 & PERM_GROUP & PERM_EXEC > 0 { 'x' } else { '-' })?;
        f.write_char(if self.0 & PERM_OTHERS & PERM_READ > 0 { 'r' } else { '-' })?;
        f.write_char(if self.0 & PERM_OTHERS & PERM_WRITE > 0 { 'w' } else { '-' })?;
        f.write_char(if self.0 & PERM_OTHERS & PERM_EXEC > 0 { 'x' } else { '-' })?;
        Ok(())
    }
}

/// Fileinfo pairs the name of a directory entry with its [`Metadata`].
///
/// Its `Display` implementation renders the entry the way `ls -l` would,
/// which is the "detailed" form used by the LIST command. NLST uses the bare
/// [`Fileinfo::name`] instead.
pub struct Fileinfo {
    /// The path of the entry, relative to the listed directory.
    pub path: String,
    /// The entry's metadata.
    pub metadata: BoxMetadata,
}

impl Fileinfo {
    /// The last path component, i.e. the bare entry name.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for Fileinfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let modified: String = self
            .metadata
            .modified()
            .map(|x| DateTime::<Utc>::from(x).format("%b %d %H:%M").to_string())
            .unwrap_or_else(|_| "--- -- --:--".to_string());
        write!(
            f,
            "{filetype}{permissions} {links:>12} {owner:>12} {group:>12} {size:>14} {modified:>12} {path}",
            filetype = if self.metadata.is_dir() {
                "d"
            } else if self.metadata.is_symlink() {
                "l"
            } else {
                "-"
            },
            permissions = self.metadata.permissions(),
            links = self.metadata.links(),
            owner = self.metadata.uid(),
            group = self.metadata.gid(),
            size = self.metadata.len(),
            modified = modified,
            path = self.name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct MockMetadata;

    impl Metadata for MockMetadata {
        fn len(&self) -> u64 {
            5
        }
        fn is_dir(&self) -> bool {
            false
        }
        fn is_file(&self) -> bool {
            true
        }
        fn is_symlink(&self) -> bool {
            false
        }
        fn modified(&self) -> Result<SystemTime> {
            Ok(SystemTime::UNIX_EPOCH)
        }
        fn uid(&self) -> u32 {
            0
        }
        fn gid(&self) -> u32 {
            0
        }
    }

    #[test]
    fn fileinfo_detailed_fmt() {
        let fileinfo = Fileinfo {
            path: "docs/hello.txt".to_string(),
            metadata: Box::new(MockMetadata),
        };
        let formatted = format!("{}", fileinfo);
        assert_eq!(
            formatted,
            "-rwxr-xr-x            1            0            0              5 Jan 01 00:00 hello.txt"
        );
    }

    #[test]
    fn fileinfo_name_is_last_component() {
        let fileinfo = Fileinfo {
            path: "a/b/c.txt".to_string(),
            metadata: Box::new(MockMetadata),
        };
        assert_eq!(fileinfo.name(), "c.txt");

        let plain = Fileinfo {
            path: "c.txt".to_string(),
            metadata: Box::new(MockMetadata),
        };
        assert_eq!(plain.name(), "c.txt");
    }

    #[test]
    fn permissions_fmt() {
        assert_eq!(format!("{}", Permissions(0o755)), "rwxr-xr-x");
        assert_eq!(format!("{}", Permissions(0o640)), "rw-r-----");
        assert_eq!(format!("{}", Permissions(0)), "---------");
    }
}
