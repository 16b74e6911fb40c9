//! A [`Driver`] that serves a directory of the local filesystem, like a
//! traditional FTP server.

use super::{BoxMetadata, Driver, DriverFactory, Error, ErrorKind, Fileinfo, Metadata, Permissions, Result};
use crate::storage::driver::BoxReader;
use async_trait::async_trait;
use std::{path::PathBuf, time::SystemTime};
use tokio::io::{AsyncRead, AsyncSeekExt};

/// The `Filesystem` driver keeps all of its files inside a specific root
/// directory on local disk. When the root is set to `/srv/ftp` and a client
/// asks for `/hello.txt`, the server will send it `/srv/ftp/hello.txt`.
///
/// The control channel guarantees that the virtual paths it passes in are
/// absolute and free of `..` components, so joining them under the root
/// cannot escape it.
#[derive(Debug)]
pub struct Filesystem {
    root: PathBuf,
}

impl Filesystem {
    /// Create a new `Filesystem` driver with the given root.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Filesystem { root: root.into() }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Driver for Filesystem {
    async fn change_dir(&self, path: &str) -> Result<()> {
        // Reading the directory both checks existence and access rights.
        tokio::fs::read_dir(self.full_path(path)).await?;
        Ok(())
    }

    async fn stat(&self, path: &str) -> Result<Option<BoxMetadata>> {
        let meta = tokio::fs::symlink_metadata(self.full_path(path)).await?;
        Ok(Some(Box::new(meta)))
    }

    async fn list_dir(&self, path: &str) -> Result<Vec<Fileinfo>> {
        let mut rd = tokio::fs::read_dir(self.full_path(path)).await?;

        let mut fis: Vec<Fileinfo> = vec![];
        while let Some(dir_entry) = rd.next_entry().await? {
            let name = dir_entry.file_name().to_string_lossy().to_string();
            let meta = tokio::fs::symlink_metadata(dir_entry.path()).await?;
            fis.push(Fileinfo {
                path: name,
                metadata: Box::new(meta),
            });
        }

        Ok(fis)
    }

    async fn delete_dir(&self, path: &str) -> Result<()> {
        tokio::fs::remove_dir(self.full_path(path)).await?;
        Ok(())
    }

    async fn delete_file(&self, path: &str) -> Result<()> {
        tokio::fs::remove_file(self.full_path(path)).await?;
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        tokio::fs::rename(self.full_path(from), self.full_path(to)).await?;
        Ok(())
    }

    async fn make_dir(&self, path: &str) -> Result<()> {
        tokio::fs::create_dir(self.full_path(path)).await?;
        Ok(())
    }

    async fn get_file(&self, path: &str, start_pos: i64) -> Result<(i64, BoxReader)> {
        let start_pos = u64::try_from(start_pos).map_err(|_| Error::from(ErrorKind::LocalError))?;
        let full_path = self.full_path(path);

        let mut file = tokio::fs::File::open(full_path).await?;
        let len = file.metadata().await?.len();
        if start_pos > 0 {
            file.seek(std::io::SeekFrom::Start(start_pos)).await?;
        }
        let remaining = len.saturating_sub(start_pos) as i64;

        Ok((remaining, Box::new(file)))
    }

    async fn put_file(&self, path: &str, reader: &mut (dyn AsyncRead + Send + Unpin), append: bool) -> Result<i64> {
        let full_path = self.full_path(path);

        let mut open_options = tokio::fs::OpenOptions::new();
        if append {
            open_options.append(true).create(true);
        } else {
            open_options.write(true).create(true).truncate(true);
        }
        let mut file = open_options.open(full_path).await?;

        let bytes_copied = tokio::io::copy(reader, &mut file).await?;
        Ok(bytes_copied as i64)
    }
}

/// A [`DriverFactory`] that hands every dialog a [`Filesystem`] driver over
/// the same root directory.
#[derive(Debug)]
pub struct FilesystemFactory {
    root: PathBuf,
}

impl FilesystemFactory {
    /// Creates a new factory for the given root.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        FilesystemFactory { root: root.into() }
    }
}

impl DriverFactory for FilesystemFactory {
    fn new_driver(&self) -> Result<Box<dyn Driver>> {
        if !self.root.is_dir() {
            return Err(Error::from(ErrorKind::PermanentFileNotAvailable));
        }
        Ok(Box::new(Filesystem::new(&self.root)))
    }
}

impl Metadata for std::fs::Metadata {
    fn len(&self) -> u64 {
        self.len()
    }

    fn is_dir(&self) -> bool {
        self.is_dir()
    }

    fn is_file(&self) -> bool {
        self.is_file()
    }

    fn is_symlink(&self) -> bool {
        self.file_type().is_symlink()
    }

    fn modified(&self) -> Result<SystemTime> {
        self.modified().map_err(|_| Error::from(ErrorKind::PermanentFileNotAvailable))
    }

    #[cfg(unix)]
    fn gid(&self) -> u32 {
        use std::os::unix::fs::MetadataExt;
        MetadataExt::gid(self)
    }

    #[cfg(not(unix))]
    fn gid(&self) -> u32 {
        0
    }

    #[cfg(unix)]
    fn uid(&self) -> u32 {
        use std::os::unix::fs::MetadataExt;
        MetadataExt::uid(self)
    }

    #[cfg(not(unix))]
    fn uid(&self) -> u32 {
        0
    }

    #[cfg(unix)]
    fn permissions(&self) -> Permissions {
        use std::os::unix::fs::MetadataExt;
        Permissions(MetadataExt::mode(self) & 0o777)
    }

    #[cfg(not(unix))]
    fn permissions(&self) -> Permissions {
        Permissions(0o755)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[tokio::test]
    async fn fs_stat() {
        let root = tempfile::tempdir().unwrap();
        let file = tempfile::NamedTempFile::new_in(root.path()).unwrap();
        let meta = file.as_file().metadata().unwrap();
        let filename = file.path().file_name().unwrap().to_str().unwrap().to_string();

        let fs = Filesystem::new(root.path());
        let my_meta = fs.stat(&format!("/{}", filename)).await.unwrap().unwrap();

        assert_eq!(meta.is_dir(), my_meta.is_dir());
        assert_eq!(meta.is_file(), my_meta.is_file());
        assert_eq!(meta.len(), my_meta.len());
    }

    #[tokio::test]
    async fn fs_stat_missing_file_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let fs = Filesystem::new(root.path());
        let err = fs.stat("/no-such-file").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermanentFileNotAvailable);
    }

    #[tokio::test]
    async fn fs_list() {
        let root = tempfile::tempdir().unwrap();
        let file = tempfile::NamedTempFile::new_in(root.path()).unwrap();
        let filename = file.path().file_name().unwrap().to_str().unwrap().to_string();

        let fs = Filesystem::new(root.path());
        let list = fs.list_dir("/").await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].path, filename);
        assert!(list[0].metadata.is_file());
    }

    #[tokio::test]
    async fn fs_get_with_offset() {
        let root = tempfile::tempdir().unwrap();
        let mut file = tempfile::NamedTempFile::new_in(root.path()).unwrap();
        file.write_all(b"0123456789").unwrap();
        let filename = file.path().file_name().unwrap().to_str().unwrap().to_string();

        let fs = Filesystem::new(root.path());
        let (remaining, mut reader) = fs.get_file(&format!("/{}", filename), 4).await.unwrap();
        assert_eq!(remaining, 6);

        let mut content = Vec::new();
        tokio::io::copy(&mut reader, &mut content).await.unwrap();
        assert_eq!(content, b"456789");
    }

    #[tokio::test]
    async fn fs_get_rejects_negative_offset() {
        let root = tempfile::tempdir().unwrap();
        let fs = Filesystem::new(root.path());
        assert!(fs.get_file("/whatever", -1).await.is_err());
    }

    #[tokio::test]
    async fn fs_put_and_append() {
        let root = tempfile::tempdir().unwrap();
        let fs = Filesystem::new(root.path());

        let written = fs.put_file("/greeting.txt", &mut &b"hallo"[..], false).await.unwrap();
        assert_eq!(written, 5);
        assert_eq!(std::fs::read(root.path().join("greeting.txt")).unwrap(), b"hallo");

        fs.put_file("/greeting.txt", &mut &b" again"[..], true).await.unwrap();
        assert_eq!(std::fs::read(root.path().join("greeting.txt")).unwrap(), b"hallo again");

        // A second non-append put replaces the content.
        fs.put_file("/greeting.txt", &mut &b"bye"[..], false).await.unwrap();
        assert_eq!(std::fs::read(root.path().join("greeting.txt")).unwrap(), b"bye");
    }

    #[tokio::test]
    async fn fs_mkd_rename_delete() {
        let root = tempfile::tempdir().unwrap();
        let fs = Filesystem::new(root.path());

        fs.make_dir("/bla").await.unwrap();
        assert!(root.path().join("bla").is_dir());

        fs.put_file("/bla/a.txt", &mut &b"x"[..], false).await.unwrap();
        fs.rename("/bla/a.txt", "/bla/b.txt").await.unwrap();
        assert!(!root.path().join("bla/a.txt").exists());
        assert!(root.path().join("bla/b.txt").is_file());

        fs.delete_file("/bla/b.txt").await.unwrap();
        fs.delete_dir("/bla").await.unwrap();
        assert!(!root.path().join("bla").exists());
    }

    #[tokio::test]
    async fn fs_change_dir() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("docs")).unwrap();
        std::fs::write(root.path().join("plain.txt"), b"x").unwrap();

        let fs = Filesystem::new(root.path());
        assert!(fs.change_dir("/docs").await.is_ok());
        assert!(fs.change_dir("/missing").await.is_err());
        assert!(fs.change_dir("/plain.txt").await.is_err());
    }

    #[test]
    fn factory_requires_existing_root() {
        let root = tempfile::tempdir().unwrap();
        let factory = FilesystemFactory::new(root.path());
        assert!(factory.new_driver().is_ok());

        let missing = FilesystemFactory::new(root.path().join("gone"));
        assert!(missing.new_driver().is_err());
    }
}
