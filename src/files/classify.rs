use std::io::{self, SeekFrom};
use std::path::PathBuf;

use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::error::RequestError;
use crate::http::mime::mime_type;

/// Outcome of probing a resolved path on the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    RegularFile,
    Directory,
    Missing,
    PermissionDenied,
    OtherError,
}

/// A resolved path together with what the filesystem said about it.
///
/// For `RegularFile` the file is already open, so the entity is read from
/// the same handle that was classified.
#[derive(Debug)]
pub struct ResolvedResource {
    pub path: PathBuf,
    pub kind: ResourceKind,
    pub mime_type: Option<String>,
    file: Option<File>,
}

/// Probes `path` with a type check followed by a read-only open.
///
/// The two probes are separate syscalls, so the file may change between
/// them (or before it is read). Directories are never opened.
pub async fn classify(path: PathBuf) -> ResolvedResource {
    if let Ok(meta) = fs::metadata(&path).await {
        if meta.is_dir() {
            return ResolvedResource::unopened(path, ResourceKind::Directory);
        }
    }

    match File::open(&path).await {
        Ok(file) => {
            let mime = mime_type(&path);
            ResolvedResource {
                path,
                kind: ResourceKind::RegularFile,
                mime_type: Some(mime),
                file: Some(file),
            }
        }
        Err(e) => {
            let kind = match e.kind() {
                io::ErrorKind::NotFound => ResourceKind::Missing,
                io::ErrorKind::PermissionDenied => ResourceKind::PermissionDenied,
                _ => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to open resource");
                    ResourceKind::OtherError
                }
            };
            ResolvedResource::unopened(path, kind)
        }
    }
}

impl ResolvedResource {
    fn unopened(path: PathBuf, kind: ResourceKind) -> Self {
        Self {
            path,
            kind,
            mime_type: None,
            file: None,
        }
    }

    /// The request error this classification answers with, if any.
    pub fn error(&self) -> Option<RequestError> {
        match self.kind {
            ResourceKind::RegularFile => None,
            ResourceKind::Directory | ResourceKind::PermissionDenied => {
                Some(RequestError::ResourceForbidden)
            }
            ResourceKind::Missing => Some(RequestError::ResourceMissing),
            ResourceKind::OtherError => Some(RequestError::ResourceServerError),
        }
    }

    /// Size of the open file, found by seeking to the end and rewinding.
    pub async fn entity_size(&mut self) -> io::Result<u64> {
        let file = self.open_file()?;
        let size = file.seek(SeekFrom::End(0)).await?;
        file.seek(SeekFrom::Start(0)).await?;
        Ok(size)
    }

    /// Reads the whole file into memory.
    pub async fn read_entity(&mut self) -> io::Result<Vec<u8>> {
        let size = self.entity_size().await?;
        let file = self.open_file()?;

        let mut entity = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
        file.read_to_end(&mut entity).await?;
        Ok(entity)
    }

    fn open_file(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("resource is not an open file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_and_directory_are_forbidden() {
        for kind in [ResourceKind::PermissionDenied, ResourceKind::Directory] {
            let resource = ResolvedResource::unopened(PathBuf::from("/srv/www/x"), kind);
            assert_eq!(resource.error(), Some(RequestError::ResourceForbidden));
        }
    }
}
