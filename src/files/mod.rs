//! File metadata as seen by the routing core.
//!
//! # Responsibilities
//! - Build descriptors from live filesystem metadata
//! - Resolve request paths below a user's scope
//! - Compute file checksums for the `checksum` area

use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{GatewayError, GatewayResult};

/// Metadata of a single file or directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub name: String,
    pub mod_time: DateTime<Utc>,
    /// Unix permission bits; 0 where the platform has none.
    pub mode: u32,
    pub is_dir: bool,
    pub size: u64,
}

impl FileDescriptor {
    /// Stat `path` and describe it.
    pub async fn stat(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let path = path.as_ref();
        let meta = tokio::fs::metadata(path).await?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let mod_time = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH);

        Ok(Self {
            path: path.to_path_buf(),
            name,
            mod_time,
            mode: mode_bits(&meta),
            is_dir: meta.is_dir(),
            size: meta.len(),
        })
    }

    /// Hex digest of the file contents.
    ///
    /// Supported algorithms: `md5`, `sha1`, `sha256`, `sha512`.
    pub async fn checksum(&self, algo: &str) -> GatewayResult<String> {
        let path = self.path.clone();
        let algo = algo.to_string();

        tokio::task::spawn_blocking(move || match algo.as_str() {
            "md5" => hash_file::<Md5>(&path),
            "sha1" => hash_file::<Sha1>(&path),
            "sha256" => hash_file::<Sha256>(&path),
            "sha512" => hash_file::<Sha512>(&path),
            _ => Err(GatewayError::InvalidOption(format!("checksum algorithm `{}`", algo))),
        })
        .await
        .map_err(|e| GatewayError::Io(io::Error::other(e)))?
    }
}

fn hash_file<D: Digest + io::Write>(path: &Path) -> GatewayResult<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = D::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(unix)]
fn mode_bits(meta: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode()
}

#[cfg(not(unix))]
fn mode_bits(_meta: &std::fs::Metadata) -> u32 {
    0
}

/// Canonical form of a request path, as authorization rules see it.
///
/// Repeated separators collapse and `.` segments drop; a trailing `/` is
/// kept. Any `..` segment yields `None`.
///
/// ```
/// use filegate::files::clean_path;
///
/// assert_eq!(clean_path("//private/./x"), Some("/private/x".to_string()));
/// assert_eq!(clean_path("/docs/"), Some("/docs/".to_string()));
/// assert_eq!(clean_path("/a/../b"), None);
/// ```
pub fn clean_path(path: &str) -> Option<String> {
    if path.is_empty() {
        return Some(String::new());
    }

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s => segments.push(s),
        }
    }

    let mut cleaned = format!("/{}", segments.join("/"));
    let trailing = path.ends_with('/') || path.ends_with("/.");
    if trailing && !segments.is_empty() {
        cleaned.push('/');
    }
    Some(cleaned)
}

/// Join a request path below `scope`.
///
/// Root and current-dir components are dropped; any `..` is refused with a
/// permission error so the result can never leave the scope.
pub fn resolve(scope: &Path, request_path: &str) -> GatewayResult<PathBuf> {
    let mut resolved = scope.to_path_buf();

    for component in Path::new(request_path).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) => {
                return Err(GatewayError::Io(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "path escapes scope",
                )));
            }
        }
    }

    Ok(resolved)
}

/// Describe the file a request path points at inside `scope`.
pub async fn get_info(scope: &Path, request_path: &str) -> GatewayResult<FileDescriptor> {
    let path = resolve(scope, request_path)?;
    FileDescriptor::stat(path).await
}
