use std::io;
use std::path::PathBuf;

/// Provider-level failure for a single flags read or write.
///
/// Variants keep the path so the interaction layer can build a usable
/// message without extra bookkeeping.
#[derive(Debug, thiserror::Error)]
pub enum AttrError {
    /// The file is gone. During a batch this means it vanished after being
    /// marked and the entry is skipped silently.
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    /// The filesystem does not implement the flag ioctls. As a probe result
    /// this is the fatal precondition that stops the whole command.
    #[error("attributes not supported on {path}")]
    Unsupported { path: PathBuf },

    /// Any other OS error, with the underlying errno for display.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AttrError {
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => AttrError::NotFound { path },
            io::ErrorKind::Unsupported => AttrError::Unsupported { path },
            _ => AttrError::Io { path, source },
        }
    }

    /// Whether this error means the file no longer exists.
    pub fn is_missing(&self) -> bool {
        match self {
            AttrError::NotFound { .. } => true,
            AttrError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            AttrError::Unsupported { .. } => false,
        }
    }
}

/// Fatal session failures. Everything else is handled file-locally inside
/// the batch and never propagates this far.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The target filesystem failed the support probe; no file was touched.
    #[error("cannot change attributes on this filesystem: {source}")]
    Precondition {
        #[source]
        source: AttrError,
    },

    /// The flags of the file about to be displayed could not be read.
    #[error("cannot get flags of {path}: {source}")]
    ReadFlags {
        path: PathBuf,
        #[source]
        source: AttrError,
    },
}
