use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The two file kinds moving through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// Bounded JPEG snapshot rendered from one media asset.
    Snapshot,
    /// Composited animation downloaded from the transform service.
    Animation,
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Snapshot => "jpg",
            ArtifactKind::Animation => "gif",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ArtifactKind::Snapshot => "image/jpeg",
            ArtifactKind::Animation => "image/gif",
        }
    }
}

/// A file on transient local storage, owned by the run that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalArtifact {
    path: PathBuf,
    kind: ArtifactKind,
}

impl LocalArtifact {
    pub fn new(path: impl Into<PathBuf>, kind: ArtifactKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// File name to present to the media store when uploading.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("artifact.{}", self.kind.extension()))
    }
}

/// Identifier the media store assigns to one uploaded artifact.
///
/// Holding a handle is what allows requesting deletion of the stored file
/// later, and handles are the inputs the transform URL is built over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteHandle(String);

impl RemoteHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
