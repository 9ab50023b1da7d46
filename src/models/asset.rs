use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for one selectable media item.
///
/// The pipeline never inspects the contents; only the owning
/// [`AssetSource`](crate::sources::AssetSource) knows how to resolve it
/// (a file path, a library identifier, a database key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AssetRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Width and height bound for rendered snapshots.
///
/// Sources render aspect-fit within the bound; neither dimension of a
/// snapshot may exceed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingSize {
    pub width: u32,
    pub height: u32,
}

impl BoundingSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for BoundingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
