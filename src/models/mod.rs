pub mod artifact;
pub mod asset;
pub mod transform;

pub use artifact::{ArtifactKind, LocalArtifact, RemoteHandle};
pub use asset::{AssetRef, BoundingSize};
pub use transform::{TransformOp, TransformSpec};
