pub mod path;

pub use path::PathSource;

use image::DynamicImage;

use crate::models::{AssetRef, BoundingSize};

/// Collaborator that resolves media assets into raster previews.
///
/// Implementations render aspect-fit within `max_size`; neither dimension
/// of the answer may exceed the bound. A render that fails answers `None`
/// and must not panic into the pipeline. Calls may arrive concurrently for
/// different assets of one run.
pub trait AssetSource: Send + Sync {
    fn render_snapshot(&self, asset: &AssetRef, max_size: BoundingSize) -> Option<DynamicImage>;
}
