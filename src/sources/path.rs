use image::DynamicImage;
use log::warn;

use super::AssetSource;
use crate::models::{AssetRef, BoundingSize};

/// Asset source backed by image files on disk: each [`AssetRef`] is the path
/// of a decodable image.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSource;

impl PathSource {
    pub fn new() -> Self {
        Self
    }
}

impl AssetSource for PathSource {
    fn render_snapshot(&self, asset: &AssetRef, max_size: BoundingSize) -> Option<DynamicImage> {
        let image = match image::open(asset.as_str()) {
            Ok(image) => image,
            Err(err) => {
                warn!("Failed to decode {}: {err}", asset);
                return None;
            }
        };

        if image.width() <= max_size.width && image.height() <= max_size.height {
            return Some(image);
        }
        Some(image.thumbnail(max_size.width, max_size.height))
    }
}
