//! RGBA8 conversion of a [`Raster`].
//!
//! Always available, so the PNG path and any `ImageData` consumer share one
//! conversion.

use crate::Raster;

/// Packs the raster as `width * height * 4` bytes, alpha always 255.
pub fn raster_to_rgba(raster: &Raster) -> Vec<u8> {
    raster
        .pixels()
        .iter()
        .flat_map(|px| {
            let [r, g, b] = px.to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}
