//! PNG output of a [`Raster`].
//!
//! Behind the `png` feature (default on) so WASM builds never pull in the
//! `image` crate.

use crate::pixel::raster_to_rgba;
use crate::Raster;
use liquid_lab_core::error::LabError;
use std::path::Path;

/// Writes the raster's current contents as a PNG.
///
/// Returns `LabError::InvalidDimensions` if a side overflows `u32`, or
/// `LabError::Io` on encode or write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), LabError> {
    let w = u32::try_from(raster.width()).map_err(|_| LabError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| LabError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster_to_rgba(raster))
        .ok_or_else(|| LabError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| LabError::Io(e.to_string()))
}
