/// Owned raster with tolerant edge access.
pub mod pixel;
