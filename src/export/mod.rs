//! Export module for saving rendered images and height grids.
//!
//! Supports 8-bit RGB PNG for the rendered canvas and 16-bit grayscale PNG
//! for raw height data.

mod png;

pub use png::{
    export_canvas_png,
    export_height_grid_png,
    value_range,
    PngExportError,
    PngExportOptions,
};
