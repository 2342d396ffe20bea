//! RGB pixel buffer the render stages draw into.

use image::{Rgb, RgbImage};

/// Horizontal placement of a panel within the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub x_offset: u32,
    pub width: u32,
    pub height: u32,
}

/// Side-by-side canvas: the left panel holds the top-down height preview,
/// the right panel the rendered landscape.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    panel_width: u32,
}

impl Canvas {
    /// Creates a black canvas two panels wide.
    ///
    /// # Panics
    /// If the doubled width overflows `u32`. Use [`Canvas::try_new`] for
    /// unvalidated sizes.
    pub fn new(panel_width: u32, panel_height: u32) -> Self {
        match Self::try_new(panel_width, panel_height) {
            Some(canvas) => canvas,
            None => panic!("canvas width {} * 2 overflows u32", panel_width),
        }
    }

    /// Creates a black canvas two panels wide, or `None` if the doubled
    /// width overflows `u32`.
    pub fn try_new(panel_width: u32, panel_height: u32) -> Option<Self> {
        let width = panel_width.checked_mul(2)?;
        Some(Self {
            image: RgbImage::new(width, panel_height),
            panel_width,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn left_panel(&self) -> Panel {
        Panel {
            x_offset: 0,
            width: self.panel_width,
            height: self.height(),
        }
    }

    pub fn right_panel(&self) -> Panel {
        Panel {
            x_offset: self.panel_width,
            width: self.panel_width,
            height: self.height(),
        }
    }

    /// Writes one pixel; coordinates outside the canvas are ignored.
    pub fn put(&mut self, x: u32, y: u32, color: Rgb<u8>) {
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
