// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel buffer
//!
//! A dense RGB grid, eight bits per channel.  Carving never shrinks a
//! buffer in place; every step builds a new one.

use crate::error::CarveError;
use crate::twodmap::TwoDimensionalMap;
use image::{Rgb, RgbImage};

/// One pixel: red, green, blue.
pub type Color = [u8; 3];

/// A pixel address.  `x` is the column, `y` the row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Point { x, y }
    }

    /// The same pixel seen with the axes swapped.
    pub fn flip(self) -> Self {
        Point {
            x: self.y,
            y: self.x,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: TwoDimensionalMap<Color>,
}

impl PixelBuffer {
    /// Wrap a map of pixels.  Both extents must be at least one.
    pub fn from_map(pixels: TwoDimensionalMap<Color>) -> Result<Self, CarveError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidDimension { width, height });
        }
        Ok(PixelBuffer { pixels })
    }

    /// A buffer of the given extent, every pixel `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, CarveError> {
        let cells = vec![color; width as usize * height as usize];
        PixelBuffer::from_map(TwoDimensionalMap::from_vec(width, height, cells)?)
    }

    /// Build from packed RGB samples, row-major, three bytes a pixel.
    pub fn from_raw(width: u32, height: u32, samples: &[u8]) -> Result<Self, CarveError> {
        let expected = width as usize * height as usize * 3;
        if samples.len() != expected {
            return Err(CarveError::DegenerateBuffer {
                expected,
                actual: samples.len(),
            });
        }
        let cells = samples
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        PixelBuffer::from_map(TwoDimensionalMap::from_vec(width, height, cells)?)
    }

    pub fn from_image(image: &RgbImage) -> Result<Self, CarveError> {
        let (width, height) = image.dimensions();
        PixelBuffer::from_raw(width, height, image.as_raw())
    }

    pub fn to_image(&self) -> RgbImage {
        let (width, height) = self.dimensions();
        RgbImage::from_fn(width, height, |x, y| Rgb(self.pixel(x, y)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(x, y)]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(x, y)] = color;
    }

    pub fn row(&self, y: u32) -> &[Color] {
        self.pixels.row(y)
    }

    /// Packed RGB samples, row-major.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.as_slice().iter().flatten().copied().collect()
    }
}
