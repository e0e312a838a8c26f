// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given an image, calculate the dual-gradient energy of every pixel:
//! the length of the RGB difference vector across the pixel, taken
//! along both axes at once.  On the edges the sample pair slides
//! inward rather than wrapping or repeating the edge pixel.

use crate::error::CarveError;
use crate::pixelbuffer::{Color, PixelBuffer};
use crate::twodmap::{GridView, TwoDimensionalMap};

/// The energy of every pixel in a buffer, and the largest of them.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyGrid {
    energy: TwoDimensionalMap<f64>,
    max_energy: f64,
}

impl EnergyGrid {
    /// Wrap a precomputed map of energies.  Energies are expected to
    /// be non-negative; the seam finder does not check.
    pub fn from_map(energy: TwoDimensionalMap<f64>) -> Result<Self, CarveError> {
        let (width, height) = energy.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidDimension { width, height });
        }
        let max_energy = energy.as_slice().iter().cloned().fold(0.0, f64::max);
        Ok(EnergyGrid { energy, max_energy })
    }

    pub fn width(&self) -> u32 {
        self.energy.width()
    }

    pub fn height(&self) -> u32 {
        self.energy.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.energy.dimensions()
    }

    pub fn energy(&self, x: u32, y: u32) -> f64 {
        self.energy[(x, y)]
    }

    /// The largest energy in the grid.  Only meaningful for
    /// normalizing a rendering of the grid.
    pub fn max_energy(&self) -> f64 {
        self.max_energy
    }

    pub fn as_slice(&self) -> &[f64] {
        self.energy.as_slice()
    }
}

impl GridView for EnergyGrid {
    type Item = f64;

    fn width(&self) -> u32 {
        self.energy.width()
    }

    fn height(&self) -> u32 {
        self.energy.height()
    }

    fn get(&self, x: u32, y: u32) -> f64 {
        self.energy[(x, y)]
    }
}

// The two coordinates sampled along one axis, high then low.  Index
// 0 uses itself and the pixel two steps in; the last index does the
// same from the other side.  Everything is clamped into the axis, so
// an axis one pixel wide samples the same pixel twice and contributes
// nothing, and the first-index rule wins when a coordinate is both.
#[inline]
fn sample_pair(coord: u32, extent: u32) -> (u32, u32) {
    let last = extent - 1;
    if coord == 0 {
        (last.min(2), 0)
    } else if coord == last {
        (last.saturating_sub(2), last)
    } else {
        (coord + 1, coord - 1)
    }
}

// Takes the channels (R,G,B) from two pixels and maps the difference
// between each channel, squares it, and sums them up:
//
//        |Δ|² = (Δr)²+(Δg)²+(Δb)²
//
// The energy of a pixel is then sqrt(|Δx|² + |Δy|²).
#[inline]
fn energy_of_pair(p1: Color, p2: Color) -> u32 {
    p1.iter()
        .zip(p2.iter())
        .map(|(&c1, &c2)| {
            let d = i32::from(c1) - i32::from(c2);
            (d * d) as u32
        })
        .sum()
}

fn energy_of_pixel(image: &PixelBuffer, x: u32, y: u32) -> f64 {
    let (width, height) = image.dimensions();
    let (right, left) = sample_pair(x, width);
    let (down, up) = sample_pair(y, height);
    let dx = energy_of_pair(image.pixel(right, y), image.pixel(left, y));
    let dy = energy_of_pair(image.pixel(x, down), image.pixel(x, up));
    f64::from(dx + dy).sqrt()
}

/// Compute the energy of every pixel in an image.
#[cfg(not(feature = "threaded"))]
pub fn calculate_energy(image: &PixelBuffer) -> EnergyGrid {
    let (width, height) = image.dimensions();
    let energy = TwoDimensionalMap::from_fn(width, height, |x, y| energy_of_pixel(image, x, y));
    let max_energy = energy.as_slice().iter().cloned().fold(0.0, f64::max);
    EnergyGrid { energy, max_energy }
}

/// Compute the energy of every pixel in an image.  The rows are cut
/// into one contiguous block per CPU, and each block is filled on its
/// own thread; every cell reads only the unmodified source image.
#[cfg(feature = "threaded")]
pub fn calculate_energy(image: &PixelBuffer) -> EnergyGrid {
    let (width, height) = image.dimensions();
    let mut energy = TwoDimensionalMap::new(width, height);
    let rows_per_block = (height as usize + num_cpus::get() - 1) / num_cpus::get();
    let block_len = rows_per_block.max(1) * width as usize;

    let filled = crossbeam::scope(|scope| {
        for (block, cells) in energy.as_mut_slice().chunks_mut(block_len).enumerate() {
            scope.spawn(move |_| {
                let first = block * block_len;
                for (offset, cell) in cells.iter_mut().enumerate() {
                    let index = first + offset;
                    let (x, y) = (index % width as usize, index / width as usize);
                    *cell = energy_of_pixel(image, x as u32, y as u32);
                }
            });
        }
    });
    if let Err(panic) = filled {
        std::panic::resume_unwind(panic);
    }

    let max_energy = energy.as_slice().iter().cloned().fold(0.0, f64::max);
    EnergyGrid { energy, max_energy }
}
