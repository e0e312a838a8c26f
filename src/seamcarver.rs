// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! The main seamcarver routine, with helpers for the horizontal and
//! vertical operations.  Every seam is removed from a freshly
//! calculated energy grid; nothing is carried from one step to the
//! next except the image itself.

use crate::energy::calculate_energy;
use crate::error::{Axis, CarveError};
use crate::pixelbuffer::PixelBuffer;
use crate::seamfinder::SeamFinder;
use crate::twodmap::TwoDimensionalMap;
use log::{debug, info};

// Every pixel left of the seam stays put; every pixel right of it
// moves one column left.
fn remove_vertical_seam(image: &PixelBuffer, seam: &[u32]) -> Result<PixelBuffer, CarveError> {
    let (width, height) = image.dimensions();
    debug_assert_eq!(seam.len(), height as usize);
    PixelBuffer::from_map(TwoDimensionalMap::from_fn(width - 1, height, |x, y| {
        let source = if x < seam[y as usize] { x } else { x + 1 };
        image.pixel(source, y)
    }))
}

// Every pixel above the seam stays put; every pixel below it moves
// one row up.
fn remove_horizontal_seam(image: &PixelBuffer, seam: &[u32]) -> Result<PixelBuffer, CarveError> {
    let (width, height) = image.dimensions();
    debug_assert_eq!(seam.len(), width as usize);
    PixelBuffer::from_map(TwoDimensionalMap::from_fn(width, height - 1, |x, y| {
        let source = if y < seam[x as usize] { y } else { y + 1 };
        image.pixel(x, source)
    }))
}

// Which extent a single step shrinks.
#[derive(PartialEq, Copy, Clone, Debug)]
enum Carve {
    Width,
    Height,
}

fn carveonce(image: &PixelBuffer, direction: Carve) -> Result<PixelBuffer, CarveError> {
    let energy = calculate_energy(image);
    match direction {
        Carve::Width => {
            let seam = energy.find_vertical_seam();
            debug!("vertical seam, cost {}: {:?}", seam.total_cost(), seam.offsets());
            remove_vertical_seam(image, &seam.offsets())
        }
        Carve::Height => {
            let seam = energy.find_horizontal_seam();
            debug!("horizontal seam, cost {}: {:?}", seam.total_cost(), seam.offsets());
            remove_horizontal_seam(image, &seam.offsets())
        }
    }
}

/// A struct for holding the image to be carved.
pub struct SeamCarver<'a> {
    image: &'a PixelBuffer,
}

impl<'a> SeamCarver<'a> {
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: &'a PixelBuffer) -> Self {
        Self { image }
    }

    /// Remove `remove_width` vertical seams and then `remove_height`
    /// horizontal ones.  Every removal must leave at least one pixel
    /// along its axis; the request is refused up front otherwise.
    pub fn carve(&self, remove_width: u32, remove_height: u32) -> Result<PixelBuffer, CarveError> {
        let (width, height) = self.image.dimensions();
        if remove_width >= width {
            return Err(CarveError::InvalidReduction {
                axis: Axis::Width,
                requested: remove_width,
                extent: width,
            });
        }
        if remove_height >= height {
            return Err(CarveError::InvalidReduction {
                axis: Axis::Height,
                requested: remove_height,
                extent: height,
            });
        }

        info!(
            "carving {}x{} down to {}x{}",
            width,
            height,
            width - remove_width,
            height - remove_height
        );

        let mut scratch = self.image.clone();
        for _ in 0..remove_width {
            scratch = carveonce(&scratch, Carve::Width)?;
            debug!("W: {}, {}", scratch.width(), scratch.height());
        }
        for _ in 0..remove_height {
            scratch = carveonce(&scratch, Carve::Height)?;
            debug!("H: {}, {}", scratch.width(), scratch.height());
        }
        Ok(scratch)
    }

    /// Given a desired new width and height, carve seams out of the
    /// image until it fits.
    pub fn carve_to(&self, newwidth: u32, newheight: u32) -> Result<PixelBuffer, CarveError> {
        let (width, height) = self.image.dimensions();
        if newwidth > width {
            return Err(CarveError::Upscale {
                axis: Axis::Width,
                requested: newwidth,
                extent: width,
            });
        }
        if newheight > height {
            return Err(CarveError::Upscale {
                axis: Axis::Height,
                requested: newheight,
                extent: height,
            });
        }
        self.carve(width - newwidth, height - newheight)
    }
}

/// Carve `remove_width` columns and `remove_height` rows out of an
/// image, one lowest-energy seam at a time.
pub fn seamcarve(
    image: &PixelBuffer,
    remove_width: u32,
    remove_height: u32,
) -> Result<PixelBuffer, CarveError> {
    SeamCarver::new(image).carve(remove_width, remove_height)
}
