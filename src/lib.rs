// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam carving: content-aware image resizing.
//!
//! An image is shrunk one pixel at a time by finding the connected
//! path of pixels with the least total energy, from one edge to the
//! opposite one, and cutting it out.

pub mod error;
pub use error::{Axis, CarveError};

pub mod twodmap;
pub use twodmap::{GridView, TwoDimensionalMap};

pub mod flipper;
pub use flipper::Flipper;

pub mod pixelbuffer;
pub use pixelbuffer::{Color, PixelBuffer, Point};

pub mod energy;
pub use energy::{calculate_energy, EnergyGrid};

pub mod seamfinder;
pub use seamfinder::{Orientation, Seam, SeamFinder};

pub mod seamcarver;
pub use seamcarver::{seamcarve, SeamCarver};

pub mod visualize;
pub use visualize::{draw_cross, energy_to_image, highlight_seam, highlight_vertical_seam};
