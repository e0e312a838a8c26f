// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors
//!
//! Every failure in this crate is terminal for the request that
//! raised it.  Carving either removes every requested seam or fails
//! before touching the first one.

use failure::Fail;
use std::fmt;

/// Which extent of the image a request refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

#[derive(Debug, Fail, PartialEq)]
pub enum CarveError {
    /// Asked to remove as many seams as there are pixels along an
    /// axis, or more.
    #[fail(
        display = "cannot remove {} pixels from an image {} of {}",
        requested, axis, extent
    )]
    InvalidReduction {
        axis: Axis,
        requested: u32,
        extent: u32,
    },

    /// A buffer with no pixels along at least one axis.
    #[fail(display = "invalid image dimensions {}x{}", width, height)]
    InvalidDimension { width: u32, height: u32 },

    /// Sample data that does not fill the grid it claims to describe.
    #[fail(
        display = "buffer holds {} cells where {} were expected",
        actual, expected
    )]
    DegenerateBuffer { expected: usize, actual: usize },

    /// Seam carving only ever shrinks.
    #[fail(
        display = "seamcarve cannot upscale: requested {} {} exceeds {}",
        axis, requested, extent
    )]
    Upscale {
        axis: Axis,
        requested: u32,
        extent: u32,
    },
}
