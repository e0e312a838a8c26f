// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two-dimensional storage
//!
//! Every grid in this crate, the pixels, the energies, and the
//! cumulative costs of the seam search, lives in a
//! `TwoDimensionalMap`.  Reading is done through the `GridView`
//! trait, so that the seam finder can work on a map or on a
//! `Flipper` of one without caring which.

use crate::error::CarveError;
use itertools::iproduct;
use std::ops::{Index, IndexMut};

/// A read-only, addressable two-dimensional field.
pub trait GridView {
    /// The kind of thing stored at each address.
    type Item: Copy;

    /// Number of columns.
    fn width(&self) -> u32;

    /// Number of rows.
    fn height(&self) -> u32;

    /// The value at column `x`, row `y`.
    fn get(&self, x: u32, y: u32) -> Self::Item;
}

/// An addressable two-dimensional field, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// A new map of the given extent, every cell holding
    /// `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major vector.  The vector must hold
    /// exactly `width * height` cells.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Result<Self, CarveError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(CarveError::DegenerateBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    /// Build a map by asking `f` for the value of every cell, row by
    /// row.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> P,
    {
        TwoDimensionalMap {
            width,
            height,
            data: iproduct!(0..height, 0..width)
                .map(|(y, x)| f(x, y))
                .collect(),
        }
    }

    // Row-major.  Every other method goes through here.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// One full row, left to right.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// The whole map in row-major order.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<P> {
        self.data
    }
}

impl<P: Default + Copy> GridView for TwoDimensionalMap<P> {
    type Item = P;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get(&self, x: u32, y: u32) -> P {
        self[(x, y)]
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}
