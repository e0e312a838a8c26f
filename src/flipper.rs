// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grid dimensional flipper
//!
//! A proxy for any `GridView` that maps the width to the original
//! height, and vice versa, as well as every x to y and vice versa.
//!
//! This has the effect of making it possible to treat each column in
//! a horizontal seam search as a row, so there is exactly one seam
//! algorithm in the crate: horizontal seams are vertical seams of the
//! flipped grid.

use crate::twodmap::GridView;

pub struct Flipper<'a, G: GridView> {
    pub grid: &'a G,
}

impl<'a, G: GridView> Flipper<'a, G> {
    pub fn new(grid: &'a G) -> Self {
        Flipper { grid }
    }
}

impl<'a, G: GridView> GridView for Flipper<'a, G> {
    type Item = G::Item;

    fn width(&self) -> u32 {
        self.grid.height()
    }

    fn height(&self) -> u32 {
        self.grid.width()
    }

    fn get(&self, x: u32, y: u32) -> G::Item {
        self.grid.get(y, x)
    }
}
