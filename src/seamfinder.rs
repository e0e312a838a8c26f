// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy grid
//!
//! The classic dynamic program: fill a table with the cost of the
//! cheapest path from the top row to every cell, pick the cheapest
//! cell on the bottom row, and walk the back pointers up.  There is
//! only the vertical version here.  A horizontal seam is the vertical
//! seam of the `Flipper`ed grid, with its coordinates flipped back.
//!
//! Ties always go to the lowest index, both when choosing a parent
//! and when choosing where the seam ends, so the same grid always
//! yields the same seam.

use crate::energy::EnergyGrid;
use crate::flipper::Flipper;
use crate::pixelbuffer::Point;
use crate::twodmap::{GridView, TwoDimensionalMap};

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// finders.
pub trait SeamFinder {
    /// Request a left-to-right seam, one point per column.
    fn find_horizontal_seam(&self) -> Seam;

    /// Request a top-to-bottom seam, one point per row.
    fn find_vertical_seam(&self) -> Seam;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A connected path of pixels from one edge of the image to the
/// opposite one.
#[derive(Debug, Clone, PartialEq)]
pub struct Seam {
    orientation: Orientation,
    points: Vec<Point>,
    total_cost: f64,
}

impl Seam {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The pixels of the seam, top to bottom or left to right.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of the energies along the seam.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// The x of every row for a vertical seam, or the y of every
    /// column for a horizontal one.
    pub fn offsets(&self) -> Vec<u32> {
        self.points
            .iter()
            .map(|p| match self.orientation {
                Orientation::Vertical => p.x,
                Orientation::Horizontal => p.y,
            })
            .collect()
    }
}

/// One cell of the cumulative cost table: the cheapest total energy
/// of any path from the top row to this cell, and the x coordinate in
/// the row above that the path came through.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct CostAndBackPointer {
    pub cost: f64,
    pub parent: u32,
}

pub type CumulativeCostGrid = TwoDimensionalMap<CostAndBackPointer>;

// The cheapest x in lo..=hi, scanning left to right and only moving
// on a strictly smaller cost.
#[inline]
fn cheapest<F>(lo: u32, hi: u32, cost: F) -> (u32, f64)
where
    F: Fn(u32) -> f64,
{
    ((lo + 1)..=hi).fold((lo, cost(lo)), |best, x| {
        let c = cost(x);
        if c < best.1 {
            (x, c)
        } else {
            best
        }
    })
}

// The search functions below are generic over any view so that the
// horizontal search can run on a `Flipper`, but they assume at least
// one row and one column.  Only an `EnergyGrid`, which refuses to be
// built empty, reaches them from outside the crate.

/// Fill the cumulative cost table for a top-to-bottom search.
pub(crate) fn cumulative_cost<G>(energy: &G) -> CumulativeCostGrid
where
    G: GridView<Item = f64>,
{
    let (width, height) = (energy.width(), energy.height());
    let mut target = CumulativeCostGrid::new(width, height);

    // Populate the first row with their native energies.
    for x in 0..width {
        target[(x, 0)].cost = energy.get(x, 0);
    }

    let maxwidth = width - 1;
    // Every subsequent row depends only on the row above it.
    for y in 1..height {
        for x in 0..width {
            let lo = x.saturating_sub(1);
            let hi = (x + 1).min(maxwidth);
            let (parent, cost) = cheapest(lo, hi, |px| target[(px, y - 1)].cost);
            target[(x, y)] = CostAndBackPointer {
                cost: energy.get(x, y) + cost,
                parent,
            };
        }
    }
    target
}

// Returns the x of every row, top first, and the seam's total cost.
fn trace_vertical<G>(energy: &G) -> (Vec<u32>, f64)
where
    G: GridView<Item = f64>,
{
    let target = cumulative_cost(energy);
    let (width, height) = target.dimensions();

    // Find the x coordinate of the bottommost cell with the least cost.
    let (mut seam_col, total_cost) = cheapest(0, width - 1, |x| target[(x, height - 1)].cost);

    // Working backwards, collect the x coordinates of the seam, then
    // reverse.
    let mut offsets = (0..height)
        .rev()
        .fold(Vec::with_capacity(height as usize), |mut acc, y| {
            acc.push(seam_col);
            seam_col = target[(seam_col, y)].parent;
            acc
        });
    offsets.reverse();
    (offsets, total_cost)
}

/// The cheapest top-to-bottom seam through an energy grid.
pub(crate) fn energy_to_vertical_seam<G>(energy: &G) -> Seam
where
    G: GridView<Item = f64>,
{
    let (offsets, total_cost) = trace_vertical(energy);
    Seam {
        orientation: Orientation::Vertical,
        points: offsets
            .into_iter()
            .zip(0..)
            .map(|(x, y)| Point::new(x, y))
            .collect(),
        total_cost,
    }
}

/// The cheapest left-to-right seam through an energy grid.
pub(crate) fn energy_to_horizontal_seam<G>(energy: &G) -> Seam
where
    G: GridView<Item = f64>,
{
    let seam = energy_to_vertical_seam(&Flipper::new(energy));
    Seam {
        orientation: Orientation::Horizontal,
        points: seam.points.into_iter().map(Point::flip).collect(),
        total_cost: seam.total_cost,
    }
}

impl SeamFinder for EnergyGrid {
    fn find_horizontal_seam(&self) -> Seam {
        energy_to_horizontal_seam(self)
    }

    fn find_vertical_seam(&self) -> Seam {
        energy_to_vertical_seam(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::calculate_energy;
    use crate::error::CarveError;
    use crate::pixelbuffer::PixelBuffer;

    const ENERGY_DATA: [f64; 20] = [
        9., 9., 0., 9., 9., 9., 1., 9., 8., 9., 9., 9., 9., 9., 0., 9., 9., 9., 0., 9.,
    ];

    fn grid(width: u32, height: u32, data: &[f64]) -> EnergyGrid {
        EnergyGrid::from_map(TwoDimensionalMap::from_vec(width, height, data.to_vec()).unwrap())
            .unwrap()
    }

    fn transpose(energy: &EnergyGrid) -> EnergyGrid {
        let (width, height) = energy.dimensions();
        EnergyGrid::from_map(TwoDimensionalMap::from_fn(height, width, |x, y| {
            energy.energy(y, x)
        }))
        .unwrap()
    }

    fn assert_connected(seam: &Seam) {
        let offsets = seam.offsets();
        for pair in offsets.windows(2) {
            assert!((i64::from(pair[0]) - i64::from(pair[1])).abs() <= 1);
        }
    }

    // Every monotone top-to-bottom path, by brute force.
    fn all_path_costs(energy: &EnergyGrid) -> Vec<f64> {
        let (width, height) = energy.dimensions();
        let mut paths: Vec<(u32, f64)> = (0..width).map(|x| (x, energy.energy(x, 0))).collect();
        for y in 1..height {
            paths = paths
                .into_iter()
                .flat_map(|(x, cost)| {
                    let lo = x.saturating_sub(1);
                    let hi = (x + 1).min(width - 1);
                    (lo..=hi)
                        .map(|nx| (nx, cost + energy.energy(nx, y)))
                        .collect::<Vec<_>>()
                })
                .collect();
        }
        paths.into_iter().map(|(_, cost)| cost).collect()
    }

    // A small deterministic generator, enough to vary the test grids.
    fn scrambled(width: u32, height: u32, seed: u64) -> EnergyGrid {
        let mut state = seed;
        let data: Vec<f64> = (0..width * height)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                ((state >> 33) % 50) as f64
            })
            .collect();
        grid(width, height, &data)
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        let seam = grid(5, 4, &ENERGY_DATA).find_vertical_seam();
        assert_eq!(seam.offsets(), [2, 3, 4, 3]);
        assert_eq!(seam.total_cost(), 8.0);
        assert_eq!(seam.orientation(), Orientation::Vertical);
        assert_eq!(seam.points()[1], Point::new(3, 1));
    }

    #[test]
    fn energy_grid_to_horizontal_seam() {
        let seam = grid(5, 4, &ENERGY_DATA).find_horizontal_seam();
        assert_eq!(seam.offsets(), [0, 1, 0, 1, 2]);
        assert_eq!(seam.total_cost(), 18.0);
        assert_eq!(seam.points()[4], Point::new(4, 2));
    }

    #[test]
    fn seam_cost_matches_the_table() {
        let energy = grid(5, 4, &ENERGY_DATA);
        let table = cumulative_cost(&energy);
        let seam = energy.find_vertical_seam();
        let bottom = seam.points()[3];
        assert_eq!(table[(bottom.x, bottom.y)].cost, seam.total_cost());
        let walked: f64 = seam.points().iter().map(|p| energy.energy(p.x, p.y)).sum();
        assert_eq!(walked, seam.total_cost());
    }

    #[test]
    fn no_path_is_cheaper_than_the_seam() {
        for seed in 0..8 {
            let energy = scrambled(5, 5, seed);
            let seam = energy.find_vertical_seam();
            assert_eq!(seam.len(), 5);
            assert_connected(&seam);
            let best = all_path_costs(&energy)
                .into_iter()
                .fold(std::f64::INFINITY, f64::min);
            assert_eq!(seam.total_cost(), best);
        }
    }

    #[test]
    fn horizontal_seam_is_the_vertical_seam_of_the_transpose() {
        for (seed, (width, height)) in [(3, 7), (6, 4), (5, 5), (2, 9)].iter().enumerate() {
            let energy = scrambled(*width, *height, seed as u64 + 100);
            let horizontal = energy.find_horizontal_seam();
            let vertical = transpose(&energy).find_vertical_seam();
            assert_eq!(horizontal.len(), *width as usize);
            assert_connected(&horizontal);
            let swapped: Vec<Point> = vertical.points().iter().map(|p| p.flip()).collect();
            assert_eq!(horizontal.points(), &swapped[..]);
            assert_eq!(horizontal.total_cost(), vertical.total_cost());
        }
    }

    #[test]
    fn flat_energy_picks_the_leftmost_seam() {
        let energy = calculate_energy(&PixelBuffer::filled(6, 4, [12, 12, 12]).unwrap());
        assert_eq!(energy.find_vertical_seam().offsets(), [0, 0, 0, 0]);
        assert_eq!(energy.find_horizontal_seam().offsets(), [0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        // Two equally cheap valleys; the one on the left wins.
        let energy = grid(
            5,
            3,
            &[
                5., 1., 5., 1., 5., //
                5., 1., 5., 1., 5., //
                5., 1., 5., 1., 5.,
            ],
        );
        assert_eq!(energy.find_vertical_seam().offsets(), [1, 1, 1]);
    }

    #[test]
    fn bright_pixel_is_avoided() {
        let mut image = PixelBuffer::filled(4, 3, [0, 0, 0]).unwrap();
        image.put_pixel(1, 1, [255, 255, 255]);
        let seam = calculate_energy(&image).find_vertical_seam();
        assert_eq!(
            seam.points(),
            &[Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)][..]
        );
        assert_eq!(seam.total_cost(), 0.0);
    }

    #[test]
    fn empty_grids_never_become_seam_sources() {
        for &(width, height) in &[(0, 3), (3, 0), (0, 0)] {
            assert_eq!(
                EnergyGrid::from_map(TwoDimensionalMap::new(width, height)),
                Err(CarveError::InvalidDimension { width, height })
            );
        }
    }

    #[test]
    fn single_column_and_single_row() {
        let column = grid(1, 3, &[1., 2., 3.]);
        assert_eq!(column.find_vertical_seam().offsets(), [0, 0, 0]);
        assert_eq!(column.find_horizontal_seam().offsets(), [0]);
        assert_eq!(column.find_horizontal_seam().total_cost(), 1.0);

        let row = grid(3, 1, &[4., 2., 3.]);
        assert_eq!(row.find_vertical_seam().offsets(), [1]);
    }
}
