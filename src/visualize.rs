// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pictures of the machinery
//!
//! Read-only renderings: the energy grid as a greyscale image, a seam
//! painted over the image it came from, and the red-cross test card.

use crate::energy::{calculate_energy, EnergyGrid};
use crate::error::CarveError;
use crate::pixelbuffer::{Color, PixelBuffer};
use crate::seamfinder::{Seam, SeamFinder};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use num_traits::{clamp, NumCast};

pub const RED: Color = [255, 0, 0];

/// Render an energy grid as greyscale, the hottest pixel white.  A
/// grid with no energy at all comes out black.
pub fn energy_to_image(energy: &EnergyGrid) -> GrayImage {
    let (width, height) = energy.dimensions();
    let factor = energy.max_energy();
    GrayImage::from_fn(width, height, |x, y| {
        if factor <= 0.0 {
            return Luma([0]);
        }
        let scaled = clamp((255.0 * energy.energy(x, y) / factor).round(), 0.0, 255.0);
        Luma([NumCast::from(scaled).unwrap_or(u8::max_value())])
    })
}

/// A copy of `image` with every pixel of `seam` painted `color`.
/// Points of the seam that fall outside the image, as when the seam
/// was found on a larger image, are skipped.
pub fn highlight_seam(image: &PixelBuffer, seam: &Seam, color: Color) -> PixelBuffer {
    let (width, height) = image.dimensions();
    let mut highlighted = image.clone();
    for point in seam.points() {
        if point.x < width && point.y < height {
            highlighted.put_pixel(point.x, point.y, color);
        }
    }
    highlighted
}

/// The image with its cheapest vertical seam drawn over it in red.
pub fn highlight_vertical_seam(image: &PixelBuffer) -> PixelBuffer {
    let seam = calculate_energy(image).find_vertical_seam();
    highlight_seam(image, &seam, RED)
}

/// A black canvas with both diagonals drawn in red.
pub fn draw_cross(width: u32, height: u32) -> Result<PixelBuffer, CarveError> {
    if width == 0 || height == 0 {
        return Err(CarveError::InvalidDimension { width, height });
    }
    let mut canvas = RgbImage::new(width, height);
    let (right, bottom) = ((width - 1) as f32, (height - 1) as f32);
    draw_line_segment_mut(&mut canvas, (0.0, 0.0), (right, bottom), Rgb(RED));
    draw_line_segment_mut(&mut canvas, (0.0, bottom), (right, 0.0), Rgb(RED));
    PixelBuffer::from_image(&canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twodmap::TwoDimensionalMap;

    #[test]
    fn energy_image_is_normalized_to_the_maximum() {
        let energy = EnergyGrid::from_map(
            TwoDimensionalMap::from_vec(4, 1, vec![0.0, 10.0, 5.0, 20.0]).unwrap(),
        )
        .unwrap();
        let picture = energy_to_image(&energy);
        let values: Vec<u8> = picture.pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![0, 128, 64, 255]);
    }

    #[test]
    fn flat_energy_image_is_black() {
        let energy = calculate_energy(&PixelBuffer::filled(3, 3, [9, 9, 9]).unwrap());
        assert!(energy_to_image(&energy).pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn highlight_paints_only_the_seam() {
        let mut image = PixelBuffer::filled(4, 3, [0, 0, 0]).unwrap();
        image.put_pixel(1, 1, [255, 255, 255]);
        let highlighted = highlight_vertical_seam(&image);
        for y in 0..3 {
            assert_eq!(highlighted.pixel(0, y), RED);
            assert_eq!(highlighted.pixel(2, y), image.pixel(2, y));
        }
        assert_eq!(highlighted.pixel(1, 1), [255, 255, 255]);
    }

    #[test]
    fn highlight_skips_points_off_the_image() {
        let wide = calculate_energy(&PixelBuffer::filled(6, 5, [3, 3, 3]).unwrap());
        let seam = wide.find_horizontal_seam();
        let small = PixelBuffer::filled(4, 3, [0, 0, 0]).unwrap();
        let highlighted = highlight_seam(&small, &seam, RED);
        assert_eq!(highlighted.dimensions(), (4, 3));
        for x in 0..4 {
            assert_eq!(highlighted.pixel(x, 0), RED);
            assert_eq!(highlighted.pixel(x, 1), [0, 0, 0]);
        }
    }

    #[test]
    fn cross_has_red_diagonals() {
        let cross = draw_cross(5, 5).unwrap();
        for &(x, y) in &[(0, 0), (2, 2), (4, 4), (0, 4), (4, 0), (1, 3)] {
            assert_eq!(cross.pixel(x, y), RED, "({}, {})", x, y);
        }
        assert_eq!(cross.pixel(1, 0), [0, 0, 0]);
        assert_eq!(cross.pixel(2, 4), [0, 0, 0]);
    }

    #[test]
    fn cross_needs_a_canvas() {
        assert!(draw_cross(0, 3).is_err());
    }
}
