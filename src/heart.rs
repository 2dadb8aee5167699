// Heart curve and the sprite baked from it

use std::cmp::Ordering;
use std::f64::consts::PI;

use crate::color::Color;
use crate::particle::Point;
use crate::surface::Sprite;

const CURVE_STEP: f64 = 0.01;
// Curve units that span the sprite's side length.
const CURVE_EXTENT: f64 = 350.0;

/// Point on the heart curve for `t` in [-pi, pi]. `t = 0` is the notch at the
/// top, `t = ±pi` the tip at the bottom; y grows upward.
pub fn point_on_heart(t: f64) -> Point {
    glm::vec2(
        160.0 * t.sin().powi(3),
        130.0 * t.cos() - 50.0 * (2.0 * t).cos() - 20.0 * (3.0 * t).cos() - 10.0 * (4.0 * t).cos()
            + 25.0,
    )
}

/// Closed outline of the heart in the pixel space of a `size` x `size`
/// image, y growing downward.
pub fn heart_outline(size: f64) -> Vec<Point> {
    let to_image = |p: Point| {
        glm::vec2(
            size / 2.0 + p.x * size / CURVE_EXTENT,
            size / 2.0 - p.y * size / CURVE_EXTENT,
        )
    };

    let mut t = -PI;
    let mut outline = vec![to_image(point_on_heart(t))];
    while t < PI {
        t += CURVE_STEP;
        outline.push(to_image(point_on_heart(t)));
    }
    outline
}

/// RGBA8 image, rows top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixel_data: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32) -> Bitmap {
        Bitmap {
            width,
            height,
            pixel_data: vec![0x00; (width * height * 4) as usize],
        }
    }

    pub fn pixel_width(&self) -> u32 {
        self.width
    }

    pub fn pixel_height(&self) -> u32 {
        self.height
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.get_pixel_index(x, y).map(|idx| Color {
            r: self.pixel_data[idx],
            g: self.pixel_data[idx + 1],
            b: self.pixel_data[idx + 2],
            a: self.pixel_data[idx + 3],
        })
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.get_pixel_index(x, y) {
            self.pixel_data[idx..idx + 4].copy_from_slice(&color.to_rgba());
        }
    }

    /// Even-odd scanline fill of a closed polygon, sampled at pixel centers.
    pub fn fill_polygon(&mut self, polygon: &[Point], color: Color) {
        if polygon.len() < 3 {
            return;
        }
        let mut crossings = Vec::new();
        for row in 0..self.height as i32 {
            let center_y = row as f64 + 0.5;
            crossings.clear();
            for (i, a) in polygon.iter().enumerate() {
                let b = &polygon[(i + 1) % polygon.len()];
                if (a.y <= center_y) != (b.y <= center_y) {
                    crossings.push(a.x + (center_y - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0) as i32;
                let end = (span[1] - 0.5).ceil().min(self.width as f64) as i32;
                for column in start..end {
                    self.set_pixel(column, row, color);
                }
            }
        }
    }

    fn get_pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(((y * self.width as i32 + x) * 4) as usize)
        } else {
            None
        }
    }
}

impl Sprite for Bitmap {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }
}

/// Bakes a filled heart of the given color into a `size` x `size` bitmap.
pub fn create_heart_image(size: u32, color: Color) -> Bitmap {
    let mut image = Bitmap::new(size, size);
    image.fill_polygon(&heart_outline(size as f64), color);
    image
}
