//! Raster drawing surface backing the drawing capture.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use crate::config::{parse_hex_color, DiaristConfig, MAX_CANVAS_SIDE};
use crate::data_url::DataUrl;
use crate::error::Result;

const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A point in canvas buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Solid color, fixed width, round caps and joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba<u8>,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Rgba([0, 0, 0, 255]),
            width: 2.0,
        }
    }
}

impl StrokeStyle {
    pub fn from_config(config: &DiaristConfig) -> Self {
        let [r, g, b] = parse_hex_color(&config.stroke_color).unwrap_or([0, 0, 0]);
        Self {
            color: Rgba([r, g, b, 255]),
            width: config.stroke_width,
        }
    }
}

/// Transparent RGBA bitmap that persists across strokes until cleared.
#[derive(Debug, Clone)]
pub struct Canvas {
    bitmap: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            bitmap: RgbaImage::from_pixel(width, height, BLANK),
        }
    }

    /// Sized from the configuration, clamped to `1..=MAX_CANVAS_SIDE`.
    pub fn from_config(config: &DiaristConfig) -> Self {
        Self::new(
            config.canvas_width.clamp(1, MAX_CANVAS_SIDE),
            config.canvas_height.clamp(1, MAX_CANVAS_SIDE),
        )
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    pub fn clear(&mut self) {
        for pixel in self.bitmap.pixels_mut() {
            *pixel = BLANK;
        }
    }

    pub fn is_blank(&self) -> bool {
        self.bitmap.pixels().all(|p| *p == BLANK)
    }

    /// Paints a straight segment. Every pixel whose center lies within half
    /// the stroke width of the segment is set, which yields round caps and,
    /// across consecutive segments, round joins.
    pub fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let (width, height) = self.bitmap.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let radius = style.width / 2.0;

        let min_x = (from.x.min(to.x) - radius).floor().max(0.0);
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0);
        let max_x = (from.x.max(to.x) + radius).ceil().min(width as f32 - 1.0);
        let max_y = (from.y.max(to.y) + radius).ceil().min(height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for py in (min_y as u32)..=(max_y as u32) {
            for px in (min_x as u32)..=(max_x as u32) {
                let center = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                if distance_to_segment(center, from, to) <= radius {
                    self.bitmap.put_pixel(px, py, style.color);
                }
            }
        }
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.bitmap.write_to(&mut cursor, ImageFormat::Png)?;
        Ok(cursor.into_inner())
    }

    /// The full bitmap as a `data:image/png;base64,…` URL.
    pub fn to_data_url(&self) -> Result<String> {
        let png = self.to_png()?;
        Ok(DataUrl::from_bytes("image/png", &png).to_string())
    }

    /// What a freshly cleared canvas of this size serializes to.
    pub fn blank_data_url(width: u32, height: u32) -> Result<String> {
        Canvas::new(width, height).to_data_url()
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let cx = a.x + t * dx;
    let cy = a.y + t * dy;
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_blank() {
        let canvas = Canvas::new(10, 10);
        assert!(canvas.is_blank());
        assert_eq!(
            canvas.to_data_url().unwrap(),
            Canvas::blank_data_url(10, 10).unwrap()
        );
    }

    #[test]
    fn from_config_clamps_out_of_range_sizes() {
        let config = DiaristConfig {
            canvas_width: 0,
            canvas_height: 4_000_000_000,
            ..DiaristConfig::default()
        };
        let canvas = Canvas::from_config(&config);
        assert_eq!((canvas.width(), canvas.height()), (1, MAX_CANVAS_SIDE));
    }

    #[test]
    fn horizontal_stroke_covers_its_width() {
        let mut canvas = Canvas::new(10, 10);
        let style = StrokeStyle::default();
        canvas.stroke_segment(Point::new(1.0, 5.0), Point::new(8.0, 5.0), &style);

        assert_eq!(*canvas.bitmap().get_pixel(4, 4), style.color);
        assert_eq!(*canvas.bitmap().get_pixel(4, 5), style.color);
        assert_eq!(*canvas.bitmap().get_pixel(4, 7), BLANK);
        // Round cap reaches just past the start point
        assert_eq!(*canvas.bitmap().get_pixel(0, 5), style.color);
    }

    #[test]
    fn zero_length_segment_paints_a_dot() {
        let mut canvas = Canvas::new(10, 10);
        canvas.stroke_segment(
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            &StrokeStyle::default(),
        );
        assert!(!canvas.is_blank());
    }

    #[test]
    fn strokes_outside_the_surface_are_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.stroke_segment(
            Point::new(-50.0, -50.0),
            Point::new(-40.0, -40.0),
            &StrokeStyle::default(),
        );
        assert!(canvas.is_blank());

        canvas.stroke_segment(
            Point::new(-5.0, 5.0),
            Point::new(50.0, 5.0),
            &StrokeStyle::default(),
        );
        assert_eq!(*canvas.bitmap().get_pixel(9, 5), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn clear_wipes_strokes() {
        let mut canvas = Canvas::new(10, 10);
        canvas.stroke_segment(
            Point::new(0.0, 0.0),
            Point::new(9.0, 9.0),
            &StrokeStyle::default(),
        );
        canvas.clear();
        assert!(canvas.is_blank());
    }

    #[test]
    fn style_follows_config() {
        let mut config = DiaristConfig::default();
        config.stroke_color = "#ff0000".into();
        config.stroke_width = 4.0;
        let style = StrokeStyle::from_config(&config);
        assert_eq!(style.color, Rgba([255, 0, 0, 255]));
        assert_eq!(style.width, 4.0);
    }
}
