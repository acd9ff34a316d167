//! # Drawing Capture
//!
//! Turns pointer and touch input into strokes on a [`Canvas`].
//!
//! ```text
//!   MouseDown / TouchStart            MouseMove / TouchMove
//!   ┌──────┐ ─────────────────▶ ┌──────────────┐ ──┐ (segment from last point)
//!   │ Idle │                    │ StrokeActive │ ◀─┘
//!   └──────┘ ◀───────────────── └──────────────┘
//!           MouseUp / MouseLeave / TouchEnd
//! ```
//!
//! Each surface owns its own `DrawingCapture`; nothing is shared between
//! surfaces. Event coordinates are in on-screen pixels relative to the
//! surface's top-left corner and are scaled into buffer pixels independently
//! per axis, so a canvas displayed at a different size than its buffer draws
//! without distortion.
//!
//! Segments are straight lines between sampled points. Fast motion shows as a
//! visible polyline; no smoothing is applied.

use crate::canvas::{Canvas, Point, StrokeStyle};
use crate::commands::append;
use crate::error::Result;
use crate::model::{Entry, EntryKind};
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    MouseDown(Point),
    MouseMove(Point),
    MouseUp,
    MouseLeave,
    /// Position of the first touch point.
    TouchStart(Point),
    TouchMove(Point),
    TouchEnd,
}

/// What the host UI should do with the original event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Suppress the platform's scroll/zoom gesture.
    pub prevent_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StrokeState {
    Idle,
    Active { last: Point },
}

#[derive(Debug, Clone)]
pub struct DrawingCapture {
    canvas: Canvas,
    style: StrokeStyle,
    display_width: f32,
    display_height: f32,
    state: StrokeState,
}

impl DrawingCapture {
    /// A capture whose surface is displayed at its buffer size.
    pub fn new(canvas: Canvas, style: StrokeStyle) -> Self {
        let display_width = canvas.width() as f32;
        let display_height = canvas.height() as f32;
        Self {
            canvas,
            style,
            display_width,
            display_height,
            state: StrokeState::Idle,
        }
    }

    pub fn with_display_size(mut self, width: f32, height: f32) -> Self {
        self.set_display_size(width, height);
        self
    }

    /// Update the on-screen size, e.g. after a layout change.
    pub fn set_display_size(&mut self, width: f32, height: f32) {
        self.display_width = width;
        self.display_height = height;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn is_stroke_active(&self) -> bool {
        matches!(self.state, StrokeState::Active { .. })
    }

    /// Maps a display-space point into buffer pixels.
    pub fn to_buffer(&self, point: Point) -> Point {
        Point::new(
            point.x * scale(self.canvas.width(), self.display_width),
            point.y * scale(self.canvas.height(), self.display_height),
        )
    }

    pub fn handle(&mut self, event: PointerEvent) -> EventOutcome {
        match event {
            PointerEvent::MouseDown(p) => {
                self.begin(p);
                EventOutcome::default()
            }
            PointerEvent::TouchStart(p) => {
                self.begin(p);
                EventOutcome {
                    prevent_default: true,
                }
            }
            PointerEvent::MouseMove(p) => {
                self.extend(p);
                EventOutcome::default()
            }
            PointerEvent::TouchMove(p) => {
                self.extend(p);
                EventOutcome {
                    prevent_default: true,
                }
            }
            PointerEvent::MouseUp | PointerEvent::MouseLeave | PointerEvent::TouchEnd => {
                self.state = StrokeState::Idle;
                EventOutcome::default()
            }
        }
    }

    /// Wipes unsaved strokes. Committed entries are unaffected.
    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    /// Flattens the bitmap into a `drawing` entry of `diary_id`.
    ///
    /// On success the surface is cleared for the next drawing. A blank
    /// drawing is rejected and the surface is left as it was.
    pub fn commit<S: KeyValueStore>(&mut self, store: &mut S, diary_id: &str) -> Result<Entry> {
        let encoded = self.canvas.to_data_url()?;
        let entry = append::append_entry(store, diary_id, EntryKind::Drawing, &encoded)?;
        self.canvas.clear();
        Ok(entry)
    }

    fn begin(&mut self, display_point: Point) {
        let last = self.to_buffer(display_point);
        self.state = StrokeState::Active { last };
    }

    fn extend(&mut self, display_point: Point) {
        if let StrokeState::Active { last } = self.state {
            let current = self.to_buffer(display_point);
            self.canvas.stroke_segment(last, current, &self.style);
            self.state = StrokeState::Active { last: current };
        }
    }
}

fn scale(buffer: u32, display: f32) -> f32 {
    if display > 0.0 {
        buffer as f32 / display
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::entries;
    use crate::error::{DiaryError, ValidationError};
    use crate::store::memory::fixtures::StoreFixture;

    fn capture(width: u32, height: u32) -> DrawingCapture {
        DrawingCapture::new(Canvas::new(width, height), StrokeStyle::default())
    }

    #[test]
    fn moves_without_press_draw_nothing() {
        let mut cap = capture(20, 20);
        cap.handle(PointerEvent::MouseMove(Point::new(2.0, 2.0)));
        cap.handle(PointerEvent::MouseMove(Point::new(15.0, 15.0)));
        assert!(cap.canvas().is_blank());
        assert!(!cap.is_stroke_active());
    }

    #[test]
    fn press_drag_release_draws_one_stroke() {
        let mut cap = capture(20, 20);
        cap.handle(PointerEvent::MouseDown(Point::new(2.0, 10.0)));
        assert!(cap.is_stroke_active());
        cap.handle(PointerEvent::MouseMove(Point::new(18.0, 10.0)));
        cap.handle(PointerEvent::MouseUp);
        assert!(!cap.is_stroke_active());
        assert!(!cap.canvas().is_blank());

        // After release, further motion is ignored.
        let before = cap.canvas().bitmap().clone();
        cap.handle(PointerEvent::MouseMove(Point::new(10.0, 0.0)));
        assert_eq!(cap.canvas().bitmap(), &before);
    }

    #[test]
    fn leaving_the_surface_ends_the_stroke() {
        let mut cap = capture(20, 20);
        cap.handle(PointerEvent::MouseDown(Point::new(1.0, 1.0)));
        cap.handle(PointerEvent::MouseLeave);
        assert!(!cap.is_stroke_active());
    }

    #[test]
    fn scales_display_coordinates_per_axis() {
        // Buffer 200x100 shown at 100x100: x doubles, y unchanged.
        let cap = capture(200, 100).with_display_size(100.0, 100.0);
        assert_eq!(cap.to_buffer(Point::new(50.0, 40.0)), Point::new(100.0, 40.0));
    }

    #[test]
    fn scaled_strokes_land_in_buffer_space() {
        let mut cap = capture(40, 40).with_display_size(20.0, 20.0);
        cap.handle(PointerEvent::MouseDown(Point::new(5.0, 15.0)));
        cap.handle(PointerEvent::MouseMove(Point::new(15.0, 15.0)));
        // Display y=15 maps to buffer y=30.
        assert_eq!(cap.canvas().bitmap().get_pixel(20, 30)[3], 255);
        assert_eq!(cap.canvas().bitmap().get_pixel(20, 15)[3], 0);
    }

    #[test]
    fn touch_events_suppress_default_gestures() {
        let mut cap = capture(20, 20);
        assert!(cap.handle(PointerEvent::TouchStart(Point::new(1.0, 1.0))).prevent_default);
        assert!(cap.handle(PointerEvent::TouchMove(Point::new(5.0, 5.0))).prevent_default);
        assert!(!cap.handle(PointerEvent::TouchEnd).prevent_default);
        assert!(!cap.handle(PointerEvent::MouseDown(Point::new(1.0, 1.0))).prevent_default);
        assert!(!cap.canvas().is_blank());
    }

    #[test]
    fn strokes_accumulate_until_cleared() {
        let mut cap = capture(20, 20);
        cap.handle(PointerEvent::MouseDown(Point::new(1.0, 1.0)));
        cap.handle(PointerEvent::MouseMove(Point::new(5.0, 1.0)));
        cap.handle(PointerEvent::MouseUp);
        cap.handle(PointerEvent::MouseDown(Point::new(1.0, 15.0)));
        cap.handle(PointerEvent::MouseMove(Point::new(5.0, 15.0)));
        cap.handle(PointerEvent::MouseUp);

        assert_eq!(cap.canvas().bitmap().get_pixel(3, 1)[3], 255);
        assert_eq!(cap.canvas().bitmap().get_pixel(3, 15)[3], 255);

        cap.clear();
        assert!(cap.canvas().is_blank());
    }

    #[test]
    fn commit_appends_and_clears() {
        let mut fixture = StoreFixture::new().with_diary("Trip", "1234");
        let diary = fixture.diary("Trip");

        let mut cap = capture(20, 20);
        cap.handle(PointerEvent::MouseDown(Point::new(2.0, 2.0)));
        cap.handle(PointerEvent::MouseMove(Point::new(18.0, 18.0)));
        cap.handle(PointerEvent::MouseUp);

        let entry = cap.commit(&mut fixture.store, &diary.id).unwrap();
        assert_eq!(entry.kind, EntryKind::Drawing);
        assert!(entry.content.starts_with("data:image/png;base64,"));
        assert!(cap.canvas().is_blank());

        let listed = entries::list_entries(&fixture.store, &diary.id).unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn blank_commit_is_rejected_and_keeps_nothing() {
        let mut fixture = StoreFixture::new().with_diary("Trip", "1234");
        let diary = fixture.diary("Trip");

        let mut cap = capture(20, 20);
        let err = cap.commit(&mut fixture.store, &diary.id).unwrap_err();
        assert!(matches!(
            err,
            DiaryError::Validation(ValidationError::BlankDrawing)
        ));
        assert!(entries::list_entries(&fixture.store, &diary.id)
            .unwrap()
            .is_empty());
    }
}
