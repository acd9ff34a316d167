//! Drawing entries from recorded pointer input.
//!
//! Terminal clients have no pointer, so a drawing is described as a stroke
//! script, one event per line:
//!
//! ```text
//! # a diagonal, then a short tap-drag on a touch screen
//! down 10 10
//! move 40 40
//! up
//! touchstart 5 60
//! touchmove 25 60
//! touchend
//! ```
//!
//! `leave` ends a stroke like `up`; `clear` wipes the surface. Coordinates are
//! display pixels and are scaled into the canvas buffer.

use crate::canvas::{Canvas, Point, StrokeStyle};
use crate::capture::{DrawingCapture, PointerEvent};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DiaryError, Result};
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    Event(PointerEvent),
    Clear,
}

pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (number, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_line(line)
            .map_err(|msg| DiaryError::Api(format!("line {}: {}", number + 1, msg)))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> std::result::Result<ScriptStep, String> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    let point = || -> std::result::Result<Point, String> {
        match args.as_slice() {
            [x, y] => {
                let x: f32 = x.parse().map_err(|_| format!("bad x coordinate: {}", x))?;
                let y: f32 = y.parse().map_err(|_| format!("bad y coordinate: {}", y))?;
                Ok(Point::new(x, y))
            }
            _ => Err(format!("{} expects two coordinates", command)),
        }
    };
    let bare = |step: ScriptStep| -> std::result::Result<ScriptStep, String> {
        if args.is_empty() {
            Ok(step)
        } else {
            Err(format!("{} takes no arguments", command))
        }
    };

    match command.as_str() {
        "down" => Ok(ScriptStep::Event(PointerEvent::MouseDown(point()?))),
        "move" => Ok(ScriptStep::Event(PointerEvent::MouseMove(point()?))),
        "up" => bare(ScriptStep::Event(PointerEvent::MouseUp)),
        "leave" => bare(ScriptStep::Event(PointerEvent::MouseLeave)),
        "touchstart" => Ok(ScriptStep::Event(PointerEvent::TouchStart(point()?))),
        "touchmove" => Ok(ScriptStep::Event(PointerEvent::TouchMove(point()?))),
        "touchend" => bare(ScriptStep::Event(PointerEvent::TouchEnd)),
        "clear" => bare(ScriptStep::Clear),
        other => Err(format!("unknown event: {}", other)),
    }
}

/// Replays `steps` on a fresh surface and commits the result.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    diary_id: &str,
    steps: &[ScriptStep],
    canvas: Canvas,
    style: StrokeStyle,
    display_size: Option<(f32, f32)>,
) -> Result<CmdResult> {
    let mut capture = DrawingCapture::new(canvas, style);
    if let Some((width, height)) = display_size {
        capture.set_display_size(width, height);
    }

    for step in steps {
        match step {
            ScriptStep::Event(event) => {
                capture.handle(*event);
            }
            ScriptStep::Clear => capture.clear(),
        }
    }

    let entry = capture.commit(store, diary_id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Drawing saved."));
    Ok(result.with_affected_entries(vec![entry]))
}
