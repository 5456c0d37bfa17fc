//! Pure geometry for pane drag/resize.
//!
//! Everything in this module is side-effect free; applying the results to a
//! surface is the binder's job. Style values are parsed with a
//! parse-or-zero fallback so one malformed frame can never produce a NaN
//! position and teleport a pane off-screen.

use crate::constants::CLAMP_MIN_SIZE_PX;

/// Pane geometry in px, relative to the pane's positioned ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PanelRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Extent of the pane's parent container, origin at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One normalized geometry change, as delivered to subscribers.
///
/// `new_width`/`new_height` are `None` when the change was a pure move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryDelta {
    pub dx: f64,
    pub dy: f64,
    pub new_width: Option<f64>,
    pub new_height: Option<f64>,
}

impl GeometryDelta {
    pub fn move_only(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            new_width: None,
            new_height: None,
        }
    }

    pub fn resize(dx: f64, dy: f64, new_width: f64, new_height: f64) -> Self {
        Self {
            dx,
            dy,
            new_width: Some(new_width),
            new_height: Some(new_height),
        }
    }

    pub fn is_move_only(&self) -> bool {
        self.new_width.is_none() && self.new_height.is_none()
    }

    /// Resolve this delta against the geometry it was produced from,
    /// yielding the absolute rect after the change. Size falls back to the
    /// prior size for move-only deltas.
    pub fn resolve_against(&self, prior: PanelRect) -> PanelRect {
        PanelRect {
            left: prior.left + self.dx,
            top: prior.top + self.dy,
            width: self.new_width.unwrap_or(prior.width),
            height: self.new_height.unwrap_or(prior.height),
        }
    }
}

/// Parse a style value such as `"110px"` or `"45.5"` as px.
///
/// Absent, empty, or unparsable values yield `0.0`, never NaN.
pub fn parse_px(value: Option<&str>) -> f64 {
    let Some(raw) = value else {
        return 0.0;
    };
    let trimmed = raw.trim().trim_end_matches("px").trim_end();
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => 0.0,
    }
}

/// Format a px value the way it is written back into a style property.
pub fn format_px(value: f64) -> String {
    format!("{}px", value)
}

/// Apply a move delta to a parsed position.
pub fn translate(left: f64, top: f64, dx: f64, dy: f64) -> (f64, f64) {
    (left + dx, top + dy)
}

/// Shift, and if necessary shrink, `rect` so all of its edges lie within
/// `bounds`. Used only at gesture end; live frames are never clamped.
pub fn clamp_within(rect: PanelRect, bounds: Bounds) -> PanelRect {
    let width = rect.width.min(bounds.width).max(CLAMP_MIN_SIZE_PX);
    let height = rect.height.min(bounds.height).max(CLAMP_MIN_SIZE_PX);
    let max_left = (bounds.width - width).max(0.0);
    let max_top = (bounds.height - height).max(0.0);
    PanelRect {
        left: rect.left.clamp(0.0, max_left),
        top: rect.top.clamp(0.0, max_top),
        width,
        height,
    }
}
