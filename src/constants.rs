//! Shared crate-wide constants.

/// Minimum height (in px) a resize frame must report before the tiny-height
/// debounce in the resize guard considers rejecting it.
///
/// The underlying pointer engine occasionally emits a spuriously small
/// height immediately after a legitimate user-driven resize. A frame below
/// this threshold is rejected only when a larger height was already
/// accepted for the same pane, so panes that start out small keep working.
///
/// Units: px. Raising this value widens the band of heights treated as
/// engine noise; lowering it lets smaller panes through at the cost of
/// occasionally applying an artifact frame. The value is empirical and may
/// need revisiting against the engine's actual guarantees.
pub const MIN_RESIZE_HEIGHT_PX: f64 = 100.0;

/// Minimum width and height (in px) the end-of-gesture containment clamp
/// will shrink a pane to when its parent bounds are smaller than the pane.
///
/// Units: px. Keeps a pane grabbable after a clamp against a tiny parent;
/// a zero-size clamp result would make the pane unrecoverable by pointer.
pub const CLAMP_MIN_SIZE_PX: f64 = 1.0;
