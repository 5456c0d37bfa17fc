//! Panel surface seam.
//!
//! The crate never talks to a real UI element directly. Hosts expose each
//! pane as a `PanelSurface` — a handful of string style properties plus the
//! parent extent — and the binder mutates geometry exclusively through this
//! trait. `StyledPanel` is the in-memory implementation used by tests,
//! benches, and hosts that keep pane styles themselves.

use std::collections::BTreeMap;

use crate::geometry::{Bounds, PanelRect, format_px, parse_px};

/// Style properties the binder reads and writes on a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StyleProp {
    Left,
    Top,
    Width,
    Height,
}

impl StyleProp {
    pub fn name(self) -> &'static str {
        match self {
            StyleProp::Left => "left",
            StyleProp::Top => "top",
            StyleProp::Width => "width",
            StyleProp::Height => "height",
        }
    }
}

pub trait PanelSurface {
    fn style(&self, prop: StyleProp) -> Option<&str>;
    fn set_style(&mut self, prop: StyleProp, value: String);

    /// Extent of the pane's positioned ancestor, when known. Returning
    /// `None` disables the end-of-gesture containment clamp for this pane.
    fn parent_bounds(&self) -> Option<Bounds> {
        None
    }

    /// Current value of a style property in px, parse-or-zero.
    fn style_px(&self, prop: StyleProp) -> f64 {
        parse_px(self.style(prop))
    }

    /// Current geometry of the pane, parse-or-zero per property.
    fn rect(&self) -> PanelRect {
        PanelRect {
            left: self.style_px(StyleProp::Left),
            top: self.style_px(StyleProp::Top),
            width: self.style_px(StyleProp::Width),
            height: self.style_px(StyleProp::Height),
        }
    }

    fn apply_position(&mut self, left: f64, top: f64) {
        self.set_style(StyleProp::Left, format_px(left));
        self.set_style(StyleProp::Top, format_px(top));
    }

    fn apply_size(&mut self, width: f64, height: f64) {
        self.set_style(StyleProp::Width, format_px(width));
        self.set_style(StyleProp::Height, format_px(height));
    }

    fn apply_rect(&mut self, rect: PanelRect) {
        self.apply_position(rect.left, rect.top);
        self.apply_size(rect.width, rect.height);
    }
}

impl<T: PanelSurface + ?Sized> PanelSurface for &mut T {
    fn style(&self, prop: StyleProp) -> Option<&str> {
        (**self).style(prop)
    }

    fn set_style(&mut self, prop: StyleProp, value: String) {
        (**self).set_style(prop, value)
    }

    fn parent_bounds(&self) -> Option<Bounds> {
        (**self).parent_bounds()
    }
}

/// In-memory pane surface backed by a style map.
#[derive(Debug, Clone, Default)]
pub struct StyledPanel {
    styles: BTreeMap<StyleProp, String>,
    parent: Option<Bounds>,
}

impl StyledPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface starting at the given geometry.
    pub fn with_rect(rect: PanelRect) -> Self {
        let mut panel = Self::new();
        panel.apply_rect(rect);
        panel
    }

    /// Attach a parent extent, enabling the end-of-gesture clamp.
    pub fn with_parent(mut self, bounds: Bounds) -> Self {
        self.parent = Some(bounds);
        self
    }

    pub fn set_parent(&mut self, bounds: Option<Bounds>) {
        self.parent = bounds;
    }
}

impl PanelSurface for StyledPanel {
    fn style(&self, prop: StyleProp) -> Option<&str> {
        self.styles.get(&prop).map(String::as_str)
    }

    fn set_style(&mut self, prop: StyleProp, value: String) {
        self.styles.insert(prop, value);
    }

    fn parent_bounds(&self) -> Option<Bounds> {
        self.parent
    }
}
