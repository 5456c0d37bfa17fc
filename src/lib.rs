//! Pointer-driven drag/resize management for floating UI panels.
//!
//! This crate is the interaction layer of a window manager: it makes pane
//! surfaces draggable (from their title region) and resizable (from the
//! left, right, and bottom edges), vets the pointer engine's resize stream
//! for known artifacts, and delivers normalized geometry-change events to
//! per-pane subscribers.
//!
//! It deliberately does *not* capture pointer input itself. Hosts wire
//! their own engine behind [`PointerEngine`], expose each pane behind
//! [`PanelSurface`], and pump engine events into a [`PaneManager`]:
//!
//! ```
//! use pane_wm::{
//!     PaneManager, PanelRect, PointerEvent, PointerEventKind, RecordingEngine, StyledPanel,
//! };
//!
//! let mut panes = PaneManager::new(RecordingEngine::new());
//! panes
//!     .attach(
//!         "scratch".to_string(),
//!         StyledPanel::with_rect(PanelRect::new(100.0, 50.0, 300.0, 200.0)),
//!         |delta| println!("moved by ({}, {})", delta.dx, delta.dy),
//!     )
//!     .unwrap();
//!
//! panes.handle_event(&PointerEvent::new(
//!     "scratch".to_string(),
//!     PointerEventKind::DragMove { dx: 10.0, dy: -5.0 },
//! ));
//! assert_eq!(panes.geometry(&"scratch".to_string()).unwrap().left, 110.0);
//! ```

pub mod binder;
pub mod constants;
pub mod engine;
pub mod geometry;
pub mod guard;
pub mod manager;
pub mod registry;
pub mod surface;
pub mod tracing_sub;

pub use binder::InteractionBinder;
pub use engine::{
    BindingSpec, DragRegion, EdgeShift, EngineError, FrameSize, Gesture, PointerEngine,
    PointerEvent, PointerEventKind, RecordingEngine, ResizeEdges,
};
pub use geometry::{Bounds, GeometryDelta, PanelRect};
pub use guard::{FrameVerdict, GuardPolicy, ResizeGuard};
pub use manager::{AttachError, PaneManager};
pub use registry::{ChangeCallback, ChangeRegistry, DispatchOutcome};
pub use surface::{PanelSurface, StyleProp, StyledPanel};
