//! Interaction binder.
//!
//! Owns the pointer engine and the per-pane binding state, translates the
//! engine's raw move/resize stream into style mutations plus normalized
//! `GeometryDelta`s, and keeps every resize frame behind the guard. The
//! binder never talks to subscribers; routing a delta is the manager's job.

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::{BindingSpec, EngineError, Gesture, PointerEngine, PointerEventKind};
use crate::geometry::{GeometryDelta, clamp_within, translate};
use crate::guard::{GuardPolicy, ResizeGuard};
use crate::surface::PanelSurface;

/// Normalize a raw engine event into the delta shape subscribers see,
/// without consulting guard state or touching any surface. Used for events
/// that arrive after their pane is gone.
pub(crate) fn normalize_raw(kind: &PointerEventKind) -> Option<GeometryDelta> {
    match *kind {
        PointerEventKind::DragMove { dx, dy } => Some(GeometryDelta::move_only(dx, dy)),
        PointerEventKind::ResizeMove { rect, delta_rect } => Some(GeometryDelta::resize(
            delta_rect.left,
            delta_rect.top,
            rect.width,
            rect.height,
        )),
        PointerEventKind::GestureEnd { .. } => None,
    }
}

#[derive(Debug)]
struct Binding {
    spec: BindingSpec,
    guard: ResizeGuard,
    active_gesture: Option<Gesture>,
}

impl Binding {
    fn new(spec: BindingSpec, policy: GuardPolicy) -> Self {
        Self {
            spec,
            guard: ResizeGuard::new(policy),
            active_gesture: None,
        }
    }
}

/// Attaches and detaches engine behaviors per pane and applies vetted
/// events to the pane's surface.
pub struct InteractionBinder<H, E> {
    engine: E,
    bindings: BTreeMap<H, Binding>,
    policy: GuardPolicy,
}

impl<H, E> InteractionBinder<H, E>
where
    H: Clone + Ord + fmt::Debug,
    E: PointerEngine<H>,
{
    pub fn new(engine: E) -> Self {
        Self::with_policy(engine, GuardPolicy::default())
    }

    pub fn with_policy(engine: E, policy: GuardPolicy) -> Self {
        Self {
            engine,
            bindings: BTreeMap::new(),
            policy,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Install drag and resize behaviors for `handle`.
    ///
    /// Idempotent: a handle that is already bound is fully unbound first,
    /// so engine behaviors and guard history never accumulate across
    /// rebinds.
    pub fn bind(&mut self, handle: H, spec: BindingSpec) -> Result<(), EngineError> {
        if self.bindings.contains_key(&handle) {
            tracing::debug!(handle = ?handle, "rebinding already-bound pane");
            self.unbind(&handle);
        }
        self.engine.install(&handle, &spec)?;
        tracing::debug!(handle = ?handle, "bound pane interactions");
        self.bindings.insert(handle, Binding::new(spec, self.policy));
        Ok(())
    }

    /// Remove all behaviors for `handle`. Safe to call when unbound.
    pub fn unbind(&mut self, handle: &H) {
        if self.bindings.remove(handle).is_some() {
            self.engine.remove(handle);
            tracing::debug!(handle = ?handle, "unbound pane interactions");
        }
    }

    pub fn is_bound(&self, handle: &H) -> bool {
        self.bindings.contains_key(handle)
    }

    pub fn spec(&self, handle: &H) -> Option<&BindingSpec> {
        self.bindings.get(handle).map(|binding| &binding.spec)
    }

    /// Guard state for a bound pane, for diagnostics.
    pub fn guard(&self, handle: &H) -> Option<&ResizeGuard> {
        self.bindings.get(handle).map(|binding| &binding.guard)
    }

    /// Gesture currently in progress on a bound pane, if any.
    pub fn active_gesture(&self, handle: &H) -> Option<Gesture> {
        self.bindings
            .get(handle)
            .and_then(|binding| binding.active_gesture)
    }

    /// Apply one engine event for a bound pane to its surface.
    ///
    /// Returns the normalized change to forward to the subscriber, or
    /// `None` when the frame was filtered (or the handle is not bound —
    /// late events for unbound panes are the caller's concern).
    pub fn apply<S>(
        &mut self,
        handle: &H,
        surface: &mut S,
        kind: &PointerEventKind,
    ) -> Option<GeometryDelta>
    where
        S: PanelSurface + ?Sized,
    {
        let binding = self.bindings.get_mut(handle)?;
        match *kind {
            PointerEventKind::DragMove { dx, dy } => {
                binding.active_gesture = Some(Gesture::Drag);
                let rect = surface.rect();
                let (left, top) = translate(rect.left, rect.top, dx, dy);
                surface.apply_position(left, top);
                Some(GeometryDelta::move_only(dx, dy))
            }
            PointerEventKind::ResizeMove { rect, delta_rect } => {
                binding.active_gesture = Some(Gesture::Resize);
                if !binding.guard.admit(rect.width, rect.height).is_accepted() {
                    return None;
                }
                let current = surface.rect();
                // shifting the origin keeps left-edge resizes anchored
                let (left, top) = translate(current.left, current.top, delta_rect.left, delta_rect.top);
                surface.apply_position(left, top);
                surface.apply_size(rect.width, rect.height);
                Some(GeometryDelta::resize(
                    delta_rect.left,
                    delta_rect.top,
                    rect.width,
                    rect.height,
                ))
            }
            PointerEventKind::GestureEnd { gesture } => {
                binding.active_gesture = None;
                let bounds = surface.parent_bounds()?;
                let settled = surface.rect();
                let clamped = clamp_within(settled, bounds);
                if clamped == settled {
                    return None;
                }
                tracing::debug!(
                    handle = ?handle,
                    ?gesture,
                    "clamped pane back inside parent bounds"
                );
                surface.apply_rect(clamped);
                let dx = clamped.left - settled.left;
                let dy = clamped.top - settled.top;
                if clamped.width != settled.width || clamped.height != settled.height {
                    Some(GeometryDelta::resize(dx, dy, clamped.width, clamped.height))
                } else {
                    Some(GeometryDelta::move_only(dx, dy))
                }
            }
        }
    }
}
