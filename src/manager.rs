//! Pane lifecycle orchestration.
//!
//! `PaneManager` is the caller-facing surface of the crate: it owns the
//! pane surfaces, the interaction binder (and through it the pointer
//! engine), and the change registry, and keeps the three consistent as
//! panes come and go.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::binder::{InteractionBinder, normalize_raw};
use crate::engine::{BindingSpec, EngineError, PointerEngine, PointerEvent};
use crate::geometry::{GeometryDelta, PanelRect};
use crate::guard::GuardPolicy;
use crate::registry::{ChangeRegistry, DispatchOutcome};
use crate::surface::PanelSurface;

#[derive(Debug, Error)]
pub enum AttachError {
    /// The pointer engine refused to install behaviors. The registry entry
    /// and the surface are rolled back; the caller observes no partial
    /// state.
    #[error("pointer engine rejected the binding: {0}")]
    Engine(#[from] EngineError),
}

/// Owner and orchestrator of managed panes.
///
/// Generic over the handle type `H`, the surface type `S`, and the engine
/// `E`, so independent managers (with independent registries) can coexist
/// and tests can run against in-memory doubles.
pub struct PaneManager<H, S, E> {
    surfaces: BTreeMap<H, S>,
    binder: InteractionBinder<H, E>,
    registry: ChangeRegistry<H>,
}

impl<H, S, E> PaneManager<H, S, E>
where
    H: Clone + Ord + fmt::Debug,
    S: PanelSurface,
    E: PointerEngine<H>,
{
    pub fn new(engine: E) -> Self {
        Self::with_policy(engine, GuardPolicy::default())
    }

    /// Build a manager whose bindings vet resize frames under `policy`.
    pub fn with_policy(engine: E, policy: GuardPolicy) -> Self {
        Self {
            surfaces: BTreeMap::new(),
            binder: InteractionBinder::with_policy(engine, policy),
            registry: ChangeRegistry::new(),
        }
    }

    /// Register `on_change` and bind interactions for a pane, atomically
    /// from the caller's perspective: if the engine rejects the binding,
    /// the registry entry is rolled back and the surface is not retained.
    ///
    /// Uses the default binding (drag from the title region, resize from
    /// the left/right/bottom edges). Attaching a handle that is already
    /// attached rebinds it (the prior surface and subscriber are replaced,
    /// never duplicated).
    pub fn attach<F>(&mut self, handle: H, surface: S, on_change: F) -> Result<(), AttachError>
    where
        F: FnMut(&GeometryDelta) + 'static,
    {
        self.attach_with_spec(handle, surface, BindingSpec::default(), on_change)
    }

    /// `attach` with an explicit binding spec.
    pub fn attach_with_spec<F>(
        &mut self,
        handle: H,
        surface: S,
        spec: BindingSpec,
        on_change: F,
    ) -> Result<(), AttachError>
    where
        F: FnMut(&GeometryDelta) + 'static,
    {
        self.registry.register(handle.clone(), Box::new(on_change));
        if let Err(err) = self.binder.bind(handle.clone(), spec) {
            self.registry.unregister(&handle);
            self.surfaces.remove(&handle);
            return Err(err.into());
        }
        self.surfaces.insert(handle, surface);
        Ok(())
    }

    /// Tear a pane down: unbind interactions first, then unregister the
    /// subscriber, so a late in-flight event can no longer dispatch to it.
    /// Returns the surface for the caller to discard or reuse; `None` when
    /// the handle was not attached.
    pub fn detach(&mut self, handle: &H) -> Option<S> {
        self.binder.unbind(handle);
        self.registry.unregister(handle);
        self.surfaces.remove(handle)
    }

    /// Feed one engine event through the pipeline: binder normalizes and
    /// applies it to the pane's surface, then the registry routes the
    /// resulting change to the subscriber.
    ///
    /// Returns `None` when the event produced no change to deliver (a
    /// guarded-out frame, or a gesture end that needed no correction);
    /// otherwise the dispatch outcome. Events for detached panes mutate
    /// nothing and surface as `NoSubscriber`.
    pub fn handle_event(&mut self, event: &PointerEvent<H>) -> Option<DispatchOutcome> {
        let delta = match self.surfaces.get_mut(&event.target) {
            Some(surface) => self.binder.apply(&event.target, surface, &event.kind)?,
            // Late event for a pane that no longer exists: normalize it
            // without touching anything so the drop is still accounted for.
            None => normalize_raw(&event.kind)?,
        };
        Some(self.registry.dispatch(&event.target, &delta))
    }

    pub fn is_attached(&self, handle: &H) -> bool {
        self.surfaces.contains_key(handle)
    }

    pub fn attached_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Read access to a managed pane's surface.
    pub fn surface(&self, handle: &H) -> Option<&S> {
        self.surfaces.get(handle)
    }

    /// Parsed current geometry of a managed pane.
    pub fn geometry(&self, handle: &H) -> Option<PanelRect> {
        self.surfaces.get(handle).map(PanelSurface::rect)
    }

    /// Resize frames rejected by the pane's guard so far.
    pub fn rejected_frames(&self, handle: &H) -> Option<u64> {
        self.binder
            .guard(handle)
            .map(|guard| guard.rejected_frames())
    }

    /// Changes delivered to subscribers across all panes.
    pub fn delivered_changes(&self) -> u64 {
        self.registry.delivered()
    }

    /// Changes dropped for lack of a subscriber across all panes.
    pub fn dropped_changes(&self) -> u64 {
        self.registry.dropped()
    }

    pub fn engine(&self) -> &E {
        self.binder.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.binder.engine_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::engine::{EdgeShift, FrameSize, PointerEventKind, RecordingEngine, ResizeEdges};
    use crate::surface::StyledPanel;

    type Manager = PaneManager<&'static str, StyledPanel, RecordingEngine<&'static str>>;

    fn manager() -> Manager {
        PaneManager::new(RecordingEngine::new())
    }

    fn sink() -> (Rc<RefCell<Vec<GeometryDelta>>>, impl FnMut(&GeometryDelta)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let writer = Rc::clone(&seen);
        (seen, move |delta: &GeometryDelta| {
            writer.borrow_mut().push(*delta)
        })
    }

    #[test]
    fn attach_binds_and_registers() {
        let mut manager = manager();
        let (_, on_change) = sink();
        manager
            .attach(
                "w1",
                StyledPanel::with_rect(PanelRect::new(0.0, 0.0, 100.0, 100.0)),
                on_change,
            )
            .unwrap();
        assert!(manager.is_attached(&"w1"));
        assert!(manager.engine().is_installed(&"w1"));
    }

    #[test]
    fn failed_attach_leaves_no_partial_state() {
        let mut manager = manager();
        manager.engine_mut().fail_next_install();
        let (_, on_change) = sink();
        let result = manager.attach(
            "w1",
            StyledPanel::new(),
            on_change,
        );
        assert!(matches!(result, Err(AttachError::Engine(_))));
        assert!(!manager.is_attached(&"w1"));
        assert!(!manager.engine().is_installed(&"w1"));

        // the event stream treats the pane as never attached
        let outcome = manager.handle_event(&PointerEvent::new(
            "w1",
            PointerEventKind::DragMove { dx: 1.0, dy: 1.0 },
        ));
        assert_eq!(outcome, Some(DispatchOutcome::NoSubscriber));
    }

    #[test]
    fn drag_event_flows_to_subscriber() {
        let mut manager = manager();
        let (seen, on_change) = sink();
        manager
            .attach(
                "w1",
                StyledPanel::with_rect(PanelRect::new(100.0, 50.0, 300.0, 200.0)),
                on_change,
            )
            .unwrap();

        let outcome = manager.handle_event(&PointerEvent::new(
            "w1",
            PointerEventKind::DragMove { dx: 10.0, dy: -5.0 },
        ));
        assert_eq!(outcome, Some(DispatchOutcome::Delivered));
        assert_eq!(
            manager.geometry(&"w1"),
            Some(PanelRect::new(110.0, 45.0, 300.0, 200.0))
        );
        assert_eq!(seen.borrow().as_slice(), &[GeometryDelta::move_only(10.0, -5.0)]);
    }

    #[test]
    fn filtered_resize_frame_reaches_no_one() {
        let mut manager = manager();
        let (seen, on_change) = sink();
        let start = PanelRect::new(100.0, 50.0, 300.0, 200.0);
        manager
            .attach(
                "w1",
                StyledPanel::with_rect(start),
                on_change,
            )
            .unwrap();

        let outcome = manager.handle_event(&PointerEvent::new(
            "w1",
            PointerEventKind::ResizeMove {
                rect: FrameSize {
                    width: 0.0,
                    height: 80.0,
                },
                delta_rect: EdgeShift::default(),
            },
        ));
        assert_eq!(outcome, None);
        assert_eq!(manager.geometry(&"w1"), Some(start));
        assert!(seen.borrow().is_empty());
        assert_eq!(manager.rejected_frames(&"w1"), Some(1));
    }

    #[test]
    fn detach_then_event_drops_without_mutation() {
        let mut manager = manager();
        let (seen, on_change) = sink();
        manager
            .attach(
                "w1",
                StyledPanel::with_rect(PanelRect::new(0.0, 0.0, 300.0, 200.0)),
                on_change,
            )
            .unwrap();
        let surface = manager.detach(&"w1").expect("surface returned");

        let outcome = manager.handle_event(&PointerEvent::new(
            "w1",
            PointerEventKind::ResizeMove {
                rect: FrameSize {
                    width: 280.0,
                    height: 190.0,
                },
                delta_rect: EdgeShift::default(),
            },
        ));
        assert_eq!(outcome, Some(DispatchOutcome::NoSubscriber));
        assert_eq!(manager.dropped_changes(), 1);
        assert!(seen.borrow().is_empty());
        // the returned surface kept its pre-detach geometry
        assert_eq!(surface.rect(), PanelRect::new(0.0, 0.0, 300.0, 200.0));
    }

    #[test]
    fn attach_with_spec_reaches_the_engine() {
        let mut manager = manager();
        let (_, on_change) = sink();
        let spec = BindingSpec {
            resize_edges: ResizeEdges {
                left: false,
                right: true,
                top: false,
                bottom: true,
            },
            ..BindingSpec::default()
        };
        manager
            .attach_with_spec("w1", StyledPanel::new(), spec, on_change)
            .unwrap();
        assert_eq!(manager.engine().spec_for(&"w1"), Some(&spec));
    }

    #[test]
    fn detach_unknown_handle_is_a_noop() {
        let mut manager = manager();
        assert!(manager.detach(&"w1").is_none());
    }

    #[test]
    fn reattach_replaces_subscriber_and_binding() {
        let mut manager = manager();
        let (first_seen, first) = sink();
        let (second_seen, second) = sink();
        manager
            .attach("w1", StyledPanel::new(), first)
            .unwrap();
        manager
            .attach("w1", StyledPanel::new(), second)
            .unwrap();
        assert_eq!(manager.attached_count(), 1);

        manager.handle_event(&PointerEvent::new(
            "w1",
            PointerEventKind::DragMove { dx: 1.0, dy: 2.0 },
        ));
        assert!(first_seen.borrow().is_empty());
        assert_eq!(second_seen.borrow().len(), 1);
    }
}
