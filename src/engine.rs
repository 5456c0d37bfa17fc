//! Pointer-interaction engine seam.
//!
//! Pointer capture and drag detection live outside this crate. A host
//! wires its engine (a DOM interaction library, an OS pointer layer, a
//! test script) to this trait: the binder installs and removes behaviors
//! through it, and the host pumps the engine's move/resize stream back in
//! as `PointerEvent`s.

use std::collections::BTreeMap;

use thiserror::Error;

/// Absolute frame size reported by a resize-move event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

/// Origin shift reported by a resize-move event. Non-zero when the gesture
/// grips the left (or, for engines that allow it, top) edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeShift {
    pub left: f64,
    pub top: f64,
}

/// Which continuous gesture a terminal event closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Drag,
    Resize,
}

/// One engine-native event, already attributed to a pane by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent<H> {
    pub target: H,
    pub kind: PointerEventKind,
}

impl<H> PointerEvent<H> {
    pub fn new(target: H, kind: PointerEventKind) -> Self {
        Self { target, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEventKind {
    /// One step of a move gesture.
    DragMove { dx: f64, dy: f64 },
    /// One step of a resize gesture.
    ResizeMove {
        rect: FrameSize,
        delta_rect: EdgeShift,
    },
    /// The pointer released; the named gesture is over.
    GestureEnd { gesture: Gesture },
}

/// Sub-region of a pane that accepts drag engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragRegion {
    /// The pane's title bar. Content clicks never start a move.
    #[default]
    Title,
}

/// Edges (and their corners) from which a resize gesture may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl ResizeEdges {
    /// Left, right, and bottom. The top edge stays reserved for the drag
    /// handle so a grip near the title bar is never ambiguous.
    pub fn sides_and_bottom() -> Self {
        Self {
            left: true,
            right: true,
            top: false,
            bottom: true,
        }
    }
}

impl Default for ResizeEdges {
    fn default() -> Self {
        Self::sides_and_bottom()
    }
}

/// What the binder asks the engine to install for one pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindingSpec {
    pub drag_region: DragRegion,
    pub resize_edges: ResizeEdges,
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine refused to install behaviors for the target.
    #[error("pointer engine rejected installation: {0}")]
    InstallRejected(String),
    /// The engine no longer knows an element for the target.
    #[error("pointer engine has no element for the target")]
    UnknownTarget,
}

pub trait PointerEngine<H> {
    fn install(&mut self, target: &H, spec: &BindingSpec) -> Result<(), EngineError>;
    fn remove(&mut self, target: &H);
    fn is_installed(&self, target: &H) -> bool;
}

impl<H, T: PointerEngine<H> + ?Sized> PointerEngine<H> for &mut T {
    fn install(&mut self, target: &H, spec: &BindingSpec) -> Result<(), EngineError> {
        (**self).install(target, spec)
    }

    fn remove(&mut self, target: &H) {
        (**self).remove(target)
    }

    fn is_installed(&self, target: &H) -> bool {
        (**self).is_installed(target)
    }
}

/// Engine command log entry, kept by `RecordingEngine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand<H> {
    Install(H),
    Remove(H),
}

/// An engine double that records install/remove traffic instead of
/// touching any real pointer layer. Hosts pump events straight into the
/// manager, so this is all tests and benches need.
#[derive(Debug, Default)]
pub struct RecordingEngine<H: Clone + Ord> {
    installed: BTreeMap<H, BindingSpec>,
    commands: Vec<EngineCommand<H>>,
    fail_next_install: bool,
}

impl<H: Clone + Ord> RecordingEngine<H> {
    pub fn new() -> Self {
        Self {
            installed: BTreeMap::new(),
            commands: Vec::new(),
            fail_next_install: false,
        }
    }

    /// Make the next `install` call fail, for exercising rollback paths.
    pub fn fail_next_install(&mut self) {
        self.fail_next_install = true;
    }

    pub fn spec_for(&self, target: &H) -> Option<&BindingSpec> {
        self.installed.get(target)
    }

    pub fn commands(&self) -> &[EngineCommand<H>] {
        &self.commands
    }

    pub fn installed_count(&self) -> usize {
        self.installed.len()
    }
}

impl<H: Clone + Ord> PointerEngine<H> for RecordingEngine<H> {
    fn install(&mut self, target: &H, spec: &BindingSpec) -> Result<(), EngineError> {
        if self.fail_next_install {
            self.fail_next_install = false;
            return Err(EngineError::InstallRejected("scripted failure".to_string()));
        }
        self.installed.insert(target.clone(), *spec);
        self.commands.push(EngineCommand::Install(target.clone()));
        Ok(())
    }

    fn remove(&mut self, target: &H) {
        if self.installed.remove(target).is_some() {
            self.commands.push(EngineCommand::Remove(target.clone()));
        }
    }

    fn is_installed(&self, target: &H) -> bool {
        self.installed.contains_key(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_engine_tracks_install_and_remove() {
        let mut engine: RecordingEngine<&str> = RecordingEngine::new();
        engine.install(&"w1", &BindingSpec::default()).unwrap();
        assert!(engine.is_installed(&"w1"));
        engine.remove(&"w1");
        assert!(!engine.is_installed(&"w1"));
        // removing an unknown target records nothing
        engine.remove(&"w1");
        assert_eq!(
            engine.commands(),
            &[
                EngineCommand::Install("w1"),
                EngineCommand::Remove("w1"),
            ]
        );
    }

    #[test]
    fn scripted_failure_consumes_itself() {
        let mut engine: RecordingEngine<&str> = RecordingEngine::new();
        engine.fail_next_install();
        assert!(engine.install(&"w1", &BindingSpec::default()).is_err());
        assert!(engine.install(&"w1", &BindingSpec::default()).is_ok());
    }

    #[test]
    fn default_edges_reserve_the_top() {
        let edges = ResizeEdges::default();
        assert!(edges.left && edges.right && edges.bottom);
        assert!(!edges.top);
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut engine: RecordingEngine<&str> = RecordingEngine::new();
        let mut engine_ref = &mut engine;
        engine_ref.install(&"w1", &BindingSpec::default()).unwrap();
        assert!(engine_ref.is_installed(&"w1"));
        assert_eq!(engine.installed_count(), 1);
    }
}
