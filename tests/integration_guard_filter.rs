use std::cell::RefCell;
use std::rc::Rc;

use pane_wm::{
    EdgeShift, FrameSize, GeometryDelta, GuardPolicy, PaneManager, PanelRect,
    PointerEvent, PointerEventKind, RecordingEngine, StyledPanel,
};

type Manager = PaneManager<&'static str, StyledPanel, RecordingEngine<&'static str>>;

fn manager() -> Manager {
    PaneManager::new(RecordingEngine::new())
}

fn collecting() -> (Rc<RefCell<Vec<GeometryDelta>>>, impl FnMut(&GeometryDelta)) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let writer = Rc::clone(&seen);
    (seen, move |delta: &GeometryDelta| {
        writer.borrow_mut().push(*delta)
    })
}

fn resize(target: &'static str, width: f64, height: f64) -> PointerEvent<&'static str> {
    PointerEvent::new(
        target,
        PointerEventKind::ResizeMove {
            rect: FrameSize { width, height },
            delta_rect: EdgeShift::default(),
        },
    )
}

#[test]
fn zero_dimension_frames_never_surface() {
    let mut panes = manager();
    let (seen, on_change) = collecting();
    let start = PanelRect::new(100.0, 50.0, 300.0, 200.0);
    panes
        .attach("w1", StyledPanel::with_rect(start), on_change)
        .unwrap();

    assert_eq!(panes.handle_event(&resize("w1", 0.0, 80.0)), None);
    assert_eq!(panes.handle_event(&resize("w1", 280.0, 0.0)), None);

    assert_eq!(panes.geometry(&"w1"), Some(start));
    assert!(seen.borrow().is_empty());
    assert_eq!(panes.rejected_frames(&"w1"), Some(2));
}

#[test]
fn tiny_height_right_after_a_real_resize_is_debounced() {
    let mut panes = manager();
    let (seen, on_change) = collecting();
    panes
        .attach(
            "w1",
            StyledPanel::with_rect(PanelRect::new(0.0, 0.0, 300.0, 200.0)),
            on_change,
        )
        .unwrap();

    // the user's resize lands at 250px tall
    assert!(panes.handle_event(&resize("w1", 300.0, 250.0)).is_some());
    // the engine's trailing artifact reports 40px; it must vanish
    assert_eq!(panes.handle_event(&resize("w1", 300.0, 40.0)), None);
    assert_eq!(panes.geometry(&"w1").unwrap().height, 250.0);

    // a genuine follow-up above the threshold still lands
    assert!(panes.handle_event(&resize("w1", 300.0, 150.0)).is_some());
    assert_eq!(panes.geometry(&"w1").unwrap().height, 150.0);

    let heights: Vec<Option<f64>> = seen.borrow().iter().map(|d| d.new_height).collect();
    assert_eq!(heights, vec![Some(250.0), Some(150.0)]);
}

#[test]
fn panes_that_start_small_keep_working() {
    let mut panes = manager();
    let (seen, on_change) = collecting();
    panes
        .attach(
            "w1",
            StyledPanel::with_rect(PanelRect::new(0.0, 0.0, 200.0, 60.0)),
            on_change,
        )
        .unwrap();

    // first layout is well under the threshold and must not be blocked
    assert!(panes.handle_event(&resize("w1", 200.0, 60.0)).is_some());
    // growing while still under the threshold works too
    assert!(panes.handle_event(&resize("w1", 200.0, 80.0)).is_some());
    assert_eq!(panes.geometry(&"w1").unwrap().height, 80.0);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn guard_history_is_per_pane() {
    let mut panes = manager();
    let (_, on_a) = collecting();
    let (_, on_b) = collecting();
    panes
        .attach("a", StyledPanel::new(), on_a)
        .unwrap();
    panes
        .attach("b", StyledPanel::new(), on_b)
        .unwrap();

    // a large accepted height on "a" must not poison "b"
    assert!(panes.handle_event(&resize("a", 300.0, 400.0)).is_some());
    assert!(panes.handle_event(&resize("b", 200.0, 50.0)).is_some());
    assert_eq!(panes.rejected_frames(&"b"), Some(0));
}

#[test]
fn custom_guard_policy_applies_to_every_binding() {
    let mut panes: Manager =
        PaneManager::with_policy(RecordingEngine::new(), GuardPolicy { min_height: 30.0 });
    let (seen, on_change) = collecting();
    panes
        .attach("w1", StyledPanel::new(), on_change)
        .unwrap();

    assert!(panes.handle_event(&resize("w1", 300.0, 200.0)).is_some());
    // 50px would be debounced under the default 100px policy
    assert!(panes.handle_event(&resize("w1", 300.0, 50.0)).is_some());
    assert_eq!(panes.handle_event(&resize("w1", 300.0, 20.0)), None);
    assert_eq!(seen.borrow().len(), 2);
}
