#![forbid(unsafe_code)]

//! End-to-end flows through the runner core with scripted media surfaces.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use vidgrid_layout::{ContainerRect, DragPhase, PointerSample, SplitAxis};
use vidgrid_media::testing::{ScriptedSurface, SurfaceCall};
use vidgrid_media::{PlaybackError, SlotId, SyncAction, SyncButtonLabel};
use vidgrid_web::{
    DividerCaptureCommand, DividerPointerButton, DividerTarget, GridConfig, GridRunnerCore,
};

const PRIMARY: DividerPointerButton = DividerPointerButton::Primary;

fn runner_with(surfaces: [ScriptedSurface; 8]) -> GridRunnerCore<ScriptedSurface> {
    let mut core =
        GridRunnerCore::new(GridConfig::default(), surfaces).expect("default config is valid");
    core.set_container_rect(ContainerRect::new(0.0, 60.0, 1200.0, 800.0));
    core
}

fn runner() -> GridRunnerCore<ScriptedSurface> {
    runner_with(std::array::from_fn(|_| ScriptedSurface::new()))
}

fn slot(n: u32) -> SlotId {
    SlotId::new(n).expect("valid slot")
}

fn pause_at(core: &mut GridRunnerCore<ScriptedSurface>, n: u32, position: f64) {
    let surface = core.deck_mut().slot_mut(slot(n)).surface_mut();
    surface.playing = false;
    surface.position = position;
    surface.clear_calls();
}

#[test]
fn three_videos_sync_to_the_furthest_position() {
    let mut core = runner();
    core.apply_layout(3).expect("valid layout");
    for n in 1..=3 {
        core.load_file(n, format!("take{n}.webm"))
            .expect("load should succeed");
    }
    for (n, position) in [(1, 10.0), (2, 25.0), (3, 5.0)] {
        pause_at(&mut core, n, position);
    }

    let played = core.toggle_sync();
    assert_eq!(
        played.action,
        SyncAction::Played {
            reference_time: 25.0
        }
    );
    assert_eq!(played.label, SyncButtonLabel::PauseAll);
    for n in 1..=3 {
        assert_eq!(
            core.deck().slot(slot(n)).surface().calls(),
            &[SurfaceCall::Seek(25.0), SurfaceCall::Play]
        );
    }

    let paused = core.toggle_sync();
    assert_eq!(paused.action, SyncAction::Paused);
    assert_eq!(paused.label.text(), "Sync Play");
}

#[test]
fn slot_hidden_by_layout_switch_leaves_the_sync_set() {
    let mut core = runner();
    core.apply_layout(4).expect("valid layout");
    for n in 1..=4 {
        core.load_file(n, format!("clip{n}.mp4"))
            .expect("load should succeed");
        pause_at(&mut core, n, f64::from(n));
    }
    core.apply_layout(2).expect("valid layout");

    let report = core.toggle_sync();
    assert_eq!(report.slots, vec![slot(1), slot(2)]);
    assert_eq!(report.action, SyncAction::Played { reference_time: 2.0 });
    assert!(core.deck().slot(slot(4)).surface().calls().is_empty());
}

#[test]
fn release_far_outside_the_container_ends_the_drag() {
    let mut core = runner();
    core.apply_layout(4).expect("valid layout");
    let down = core.divider_pointer_down(
        DividerTarget::Single(SplitAxis::Vertical),
        3,
        PRIMARY,
        PointerSample::new(600.0, 460.0),
    );
    assert_eq!(
        down.capture_command,
        Some(DividerCaptureCommand::Acquire { pointer_id: 3 })
    );
    core.capture_acquired(3);

    core.pointer_move(3, PointerSample::new(600.0, -4000.0));
    assert_eq!(core.engine().split().row_split(), 10.0);
    let up = core.pointer_up(3, PRIMARY, PointerSample::new(-9000.0, 9000.0));
    assert_eq!(
        up.capture_command,
        Some(DividerCaptureCommand::Release { pointer_id: 3 })
    );
    assert_eq!(core.engine().drag_phase(SplitAxis::Vertical), DragPhase::Idle);
    assert_eq!(core.engine().split().row_split(), 10.0);
    assert_eq!(
        core.presentation().template_rows,
        "10% 90%",
        "the released split stays in effect"
    );
}

#[test]
fn degenerate_container_never_moves_the_split() {
    let mut core = runner();
    core.set_container_rect(ContainerRect::new(0.0, 0.0, 0.0, 0.0));
    core.divider_pointer_down(
        DividerTarget::Single(SplitAxis::Horizontal),
        1,
        PRIMARY,
        PointerSample::new(0.0, 0.0),
    );
    let moved = core.pointer_move(1, PointerSample::new(100.0, 0.0));
    assert!(!moved.split_changed());
    assert_eq!(core.engine().split().column_split(), 50.0);
    assert!(core.engine().is_dragging());
}

#[test]
fn touch_and_mouse_drive_the_same_split() {
    let mut mouse = runner();
    mouse.divider_pointer_down(
        DividerTarget::Single(SplitAxis::Horizontal),
        1,
        PRIMARY,
        PointerSample::new(600.0, 100.0),
    );
    mouse.pointer_move(1, PointerSample::new(420.0, 100.0));
    mouse.pointer_up(1, PRIMARY, PointerSample::new(420.0, 100.0));

    let mut touch = runner();
    touch.divider_touch_start(
        DividerTarget::Single(SplitAxis::Horizontal),
        1,
        PointerSample::new(600.0, 100.0),
    );
    touch.touch_move(PointerSample::new(420.0, 100.0));
    touch.touch_end();

    assert_eq!(mouse.presentation(), touch.presentation());
    assert_eq!(mouse.engine().split().column_split(), 35.0);
}

#[test]
fn blur_mid_drag_cancels_and_releases_capture() {
    let mut core = runner();
    core.divider_pointer_down(
        DividerTarget::Single(SplitAxis::Horizontal),
        12,
        PRIMARY,
        PointerSample::new(600.0, 100.0),
    );
    core.capture_acquired(12);
    let blur = core.blur();
    assert_eq!(
        blur.capture_command,
        Some(DividerCaptureCommand::Release { pointer_id: 12 })
    );
    assert!(!core.engine().is_dragging());
    assert!(!core.is_divider_input_active());
}

#[test]
fn mute_toggle_reaches_every_loaded_slot() {
    let mut core = runner();
    core.apply_layout(8).expect("valid layout");
    for n in [1, 5, 8] {
        core.load_file(n, format!("{n}.mp4")).expect("load should succeed");
    }
    let report = core.toggle_mute_all();
    assert!(!report.muted);
    assert_eq!(report.applied, vec![slot(1), slot(5), slot(8)]);
    assert_eq!(report.label.text(), "Mute All");
    let again = core.toggle_mute_all();
    assert!(again.muted);
    assert_eq!(again.label.text(), "Unmute All");
}

// ---------------------------------------------------------------------------
// Tracing capture
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct EventCapture {
    level: tracing::Level,
    messages: Arc<Mutex<Vec<String>>>,
}

impl EventCapture {
    fn at(level: tracing::Level) -> Self {
        Self {
            level,
            messages: Arc::default(),
        }
    }

    fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("capture lock poisoned").clone()
    }
}

struct MessageVisitor(Option<String>);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if *event.metadata().level() != self.level {
            return;
        }
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.messages
                .lock()
                .expect("capture lock poisoned")
                .push(message);
        }
    }
}

#[test]
fn layout_switch_emits_one_debug_event() {
    let capture = EventCapture::at(tracing::Level::DEBUG);
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut core = runner();
        core.apply_layout(4).expect("four slots is a valid layout");
    });

    let applied = capture
        .messages()
        .into_iter()
        .filter(|message| message.contains("layout applied"))
        .count();
    assert_eq!(applied, 1);
}

#[test]
fn blocked_autoplay_is_logged_as_a_warning() {
    let capture = EventCapture::at(tracing::Level::WARN);
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut surfaces: [ScriptedSurface; 8] = std::array::from_fn(|_| ScriptedSurface::new());
        surfaces[0] = ScriptedSurface::new()
            .rejecting_play(PlaybackError::NotAllowed("user gesture required".to_string()));
        let mut core = runner_with(surfaces);
        core.load_file(1, "blocked.mp4".to_string())
            .expect("load should succeed");
        assert!(core.deck().slot(slot(1)).has_manual_controls());
        assert!(core.deck().slot(slot(1)).surface().controls);
    });

    let messages = capture.messages();
    assert!(
        messages
            .iter()
            .any(|message| message.contains("play rejected")),
        "expected a play rejection warning, got: {messages:?}"
    );
}

// ---------------------------------------------------------------------------
// Gesture streams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Gesture {
    Down { target: u8, pointer_id: u32 },
    Ack { pointer_id: u32 },
    Move { pointer_id: u32, x: f64, y: f64 },
    Up { pointer_id: u32, x: f64, y: f64 },
    TouchStart { target: u8, touches: u32 },
    TouchMove { x: f64, y: f64 },
    TouchEnd,
    Layout(u32),
    Reset,
    Blur,
}

fn target(raw: u8) -> DividerTarget {
    match raw % 3 {
        0 => DividerTarget::Single(SplitAxis::Horizontal),
        1 => DividerTarget::Single(SplitAxis::Vertical),
        _ => DividerTarget::Intersection,
    }
}

fn gesture() -> impl Strategy<Value = Gesture> {
    let coord = -3000.0f64..3000.0;
    prop_oneof![
        (any::<u8>(), 1u32..4)
            .prop_map(|(target, pointer_id)| Gesture::Down { target, pointer_id }),
        (1u32..4).prop_map(|pointer_id| Gesture::Ack { pointer_id }),
        (1u32..4, coord.clone(), coord.clone())
            .prop_map(|(pointer_id, x, y)| Gesture::Move { pointer_id, x, y }),
        (1u32..4, coord.clone(), coord.clone())
            .prop_map(|(pointer_id, x, y)| Gesture::Up { pointer_id, x, y }),
        (any::<u8>(), 0u32..3)
            .prop_map(|(target, touches)| Gesture::TouchStart { target, touches }),
        (coord.clone(), coord).prop_map(|(x, y)| Gesture::TouchMove { x, y }),
        Just(Gesture::TouchEnd),
        (1u32..=8).prop_map(Gesture::Layout),
        Just(Gesture::Reset),
        Just(Gesture::Blur),
    ]
}

fn play(core: &mut GridRunnerCore<ScriptedSurface>, gesture: &Gesture) {
    match *gesture {
        Gesture::Down { target: raw, pointer_id } => {
            core.divider_pointer_down(
                target(raw),
                pointer_id,
                PRIMARY,
                PointerSample::new(600.0, 460.0),
            );
        }
        Gesture::Ack { pointer_id } => {
            core.capture_acquired(pointer_id);
        }
        Gesture::Move { pointer_id, x, y } => {
            core.pointer_move(pointer_id, PointerSample::new(x, y));
        }
        Gesture::Up { pointer_id, x, y } => {
            core.pointer_up(pointer_id, PRIMARY, PointerSample::new(x, y));
        }
        Gesture::TouchStart { target: raw, touches } => {
            core.divider_touch_start(target(raw), touches, PointerSample::new(600.0, 460.0));
        }
        Gesture::TouchMove { x, y } => {
            core.touch_move(PointerSample::new(x, y));
        }
        Gesture::TouchEnd => {
            core.touch_end();
        }
        Gesture::Layout(n) => {
            core.apply_layout(n).expect("1..=8 is valid");
        }
        Gesture::Reset => {
            core.reset_split();
        }
        Gesture::Blur => {
            core.blur();
        }
    }
}

proptest! {
    #[test]
    fn splits_stay_clamped_and_input_state_matches_engine(
        gestures in prop::collection::vec(gesture(), 0..64)
    ) {
        let mut core = runner();
        for gesture in &gestures {
            play(&mut core, gesture);
            let split = core.engine().split();
            prop_assert!((10.0..=90.0).contains(&split.column_split()));
            prop_assert!((10.0..=90.0).contains(&split.row_split()));
            prop_assert_eq!(core.engine().is_dragging(), core.is_divider_input_active());
            for axis in SplitAxis::ALL {
                if core.engine().drag_phase(axis) == DragPhase::Dragging {
                    prop_assert!(core.engine().is_divider_visible(axis));
                }
            }
        }
        core.reset_split();
        prop_assert_eq!(core.engine().split().column_split(), 50.0);
        prop_assert_eq!(core.engine().split().row_split(), 50.0);
        prop_assert!(!core.engine().is_dragging());
    }
}
