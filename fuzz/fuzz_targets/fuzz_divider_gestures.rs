#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vidgrid_layout::{ContainerRect, LayoutEngine, LayoutId, PointerSample, SplitAxis};
use vidgrid_web::divider_pointer::{
    DividerPointerAdapter, DividerPointerButton, DividerPointerConfig, DividerTarget,
};

#[derive(Debug, Arbitrary)]
enum Gesture {
    Layout(u8),
    Reset,
    Down {
        target: u8,
        pointer_id: u8,
        button: i8,
        x: i16,
        y: i16,
    },
    Ack(u8),
    Move {
        pointer_id: u8,
        x: i16,
        y: i16,
    },
    Up {
        pointer_id: u8,
        x: i16,
        y: i16,
    },
    Cancel(Option<u8>),
    Leave(u8),
    Lost(u8),
    TouchStart {
        target: u8,
        fingers: u8,
        x: i16,
        y: i16,
    },
    TouchMove {
        x: i16,
        y: i16,
    },
    TouchEnd,
    Blur,
    Resize {
        width: i16,
        height: i16,
    },
}

fn target(code: u8) -> DividerTarget {
    match code % 3 {
        0 => DividerTarget::Single(SplitAxis::Horizontal),
        1 => DividerTarget::Single(SplitAxis::Vertical),
        _ => DividerTarget::Intersection,
    }
}

fn sample(x: i16, y: i16) -> PointerSample {
    PointerSample::new(f64::from(x), f64::from(y))
}

fuzz_target!(|gestures: Vec<Gesture>| {
    let mut engine = LayoutEngine::default();
    let mut adapter = DividerPointerAdapter::new(DividerPointerConfig::default());
    let mut container = ContainerRect::new(0.0, 60.0, 1280.0, 660.0);

    for gesture in gestures {
        match gesture {
            Gesture::Layout(raw) => {
                if let Ok(layout) = LayoutId::new(u32::from(raw % 10)) {
                    engine.apply_layout(layout);
                    let _ = adapter.detach();
                }
            }
            Gesture::Reset => {
                engine.reset_split();
                let _ = adapter.detach();
            }
            Gesture::Down {
                target: code,
                pointer_id,
                button,
                x,
                y,
            } => {
                let _ = adapter.pointer_down(
                    &mut engine,
                    target(code),
                    u32::from(pointer_id),
                    DividerPointerButton::from_dom(i16::from(button)),
                    sample(x, y),
                );
            }
            Gesture::Ack(pointer_id) => {
                let _ = adapter.capture_acquired(u32::from(pointer_id));
            }
            Gesture::Move { pointer_id, x, y } => {
                let _ = adapter.pointer_move(
                    &mut engine,
                    u32::from(pointer_id),
                    sample(x, y),
                    container,
                );
            }
            Gesture::Up { pointer_id, x, y } => {
                let _ = adapter.pointer_up(
                    &mut engine,
                    u32::from(pointer_id),
                    DividerPointerButton::Primary,
                    sample(x, y),
                );
            }
            Gesture::Cancel(pointer_id) => {
                let _ = adapter.pointer_cancel(&mut engine, pointer_id.map(u32::from));
            }
            Gesture::Leave(pointer_id) => {
                let _ = adapter.pointer_leave(&mut engine, u32::from(pointer_id));
            }
            Gesture::Lost(pointer_id) => {
                let _ = adapter.lost_pointer_capture(&mut engine, u32::from(pointer_id));
            }
            Gesture::TouchStart {
                target: code,
                fingers,
                x,
                y,
            } => {
                let _ = adapter.touch_start(
                    &mut engine,
                    target(code),
                    u32::from(fingers),
                    sample(x, y),
                );
            }
            Gesture::TouchMove { x, y } => {
                let _ = adapter.touch_move(&mut engine, sample(x, y), container);
            }
            Gesture::TouchEnd => {
                let _ = adapter.touch_end(&mut engine);
            }
            Gesture::Blur => {
                let _ = adapter.blur(&mut engine);
            }
            Gesture::Resize { width, height } => {
                container = ContainerRect::new(0.0, 60.0, f64::from(width), f64::from(height));
            }
        }

        // Post-conditions that must always hold:
        let split = engine.split();
        let bounds = engine.bounds();
        for axis in [SplitAxis::Horizontal, SplitAxis::Vertical] {
            let percent = split.get(axis);
            assert!(
                (bounds.min()..=bounds.max()).contains(&percent),
                "{axis} split {percent} escaped its bounds"
            );
        }
        assert_eq!(
            engine.is_dragging(),
            adapter.is_active(),
            "adapter and engine disagree"
        );
    }
});
