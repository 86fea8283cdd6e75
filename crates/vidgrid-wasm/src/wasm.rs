#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the GridRunner.
//!
//! Wraps [`GridRunnerCore`] over the page's `<video>` elements. Every call
//! that can change the layout re-applies the presentation to the DOM before
//! returning. Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use vidgrid_layout::{ContainerRect, PointerSample};
use vidgrid_web::divider_pointer::{
    DividerCaptureCommand, DividerDispatch, DividerLogOutcome, DividerPointerButton,
};
use vidgrid_web::{GridConfig, GridRunnerCore};

use crate::dom::{RejectionQueue, VideoSurface, apply_presentation, document};
use crate::style::divider_target_from_u8;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn optional_u32(value: Option<u32>) -> JsValue {
    value.map_or(JsValue::NULL, |v| JsValue::from_f64(f64::from(v)))
}

/// Serialize a report through JSON so field names match the native logs.
fn report_to_js<T: Serialize>(report: &T) -> JsValue {
    match serde_json::to_string(report) {
        Ok(json) => js_sys::JSON::parse(&json).unwrap_or(JsValue::NULL),
        Err(err) => {
            console_error(&format!("report serialization failed: {err}"));
            JsValue::NULL
        }
    }
}

fn capture_command_to_js(command: Option<DividerCaptureCommand>) -> JsValue {
    let Some(command) = command else {
        return JsValue::NULL;
    };
    let (kind, pointer_id) = match command {
        DividerCaptureCommand::Acquire { pointer_id } => ("acquire", pointer_id),
        DividerCaptureCommand::Release { pointer_id } => ("release", pointer_id),
    };
    let obj = Object::new();
    set_js(&obj, "kind", JsValue::from_str(kind));
    set_js(&obj, "pointer_id", JsValue::from_f64(f64::from(pointer_id)));
    obj.into()
}

fn dispatch_to_js(dispatch: &DividerDispatch, active_pointer_id: Option<u32>) -> JsValue {
    let obj = Object::new();
    let log = &dispatch.log;
    set_js(&obj, "phase", JsValue::from_str(log.phase.as_str()));
    set_js(
        &obj,
        "sequence",
        log.sequence
            .map_or(JsValue::NULL, |seq| JsValue::from_f64(seq as f64)),
    );
    set_js(&obj, "pointer_id", optional_u32(log.pointer_id));
    set_js(
        &obj,
        "target",
        log.target
            .map_or(JsValue::NULL, |target| JsValue::from_str(target.label())),
    );
    set_js(
        &obj,
        "capture_command",
        capture_command_to_js(dispatch.capture_command),
    );
    set_js(&obj, "prevent_default", dispatch.prevent_default.into());
    set_js(&obj, "split_changed", dispatch.split_changed().into());
    match log.outcome {
        DividerLogOutcome::Forwarded => {
            set_js(&obj, "outcome", JsValue::from_str("forwarded"));
            set_js(&obj, "ignored_reason", JsValue::NULL);
        }
        DividerLogOutcome::CaptureStateUpdated => {
            set_js(&obj, "outcome", JsValue::from_str("capture_state_updated"));
            set_js(&obj, "ignored_reason", JsValue::NULL);
        }
        DividerLogOutcome::Ignored(reason) => {
            set_js(&obj, "outcome", JsValue::from_str("ignored"));
            set_js(&obj, "ignored_reason", JsValue::from_str(reason.as_str()));
        }
    }
    set_js(&obj, "active_pointer_id", optional_u32(active_pointer_id));
    obj.into()
}

fn rejected_dispatch(reason: &str) -> JsValue {
    let obj = Object::new();
    set_js(&obj, "outcome", JsValue::from_str("ignored"));
    set_js(&obj, "ignored_reason", JsValue::from_str(reason));
    set_js(&obj, "capture_command", JsValue::NULL);
    set_js(&obj, "prevent_default", false.into());
    obj.into()
}

/// Host-driven: JavaScript wires DOM listeners to these methods and performs
/// the returned capture commands itself.
#[wasm_bindgen]
pub struct GridRunner {
    inner: GridRunnerCore<VideoSurface>,
    rejections: RejectionQueue,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl GridRunner {
    /// Bind to the page's `player1`..`player8` elements.
    ///
    /// `config_json` overrides [`GridConfig`] fields; invalid JSON falls back
    /// to defaults and says so in the logs.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GridRunner, JsValue> {
        install_panic_hook();
        let mut notes = Vec::new();
        let config = match config_json.as_deref().map(GridConfig::from_json) {
            None => GridConfig::default(),
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                tracing::warn!("invalid grid config, using defaults: {err}");
                notes.push(format!("config outcome=defaults error={err}"));
                GridConfig::default()
            }
        };

        let document = document()?;
        let rejections: RejectionQueue = Rc::new(RefCell::new(Vec::new()));
        let surfaces = VideoSurface::find_all(&document, &rejections)?;
        let inner = GridRunnerCore::new(config, surfaces)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let mut runner = Self { inner, rejections };
        runner.inner.extend_logs(notes);
        runner.apply_presentation();
        Ok(runner)
    }

    fn drain_rejections(&mut self) {
        let pending: Vec<_> = self.rejections.borrow_mut().drain(..).collect();
        for (slot, error) in pending {
            self.inner.report_play_rejected(slot, &error);
        }
    }

    fn dispatch(&mut self, dispatch: DividerDispatch) -> JsValue {
        if dispatch.split_changed() || !dispatch.transitions.is_empty() {
            self.apply_presentation();
        }
        dispatch_to_js(&dispatch, self.inner.active_pointer_id())
    }

    /// Write the current presentation into the DOM; returns the number of
    /// writes applied.
    #[wasm_bindgen(js_name = applyPresentation)]
    pub fn apply_presentation(&mut self) -> u32 {
        match document() {
            Ok(document) => {
                let applied = apply_presentation(&document, &self.inner.presentation());
                u32::try_from(applied).unwrap_or(u32::MAX)
            }
            Err(_) => 0,
        }
    }

    /// Switch to a 1..=8 slot layout. Returns `{ layout, visible_slots,
    /// canceled, capture_command }` or `null` for an unsupported count.
    #[wasm_bindgen(js_name = applyLayout)]
    pub fn apply_layout(&mut self, slot_count: u32) -> JsValue {
        self.drain_rejections();
        let Ok(switch) = self.inner.apply_layout(slot_count) else {
            return JsValue::NULL;
        };
        self.apply_presentation();
        let obj = Object::new();
        set_js(&obj, "layout", JsValue::from_f64(switch.layout.slot_count() as f64));
        set_js(
            &obj,
            "visible_slots",
            JsValue::from_f64(switch.visible_slots as f64),
        );
        set_js(&obj, "canceled", (!switch.canceled.is_empty()).into());
        set_js(
            &obj,
            "capture_command",
            capture_command_to_js(switch.release_capture),
        );
        obj.into()
    }

    /// Put both splits back at their reset position. Returns the owed
    /// capture release, if any.
    #[wasm_bindgen(js_name = resetSplit)]
    pub fn reset_split(&mut self) -> JsValue {
        let reset = self.inner.reset_split();
        self.apply_presentation();
        capture_command_to_js(reset.release_capture)
    }

    #[wasm_bindgen(js_name = toggleSync)]
    pub fn toggle_sync(&mut self) -> JsValue {
        self.drain_rejections();
        let report = self.inner.toggle_sync();
        report_to_js(&report)
    }

    #[wasm_bindgen(js_name = toggleMuteAll)]
    pub fn toggle_mute_all(&mut self) -> JsValue {
        self.drain_rejections();
        let report = self.inner.toggle_mute_all();
        report_to_js(&report)
    }

    /// Load a user-picked file into `slot` (1..=8) and schedule autoplay.
    #[wasm_bindgen(js_name = loadFile)]
    pub fn load_file(&mut self, slot: u32, file: web_sys::File) -> Result<JsValue, JsValue> {
        self.drain_rejections();
        let report = self
            .inner
            .load_file(slot, file)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(report_to_js(&report))
    }

    /// Current button labels: `{ sync, mute }`.
    pub fn labels(&self) -> JsValue {
        let obj = Object::new();
        set_js(
            &obj,
            "sync",
            JsValue::from_str(self.inner.deck().sync_label().text()),
        );
        set_js(
            &obj,
            "mute",
            JsValue::from_str(self.inner.deck().mute_label().text()),
        );
        obj.into()
    }

    /// Grid container bounds, viewport-relative CSS pixels.
    #[wasm_bindgen(js_name = setContainerRect)]
    pub fn set_container_rect(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.inner
            .set_container_rect(ContainerRect::new(left, top, width, height));
    }

    /// Presentation as JSON, for hosts that render it themselves.
    #[wasm_bindgen(js_name = presentationJson)]
    pub fn presentation_json(&self) -> Result<String, JsValue> {
        self.inner
            .presentation_json()
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// `target`: `0` = column divider, `1` = row divider, `2` = their
    /// intersection. `button` is the DOM `MouseEvent.button` value.
    #[wasm_bindgen(js_name = dividerPointerDown)]
    pub fn divider_pointer_down(
        &mut self,
        target: u8,
        pointer_id: u32,
        button: i16,
        x: f64,
        y: f64,
    ) -> JsValue {
        let Some(target) = divider_target_from_u8(target) else {
            return rejected_dispatch("invalid_target");
        };
        let dispatch = self.inner.divider_pointer_down(
            target,
            pointer_id,
            DividerPointerButton::from_dom(button),
            PointerSample::new(x, y),
        );
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = dividerTouchStart)]
    pub fn divider_touch_start(&mut self, target: u8, touch_count: u32, x: f64, y: f64) -> JsValue {
        let Some(target) = divider_target_from_u8(target) else {
            return rejected_dispatch("invalid_target");
        };
        let dispatch =
            self.inner
                .divider_touch_start(target, touch_count, PointerSample::new(x, y));
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = captureAcquired)]
    pub fn capture_acquired(&mut self, pointer_id: u32) -> JsValue {
        let dispatch = self.inner.capture_acquired(pointer_id);
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, pointer_id: u32, x: f64, y: f64) -> JsValue {
        let dispatch = self
            .inner
            .pointer_move(pointer_id, PointerSample::new(x, y));
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = touchMove)]
    pub fn touch_move(&mut self, x: f64, y: f64) -> JsValue {
        let dispatch = self.inner.touch_move(PointerSample::new(x, y));
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, pointer_id: u32, button: i16, x: f64, y: f64) -> JsValue {
        let dispatch = self.inner.pointer_up(
            pointer_id,
            DividerPointerButton::from_dom(button),
            PointerSample::new(x, y),
        );
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&mut self) -> JsValue {
        let dispatch = self.inner.touch_end();
        self.dispatch(dispatch)
    }

    /// `pointer_id` may be omitted when the host lost track of it.
    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> JsValue {
        let dispatch = self.inner.pointer_cancel(pointer_id);
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = touchCancel)]
    pub fn touch_cancel(&mut self) -> JsValue {
        let dispatch = self.inner.touch_cancel();
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self, pointer_id: u32) -> JsValue {
        let dispatch = self.inner.pointer_leave(pointer_id);
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = lostPointerCapture)]
    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> JsValue {
        let dispatch = self.inner.lost_pointer_capture(pointer_id);
        self.dispatch(dispatch)
    }

    pub fn blur(&mut self) -> JsValue {
        let dispatch = self.inner.blur();
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = visibilityHidden)]
    pub fn visibility_hidden(&mut self) -> JsValue {
        let dispatch = self.inner.visibility_hidden();
        self.dispatch(dispatch)
    }

    #[wasm_bindgen(js_name = isDividerInputActive)]
    pub fn is_divider_input_active(&self) -> bool {
        self.inner.is_divider_input_active()
    }

    /// Drain accumulated log lines.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        self.drain_rejections();
        let logs = self.inner.take_logs();
        let arr = Array::new();
        for log in logs {
            arr.push(&JsValue::from_str(&log));
        }
        arr
    }
}
