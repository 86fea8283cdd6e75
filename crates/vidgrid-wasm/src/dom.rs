#![forbid(unsafe_code)]

//! Browser implementation of [`MediaSurface`] and the presentation writer.
//!
//! Only compiled on `wasm32` targets.

use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use vidgrid_layout::{GridPresentation, MAX_SLOTS};
use vidgrid_media::{MediaSurface, PlaybackError, SlotId};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, File, HtmlElement, HtmlVideoElement, Url};

use crate::style::{
    DomWrite, GRID_CONTAINER_ID, StyleTarget, UPLOAD_BUTTON_SELECTOR, divider_id, player_id,
    plan_writes,
};

/// `HTMLMediaElement.HAVE_CURRENT_DATA`.
const HAVE_CURRENT_DATA: u16 = 2;

/// Play rejections observed after the request returned, drained by the
/// runner on its next call.
pub type RejectionQueue = Rc<RefCell<Vec<(SlotId, PlaybackError)>>>;

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

fn js_error_text(err: &JsValue) -> String {
    if let Some(exception) = err.dyn_ref::<web_sys::DomException>() {
        return format!("{}: {}", exception.name(), exception.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn playback_error(err: &JsValue) -> PlaybackError {
    match err.dyn_ref::<web_sys::DomException>() {
        Some(exception) => {
            PlaybackError::from_dom_exception(&exception.name(), exception.message())
        }
        None => PlaybackError::Other(js_error_text(err)),
    }
}

/// One `<video>` element plus its slot wrapper.
pub struct VideoSurface {
    slot: SlotId,
    video: HtmlVideoElement,
    object_url: Option<String>,
    rejections: RejectionQueue,
}

impl VideoSurface {
    /// Look up `player{n}` in `document`.
    pub fn find(
        document: &Document,
        slot: SlotId,
        rejections: RejectionQueue,
    ) -> Result<Self, JsValue> {
        let id = player_id(slot);
        let video = document
            .get_element_by_id(&id)
            .ok_or_else(|| JsValue::from_str(&format!("missing video element #{id}")))?
            .dyn_into::<HtmlVideoElement>()
            .map_err(|_| JsValue::from_str(&format!("#{id} is not a <video>")))?;
        Ok(Self {
            slot,
            video,
            object_url: None,
            rejections,
        })
    }

    /// All eight surfaces, in slot order.
    pub fn find_all(
        document: &Document,
        rejections: &RejectionQueue,
    ) -> Result<[Self; MAX_SLOTS], JsValue> {
        let surfaces = SlotId::all()
            .map(|slot| Self::find(document, slot, Rc::clone(rejections)))
            .collect::<Result<Vec<_>, _>>()?;
        surfaces
            .try_into()
            .map_err(|_| JsValue::from_str("expected one video element per slot"))
    }

    fn wrapper(&self) -> Option<Element> {
        self.video.parent_element()
    }
}

/// Issue `play()` and watch the promise. A rejection exposes the native
/// controls on this element only.
fn play_and_watch(video: HtmlVideoElement, slot: SlotId, rejections: RejectionQueue) {
    let promise: Promise = match video.play() {
        Ok(promise) => promise,
        Err(err) => {
            reject(&video, slot, &rejections, playback_error(&err));
            return;
        }
    };
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => tracing::debug!(slot = %slot, "video started"),
            Err(err) => reject(&video, slot, &rejections, playback_error(&err)),
        }
    });
}

fn reject(
    video: &HtmlVideoElement,
    slot: SlotId,
    rejections: &RejectionQueue,
    error: PlaybackError,
) {
    tracing::warn!(
        slot = %slot,
        "autoplay blocked, user must press play on the video controls: {error}"
    );
    video.set_controls(true);
    rejections.borrow_mut().push((slot, error));
}

impl MediaSurface for VideoSurface {
    type Source = File;

    fn set_source(&mut self, source: File) -> Result<(), String> {
        let url = Url::create_object_url_with_blob(&source).map_err(|err| js_error_text(&err))?;
        if let Some(previous) = self.object_url.replace(url.clone()) {
            let _ = Url::revoke_object_url(&previous);
        }
        self.video.set_src(&url);
        self.video.load();
        Ok(())
    }

    fn hide_upload_affordance(&mut self) {
        let button = self
            .wrapper()
            .and_then(|wrapper| wrapper.query_selector(UPLOAD_BUTTON_SELECTOR).ok().flatten())
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        if let Some(button) = button {
            let _ = button.style().set_property("display", "none");
        }
    }

    fn is_playing(&self) -> bool {
        !self.video.paused() && !self.video.ended()
    }

    fn is_ready(&self) -> bool {
        self.video.ready_state() >= HAVE_CURRENT_DATA
    }

    fn position(&self) -> f64 {
        self.video.current_time()
    }

    fn seek(&mut self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn pause(&mut self) {
        if let Err(err) = self.video.pause() {
            tracing::warn!(slot = %self.slot, "pause failed: {}", js_error_text(&err));
        }
    }

    fn request_play(&mut self) -> Result<(), PlaybackError> {
        play_and_watch(self.video.clone(), self.slot, Rc::clone(&self.rejections));
        Ok(())
    }

    fn request_play_after(&mut self, delay: Duration) -> Result<(), PlaybackError> {
        let window = web_sys::window()
            .ok_or_else(|| PlaybackError::Other("no window for autoplay timer".to_string()))?;
        let video = self.video.clone();
        let slot = self.slot;
        let rejections = Rc::clone(&self.rejections);
        let callback = Closure::once_into_js(move || play_and_watch(video, slot, rejections));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
            .map(|_| ())
            .map_err(|err| playback_error(&err))
    }

    fn set_muted(&mut self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn show_manual_controls(&mut self) {
        self.video.set_controls(true);
    }
}

fn resolve(document: &Document, target: StyleTarget) -> Option<HtmlElement> {
    let element = match target {
        StyleTarget::Container => document.get_element_by_id(GRID_CONTAINER_ID),
        StyleTarget::Slot(slot) => document
            .get_element_by_id(&player_id(slot))
            .and_then(|video| video.parent_element()),
        StyleTarget::Divider(axis) => document.get_element_by_id(divider_id(axis)),
    }?;
    element.dyn_into::<HtmlElement>().ok()
}

/// Write `presentation` into the page. Missing elements are skipped; returns
/// the number of writes that landed.
pub fn apply_presentation(document: &Document, presentation: &GridPresentation) -> usize {
    let mut applied = 0;
    for write in plan_writes(presentation) {
        let landed = match &write {
            DomWrite::Style {
                target,
                property,
                value,
            } => resolve(document, *target).is_some_and(|element| {
                let style = element.style();
                if value.is_empty() {
                    style.remove_property(property).is_ok()
                } else {
                    style.set_property(property, value).is_ok()
                }
            }),
            DomWrite::Class {
                target,
                class,
                enabled,
            } => resolve(document, *target).is_some_and(|element| {
                element
                    .class_list()
                    .toggle_with_force(class, *enabled)
                    .is_ok()
            }),
        };
        if landed {
            applied += 1;
        }
    }
    applied
}
