#![forbid(unsafe_code)]

//! Deterministic pointer/touch adapter for grid divider drags.
//!
//! This module bridges browser pointer and touch lifecycle signals into
//! [`LayoutEngine`] drag calls while enforcing:
//! - one active input (pointer id or single touch) at a time,
//! - explicit capture acquire/release commands for JS hosts,
//! - release from anywhere on the page (move/up listeners live on `document`),
//! - cancellation on interruption paths (blur/visibility/lost-capture).
//!
//! Mouse and touch are normalized to a [`PointerSample`] here, so the engine
//! sees one kind of input.

use serde::{Deserialize, Serialize};
use vidgrid_layout::{
    ContainerRect, DragCancelReason, DragEffect, DragTransition, LayoutEngine, PointerSample,
    SplitAxis,
};

/// Mouse button reported with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividerPointerButton {
    Primary,
    Middle,
    Secondary,
    Other,
}

impl DividerPointerButton {
    /// Map `PointerEvent.button`.
    #[must_use]
    pub const fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Other,
        }
    }
}

/// Adapter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DividerPointerConfig {
    /// Button required to begin a drag.
    pub activation_button: DividerPointerButton,
    /// If true, pointer leave cancels a drag whose capture was requested but
    /// never acknowledged. Off by default: leaving the divider must not end a
    /// drag.
    pub cancel_on_leave_without_capture: bool,
}

impl Default for DividerPointerConfig {
    fn default() -> Self {
        Self {
            activation_button: DividerPointerButton::Primary,
            cancel_on_leave_without_capture: false,
        }
    }
}

/// Which divider handle received the press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "axis", rename_all = "snake_case")]
pub enum DividerTarget {
    Single(SplitAxis),
    /// Crossing point of both dividers in a 2x2 grid; drags both axes.
    Intersection,
}

impl DividerTarget {
    #[must_use]
    pub const fn axes(self) -> &'static [SplitAxis] {
        match self {
            Self::Single(SplitAxis::Horizontal) => &[SplitAxis::Horizontal],
            Self::Single(SplitAxis::Vertical) => &[SplitAxis::Vertical],
            Self::Intersection => &SplitAxis::ALL,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single(SplitAxis::Horizontal) => "horizontal",
            Self::Single(SplitAxis::Vertical) => "vertical",
            Self::Intersection => "intersection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveSource {
    Pointer {
        pointer_id: u32,
        button: DividerPointerButton,
        capture: CaptureState,
    },
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    source: ActiveSource,
    target: DividerTarget,
    last_sample: PointerSample,
}

impl ActiveDrag {
    const fn pointer_id(&self) -> Option<u32> {
        match self.source {
            ActiveSource::Pointer { pointer_id, .. } => Some(pointer_id),
            ActiveSource::Touch => None,
        }
    }

    fn release_command(&self) -> Option<DividerCaptureCommand> {
        match self.source {
            ActiveSource::Pointer {
                pointer_id,
                capture: CaptureState::Acquired,
                ..
            } => Some(DividerCaptureCommand::Release { pointer_id }),
            _ => None,
        }
    }
}

/// Host command for browser pointer-capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DividerCaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividerLifecyclePhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    PointerLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    Blur,
    VisibilityHidden,
    LostPointerCapture,
    CaptureAcquired,
}

impl DividerLifecyclePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerDown => "pointer_down",
            Self::PointerMove => "pointer_move",
            Self::PointerUp => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::PointerLeave => "pointer_leave",
            Self::TouchStart => "touch_start",
            Self::TouchMove => "touch_move",
            Self::TouchEnd => "touch_end",
            Self::TouchCancel => "touch_cancel",
            Self::Blur => "blur",
            Self::VisibilityHidden => "visibility_hidden",
            Self::LostPointerCapture => "lost_pointer_capture",
            Self::CaptureAcquired => "capture_acquired",
        }
    }
}

/// Why an incoming signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividerIgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    MultiTouch,
    AxisNotResizable,
    ActivePointerAlreadyInProgress,
    NoActivePointer,
    PointerMismatch,
    LeaveWhileDragging,
}

impl DividerIgnoredReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPointerId => "invalid_pointer_id",
            Self::ButtonNotAllowed => "button_not_allowed",
            Self::ButtonMismatch => "button_mismatch",
            Self::MultiTouch => "multi_touch",
            Self::AxisNotResizable => "axis_not_resizable",
            Self::ActivePointerAlreadyInProgress => "active_pointer_already_in_progress",
            Self::NoActivePointer => "no_active_pointer",
            Self::PointerMismatch => "pointer_mismatch",
            Self::LeaveWhileDragging => "leave_while_dragging",
        }
    }
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum DividerLogOutcome {
    /// Forwarded to the layout engine.
    Forwarded,
    CaptureStateUpdated,
    Ignored(DividerIgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividerLogEntry {
    pub phase: DividerLifecyclePhase,
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub target: Option<DividerTarget>,
    pub position: Option<PointerSample>,
    pub capture_command: Option<DividerCaptureCommand>,
    pub outcome: DividerLogOutcome,
}

impl DividerLogEntry {
    /// One `key=value` line, `-` for absent fields.
    #[must_use]
    pub fn format_line(&self) -> String {
        let sequence = self
            .sequence
            .map_or_else(|| "-".to_owned(), |seq| seq.to_string());
        let pointer_id = self
            .pointer_id
            .map_or_else(|| "-".to_owned(), |id| id.to_string());
        let target = self.target.map_or("-", DividerTarget::label);
        let (x, y) = match self.position {
            Some(pos) => (pos.x.to_string(), pos.y.to_string()),
            None => ("-".to_owned(), "-".to_owned()),
        };
        let command = match self.capture_command {
            Some(DividerCaptureCommand::Acquire { .. }) => "acquire",
            Some(DividerCaptureCommand::Release { .. }) => "release",
            None => "none",
        };
        let outcome = match self.outcome {
            DividerLogOutcome::Forwarded => "forwarded".to_owned(),
            DividerLogOutcome::CaptureStateUpdated => "capture_state_updated".to_owned(),
            DividerLogOutcome::Ignored(reason) => format!("ignored:{}", reason.as_str()),
        };
        format!(
            "divider_pointer phase={} seq={sequence} pointer={pointer_id} target={target} x={x} y={y} command={command} outcome={outcome}",
            self.phase.as_str()
        )
    }
}

/// Result of one lifecycle dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerDispatch {
    /// Engine transitions caused by this signal.
    pub transitions: Vec<DragTransition>,
    pub capture_command: Option<DividerCaptureCommand>,
    /// Host should call `preventDefault()` (text selection, touch scroll).
    pub prevent_default: bool,
    pub log: DividerLogEntry,
}

impl DividerDispatch {
    fn ignored(
        phase: DividerLifecyclePhase,
        reason: DividerIgnoredReason,
        pointer_id: Option<u32>,
        target: Option<DividerTarget>,
        position: Option<PointerSample>,
    ) -> Self {
        Self {
            transitions: Vec::new(),
            capture_command: None,
            prevent_default: false,
            log: DividerLogEntry {
                phase,
                sequence: None,
                pointer_id,
                target,
                position,
                capture_command: None,
                outcome: DividerLogOutcome::Ignored(reason),
            },
        }
    }

    /// Whether any transition moved a split.
    #[must_use]
    pub fn split_changed(&self) -> bool {
        self.transitions
            .iter()
            .any(|transition| transition.updated_percent().is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DispatchContext {
    phase: DividerLifecyclePhase,
    pointer_id: Option<u32>,
    target: Option<DividerTarget>,
    position: Option<PointerSample>,
}

/// Deterministic divider input adapter for web hosts.
///
/// The adapter does not own the split; every handler takes the
/// [`LayoutEngine`] that does, and the container rectangle where a sample
/// must be mapped to a percentage.
#[derive(Debug, Clone)]
pub struct DividerPointerAdapter {
    config: DividerPointerConfig,
    active: Option<ActiveDrag>,
    next_sequence: u64,
}

impl Default for DividerPointerAdapter {
    fn default() -> Self {
        Self::new(DividerPointerConfig::default())
    }
}

impl DividerPointerAdapter {
    #[must_use]
    pub const fn new(config: DividerPointerConfig) -> Self {
        Self {
            config,
            active: None,
            next_sequence: 1,
        }
    }

    #[must_use]
    pub const fn config(&self) -> DividerPointerConfig {
        self.config
    }

    /// Active pointer id, if a pointer (not a touch) is dragging.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.and_then(|active| active.pointer_id())
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Handle pointer-down on a divider handle.
    pub fn pointer_down(
        &mut self,
        engine: &mut LayoutEngine,
        target: DividerTarget,
        pointer_id: u32,
        button: DividerPointerButton,
        position: PointerSample,
    ) -> DividerDispatch {
        let phase = DividerLifecyclePhase::PointerDown;
        if pointer_id == 0 {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::InvalidPointerId,
                Some(pointer_id),
                Some(target),
                Some(position),
            );
        }
        if button != self.config.activation_button {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::ButtonNotAllowed,
                Some(pointer_id),
                Some(target),
                Some(position),
            );
        }
        self.start(
            engine,
            phase,
            ActiveSource::Pointer {
                pointer_id,
                button,
                capture: CaptureState::Requested,
            },
            target,
            position,
        )
    }

    /// Handle a touch-start on a divider handle. Only single-finger touches
    /// start a drag.
    pub fn touch_start(
        &mut self,
        engine: &mut LayoutEngine,
        target: DividerTarget,
        touch_count: u32,
        position: PointerSample,
    ) -> DividerDispatch {
        let phase = DividerLifecyclePhase::TouchStart;
        if touch_count != 1 {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::MultiTouch,
                None,
                Some(target),
                Some(position),
            );
        }
        self.start(engine, phase, ActiveSource::Touch, target, position)
    }

    /// Mark browser pointer capture as acquired.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> DividerDispatch {
        let phase = DividerLifecyclePhase::CaptureAcquired;
        let Some(mut active) = self.active else {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
                None,
            );
        };
        let ActiveSource::Pointer {
            pointer_id: active_id,
            button,
            ..
        } = active.source
        else {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(active.target),
                None,
            );
        };
        if active_id != pointer_id {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(active.target),
                None,
            );
        }
        active.source = ActiveSource::Pointer {
            pointer_id,
            button,
            capture: CaptureState::Acquired,
        };
        self.active = Some(active);
        DividerDispatch {
            transitions: Vec::new(),
            capture_command: None,
            prevent_default: false,
            log: DividerLogEntry {
                phase,
                sequence: None,
                pointer_id: Some(pointer_id),
                target: Some(active.target),
                position: None,
                capture_command: None,
                outcome: DividerLogOutcome::CaptureStateUpdated,
            },
        }
    }

    /// Handle a document-level pointer move.
    pub fn pointer_move(
        &mut self,
        engine: &mut LayoutEngine,
        pointer_id: u32,
        position: PointerSample,
        container: ContainerRect,
    ) -> DividerDispatch {
        let phase = DividerLifecyclePhase::PointerMove;
        let active = match self.pointer_drag(phase, pointer_id, Some(position)) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        self.track(engine, phase, active, position, container)
    }

    /// Handle a document-level touch move.
    pub fn touch_move(
        &mut self,
        engine: &mut LayoutEngine,
        position: PointerSample,
        container: ContainerRect,
    ) -> DividerDispatch {
        let phase = DividerLifecyclePhase::TouchMove;
        let active = match self.touch_drag(phase, Some(position)) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        self.track(engine, phase, active, position, container)
    }

    /// Handle a document-level pointer up, wherever it lands.
    pub fn pointer_up(
        &mut self,
        engine: &mut LayoutEngine,
        pointer_id: u32,
        button: DividerPointerButton,
        position: PointerSample,
    ) -> DividerDispatch {
        let phase = DividerLifecyclePhase::PointerUp;
        let active = match self.pointer_drag(phase, pointer_id, Some(position)) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        if let ActiveSource::Pointer {
            button: active_button,
            ..
        } = active.source
            && active_button != button
        {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::ButtonMismatch,
                Some(pointer_id),
                Some(active.target),
                Some(position),
            );
        }
        let transitions = engine.release();
        self.finish(
            DispatchContext {
                phase,
                pointer_id: Some(pointer_id),
                target: Some(active.target),
                position: Some(position),
            },
            transitions,
            active.release_command(),
        )
    }

    /// Handle a document-level touch end.
    pub fn touch_end(&mut self, engine: &mut LayoutEngine) -> DividerDispatch {
        let phase = DividerLifecyclePhase::TouchEnd;
        let active = match self.touch_drag(phase, None) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        let transitions = engine.release();
        self.finish(
            DispatchContext {
                phase,
                pointer_id: None,
                target: Some(active.target),
                position: Some(active.last_sample),
            },
            transitions,
            None,
        )
    }

    /// Handle browser pointer-cancel.
    pub fn pointer_cancel(
        &mut self,
        engine: &mut LayoutEngine,
        pointer_id: Option<u32>,
    ) -> DividerDispatch {
        self.cancel_active(
            engine,
            DividerLifecyclePhase::PointerCancel,
            pointer_id,
            DragCancelReason::PointerCancel,
            true,
        )
    }

    /// Handle browser touch-cancel.
    pub fn touch_cancel(&mut self, engine: &mut LayoutEngine) -> DividerDispatch {
        let phase = DividerLifecyclePhase::TouchCancel;
        if let Err(ignored) = self.touch_drag(phase, None) {
            return ignored;
        }
        self.cancel_active(engine, phase, None, DragCancelReason::PointerCancel, false)
    }

    /// Handle pointer-leave on the divider handle.
    ///
    /// Leaving the handle is normal during a drag; it only cancels when
    /// configured to and capture was never acknowledged.
    pub fn pointer_leave(&mut self, engine: &mut LayoutEngine, pointer_id: u32) -> DividerDispatch {
        let phase = DividerLifecyclePhase::PointerLeave;
        let active = match self.pointer_drag(phase, pointer_id, None) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        let uncaptured = matches!(
            active.source,
            ActiveSource::Pointer {
                capture: CaptureState::Requested,
                ..
            }
        );
        if uncaptured && self.config.cancel_on_leave_without_capture {
            self.cancel_active(
                engine,
                phase,
                Some(pointer_id),
                DragCancelReason::PointerCancel,
                true,
            )
        } else {
            DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::LeaveWhileDragging,
                Some(pointer_id),
                Some(active.target),
                None,
            )
        }
    }

    /// Handle window blur.
    pub fn blur(&mut self, engine: &mut LayoutEngine) -> DividerDispatch {
        self.cancel_active(
            engine,
            DividerLifecyclePhase::Blur,
            None,
            DragCancelReason::FocusLost,
            true,
        )
    }

    /// Handle the document becoming hidden.
    pub fn visibility_hidden(&mut self, engine: &mut LayoutEngine) -> DividerDispatch {
        self.cancel_active(
            engine,
            DividerLifecyclePhase::VisibilityHidden,
            None,
            DragCancelReason::FocusLost,
            true,
        )
    }

    /// Handle `lostpointercapture`; cancels without a second release.
    pub fn lost_pointer_capture(
        &mut self,
        engine: &mut LayoutEngine,
        pointer_id: u32,
    ) -> DividerDispatch {
        self.cancel_active(
            engine,
            DividerLifecyclePhase::LostPointerCapture,
            Some(pointer_id),
            DragCancelReason::PointerCancel,
            false,
        )
    }

    /// Forget the active input after the engine ended the drag on its own
    /// (layout switch, split reset). Returns the capture release the host
    /// still owes the browser.
    pub fn detach(&mut self) -> Option<DividerCaptureCommand> {
        self.active.take().and_then(|active| active.release_command())
    }

    fn start(
        &mut self,
        engine: &mut LayoutEngine,
        phase: DividerLifecyclePhase,
        source: ActiveSource,
        target: DividerTarget,
        position: PointerSample,
    ) -> DividerDispatch {
        let pointer_id = match source {
            ActiveSource::Pointer { pointer_id, .. } => Some(pointer_id),
            ActiveSource::Touch => None,
        };
        if self.active.is_some() {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::ActivePointerAlreadyInProgress,
                pointer_id,
                Some(target),
                Some(position),
            );
        }
        if !target
            .axes()
            .iter()
            .any(|&axis| engine.is_divider_visible(axis))
        {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::AxisNotResizable,
                pointer_id,
                Some(target),
                Some(position),
            );
        }

        let mut transitions: Vec<DragTransition> = Vec::new();
        for &axis in target.axes() {
            if engine.is_divider_visible(axis) {
                transitions.push(engine.press_divider(axis));
            }
        }
        if !transitions
            .iter()
            .any(|transition| matches!(transition.effect, DragEffect::Started))
        {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::ActivePointerAlreadyInProgress,
                pointer_id,
                Some(target),
                Some(position),
            );
        }

        self.active = Some(ActiveDrag {
            source,
            target,
            last_sample: position,
        });
        tracing::debug!(divider = target.label(), ?pointer_id, "divider drag started");
        self.forwarded(
            DispatchContext {
                phase,
                pointer_id,
                target: Some(target),
                position: Some(position),
            },
            transitions,
            pointer_id.map(|pointer_id| DividerCaptureCommand::Acquire { pointer_id }),
            true,
        )
    }

    fn track(
        &mut self,
        engine: &mut LayoutEngine,
        phase: DividerLifecyclePhase,
        mut active: ActiveDrag,
        position: PointerSample,
        container: ContainerRect,
    ) -> DividerDispatch {
        let transitions = engine.drag_to(position, container);
        if transitions
            .iter()
            .any(|transition| transition.updated_percent().is_some())
        {
            active.last_sample = position;
            self.active = Some(active);
        }
        self.forwarded(
            DispatchContext {
                phase,
                pointer_id: active.pointer_id(),
                target: Some(active.target),
                position: Some(position),
            },
            transitions,
            None,
            true,
        )
    }

    fn cancel_active(
        &mut self,
        engine: &mut LayoutEngine,
        phase: DividerLifecyclePhase,
        pointer_id: Option<u32>,
        reason: DragCancelReason,
        release_capture: bool,
    ) -> DividerDispatch {
        let Some(active) = self.active else {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::NoActivePointer,
                pointer_id,
                None,
                None,
            );
        };
        if let Some(id) = pointer_id
            && active.pointer_id() != Some(id)
        {
            return DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::PointerMismatch,
                Some(id),
                Some(active.target),
                None,
            );
        }
        let transitions = engine.cancel_drag(reason);
        let command = if release_capture {
            active.release_command()
        } else {
            None
        };
        tracing::debug!(phase = phase.as_str(), ?reason, "divider drag canceled");
        self.finish(
            DispatchContext {
                phase,
                pointer_id: active.pointer_id(),
                target: Some(active.target),
                position: None,
            },
            transitions,
            command,
        )
    }

    fn finish(
        &mut self,
        context: DispatchContext,
        transitions: Vec<DragTransition>,
        capture_command: Option<DividerCaptureCommand>,
    ) -> DividerDispatch {
        self.active = None;
        self.forwarded(context, transitions, capture_command, false)
    }

    fn pointer_drag(
        &self,
        phase: DividerLifecyclePhase,
        pointer_id: u32,
        position: Option<PointerSample>,
    ) -> Result<ActiveDrag, DividerDispatch> {
        let Some(active) = self.active else {
            return Err(DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
                position,
            ));
        };
        if active.pointer_id() != Some(pointer_id) {
            return Err(DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(active.target),
                position,
            ));
        }
        Ok(active)
    }

    fn touch_drag(
        &self,
        phase: DividerLifecyclePhase,
        position: Option<PointerSample>,
    ) -> Result<ActiveDrag, DividerDispatch> {
        let Some(active) = self.active else {
            return Err(DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::NoActivePointer,
                None,
                None,
                position,
            ));
        };
        if active.source != ActiveSource::Touch {
            return Err(DividerDispatch::ignored(
                phase,
                DividerIgnoredReason::PointerMismatch,
                None,
                Some(active.target),
                position,
            ));
        }
        Ok(active)
    }

    fn forwarded(
        &mut self,
        context: DispatchContext,
        transitions: Vec<DragTransition>,
        capture_command: Option<DividerCaptureCommand>,
        prevent_default: bool,
    ) -> DividerDispatch {
        let sequence = self.next_sequence();
        DividerDispatch {
            transitions,
            capture_command,
            prevent_default,
            log: DividerLogEntry {
                phase: context.phase,
                sequence: Some(sequence),
                pointer_id: context.pointer_id,
                target: context.target,
                position: context.position,
                capture_command,
                outcome: DividerLogOutcome::Forwarded,
            },
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}
