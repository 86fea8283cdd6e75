#![forbid(unsafe_code)]

//! Platform-independent grid runner.
//!
//! Owns the layout engine, the divider input adapter and the media deck.
//! The wasm exports and the native tests both drive this type; no JS types
//! appear here.

use vidgrid_layout::{
    ContainerRect, DragTransition, GeometryError, GridPresentation, LayoutEngine, LayoutId,
    MAX_SLOTS, PointerSample,
};
use vidgrid_media::{
    AutoplayOutcome, LoadReport, MediaDeck, MediaError, MediaSurface, MuteReport, PlaybackError,
    SlotId, SyncAction, SyncReport,
};

use crate::config::{ConfigError, GridConfig};
use crate::divider_pointer::{
    DividerCaptureCommand, DividerDispatch, DividerPointerAdapter, DividerPointerButton,
    DividerTarget,
};

/// Outcome of [`GridRunnerCore::apply_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSwitch {
    pub layout: LayoutId,
    pub visible_slots: usize,
    /// Drag sessions the switch terminated.
    pub canceled: Vec<DragTransition>,
    /// Pointer capture the host must release because the drag ended.
    pub release_capture: Option<DividerCaptureCommand>,
}

/// Outcome of [`GridRunnerCore::reset_split`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitReset {
    pub canceled: Vec<DragTransition>,
    pub release_capture: Option<DividerCaptureCommand>,
}

/// The whole page state behind the UI controls.
#[derive(Debug)]
pub struct GridRunnerCore<S> {
    config: GridConfig,
    engine: LayoutEngine,
    pointer: DividerPointerAdapter,
    deck: MediaDeck<S>,
    container: ContainerRect,
    /// Structured host-drainable log lines.
    logs: Vec<String>,
}

impl<S: MediaSurface> GridRunnerCore<S> {
    /// Runner over one surface per slot, showing the default layout.
    pub fn new(config: GridConfig, surfaces: [S; MAX_SLOTS]) -> Result<Self, ConfigError> {
        let bounds = config.validate()?;
        let engine = LayoutEngine::new(bounds).with_header_height(config.header_height_px);
        let mut deck = MediaDeck::new(surfaces, config.deck_config());
        deck.apply_visibility(engine.slot_visibility());
        Ok(Self {
            config,
            engine,
            pointer: DividerPointerAdapter::new(config.pointer),
            deck,
            container: ContainerRect::new(0.0, 0.0, 0.0, 0.0),
            logs: Vec::new(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub const fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    #[must_use]
    pub const fn deck(&self) -> &MediaDeck<S> {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut MediaDeck<S> {
        &mut self.deck
    }

    #[must_use]
    pub const fn container(&self) -> ContainerRect {
        self.container
    }

    /// Active pointer id of the divider adapter, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.pointer.active_pointer_id()
    }

    /// Whether a pointer or touch currently owns a divider drag.
    #[must_use]
    pub const fn is_divider_input_active(&self) -> bool {
        self.pointer.is_active()
    }

    /// Record the grid container's bounding box (CSS pixels).
    pub fn set_container_rect(&mut self, rect: ContainerRect) {
        self.container = rect;
    }

    /// Append host-side log lines so they drain in order with ours.
    pub fn extend_logs(&mut self, lines: impl IntoIterator<Item = String>) {
        self.logs.extend(lines);
    }

    /// Take accumulated log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    // ---- UI controls ----

    /// Switch to the layout for `slot_count` slots.
    pub fn apply_layout(&mut self, slot_count: u32) -> Result<LayoutSwitch, GeometryError> {
        let layout = match LayoutId::new(slot_count) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::warn!("layout request rejected: {err}");
                self.logs
                    .push(format!("layout requested={slot_count} outcome=rejected"));
                return Err(err);
            }
        };
        let change = self.engine.apply_layout(layout);
        let release_capture = self.pointer.detach();
        self.deck.apply_visibility(self.engine.slot_visibility());
        self.logs.push(format!(
            "layout requested={slot_count} visible={} canceled={} outcome=applied",
            change.visible_slots,
            change.canceled.len()
        ));
        Ok(LayoutSwitch {
            layout: change.layout,
            visible_slots: change.visible_slots,
            canceled: change.canceled,
            release_capture,
        })
    }

    /// Return both splits to their reset value.
    pub fn reset_split(&mut self) -> SplitReset {
        let canceled = self.engine.reset_split();
        let release_capture = self.pointer.detach();
        self.logs.push(format!(
            "split_reset column={} row={} canceled={}",
            self.engine.split().column_split(),
            self.engine.split().row_split(),
            canceled.len()
        ));
        SplitReset {
            canceled,
            release_capture,
        }
    }

    /// Synchronized play/pause over the playable slots.
    pub fn toggle_sync(&mut self) -> SyncReport {
        let report = self.deck.toggle_sync();
        let action = match report.action {
            SyncAction::NoPlayableMedia => "no_playable_media".to_owned(),
            SyncAction::Paused => "paused".to_owned(),
            SyncAction::Played { reference_time } => {
                format!("played reference_time={reference_time}")
            }
        };
        if report.action == SyncAction::NoPlayableMedia {
            tracing::debug!("sync requested with nothing to play");
        }
        self.logs.push(format!(
            "sync action={action} slots={} rejected={} label={}",
            report.slots.len(),
            report.rejected.len(),
            report.label.text()
        ));
        report
    }

    /// Flip the global mute flag.
    pub fn toggle_mute_all(&mut self) -> MuteReport {
        let report = self.deck.toggle_mute_all();
        self.logs.push(format!(
            "mute muted={} applied={} label={}",
            report.muted,
            report.applied.len(),
            report.label.text()
        ));
        report
    }

    /// Load a user-selected file into slot `slot` (one-based).
    pub fn load_file(&mut self, slot: u32, source: S::Source) -> Result<LoadReport, MediaError> {
        let result = SlotId::new(slot).and_then(|id| self.deck.load_file(id, source));
        match &result {
            Ok(report) => self.logs.push(format!(
                "load slot={} muted={} autoplay={}",
                report.slot.get(),
                report.muted,
                match report.autoplay {
                    AutoplayOutcome::Requested => "requested",
                    AutoplayOutcome::Rejected(_) => "rejected",
                }
            )),
            Err(err) => {
                tracing::warn!("file load failed: {err}");
                self.logs.push(format!("load slot={slot} outcome=error"));
            }
        }
        result
    }

    /// Record a play rejection that surfaced after the request.
    pub fn report_play_rejected(&mut self, slot: SlotId, error: &PlaybackError) {
        self.deck.report_play_rejected(slot, error);
        self.logs.push(format!("play_rejected slot={}", slot.get()));
    }

    /// Current presentation snapshot.
    #[must_use]
    pub fn presentation(&self) -> GridPresentation {
        self.engine.presentation()
    }

    /// Presentation snapshot as JSON for the host.
    pub fn presentation_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.presentation())
    }

    // ---- Divider input ----

    pub fn divider_pointer_down(
        &mut self,
        target: DividerTarget,
        pointer_id: u32,
        button: DividerPointerButton,
        position: PointerSample,
    ) -> DividerDispatch {
        let dispatch =
            self.pointer
                .pointer_down(&mut self.engine, target, pointer_id, button, position);
        self.record(dispatch)
    }

    pub fn divider_touch_start(
        &mut self,
        target: DividerTarget,
        touch_count: u32,
        position: PointerSample,
    ) -> DividerDispatch {
        let dispatch =
            self.pointer
                .touch_start(&mut self.engine, target, touch_count, position);
        self.record(dispatch)
    }

    pub fn capture_acquired(&mut self, pointer_id: u32) -> DividerDispatch {
        let dispatch = self.pointer.capture_acquired(pointer_id);
        self.record(dispatch)
    }

    pub fn pointer_move(&mut self, pointer_id: u32, position: PointerSample) -> DividerDispatch {
        let dispatch =
            self.pointer
                .pointer_move(&mut self.engine, pointer_id, position, self.container);
        self.record(dispatch)
    }

    pub fn touch_move(&mut self, position: PointerSample) -> DividerDispatch {
        let dispatch = self
            .pointer
            .touch_move(&mut self.engine, position, self.container);
        self.record(dispatch)
    }

    pub fn pointer_up(
        &mut self,
        pointer_id: u32,
        button: DividerPointerButton,
        position: PointerSample,
    ) -> DividerDispatch {
        let dispatch = self
            .pointer
            .pointer_up(&mut self.engine, pointer_id, button, position);
        self.record(dispatch)
    }

    pub fn touch_end(&mut self) -> DividerDispatch {
        let dispatch = self.pointer.touch_end(&mut self.engine);
        self.record(dispatch)
    }

    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> DividerDispatch {
        let dispatch = self.pointer.pointer_cancel(&mut self.engine, pointer_id);
        self.record(dispatch)
    }

    pub fn touch_cancel(&mut self) -> DividerDispatch {
        let dispatch = self.pointer.touch_cancel(&mut self.engine);
        self.record(dispatch)
    }

    pub fn pointer_leave(&mut self, pointer_id: u32) -> DividerDispatch {
        let dispatch = self.pointer.pointer_leave(&mut self.engine, pointer_id);
        self.record(dispatch)
    }

    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> DividerDispatch {
        let dispatch = self
            .pointer
            .lost_pointer_capture(&mut self.engine, pointer_id);
        self.record(dispatch)
    }

    pub fn blur(&mut self) -> DividerDispatch {
        let dispatch = self.pointer.blur(&mut self.engine);
        self.record(dispatch)
    }

    pub fn visibility_hidden(&mut self) -> DividerDispatch {
        let dispatch = self.pointer.visibility_hidden(&mut self.engine);
        self.record(dispatch)
    }

    fn record(&mut self, dispatch: DividerDispatch) -> DividerDispatch {
        tracing::trace!(
            phase = dispatch.log.phase.as_str(),
            transitions = dispatch.transitions.len(),
            "divider dispatch"
        );
        self.logs.push(dispatch.log.format_line());
        dispatch
    }
}

#[cfg(test)]
mod tests {
    use super::GridRunnerCore;
    use crate::config::GridConfig;
    use crate::divider_pointer::{
        DividerCaptureCommand, DividerIgnoredReason, DividerLogOutcome, DividerPointerButton,
        DividerTarget,
    };
    use pretty_assertions::assert_eq;
    use vidgrid_layout::{ContainerRect, GeometryError, PointerSample, SplitAxis};
    use vidgrid_media::testing::ScriptedSurface;
    use vidgrid_media::{NO_PLAYABLE_NOTICE, SyncAction};

    const COLUMN: DividerTarget = DividerTarget::Single(SplitAxis::Horizontal);

    fn core() -> GridRunnerCore<ScriptedSurface> {
        let mut core = GridRunnerCore::new(
            GridConfig::default(),
            std::array::from_fn(|_| ScriptedSurface::new()),
        )
        .expect("default config is valid");
        core.set_container_rect(ContainerRect::new(0.0, 60.0, 800.0, 600.0));
        core
    }

    #[test]
    fn starts_on_two_slots_with_centered_split() {
        let core = core();
        let presentation = core.presentation();
        assert_eq!(presentation.layout.slot_count(), 2);
        assert_eq!(presentation.template_columns, "50% 50%");
        assert_eq!(
            core.deck()
                .slots()
                .iter()
                .filter(|slot| slot.is_visible())
                .count(),
            2
        );
    }

    #[test]
    fn unknown_layout_is_reported_not_applied() {
        let mut core = core();
        assert_eq!(
            core.apply_layout(9),
            Err(GeometryError::UnknownLayout { requested: 9 })
        );
        assert_eq!(core.engine().layout().slot_count(), 2);
        let logs = core.take_logs();
        assert_eq!(logs, vec!["layout requested=9 outcome=rejected".to_string()]);
    }

    #[test]
    fn layout_switch_mid_drag_releases_capture() {
        let mut core = core();
        core.divider_pointer_down(
            COLUMN,
            5,
            DividerPointerButton::Primary,
            PointerSample::new(400.0, 100.0),
        );
        core.capture_acquired(5);
        core.pointer_move(5, PointerSample::new(200.0, 100.0));
        assert_eq!(core.engine().split().column_split(), 25.0);

        let switch = core.apply_layout(4).expect("valid layout");
        assert_eq!(switch.canceled.len(), 1);
        assert_eq!(
            switch.release_capture,
            Some(DividerCaptureCommand::Release { pointer_id: 5 })
        );
        assert!(!core.engine().is_dragging());
        assert_eq!(core.engine().split().column_split(), 50.0);
        assert_eq!(core.active_pointer_id(), None);

        let stale = core.pointer_move(5, PointerSample::new(700.0, 100.0));
        assert_eq!(
            stale.log.outcome,
            DividerLogOutcome::Ignored(DividerIgnoredReason::NoActivePointer)
        );
        assert_eq!(core.engine().split().column_split(), 50.0);
    }

    #[test]
    fn reset_split_restores_center() {
        let mut core = core();
        core.divider_pointer_down(
            COLUMN,
            2,
            DividerPointerButton::Primary,
            PointerSample::new(400.0, 100.0),
        );
        core.pointer_move(2, PointerSample::new(760.0, 100.0));
        core.pointer_up(2, DividerPointerButton::Primary, PointerSample::new(760.0, 100.0));
        assert_eq!(core.engine().split().column_split(), 90.0);

        let reset = core.reset_split();
        assert!(reset.canceled.is_empty());
        assert_eq!(reset.release_capture, None);
        assert_eq!(core.presentation().template_columns, "50% 50%");
    }

    #[test]
    fn layout_switch_updates_deck_visibility() {
        let mut core = core();
        core.apply_layout(5).expect("valid layout");
        let visible: Vec<bool> = core
            .deck()
            .slots()
            .iter()
            .map(|slot| slot.is_visible())
            .collect();
        assert_eq!(
            visible,
            vec![true, true, true, true, true, false, false, false]
        );
    }

    #[test]
    fn sync_without_media_logs_notice() {
        let mut core = core();
        let report = core.toggle_sync();
        assert_eq!(report.action, SyncAction::NoPlayableMedia);
        assert_eq!(report.notice, Some(NO_PLAYABLE_NOTICE));
        assert_eq!(
            core.take_logs(),
            vec!["sync action=no_playable_media slots=0 rejected=0 label=Sync Play".to_string()]
        );
    }

    #[test]
    fn load_file_rejects_bad_slot_numbers() {
        let mut core = core();
        assert!(core.load_file(0, "a.mp4".to_string()).is_err());
        assert!(core.load_file(9, "a.mp4".to_string()).is_err());
        let report = core
            .load_file(1, "a.mp4".to_string())
            .expect("slot 1 exists");
        assert!(report.muted);
    }

    #[test]
    fn dispatch_logs_are_drained_with_take_logs() {
        let mut core = core();
        core.divider_pointer_down(
            COLUMN,
            7,
            DividerPointerButton::Primary,
            PointerSample::new(1.0, 1.0),
        );
        let logs = core.take_logs();
        assert!(
            logs.iter().any(|line| {
                line.starts_with("divider_pointer")
                    && line.contains("phase=pointer_down")
                    && line.contains("outcome=forwarded")
            }),
            "expected divider pointer log entry, got: {logs:?}"
        );
        assert!(core.take_logs().is_empty());
    }

    #[test]
    fn presentation_json_carries_splits() {
        let core = core();
        let json = core.presentation_json().expect("presentation serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["column_split"], 50.0);
        assert_eq!(value["header_height_px"], 60);
    }
}
