//! The set of slots plus the global mute flag.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use vidgrid_layout::MAX_SLOTS;

use crate::slot::{MediaError, MediaSlot, MediaSurface, PlaybackError, SlotId};
use crate::sync::{SyncButtonLabel, SyncController, SyncReport};

/// Delay between assigning a source and the first play attempt.
pub const DEFAULT_AUTOPLAY_DELAY: Duration = Duration::from_millis(100);

/// Deck configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckConfig {
    pub autoplay_delay: Duration,
    /// Unmuted autoplay is commonly blocked, so slots start muted.
    pub start_muted: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            autoplay_delay: DEFAULT_AUTOPLAY_DELAY,
            start_muted: true,
        }
    }
}

/// Text of the mute button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuteButtonLabel {
    MuteAll,
    UnmuteAll,
}

impl MuteButtonLabel {
    #[must_use]
    pub const fn for_muted(muted: bool) -> Self {
        if muted { Self::UnmuteAll } else { Self::MuteAll }
    }

    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::MuteAll => "Mute All",
            Self::UnmuteAll => "Unmute All",
        }
    }
}

/// Outcome of [`MediaDeck::toggle_mute_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MuteReport {
    pub muted: bool,
    /// Loaded slots the flag was pushed to.
    pub applied: Vec<SlotId>,
    pub label: MuteButtonLabel,
}

/// Autoplay result after a file load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "autoplay", content = "error", rename_all = "snake_case")]
pub enum AutoplayOutcome {
    Requested,
    Rejected(PlaybackError),
}

/// Outcome of [`MediaDeck::load_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub slot: SlotId,
    pub muted: bool,
    pub autoplay: AutoplayOutcome,
}

/// All slots of the page. Owns per-slot state; the sync decision itself is
/// delegated to [`SyncController`].
#[derive(Debug, Clone)]
pub struct MediaDeck<S> {
    slots: Vec<MediaSlot<S>>,
    muted: bool,
    autoplay_delay: Duration,
    sync_label: SyncButtonLabel,
}

impl<S: MediaSurface> MediaDeck<S> {
    /// Deck over one surface per slot, all hidden and unloaded.
    #[must_use]
    pub fn new(surfaces: [S; MAX_SLOTS], config: DeckConfig) -> Self {
        let slots = SlotId::all()
            .zip(surfaces)
            .map(|(id, surface)| MediaSlot::new(id, surface))
            .collect();
        Self {
            slots,
            muted: config.start_muted,
            autoplay_delay: config.autoplay_delay,
            sync_label: SyncButtonLabel::default(),
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[MediaSlot<S>] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, id: SlotId) -> &MediaSlot<S> {
        &self.slots[id.index()]
    }

    pub fn slot_mut(&mut self, id: SlotId) -> &mut MediaSlot<S> {
        &mut self.slots[id.index()]
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub const fn sync_label(&self) -> SyncButtonLabel {
        self.sync_label
    }

    #[must_use]
    pub const fn mute_label(&self) -> MuteButtonLabel {
        MuteButtonLabel::for_muted(self.muted)
    }

    /// Mirror the layout's slot visibility.
    pub fn apply_visibility(&mut self, visibility: [bool; MAX_SLOTS]) {
        for (slot, visible) in self.slots.iter_mut().zip(visibility) {
            slot.set_visible(visible);
        }
    }

    /// Assign a file to a slot.
    ///
    /// Sets the source, marks the slot loaded, hides its upload affordance,
    /// applies the global mute flag and schedules the first play attempt. A
    /// rejected attempt exposes manual controls on this slot only and is not
    /// an error.
    pub fn load_file(&mut self, id: SlotId, source: S::Source) -> Result<LoadReport, MediaError> {
        let muted = self.muted;
        let delay = self.autoplay_delay;
        let slot = self.slot_mut(id);
        if slot.is_loaded() {
            return Err(MediaError::AlreadyLoaded { slot: id });
        }
        slot.surface_mut()
            .set_source(source)
            .map_err(|reason| MediaError::SourceRejected { slot: id, reason })?;
        slot.mark_loaded();
        slot.surface_mut().hide_upload_affordance();
        slot.surface_mut().set_muted(muted);

        let autoplay = match slot.surface_mut().request_play_after(delay) {
            Ok(()) => AutoplayOutcome::Requested,
            Err(error) => {
                slot.fall_back_to_manual_controls(&error);
                AutoplayOutcome::Rejected(error)
            }
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(slot = %id, muted, ?autoplay, "file loaded");
        Ok(LoadReport {
            slot: id,
            muted,
            autoplay,
        })
    }

    /// Record a play rejection that arrived after the request was issued.
    pub fn report_play_rejected(&mut self, id: SlotId, error: &PlaybackError) {
        self.slot_mut(id).fall_back_to_manual_controls(error);
    }

    /// Flip the global mute flag and push it to every loaded slot.
    pub fn toggle_mute_all(&mut self) -> MuteReport {
        self.muted = !self.muted;
        let muted = self.muted;
        let mut applied = Vec::new();
        for slot in self.slots.iter_mut().filter(|slot| slot.is_loaded()) {
            slot.surface_mut().set_muted(muted);
            applied.push(slot.id());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(muted, slots = applied.len(), "mute toggled");
        MuteReport {
            muted,
            applied,
            label: MuteButtonLabel::for_muted(muted),
        }
    }

    /// Synchronized play/pause over the playable slots.
    pub fn toggle_sync(&mut self) -> SyncReport {
        let report = SyncController::toggle(&mut self.slots, self.sync_label);
        self.sync_label = report.label;
        report
    }
}
