//! Synchronized play/pause across the playable slots.
//!
//! One toggle computes a single decision from the aggregate state and issues
//! every pause/seek/play command in one pass. Play requests are
//! fire-and-forget: a rejected slot falls back to manual controls and the
//! batch carries on.

use serde::{Deserialize, Serialize};

use crate::slot::{MediaSlot, MediaSurface, PlaybackError, SlotId};

/// Notice shown when a toggle finds nothing to play.
pub const NO_PLAYABLE_NOTICE: &str = "No video loaded yet";

/// Text of the sync button, i.e. what the next press will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncButtonLabel {
    #[default]
    PlayAll,
    PauseAll,
}

impl SyncButtonLabel {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::PlayAll => "Sync Play",
            Self::PauseAll => "Pause All",
        }
    }
}

/// Decision taken by one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SyncAction {
    NoPlayableMedia,
    Paused,
    Played { reference_time: f64 },
}

/// Outcome of [`SyncController::toggle`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub action: SyncAction,
    /// Slots that received the batch, in slot order.
    pub slots: Vec<SlotId>,
    /// Slots whose play request was rejected synchronously.
    pub rejected: Vec<(SlotId, PlaybackError)>,
    pub notice: Option<&'static str>,
    pub label: SyncButtonLabel,
}

/// Stateless sync decision over a set of slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncController;

impl SyncController {
    /// Furthest position among `slots`; ties keep the maximum.
    #[must_use]
    pub fn reference_time<'a, S: MediaSurface + 'a>(
        slots: impl IntoIterator<Item = &'a MediaSlot<S>>,
    ) -> f64 {
        let furthest = slots
            .into_iter()
            .map(MediaSlot::position)
            .fold(f64::NEG_INFINITY, f64::max);
        if furthest.is_finite() { furthest } else { 0.0 }
    }

    /// Toggle synchronized playback.
    ///
    /// `current` is the button label before the press; it is returned
    /// unchanged when nothing is playable.
    pub fn toggle<S: MediaSurface>(
        slots: &mut [MediaSlot<S>],
        current: SyncButtonLabel,
    ) -> SyncReport {
        let playable: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_playable())
            .map(|(index, _)| index)
            .collect();

        if playable.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!("sync toggle with no playable slot");
            return SyncReport {
                action: SyncAction::NoPlayableMedia,
                slots: Vec::new(),
                rejected: Vec::new(),
                notice: Some(NO_PLAYABLE_NOTICE),
                label: current,
            };
        }

        let ids: Vec<SlotId> = playable.iter().map(|&index| slots[index].id()).collect();
        let any_playing = playable.iter().any(|&index| slots[index].is_playing());

        if any_playing {
            for &index in &playable {
                slots[index].surface_mut().pause();
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(slots = ids.len(), "sync pause");
            return SyncReport {
                action: SyncAction::Paused,
                slots: ids,
                rejected: Vec::new(),
                notice: None,
                label: SyncButtonLabel::PlayAll,
            };
        }

        let reference_time = Self::reference_time(playable.iter().map(|&index| &slots[index]));
        for &index in &playable {
            slots[index].surface_mut().seek(reference_time);
        }
        let mut rejected = Vec::new();
        for &index in &playable {
            let slot = &mut slots[index];
            if let Err(error) = slot.surface_mut().request_play() {
                slot.fall_back_to_manual_controls(&error);
                rejected.push((slot.id(), error));
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            slots = ids.len(),
            reference_time,
            rejected = rejected.len(),
            "sync play"
        );
        SyncReport {
            action: SyncAction::Played { reference_time },
            slots: ids,
            rejected,
            notice: None,
            label: SyncButtonLabel::PauseAll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SyncAction, SyncButtonLabel, SyncController};
    use crate::slot::{MediaSlot, SlotId};
    use crate::testing::{ScriptedSurface, SurfaceCall};
    use proptest::prelude::*;

    fn loaded_slots(positions: &[(f64, bool)]) -> Vec<MediaSlot<ScriptedSurface>> {
        positions
            .iter()
            .enumerate()
            .filter_map(|(index, &(position, visible))| {
                let id = SlotId::from_index(index)?;
                let mut slot = MediaSlot::new(id, ScriptedSurface::new().at(position));
                slot.set_visible(visible);
                slot.mark_loaded();
                slot.surface_mut().ready = true;
                Some(slot)
            })
            .collect()
    }

    #[test]
    fn reference_time_of_nothing_is_zero() {
        let slots: Vec<MediaSlot<ScriptedSurface>> = Vec::new();
        assert_eq!(SyncController::reference_time(&slots), 0.0);
    }

    proptest! {
        #[test]
        fn paused_batch_lands_on_the_furthest_visible_position(
            positions in proptest::collection::vec((0.0f64..7200.0, any::<bool>()), 1..=8)
        ) {
            let mut slots = loaded_slots(&positions);
            let furthest = positions
                .iter()
                .filter(|(_, visible)| *visible)
                .map(|(position, _)| *position)
                .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))));

            let report = SyncController::toggle(&mut slots, SyncButtonLabel::PlayAll);
            match furthest {
                None => prop_assert_eq!(report.action, SyncAction::NoPlayableMedia),
                Some(reference_time) => {
                    prop_assert_eq!(report.action, SyncAction::Played { reference_time });
                    for slot in slots.iter().filter(|slot| slot.is_visible()) {
                        prop_assert_eq!(slot.position(), reference_time);
                        prop_assert_eq!(
                            slot.surface().calls(),
                            &[SurfaceCall::Seek(reference_time), SurfaceCall::Play][..]
                        );
                    }
                    for slot in slots.iter().filter(|slot| !slot.is_visible()) {
                        prop_assert!(slot.surface().calls().is_empty());
                    }
                }
            }
        }

        #[test]
        fn consecutive_toggles_alternate(
            positions in proptest::collection::vec(0.0f64..600.0, 1..=8),
            presses in 1usize..12
        ) {
            let visible: Vec<(f64, bool)> = positions.iter().map(|&p| (p, true)).collect();
            let mut slots = loaded_slots(&visible);
            let mut label = SyncButtonLabel::PlayAll;
            for press in 0..presses {
                let report = SyncController::toggle(&mut slots, label);
                let expect_play = press % 2 == 0;
                prop_assert_eq!(
                    matches!(report.action, SyncAction::Played { .. }),
                    expect_play
                );
                label = report.label;
            }
        }
    }
}
