#![forbid(unsafe_code)]

//! Media slots and synchronized playback for the vidgrid comparison grid.
//!
//! The browser side implements [`MediaSurface`] over a `<video>` element;
//! everything else (slot lifecycle, mute flag, the sync decision) lives here
//! and runs natively in tests.

pub mod deck;
pub mod slot;
pub mod sync;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use deck::{
    AutoplayOutcome, DEFAULT_AUTOPLAY_DELAY, DeckConfig, LoadReport, MediaDeck, MuteButtonLabel,
    MuteReport,
};
pub use slot::{MediaError, MediaSlot, MediaSurface, PlaybackError, SlotId};
pub use sync::{NO_PLAYABLE_NOTICE, SyncAction, SyncButtonLabel, SyncController, SyncReport};
