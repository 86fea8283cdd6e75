//! One grid slot and the surface that plays its video.

use core::time::Duration;
use std::fmt;

use serde::{Deserialize, Serialize};
use vidgrid_layout::MAX_SLOTS;

/// Stable one-based slot number (`1..=8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SlotId(u8);

impl SlotId {
    pub const FIRST: Self = Self(1);

    pub fn new(raw: u32) -> Result<Self, MediaError> {
        match u8::try_from(raw) {
            Ok(n) if n >= 1 && usize::from(n) <= MAX_SLOTS => Ok(Self(n)),
            _ => Err(MediaError::InvalidSlot { requested: raw }),
        }
    }

    /// Slot for a zero-based grid position. `None` past the last slot.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < MAX_SLOTS).then(|| Self(index as u8 + 1))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based grid position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=MAX_SLOTS as u8).map(Self)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot{}", self.0)
    }
}

impl TryFrom<u32> for SlotId {
    type Error = MediaError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SlotId> for u32 {
    fn from(id: SlotId) -> Self {
        u32::from(id.0)
    }
}

/// Why a play request did not start playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum PlaybackError {
    /// Blocked by autoplay policy.
    NotAllowed(String),
    /// No decodable source.
    NotSupported(String),
    /// Interrupted by a new load or a pause.
    Aborted(String),
    Other(String),
}

impl PlaybackError {
    /// Classify a DOMException name such as `"NotAllowedError"`.
    #[must_use]
    pub fn from_dom_exception(name: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match name {
            "NotAllowedError" => Self::NotAllowed(message),
            "NotSupportedError" => Self::NotSupported(message),
            "AbortError" => Self::Aborted(message),
            _ => Self::Other(message),
        }
    }

    #[must_use]
    pub const fn is_policy_block(&self) -> bool {
        matches!(self, Self::NotAllowed(_))
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAllowed(msg) => write!(f, "playback blocked by autoplay policy: {msg}"),
            Self::NotSupported(msg) => write!(f, "source not playable: {msg}"),
            Self::Aborted(msg) => write!(f, "playback aborted: {msg}"),
            Self::Other(msg) => write!(f, "playback failed: {msg}"),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Slot-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    InvalidSlot { requested: u32 },
    AlreadyLoaded { slot: SlotId },
    SourceRejected { slot: SlotId, reason: String },
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSlot { requested } => {
                write!(f, "slot {requested} does not exist (expected 1..={MAX_SLOTS})")
            }
            Self::AlreadyLoaded { slot } => write!(f, "{slot} already has a video"),
            Self::SourceRejected { slot, reason } => {
                write!(f, "{slot} rejected its source: {reason}")
            }
        }
    }
}

impl std::error::Error for MediaError {}

/// Playback surface behind one slot (a `<video>` element in the browser).
///
/// Reads reflect the live element. `request_play` is fire-and-forget: `Ok`
/// means the request was issued, and an asynchronous rejection is the
/// surface's to handle by calling its own [`Self::show_manual_controls`].
pub trait MediaSurface {
    /// Handle to a user-selected file.
    type Source;

    fn set_source(&mut self, source: Self::Source) -> Result<(), String>;
    fn hide_upload_affordance(&mut self);

    fn is_playing(&self) -> bool;
    /// Enough data buffered to seek and play.
    fn is_ready(&self) -> bool;
    /// Playback position in seconds.
    fn position(&self) -> f64;

    fn seek(&mut self, seconds: f64);
    fn pause(&mut self);
    fn request_play(&mut self) -> Result<(), PlaybackError>;

    /// Play once after `delay`. The default plays immediately.
    fn request_play_after(&mut self, delay: Duration) -> Result<(), PlaybackError> {
        let _ = delay;
        self.request_play()
    }

    fn set_muted(&mut self, muted: bool);
    fn show_manual_controls(&mut self);
}

/// Slot state owned by the deck.
#[derive(Debug, Clone)]
pub struct MediaSlot<S> {
    id: SlotId,
    loaded: bool,
    visible: bool,
    manual_controls: bool,
    surface: S,
}

impl<S: MediaSurface> MediaSlot<S> {
    /// Hidden, unloaded slot.
    #[must_use]
    pub const fn new(id: SlotId, surface: S) -> Self {
        Self {
            id,
            loaded: false,
            visible: false,
            manual_controls: false,
            surface,
        }
    }

    #[must_use]
    pub const fn id(&self) -> SlotId {
        self.id
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the native controls were exposed after a rejected play.
    #[must_use]
    pub const fn has_manual_controls(&self) -> bool {
        self.manual_controls
    }

    #[must_use]
    pub fn is_ready_for_playback(&self) -> bool {
        self.surface.is_ready()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.surface.is_playing()
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.surface.position()
    }

    /// Visible, loaded and buffered.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.visible && self.loaded && self.surface.is_ready()
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Expose manual playback on this slot only.
    pub(crate) fn fall_back_to_manual_controls(&mut self, error: &PlaybackError) {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            slot = %self.id,
            policy_block = error.is_policy_block(),
            "play rejected, exposing manual controls: {error}"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = error;
        self.manual_controls = true;
        self.surface.show_manual_controls();
    }
}
