//! Scripted [`MediaSurface`] for tests that need no browser.

use core::time::Duration;

use crate::slot::{MediaSurface, PlaybackError};

/// One call made on a [`ScriptedSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetSource(String),
    HideUpload,
    Seek(f64),
    Pause,
    Play,
    PlayAfter(Duration),
    SetMuted(bool),
    ShowControls,
}

/// In-memory surface that records every call.
///
/// Sources are file names. Once a source is set the surface reports
/// `ready_on_load`; a successful play flips `playing` on.
#[derive(Debug, Clone)]
pub struct ScriptedSurface {
    pub source: Option<String>,
    pub ready: bool,
    pub ready_on_load: bool,
    pub playing: bool,
    pub position: f64,
    pub muted: Option<bool>,
    pub upload_visible: bool,
    pub controls: bool,
    pub reject_play: Option<PlaybackError>,
    pub reject_source: Option<String>,
    pub calls: Vec<SurfaceCall>,
}

impl Default for ScriptedSurface {
    fn default() -> Self {
        Self {
            source: None,
            ready: false,
            ready_on_load: true,
            playing: false,
            position: 0.0,
            muted: None,
            upload_visible: true,
            controls: false,
            reject_play: None,
            reject_source: None,
            calls: Vec::new(),
        }
    }
}

impl ScriptedSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn at(mut self, position: f64) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn rejecting_play(mut self, error: PlaybackError) -> Self {
        self.reject_play = Some(error);
        self
    }

    #[must_use]
    pub fn never_ready(mut self) -> Self {
        self.ready_on_load = false;
        self
    }

    /// Calls recorded since the last [`Self::clear_calls`].
    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn try_play(&mut self) -> Result<(), PlaybackError> {
        if let Some(error) = &self.reject_play {
            return Err(error.clone());
        }
        self.playing = true;
        Ok(())
    }
}

impl MediaSurface for ScriptedSurface {
    type Source = String;

    fn set_source(&mut self, source: String) -> Result<(), String> {
        if let Some(reason) = &self.reject_source {
            return Err(reason.clone());
        }
        self.calls.push(SurfaceCall::SetSource(source.clone()));
        self.source = Some(source);
        self.ready = self.ready_on_load;
        Ok(())
    }

    fn hide_upload_affordance(&mut self) {
        self.calls.push(SurfaceCall::HideUpload);
        self.upload_visible = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, seconds: f64) {
        self.calls.push(SurfaceCall::Seek(seconds));
        self.position = seconds;
    }

    fn pause(&mut self) {
        self.calls.push(SurfaceCall::Pause);
        self.playing = false;
    }

    fn request_play(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(SurfaceCall::Play);
        self.try_play()
    }

    fn request_play_after(&mut self, delay: Duration) -> Result<(), PlaybackError> {
        self.calls.push(SurfaceCall::PlayAfter(delay));
        self.try_play()
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.push(SurfaceCall::SetMuted(muted));
        self.muted = Some(muted);
    }

    fn show_manual_controls(&mut self) {
        self.calls.push(SurfaceCall::ShowControls);
        self.controls = true;
    }
}
