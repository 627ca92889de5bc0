//! Monotonic seek guard.
//!
//! Tracks the furthest position reached through normal playback (the
//! *frontier*) and clamps any seek that would jump past it. Rewinding is never
//! restricted, and seeking never moves the frontier.
//!
//! # State machine
//! - `Playing`: `timeupdate` notifications may raise the frontier.
//! - `Seeking`: `timeupdate` notifications are ignored; `seeking`
//!   notifications are checked against the frontier.
//!
//! `Playing -> Seeking` on seek start, `Seeking -> Playing` on seek completion.
//! A seek counts as complete on `seeked`, or on the first `timeupdate` that
//! finds the element's own `seeking` flag cleared. Reloading an element mid-seek
//! clears the flag without ever firing `seeked`.

use crate::media::MediaElement;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Playing,
    Seeking,
}

/// Per-attachment playback state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub max_watched_time: f64,
    pub phase: Phase,
}

/// What the guard did with a seek notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekOutcome {
    Allowed { position: f64 },
    Clamped { requested: f64, clamped_to: f64 },
}

/// Read-only view handed out to JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub max_watched_time: f64,
    pub current_time: f64,
    pub duration: f64,
    pub phase: Phase,
}

#[derive(Debug, Default)]
pub struct SeekGuard {
    state: PlaybackState,
}

impl SeekGuard {
    /// A fresh guard always starts with a frontier of 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_watched_time(&self) -> f64 {
        self.state.max_watched_time
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Handle a "position advanced" notification.
    ///
    /// Returns `true` when the frontier moved.
    pub fn on_position_advanced<M: MediaElement + ?Sized>(&mut self, media: &M) -> bool {
        if media.seeking() {
            return false;
        }
        if self.state.phase == Phase::Seeking {
            debug!("Seek finished, tracking playback again");
            self.state.phase = Phase::Playing;
        }
        let position = media.current_time();
        // NaN fails this comparison, so an unloaded element never moves the frontier.
        if position > self.state.max_watched_time {
            self.state.max_watched_time = position;
            true
        } else {
            false
        }
    }

    /// Handle a "seek in progress" notification, clamping forward seeks.
    pub fn on_seeking<M: MediaElement + ?Sized>(&mut self, media: &mut M) -> SeekOutcome {
        self.state.phase = Phase::Seeking;
        let requested = media.current_time();
        let frontier = self.state.max_watched_time;

        if requested <= frontier {
            return SeekOutcome::Allowed {
                position: requested,
            };
        }

        debug!(
            "Seek to {:.3}s is past the watched frontier, clamping to {:.3}s",
            requested, frontier
        );
        media.set_current_time(frontier);
        SeekOutcome::Clamped {
            requested,
            clamped_to: frontier,
        }
    }

    /// Handle a "seek completed" notification.
    pub fn on_seeked(&mut self) {
        self.state.phase = Phase::Playing;
    }

    pub fn snapshot<M: MediaElement + ?Sized>(&self, media: &M) -> PlaybackSnapshot {
        PlaybackSnapshot {
            max_watched_time: self.state.max_watched_time,
            current_time: media.current_time(),
            duration: media.duration(),
            phase: self.state.phase,
        }
    }
}
