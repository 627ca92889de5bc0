//! The playable-media capability the seek guard is written against.

use web_sys::HtmlMediaElement;

/// Minimal view of a playable media element.
///
/// Positions and durations are in seconds. `set_current_time` is only called by
/// the guard when it clamps a forward seek.
pub trait MediaElement {
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    fn duration(&self) -> f64;
    fn seeking(&self) -> bool;
}

impl MediaElement for HtmlMediaElement {
    fn current_time(&self) -> f64 {
        HtmlMediaElement::current_time(self)
    }

    fn set_current_time(&mut self, seconds: f64) {
        HtmlMediaElement::set_current_time(self, seconds);
    }

    fn duration(&self) -> f64 {
        HtmlMediaElement::duration(self)
    }

    fn seeking(&self) -> bool {
        HtmlMediaElement::seeking(self)
    }
}

/// In-memory media element for tests.
///
/// Mirrors the browser's handling of writes: positions are clamped to
/// `[0, duration]`.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct FakeMedia {
    pub position: f64,
    pub duration: f64,
    pub seeking: bool,
    pub writes: Vec<f64>,
}

#[cfg(test)]
impl FakeMedia {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            position: 0.0,
            duration,
            seeking: false,
            writes: Vec::new(),
        }
    }

    /// Natural playback moved the position forward.
    pub fn play_to(&mut self, seconds: f64) {
        self.seeking = false;
        self.position = seconds.min(self.duration);
    }

    /// A user or script started a seek.
    pub fn request_seek(&mut self, seconds: f64) {
        self.seeking = true;
        self.position = seconds.clamp(0.0, self.duration);
    }

    pub fn finish_seek(&mut self) {
        self.seeking = false;
    }
}

#[cfg(test)]
impl MediaElement for FakeMedia {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.writes.push(seconds);
        self.position = seconds.clamp(0.0, self.duration);
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn seeking(&self) -> bool {
        self.seeking
    }
}
