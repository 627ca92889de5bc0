//! Page enhancements for the course player pages, compiled to WebAssembly.
//!
//! The central piece is the [`guard::SeekGuard`]: it lets viewers rewind freely
//! but never skip ahead of what they have actually watched. Alongside it the
//! crate wires up the player lockdown, form validation styling and progress bar
//! fills used by the same pages.

use log::info;
use std::fmt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

pub mod bindings;
pub mod config;
pub mod forms;
pub mod guard;
pub mod lockdown;
pub mod logging;
pub mod media;
pub mod progress;

pub use bindings::{EventSubscription, SeekGuardHandle};
pub use config::EnhanceConfig;
pub use guard::{Phase, PlaybackSnapshot, PlaybackState, SeekGuard, SeekOutcome};
pub use media::MediaElement;

#[derive(Debug, Clone, PartialEq)]
pub enum EnhanceError {
    NoWindow,
    NoDocument,
    InvalidSelector(String),
    Listener(String),
    Dom(String),
    InvalidConfig(String),
}

impl fmt::Display for EnhanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnhanceError::NoWindow => write!(f, "No global window available"),
            EnhanceError::NoDocument => write!(f, "Window has no document"),
            EnhanceError::InvalidSelector(detail) => write!(f, "Invalid selector {}", detail),
            EnhanceError::Listener(detail) => write!(f, "Failed to add event listener {}", detail),
            EnhanceError::Dom(detail) => write!(f, "DOM update failed: {}", detail),
            EnhanceError::InvalidConfig(detail) => write!(f, "Invalid configuration: {}", detail),
        }
    }
}

impl std::error::Error for EnhanceError {}

impl From<EnhanceError> for JsValue {
    fn from(err: EnhanceError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Everything `enhance_document` attached.
pub struct PageEnhancements {
    pub seek_guard: Option<SeekGuardHandle>,
    pub subscriptions: Vec<EventSubscription>,
    pub progress_bars: usize,
}

impl PageEnhancements {
    /// Keep the page-level listeners alive for the page's lifetime and hand
    /// back the seek guard, if one was attached. The guard stays attached
    /// whether or not the handle is kept.
    pub fn into_guard(self) -> Option<SeekGuardHandle> {
        for subscription in self.subscriptions {
            subscription.forget();
        }
        self.seek_guard
    }
}

/// Apply every enhancement to `document`.
///
/// Elements the page does not have are skipped silently.
pub fn enhance_document(
    document: &Document,
    config: &EnhanceConfig,
) -> Result<PageEnhancements, EnhanceError> {
    let mut subscriptions = Vec::new();

    let seek_guard = bindings::attach_by_id(document, &config.player_id)?;
    if let Some(player) = document.get_element_by_id(&config.player_id) {
        subscriptions.extend(lockdown::install(document, &player, config)?);
    }

    subscriptions.extend(forms::install(
        document,
        &config.form_selector,
        &config.validated_class,
    )?);
    let progress_bars = progress::animate(document, config)?;

    info!(
        "Page enhanced: seek guard {}, {} listeners, {} progress bars",
        if seek_guard.is_some() { "attached" } else { "skipped" },
        subscriptions.len(),
        progress_bars
    );

    Ok(PageEnhancements {
        seek_guard,
        subscriptions,
        progress_bars,
    })
}

fn current_document() -> Result<Document, EnhanceError> {
    web_sys::window()
        .ok_or(EnhanceError::NoWindow)?
        .document()
        .ok_or(EnhanceError::NoDocument)
}

fn enhance_current_page(config: &EnhanceConfig) -> Result<Option<SeekGuardHandle>, EnhanceError> {
    let document = current_document()?;
    Ok(enhance_document(&document, config)?.into_guard())
}

/// Attach a seek guard to the media element with id `element_id`.
/// Returns `undefined` when the page has no such element.
///
/// The guard stays attached even if the returned handle is discarded; keep the
/// handle only to inspect the guard or to `detach()` it.
#[wasm_bindgen(js_name = attachSeekGuard)]
pub fn attach_seek_guard(element_id: &str) -> Result<Option<SeekGuardHandle>, JsValue> {
    let document = current_document()?;
    Ok(bindings::attach_by_id(&document, element_id)?)
}

/// Apply all enhancements with the default configuration.
#[wasm_bindgen(js_name = enhancePage)]
pub fn enhance_page() -> Result<Option<SeekGuardHandle>, JsValue> {
    Ok(enhance_current_page(&EnhanceConfig::default())?)
}

/// Apply all enhancements with a configuration object, e.g.
/// `enhancePageWith({ playerId: "lecture", blockedKeys: [" "] })`.
#[wasm_bindgen(js_name = enhancePageWith)]
pub fn enhance_page_with(config: JsValue) -> Result<Option<SeekGuardHandle>, JsValue> {
    let config = EnhanceConfig::from_js(config)?;
    Ok(enhance_current_page(&config)?)
}

#[wasm_bindgen(js_name = enhancePageWithJson)]
pub fn enhance_page_with_json(json: &str) -> Result<Option<SeekGuardHandle>, JsValue> {
    let config = EnhanceConfig::from_json(json)?;
    Ok(enhance_current_page(&config)?)
}
