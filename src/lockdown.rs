//! Player lockdown: no context menu, no transport keyboard shortcuts.

use crate::bindings::EventSubscription;
use crate::config::EnhanceConfig;
use crate::EnhanceError;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent};

pub const EVENT_CONTEXT_MENU: &str = "contextmenu";
pub const EVENT_KEY_DOWN: &str = "keydown";

/// Whether a `KeyboardEvent.key` value is on the block list.
pub fn is_blocked_key(key: &str, blocked_keys: &[String]) -> bool {
    blocked_keys.iter().any(|k| k == key)
}

/// Install the lockdown listeners for `player`.
pub fn install(
    document: &Document,
    player: &Element,
    config: &EnhanceConfig,
) -> Result<Vec<EventSubscription>, EnhanceError> {
    let mut subscriptions = Vec::with_capacity(2);

    if config.block_context_menu {
        subscriptions.push(EventSubscription::listen(player, EVENT_CONTEXT_MENU, |event| {
            event.prevent_default();
        })?);
    }

    if !config.blocked_keys.is_empty() {
        let player = player.clone();
        let blocked_keys = config.blocked_keys.clone();
        subscriptions.push(EventSubscription::listen(document, EVENT_KEY_DOWN, move |event| {
            let on_player = event
                .target()
                .is_some_and(|target| js_sys::Object::is(&target, &player));
            if !on_player {
                return;
            }
            if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                let key = key_event.key();
                if is_blocked_key(&key, &blocked_keys) {
                    debug!("Blocked {:?} on the player", key);
                    event.prevent_default();
                }
            }
        })?);
    }

    Ok(subscriptions)
}
