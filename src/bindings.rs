//! DOM event plumbing: scoped listener subscriptions and the JS-facing
//! seek guard handle.
//!
//! Guard listeners are owned by a thread-local registry rather than by the
//! handle, so a handle that JavaScript throws away (and later garbage
//! collects) leaves its guard attached. Only `detach()` removes it.

use crate::config::{EVENT_SEEKED, EVENT_SEEKING, EVENT_TIME_UPDATE};
use crate::guard::SeekGuard;
use crate::{js_error_message, EnhanceError};
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlMediaElement};

/// A registered DOM listener. Dropping it removes the listener again.
pub struct EventSubscription {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventSubscription {
    pub fn listen<F>(
        target: &EventTarget,
        event: &'static str,
        handler: F,
    ) -> Result<Self, EnhanceError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| {
                EnhanceError::Listener(format!("{}: {}", event, js_error_message(&e)))
            })?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Keep the listener registered for the rest of the page's life.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let removed = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
        if let Err(e) = removed {
            warn!("Failed to remove {} listener: {}", self.event, js_error_message(&e));
        }
    }
}

thread_local! {
    /// Listeners of every attached guard, keyed by attachment id.
    static ATTACHMENTS: RefCell<HashMap<u32, Vec<EventSubscription>>> =
        RefCell::new(HashMap::new());
    static NEXT_ATTACHMENT_ID: Cell<u32> = Cell::new(0);
}

/// Number of guards currently attached on this page.
pub fn attached_guards() -> usize {
    ATTACHMENTS.with(|a| a.borrow().len())
}

/// Run `f` on the guard unless an earlier handler still holds it.
fn with_guard(guard: &RefCell<SeekGuard>, event: &str, f: impl FnOnce(&mut SeekGuard)) {
    match guard.try_borrow_mut() {
        Ok(mut guard) => f(&mut *guard),
        Err(_) => warn!("Dropped {} notification, the seek guard was busy", event),
    }
}

/// A seek guard attached to one media element.
///
/// The guard stays attached until `detach()` is called; dropping the handle
/// does not remove it.
#[wasm_bindgen]
pub struct SeekGuardHandle {
    id: u32,
    element: HtmlMediaElement,
    guard: Rc<RefCell<SeekGuard>>,
}

impl SeekGuardHandle {
    /// Subscribe a fresh guard to `timeupdate`, `seeking` and `seeked`.
    pub fn attach(element: HtmlMediaElement) -> Result<Self, EnhanceError> {
        let guard = Rc::new(RefCell::new(SeekGuard::new()));
        let target: &EventTarget = element.as_ref();

        let on_time_update = {
            let guard = guard.clone();
            let media = element.clone();
            EventSubscription::listen(target, EVENT_TIME_UPDATE, move |_| {
                with_guard(&guard, EVENT_TIME_UPDATE, |g| {
                    g.on_position_advanced(&media);
                });
            })?
        };

        let on_seeking = {
            let guard = guard.clone();
            let mut media = element.clone();
            EventSubscription::listen(target, EVENT_SEEKING, move |_| {
                with_guard(&guard, EVENT_SEEKING, |g| {
                    g.on_seeking(&mut media);
                });
            })?
        };

        let on_seeked = {
            let guard = guard.clone();
            EventSubscription::listen(target, EVENT_SEEKED, move |_| {
                with_guard(&guard, EVENT_SEEKED, SeekGuard::on_seeked);
            })?
        };

        let id = NEXT_ATTACHMENT_ID.with(|next| {
            let id = next.get();
            next.set(id.wrapping_add(1));
            id
        });
        ATTACHMENTS.with(|a| {
            a.borrow_mut()
                .insert(id, vec![on_time_update, on_seeking, on_seeked]);
        });

        info!("Seek guard attached to #{}", element.id());
        Ok(Self { id, element, guard })
    }
}

#[wasm_bindgen]
impl SeekGuardHandle {
    #[wasm_bindgen(getter, js_name = maxWatchedTime)]
    pub fn max_watched_time(&self) -> f64 {
        self.guard.borrow().max_watched_time()
    }

    /// `{ maxWatchedTime, currentTime, duration, phase }`
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.guard.borrow().snapshot(&self.element);
        serde_wasm_bindgen::to_value(&snapshot).map_err(JsValue::from)
    }

    /// Remove all listeners. The element keeps whatever position it has.
    pub fn detach(self) {
        let removed = ATTACHMENTS.with(|a| a.borrow_mut().remove(&self.id));
        if removed.is_some() {
            debug!("Seek guard detached from #{}", self.element.id());
        }
    }
}

/// Attach a guard to the media element with the given id.
///
/// A missing element, or one that is not `<video>`/`<audio>`, is a silent no-op.
pub fn attach_by_id(
    document: &Document,
    element_id: &str,
) -> Result<Option<SeekGuardHandle>, EnhanceError> {
    let Some(element) = document.get_element_by_id(element_id) else {
        debug!("No #{} on this page, seek guard not attached", element_id);
        return Ok(None);
    };
    match element.dyn_into::<HtmlMediaElement>() {
        Ok(media) => SeekGuardHandle::attach(media).map(Some),
        Err(_) => {
            warn!("#{} is not a media element, seek guard not attached", element_id);
            Ok(None)
        }
    }
}
