//! Client-side form validation styling.

use crate::bindings::EventSubscription;
use crate::{js_error_message, EnhanceError};
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlFormElement};

pub const EVENT_SUBMIT: &str = "submit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed,
    Block,
}

impl SubmitDecision {
    pub fn from_validity(valid: bool) -> Self {
        if valid {
            SubmitDecision::Proceed
        } else {
            SubmitDecision::Block
        }
    }
}

/// Hook every form matching `selector`: invalid submissions are stopped and
/// every submitted form gets `validated_class`.
pub fn install(
    document: &Document,
    selector: &str,
    validated_class: &str,
) -> Result<Vec<EventSubscription>, EnhanceError> {
    let forms = document.query_selector_all(selector).map_err(|e| {
        EnhanceError::InvalidSelector(format!("{}: {}", selector, js_error_message(&e)))
    })?;

    let mut subscriptions = Vec::with_capacity(forms.length() as usize);
    for i in 0..forms.length() {
        let Some(form) = forms.item(i).and_then(|n| n.dyn_into::<HtmlFormElement>().ok()) else {
            continue;
        };
        let class = validated_class.to_string();
        let handler_form = form.clone();
        subscriptions.push(EventSubscription::listen(&form, EVENT_SUBMIT, move |event| {
            let decision = SubmitDecision::from_validity(handler_form.check_validity());
            if decision == SubmitDecision::Block {
                debug!("Blocked submission of invalid form");
                event.prevent_default();
                event.stop_propagation();
            }
            if let Err(e) = handler_form.class_list().add_1(&class) {
                warn!("Could not add {} to form: {}", class, js_error_message(&e));
            }
        })?);
    }

    Ok(subscriptions)
}
