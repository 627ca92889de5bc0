//! DOM wiring tests. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use seek_guard::bindings::{attach_by_id, attached_guards};
use seek_guard::{enhance_document, forms, lockdown, progress, EnhanceConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Element, Event, EventInit, HtmlElement, HtmlMediaElement, KeyboardEvent, KeyboardEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn append(tag: &str, id: &str) -> Element {
    let document = gloo_utils::document();
    let element = document.create_element(tag).unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn video(id: &str) -> HtmlMediaElement {
    append("video", id).dyn_into::<HtmlMediaElement>().unwrap()
}

fn cancelable(kind: &str) -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    Event::new_with_event_init_dict(kind, &init).unwrap()
}

fn key_down(key: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
}

/// Request a seek on an element with no media loaded, then deliver `seeking`.
fn seek_to(media: &HtmlMediaElement, seconds: f64) {
    media.set_current_time(seconds);
    media.dispatch_event(&Event::new("seeking").unwrap()).unwrap();
}

#[wasm_bindgen_test]
fn missing_element_is_a_silent_no_op() {
    let document = gloo_utils::document();
    let before = attached_guards();
    assert!(attach_by_id(&document, "no-such-player").unwrap().is_none());
    assert_eq!(attached_guards(), before);
}

#[wasm_bindgen_test]
fn non_media_element_is_skipped() {
    let document = gloo_utils::document();
    let div = append("div", "not-a-player");
    let before = attached_guards();
    assert!(attach_by_id(&document, "not-a-player").unwrap().is_none());
    assert_eq!(attached_guards(), before);
    div.remove();
}

#[wasm_bindgen_test]
fn forward_seek_on_fresh_video_is_clamped_to_zero() {
    let document = gloo_utils::document();
    let media = video("fresh-player");
    let handle = attach_by_id(&document, "fresh-player").unwrap().unwrap();

    seek_to(&media, 45.0);
    assert_eq!(media.current_time(), 0.0);
    assert_eq!(handle.max_watched_time(), 0.0);

    handle.detach();
    media.remove();
}

#[wasm_bindgen_test]
fn dropped_handle_keeps_guard_attached() {
    let document = gloo_utils::document();
    let media = video("dropped-handle-player");
    let before = attached_guards();
    let handle = attach_by_id(&document, "dropped-handle-player").unwrap().unwrap();
    drop(handle);
    assert_eq!(attached_guards(), before + 1);

    seek_to(&media, 30.0);
    assert_eq!(media.current_time(), 0.0);
    media.remove();
}

#[wasm_bindgen_test]
fn detach_removes_the_listeners() {
    let document = gloo_utils::document();
    let media = video("detached-player");
    let before = attached_guards();
    let handle = attach_by_id(&document, "detached-player").unwrap().unwrap();
    handle.detach();
    assert_eq!(attached_guards(), before);

    seek_to(&media, 45.0);
    assert_eq!(media.current_time(), 45.0);
    media.remove();
}

#[wasm_bindgen_test]
fn blocked_keys_only_on_the_player() {
    let document = gloo_utils::document();
    let player = append("video", "lockdown-player");
    let other = append("div", "lockdown-other");
    let subscriptions = lockdown::install(&document, &player, &EnhanceConfig::default()).unwrap();
    assert_eq!(subscriptions.len(), 2);

    let on_player = key_down("ArrowRight");
    player.dispatch_event(&on_player).unwrap();
    assert!(on_player.default_prevented());

    let unlisted = key_down("Enter");
    player.dispatch_event(&unlisted).unwrap();
    assert!(!unlisted.default_prevented());

    let elsewhere = key_down("ArrowRight");
    other.dispatch_event(&elsewhere).unwrap();
    assert!(!elsewhere.default_prevented());

    let menu = cancelable("contextmenu");
    player.dispatch_event(&menu).unwrap();
    assert!(menu.default_prevented());

    drop(subscriptions);
    player.remove();
    other.remove();
}

#[wasm_bindgen_test]
fn invalid_form_submission_is_stopped_and_marked() {
    let document = gloo_utils::document();
    let form = append("form", "invalid-form");
    let input = document.create_element("input").unwrap();
    input.set_attribute("required", "").unwrap();
    form.append_child(&input).unwrap();

    let subscriptions = forms::install(&document, "#invalid-form", "was-validated").unwrap();
    let submit = cancelable("submit");
    form.dispatch_event(&submit).unwrap();
    assert!(submit.default_prevented());
    assert!(form.class_list().contains("was-validated"));

    drop(subscriptions);
    form.remove();
}

#[wasm_bindgen_test]
fn valid_form_submits_and_is_marked() {
    let document = gloo_utils::document();
    let form = append("form", "valid-form");

    let subscriptions = forms::install(&document, "#valid-form", "was-validated").unwrap();
    let submit = cancelable("submit");
    form.dispatch_event(&submit).unwrap();
    assert!(!submit.default_prevented());
    assert!(form.class_list().contains("was-validated"));

    drop(subscriptions);
    form.remove();
}

#[wasm_bindgen_test]
fn progress_bars_start_collapsed() {
    let document = gloo_utils::document();
    let bar = append("div", "progress-under-test");
    bar.set_class_name("progress-under-test");
    bar.set_attribute("aria-valuenow", "40").unwrap();
    let unset = append("div", "progress-without-value");
    unset.set_class_name("progress-under-test");

    let config = EnhanceConfig {
        progress_selector: ".progress-under-test".to_string(),
        ..EnhanceConfig::default()
    };
    assert_eq!(progress::animate(&document, &config).unwrap(), 1);
    let style = bar.dyn_ref::<HtmlElement>().unwrap().style();
    assert_eq!(style.get_property_value("width").unwrap(), "0%");

    bar.remove();
    unset.remove();
}

#[wasm_bindgen_test]
fn page_without_player_enhances_the_rest() {
    let document = gloo_utils::document();
    let config = EnhanceConfig {
        player_id: "absent-player".to_string(),
        form_selector: "form.none-on-this-page".to_string(),
        progress_selector: ".none-on-this-page".to_string(),
        ..EnhanceConfig::default()
    };
    let enhancements = enhance_document(&document, &config).unwrap();
    assert!(enhancements.seek_guard.is_none());
    assert!(enhancements.subscriptions.is_empty());
    assert_eq!(enhancements.progress_bars, 0);
}
