//! Entry point: installs the panic hook and logger, then enhances the page
//! once the DOM has been parsed.

use log::{error, LevelFilter};
use seek_guard::{enhance_document, logging, EnhanceConfig, EventSubscription};

const EVENT_DOM_CONTENT_LOADED: &str = "DOMContentLoaded";

fn run() {
    let document = gloo_utils::document();
    match enhance_document(&document, &EnhanceConfig::default()) {
        // Dropping the handle leaves the guard attached.
        Ok(enhancements) => drop(enhancements.into_guard()),
        Err(e) => error!("Page enhancement failed: {}", e),
    }
}

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Info);

    let document = gloo_utils::document();
    if document.ready_state() != "loading" {
        run();
        return;
    }
    match EventSubscription::listen(&document, EVENT_DOM_CONTENT_LOADED, |_| run()) {
        Ok(subscription) => subscription.forget(),
        Err(e) => error!("{}", e),
    }
}
