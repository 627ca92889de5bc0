//! Progress bar fill: collapse each bar, then grow it to its `aria-valuenow`.

use crate::config::{EnhanceConfig, PROGRESS_VALUE_ATTR};
use crate::{js_error_message, EnhanceError};
use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, HtmlElement};

/// Parse an `aria-valuenow` value into a percentage in `[0, 100]`.
pub fn parse_percent(raw: Option<&str>) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}

/// CSS width for a percentage, e.g. `42%` or `12.5%`.
pub fn width_style(percent: f64) -> String {
    format!("{}%", percent)
}

fn set_style(
    style: &CssStyleDeclaration,
    property: &str,
    value: &str,
) -> Result<(), EnhanceError> {
    style
        .set_property(property, value)
        .map_err(|e| EnhanceError::Dom(format!("{}: {}", property, js_error_message(&e))))
}

/// Start the fill animation on every bar; returns how many bars were scheduled.
pub fn animate(document: &Document, config: &EnhanceConfig) -> Result<usize, EnhanceError> {
    let bars = document.query_selector_all(&config.progress_selector).map_err(|e| {
        EnhanceError::InvalidSelector(format!(
            "{}: {}",
            config.progress_selector,
            js_error_message(&e)
        ))
    })?;

    let mut scheduled = 0;
    for i in 0..bars.length() {
        let Some(bar) = bars.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let Some(percent) = parse_percent(bar.get_attribute(PROGRESS_VALUE_ATTR).as_deref()) else {
            continue;
        };

        let style = bar.style();
        set_style(&style, "width", "0%")?;

        let transition = config.progress_transition.clone();
        Timeout::new(config.progress_delay_ms, move || {
            let result = set_style(&style, "transition", &transition)
                .and_then(|_| set_style(&style, "width", &width_style(percent)));
            if let Err(e) = result {
                warn!("Progress bar fill failed: {}", e);
            }
        })
        .forget();
        scheduled += 1;
    }

    Ok(scheduled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_values() {
        assert_eq!(parse_percent(Some("42")), Some(42.0));
        assert_eq!(parse_percent(Some(" 12.5 ")), Some(12.5));
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(parse_percent(Some("150")), Some(100.0));
        assert_eq!(parse_percent(Some("-3")), Some(0.0));
    }

    #[test]
    fn rejects_missing_or_garbage() {
        assert_eq!(parse_percent(None), None);
        assert_eq!(parse_percent(Some("")), None);
        assert_eq!(parse_percent(Some("half")), None);
        assert_eq!(parse_percent(Some("NaN")), None);
        assert_eq!(parse_percent(Some("inf")), None);
    }

    #[test]
    fn width_has_no_trailing_zero() {
        assert_eq!(width_style(42.0), "42%");
        assert_eq!(width_style(12.5), "12.5%");
        assert_eq!(width_style(0.0), "0%");
    }
}
