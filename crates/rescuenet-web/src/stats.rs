#![forbid(unsafe_code)]

//! Headline statistics ("12,450 donors") rendered by count-up counters.
//!
//! Markup declares the final number on the element:
//!
//! ```html
//! <span class="stat-number" data-count-to="12,450+">0</span>
//! ```
//!
//! The counter writes its formatted value into the element's text on every
//! change.

use rescuenet_runtime::{Binding, BindingScope, CountAnimation, format_count};

/// Attribute holding a counter's target value.
pub const COUNT_ATTR: &str = "data-count-to";

/// Parse a target such as `"12,450"`, `"98%"` or `"50+"`.
///
/// Thousands separators and a single trailing `+` or `%` are accepted.
/// Anything else, including non-finite numbers, yields `None`.
#[must_use]
pub fn parse_count_target(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let raw = raw
        .strip_suffix('+')
        .or_else(|| raw.strip_suffix('%'))
        .unwrap_or(raw);
    let digits: String = raw.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Push the counter's formatted value into `sink`, now and on every change,
/// for as long as `scope` holds the subscription. Returns the text view.
pub fn bind_count_text(
    counter: &CountAnimation,
    scope: &mut BindingScope,
    sink: impl Fn(String) + 'static,
) -> Binding<String> {
    scope.sync(&counter.value(), |v| format_count(*v), sink)
}
