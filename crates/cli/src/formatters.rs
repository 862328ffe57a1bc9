//! Shared text formatting utilities for consistent styling

use console::style;
use hostcli::project::display_text;
use serde_json::Value;
use std::fmt::Display;

/// Format text with key field styling (bold and cyan when colors enabled)
pub(crate) fn format_key<T: Display>(text: T, use_colors: bool) -> String {
    let text = text.to_string();

    if use_colors {
        style(text).bold().cyan().to_string()
    } else {
        text
    }
}

/// Text for one table cell: strings verbatim, null as empty, anything else as JSON
pub(crate) fn format_value(value: &Value) -> String {
    display_text(value)
}
