//! Output formatting utilities for the CLI.

pub mod progress;
pub mod table;

use serde::Serialize;

/// Command result renderable as human text or JSON
pub trait CommandOutput: Serialize {
    /// Styled terminal rendering
    fn to_human(&self) -> String;

    /// JSON value printed under `--json`
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print `result` in the selected mode
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Format a ratio in `[0, 1]` as a percentage.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
