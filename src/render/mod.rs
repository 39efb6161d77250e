//! Result rendering behind a capability interface.
//!
//! The renderer never talks to a terminal directly: it writes named fields
//! into a `ResultSink`. The TUI and the CLI both render into an in-memory
//! `ResultPanel` and draw/print from there, which keeps the whole
//! submit→render→export path testable without a display surface.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::{FormSpec, pass_fail_label};

/// Where rendered result fields go.
pub trait ResultSink {
    fn set_field(&mut self, key: &str, value: String);
    fn set_visible(&mut self, visible: bool);
}

/// In-memory result panel for one check.
///
/// Panels start hidden and become visible on the first successful render.
/// There is no transition back to hidden.
#[derive(Debug, Clone, Default)]
pub struct ResultPanel {
    visible: bool,
    fields: BTreeMap<String, String>,
}

impl ResultPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Currently displayed text for a field; empty if never rendered.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}

impl ResultSink for ResultPanel {
    fn set_field(&mut self, key: &str, value: String) {
        self.fields.insert(key.to_string(), value);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Write a backend response into the sink per the form's result mapping.
///
/// Missing response keys render as empty text rather than erroring, and the
/// panel is made visible unconditionally (idempotent).
pub fn render(spec: &FormSpec, body: &Value, sink: &mut dyn ResultSink) {
    for rf in spec.results {
        sink.set_field(rf.field_id, display_value(body.get(rf.response_key)));
    }

    if let Some(status_id) = spec.pass_fail {
        let pass = body.get("lulus").map(is_truthy).unwrap_or(false);
        sink.set_field(status_id, pass_fail_label(pass).to_string());
    }

    sink.set_visible(true);
}

/// Display form of a response value, without JSON artifacts like quotes.
fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
