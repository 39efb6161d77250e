//! Shared submission pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! collect raw field text -> build JSON payload -> POST -> render into sink
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::data::QaClient;
use crate::domain::{FieldKind, FormSpec};
use crate::error::AppError;
use crate::render::{ResultSink, render};

/// Build the request payload from raw field text.
///
/// A numeric field whose text does not parse to a finite `f64` — including a
/// missing or empty value — becomes JSON `null`. Submission is never blocked
/// on bad input; the backend is the validator.
pub fn build_payload(spec: &FormSpec, raw_values: &HashMap<String, String>) -> Map<String, Value> {
    let mut payload = Map::new();
    for field in spec.fields {
        let raw = raw_values.get(field.key).map(String::as_str).unwrap_or("");
        let value = match field.kind {
            FieldKind::Number => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Value::from(v),
                _ => Value::Null,
            },
            FieldKind::Text => Value::from(raw),
        };
        payload.insert(field.key.to_string(), value);
    }
    payload
}

/// Submit one check: build the payload, POST it, render the response.
///
/// On any failure (transport, non-success status, bad JSON) the sink is left
/// untouched and the error carries the single generic user-facing message.
pub fn submit_check(
    client: &QaClient,
    spec: &FormSpec,
    raw_values: &HashMap<String, String>,
    sink: &mut dyn ResultSink,
) -> Result<(), AppError> {
    let payload = build_payload(spec, raw_values);
    let body = client.post_check(spec.endpoint, &payload)?;
    render(spec, &body, sink);
    Ok(())
}
