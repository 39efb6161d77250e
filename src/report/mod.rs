//! Plain-text formatting of rendered panels for the CLI path.
//!
//! We keep formatting code in one place so output changes are localized
//! (important for future snapshot tests) and the pipeline stays clean.

use crate::domain::{FormSpec, registry};
use crate::render::ResultPanel;

/// Format one check's rendered panel for terminal output.
pub fn format_panel(spec: &FormSpec, panel: &ResultPanel) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", spec.title()));
    for rf in spec.results {
        out.push_str(&format!("{:<24} {}\n", rf.label, panel.get(rf.field_id)));
    }
    if let Some(status_id) = spec.pass_fail {
        out.push_str(&format!("{:<24} {}\n", "Status", panel.get(status_id)));
    }

    out
}

/// Format the registry listing for `linqa checks`.
pub fn format_checks() -> String {
    let mut out = String::new();

    out.push_str("Registered checks:\n");
    for spec in registry() {
        let fields: Vec<&str> = spec.fields.iter().map(|f| f.key).collect();
        out.push_str(&format!(
            "- {:<17} POST {:<22} fields: {}\n",
            spec.kind.id(),
            spec.endpoint,
            fields.join(", ")
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::CheckKind;
    use crate::render::render;

    #[test]
    fn panel_formatting_includes_status_for_pass_fail_checks() {
        let spec = CheckKind::FieldSize.spec();
        let mut panel = ResultPanel::new();
        render(spec, &json!({ "delta_x": 0.5, "delta_y": 0.2, "lulus": true }), &mut panel);

        let text = format_panel(spec, &panel);
        assert!(text.starts_with("=== Field Size ===\n"));
        assert!(text.contains("0.5"));
        assert!(text.contains("LULUS"));
    }

    #[test]
    fn checks_listing_names_all_six() {
        let text = format_checks();
        for kind in CheckKind::ALL {
            assert!(text.contains(kind.id()), "missing {}", kind.id());
        }
    }
}
