//! Static form registry and shared domain types.
//!
//! Each QA check is described by a `FormSpec`: which input fields it collects,
//! which backend endpoint it posts to, and which response keys land in which
//! result-panel fields. The registry is pure configuration — the submission
//! pipeline, renderer, and exporter are all parameterized by it, so adding a
//! check means adding one entry here. A registry/backend mismatch is a
//! configuration error caught by integration tests, not at runtime.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Localized verdict for a passed tolerance check.
pub const PASS_LABEL: &str = "LULUS";
/// Localized verdict for a failed tolerance check.
pub const FAIL_LABEL: &str = "TIDAK LULUS";

pub fn pass_fail_label(pass: bool) -> &'static str {
    if pass { PASS_LABEL } else { FAIL_LABEL }
}

/// The six QA checks offered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Dosimetry,
    FieldSize,
    TablePosition,
    Odi,
    GantryAngle,
    CollimatorAngle,
}

impl CheckKind {
    pub const ALL: [CheckKind; 6] = [
        CheckKind::Dosimetry,
        CheckKind::FieldSize,
        CheckKind::TablePosition,
        CheckKind::Odi,
        CheckKind::GantryAngle,
        CheckKind::CollimatorAngle,
    ];

    /// Stable identifier, also the `type` tag in exported files.
    pub fn id(self) -> &'static str {
        match self {
            CheckKind::Dosimetry => "dosimetry",
            CheckKind::FieldSize => "field_size",
            CheckKind::TablePosition => "table_position",
            CheckKind::Odi => "odi",
            CheckKind::GantryAngle => "gantry_angle",
            CheckKind::CollimatorAngle => "collimator_angle",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CheckKind::Dosimetry => "Dosimetry",
            CheckKind::FieldSize => "Field Size",
            CheckKind::TablePosition => "Table Position",
            CheckKind::Odi => "ODI",
            CheckKind::GantryAngle => "Gantry Angle",
            CheckKind::CollimatorAngle => "Collimator Angle",
        }
    }

    /// The registry entry for this check.
    pub fn spec(self) -> &'static FormSpec {
        // REGISTRY is laid out in `ALL` order.
        &REGISTRY[self as usize]
    }
}

/// How an input field's text is turned into a payload value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Parsed as `f64`; a non-finite or unparsable value becomes JSON `null`
    /// (submission is never blocked on bad input — the backend rejects).
    Number,
    /// Passed through verbatim.
    Text,
}

/// One input field of a form.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Payload key, exactly as the backend expects it.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// One (response key → result-panel field) mapping.
#[derive(Debug, Clone, Copy)]
pub struct ResultField {
    /// Key in the backend's JSON response, and in exported files.
    pub response_key: &'static str,
    /// Field id in the result panel.
    pub field_id: &'static str,
    pub label: &'static str,
}

/// Static description of one form: fields, endpoint, and result mapping.
#[derive(Debug, Clone, Copy)]
pub struct FormSpec {
    pub kind: CheckKind,
    pub endpoint: &'static str,
    pub fields: &'static [FieldSpec],
    pub results: &'static [ResultField],
    /// Panel field id that receives the pass/fail verdict, when the backend
    /// reports one (`lulus` in the response).
    pub pass_fail: Option<&'static str>,
    /// Fixed filename for exports of this check.
    pub export_file: &'static str,
}

impl FormSpec {
    pub fn title(&self) -> &'static str {
        self.kind.display_name()
    }
}

const fn num(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Number,
    }
}

const fn text(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Text,
    }
}

const fn result(
    response_key: &'static str,
    field_id: &'static str,
    label: &'static str,
) -> ResultField {
    ResultField {
        response_key,
        field_id,
        label,
    }
}

static DOSIMETRY_FIELDS: [FieldSpec; 13] = [
    num("temperature", "Temperature (°C)"),
    num("pressure", "Pressure (mmHg)"),
    text("chamber", "Chamber model"),
    num("k_elec", "k_elec"),
    num("nd_w", "N_D,w"),
    num("mu", "MU"),
    num("clinical_pdd", "Clinical PDD (%)"),
    num("v1", "V1 (V)"),
    num("v2", "V2 (V)"),
    num("m1", "M1 (nC)"),
    num("mmin", "M1 opposite polarity (nC)"),
    num("m2", "M2 (nC)"),
    num("tpr", "TPR20,10"),
];

static FIELD_SIZE_FIELDS: [FieldSpec; 6] = [
    num("x", "Set X (cm)"),
    num("y", "Set Y (cm)"),
    num("x1", "Measured X1 (cm)"),
    num("x2", "Measured X2 (cm)"),
    num("y1", "Measured Y1 (cm)"),
    num("y2", "Measured Y2 (cm)"),
];

static TABLE_POSITION_FIELDS: [FieldSpec; 2] = [
    num("set_shift", "Set shift (cm)"),
    num("measured_shift", "Measured shift (cm)"),
];

static ODI_FIELDS: [FieldSpec; 2] = [
    num("set_distance", "Set distance (cm)"),
    num("measured_distance", "Measured distance (cm)"),
];

static GANTRY_ANGLE_FIELDS: [FieldSpec; 2] = [
    num("set_angle", "Set angle (deg)"),
    num("measured_angle", "Measured angle (deg)"),
];

static COLLIMATOR_ANGLE_FIELDS: [FieldSpec; 2] = [
    num("set_angle", "Set angle (deg)"),
    num("measured_angle", "Measured angle (deg)"),
];

static DOSIMETRY_RESULTS: [ResultField; 2] = [
    result("dosis_absolute", "dosis-absolute", "Absolute dose (cGy/MU)"),
    result("deviasi", "deviasi", "Deviation (%)"),
];

static FIELD_SIZE_RESULTS: [ResultField; 2] = [
    result("delta_x", "delta-x", "Delta X (mm)"),
    result("delta_y", "delta-y", "Delta Y (mm)"),
];

static TABLE_POSITION_RESULTS: [ResultField; 1] =
    [result("delta_s", "delta-s-table", "Delta shift (mm)")];

static ODI_RESULTS: [ResultField; 1] = [result("delta_d", "delta-d", "Delta distance (mm)")];

static GANTRY_ANGLE_RESULTS: [ResultField; 1] =
    [result("delta_s", "delta-s-gantry", "Delta angle (deg)")];

static COLLIMATOR_ANGLE_RESULTS: [ResultField; 1] =
    [result("delta_s", "delta-s-collimator", "Delta angle (deg)")];

/// The form registry, in `CheckKind::ALL` order.
static REGISTRY: [FormSpec; 6] = [
    FormSpec {
        kind: CheckKind::Dosimetry,
        endpoint: "/api/dosimetry",
        fields: &DOSIMETRY_FIELDS,
        results: &DOSIMETRY_RESULTS,
        pass_fail: None,
        export_file: "dosimetry-results.json",
    },
    FormSpec {
        kind: CheckKind::FieldSize,
        endpoint: "/api/field_size",
        fields: &FIELD_SIZE_FIELDS,
        results: &FIELD_SIZE_RESULTS,
        pass_fail: Some("field-size-status"),
        export_file: "field-size-results.json",
    },
    FormSpec {
        kind: CheckKind::TablePosition,
        endpoint: "/api/table_position",
        fields: &TABLE_POSITION_FIELDS,
        results: &TABLE_POSITION_RESULTS,
        pass_fail: Some("table-position-status"),
        export_file: "table-position-results.json",
    },
    FormSpec {
        kind: CheckKind::Odi,
        endpoint: "/api/odi",
        fields: &ODI_FIELDS,
        results: &ODI_RESULTS,
        pass_fail: Some("odi-status"),
        export_file: "odi-results.json",
    },
    FormSpec {
        kind: CheckKind::GantryAngle,
        endpoint: "/api/gantry_angle",
        fields: &GANTRY_ANGLE_FIELDS,
        results: &GANTRY_ANGLE_RESULTS,
        pass_fail: Some("gantry-angle-status"),
        export_file: "gantry-angle-results.json",
    },
    FormSpec {
        kind: CheckKind::CollimatorAngle,
        endpoint: "/api/collimator_angle",
        fields: &COLLIMATOR_ANGLE_FIELDS,
        results: &COLLIMATOR_ANGLE_RESULTS,
        pass_fail: Some("collimator-angle-status"),
        export_file: "collimator-angle-results.json",
    },
];

pub fn registry() -> &'static [FormSpec] {
    &REGISTRY
}

/// Process-wide settings, owned by the application root and passed down
/// explicitly (no ambient singletons).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        // Dark is the default when no preference has been stored yet.
        Self { dark_mode: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_laid_out_in_kind_order() {
        for kind in CheckKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
        assert_eq!(registry().len(), CheckKind::ALL.len());
    }

    #[test]
    fn endpoints_match_the_backend_api() {
        let endpoints: Vec<&str> = registry().iter().map(|s| s.endpoint).collect();
        assert_eq!(
            endpoints,
            [
                "/api/dosimetry",
                "/api/field_size",
                "/api/table_position",
                "/api/odi",
                "/api/gantry_angle",
                "/api/collimator_angle",
            ]
        );
    }

    #[test]
    fn dosimetry_fields_are_ordered_as_the_backend_expects() {
        let keys: Vec<&str> = CheckKind::Dosimetry
            .spec()
            .fields
            .iter()
            .map(|f| f.key)
            .collect();
        assert_eq!(
            keys,
            [
                "temperature",
                "pressure",
                "chamber",
                "k_elec",
                "nd_w",
                "mu",
                "clinical_pdd",
                "v1",
                "v2",
                "m1",
                "mmin",
                "m2",
                "tpr",
            ]
        );
        let chamber = &CheckKind::Dosimetry.spec().fields[2];
        assert_eq!(chamber.kind, FieldKind::Text);
        assert!(CheckKind::Dosimetry.spec().pass_fail.is_none());
    }

    #[test]
    fn geometric_checks_share_the_uniform_two_field_shape() {
        for kind in [
            CheckKind::TablePosition,
            CheckKind::Odi,
            CheckKind::GantryAngle,
            CheckKind::CollimatorAngle,
        ] {
            let spec = kind.spec();
            assert_eq!(spec.fields.len(), 2, "{}", kind.id());
            assert_eq!(spec.results.len(), 1, "{}", kind.id());
            assert!(spec.pass_fail.is_some(), "{}", kind.id());
            assert!(
                spec.fields.iter().all(|f| f.kind == FieldKind::Number),
                "{}",
                kind.id()
            );
        }
    }

    #[test]
    fn export_filenames_are_fixed_per_check() {
        assert_eq!(CheckKind::FieldSize.spec().export_file, "field-size-results.json");
        assert_eq!(CheckKind::GantryAngle.spec().export_file, "gantry-angle-results.json");
        let mut names: Vec<&str> = registry().iter().map(|s| s.export_file).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn pass_fail_labels_are_exact() {
        assert_eq!(pass_fail_label(true), "LULUS");
        assert_eq!(pass_fail_label(false), "TIDAK LULUS");
    }
}
