use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

const PORTION_CONTROL_DOCUMENT: &str = include_str!("builtin/portion_control.json");
const EMOTIONAL_EATING_DOCUMENT: &str = include_str!("builtin/emotional_eating.json");
const BINGE_EATING_DOCUMENT: &str = include_str!("builtin/binge_eating.json");
const GENERAL_TIPS_DOCUMENT: &str = include_str!("builtin/general_tips.json");

/// The fixed set of focus areas a user can ask for tips about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FocusArea {
    PortionControl,
    EmotionalEating,
    BingeEating,
    GeneralTips,
}

impl FocusArea {
    pub const ALL: [FocusArea; 4] = [
        FocusArea::PortionControl,
        FocusArea::EmotionalEating,
        FocusArea::BingeEating,
        FocusArea::GeneralTips,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PortionControl => "Portion Control",
            Self::EmotionalEating => "Emotional Eating",
            Self::BingeEating => "Binge Eating",
            Self::GeneralTips => "General Tips",
        }
    }

    /// Resolves user input to a focus area. Matching is trimmed and
    /// ASCII-case-insensitive; "portion control" and "Portion Control"
    /// name the same area.
    pub fn parse(input: &str) -> Option<FocusArea> {
        let trimmed = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|area| area.as_str().eq_ignore_ascii_case(trimmed))
    }

    fn embedded_document(&self) -> &'static str {
        match self {
            Self::PortionControl => PORTION_CONTROL_DOCUMENT,
            Self::EmotionalEating => EMOTIONAL_EATING_DOCUMENT,
            Self::BingeEating => BINGE_EATING_DOCUMENT,
            Self::GeneralTips => GENERAL_TIPS_DOCUMENT,
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of advice content. `label` is unique within a focus area,
/// not globally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TipRecord {
    pub label: String,
    pub description: String,
    #[serde(default)]
    pub fact: Option<String>,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default)]
    pub food_reason: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub activity_description: Option<String>,
    #[serde(default)]
    pub activity_fact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLoadDiagnostic {
    pub area: FocusArea,
    pub tip_ref: String,
    pub reason: String,
}

impl CatalogLoadDiagnostic {
    pub fn to_log_line(&self) -> String {
        format!(
            "catalog load rejected area={} tip_ref={} reason={}",
            self.area, self.tip_ref, self.reason
        )
    }
}

#[derive(Debug, Clone)]
pub enum CatalogError {
    Parse { area: FocusArea, message: String },
    EmptyFocusArea { area: FocusArea },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { area, message } => {
                write!(f, "catalog document for {area} failed to parse: {message}")
            }
            Self::EmptyFocusArea { area } => {
                write!(f, "focus area {area} has no usable tips")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug, Clone)]
pub struct CatalogLoadOutput {
    pub catalog: Catalog,
    pub diagnostics: Vec<CatalogLoadDiagnostic>,
}

/// Immutable tip content, loaded once at startup from the embedded
/// documents. Every focus area holds at least one record.
#[derive(Debug, Clone)]
pub struct Catalog {
    areas: BTreeMap<FocusArea, Vec<TipRecord>>,
}

impl Catalog {
    pub fn load() -> Result<CatalogLoadOutput, CatalogError> {
        let mut areas = BTreeMap::new();
        let mut diagnostics = Vec::new();

        for area in FocusArea::ALL {
            let (records, mut area_diagnostics) =
                parse_area_document(area, area.embedded_document())?;
            diagnostics.append(&mut area_diagnostics);
            if records.is_empty() {
                return Err(CatalogError::EmptyFocusArea { area });
            }
            areas.insert(area, records);
        }

        Ok(CatalogLoadOutput {
            catalog: Catalog { areas },
            diagnostics,
        })
    }

    pub fn tips(&self, area: FocusArea) -> &[TipRecord] {
        self.areas.get(&area).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Labels for the tip chooser, in catalog order.
    pub fn labels(&self, area: FocusArea) -> Vec<&str> {
        self.tips(area).iter().map(|tip| tip.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.areas.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_area_document(
    area: FocusArea,
    raw_document: &str,
) -> Result<(Vec<TipRecord>, Vec<CatalogLoadDiagnostic>), CatalogError> {
    let records: Vec<TipRecord> =
        serde_json::from_str(raw_document).map_err(|err| CatalogError::Parse {
            area,
            message: err.to_string(),
        })?;

    let mut kept: Vec<TipRecord> = Vec::with_capacity(records.len());
    let mut diagnostics = Vec::new();
    for (index, mut record) in records.into_iter().enumerate() {
        normalize_record(&mut record);
        match validate_record(&record, &kept) {
            Ok(()) => kept.push(record),
            Err(reason) => diagnostics.push(CatalogLoadDiagnostic {
                area,
                tip_ref: format!("record:{index}"),
                reason,
            }),
        }
    }

    Ok((kept, diagnostics))
}

fn normalize_record(record: &mut TipRecord) {
    record.label = record.label.trim().to_string();
    record.description = record.description.trim().to_string();
}

fn validate_record(record: &TipRecord, kept: &[TipRecord]) -> Result<(), String> {
    if record.label.is_empty() {
        return Err("label is required".to_string());
    }
    if record.description.is_empty() {
        return Err("description is required".to_string());
    }
    if kept.iter().any(|existing| existing.label == record.label) {
        return Err(format!("duplicate label within focus area: {}", record.label));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_area_document, Catalog, FocusArea};

    #[test]
    fn load_populates_every_focus_area() {
        let output = Catalog::load().expect("embedded catalog should load");
        assert!(output.diagnostics.is_empty(), "embedded content should be clean");
        assert!(!output.catalog.is_empty());
        for area in FocusArea::ALL {
            assert!(
                !output.catalog.tips(area).is_empty(),
                "focus area {area} should have tips"
            );
        }
        assert_eq!(output.catalog.len(), 15);
    }

    #[test]
    fn labels_are_unique_within_each_area() {
        let output = Catalog::load().expect("embedded catalog should load");
        for area in FocusArea::ALL {
            let labels = output.catalog.labels(area);
            let mut deduped = labels.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(labels.len(), deduped.len(), "labels in {area} should be unique");
        }
    }

    #[test]
    fn parse_accepts_any_casing_and_surrounding_whitespace() {
        assert_eq!(
            FocusArea::parse("portion control"),
            Some(FocusArea::PortionControl)
        );
        assert_eq!(
            FocusArea::parse("  BINGE EATING  "),
            Some(FocusArea::BingeEating)
        );
        assert_eq!(FocusArea::parse("General Tips"), Some(FocusArea::GeneralTips));
    }

    #[test]
    fn parse_rejects_unknown_focus_area() {
        assert_eq!(FocusArea::parse("NotARealCategory"), None);
        assert_eq!(FocusArea::parse(""), None);
    }

    #[test]
    fn parse_area_document_skips_blank_labels_with_a_diagnostic() {
        let raw = r#"[
  {"label": "  ", "description": "blank label"},
  {"label": "Keep me", "description": "a valid record"}
]"#;
        let (records, diagnostics) =
            parse_area_document(FocusArea::GeneralTips, raw).expect("document should parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "Keep me");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].tip_ref, "record:0");
        assert!(diagnostics[0].reason.contains("label is required"));
    }

    #[test]
    fn parse_area_document_skips_duplicate_labels_with_a_diagnostic() {
        let raw = r#"[
  {"label": "Twice", "description": "first"},
  {"label": "Twice", "description": "second"}
]"#;
        let (records, diagnostics) =
            parse_area_document(FocusArea::BingeEating, raw).expect("document should parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "first");
        assert!(diagnostics[0].reason.contains("duplicate label"));
    }

    #[test]
    fn parse_area_document_rejects_malformed_json() {
        let error = parse_area_document(FocusArea::PortionControl, "{not json")
            .expect_err("malformed document should fail");
        assert!(error.to_string().contains("Portion Control"));
    }
}
