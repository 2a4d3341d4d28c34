//! Item Classification
//!
//! An item's board placement is stored as a JSON object in its `metadata`
//! string, e.g. `{"section":"support","subsection":"legal"}`. Other keys in
//! that object belong to other features and must survive a rewrite.
//!
//! Reading is fail-open: anything missing or malformed lands in the default
//! bucket (market, unassigned) so the item still shows up on the board.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::entity::{DomainError, DomainResult};
use crate::item::ToolboxItem;
use crate::taxonomy::{Section, Subsection};

const SECTION_KEY: &str = "section";
const SUBSECTION_KEY: &str = "subsection";

/// Why a stored payload could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("metadata is not valid JSON: {0}")]
    Malformed(String),
    #[error("metadata is not a JSON object")]
    NotAnObject,
    #[error("unknown section `{0}`")]
    UnknownSection(String),
    #[error("unknown subsection `{0}`")]
    UnknownSubsection(String),
    #[error("subsection `{subsection}` does not belong to section `{section}`")]
    Mismatch { section: Section, subsection: Subsection },
}

/// A section plus an optional subsection of that section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawClassification")]
pub struct Classification {
    section: Section,
    subsection: Option<Subsection>,
}

#[derive(Deserialize)]
struct RawClassification {
    section: Section,
    #[serde(default)]
    subsection: Option<Subsection>,
}

impl TryFrom<RawClassification> for Classification {
    type Error = ClassificationError;

    fn try_from(raw: RawClassification) -> Result<Self, Self::Error> {
        Classification::try_new(raw.section, raw.subsection)
    }
}

impl Classification {
    fn try_new(section: Section, subsection: Option<Subsection>) -> Result<Self, ClassificationError> {
        match subsection {
            Some(sub) if !section.owns(sub) => Err(ClassificationError::Mismatch { section, subsection: sub }),
            _ => Ok(Self { section, subsection }),
        }
    }

    /// Fails with `InvalidInput` if `subsection` is not one of `section`'s.
    pub fn new(section: Section, subsection: Option<Subsection>) -> DomainResult<Self> {
        Self::try_new(section, subsection).map_err(|e| DomainError::InvalidInput(e.to_string()))
    }

    /// Section bucket with no subsection
    pub fn section_only(section: Section) -> Self {
        Self { section, subsection: None }
    }

    /// Subsection bucket; the section is implied
    pub fn in_subsection(subsection: Subsection) -> Self {
        Self { section: subsection.section(), subsection: Some(subsection) }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn subsection(&self) -> Option<Subsection> {
        self.subsection
    }

    /// Human-readable bucket name, e.g. "Support / Legal"
    pub fn label(&self) -> String {
        match self.subsection {
            Some(sub) => format!("{} / {}", self.section.label(), sub.label()),
            None => self.section.label().to_string(),
        }
    }
}

/// The decoded metadata object: the classification plus any foreign keys
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassificationPayload {
    classification: Classification,
    extra: Map<String, Value>,
}

impl ClassificationPayload {
    pub fn new(classification: Classification) -> Self {
        Self { classification, extra: Map::new() }
    }

    /// Strict decode. Only a non-JSON or non-object payload is an error;
    /// unknown or mismatched ids inside an object fall back per field.
    pub fn parse(raw: &str) -> Result<Self, ClassificationError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_str(raw).map_err(|e| ClassificationError::Malformed(e.to_string()))?;
        let Value::Object(mut extra) = value else {
            return Err(ClassificationError::NotAnObject);
        };

        let section = match extra.remove(SECTION_KEY) {
            Some(Value::String(id)) => id.parse::<Section>().unwrap_or_else(|e| {
                log::debug!("classification: {}, using default section", e);
                Section::default()
            }),
            _ => Section::default(),
        };
        let subsection = match extra.remove(SUBSECTION_KEY) {
            Some(Value::String(id)) => match id.parse::<Subsection>() {
                Ok(sub) if section.owns(sub) => Some(sub),
                Ok(sub) => {
                    log::debug!("classification: {} not under {}, leaving unassigned", sub, section);
                    None
                }
                Err(e) => {
                    log::debug!("classification: {}, leaving unassigned", e);
                    None
                }
            },
            _ => None,
        };

        Ok(Self { classification: Classification { section, subsection }, extra })
    }

    /// Fail-open decode used by the board
    pub fn from_metadata(raw: Option<&str>) -> Self {
        match raw {
            None => Self::default(),
            Some(raw) => Self::parse(raw).unwrap_or_else(|e| {
                log::debug!("classification: {}, using default placement", e);
                Self::default()
            }),
        }
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Keys other than section/subsection, preserved verbatim
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Same foreign keys, new placement
    pub fn retarget(mut self, target: Classification) -> Self {
        self.classification = target;
        self
    }

    /// Encodes to the stored string. Keys come out sorted, so equal payloads
    /// always encode to equal strings.
    pub fn to_metadata(&self) -> String {
        let subsection = match self.classification.subsection {
            Some(sub) => Value::String(sub.as_str().to_string()),
            None => Value::Null,
        };
        let mut entries: Vec<(String, Value)> = self.extra.clone().into_iter().collect();
        entries.push((SECTION_KEY.to_string(), Value::String(self.classification.section.as_str().to_string())));
        entries.push((SUBSECTION_KEY.to_string(), subsection));
        // `Map` keeps insertion order when serde_json's preserve_order is on.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Value::Object(entries.into_iter().collect()).to_string()
    }
}

/// Current placement of an item; never fails
pub fn classify(item: &ToolboxItem) -> Classification {
    ClassificationPayload::from_metadata(item.metadata.as_deref()).classification()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Classification {
        ClassificationPayload::from_metadata(Some(raw)).classification()
    }

    #[test]
    fn test_reads_section_and_subsection() {
        let c = parse(r#"{"section":"support","subsection":"legal"}"#);
        assert_eq!(c.section(), Section::Support);
        assert_eq!(c.subsection(), Some(Subsection::Legal));
        assert_eq!(c.label(), "Support / Legal");
    }

    #[test]
    fn test_missing_or_malformed_defaults_to_market() {
        let default = Classification::section_only(Section::Market);
        assert_eq!(ClassificationPayload::from_metadata(None).classification(), default);
        assert_eq!(parse(""), default);
        assert_eq!(parse("not json"), default);
        assert_eq!(parse("[1,2]"), default);
        assert_eq!(parse("{}"), default);
        assert_eq!(parse(r#"{"section":"notes"}"#), default);
        assert_eq!(parse(r#"{"section":42}"#), default);
    }

    #[test]
    fn test_strict_parse_reports_failures() {
        assert!(matches!(ClassificationPayload::parse("not json"), Err(ClassificationError::Malformed(_))));
        assert_eq!(ClassificationPayload::parse("\"market\""), Err(ClassificationError::NotAnObject));
    }

    #[test]
    fn test_foreign_subsection_is_unassigned() {
        let c = parse(r#"{"section":"team","subsection":"legal"}"#);
        assert_eq!(c, Classification::section_only(Section::Team));
        let c = parse(r#"{"section":"team","subsection":"nope"}"#);
        assert_eq!(c, Classification::section_only(Section::Team));
    }

    #[test]
    fn test_extra_keys_round_trip() {
        let payload = ClassificationPayload::parse(r#"{"pinned":true,"section":"sell","owner":{"id":4}}"#).unwrap();
        let moved = payload.retarget(Classification::in_subsection(Subsection::Data));
        let encoded = moved.to_metadata();
        let reread = ClassificationPayload::parse(&encoded).unwrap();
        assert_eq!(reread.classification(), Classification::in_subsection(Subsection::Data));
        assert_eq!(reread.extra().get("pinned"), Some(&Value::Bool(true)));
        assert_eq!(reread.extra().get("owner"), Some(&serde_json::json!({"id": 4})));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = ClassificationPayload::parse(r#"{"b":1,"a":2,"section":"sell"}"#).unwrap();
        let b = ClassificationPayload::parse(r#"{"section":"sell","a":2,"b":1}"#).unwrap();
        assert_eq!(a.to_metadata(), b.to_metadata());
        assert_eq!(
            ClassificationPayload::new(Classification::default()).to_metadata(),
            r#"{"section":"market","subsection":null}"#
        );
    }

    #[test]
    fn test_constructor_enforces_ownership() {
        assert!(Classification::new(Section::Market, Some(Subsection::BrandBuilding)).is_ok());
        assert!(matches!(
            Classification::new(Section::Sell, Some(Subsection::Legal)),
            Err(DomainError::InvalidInput(_))
        ));
        let bad: Result<Classification, _> = serde_json::from_str(r#"{"section":"sell","subsection":"legal"}"#);
        assert!(bad.is_err());
        let ok: Classification = serde_json::from_str(r#"{"section":"sell"}"#).unwrap();
        assert_eq!(ok, Classification::section_only(Section::Sell));
    }
}
