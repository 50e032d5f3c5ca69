//! Notes attached to definitions.
//!
//! A note is a `(type, text)` pair. Definition authors may supply a bare
//! string, a single typed object, or a mixed array of both; building
//! normalizes all of these to an ordered sequence of `Note` with bare
//! strings defaulting to the uncategorized type.

use serde::Serialize;
use serde_json::Value;

use crate::entity::pojo::Pojo;
use crate::schema::{
    json_type_name, FieldRule, ObjectSchema, Rule, StringRule, ValidationError, ValidationResult,
    Violation,
};

const TEXT_MAX: usize = 5000;

/// Categories a note can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    #[default]
    Uncategorized,
    BackOrder,
    GiftMessage,
    Internal,
    MessageToBuyer,
    MessageFromBuyer,
}

impl NoteType {
    /// Allowed values for the schema enumeration rule.
    pub(crate) const ALLOWED: &'static [&'static str] = &[
        "uncategorized",
        "back_order",
        "gift_message",
        "internal",
        "message_to_buyer",
        "message_from_buyer",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Uncategorized => "uncategorized",
            NoteType::BackOrder => "back_order",
            NoteType::GiftMessage => "gift_message",
            NoteType::Internal => "internal",
            NoteType::MessageToBuyer => "message_to_buyer",
            NoteType::MessageFromBuyer => "message_from_buyer",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "uncategorized" => Some(NoteType::Uncategorized),
            "back_order" => Some(NoteType::BackOrder),
            "gift_message" => Some(NoteType::GiftMessage),
            "internal" => Some(NoteType::Internal),
            "message_to_buyer" => Some(NoteType::MessageToBuyer),
            "message_from_buyer" => Some(NoteType::MessageFromBuyer),
            _ => None,
        }
    }
}

/// An immutable note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    #[serde(rename = "type")]
    kind: NoteType,
    text: String,
}

impl Note {
    pub(crate) fn new(kind: NoteType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> NoteType {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn note_object_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("type", FieldRule::optional(Rule::enumeration(NoteType::ALLOWED)))
        .field(
            "text",
            FieldRule::required(StringRule::new().trimmed().max(TEXT_MAX)),
        )
}

/// The rule parent schemas embed for a notes field:
/// a bare string, or an array of strings and note objects.
pub(crate) fn rule() -> Rule {
    let entry = Rule::one_of(vec![
        Rule::String(StringRule::new().trimmed().max(TEXT_MAX)),
        Rule::object(note_object_schema()),
    ]);
    Rule::one_of(vec![
        Rule::String(StringRule::new().trimmed().max(TEXT_MAX)),
        Rule::array(entry),
    ])
}

/// Normalizes a notes field to an ordered sequence of `Note`.
///
/// Absent reads as an empty sequence.
pub(crate) fn from_value(label: &'static str, value: Option<&Value>) -> ValidationResult<Vec<Note>> {
    let value = match value {
        Some(value) => value,
        None => return Ok(Vec::new()),
    };

    match value {
        Value::String(text) => Ok(vec![Note::new(NoteType::Uncategorized, text.clone())]),
        Value::Array(items) => {
            let mut notes = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                notes.push(from_entry(label, item, &format!("notes[{}]", i))?);
            }
            Ok(notes)
        }
        other => Err(ValidationError::single(
            label,
            Violation::new(
                "notes",
                "string or array of strings/note objects",
                json_type_name(other),
            ),
        )),
    }
}

fn from_entry(label: &'static str, value: &Value, path: &str) -> ValidationResult<Note> {
    match value {
        Value::String(text) => Ok(Note::new(NoteType::Uncategorized, text.clone())),
        Value::Object(_) => {
            let pojo = Pojo::new(label, value)?;
            let text = pojo.required_str("text")?;
            let kind = match pojo.get("type") {
                Some(raw) => {
                    let s = raw.as_str().ok_or_else(|| {
                        ValidationError::single(
                            label,
                            Violation::type_mismatch(
                                format!("{}.type", path),
                                "enumeration value",
                                json_type_name(raw),
                            ),
                        )
                    })?;
                    NoteType::parse(s).ok_or_else(|| {
                        ValidationError::single(
                            label,
                            Violation::new(
                                format!("{}.type", path),
                                format!("one of [{}]", NoteType::ALLOWED.join(", ")),
                                format!("'{}'", s),
                            ),
                        )
                    })?
                }
                None => NoteType::Uncategorized,
            };
            Ok(Note::new(kind, text))
        }
        other => Err(ValidationError::single(
            label,
            Violation::new(path, "string or note object", json_type_name(other)),
        )),
    }
}
