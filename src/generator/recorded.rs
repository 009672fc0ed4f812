//! Replay of recorded generator replies
//!
//! A recording is a JSON object keyed by statement. Each value is either
//! the candidate object itself or the raw reply text, in which case the
//! candidate is the first `{...}` span of the text.
//!
//! ```json
//! {
//!   "Protect the camp": {"type": "P2_Defend", "intensity": 0.9, "scope": "Group", "temporal": "Immediate"},
//!   "What is over there?": "Here you go: {\"type\": \"E1_Discover\", \"intensity\": 0.6}"
//! }
//! ```

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::error::{HsilError, Result};
use crate::generator::Generator;

#[derive(Debug, Clone, Default)]
pub struct RecordedGenerator {
    replies: BTreeMap<String, Value>,
}

impl RecordedGenerator {
    pub fn new(replies: BTreeMap<String, Value>) -> Self {
        let replies = replies
            .into_iter()
            .map(|(statement, reply)| (statement.trim().to_string(), reply))
            .collect();
        Self { replies }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let replies: BTreeMap<String, Value> = serde_json::from_str(contents)?;
        Ok(Self::new(replies))
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}

impl Generator for RecordedGenerator {
    fn generate(&self, statement: &str) -> Result<Option<Value>> {
        match self.replies.get(statement.trim()) {
            None => Ok(None),
            Some(Value::String(reply)) => extract_candidate(reply).map(Some),
            Some(candidate) => Ok(Some(candidate.clone())),
        }
    }
}

/// Parse the candidate object out of free-form reply text
///
/// Takes everything from the first `{` to the last `}`, so prose around
/// the object is ignored.
pub fn extract_candidate(response: &str) -> Result<Value> {
    let start = response
        .find('{')
        .ok_or_else(|| HsilError::GeneratorError("No JSON found in reply".into()))?;
    let end = response
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| HsilError::GeneratorError("No closing brace found in reply".into()))?;
    Ok(serde_json::from_str(&response[start..=end])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RECORDING: &str = r#"{
        "Protect the camp": {"type": "P2_Defend", "intensity": 0.9, "scope": "Group", "temporal": "Immediate"},
        "  What is over there?  ": "Sure! {\"type\": \"E1_Discover\", \"intensity\": 0.6} Hope that helps.",
        "Say nothing": "I cannot encode that."
    }"#;

    #[test]
    fn test_extract_candidate_with_prose() {
        let value = extract_candidate("Result:\n```json\n{\"type\": \"T1_Create\"}\n```").unwrap();
        assert_eq!(value, json!({"type": "T1_Create"}));
    }

    #[test]
    fn test_extract_candidate_errors() {
        assert!(extract_candidate("no braces here").is_err());
        assert!(extract_candidate("} backwards {").is_err());
        assert!(matches!(
            extract_candidate("{not json}"),
            Err(HsilError::SerdeError(_))
        ));
    }

    #[test]
    fn test_recorded_object_reply() {
        let generator = RecordedGenerator::from_json_str(RECORDING).unwrap();
        assert_eq!(generator.len(), 3);

        let reply = generator.generate("Protect the camp").unwrap().unwrap();
        assert_eq!(reply["type"], "P2_Defend");
    }

    #[test]
    fn test_recorded_text_reply_keys_trimmed() {
        let generator = RecordedGenerator::from_json_str(RECORDING).unwrap();
        let reply = generator.generate("What is over there?").unwrap().unwrap();
        assert_eq!(reply, json!({"type": "E1_Discover", "intensity": 0.6}));
    }

    #[test]
    fn test_recorded_unknown_statement() {
        let generator = RecordedGenerator::from_json_str(RECORDING).unwrap();
        assert_eq!(generator.generate("Something else").unwrap(), None);
    }

    #[test]
    fn test_recorded_reply_without_json_is_error() {
        let generator = RecordedGenerator::from_json_str(RECORDING).unwrap();
        assert!(generator.generate("Say nothing").is_err());
    }

    #[test]
    fn test_recording_must_be_object() {
        assert!(RecordedGenerator::from_json_str("[1, 2, 3]").is_err());
    }
}
