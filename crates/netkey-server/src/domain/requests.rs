//! Typed request bodies and keycode combo planning.
//!
//! Bodies are first checked field-by-field against a schema (see
//! [`crate::application::validator`]) and only then deserialized into these
//! types, so a failed deserialization here means a shape problem the schema
//! cannot express (for example a number inside the keycode list).

use std::time::Duration;

use serde::Deserialize;

/// Message for any `data` entry that is neither a name nor a list of names.
pub const KEYCODE_SHAPE_ERROR: &str = "Key: data must contain key names or lists of key names";

/// Message for a negative `wait`.
pub const WAIT_ERROR: &str = "Key: wait must be a non-negative number";

/// Body of the `type` route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeRequest {
    /// Text to type.
    pub data: String,
    /// Host layout identifier; en-US when absent.
    #[serde(default)]
    pub layout: Option<String>,
    /// Seconds to pause after each character.
    #[serde(default)]
    pub wait: Option<f64>,
}

/// One element of the keycode `data` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KeycodeEntry {
    Single(String),
    Combo(Vec<String>),
}

/// Body of the `type_keycodes` route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeycodeRequest {
    pub data: Vec<KeycodeEntry>,
    /// Seconds to pause after each combo is released.
    #[serde(default)]
    pub wait: Option<f64>,
    /// Press every key on its own.
    #[serde(default)]
    pub separate: Option<bool>,
}

/// Converts an optional `wait` in seconds into a pause.
///
/// Zero behaves like an absent value: no pause. Negative values, NaN,
/// infinity and anything too large for a [`Duration`] are rejected.
pub fn checked_wait(wait: Option<f64>) -> Result<Option<Duration>, &'static str> {
    match wait {
        None => Ok(None),
        Some(w) if w == 0.0 => Ok(None),
        Some(w) => Duration::try_from_secs_f64(w)
            .map(Some)
            .map_err(|_| WAIT_ERROR),
    }
}

impl KeycodeRequest {
    /// Splits `data` into the combos to press, in order.
    ///
    /// - `separate`: every name on its own, nested lists flattened.
    /// - any nested list: one combo per entry, a bare name being a one-key combo.
    /// - otherwise: all names pressed together as a single combo.
    ///
    /// Empty combos are dropped.
    pub fn plan_combos(&self) -> Vec<Vec<&str>> {
        let combos: Vec<Vec<&str>> = if self.separate.unwrap_or(false) {
            self.data
                .iter()
                .flat_map(KeycodeEntry::names)
                .map(|name| vec![name])
                .collect()
        } else if self.data.iter().any(|e| matches!(e, KeycodeEntry::Combo(_))) {
            self.data.iter().map(|e| e.names().collect()).collect()
        } else {
            vec![self.data.iter().flat_map(KeycodeEntry::names).collect()]
        };
        combos.into_iter().filter(|c| !c.is_empty()).collect()
    }
}

impl KeycodeEntry {
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            KeycodeEntry::Single(name) => Box::new(std::iter::once(name.as_str())),
            KeycodeEntry::Combo(names) => Box::new(names.iter().map(String::as_str)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> KeycodeRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_flat_list_is_one_combo() {
        // Arrange
        let req = request(json!({"data": ["CONTROL", "SHIFT", "ESCAPE"]}));

        // Act
        let plan = req.plan_combos();

        // Assert
        assert_eq!(plan, vec![vec!["CONTROL", "SHIFT", "ESCAPE"]]);
    }

    #[test]
    fn test_mixed_list_is_one_combo_per_entry() {
        let req = request(json!({
            "data": ["F5", ["SHIFT", "KEYPAD_SEVEN"], ["CONTROL", "SHIFT", "ESCAPE"]]
        }));

        assert_eq!(
            req.plan_combos(),
            vec![
                vec!["F5"],
                vec!["SHIFT", "KEYPAD_SEVEN"],
                vec!["CONTROL", "SHIFT", "ESCAPE"],
            ]
        );
    }

    #[test]
    fn test_separate_presses_each_key_alone() {
        let req = request(json!({"data": ["KEYPAD_SEVEN", "C", "ESCAPE"], "separate": true}));

        assert_eq!(req.plan_combos(), vec![vec!["KEYPAD_SEVEN"], vec!["C"], vec!["ESCAPE"]]);
    }

    #[test]
    fn test_separate_flattens_nested_lists() {
        let req = request(json!({"data": ["A", ["B", "C"]], "separate": true}));

        assert_eq!(req.plan_combos(), vec![vec!["A"], vec!["B"], vec!["C"]]);
    }

    #[test]
    fn test_separate_false_behaves_like_absent() {
        let req = request(json!({"data": ["A", "B"], "separate": false}));
        assert_eq!(req.plan_combos(), vec![vec!["A", "B"]]);
    }

    #[test]
    fn test_empty_combos_are_skipped() {
        assert!(request(json!({"data": []})).plan_combos().is_empty());
        assert_eq!(
            request(json!({"data": [[], ["A"]]})).plan_combos(),
            vec![vec!["A"]]
        );
    }

    #[test]
    fn test_non_string_entries_fail_to_deserialize() {
        let result: Result<KeycodeRequest, _> = serde_json::from_value(json!({"data": [1, 2]}));
        assert!(result.is_err());

        let nested: Result<KeycodeRequest, _> =
            serde_json::from_value(json!({"data": [["A", ["B"]]]}));
        assert!(nested.is_err());
    }

    #[test]
    fn test_type_request_optional_fields() {
        let req: TypeRequest = serde_json::from_value(json!({"data": "hi"})).unwrap();
        assert_eq!(req.layout, None);
        assert_eq!(req.wait, None);

        let req: TypeRequest =
            serde_json::from_value(json!({"data": "hi", "layout": "de-DE", "wait": 1})).unwrap();
        assert_eq!(req.layout.as_deref(), Some("de-DE"));
        assert_eq!(req.wait, Some(1.0));
    }

    #[test]
    fn test_checked_wait() {
        assert_eq!(checked_wait(None), Ok(None));
        assert_eq!(checked_wait(Some(0.0)), Ok(None));
        assert_eq!(
            checked_wait(Some(0.25)),
            Ok(Some(Duration::from_millis(250)))
        );
        assert_eq!(checked_wait(Some(-1.0)), Err(WAIT_ERROR));
        assert_eq!(checked_wait(Some(f64::NAN)), Err(WAIT_ERROR));
        assert_eq!(checked_wait(Some(f64::INFINITY)), Err(WAIT_ERROR));
    }

    #[test]
    fn test_checked_wait_rejects_values_beyond_duration_range() {
        assert_eq!(checked_wait(Some(1e20)), Err(WAIT_ERROR));
        assert_eq!(checked_wait(Some(f64::MAX)), Err(WAIT_ERROR));
    }
}
