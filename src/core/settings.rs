//! Map settings: evaluation levels, province choices, marker colors and page size.
//!
//! Defaults are built in; a JSON object named by `DJEOGRAPHY_CONFIG` overrides
//! them key by key. The merged result is validated once at startup.

use std::collections::HashSet;
use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use validator::Validate;

use crate::shared::constants::{DEFAULT_MARKER_COLOR, DEFAULT_PAGINATION};
use crate::shared::provinces::ITALIAN_PROVINCES;
use crate::shared::validation::PROVINCE_CODE_REGEX;

/// Environment variable holding the path of the JSON overrides
pub const CONFIG_ENV_VAR: &str = "DJEOGRAPHY_CONFIG";

const KEY_EVAL_LEVELS: &str = "EVAL_LEVELS";
const KEY_PROV_CHOICES: &str = "PROV_CHOICES";
const KEY_DEFAULT_MARKER_COLOR: &str = "DEFAULT_MARKER_COLOR";
const KEY_PAGINATION: &str = "PAGINATION";

const EVAL_LEVELS_SHAPE: &str = "should be a non-empty list of objects. Each evaluation level requires \
'db' (a non-empty string of at most 3 characters, unique), \
'display' (a string of at most 32 characters, unique) and \
'marker_color' (a HTML color name or a HEX code, unique)";

const PROV_CHOICES_SHAPE: &str =
    "should be a non-empty list of [code, name] pairs with unique two-letter upper-case codes";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("DJEOGRAPHY_CONFIG should contain a JSON object")]
    NotAnObject,

    #[error("DJEOGRAPHY_CONFIG['{key}'] {expected}")]
    Invalid { key: &'static str, expected: String },
}

/// One evaluation level as configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EvalLevelSetting {
    #[validate(length(min = 1, max = 3, message = "'db' must be 1-3 characters"))]
    pub db: String,

    #[validate(length(min = 1, max = 32, message = "'display' must be 1-32 characters"))]
    pub display: String,

    #[validate(length(min = 1, max = 32, message = "'marker_color' must be 1-32 characters"))]
    pub marker_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Province {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct MapSettings {
    pub eval_levels: Vec<EvalLevelSetting>,
    pub provinces: Vec<Province>,
    pub default_marker_color: String,
    pub pagination: i64,
}

/// Negative, mixed and positive, the levels seeded by the initial migration.
pub fn default_eval_levels() -> Vec<EvalLevelSetting> {
    [
        ("NEG", "Negativa", "red"),
        ("MIX", "Mista", "orange"),
        ("POS", "Positiva", "green"),
    ]
    .into_iter()
    .map(|(db, display, marker_color)| EvalLevelSetting {
        db: db.to_string(),
        display: display.to_string(),
        marker_color: marker_color.to_string(),
    })
    .collect()
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            eval_levels: default_eval_levels(),
            provinces: ITALIAN_PROVINCES
                .iter()
                .map(|(code, name)| Province {
                    code: code.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            default_marker_color: DEFAULT_MARKER_COLOR.to_string(),
            pagination: DEFAULT_PAGINATION,
        }
    }
}

impl MapSettings {
    /// Defaults merged with the file named by `DJEOGRAPHY_CONFIG`, if set.
    pub fn from_env() -> Result<Self, SettingsError> {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw, &path.display().to_string())
    }

    pub fn from_json(raw: &str, origin: &str) -> Result<Self, SettingsError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| SettingsError::Parse {
            path: origin.to_string(),
            source,
        })?;

        match value {
            Value::Object(overrides) => Self::from_overrides(&overrides),
            _ => Err(SettingsError::NotAnObject),
        }
    }

    pub fn from_overrides(overrides: &Map<String, Value>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        for (key, value) in overrides {
            match key.as_str() {
                KEY_EVAL_LEVELS => settings.eval_levels = parse_eval_levels(value)?,
                KEY_PROV_CHOICES => settings.provinces = parse_provinces(value)?,
                KEY_DEFAULT_MARKER_COLOR => {
                    settings.default_marker_color = parse_marker_color(value)?
                }
                KEY_PAGINATION => settings.pagination = parse_pagination(value)?,
                other => tracing::warn!("Ignoring unknown {} key '{}'", CONFIG_ENV_VAR, other),
            }
        }

        Ok(settings)
    }

    pub fn province_name(&self, code: &str) -> Option<&str> {
        self.provinces
            .iter()
            .find(|p| p.code == code)
            .map(|p| p.name.as_str())
    }

    pub fn has_province(&self, code: &str) -> bool {
        self.province_name(code).is_some()
    }
}

fn invalid(key: &'static str, expected: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        key,
        expected: expected.into(),
    }
}

fn parse_pagination(value: &Value) -> Result<i64, SettingsError> {
    const EXPECTED: &str = "should be an integer greater than or equal to 1";

    let pagination = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid(KEY_PAGINATION, EXPECTED))?;

    if pagination < 1 {
        return Err(invalid(KEY_PAGINATION, EXPECTED));
    }
    Ok(pagination)
}

fn parse_marker_color(value: &Value) -> Result<String, SettingsError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(KEY_DEFAULT_MARKER_COLOR, "should be a HTML color name or a HEX string"))
}

fn parse_eval_levels(value: &Value) -> Result<Vec<EvalLevelSetting>, SettingsError> {
    let levels: Vec<EvalLevelSetting> = serde_json::from_value(value.clone())
        .map_err(|e| invalid(KEY_EVAL_LEVELS, format!("{} ({})", EVAL_LEVELS_SHAPE, e)))?;

    if levels.is_empty() {
        return Err(invalid(KEY_EVAL_LEVELS, format!("{} (the list is empty)", EVAL_LEVELS_SHAPE)));
    }

    for level in &levels {
        level
            .validate()
            .map_err(|e| invalid(KEY_EVAL_LEVELS, format!("{} ({})", EVAL_LEVELS_SHAPE, e)))?;
    }

    let mut codes = HashSet::new();
    let mut names = HashSet::new();
    let mut colors = HashSet::new();
    for level in &levels {
        if !codes.insert(level.db.as_str()) {
            return Err(invalid(
                KEY_EVAL_LEVELS,
                format!("{} (duplicate 'db' value '{}')", EVAL_LEVELS_SHAPE, level.db),
            ));
        }
        if !names.insert(level.display.as_str()) {
            return Err(invalid(
                KEY_EVAL_LEVELS,
                format!("{} (duplicate 'display' value '{}')", EVAL_LEVELS_SHAPE, level.display),
            ));
        }
        if !colors.insert(level.marker_color.as_str()) {
            return Err(invalid(
                KEY_EVAL_LEVELS,
                format!(
                    "{} (duplicate 'marker_color' value '{}')",
                    EVAL_LEVELS_SHAPE, level.marker_color
                ),
            ));
        }
    }

    Ok(levels)
}

fn parse_provinces(value: &Value) -> Result<Vec<Province>, SettingsError> {
    let pairs: Vec<(String, String)> = serde_json::from_value(value.clone())
        .map_err(|e| invalid(KEY_PROV_CHOICES, format!("{} ({})", PROV_CHOICES_SHAPE, e)))?;

    if pairs.is_empty() {
        return Err(invalid(KEY_PROV_CHOICES, format!("{} (the list is empty)", PROV_CHOICES_SHAPE)));
    }

    let mut seen = HashSet::new();
    let mut provinces = Vec::with_capacity(pairs.len());
    for (code, name) in pairs {
        if !PROVINCE_CODE_REGEX.is_match(&code) {
            return Err(invalid(
                KEY_PROV_CHOICES,
                format!("{} (invalid code '{}')", PROV_CHOICES_SHAPE, code),
            ));
        }
        if !seen.insert(code.clone()) {
            return Err(invalid(
                KEY_PROV_CHOICES,
                format!("{} (duplicate code '{}')", PROV_CHOICES_SHAPE, code),
            ));
        }
        provinces.push(Province { code, name });
    }

    Ok(provinces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overrides(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test overrides must be an object"),
        }
    }

    fn invalid_key(result: Result<MapSettings, SettingsError>) -> &'static str {
        match result {
            Err(SettingsError::Invalid { key, .. }) => key,
            other => panic!("expected an invalid key error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = MapSettings::from_overrides(&Map::new()).unwrap();
        assert_eq!(settings.pagination, 6);
        assert_eq!(settings.default_marker_color, "gray");
        assert_eq!(settings.eval_levels.len(), 3);
        assert_eq!(settings.eval_levels[2].db, "POS");
        assert_eq!(settings.province_name("PI"), Some("Pisa"));
        assert!(!settings.has_province("XX"));
    }

    #[test]
    fn test_eval_levels_reject_shared_marker_color() {
        let result = MapSettings::from_overrides(&overrides(json!({
            "EVAL_LEVELS": [
                { "db": "NEG", "display": "Negativa", "marker_color": "red" },
                { "db": "BAD", "display": "Pessima", "marker_color": "red" }
            ]
        })));
        assert_eq!(invalid_key(result), "EVAL_LEVELS");
    }

    #[test]
    fn test_pagination_coerces_numeric_strings() {
        let settings =
            MapSettings::from_overrides(&overrides(json!({ "PAGINATION": "10" }))).unwrap();
        assert_eq!(settings.pagination, 10);

        let settings = MapSettings::from_overrides(&overrides(json!({ "PAGINATION": 3 }))).unwrap();
        assert_eq!(settings.pagination, 3);
    }

    #[test]
    fn test_pagination_rejects_garbage() {
        for bad in [json!("six"), json!(0), json!(-2), json!(null), json!([6])] {
            let result = MapSettings::from_overrides(&overrides(json!({ "PAGINATION": bad })));
            assert_eq!(invalid_key(result), "PAGINATION");
        }
    }

    #[test]
    fn test_marker_color_must_be_a_string() {
        let result = MapSettings::from_overrides(&overrides(json!({ "DEFAULT_MARKER_COLOR": 12 })));
        assert_eq!(invalid_key(result), "DEFAULT_MARKER_COLOR");

        let settings = MapSettings::from_overrides(&overrides(
            json!({ "DEFAULT_MARKER_COLOR": "#336699" }),
        ))
        .unwrap();
        assert_eq!(settings.default_marker_color, "#336699");
    }

    #[test]
    fn test_eval_levels_override() {
        let settings = MapSettings::from_overrides(&overrides(json!({
            "EVAL_LEVELS": [
                { "db": "BAD", "display": "Cattiva", "marker_color": "black" },
                { "db": "OK", "display": "Buona", "marker_color": "blue" }
            ]
        })))
        .unwrap();
        assert_eq!(settings.eval_levels.len(), 2);
        assert_eq!(settings.eval_levels[1].marker_color, "blue");
    }

    #[test]
    fn test_eval_levels_rejections() {
        let cases = [
            json!([]),
            json!("NEG"),
            json!([{ "db": "", "display": "Vuota", "marker_color": "red" }]),
            json!([{ "db": "LONG", "display": "Lunga", "marker_color": "red" }]),
            json!([{ "db": "NEG", "marker_color": "red" }]),
            json!([{ "db": "NEG", "display": 1, "marker_color": "red" }]),
            json!([
                { "db": "NEG", "display": "Negativa", "marker_color": "red" },
                { "db": "NEG", "display": "Altra", "marker_color": "blue" }
            ]),
            json!([
                { "db": "NEG", "display": "Negativa", "marker_color": "red" },
                { "db": "NE2", "display": "Negativa", "marker_color": "blue" }
            ]),
        ];

        for case in cases {
            let result = MapSettings::from_overrides(&overrides(json!({ "EVAL_LEVELS": case })));
            assert_eq!(invalid_key(result), "EVAL_LEVELS");
        }
    }

    #[test]
    fn test_error_message_names_key_and_shape() {
        let err = MapSettings::from_overrides(&overrides(json!({ "EVAL_LEVELS": [] })))
            .err()
            .unwrap();
        let message = err.to_string();
        assert!(message.starts_with("DJEOGRAPHY_CONFIG['EVAL_LEVELS']"));
        assert!(message.contains("'marker_color'"));
    }

    #[test]
    fn test_province_choices() {
        let settings = MapSettings::from_overrides(&overrides(json!({
            "PROV_CHOICES": [["TN", "Trento"], ["BZ", "Bolzano"]]
        })))
        .unwrap();
        assert_eq!(settings.provinces.len(), 2);
        assert!(!settings.has_province("PI"));

        for bad in [
            json!([]),
            json!([["tn", "Trento"]]),
            json!([["TN", "Trento"], ["TN", "Ancora Trento"]]),
            json!({ "TN": "Trento" }),
        ] {
            let result = MapSettings::from_overrides(&overrides(json!({ "PROV_CHOICES": bad })));
            assert_eq!(invalid_key(result), "PROV_CHOICES");
        }
    }

    #[test]
    fn test_from_json_requires_object() {
        assert!(matches!(
            MapSettings::from_json("[1, 2]", "inline"),
            Err(SettingsError::NotAnObject)
        ));
        assert!(matches!(
            MapSettings::from_json("{ nope", "inline"),
            Err(SettingsError::Parse { .. })
        ));
    }
}
