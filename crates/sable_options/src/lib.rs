//! sable_options: Parser configuration and `sable.json` loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the configuration file the CLI looks for.
pub const CONFIG_FILE_NAME: &str = "sable.json";

/// Options recognized by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Parse with the module goal. Implies strict mode.
    pub module: bool,
    /// Enable proposed syntax (decorators).
    pub next: bool,
    /// Emit `start`, `end` and `range` on every node.
    pub ranges: bool,
    /// Emit `loc` on every node.
    pub loc: bool,
    /// Emit `raw` on literals.
    pub raw: bool,
    /// Keep `ParenthesizedExpression` nodes.
    pub preserve_parens: bool,
    /// Allow legacy sloppy-mode syntax from Annex B.
    pub web_compat: bool,
    /// Enable markup elements.
    pub jsx: bool,
    /// Reject duplicate property names in object patterns.
    pub unique_keys_in_patterns: bool,
    /// Allow `return` at the top level of a script.
    pub global_return: bool,
    /// Start scripts in strict mode.
    pub implied_strict: bool,
}

impl ParseOptions {
    pub fn module() -> Self {
        Self {
            module: true,
            ..Self::default()
        }
    }

    pub fn script() -> Self {
        Self::default()
    }

    /// Set every flag that is set in `other`.
    pub fn merge(&mut self, other: &ParseOptions) {
        self.module |= other.module;
        self.next |= other.next;
        self.ranges |= other.ranges;
        self.loc |= other.loc;
        self.raw |= other.raw;
        self.preserve_parens |= other.preserve_parens;
        self.web_compat |= other.web_compat;
        self.jsx |= other.jsx;
        self.unique_keys_in_patterns |= other.unique_keys_in_patterns;
        self.global_return |= other.global_return;
        self.implied_strict |= other.implied_strict;
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse options from JSON text. Unknown keys are rejected.
pub fn parse_options_json(content: &str) -> Result<ParseOptions, OptionsError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if let Some(map) = value.as_object() {
        for key in map.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                return Err(OptionsError::Json(serde::de::Error::custom(format!(
                    "unknown option `{key}`"
                ))));
            }
        }
    }
    Ok(serde_json::from_value(value)?)
}

/// Read and parse an options file.
pub fn load_options_file(path: impl AsRef<Path>) -> Result<ParseOptions, OptionsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_options_json(&content)
}

const KNOWN_KEYS: &[&str] = &[
    "module",
    "next",
    "ranges",
    "loc",
    "raw",
    "preserveParens",
    "webCompat",
    "jsx",
    "uniqueKeysInPatterns",
    "globalReturn",
    "impliedStrict",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_script_goal() {
        let options = ParseOptions::default();
        assert!(!options.module);
        assert!(!options.ranges);
        assert_eq!(options, ParseOptions::script());
    }

    #[test]
    fn test_parse_camel_case_keys() {
        let options = parse_options_json(r#"{ "module": true, "preserveParens": true, "webCompat": true }"#).unwrap();
        assert!(options.module);
        assert!(options.preserve_parens);
        assert!(options.web_compat);
        assert!(!options.jsx);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_options_json(r#"{ "modul": true }"#).unwrap_err();
        assert!(err.to_string().contains("modul"));
    }

    #[test]
    fn test_merge_sets_flags() {
        let mut options = ParseOptions::module();
        options.merge(&ParseOptions {
            jsx: true,
            ..ParseOptions::default()
        });
        assert!(options.module);
        assert!(options.jsx);
    }

    #[test]
    fn test_missing_file() {
        let err = load_options_file("/nonexistent/sable.json").unwrap_err();
        assert!(matches!(err, OptionsError::Io { .. }));
    }

    #[test]
    fn test_serialize_round_trip() {
        let options = ParseOptions {
            loc: true,
            unique_keys_in_patterns: true,
            ..ParseOptions::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"uniqueKeysInPatterns\":true"));
        assert_eq!(parse_options_json(&json).unwrap(), options);
    }
}
