//! Option values carried by a slash command invocation
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Replace per-type option helper functions with an owned option map

use serde_json::Value;
use serenity::model::application::interaction::application_command::CommandDataOption;

/// Name → value pairs as supplied by the invoking user, in the order received
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOptions {
    values: Vec<(String, Value)>,
}

impl CommandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Collect top-level options from a serenity interaction
    ///
    /// Options the user left empty carry no value and are skipped.
    pub fn from_interaction(options: &[CommandDataOption]) -> Self {
        Self {
            values: options
                .iter()
                .filter_map(|opt| opt.value.clone().map(|value| (opt.name.clone(), value)))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(opt, _)| opt == name)
            .map(|(_, value)| value)
    }

    /// Get a string option
    pub fn get_string(&self, name: &str) -> Option<String> {
        self.get(name)
            .and_then(|val| val.as_str())
            .map(|s| s.to_string())
    }

    /// Get an integer option
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|val| val.as_i64())
    }

    /// Get a boolean option
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|val| val.as_bool())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
