//! # Command Definition Schema
//!
//! The declared shape of a slash command: name, description and an ordered
//! list of typed options. Definitions are read from YAML command files and
//! projected into Discord's application command payload at registration.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Validate invocation option values against the schema
//! - 1.0.0: Initial schema with platform limit validation

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use super::options::CommandOptions;

/// Discord limits for application commands
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_DESCRIPTION_LENGTH: usize = 100;
pub const MAX_OPTIONS: usize = 25;
pub const MAX_CHOICES: usize = 25;

/// Command and option names: 1-32 letters without an uppercase form, digits,
/// `-` or `_`. Caseless scripts (CJK, Thai, Devanagari) are allowed.
fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (1..=MAX_NAME_LENGTH).contains(&len)
        && name.chars().all(|c| {
            (c.is_alphabetic() && !c.is_uppercase()) || c.is_numeric() || c == '-' || c == '_'
        })
}

/// Integer choice values are sent to Discord as 32-bit integers
fn fits_int_choice(value: &serde_json::Value) -> bool {
    value
        .as_i64()
        .map(|v| i32::try_from(v).is_ok())
        .unwrap_or(false)
}

/// A slash command as declared in a command file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

/// One typed option of a command
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

/// A fixed value an option may take
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Choice {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    String,
    Integer,
    Number,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Attachment,
}

impl OptionKind {
    /// Whether the option type supports a fixed choice list
    pub fn supports_choices(&self) -> bool {
        matches!(self, OptionKind::String | OptionKind::Integer | OptionKind::Number)
    }

    /// Whether a raw interaction value fits this option type.
    ///
    /// Snowflake-typed options arrive as strings.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            OptionKind::String => value.is_string(),
            OptionKind::Integer => value.is_i64() || value.is_u64(),
            OptionKind::Number => value.is_number(),
            OptionKind::Boolean => value.is_boolean(),
            OptionKind::User
            | OptionKind::Channel
            | OptionKind::Role
            | OptionKind::Mentionable
            | OptionKind::Attachment => value
                .as_str()
                .map(|s| s.parse::<u64>().is_ok())
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::String => "string",
            OptionKind::Integer => "integer",
            OptionKind::Number => "number",
            OptionKind::Boolean => "boolean",
            OptionKind::User => "user",
            OptionKind::Channel => "channel",
            OptionKind::Role => "role",
            OptionKind::Mentionable => "mentionable",
            OptionKind::Attachment => "attachment",
        };
        f.write_str(name)
    }
}

/// Why an invocation's option values were rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    Missing(String),
    Unknown(String),
    WrongType { option: String, expected: OptionKind },
    NotAChoice(String),
}

impl OptionError {
    /// Name of the offending option
    pub fn option(&self) -> &str {
        match self {
            OptionError::Missing(name)
            | OptionError::Unknown(name)
            | OptionError::NotAChoice(name) => name,
            OptionError::WrongType { option, .. } => option,
        }
    }
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::Missing(name) => write!(f, "required option '{name}' is missing"),
            OptionError::Unknown(name) => write!(f, "option '{name}' is not declared"),
            OptionError::WrongType { option, expected } => {
                write!(f, "option '{option}' must be of type {expected}")
            }
            OptionError::NotAChoice(name) => {
                write!(f, "option '{name}' is not one of the allowed choices")
            }
        }
    }
}

impl CommandDefinition {
    /// Check the definition against Discord's application command rules
    pub fn validate(&self) -> Result<()> {
        if !is_valid_name(&self.name) {
            return Err(anyhow!(
                "Command name must be 1-{MAX_NAME_LENGTH} non-uppercase letters, digits, '-' or '_': '{}'",
                self.name
            ));
        }
        validate_description(&self.description, &self.name)?;

        if self.options.len() > MAX_OPTIONS {
            return Err(anyhow!(
                "Command '{}' declares {} options (max {MAX_OPTIONS})",
                self.name,
                self.options.len()
            ));
        }

        let mut seen = HashSet::new();
        let mut optional_seen = false;
        for opt in &self.options {
            if !is_valid_name(&opt.name) {
                return Err(anyhow!(
                    "Option name must be 1-{MAX_NAME_LENGTH} non-uppercase letters, digits, '-' or '_': '{}' in command '{}'",
                    opt.name,
                    self.name
                ));
            }
            if !seen.insert(opt.name.as_str()) {
                return Err(anyhow!(
                    "Duplicate option '{}' in command '{}'",
                    opt.name,
                    self.name
                ));
            }
            validate_description(&opt.description, &opt.name)?;

            if opt.required && optional_seen {
                return Err(anyhow!(
                    "Required option '{}' must come before optional options in command '{}'",
                    opt.name,
                    self.name
                ));
            }
            optional_seen |= !opt.required;

            if !opt.choices.is_empty() {
                if !opt.kind.supports_choices() {
                    return Err(anyhow!(
                        "Option '{}' of type {} cannot declare choices",
                        opt.name,
                        opt.kind
                    ));
                }
                if opt.choices.len() > MAX_CHOICES {
                    return Err(anyhow!(
                        "Option '{}' declares {} choices (max {MAX_CHOICES})",
                        opt.name,
                        opt.choices.len()
                    ));
                }
                for choice in &opt.choices {
                    if !opt.kind.accepts(&choice.value) {
                        return Err(anyhow!(
                            "Choice '{}' of option '{}' is not a valid {}",
                            choice.name,
                            opt.name,
                            opt.kind
                        ));
                    }
                    if opt.kind == OptionKind::Integer && !fits_int_choice(&choice.value) {
                        return Err(anyhow!(
                            "Choice '{}' of option '{}' is outside the 32-bit integer range",
                            choice.name,
                            opt.name
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|opt| opt.name == name)
    }

    /// Check invocation values against the declared options
    pub fn check_options(&self, options: &CommandOptions) -> Result<(), OptionError> {
        for (name, value) in options.iter() {
            let declared = self
                .option(name)
                .ok_or_else(|| OptionError::Unknown(name.to_string()))?;

            if !declared.kind.accepts(value) {
                return Err(OptionError::WrongType {
                    option: name.to_string(),
                    expected: declared.kind,
                });
            }
            if !declared.choices.is_empty()
                && !declared.choices.iter().any(|c| choice_matches(&c.value, value))
            {
                return Err(OptionError::NotAChoice(name.to_string()));
            }
        }

        for declared in self.options.iter().filter(|opt| opt.required) {
            if !options.contains(&declared.name) {
                return Err(OptionError::Missing(declared.name.clone()));
            }
        }

        Ok(())
    }
}

fn validate_description(description: &str, owner: &str) -> Result<()> {
    let len = description.chars().count();
    if len == 0 || len > MAX_DESCRIPTION_LENGTH {
        return Err(anyhow!(
            "Description of '{owner}' must be 1-{MAX_DESCRIPTION_LENGTH} characters (got {len})"
        ));
    }
    Ok(())
}

/// Numeric choices compare by value, so `1` matches `1.0`
fn choice_matches(choice: &Value, value: &Value) -> bool {
    match (choice.as_f64(), value.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => choice == value,
    }
}
