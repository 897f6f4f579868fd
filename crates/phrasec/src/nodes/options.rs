//! Option objects passed to phrase constructs.

use crate::compiler::{CompileError, compute_suggestions};
use crate::types::{Expr, Location};

/// Whether a plural shows its count in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShowCount {
    /// Show the count for every bucket, including `1 photo`.
    Yes,
    #[default]
    No,
    /// Show the count only in the plural form.
    IfMany,
}

impl ShowCount {
    pub const ALLOWED: &'static [&'static str] = &["yes", "no", "ifMany"];

    pub fn from_name(name: &str) -> Option<ShowCount> {
        match name {
            "yes" => Some(ShowCount::Yes),
            "no" => Some(ShowCount::No),
            "ifMany" => Some(ShowCount::IfMany),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShowCount::Yes => "yes",
            ShowCount::No => "no",
            ShowCount::IfMany => "ifMany",
        }
    }
}

/// A validated options object: every key is known to the construct.
#[derive(Debug, Clone, Default)]
pub struct OptionBag<'a> {
    entries: Vec<(&'a str, &'a Expr)>,
    location: Location,
}

impl<'a> OptionBag<'a> {
    /// Validate an options argument against the keys a construct accepts.
    ///
    /// A missing argument is an empty bag. Anything but an object literal
    /// with statically known keys is rejected.
    pub fn parse(
        options: Option<&'a Expr>,
        allowed: &[&str],
        location: Location,
    ) -> Result<OptionBag<'a>, CompileError> {
        let Some(options) = options else {
            return Ok(OptionBag {
                entries: Vec::new(),
                location,
            });
        };
        let Expr::Object(properties) = options else {
            return Err(CompileError::malformed(
                format!(
                    "Expected options to be an object literal, but got `{}`",
                    options.kind_name()
                ),
                location,
            ));
        };

        let mut entries = Vec::with_capacity(properties.len());
        for property in properties {
            let Some(key) = property.key.static_name() else {
                return Err(CompileError::malformed(
                    "Option keys must be known at compile time",
                    location,
                ));
            };
            if !allowed.contains(&key) {
                return Err(CompileError::UnknownOption {
                    option: key.to_string(),
                    allowed: allowed.iter().map(ToString::to_string).collect(),
                    suggestions: compute_suggestions(key, allowed),
                    location,
                });
            }
            entries.push((key, &property.value));
        }
        Ok(OptionBag { entries, location })
    }

    pub fn get(&self, key: &str) -> Option<&'a Expr> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }

    /// A string-literal option.
    pub fn string(&self, key: &str) -> Result<Option<String>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => match value.as_string_literal() {
                Some(text) => Ok(Some(text.to_string())),
                None => Err(CompileError::malformed(
                    format!(
                        "Option \"{key}\" must be a string literal, but got `{}`",
                        value.kind_name()
                    ),
                    self.location,
                )),
            },
        }
    }

    /// A boolean-literal option, false when absent.
    pub fn flag(&self, key: &str) -> Result<bool, CompileError> {
        match self.get(key) {
            None => Ok(false),
            Some(value) => value
                .as_bool_literal()
                .ok_or_else(|| CompileError::InvalidOptionValue {
                    option: key.to_string(),
                    value: value.to_string(),
                    allowed: vec!["true".to_string(), "false".to_string()],
                    location: self.location,
                }),
        }
    }

    /// The `showCount` option of a plural.
    pub fn show_count(&self, key: &str) -> Result<ShowCount, CompileError> {
        let Some(value) = self.get(key) else {
            return Ok(ShowCount::default());
        };
        let invalid = |shown: String| CompileError::InvalidOptionValue {
            option: key.to_string(),
            value: shown,
            allowed: ShowCount::ALLOWED.iter().map(ToString::to_string).collect(),
            location: self.location,
        };
        match value.as_string_literal() {
            Some(name) => ShowCount::from_name(name).ok_or_else(|| invalid(name.to_string())),
            None => Err(invalid(value.to_string())),
        }
    }
}
