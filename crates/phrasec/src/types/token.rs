use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use serde::Serialize;

/// The name of a placeholder token inside rendered phrase text.
///
/// Explicit tokens carry the author's name (`name`, `count`), implicit
/// fragment tokens start with `=` (`=a photo`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TokenName(String);

impl TokenName {
    /// Marker that starts every implicit fragment token and alias.
    pub const IMPLICIT_MARKER: char = '=';

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token as it appears in payload text: `{name}`.
    pub fn text_pattern(&self) -> String {
        format!("{{{}}}", self.0)
    }

    /// Token as it appears inside another token's name: `[name]`.
    pub fn nested_pattern(&self) -> String {
        format!("[{}]", self.0)
    }
}

impl Deref for TokenName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for TokenName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TokenName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for TokenName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
