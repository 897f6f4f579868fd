//! Error types for phrase compilation.

use thiserror::Error;

use crate::types::{Location, TokenName};

/// An error that rejects a phrase.
///
/// Each error names the construct and location it was raised for; nothing is
/// emitted for a rejected phrase.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A construct was given arguments of the wrong shape.
    #[error("{location}: {message}")]
    Malformed { message: String, location: Location },

    /// Two tokens in the same rendering of a phrase share a name.
    #[error("{location}: There's already a token called \"{name}\" in this phrase")]
    TokenCollision { name: TokenName, location: Location },

    /// `sameParam` names a token nothing before it declared.
    #[error("{location}: sameParam refers to unknown token \"{name}\"")]
    UnknownSameParam { name: TokenName, location: Location },

    /// An axis-driving argument cannot be evaluated ahead of the phrase.
    #[error(
        "{location}: Expect string variation runtime arguments to not {} function calls or class \
         instantiations, but \"{argument}\" argument of {construct} axis {axis} {} a function \
         call or class instantiation.",
        if *direct { "be" } else { "contain" },
        if *direct { "is" } else { "contains" }
    )]
    UnsafeHoist {
        argument: String,
        /// Construct driving the axis: a node kind, or `subject`.
        construct: String,
        axis: usize,
        /// The argument is itself the call, rather than containing one.
        direct: bool,
        location: Location,
    },

    /// A known option was given a value outside its allowed set.
    #[error(
        "{location}: Option \"{option}\" has an invalid value: \"{value}\". Only allowed: {}",
        allowed.join(", ")
    )]
    InvalidOptionValue {
        option: String,
        value: String,
        allowed: Vec<String>,
        location: Location,
    },

    /// An option key the construct does not accept.
    #[error(
        "{location}: Invalid option \"{option}\". Only allowed: {}{}",
        allowed.join(", "),
        format_suggestions(suggestions)
    )]
    UnknownOption {
        option: String,
        allowed: Vec<String>,
        suggestions: Vec<String>,
        location: Location,
    },

    /// The file-level `@fbt` docblock is not valid JSON options.
    #[error("invalid @fbt docblock: {source}")]
    Docblock {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize payload: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

impl CompileError {
    /// Location of the offending construct, when the error has one.
    pub fn location(&self) -> Option<Location> {
        match self {
            CompileError::Malformed { location, .. }
            | CompileError::TokenCollision { location, .. }
            | CompileError::UnknownSameParam { location, .. }
            | CompileError::UnsafeHoist { location, .. }
            | CompileError::InvalidOptionValue { location, .. }
            | CompileError::UnknownOption { location, .. } => Some(*location),
            CompileError::Docblock { .. } | CompileError::Serialize { .. } => None,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>, location: Location) -> CompileError {
        CompileError::Malformed {
            message: message.into(),
            location,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!(" (did you mean \"{only}\"?)"),
        _ => format!(" (did you mean one of: {}?)", suggestions.join(", ")),
    }
}

/// Compute "did you mean" suggestions for a misspelled key.
///
/// Keys of three characters or fewer tolerate one edit, longer keys two.
/// At most three suggestions are returned, closest first.
pub fn compute_suggestions(target: &str, candidates: &[&str]) -> Vec<String> {
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(|candidate| (strsim::levenshtein(target, candidate), *candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
