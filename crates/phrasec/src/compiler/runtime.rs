//! Runtime calls emitted alongside a payload.
//!
//! Code generation proper belongs to the host; these types describe which
//! runtime helper each argument slot feeds, and with which expressions.

use phrasec_semantics::PronounUsage;

use super::payload::Payload;
use crate::types::{Expr, TokenName};

/// The runtime helper call evaluated for one argument.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCall {
    /// A named value, optionally varying by number or by gender.
    Param {
        token: TokenName,
        value: Expr,
        variation: ParamVariation,
    },
    Name {
        token: TokenName,
        value: Expr,
        gender: Expr,
    },
    /// `token` is `None` when the count is not shown.
    Plural {
        count: Expr,
        token: Option<TokenName>,
        value: Option<Expr>,
    },
    Enum {
        value: Expr,
        keys: Vec<String>,
    },
    Pronoun {
        usage: PronounUsage,
        gender: Expr,
        human: bool,
    },
    Subject {
        gender: Expr,
    },
    /// An embedded fragment, rendered through its own sub-payload.
    Fragment(Box<FragmentPhrase>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamVariation {
    None,
    Number,
    Gender(Expr),
}

/// One argument of a phrase's runtime call, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeArgument {
    /// A value computed once ahead of the phrase; the index of a
    /// [`HoistedArgument`].
    Temporary(usize),
    Call(RuntimeCall),
}

/// An axis-driving call evaluated once before the phrase, so nested
/// fragments and the enclosing phrase see the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct HoistedArgument {
    /// Index of the axis this temporary drives.
    pub axis: usize,
    pub call: RuntimeCall,
}

/// A compiled fragment: its alias token, payload and runtime arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentPhrase {
    pub alias: TokenName,
    pub payload: Payload,
    pub arguments: Vec<RuntimeArgument>,
}
