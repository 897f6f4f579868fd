//! Phrase compilation.
//!
//! This module turns a phrase tree into its translation payload: it collects
//! the variation axes, enumerates every combination of axis values, renders
//! the text of each combination, and compiles embedded fragments into
//! sub-payloads sharing the phrase's axes.

mod axis;
mod batch;
mod engine;
mod error;
mod hoist;
mod payload;
mod plural;
mod render;
mod runtime;
mod signature;
mod tokens;
mod tree;

pub use axis::{AxisIdentity, AxisKind, AxisList, AxisValue, RuntimeArg, VariationAxis};
pub use batch::{BatchReport, PhraseFailure};
pub use engine::{CompiledPhrase, CompilerConfig, PhraseCompiler, compile};
pub use error::{CompileError, compute_suggestions};
pub use payload::{JsFbt, Leaf, Payload, SENTINEL, TextTable};
pub use plural::{IcuPluralRules, NumberVariationTable, PluralRuleProvider, PluralRulesError};
pub use runtime::{FragmentPhrase, HoistedArgument, ParamVariation, RuntimeArgument, RuntimeCall};
pub use signature::{VariationSignature, enumerate_signatures};
pub use tree::NodeId;

use crate::nodes::Construct;

/// Collect the variation axes of a phrase, in first-appearance order.
pub fn variation_axes(
    construct: &Construct,
    plural_rules: Option<&(dyn PluralRuleProvider + Send + Sync)>,
) -> AxisList {
    axis::collect_axes(&tree::PhraseTree::build(construct), plural_rules)
}
