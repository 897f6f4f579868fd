//! Hoisting of axis-driving arguments.
//!
//! A phrase with fragments evaluates every axis-driving argument once, ahead
//! of the phrase, and shares the result between the enclosing phrase and all
//! of its fragments. Since evaluation order then differs from source order,
//! arguments with calls or instantiations are rejected.

use tracing::{debug, trace};

use super::axis::{AxisIdentity, AxisList};
use super::error::CompileError;
use super::runtime::{HoistedArgument, ParamVariation, RuntimeCall};
use super::tree::{NodeId, PhraseTree};
use crate::nodes::PhraseNode;
use crate::types::{Expr, Location};

/// Plan the temporaries of a phrase, one per axis in axis order.
///
/// Phrases without fragments evaluate their arguments inline and get no
/// temporaries.
pub(crate) fn plan(
    tree: &PhraseTree<'_>,
    axes: &AxisList,
) -> Result<Vec<HoistedArgument>, CompileError> {
    if !tree.has_fragments() {
        return Ok(Vec::new());
    }
    let mut hoisted = Vec::with_capacity(axes.len());
    for (index, axis) in axes.as_slice().iter().enumerate() {
        let call = match (&axis.identity, axis.contributors.first()) {
            (AxisIdentity::Subject, _) => subject_call(tree),
            (_, Some(first)) => call_for(tree, *first),
            (_, None) => None,
        };
        let Some(call) = call else {
            continue;
        };
        let (construct, location) = match axis.contributors.first() {
            Some(id) => (tree.node(*id).kind_name(), tree.node(*id).location()),
            None => ("subject", tree.root.location),
        };
        if let Some((argument, expr)) = driving_argument(&call) {
            check_hoistable(expr, &HoistSite {
                argument,
                construct,
                axis: index,
                location,
            })?;
        }
        trace!(axis = index, ?call, "hoisted temporary");
        hoisted.push(HoistedArgument { axis: index, call });
    }
    debug!(count = hoisted.len(), "hoisted axis arguments");
    Ok(hoisted)
}

/// Where an axis-driving argument sits, for diagnostics.
struct HoistSite {
    argument: &'static str,
    construct: &'static str,
    axis: usize,
    location: Location,
}

fn check_hoistable(expr: &Expr, site: &HoistSite) -> Result<(), CompileError> {
    let direct = expr.is_call_or_construction();
    if !direct && !expr.contains_call_or_construction() {
        return Ok(());
    }
    Err(CompileError::UnsafeHoist {
        argument: site.argument.to_string(),
        construct: site.construct.to_string(),
        axis: site.axis,
        direct,
        location: site.location,
    })
}

/// The argument that picks the axis value, with its name for diagnostics.
///
/// A param's own value and a plural's display value are never checked.
fn driving_argument(call: &RuntimeCall) -> Option<(&'static str, &Expr)> {
    match call {
        RuntimeCall::Enum { value, .. } => Some(("value", value)),
        RuntimeCall::Plural { count, .. } => Some(("count", count)),
        RuntimeCall::Pronoun { gender, .. } | RuntimeCall::Name { gender, .. } => {
            Some(("gender", gender))
        }
        RuntimeCall::Param {
            variation: ParamVariation::Gender(gender),
            ..
        } => Some(("gender", gender)),
        RuntimeCall::Subject { gender } => Some(("subject", gender)),
        RuntimeCall::Param { .. } | RuntimeCall::Fragment(_) => None,
    }
}

pub(crate) fn subject_call(tree: &PhraseTree<'_>) -> Option<RuntimeCall> {
    let gender = tree.root.options.subject.clone()?;
    Some(RuntimeCall::Subject { gender })
}

/// Runtime call of a node; `None` for text, `sameParam` and fragments.
pub(crate) fn call_for(tree: &PhraseTree<'_>, id: NodeId) -> Option<RuntimeCall> {
    match tree.node(id) {
        PhraseNode::Param(param) => {
            let variation = match (&param.gender, param.number) {
                (Some(gender), _) => ParamVariation::Gender(gender.clone()),
                (None, true) => ParamVariation::Number,
                (None, false) => ParamVariation::None,
            };
            Some(RuntimeCall::Param {
                token: param.name.clone(),
                value: param.value.clone(),
                variation,
            })
        }
        PhraseNode::Name(name) => Some(RuntimeCall::Name {
            token: name.name.clone(),
            value: name.value.clone(),
            gender: name.gender.clone(),
        }),
        PhraseNode::Plural(plural) => Some(RuntimeCall::Plural {
            count: plural.count.clone(),
            token: plural.declares_token().then(|| plural.token()),
            value: plural.value.clone(),
        }),
        PhraseNode::Enum(choice) => Some(RuntimeCall::Enum {
            value: choice.value.clone(),
            keys: choice.keys(),
        }),
        PhraseNode::Pronoun(pronoun) => Some(RuntimeCall::Pronoun {
            usage: pronoun.usage,
            gender: pronoun.gender.clone(),
            human: pronoun.human,
        }),
        PhraseNode::Text(_) | PhraseNode::SameParam(_) | PhraseNode::ImplicitParam(_) => None,
    }
}
