//! Variation axes and their collection.
//!
//! Every construct whose wording depends on a runtime value contributes one
//! axis. Axes are ordered by first appearance in a pre-order walk, with the
//! phrase-level subject first. Two enums over the same ordered key list
//! are one axis; gender and number axes are never merged.

use std::borrow::Cow;

use phrasec_semantics::{
    EXACTLY_ONE, NumberVariation, PronounGender, SUBJECT_TOKEN, VariationType, WILDCARD,
    pronoun_candidates,
};
use serde::Serialize;
use tracing::trace;

use super::error::CompileError;
use super::plural::PluralRuleProvider;
use super::tree::{NodeId, PhraseTree};
use crate::nodes::PhraseNode;
use crate::types::TokenName;

/// What a variation axis varies over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKind {
    Gender,
    Number,
    EnumChoice,
}

/// One candidate value of an axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AxisValue {
    /// `*`: any gender, or the non-singular plural bucket.
    Any,
    /// `_1`: the singular plural bucket.
    ExactlyOne,
    /// An explicit plural-rule bucket.
    Bucket(NumberVariation),
    /// A pronoun gender bucket.
    Pronoun(PronounGender),
    /// An enum key.
    Key(String),
}

impl AxisValue {
    /// Key of this value in the nested text table.
    pub fn map_key(&self) -> Cow<'_, str> {
        match self {
            AxisValue::Any => Cow::Borrowed(WILDCARD),
            AxisValue::ExactlyOne => Cow::Borrowed(EXACTLY_ONE),
            AxisValue::Bucket(variation) => Cow::Owned(variation.code().to_string()),
            AxisValue::Pronoun(gender) => Cow::Borrowed(gender.key()),
            AxisValue::Key(key) => Cow::Borrowed(key),
        }
    }
}

/// Who an axis belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisIdentity {
    /// The phrase-level `subject` option.
    Subject,
    /// A gender or number construct, by node.
    Node(NodeId),
    /// Enums sharing this ordered key list.
    EnumKeys(Vec<String>),
}

/// Runtime-argument descriptor written into a payload's `m` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeArg {
    pub token: TokenName,
    #[serde(rename = "type", serialize_with = "serialize_variation")]
    pub variation: VariationType,
    #[serde(skip_serializing_if = "is_false")]
    pub singular: bool,
}

impl RuntimeArg {
    pub fn new(token: TokenName, variation: VariationType) -> RuntimeArg {
        RuntimeArg {
            token,
            variation,
            singular: false,
        }
    }
}

fn serialize_variation<S: serde::Serializer>(
    variation: &VariationType,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(variation.code())
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One dimension along which a phrase varies.
#[derive(Debug, Clone, PartialEq)]
pub struct VariationAxis {
    pub kind: AxisKind,
    pub identity: AxisIdentity,
    /// Candidate values, in enumeration order.
    pub candidates: Vec<AxisValue>,
    /// `m` entry of this axis, `None` for a null entry.
    pub runtime: Option<RuntimeArg>,
    /// Nodes driving this axis, first occurrence first. Empty for the
    /// subject axis.
    pub contributors: Vec<NodeId>,
}

/// The ordered axes of one phrase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisList {
    axes: Vec<VariationAxis>,
}

impl AxisList {
    pub fn as_slice(&self) -> &[VariationAxis] {
        &self.axes
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VariationAxis> {
        self.axes.get(index)
    }

    /// Index of the axis a node drives.
    pub fn axis_of(&self, node: NodeId) -> Option<usize> {
        self.axes
            .iter()
            .position(|axis| axis.contributors.contains(&node))
    }

    /// Whether `node` is the first contributor of its axis.
    pub fn is_first_contributor(&self, node: NodeId) -> bool {
        self.axes
            .iter()
            .any(|axis| axis.contributors.first() == Some(&node))
    }

    /// The payload `m` list: one entry per axis, in axis order.
    pub fn runtime_args(&self) -> Vec<Option<RuntimeArg>> {
        self.axes.iter().map(|axis| axis.runtime.clone()).collect()
    }

    fn add(&mut self, axis: VariationAxis) {
        if let Some(existing) = self
            .axes
            .iter_mut()
            .find(|existing| existing.kind == axis.kind && existing.identity == axis.identity)
        {
            existing.contributors.extend(axis.contributors);
            return;
        }
        self.axes.push(axis);
    }
}

/// Collect the axes of a phrase in first-appearance order.
pub(crate) fn collect_axes(
    tree: &PhraseTree<'_>,
    plural_rules: Option<&(dyn PluralRuleProvider + Send + Sync)>,
) -> AxisList {
    let mut axes = AxisList::default();
    if tree.root.options.subject.is_some() {
        axes.add(VariationAxis {
            kind: AxisKind::Gender,
            identity: AxisIdentity::Subject,
            candidates: vec![AxisValue::Any],
            runtime: Some(RuntimeArg::new(
                TokenName::new(SUBJECT_TOKEN),
                VariationType::Gender,
            )),
            contributors: Vec::new(),
        });
    }
    for (id, node) in tree.iter() {
        if let Some(axis) = axis_for(id, node, plural_rules) {
            trace!(node = node.kind_name(), kind = ?axis.kind, "variation axis");
            axes.add(axis);
        }
    }
    axes
}

/// Reject merged enums that select their key from different values.
///
/// A merged axis reads its key once, from its first enum, so every other
/// enum on it must name the same value.
pub(crate) fn check_merged_enums(
    tree: &PhraseTree<'_>,
    axes: &AxisList,
) -> Result<(), CompileError> {
    let enums = axes
        .as_slice()
        .iter()
        .filter(|axis| axis.kind == AxisKind::EnumChoice);
    for axis in enums {
        let mut values = axis.contributors.iter().filter_map(|id| match tree.node(*id) {
            PhraseNode::Enum(choice) => Some((*id, &choice.value)),
            _ => None,
        });
        let Some((_, first)) = values.next() else {
            continue;
        };
        if let Some((id, other)) = values.find(|(_, value)| *value != first) {
            return Err(CompileError::malformed(
                format!(
                    "fbt.enum() calls with the same range must share a value, \
                     but got `{first}` and `{other}`"
                ),
                tree.node(id).location(),
            ));
        }
    }
    Ok(())
}

fn axis_for(
    id: NodeId,
    node: &PhraseNode,
    plural_rules: Option<&(dyn PluralRuleProvider + Send + Sync)>,
) -> Option<VariationAxis> {
    let gender_axis = |runtime: Option<RuntimeArg>, candidates: Vec<AxisValue>| VariationAxis {
        kind: AxisKind::Gender,
        identity: AxisIdentity::Node(id),
        candidates,
        runtime,
        contributors: vec![id],
    };
    match node {
        PhraseNode::Param(param) if param.number => Some(VariationAxis {
            kind: AxisKind::Number,
            identity: AxisIdentity::Node(id),
            candidates: vec![AxisValue::Any],
            runtime: Some(RuntimeArg::new(param.name.clone(), VariationType::Number)),
            contributors: vec![id],
        }),
        PhraseNode::Param(param) if param.gender.is_some() => Some(gender_axis(
            Some(RuntimeArg::new(param.name.clone(), VariationType::Gender)),
            vec![AxisValue::Any],
        )),
        PhraseNode::Name(name) => Some(gender_axis(
            Some(RuntimeArg::new(name.name.clone(), VariationType::Gender)),
            vec![AxisValue::Any],
        )),
        PhraseNode::Pronoun(pronoun) => Some(gender_axis(
            None,
            pronoun_candidates(pronoun.usage, pronoun.human)
                .into_iter()
                .map(AxisValue::Pronoun)
                .collect(),
        )),
        PhraseNode::Plural(plural) => {
            let mut candidates: Vec<AxisValue> = match plural_rules {
                Some(rules) => rules
                    .covered_variations()
                    .into_iter()
                    .map(AxisValue::Bucket)
                    .collect(),
                None => vec![AxisValue::Any],
            };
            candidates.push(AxisValue::ExactlyOne);
            let runtime = plural.declares_token().then(|| RuntimeArg {
                token: plural.token(),
                variation: VariationType::Number,
                singular: true,
            });
            Some(VariationAxis {
                kind: AxisKind::Number,
                identity: AxisIdentity::Node(id),
                candidates,
                runtime,
                contributors: vec![id],
            })
        }
        PhraseNode::Enum(choice) => Some(VariationAxis {
            kind: AxisKind::EnumChoice,
            identity: AxisIdentity::EnumKeys(choice.keys()),
            candidates: choice.range.iter().map(|entry| AxisValue::Key(entry.key.clone())).collect(),
            runtime: None,
            contributors: vec![id],
        }),
        PhraseNode::Param(_)
        | PhraseNode::Text(_)
        | PhraseNode::SameParam(_)
        | PhraseNode::ImplicitParam(_) => None,
    }
}
