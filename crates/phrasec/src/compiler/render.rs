//! Rendering of phrase nodes to text under a variation signature.

use phrasec_semantics::pronoun_word;

use super::axis::{AxisList, AxisValue};
use super::signature::VariationSignature;
use super::tokens::TokenTable;
use super::tree::{NodeId, PhraseTree};
use crate::nodes::{PhraseNode, PluralNode, PronounNode, ShowCount};
use crate::types::TokenName;

/// How tokens and fragments are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenderMode {
    /// Leaf text: tokens as `{name}`, fragments as `{=...}`.
    Text,
    /// Implicit token names: tokens as `[name]`, fragments flattened.
    TokenName,
    /// Nested-leaf description context: tokens as `{name}`, every fragment
    /// flattened except `target`, which appears as its token.
    Description { target: NodeId },
}

pub(crate) struct Renderer<'t, 'a> {
    tree: &'t PhraseTree<'a>,
    axes: &'t AxisList,
    tokens: &'t TokenTable,
}

impl<'t, 'a> Renderer<'t, 'a> {
    pub fn new(tree: &'t PhraseTree<'a>, axes: &'t AxisList, tokens: &'t TokenTable) -> Self {
        Renderer { tree, axes, tokens }
    }

    pub fn tree(&self) -> &'t PhraseTree<'a> {
        self.tree
    }

    /// Render a sequence of sibling nodes.
    pub fn render(&self, ids: &[NodeId], signature: &VariationSignature, mode: RenderMode) -> String {
        let mut out = String::new();
        for id in ids {
            self.render_node(*id, signature, mode, &mut out);
        }
        out
    }

    /// Synthesized token name of a fragment under `signature`.
    pub fn implicit_token(&self, fragment: NodeId, signature: &VariationSignature) -> TokenName {
        let inner = self.render(self.tree.children(fragment), signature, RenderMode::TokenName);
        TokenName::new(format!("{}{inner}", TokenName::IMPLICIT_MARKER))
    }

    /// Alias of each direct child fragment of `ids`, keyed by its token name.
    pub fn token_aliases(
        &self,
        ids: &[NodeId],
        signature: &VariationSignature,
    ) -> Vec<(TokenName, TokenName)> {
        ids.iter()
            .filter(|id| matches!(self.tree.node(**id), PhraseNode::ImplicitParam(_)))
            .filter_map(|id| {
                let alias = self.tokens.alias(*id)?;
                Some((self.implicit_token(*id, signature), alias.clone()))
            })
            .collect()
    }

    fn render_node(&self, id: NodeId, signature: &VariationSignature, mode: RenderMode, out: &mut String) {
        match self.tree.node(id) {
            PhraseNode::Text(text) => out.push_str(&text.value),
            PhraseNode::Param(param) => out.push_str(&token_pattern(&param.name, mode)),
            PhraseNode::Name(name) => out.push_str(&token_pattern(&name.name, mode)),
            PhraseNode::SameParam(same) => out.push_str(&token_pattern(&same.name, mode)),
            PhraseNode::Enum(choice) => {
                if let Some(AxisValue::Key(key)) = self.axis_value(id, signature) {
                    out.push_str(choice.text_for(key).unwrap_or_default());
                }
            }
            PhraseNode::Plural(plural) => {
                let singular = matches!(self.axis_value(id, signature), Some(AxisValue::ExactlyOne));
                out.push_str(&plural_text(plural, singular, mode));
            }
            PhraseNode::Pronoun(pronoun) => {
                if let Some(AxisValue::Pronoun(gender)) = self.axis_value(id, signature) {
                    out.push_str(&pronoun_text(pronoun, pronoun_word(pronoun.usage, *gender)));
                }
            }
            PhraseNode::ImplicitParam(_) => match mode {
                RenderMode::Text => {
                    out.push_str(&self.implicit_token(id, signature).text_pattern());
                }
                RenderMode::Description { target } if target == id => {
                    out.push_str(&self.implicit_token(id, signature).text_pattern());
                }
                RenderMode::TokenName | RenderMode::Description { .. } => {
                    out.push_str(&self.render(self.tree.children(id), signature, mode));
                }
            },
        }
    }

    fn axis_value<'s>(&self, id: NodeId, signature: &'s VariationSignature) -> Option<&'s AxisValue> {
        signature.value(self.axes.axis_of(id)?)
    }
}

fn token_pattern(name: &TokenName, mode: RenderMode) -> String {
    match mode {
        RenderMode::Text | RenderMode::Description { .. } => name.text_pattern(),
        RenderMode::TokenName => name.nested_pattern(),
    }
}

fn plural_text(plural: &PluralNode, singular: bool, mode: RenderMode) -> String {
    if singular {
        return match plural.show_count {
            ShowCount::Yes => format!("1 {}", plural.singular),
            ShowCount::No | ShowCount::IfMany => plural.singular.clone(),
        };
    }
    match plural.show_count {
        ShowCount::Yes | ShowCount::IfMany => {
            format!("{} {}", token_pattern(&plural.token(), mode), plural.many_text())
        }
        ShowCount::No => plural.many_text(),
    }
}

fn pronoun_text(pronoun: &PronounNode, word: &str) -> String {
    if !pronoun.capitalize {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
