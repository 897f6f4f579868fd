//! Token bookkeeping: explicit token names, `sameParam` references, and the
//! aliases of implicit fragment tokens.

use std::collections::{HashMap, HashSet};
use std::iter;

use super::error::CompileError;
use super::render::Renderer;
use super::signature::VariationSignature;
use super::tree::{NodeId, PhraseTree};
use crate::nodes::PhraseNode;
use crate::types::TokenName;

#[derive(Debug, Default)]
pub(crate) struct TokenTable {
    /// Explicitly declared tokens in pre-order, with their declaring node.
    declared: Vec<(TokenName, NodeId)>,
    /// Fragment node to its alias (`=m0`, `=m1`, ...).
    aliases: HashMap<NodeId, TokenName>,
}

/// Token declared by a node, ignoring fragments.
fn explicit_token(node: &PhraseNode) -> Option<TokenName> {
    match node {
        PhraseNode::Param(param) => Some(param.name.clone()),
        PhraseNode::Name(name) => Some(name.name.clone()),
        PhraseNode::Plural(plural) if plural.declares_token() => Some(plural.token()),
        PhraseNode::Plural(_)
        | PhraseNode::Text(_)
        | PhraseNode::Enum(_)
        | PhraseNode::Pronoun(_)
        | PhraseNode::SameParam(_)
        | PhraseNode::ImplicitParam(_) => None,
    }
}

impl TokenTable {
    /// Resolve explicit tokens and fragment aliases of a phrase.
    ///
    /// Fragment aliases are numbered in pre-order across the whole phrase.
    pub fn build(tree: &PhraseTree<'_>) -> Result<TokenTable, CompileError> {
        let mut table = TokenTable::default();
        for (id, node) in tree.iter() {
            if let PhraseNode::SameParam(same) = node {
                if !table.declared.iter().any(|(name, _)| *name == same.name) {
                    return Err(CompileError::UnknownSameParam {
                        name: same.name.clone(),
                        location: same.location,
                    });
                }
            }
            if let Some(token) = explicit_token(node) {
                if table.declared.iter().any(|(name, _)| *name == token) {
                    return Err(CompileError::TokenCollision {
                        name: token,
                        location: node.location(),
                    });
                }
                table.declared.push((token, id));
            }
        }
        for (index, fragment) in tree.fragments().enumerate() {
            table.aliases.insert(
                fragment,
                TokenName::new(format!("{}m{index}", TokenName::IMPLICIT_MARKER)),
            );
        }
        Ok(table)
    }

    pub fn alias(&self, fragment: NodeId) -> Option<&TokenName> {
        self.aliases.get(&fragment)
    }

    /// Check that no two tokens collide in the rendering for `signature`.
    ///
    /// Implicit fragment names depend on the signature, so this runs once
    /// per signature on top of the explicit check done in [`TokenTable::build`].
    /// Fragment tokens only share a namespace with their siblings: a fragment
    /// wrapping a single fragment renders the same name one level down, where
    /// it is addressed through its own alias.
    pub fn check_signature(
        &self,
        renderer: &Renderer<'_, '_>,
        signature: &VariationSignature,
    ) -> Result<(), CompileError> {
        let tree = renderer.tree();
        let levels = iter::once(tree.top.as_slice())
            .chain(tree.fragments().map(|fragment| tree.children(fragment)));
        for level in levels {
            let mut seen: HashSet<TokenName> =
                self.declared.iter().map(|(name, _)| name.clone()).collect();
            let fragments = level
                .iter()
                .filter(|id| matches!(tree.node(**id), PhraseNode::ImplicitParam(_)));
            for fragment in fragments {
                let token = renderer.implicit_token(*fragment, signature);
                if !seen.insert(token.clone()) {
                    return Err(CompileError::TokenCollision {
                        name: token,
                        location: tree.node(*fragment).location(),
                    });
                }
            }
        }
        Ok(())
    }
}
