//! The translation payload written for each phrase.
//!
//! Maps serialize in insertion order, which follows signature enumeration
//! order, so the same phrase always produces byte-identical JSON.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::axis::RuntimeArg;
use super::error::CompileError;
use crate::types::TokenName;

/// Delimiter wrapped around the JSON payload in the emitted string.
pub const SENTINEL: &str = "__FBT__";

/// A fully rendered variant of a phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub desc: String,
    pub text: String,
    #[serde(rename = "tokenAliases", serialize_with = "serialize_aliases")]
    pub token_aliases: Vec<(TokenName, TokenName)>,
}

fn serialize_aliases<S: Serializer>(
    aliases: &[(TokenName, TokenName)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(aliases.len()))?;
    for (token, alias) in aliases {
        map.serialize_entry(token, alias)?;
    }
    map.end()
}

/// Nested map from axis keys to leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTable {
    Leaf(Leaf),
    Branch(Vec<(String, TextTable)>),
}

impl TextTable {
    /// Insert `leaf` at `path`, creating branches along the way.
    ///
    /// An empty path makes the table itself the leaf.
    pub fn insert(&mut self, path: &[String], leaf: Leaf) {
        let Some((key, rest)) = path.split_first() else {
            *self = TextTable::Leaf(leaf);
            return;
        };
        if let TextTable::Leaf(_) = self {
            *self = TextTable::Branch(Vec::new());
        }
        let TextTable::Branch(entries) = self else {
            return;
        };
        let index = match entries.iter().position(|(existing, _)| existing == key) {
            Some(index) => index,
            None => {
                entries.push((key.clone(), TextTable::Branch(Vec::new())));
                entries.len() - 1
            }
        };
        entries[index].1.insert(rest, leaf);
    }

    /// Leaf at `path`, if there is one.
    pub fn get(&self, path: &[&str]) -> Option<&Leaf> {
        match (self, path.split_first()) {
            (TextTable::Leaf(leaf), None) => Some(leaf),
            (TextTable::Branch(entries), Some((key, rest))) => entries
                .iter()
                .find(|(existing, _)| existing == *key)
                .and_then(|(_, child)| child.get(rest)),
            (TextTable::Leaf(_), Some(_)) | (TextTable::Branch(_), None) => None,
        }
    }

    /// All leaves in insertion order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        match self {
            TextTable::Leaf(leaf) => out.push(leaf),
            TextTable::Branch(entries) => {
                for (_, child) in entries {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl Serialize for TextTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TextTable::Leaf(leaf) => leaf.serialize(serializer),
            TextTable::Branch(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, child) in entries {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsFbt {
    pub t: TextTable,
    pub m: Vec<Option<RuntimeArg>>,
}

/// The structured translation payload of one phrase or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub jsfbt: JsFbt,
    pub project: String,
}

impl Payload {
    pub fn to_json(&self) -> Result<String, CompileError> {
        serde_json::to_string(self).map_err(|source| CompileError::Serialize { source })
    }

    /// The payload wrapped in sentinels, as embedded in emitted code.
    pub fn to_sentinel_string(&self) -> Result<String, CompileError> {
        Ok(format!("{SENTINEL}{}{SENTINEL}", self.to_json()?))
    }
}
