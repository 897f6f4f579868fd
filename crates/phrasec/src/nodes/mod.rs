//! The phrase node model.
//!
//! A phrase is a [`Construct`] owning an ordered list of [`PhraseNode`]s.
//! Nodes are plain data: the compiler decides which variation axes they
//! contribute and how they render. Typed nodes can be built directly with
//! their builders, or from raw call-site arguments through the `from_call`
//! constructors, which enforce each construct's argument shape.

mod callsite;
mod options;

use bon::Builder;
use phrasec_semantics::{DEFAULT_PLURAL_TOKEN, PronounUsage};

pub use options::{OptionBag, ShowCount};

use crate::types::{Expr, Location, TokenName};

/// One node of a phrase tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PhraseNode {
    Text(TextNode),
    Param(ParamNode),
    Enum(EnumNode),
    Plural(PluralNode),
    Name(NameNode),
    Pronoun(PronounNode),
    SameParam(SameParamNode),
    ImplicitParam(ImplicitParamNode),
}

impl PhraseNode {
    /// Shorthand for a literal text node without location.
    pub fn text(value: impl Into<String>) -> PhraseNode {
        PhraseNode::Text(TextNode::builder().value(value).build())
    }

    pub fn location(&self) -> Location {
        match self {
            PhraseNode::Text(node) => node.location,
            PhraseNode::Param(node) => node.location,
            PhraseNode::Enum(node) => node.location,
            PhraseNode::Plural(node) => node.location,
            PhraseNode::Name(node) => node.location,
            PhraseNode::Pronoun(node) => node.location,
            PhraseNode::SameParam(node) => node.location,
            PhraseNode::ImplicitParam(node) => node.location,
        }
    }

    /// Construct name used in logs and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PhraseNode::Text(_) => "text",
            PhraseNode::Param(_) => "param",
            PhraseNode::Enum(_) => "enum",
            PhraseNode::Plural(_) => "plural",
            PhraseNode::Name(_) => "name",
            PhraseNode::Pronoun(_) => "pronoun",
            PhraseNode::SameParam(_) => "sameParam",
            PhraseNode::ImplicitParam(_) => "implicitParam",
        }
    }
}

macro_rules! impl_from_node {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for PhraseNode {
                fn from(node: $ty) -> Self {
                    PhraseNode::$variant(node)
                }
            }
        )+
    };
}

impl_from_node! {
    Text => TextNode,
    Param => ParamNode,
    Enum => EnumNode,
    Plural => PluralNode,
    Name => NameNode,
    Pronoun => PronounNode,
    SameParam => SameParamNode,
    ImplicitParam => ImplicitParamNode,
}

/// A literal text fragment.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(on(String, into))]
pub struct TextNode {
    pub value: String,
    #[builder(default)]
    pub location: Location,
}

/// An explicitly named placeholder wrapping a runtime value.
///
/// With `number` set the value also feeds number formatting; with `gender`
/// set the placeholder carries a gender for translations that agree with it.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ParamNode {
    #[builder(into)]
    pub name: TokenName,
    pub value: Expr,
    #[builder(default)]
    pub number: bool,
    pub gender: Option<Expr>,
    #[builder(default)]
    pub location: Location,
}

/// One `key => replacement text` entry of an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    pub key: String,
    pub text: String,
}

impl EnumEntry {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// A runtime value choosing one of a fixed, ordered set of replacements.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct EnumNode {
    pub value: Expr,
    pub range: Vec<EnumEntry>,
    #[builder(default)]
    pub location: Location,
}

impl EnumNode {
    /// Ordered keys of this enum. Enums with equal key lists are one axis.
    pub fn keys(&self) -> Vec<String> {
        self.range.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Replacement text for `key`.
    pub fn text_for(&self, key: &str) -> Option<&str> {
        self.range
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.text.as_str())
    }
}

/// A count choosing between singular and plural wording.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct PluralNode {
    #[builder(into)]
    pub singular: String,
    pub count: Expr,
    /// Plural wording; defaults to the singular with an `s` appended.
    #[builder(into)]
    pub many: Option<String>,
    #[builder(default)]
    pub show_count: ShowCount,
    #[builder(into)]
    pub name: Option<TokenName>,
    /// Value displayed in place of the count.
    pub value: Option<Expr>,
    #[builder(default)]
    pub location: Location,
}

impl PluralNode {
    /// Token name of the displayed count.
    pub fn token(&self) -> TokenName {
        self.name
            .clone()
            .unwrap_or_else(|| TokenName::new(DEFAULT_PLURAL_TOKEN))
    }

    /// Whether this plural puts a count token in its text.
    pub fn declares_token(&self) -> bool {
        self.show_count != ShowCount::No
    }

    pub fn many_text(&self) -> String {
        match &self.many {
            Some(many) => many.clone(),
            None => format!("{}s", self.singular),
        }
    }
}

/// A person's name, with their gender.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct NameNode {
    #[builder(into)]
    pub name: TokenName,
    pub value: Expr,
    pub gender: Expr,
    #[builder(default)]
    pub location: Location,
}

/// A pronoun whose word is picked by a runtime gender.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct PronounNode {
    pub usage: PronounUsage,
    pub gender: Expr,
    /// The referent is known to be a person: no "this"/"itself" form.
    #[builder(default)]
    pub human: bool,
    #[builder(default)]
    pub capitalize: bool,
    #[builder(default)]
    pub location: Location,
}

/// A second occurrence of a token declared earlier in the phrase.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SameParamNode {
    #[builder(into)]
    pub name: TokenName,
    #[builder(default)]
    pub location: Location,
}

/// An embedded fragment (e.g. a markup element) wrapping its own children.
///
/// The fragment is compiled as a sub-phrase over the enclosing phrase's
/// axes and appears in the enclosing text as a synthesized token.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ImplicitParamNode {
    pub children: Vec<PhraseNode>,
    #[builder(default)]
    pub location: Location,
}

/// Phrase-level options.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct PhraseOptions {
    /// Overrides the file-level project when set.
    #[builder(into)]
    pub project: Option<String>,
    #[builder(into)]
    pub author: Option<String>,
    /// Compile the phrase but leave it out of extraction output.
    #[builder(default)]
    pub do_not_extract: bool,
    /// Gender of the phrase's subject, varying the whole phrase.
    pub subject: Option<Expr>,
}

/// The root of a phrase.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(on(String, into))]
pub struct Construct {
    pub description: String,
    #[builder(default)]
    pub options: PhraseOptions,
    pub children: Vec<PhraseNode>,
    #[builder(default)]
    pub location: Location,
}
