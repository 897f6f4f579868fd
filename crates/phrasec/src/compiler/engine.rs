//! The phrase compiler.
//!
//! Compiling a phrase runs these steps against a per-phrase context:
//!
//! 1. Flatten the phrase into a pre-order tree
//! 2. Collect variation axes
//! 3. Resolve tokens and fragment aliases
//! 4. Plan hoisted temporaries (phrases with fragments only)
//! 5. Enumerate signatures, checking token uniqueness for each
//! 6. Render the payload of the phrase and of every fragment

use std::sync::Arc;

use bon::Builder;
use tracing::{debug, debug_span};

use super::axis::{AxisList, check_merged_enums, collect_axes};
use super::error::CompileError;
use super::hoist::{call_for, plan, subject_call};
use super::payload::{JsFbt, Leaf, Payload, TextTable};
use super::plural::PluralRuleProvider;
use super::render::{RenderMode, Renderer};
use super::runtime::{FragmentPhrase, HoistedArgument, RuntimeArgument, RuntimeCall};
use super::signature::{VariationSignature, enumerate_signatures};
use super::tokens::TokenTable;
use super::tree::{NodeId, PhraseTree};
use crate::docblock::FileOptions;
use crate::nodes::{Construct, PhraseNode};
use crate::types::{Location, TokenName};

/// Compiler configuration shared by every phrase of a run.
#[derive(Clone, Default, Builder)]
pub struct CompilerConfig {
    /// Replaces the default `*`/`_1` plural buckets with CLDR buckets.
    pub plural_rules: Option<Arc<dyn PluralRuleProvider + Send + Sync>>,
    /// Options from the file's `@fbt` docblock.
    #[builder(default)]
    pub file_options: FileOptions,
}

/// The output of compiling one phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPhrase {
    pub payload: Payload,
    /// Arguments of the runtime call, in call order.
    pub arguments: Vec<RuntimeArgument>,
    /// Temporaries evaluated before the phrase; referenced by
    /// [`RuntimeArgument::Temporary`].
    pub hoisted: Vec<HoistedArgument>,
    pub do_not_extract: bool,
    pub author: Option<String>,
    pub location: Location,
}

impl CompiledPhrase {
    /// Fragment sub-phrases, in pre-order.
    pub fn fragments(&self) -> Vec<&FragmentPhrase> {
        let mut fragments = Vec::new();
        collect_fragments(&self.arguments, &mut fragments);
        fragments
    }
}

fn collect_fragments<'a>(arguments: &'a [RuntimeArgument], out: &mut Vec<&'a FragmentPhrase>) {
    for argument in arguments {
        if let RuntimeArgument::Call(RuntimeCall::Fragment(fragment)) = argument {
            out.push(fragment);
            collect_fragments(&fragment.arguments, out);
        }
    }
}

/// Compiles phrases into payloads.
#[derive(Clone, Default)]
pub struct PhraseCompiler {
    config: CompilerConfig,
}

/// State shared by every step of one phrase's compilation.
struct PhraseContext<'t, 'a> {
    tree: &'t PhraseTree<'a>,
    axes: &'t AxisList,
    renderer: Renderer<'t, 'a>,
    tokens: &'t TokenTable,
    signatures: Vec<VariationSignature>,
    hoisted: &'t [HoistedArgument],
    project: String,
}

impl PhraseCompiler {
    pub fn new(config: CompilerConfig) -> PhraseCompiler {
        PhraseCompiler { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile one phrase.
    ///
    /// Either the whole phrase compiles or an error names the offending
    /// construct; nothing partial is returned.
    pub fn compile(&self, construct: &Construct) -> Result<CompiledPhrase, CompileError> {
        let _span = debug_span!("compile_phrase", description = %construct.description).entered();

        let tree = PhraseTree::build(construct);
        let axes = collect_axes(&tree, self.config.plural_rules.as_deref());
        check_merged_enums(&tree, &axes)?;
        let tokens = TokenTable::build(&tree)?;
        let hoisted = plan(&tree, &axes)?;
        let renderer = Renderer::new(&tree, &axes, &tokens);
        let signatures = enumerate_signatures(&axes);
        for signature in &signatures {
            tokens.check_signature(&renderer, signature)?;
        }
        debug!(
            axes = axes.len(),
            signatures = signatures.len(),
            fragments = tree.fragments().count(),
            "enumerated phrase variations"
        );

        let project = construct
            .options
            .project
            .clone()
            .or_else(|| self.config.file_options.project.clone())
            .unwrap_or_default();
        let context = PhraseContext {
            tree: &tree,
            axes: &axes,
            renderer,
            tokens: &tokens,
            signatures,
            hoisted: &hoisted,
            project,
        };

        let payload = context.payload(&tree.top, |_| construct.description.clone());
        let arguments = context.arguments(&tree.top, true);
        Ok(CompiledPhrase {
            payload,
            arguments,
            hoisted,
            do_not_extract: construct.options.do_not_extract,
            author: construct
                .options
                .author
                .clone()
                .or_else(|| self.config.file_options.author.clone()),
            location: construct.location,
        })
    }
}

/// Compile one phrase with the default configuration.
pub fn compile(construct: &Construct) -> Result<CompiledPhrase, CompileError> {
    PhraseCompiler::default().compile(construct)
}

impl PhraseContext<'_, '_> {
    /// Render the payload of one level: the root's children or a fragment's.
    fn payload(&self, level: &[NodeId], describe: impl Fn(&VariationSignature) -> String) -> Payload {
        let mut table = TextTable::Branch(Vec::new());
        for signature in &self.signatures {
            let leaf = Leaf {
                desc: describe(signature),
                text: self.renderer.render(level, signature, RenderMode::Text),
                token_aliases: self.renderer.token_aliases(level, signature),
            };
            table.insert(&signature.path(), leaf);
        }
        Payload {
            jsfbt: JsFbt {
                t: table,
                m: self.axes.runtime_args(),
            },
            project: self.project.clone(),
        }
    }

    /// Runtime arguments of one level.
    ///
    /// With fragments every level starts with the hoisted temporaries and
    /// adds its plain params and fragments in document order. Without
    /// fragments the root evaluates every call inline, in document order.
    fn arguments(&self, level: &[NodeId], root: bool) -> Vec<RuntimeArgument> {
        let mut arguments = Vec::new();
        if self.tree.has_fragments() {
            arguments.extend((0..self.hoisted.len()).map(RuntimeArgument::Temporary));
            for id in level {
                match self.tree.node(*id) {
                    PhraseNode::ImplicitParam(_) => {
                        arguments.push(RuntimeArgument::Call(RuntimeCall::Fragment(Box::new(
                            self.fragment(*id),
                        ))));
                    }
                    PhraseNode::Param(_) if self.axes.axis_of(*id).is_none() => {
                        arguments.extend(call_for(self.tree, *id).map(RuntimeArgument::Call));
                    }
                    _ => {}
                }
            }
            return arguments;
        }
        if root {
            arguments.extend(subject_call(self.tree).map(RuntimeArgument::Call));
        }
        for id in level {
            let inline = match self.axes.axis_of(*id) {
                Some(_) => self.axes.is_first_contributor(*id),
                None => matches!(self.tree.node(*id), PhraseNode::Param(_)),
            };
            if inline {
                arguments.extend(call_for(self.tree, *id).map(RuntimeArgument::Call));
            }
        }
        arguments
    }

    /// Compile a fragment into its own payload over the phrase's axes.
    fn fragment(&self, id: NodeId) -> FragmentPhrase {
        let level = self.tree.children(id);
        let payload = self.payload(level, |signature| {
            format!(
                "In the phrase: \"{}\"",
                self.renderer
                    .render(&self.tree.top, signature, RenderMode::Description { target: id })
            )
        });
        FragmentPhrase {
            alias: self
                .tokens
                .alias(id)
                .cloned()
                .unwrap_or_else(|| TokenName::new(TokenName::IMPLICIT_MARKER.to_string())),
            payload,
            arguments: self.arguments(level, false),
        }
    }
}
