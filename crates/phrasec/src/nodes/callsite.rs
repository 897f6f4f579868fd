//! Constructors that build typed nodes from raw call-site arguments.
//!
//! Front ends that see `fbt.param(name, value, options)` style calls hand
//! the argument expressions over unchanged; these constructors enforce the
//! argument shape of each construct.

use phrasec_semantics::{PRONOUN_USAGE_NAMES, PronounUsage};

use super::{
    Construct, EnumEntry, EnumNode, NameNode, OptionBag, ParamNode, PhraseNode, PhraseOptions,
    PluralNode, PronounNode, SameParamNode,
};
use crate::compiler::CompileError;
use crate::types::{BinaryOp, Expr, Location};

const PARAM_OPTIONS: &[&str] = &["gender", "number"];
const PLURAL_OPTIONS: &[&str] = &["value", "showCount", "name", "many", "count"];
const PRONOUN_OPTIONS: &[&str] = &["human", "capitalize"];
const ROOT_OPTIONS: &[&str] = &["author", "project", "doNotExtract", "subject"];

fn check_arity(
    construct: &str,
    args: &[Expr],
    min: usize,
    max: usize,
    location: Location,
) -> Result<(), CompileError> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = if min == max {
        format!("{min}")
    } else {
        format!("{min} to {max}")
    };
    Err(CompileError::malformed(
        format!(
            "Expected {construct}() to have {expected} arguments, but got {}",
            args.len()
        ),
        location,
    ))
}

/// Fold a string literal, or a `+` concatenation of string literals.
fn static_string(expr: &Expr) -> Option<String> {
    match expr {
        Expr::String(value) => Some(value.clone()),
        Expr::Binary {
            op: BinaryOp::Add,
            left,
            right,
        } => Some(static_string(left)? + &static_string(right)?),
        _ => None,
    }
}

fn expect_static_string(
    construct: &str,
    what: &str,
    expr: &Expr,
    location: Location,
) -> Result<String, CompileError> {
    static_string(expr).ok_or_else(|| {
        CompileError::malformed(
            format!(
                "Expected {what} of {construct}() to be a string literal, but got `{}`",
                expr.kind_name()
            ),
            location,
        )
    })
}

impl ParamNode {
    /// Build from `fbt.param(name, value, options?)`.
    pub fn from_call(args: &[Expr], location: Location) -> Result<ParamNode, CompileError> {
        check_arity("fbt.param", args, 2, 3, location)?;
        let name = expect_static_string("fbt.param", "the name", &args[0], location)?;
        let options = OptionBag::parse(args.get(2), PARAM_OPTIONS, location)?;
        let gender = options.get("gender").cloned();
        let number = options.flag("number")?;
        if number && gender.is_some() {
            return Err(CompileError::malformed(
                format!("fbt.param \"{name}\" cannot vary by both gender and number"),
                location,
            ));
        }
        Ok(ParamNode::builder()
            .name(name)
            .value(args[1].clone())
            .number(number)
            .maybe_gender(gender)
            .location(location)
            .build())
    }
}

impl NameNode {
    /// Build from `fbt.name(name, value, gender)`.
    pub fn from_call(args: &[Expr], location: Location) -> Result<NameNode, CompileError> {
        check_arity("fbt.name", args, 3, 3, location)?;
        let name = expect_static_string("fbt.name", "the name", &args[0], location)?;
        Ok(NameNode::builder()
            .name(name)
            .value(args[1].clone())
            .gender(args[2].clone())
            .location(location)
            .build())
    }
}

impl EnumNode {
    /// Build from `fbt.enum(value, range)`.
    ///
    /// The range is either an array of strings (each string is its own key)
    /// or an object literal mapping keys to replacement strings.
    pub fn from_call(args: &[Expr], location: Location) -> Result<EnumNode, CompileError> {
        check_arity("fbt.enum", args, 2, 2, location)?;
        let range = match &args[1] {
            Expr::Array(items) => items
                .iter()
                .map(|item| {
                    expect_static_string("fbt.enum", "each range value", item, location)
                        .map(|text| EnumEntry::new(text.clone(), text))
                })
                .collect::<Result<Vec<_>, _>>()?,
            Expr::Object(properties) => properties
                .iter()
                .map(|property| {
                    let key = property.key.static_name().ok_or_else(|| {
                        CompileError::malformed(
                            "fbt.enum range keys must be known at compile time",
                            location,
                        )
                    })?;
                    let text = expect_static_string(
                        "fbt.enum",
                        "each range value",
                        &property.value,
                        location,
                    )?;
                    Ok(EnumEntry::new(key, text))
                })
                .collect::<Result<Vec<_>, CompileError>>()?,
            other => {
                return Err(CompileError::malformed(
                    format!(
                        "Expected the range of fbt.enum() to be an array or object literal, \
                         but got `{}`",
                        other.kind_name()
                    ),
                    location,
                ));
            }
        };
        if range.is_empty() {
            return Err(CompileError::malformed(
                "fbt.enum() needs at least one range value",
                location,
            ));
        }
        for (index, entry) in range.iter().enumerate() {
            if range[..index].iter().any(|earlier| earlier.key == entry.key) {
                return Err(CompileError::malformed(
                    format!("fbt.enum() range has a duplicate key \"{}\"", entry.key),
                    location,
                ));
            }
        }
        Ok(EnumNode::builder()
            .value(args[0].clone())
            .range(range)
            .location(location)
            .build())
    }
}

impl PluralNode {
    /// Build from `fbt.plural(singular, count, options?)`.
    ///
    /// The count may instead be given as the `count` option, in which case
    /// the options object directly follows the singular form.
    pub fn from_call(args: &[Expr], location: Location) -> Result<PluralNode, CompileError> {
        check_arity("fbt.plural", args, 2, 3, location)?;
        let singular = expect_static_string("fbt.plural", "the singular form", &args[0], location)?;
        let (count_arg, options_arg) = match args {
            [_, options @ Expr::Object(_)] => (None, Some(options)),
            [_, count, rest @ ..] => (Some(count), rest.first()),
            _ => (None, None),
        };
        let options = OptionBag::parse(options_arg, PLURAL_OPTIONS, location)?;
        let count = match (count_arg, options.get("count")) {
            (Some(count), None) | (None, Some(count)) => count.clone(),
            (Some(_), Some(_)) => {
                return Err(CompileError::malformed(
                    "fbt.plural() count was given both as an argument and as an option",
                    location,
                ));
            }
            (None, None) => {
                return Err(CompileError::malformed(
                    "fbt.plural() needs a count",
                    location,
                ));
            }
        };
        let many = match options.get("many") {
            Some(many) => Some(expect_static_string(
                "fbt.plural",
                "the `many` option",
                many,
                location,
            )?),
            None => None,
        };
        Ok(PluralNode::builder()
            .singular(singular)
            .count(count)
            .maybe_many(many)
            .show_count(options.show_count("showCount")?)
            .maybe_name(options.string("name")?)
            .maybe_value(options.get("value").cloned())
            .location(location)
            .build())
    }
}

impl PronounNode {
    /// Build from `fbt.pronoun(usage, gender, options?)`.
    pub fn from_call(args: &[Expr], location: Location) -> Result<PronounNode, CompileError> {
        check_arity("fbt.pronoun", args, 2, 3, location)?;
        let Some(usage_name) = args[0].as_string_literal() else {
            return Err(CompileError::malformed(
                format!(
                    "`usage`, the first argument of fbt.pronoun() must be a `StringLiteral` but \
                     we got `{}`",
                    args[0].kind_name()
                ),
                location,
            ));
        };
        let Some(usage) = PronounUsage::from_name(usage_name) else {
            return Err(CompileError::malformed(
                format!(
                    "`usage`, the first argument of fbt.pronoun() - Expected value to be one of \
                     [{}] but we got '{usage_name}' (string) instead",
                    PRONOUN_USAGE_NAMES.join(", ")
                ),
                location,
            ));
        };
        let options = OptionBag::parse(args.get(2), PRONOUN_OPTIONS, location)?;
        Ok(PronounNode::builder()
            .usage(usage)
            .gender(args[1].clone())
            .human(options.flag("human")?)
            .capitalize(options.flag("capitalize")?)
            .location(location)
            .build())
    }
}

impl SameParamNode {
    /// Build from `fbt.sameParam(name)`.
    pub fn from_call(args: &[Expr], location: Location) -> Result<SameParamNode, CompileError> {
        check_arity("fbt.sameParam", args, 1, 1, location)?;
        let name = expect_static_string("fbt.sameParam", "the name", &args[0], location)?;
        Ok(SameParamNode::builder()
            .name(name)
            .location(location)
            .build())
    }
}

impl PhraseOptions {
    /// Validate the root options object of a phrase.
    pub fn from_expr(
        options: Option<&Expr>,
        location: Location,
    ) -> Result<PhraseOptions, CompileError> {
        let options = OptionBag::parse(options, ROOT_OPTIONS, location)?;
        Ok(PhraseOptions::builder()
            .maybe_author(options.string("author")?)
            .maybe_project(options.string("project")?)
            .do_not_extract(options.flag("doNotExtract")?)
            .maybe_subject(options.get("subject").cloned())
            .build())
    }
}

impl Construct {
    /// Build a phrase root from `fbt(children, description, options?)`.
    ///
    /// `args` holds the description and the optional options object; the
    /// children are supplied already converted to nodes.
    pub fn from_call(
        children: Vec<PhraseNode>,
        args: &[Expr],
        location: Location,
    ) -> Result<Construct, CompileError> {
        check_arity("fbt", args, 1, 2, location)?;
        let description = expect_static_string("fbt", "the description", &args[0], location)?;
        let options = PhraseOptions::from_expr(args.get(1), location)?;
        Ok(Construct::builder()
            .description(description)
            .options(options)
            .children(children)
            .location(location)
            .build())
    }
}
