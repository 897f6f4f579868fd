//! Tests for building nodes from raw call-site arguments.

use phrasec::nodes::{
    EnumEntry, EnumNode, NameNode, ParamNode, PluralNode, PronounNode, SameParamNode, ShowCount,
};
use phrasec::{CompileError, Construct, Expr, Location, PhraseOptions, parse_expr};
use phrasec_semantics::PronounUsage;

fn args(sources: &[&str]) -> Vec<Expr> {
    sources.iter().map(|source| parse_expr(source).unwrap()).collect()
}

fn here() -> Location {
    Location::new(3, 7)
}

#[test]
fn param_with_number_option() {
    let node = ParamNode::from_call(&args(&["'count'", "items.length", "{ number: true }"]), here())
        .unwrap();
    assert_eq!(node.name.as_str(), "count");
    assert!(node.number);
    assert_eq!(node.gender, None);
    assert_eq!(node.location, here());
}

#[test]
fn param_with_gender_option() {
    let node =
        ParamNode::from_call(&args(&["'owner'", "name", "{ gender: user.gender }"]), here())
            .unwrap();
    assert_eq!(node.gender, Some(parse_expr("user.gender").unwrap()));
    assert!(!node.number);
}

#[test]
fn param_name_may_be_concatenated() {
    let node = ParamNode::from_call(&args(&["'user' + 'Name'", "name"]), here()).unwrap();
    assert_eq!(node.name.as_str(), "userName");
}

#[test]
fn param_name_must_be_literal() {
    let err = ParamNode::from_call(&args(&["tokenName", "name"]), here()).unwrap_err();
    assert!(matches!(err, CompileError::Malformed { .. }), "{err:?}");
    assert!(err.to_string().contains("Identifier"));
}

#[test]
fn param_cannot_vary_by_both_gender_and_number() {
    let err = ParamNode::from_call(
        &args(&["'x'", "x", "{ gender: g, number: true }"]),
        here(),
    )
    .unwrap_err();
    assert!(matches!(err, CompileError::Malformed { .. }), "{err:?}");
}

#[test]
fn param_arity_is_checked() {
    let err = ParamNode::from_call(&args(&["'x'"]), here()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"3:7: Expected fbt.param() to have 2 to 3 arguments, but got 1");
}

#[test]
fn enum_from_array_uses_values_as_keys() {
    let node = EnumNode::from_call(&args(&["size", "['small', 'large']"]), here()).unwrap();
    assert_eq!(
        node.range,
        vec![
            EnumEntry::new("small", "small"),
            EnumEntry::new("large", "large")
        ]
    );
}

#[test]
fn enum_from_object_keeps_key_order() {
    let node = EnumNode::from_call(
        &args(&["kind", "{ LINK: 'link', PHOTO: 'photo', VIDEO: 'video' }"]),
        here(),
    )
    .unwrap();
    assert_eq!(node.keys(), vec!["LINK", "PHOTO", "VIDEO"]);
    assert_eq!(node.text_for("PHOTO"), Some("photo"));
    assert_eq!(node.text_for("AUDIO"), None);
}

#[test]
fn enum_rejects_computed_keys() {
    let err = EnumNode::from_call(&args(&["kind", "{ [key]: 'link' }"]), here()).unwrap_err();
    assert!(matches!(err, CompileError::Malformed { .. }), "{err:?}");
}

#[test]
fn enum_rejects_non_literal_values() {
    let err = EnumNode::from_call(&args(&["kind", "{ LINK: label }"]), here()).unwrap_err();
    assert!(matches!(err, CompileError::Malformed { .. }), "{err:?}");
}

#[test]
fn enum_rejects_duplicate_keys() {
    let err = EnumNode::from_call(&args(&["kind", "['a', 'a']"]), here()).unwrap_err();
    assert!(err.to_string().contains("duplicate key \"a\""));
}

#[test]
fn plural_defaults() {
    let node = PluralNode::from_call(&args(&["'photo'", "photos.length"]), here()).unwrap();
    assert_eq!(node.show_count, ShowCount::No);
    assert_eq!(node.token().as_str(), "number");
    assert_eq!(node.many_text(), "photos");
    assert!(!node.declares_token());
}

#[test]
fn plural_options() {
    let node = PluralNode::from_call(
        &args(&[
            "'person'",
            "n",
            "{ showCount: 'ifMany', name: 'people_count', many: 'people', value: fmt(n) }",
        ]),
        here(),
    )
    .unwrap();
    assert_eq!(node.show_count, ShowCount::IfMany);
    assert_eq!(node.token().as_str(), "people_count");
    assert_eq!(node.many_text(), "people");
    assert_eq!(node.value, Some(parse_expr("fmt(n)").unwrap()));
    assert!(node.declares_token());
}

#[test]
fn plural_count_as_option() {
    let node = PluralNode::from_call(&args(&["'cat'", "{ count: n, showCount: 'yes' }"]), here())
        .unwrap();
    assert_eq!(node.count, Expr::ident("n"));
    assert_eq!(node.show_count, ShowCount::Yes);
}

#[test]
fn plural_count_given_twice() {
    let err = PluralNode::from_call(&args(&["'cat'", "n", "{ count: m }"]), here()).unwrap_err();
    assert!(matches!(err, CompileError::Malformed { .. }), "{err:?}");
}

#[test]
fn plural_needs_a_count() {
    let err = PluralNode::from_call(&args(&["'cat'", "{ showCount: 'yes' }"]), here()).unwrap_err();
    assert!(err.to_string().contains("needs a count"));
}

#[test]
fn plural_invalid_show_count() {
    let err = PluralNode::from_call(&args(&["'photo'", "n", "{ showCount: 'badkey' }"]), here())
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"3:7: Option "showCount" has an invalid value: "badkey". Only allowed: yes, no, ifMany"#);
}

#[test]
fn plural_unknown_option_suggests_close_key() {
    let err = PluralNode::from_call(&args(&["'photo'", "n", "{ shoCount: 'yes' }"]), here())
        .unwrap_err();
    let CompileError::UnknownOption { suggestions, .. } = &err else {
        panic!("expected an unknown option error, got {err:?}");
    };
    assert_eq!(suggestions, &vec!["showCount".to_string()]);
    insta::assert_snapshot!(err.to_string(), @r#"3:7: Invalid option "shoCount". Only allowed: value, showCount, name, many, count (did you mean "showCount"?)"#);
}

#[test]
fn name_requires_three_arguments() {
    let node = NameNode::from_call(&args(&["'name'", "user.name", "user.gender"]), here()).unwrap();
    assert_eq!(node.name.as_str(), "name");
    assert_eq!(node.gender, parse_expr("user.gender").unwrap());

    let err = NameNode::from_call(&args(&["'name'", "user.name"]), here()).unwrap_err();
    assert!(err.to_string().contains("to have 3 arguments"));
}

#[test]
fn pronoun_from_call() {
    let node = PronounNode::from_call(
        &args(&["'possessive'", "gender", "{ human: true, capitalize: 'true' }"]),
        here(),
    )
    .unwrap();
    assert_eq!(node.usage, PronounUsage::Possessive);
    assert!(node.human);
    assert!(node.capitalize);
}

#[test]
fn pronoun_usage_must_be_a_string_literal() {
    let err = PronounNode::from_call(&args(&["usage", "gender"]), here()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"3:7: `usage`, the first argument of fbt.pronoun() must be a `StringLiteral` but we got `Identifier`");
}

#[test]
fn pronoun_usage_must_be_known() {
    let err = PronounNode::from_call(&args(&["'POSSESSION'", "gender"]), here()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"3:7: `usage`, the first argument of fbt.pronoun() - Expected value to be one of [object, possessive, reflexive, subject] but we got 'POSSESSION' (string) instead");
}

#[test]
fn pronoun_flag_must_be_boolean() {
    let err = PronounNode::from_call(&args(&["'object'", "gender", "{ human: 1 }"]), here())
        .unwrap_err();
    assert!(matches!(err, CompileError::InvalidOptionValue { .. }), "{err:?}");
}

#[test]
fn same_param_from_call() {
    let node = SameParamNode::from_call(&args(&["'name'"]), here()).unwrap();
    assert_eq!(node.name.as_str(), "name");
}

#[test]
fn root_options() {
    let options = PhraseOptions::from_expr(
        Some(&parse_expr("{ project: 'web', author: 'sam', doNotExtract: true, subject: g }").unwrap()),
        here(),
    )
    .unwrap();
    assert_eq!(options.project.as_deref(), Some("web"));
    assert_eq!(options.author.as_deref(), Some("sam"));
    assert!(options.do_not_extract);
    assert_eq!(options.subject, Some(Expr::ident("g")));
}

#[test]
fn root_options_reject_unknown_keys() {
    let err = PhraseOptions::from_expr(Some(&parse_expr("{ projet: 'web' }").unwrap()), here())
        .unwrap_err();
    assert!(matches!(err, CompileError::UnknownOption { .. }), "{err:?}");
    assert!(err.to_string().contains("did you mean \"project\""));
}

#[test]
fn options_must_be_an_object() {
    let err = PhraseOptions::from_expr(Some(&Expr::ident("opts")), here()).unwrap_err();
    assert!(matches!(err, CompileError::Malformed { .. }), "{err:?}");
}

#[test]
fn construct_from_call() {
    let construct = Construct::from_call(
        vec![phrasec::PhraseNode::text("Hello")],
        &args(&["'a ' + 'greeting'", "{ project: 'web' }"]),
        here(),
    )
    .unwrap();
    assert_eq!(construct.description, "a greeting");
    assert_eq!(construct.options.project.as_deref(), Some("web"));
    assert_eq!(construct.children.len(), 1);
}
