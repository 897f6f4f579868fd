//! Tests for axis collection and payload enumeration.

use phrasec::compiler::{AxisKind, RuntimeArgument, RuntimeCall};
use phrasec::nodes::{
    EnumEntry, EnumNode, NameNode, ParamNode, PluralNode, PronounNode, ShowCount,
};
use phrasec::{
    CompileError, Construct, Expr, Location, PhraseNode, PhraseOptions, compile, variation_axes,
};
use phrasec_semantics::PronounUsage;
use serde_json::json;

fn phrase(children: Vec<PhraseNode>) -> Construct {
    Construct::builder()
        .description("desc")
        .children(children)
        .build()
}

fn plural(singular: &str, count: &str) -> PluralNode {
    PluralNode::builder()
        .singular(singular)
        .count(Expr::ident(count))
        .build()
}

fn choice(value: &str, entries: &[(&str, &str)]) -> PhraseNode {
    EnumNode::builder()
        .value(Expr::ident(value))
        .range(
            entries
                .iter()
                .map(|(key, text)| EnumEntry::new(*key, *text))
                .collect(),
        )
        .build()
        .into()
}

fn texts(construct: &Construct) -> Vec<String> {
    compile(construct)
        .unwrap()
        .payload
        .jsfbt
        .t
        .leaves()
        .into_iter()
        .map(|leaf| leaf.text.clone())
        .collect()
}

#[test]
fn literal_phrase_is_a_flat_leaf() {
    let construct = Construct::builder()
        .description("greeting")
        .children(vec![PhraseNode::text("Hello")])
        .build();
    let compiled = compile(&construct).unwrap();
    assert_eq!(
        compiled.payload.to_json().unwrap(),
        r#"{"jsfbt":{"t":{"desc":"greeting","text":"Hello","tokenAliases":{}},"m":[]},"project":""}"#
    );
    assert!(compiled.arguments.is_empty());
    assert!(compiled.hoisted.is_empty());
}

#[test]
fn two_plurals_cross_multiply() {
    let construct = phrase(vec![
        plural("photo", "photoCount").into(),
        PhraseNode::text(" and "),
        plural("video", "videoCount").into(),
    ]);
    let payload = serde_json::to_value(compile(&construct).unwrap().payload).unwrap();
    assert_eq!(
        payload,
        json!({
            "jsfbt": {
                "t": {
                    "*": {
                        "*": {"desc": "desc", "text": "photos and videos", "tokenAliases": {}},
                        "_1": {"desc": "desc", "text": "photos and video", "tokenAliases": {}},
                    },
                    "_1": {
                        "*": {"desc": "desc", "text": "photo and videos", "tokenAliases": {}},
                        "_1": {"desc": "desc", "text": "photo and video", "tokenAliases": {}},
                    },
                },
                "m": [null, null],
            },
            "project": "",
        })
    );
    assert_eq!(
        texts(&construct),
        vec![
            "photos and videos",
            "photos and video",
            "photo and videos",
            "photo and video"
        ]
    );
}

#[test]
fn counted_plurals_are_number_typed() {
    let construct = phrase(vec![
        PluralNode::builder()
            .singular("cat")
            .count(Expr::ident("catCount"))
            .show_count(ShowCount::Yes)
            .name("cat_token")
            .build()
            .into(),
        PhraseNode::text(" and "),
        PluralNode::builder()
            .singular("dog")
            .count(Expr::ident("dogCount"))
            .show_count(ShowCount::Yes)
            .name("dog_token")
            .build()
            .into(),
    ]);
    let compiled = compile(&construct).unwrap();
    let payload = serde_json::to_value(&compiled.payload).unwrap();
    assert_eq!(
        payload["jsfbt"]["m"],
        json!([
            {"token": "cat_token", "type": 2, "singular": true},
            {"token": "dog_token", "type": 2, "singular": true},
        ])
    );
    assert_eq!(
        payload["jsfbt"]["t"]["*"]["_1"]["text"],
        json!("{cat_token} cats and 1 dog")
    );
    assert_eq!(compiled.payload.jsfbt.t.leaves().len(), 4);
}

#[test]
fn if_many_shows_count_only_in_plural_form() {
    let construct = phrase(vec![
        PhraseNode::text("There "),
        PluralNode::builder()
            .singular("is a like")
            .many("are likes")
            .count(Expr::ident("count"))
            .show_count(ShowCount::IfMany)
            .build()
            .into(),
    ]);
    assert_eq!(
        texts(&construct),
        vec!["There {number} are likes", "There is a like"]
    );
}

#[test]
fn shared_enum_key_set_is_one_axis() {
    let keys = [("a", "A"), ("b", "B"), ("c", "C")];
    let construct = phrase(vec![
        choice("kind", &keys),
        PhraseNode::text(" / "),
        choice("kind", &[("a", "a2"), ("b", "b2"), ("c", "c2")]),
    ]);
    let compiled = compile(&construct).unwrap();
    assert_eq!(compiled.payload.jsfbt.m, vec![None]);
    assert_eq!(texts(&construct), vec!["A / a2", "B / b2", "C / c2"]);

    let axes = variation_axes(&construct, None);
    assert_eq!(axes.len(), 1);
    assert_eq!(axes.as_slice()[0].kind, AxisKind::EnumChoice);
    assert_eq!(axes.as_slice()[0].contributors, vec![0, 2]);

    // Only the first enum of a merged axis is evaluated.
    assert_eq!(compiled.arguments.len(), 1);
    assert!(matches!(
        &compiled.arguments[0],
        RuntimeArgument::Call(RuntimeCall::Enum { value, .. }) if *value == Expr::ident("kind")
    ));
}

#[test]
fn shared_enum_keys_with_different_values_are_rejected() {
    let keys = [("a", "A"), ("b", "B")];
    let construct = phrase(vec![
        choice("first", &keys),
        PhraseNode::text(" / "),
        EnumNode::builder()
            .value(Expr::ident("second"))
            .range(keys.iter().map(|(key, text)| EnumEntry::new(*key, *text)).collect())
            .location(Location::new(3, 7))
            .build()
            .into(),
    ]);
    let err = compile(&construct).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"3:7: fbt.enum() calls with the same range must share a value, but got `first` and `second`");
    assert!(matches!(err, CompileError::Malformed { .. }), "{err:?}");
}

#[test]
fn different_enum_key_sets_cross_multiply() {
    let construct = phrase(vec![
        choice("size", &[("s", "small"), ("l", "large")]),
        PhraseNode::text(" "),
        choice("color", &[("r", "red"), ("g", "green"), ("b", "blue")]),
    ]);
    let texts = texts(&construct);
    assert_eq!(texts.len(), 6);
    assert_eq!(texts[0], "small red");
    assert_eq!(texts[5], "large blue");
}

#[test]
fn enum_order_differs_means_different_axes() {
    let construct = phrase(vec![
        choice("x", &[("a", "A"), ("b", "B")]),
        choice("y", &[("b", "B"), ("a", "A")]),
    ]);
    assert_eq!(variation_axes(&construct, None).len(), 2);
}

#[test]
fn pronoun_enumerates_gender_buckets() {
    let construct = phrase(vec![
        PhraseNode::text("Wish "),
        PronounNode::builder()
            .usage(PronounUsage::Object)
            .gender(Expr::ident("gender"))
            .build()
            .into(),
        PhraseNode::text(" a happy birthday"),
    ]);
    let payload = serde_json::to_value(compile(&construct).unwrap().payload).unwrap();
    assert_eq!(payload["jsfbt"]["m"], json!([null]));
    assert_eq!(
        payload["jsfbt"]["t"]["0"]["text"],
        json!("Wish this a happy birthday")
    );
    assert_eq!(
        payload["jsfbt"]["t"]["1"]["text"],
        json!("Wish her a happy birthday")
    );
    assert_eq!(
        payload["jsfbt"]["t"]["2"]["text"],
        json!("Wish him a happy birthday")
    );
    assert_eq!(
        payload["jsfbt"]["t"]["*"]["text"],
        json!("Wish them a happy birthday")
    );
}

#[test]
fn possessive_pronoun_leaves_follow_key_order() {
    let construct = phrase(vec![
        PronounNode::builder()
            .usage(PronounUsage::Possessive)
            .gender(Expr::ident("gender"))
            .build()
            .into(),
        PhraseNode::text(" photo"),
    ]);
    assert_eq!(texts(&construct), vec!["her photo", "his photo", "their photo"]);
    let compiled = compile(&construct).unwrap();
    assert_eq!(compiled.payload.jsfbt.t.get(&["*"]).unwrap().text, "their photo");
}

#[test]
fn human_capitalized_pronoun() {
    let construct = phrase(vec![
        PronounNode::builder()
            .usage(PronounUsage::Subject)
            .gender(Expr::ident("gender"))
            .human(true)
            .capitalize(true)
            .build()
            .into(),
        PhraseNode::text(" shared a photo."),
    ]);
    assert_eq!(
        texts(&construct),
        vec![
            "She shared a photo.",
            "He shared a photo.",
            "They shared a photo."
        ]
    );
}

#[test]
fn name_and_gendered_param_have_gender_runtime_args() {
    let construct = phrase(vec![
        NameNode::builder()
            .name("name")
            .value(Expr::ident("userName"))
            .gender(Expr::ident("userGender"))
            .build()
            .into(),
        PhraseNode::text(" invited "),
        ParamNode::builder()
            .name("friend")
            .value(Expr::ident("friendName"))
            .gender(Expr::ident("friendGender"))
            .build()
            .into(),
    ]);
    let payload = serde_json::to_value(compile(&construct).unwrap().payload).unwrap();
    assert_eq!(
        payload["jsfbt"]["m"],
        json!([{"token": "name", "type": 1}, {"token": "friend", "type": 1}])
    );
    assert_eq!(
        payload["jsfbt"]["t"]["*"]["*"]["text"],
        json!("{name} invited {friend}")
    );
}

#[test]
fn number_param_has_single_wildcard_bucket() {
    let construct = phrase(vec![
        ParamNode::builder()
            .name("count")
            .value(Expr::ident("n"))
            .number(true)
            .build()
            .into(),
        PhraseNode::text(" items"),
    ]);
    let payload = serde_json::to_value(compile(&construct).unwrap().payload).unwrap();
    assert_eq!(payload["jsfbt"]["m"], json!([{"token": "count", "type": 2}]));
    assert_eq!(payload["jsfbt"]["t"]["*"]["text"], json!("{count} items"));
}

#[test]
fn subject_adds_leading_gender_axis() {
    let construct = Construct::builder()
        .description("desc")
        .options(
            PhraseOptions::builder()
                .subject(Expr::member(Expr::ident("viewer"), "gender"))
                .build(),
        )
        .children(vec![
            plural("photo", "count").into(),
            PhraseNode::text(" added"),
        ])
        .build();
    let compiled = compile(&construct).unwrap();
    let payload = serde_json::to_value(&compiled.payload).unwrap();
    assert_eq!(
        payload["jsfbt"]["m"],
        json!([{"token": "__subject__", "type": 1}, null])
    );
    assert_eq!(payload["jsfbt"]["t"]["*"]["_1"]["text"], json!("photo added"));
    assert!(matches!(
        compiled.arguments.first(),
        Some(RuntimeArgument::Call(RuntimeCall::Subject { .. }))
    ));
}

#[test]
fn same_param_renders_referenced_token() {
    let construct = phrase(vec![
        ParamNode::builder()
            .name("user")
            .value(Expr::ident("user"))
            .build()
            .into(),
        PhraseNode::text(" likes "),
        phrasec::nodes::SameParamNode::builder()
            .name("user")
            .build()
            .into(),
    ]);
    assert_eq!(texts(&construct), vec!["{user} likes {user}"]);
    // sameParam adds no runtime argument of its own.
    assert_eq!(compile(&construct).unwrap().arguments.len(), 1);
}

#[test]
fn inline_arguments_follow_document_order() {
    let construct = phrase(vec![
        ParamNode::builder()
            .name("a")
            .value(Expr::ident("a"))
            .build()
            .into(),
        plural("photo", "count").into(),
        ParamNode::builder()
            .name("b")
            .value(Expr::ident("b"))
            .build()
            .into(),
    ]);
    let compiled = compile(&construct).unwrap();
    let kinds: Vec<&str> = compiled
        .arguments
        .iter()
        .map(|argument| match argument {
            RuntimeArgument::Call(RuntimeCall::Param { .. }) => "param",
            RuntimeArgument::Call(RuntimeCall::Plural { .. }) => "plural",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["param", "plural", "param"]);
}

#[test]
fn sentinel_wraps_payload_json() {
    let construct = phrase(vec![PhraseNode::text("Hi")]);
    let payload = compile(&construct).unwrap().payload;
    let wrapped = payload.to_sentinel_string().unwrap();
    let inner = wrapped
        .strip_prefix(phrasec::compiler::SENTINEL)
        .and_then(|rest| rest.strip_suffix(phrasec::compiler::SENTINEL))
        .unwrap();
    assert_eq!(inner, payload.to_json().unwrap());
}
