//! Tests for the runtime expression parser.

use phrasec::types::{BinaryOp, PropertyKey, UnaryOp};
use phrasec::{Expr, ParseError, parse_expr};

#[test]
fn parse_identifier() {
    assert_eq!(parse_expr("count").unwrap(), Expr::ident("count"));
    assert_eq!(parse_expr("  $user_1 ").unwrap(), Expr::ident("$user_1"));
}

#[test]
fn parse_literals() {
    assert_eq!(parse_expr("'photo'").unwrap(), Expr::string("photo"));
    assert_eq!(parse_expr("\"it\\'s\"").unwrap(), Expr::string("it's"));
    assert_eq!(parse_expr("42").unwrap(), Expr::Number("42".to_string()));
    assert_eq!(parse_expr("1.5").unwrap(), Expr::Number("1.5".to_string()));
    assert_eq!(parse_expr("true").unwrap(), Expr::Bool(true));
    assert_eq!(parse_expr("null").unwrap(), Expr::Null);
}

#[test]
fn parse_member_chain_and_call() {
    let expr = parse_expr("user.profile.getGender()").unwrap();
    assert_eq!(
        expr,
        Expr::call(
            Expr::member(Expr::member(Expr::ident("user"), "profile"), "getGender"),
            vec![]
        )
    );
    assert!(expr.is_call_or_construction());
}

#[test]
fn parse_call_with_arguments() {
    let expr = parse_expr("format(count, 'en', { short: true })").unwrap();
    let Expr::Call { args, .. } = expr else {
        panic!("expected a call");
    };
    assert_eq!(args.len(), 3);
    let Expr::Object(properties) = &args[2] else {
        panic!("expected an object literal");
    };
    assert_eq!(properties[0].key, PropertyKey::Identifier("short".to_string()));
    assert_eq!(properties[0].value, Expr::Bool(true));
}

#[test]
fn parse_construction() {
    let expr = parse_expr("new Date()").unwrap();
    assert_eq!(expr, Expr::new_instance(Expr::ident("Date"), vec![]));

    let expr = parse_expr("new intl.Formatter").unwrap();
    assert_eq!(
        expr,
        Expr::new_instance(Expr::member(Expr::ident("intl"), "Formatter"), vec![])
    );
}

#[test]
fn parse_index_access() {
    let expr = parse_expr("items[0]").unwrap();
    assert_eq!(
        expr,
        Expr::Index {
            object: Box::new(Expr::ident("items")),
            index: Box::new(Expr::Number("0".to_string())),
        }
    );
}

#[test]
fn binary_precedence() {
    let expr = parse_expr("a + b * c").unwrap();
    let Expr::Binary { op, right, .. } = expr else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
}

#[test]
fn strict_equality_is_not_split() {
    let expr = parse_expr("a === b").unwrap();
    assert!(matches!(expr, Expr::Binary { op: BinaryOp::StrictEq, .. }));
}

#[test]
fn parse_unary_and_conditional() {
    let expr = parse_expr("!isOwner ? viewer.gender : owner.gender").unwrap();
    let Expr::Conditional { test, .. } = expr else {
        panic!("expected a conditional");
    };
    assert!(matches!(*test, Expr::Unary { op: UnaryOp::Not, .. }));

    let expr = parse_expr("typeof x").unwrap();
    assert!(matches!(expr, Expr::Unary { op: UnaryOp::TypeOf, .. }));
}

#[test]
fn parse_sequence() {
    let expr = parse_expr("(a, b)").unwrap();
    assert_eq!(expr, Expr::Sequence(vec![Expr::ident("a"), Expr::ident("b")]));
}

#[test]
fn parse_array_literal() {
    let expr = parse_expr("['a', 'b', 'c']").unwrap();
    assert_eq!(
        expr,
        Expr::Array(vec![
            Expr::string("a"),
            Expr::string("b"),
            Expr::string("c")
        ])
    );
}

#[test]
fn display_round_trips_through_parser() {
    for source in [
        "user.gender",
        "getCount(items, 2)",
        "new Foo(a, \"b\")",
        "a ? b : c",
        "(a + b) * c",
        "[1, 2]",
        "{ a: 1, \"b c\": x }",
    ] {
        let expr = parse_expr(source).unwrap();
        assert_eq!(parse_expr(&expr.to_string()).unwrap(), expr, "{source}");
    }
}

#[test]
fn contains_call_looks_inside_operands() {
    assert!(parse_expr("a + f()").unwrap().contains_call_or_construction());
    assert!(!parse_expr("a + f()").unwrap().is_call_or_construction());
    assert!(parse_expr("{ x: new Y() }").unwrap().contains_call_or_construction());
    assert!(!parse_expr("a.b[c]").unwrap().contains_call_or_construction());
}

#[test]
fn trailing_input_is_a_syntax_error() {
    let err = parse_expr("a b").unwrap_err();
    assert!(
        matches!(err, ParseError::Syntax { line: 1, column: 3, .. }),
        "{err:?}"
    );
}

#[test]
fn empty_input_is_unexpected_eof() {
    let err = parse_expr("   ").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEof { .. }), "{err:?}");
}

#[test]
fn unterminated_string_is_an_error() {
    assert!(parse_expr("'abc").is_err());
}
