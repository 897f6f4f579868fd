//! Expression parser using winnow.
//!
//! Precedence, loosest first: comma sequence, conditional, `||`, `&&`,
//! equality, relational, additive, multiplicative, unary, postfix
//! (member/index/call), primary.

use winnow::combinator::{alt, delimited, opt, preceded, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use super::error::ParseError;
use crate::types::{BinaryOp, Expr, Property, PropertyKey, UnaryOp};

const OR_OPS: &[(&str, BinaryOp)] = &[("||", BinaryOp::Or)];
const AND_OPS: &[(&str, BinaryOp)] = &[("&&", BinaryOp::And)];
const EQUALITY_OPS: &[(&str, BinaryOp)] = &[
    ("===", BinaryOp::StrictEq),
    ("!==", BinaryOp::StrictNotEq),
    ("==", BinaryOp::Eq),
    ("!=", BinaryOp::NotEq),
];
const RELATIONAL_OPS: &[(&str, BinaryOp)] = &[
    ("<=", BinaryOp::Le),
    (">=", BinaryOp::Ge),
    ("<", BinaryOp::Lt),
    (">", BinaryOp::Gt),
];
const ADDITIVE_OPS: &[(&str, BinaryOp)] = &[("+", BinaryOp::Add), ("-", BinaryOp::Sub)];
const MULTIPLICATIVE_OPS: &[(&str, BinaryOp)] = &[
    ("*", BinaryOp::Mul),
    ("/", BinaryOp::Div),
    ("%", BinaryOp::Rem),
];

/// Parse an expression snippet into an [`Expr`].
pub fn parse_expr(input: &str) -> Result<Expr, ParseError> {
    let mut remaining = input;
    match delimited(ws, sequence, ws).parse_next(&mut remaining) {
        Ok(expr) => {
            if remaining.is_empty() {
                Ok(expr)
            } else {
                let (line, column) = calculate_position(input, remaining);
                Err(ParseError::Syntax {
                    line,
                    column,
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => {
            let (line, column) = calculate_position(input, remaining);
            if remaining.trim().is_empty() {
                Err(ParseError::UnexpectedEof { line, column })
            } else {
                Err(ParseError::Syntax {
                    line,
                    column,
                    message: format!("parse error: {e}"),
                })
            }
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

fn sequence(input: &mut &str) -> ModalResult<Expr> {
    let first = conditional(input)?;
    let mut items = vec![first];
    while opt((ws, ',', ws)).parse_next(input)?.is_some() {
        items.push(conditional(input)?);
    }
    if items.len() == 1 {
        Ok(items.remove(0))
    } else {
        Ok(Expr::Sequence(items))
    }
}

fn conditional(input: &mut &str) -> ModalResult<Expr> {
    let test = logical_or(input)?;
    if opt((ws, '?', ws)).parse_next(input)?.is_none() {
        return Ok(test);
    }
    let consequent = conditional(input)?;
    let _ = (ws, ':', ws).parse_next(input)?;
    let alternate = conditional(input)?;
    Ok(Expr::Conditional {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    })
}

/// Parse a left-associative chain of operators from `operators`, with
/// operands parsed by `next`.
fn binary_chain(
    input: &mut &str,
    operators: &[(&str, BinaryOp)],
    next: fn(&mut &str) -> ModalResult<Expr>,
) -> ModalResult<Expr> {
    let mut left = next(input)?;
    loop {
        let checkpoint = *input;
        ws(input)?;
        let Some(op) = match_operator(input, operators) else {
            *input = checkpoint;
            break;
        };
        ws(input)?;
        let right = next(input)?;
        left = Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

/// Consume the first operator in `operators` that prefixes the input.
///
/// Longer operators must be listed before their prefixes.
fn match_operator(input: &mut &str, operators: &[(&str, BinaryOp)]) -> Option<BinaryOp> {
    for (text, op) in operators {
        if let Some(rest) = input.strip_prefix(text) {
            *input = rest;
            return Some(*op);
        }
    }
    None
}

fn logical_or(input: &mut &str) -> ModalResult<Expr> {
    binary_chain(input, OR_OPS, logical_and)
}

fn logical_and(input: &mut &str) -> ModalResult<Expr> {
    binary_chain(input, AND_OPS, equality)
}

fn equality(input: &mut &str) -> ModalResult<Expr> {
    binary_chain(input, EQUALITY_OPS, relational)
}

fn relational(input: &mut &str) -> ModalResult<Expr> {
    binary_chain(input, RELATIONAL_OPS, additive)
}

fn additive(input: &mut &str) -> ModalResult<Expr> {
    binary_chain(input, ADDITIVE_OPS, multiplicative)
}

fn multiplicative(input: &mut &str) -> ModalResult<Expr> {
    binary_chain(input, MULTIPLICATIVE_OPS, unary)
}

fn unary(input: &mut &str) -> ModalResult<Expr> {
    let op = opt(alt((
        '!'.value(UnaryOp::Not),
        '-'.value(UnaryOp::Neg),
        '+'.value(UnaryOp::Plus),
        typeof_operator,
    )))
    .parse_next(input)?;
    match op {
        Some(op) => {
            ws(input)?;
            let operand = unary(input)?;
            Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            })
        }
        None => postfix(input),
    }
}

fn typeof_operator(input: &mut &str) -> ModalResult<UnaryOp> {
    let checkpoint = *input;
    let word = identifier(input)?;
    if word == "typeof" {
        Ok(UnaryOp::TypeOf)
    } else {
        *input = checkpoint;
        Err(backtrack())
    }
}

/// Parse member access, indexing and calls following a primary expression.
fn postfix(input: &mut &str) -> ModalResult<Expr> {
    let mut expr = primary(input)?;
    loop {
        let checkpoint = *input;
        ws(input)?;
        if let Some(rest) = input.strip_prefix('.') {
            *input = rest;
            ws(input)?;
            let property = identifier(input)?;
            expr = Expr::member(expr, property);
        } else if input.starts_with('(') {
            let args = call_arguments(input)?;
            expr = Expr::call(expr, args);
        } else if input.starts_with('[') {
            let index = delimited(('[', ws), sequence, (ws, ']')).parse_next(input)?;
            expr = Expr::Index {
                object: Box::new(expr),
                index: Box::new(index),
            };
        } else {
            *input = checkpoint;
            break;
        }
    }
    Ok(expr)
}

/// Parse call arguments: (arg1, arg2, ...)
fn call_arguments(input: &mut &str) -> ModalResult<Vec<Expr>> {
    delimited(
        ('(', ws),
        separated(0.., conditional, (ws, ',', ws)),
        (ws, ')'),
    )
    .parse_next(input)
}

fn primary(input: &mut &str) -> ModalResult<Expr> {
    alt((
        parenthesized,
        array_literal,
        object_literal,
        string_literal.map(Expr::String),
        number_literal.map(|text: &str| Expr::Number(text.to_string())),
        word,
    ))
    .parse_next(input)
}

fn parenthesized(input: &mut &str) -> ModalResult<Expr> {
    delimited(('(', ws), sequence, (ws, ')')).parse_next(input)
}

fn array_literal(input: &mut &str) -> ModalResult<Expr> {
    let items: Vec<Expr> = delimited(
        ('[', ws),
        separated(0.., conditional, (ws, ',', ws)),
        (ws, ']'),
    )
    .parse_next(input)?;
    Ok(Expr::Array(items))
}

fn object_literal(input: &mut &str) -> ModalResult<Expr> {
    let properties: Vec<Property> = delimited(
        ('{', ws),
        separated(0.., property, (ws, ',', ws)),
        (ws, '}'),
    )
    .parse_next(input)?;
    Ok(Expr::Object(properties))
}

fn property(input: &mut &str) -> ModalResult<Property> {
    let key = alt((
        string_literal.map(PropertyKey::String),
        number_literal.map(|text: &str| PropertyKey::Number(text.to_string())),
        delimited(('[', ws), sequence, (ws, ']')).map(|e| PropertyKey::Computed(Box::new(e))),
        identifier.map(|name: &str| PropertyKey::Identifier(name.to_string())),
    ))
    .parse_next(input)?;
    let _ = (ws, ':', ws).parse_next(input)?;
    let value = conditional(input)?;
    Ok(Property { key, value })
}

/// Parse an identifier-like word: a keyword literal, `new`, or a plain name.
fn word(input: &mut &str) -> ModalResult<Expr> {
    let name = identifier(input)?;
    match name {
        "true" => Ok(Expr::Bool(true)),
        "false" => Ok(Expr::Bool(false)),
        "null" => Ok(Expr::Null),
        "new" => construction(input),
        _ => Ok(Expr::ident(name)),
    }
}

/// Parse the rest of `new Callee(args)` after the `new` keyword.
fn construction(input: &mut &str) -> ModalResult<Expr> {
    ws(input)?;
    let mut callee = Expr::ident(identifier(input)?);
    while let Some(property) = opt(preceded((ws, '.', ws), identifier)).parse_next(input)? {
        callee = Expr::member(callee, property);
    }
    let checkpoint = *input;
    ws(input)?;
    let args = if input.starts_with('(') {
        call_arguments(input)?
    } else {
        *input = checkpoint;
        Vec::new()
    };
    Ok(Expr::new_instance(callee, args))
}

fn quote(input: &mut &str) -> ModalResult<char> {
    one_of(['\'', '"']).parse_next(input)
}

fn next_char(input: &mut &str) -> ModalResult<char> {
    any.parse_next(input)
}

/// Parse a single- or double-quoted string literal with backslash escapes.
fn string_literal(input: &mut &str) -> ModalResult<String> {
    let quote = quote(input)?;
    let mut value = String::new();
    loop {
        let c = next_char(input)?;
        if c == quote {
            return Ok(value);
        }
        if c == '\\' {
            let escaped = next_char(input)?;
            value.push(match escaped {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                other => other,
            });
        } else {
            value.push(c);
        }
    }
}

fn number_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(1.., |c: char| c.is_ascii_digit()))),
    )
        .take()
        .parse_next(input)
}

fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$'),
    )
        .take()
        .parse_next(input)
}
