//! Runtime expressions attached to phrase nodes.
//!
//! The compiler never evaluates these. It only needs their shape: whether an
//! argument is a literal (for keys and options), and whether evaluating it
//! may have side effects (for hoisting).

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::slice;

/// A JavaScript-like expression as handed over by the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String),
    String(String),
    /// Numeric literal, kept as its source text.
    Number(String),
    Bool(bool),
    Null,
    /// `object.property`
    Member {
        object: Box<Expr>,
        property: String,
    },
    /// `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `new Callee(args)`
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    /// Comma expression: `(a, b)`
    Sequence(Vec<Expr>),
    Array(Vec<Expr>),
    Object(Vec<Property>),
}

/// One `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(String),
    String(String),
    Number(String),
    Computed(Box<Expr>),
}

impl PropertyKey {
    /// The key's name when it is statically known.
    pub fn static_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Identifier(name) | PropertyKey::String(name) | PropertyKey::Number(name) => {
                Some(name)
            }
            PropertyKey::Computed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    TypeOf,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::TypeOf => "typeof ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::String(value.into())
    }

    pub fn member(object: Expr, property: impl Into<String>) -> Expr {
        Expr::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn new_instance(callee: Expr, args: Vec<Expr>) -> Expr {
        Expr::New {
            callee: Box::new(callee),
            args,
        }
    }

    /// The value of a string literal.
    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Expr::String(value) => Some(value),
            _ => None,
        }
    }

    /// The value of a boolean literal, also accepting `"true"`/`"false"`
    /// strings since JSX attributes arrive as strings.
    pub fn as_bool_literal(&self) -> Option<bool> {
        match self {
            Expr::Bool(value) => Some(*value),
            Expr::String(value) if value == "true" => Some(true),
            Expr::String(value) if value == "false" => Some(false),
            _ => None,
        }
    }

    /// AST node type name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "Identifier",
            Expr::String(_) => "StringLiteral",
            Expr::Number(_) => "NumericLiteral",
            Expr::Bool(_) => "BooleanLiteral",
            Expr::Null => "NullLiteral",
            Expr::Member { .. } | Expr::Index { .. } => "MemberExpression",
            Expr::Call { .. } => "CallExpression",
            Expr::New { .. } => "NewExpression",
            Expr::Unary { .. } => "UnaryExpression",
            Expr::Binary { .. } => "BinaryExpression",
            Expr::Conditional { .. } => "ConditionalExpression",
            Expr::Sequence(_) => "SequenceExpression",
            Expr::Array(_) => "ArrayExpression",
            Expr::Object(_) => "ObjectExpression",
        }
    }

    /// Whether this expression is itself a call or an instantiation.
    pub fn is_call_or_construction(&self) -> bool {
        matches!(self, Expr::Call { .. } | Expr::New { .. })
    }

    /// Whether a call or instantiation appears anywhere in this expression.
    pub fn contains_call_or_construction(&self) -> bool {
        match self {
            Expr::Call { .. } | Expr::New { .. } => true,
            Expr::Identifier(_) | Expr::String(_) | Expr::Number(_) | Expr::Bool(_) | Expr::Null => {
                false
            }
            Expr::Member { object, .. } => object.contains_call_or_construction(),
            Expr::Index { object, index } => {
                object.contains_call_or_construction() || index.contains_call_or_construction()
            }
            Expr::Unary { operand, .. } => operand.contains_call_or_construction(),
            Expr::Binary { left, right, .. } => {
                left.contains_call_or_construction() || right.contains_call_or_construction()
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                test.contains_call_or_construction()
                    || consequent.contains_call_or_construction()
                    || alternate.contains_call_or_construction()
            }
            Expr::Sequence(items) | Expr::Array(items) => {
                items.iter().any(Expr::contains_call_or_construction)
            }
            Expr::Object(properties) => properties.iter().any(|property| {
                let computed_key = match &property.key {
                    PropertyKey::Computed(key) => key.contains_call_or_construction(),
                    PropertyKey::Identifier(_) | PropertyKey::String(_) | PropertyKey::Number(_) => {
                        false
                    }
                };
                computed_key || property.value.contains_call_or_construction()
            }),
        }
    }

    /// Whether printing this expression as an operand needs parentheses.
    fn needs_parens_as_operand(&self) -> bool {
        matches!(
            self,
            Expr::Binary { .. } | Expr::Conditional { .. } | Expr::Sequence(_) | Expr::Unary { .. }
        )
    }
}

fn write_operand(f: &mut Formatter<'_>, expr: &Expr) -> FmtResult {
    if expr.needs_parens_as_operand() {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn write_list(f: &mut Formatter<'_>, items: &[Expr]) -> FmtResult {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        if matches!(item, Expr::Sequence(_)) {
            write!(f, "({item})")?;
        } else {
            write!(f, "{item}")?;
        }
    }
    Ok(())
}

fn write_string(f: &mut Formatter<'_>, value: &str) -> FmtResult {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\"")
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Expr::Identifier(name) => f.write_str(name),
            Expr::String(value) => write_string(f, value),
            Expr::Number(text) => f.write_str(text),
            Expr::Bool(value) => write!(f, "{value}"),
            Expr::Null => f.write_str("null"),
            Expr::Member { object, property } => {
                write_operand(f, object)?;
                write!(f, ".{property}")
            }
            Expr::Index { object, index } => {
                write_operand(f, object)?;
                write!(f, "[{index}]")
            }
            Expr::Call { callee, args } => {
                write_operand(f, callee)?;
                f.write_str("(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::New { callee, args } => {
                f.write_str("new ")?;
                write_operand(f, callee)?;
                f.write_str("(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::Unary { op, operand } => {
                f.write_str(op.as_str())?;
                write_operand(f, operand)
            }
            Expr::Binary { op, left, right } => {
                write_operand(f, left)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, right)
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                write_operand(f, test)?;
                f.write_str(" ? ")?;
                write_operand(f, consequent)?;
                f.write_str(" : ")?;
                write_operand(f, alternate)
            }
            Expr::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Expr::Array(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Expr::Object(properties) => {
                if properties.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{")?;
                for (index, property) in properties.iter().enumerate() {
                    f.write_str(if index > 0 { ", " } else { " " })?;
                    match &property.key {
                        PropertyKey::Identifier(name) | PropertyKey::Number(name) => {
                            f.write_str(name)?;
                        }
                        PropertyKey::String(name) => write_string(f, name)?,
                        PropertyKey::Computed(key) => write!(f, "[{key}]")?,
                    }
                    f.write_str(": ")?;
                    write_list(f, slice::from_ref(&property.value))?;
                }
                f.write_str(" }")
            }
        }
    }
}
