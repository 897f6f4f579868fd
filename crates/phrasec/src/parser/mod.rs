//! Parser for runtime expression snippets.
//!
//! Front ends that only have source text for a construct's arguments can
//! turn them into [`Expr`](crate::types::Expr) trees here. The grammar is the
//! expression subset phrase arguments use in practice: literals, member and
//! index access, calls, `new`, unary/binary/conditional operators, comma
//! sequences, and array/object literals.

pub mod error;
mod expr;

pub use error::ParseError;
pub use expr::parse_expr;
