mod expr;
mod location;
mod token;

pub use expr::{BinaryOp, Expr, Property, PropertyKey, UnaryOp};
pub use location::Location;
pub use token::TokenName;
