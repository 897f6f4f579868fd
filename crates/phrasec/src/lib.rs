pub mod compiler;
pub mod docblock;
pub mod nodes;
pub mod parser;
pub mod types;

pub use compiler::{
    BatchReport, CompileError, CompiledPhrase, CompilerConfig, Payload, PhraseCompiler,
    compile, compute_suggestions, variation_axes,
};
pub use docblock::{FileOptions, parse_docblock};
pub use nodes::{Construct, PhraseNode, PhraseOptions};
pub use parser::{ParseError, parse_expr};
pub use types::{Expr, Location, TokenName};
