//! Template and definition file parser.
//!
//! Produces the public AST in [`ast`], which the interpreter validates and
//! evaluates and which tooling can inspect directly.

pub mod ast;
pub mod error;
mod file;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use file::parse_file;
pub use template::parse_template;
