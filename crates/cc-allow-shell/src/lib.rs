//! Bash parsing and analysis (§3, §4.3, §4.4).
//!
//! A command string is parsed with `tree-sitter-bash` and walked in two
//! passes — once to collect user-defined function names, once to emit a
//! flat [`ExtractionRecord`] of commands, redirects and heredocs with
//! effective cwd and pipe topology already resolved. [`resolve`] then
//! classifies each extracted command name as a builtin, an explicit
//! path, or a `$PATH` lookup.

mod ast;
mod resolve;

pub use ast::Command;
pub use ast::ExtractionRecord;
pub use ast::Heredoc;
pub use ast::Redirect;
pub use ast::RedirectKind;
pub use ast::Result;
pub use ast::extract;
pub use resolve::CommandResolver;
pub use resolve::ResolvedCommand;
