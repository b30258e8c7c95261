//! Pattern matching core for the cc-allow permission engine.
//!
//! This crate has no internal dependencies other than [`cc_allow_error`]; it
//! sits at the bottom of the workspace and defines the vocabulary every
//! other crate shares: [`Action`], [`Tool`], [`Pattern`], [`BoolExpr`], and
//! the [`MatchContext`] they're evaluated against.

mod action;
mod alias;
mod bool_expr;
mod context;
mod matcher;
mod pattern;
mod tool;

pub use action::Action;
pub use alias::AliasTable;
pub use bool_expr::BoolExpr;
pub use context::MatchContext;
pub use context::PathVars;
pub use matcher::Matcher;
pub use pattern::FileRuleKind;
pub use pattern::Pattern;
pub use tool::Tool;
