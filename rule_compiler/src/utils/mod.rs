//! Shared primitive types used by the lexer and token stream

pub mod span;

pub use span::{Position, Span};
