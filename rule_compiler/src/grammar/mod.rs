//! Vocabulary of the rule language shared by the lexer and parser

pub mod keywords;

pub use keywords::{is_integer_function, is_reserved_keyword, Keyword};
