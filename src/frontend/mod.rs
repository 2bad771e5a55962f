//! Frontend module - Lexer, Parser, Semantic Analysis

pub mod token;
pub mod lexer;
pub mod ast;
pub mod ast_printer;
pub mod parser;
pub mod semantic;
