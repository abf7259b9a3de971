//! Tern Syntax
//!
//! Swift 风格源码的前端：词法分析、手写递归下降解析、AST 和文本 dump。
//!
//! ```
//! use tern_syntax::{parse, TtyDump};
//!
//! let output = parse("import Foundation.Data\n");
//! assert!(output.errors.is_empty());
//! assert_eq!(output.root.declarations.len(), 1);
//! println!("{}", output.root.tty_dump());
//! ```

pub mod ast;
pub mod dump;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token;

pub use dump::TtyDump;
pub use lexer::lex;
pub use parser::{parse, ParseError, ParseErrorKind, ParseOutput, Parser, ParserConfig};
pub use source::{LineIndex, SourceLocation, SourceRange};
pub use token::{KeywordKind, Punctuator, Token, TokenKind};
