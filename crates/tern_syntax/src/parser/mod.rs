//! Parser Module
//!
//! 手写递归下降解析器。
//!
//! - `stream`: token 导航器 (shift / unshift / 向前看)
//! - `error`: 错误种类与诊断转换
//! - `decl`: 声明起始判定、特性、分派、import 等具体声明
//! - `stmt`: 语句与代码块，块内局部错误恢复
//! - `expr` / `pattern` / `types`: 表达式、模式、类型标注
//!
//! 约定：每个具体解析函数开始时当前 token 是该结构的第一个 token，
//! 返回时当前 token 是该结构的最后一个 token。

mod decl;
mod error;
mod expr;
mod helpers;
mod pattern;
mod stmt;
mod stream;
mod types;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use stream::TokenStream;

use tern_diagnostics::{Diagnostic, DiagnosticSink};
use tracing::debug;

use crate::ast::{Declaration, TopLevelDeclaration};
use crate::lexer::lex;
use crate::source::SourceRange;
use crate::token::{Token, TokenKind};
use decl::{is_start_of_declaration, DeclarationContext};

/// 解析器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// 代码块、括号、模式、类型的最大嵌套层数
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// 一次解析的结果：部分或完整的 AST + 按发现顺序排列的错误
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub root: TopLevelDeclaration,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 人类可读的错误消息，顺序与发现顺序一致
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ParseError::message).collect()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(ParseError::to_diagnostic).collect()
    }

    /// 收集到统一的诊断收集器
    pub fn into_sink(self) -> DiagnosticSink {
        let mut sink = DiagnosticSink::new();
        sink.extend(self.errors.iter().map(ParseError::to_diagnostic));
        sink
    }
}

/// 解析器实例可重复使用：每次解析开始时重置所有内部缓冲区。
/// 同一实例不能被并发调用。
#[derive(Debug, Default)]
pub struct Parser {
    stream: TokenStream,
    top_level: TopLevelDeclaration,
    errors: Vec<ParseError>,
    config: ParserConfig,
    depth: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// 清空导航器、顶层声明和错误列表
    pub fn reset(&mut self, tokens: Vec<Token>) {
        self.stream.reset(tokens);
        self.top_level = TopLevelDeclaration::new();
        self.errors.clear();
        self.depth = 0;
    }

    /// 词法分析 + 解析
    pub fn parse(&mut self, text: &str) -> ParseOutput {
        self.parse_tokens(lex(text))
    }

    /// 解析一段已经分好的 token
    pub fn parse_tokens(&mut self, tokens: Vec<Token>) -> ParseOutput {
        let root_range = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => SourceRange::new(first.range.start, last.range.end),
            _ => SourceRange::default(),
        };
        debug!(tokens = tokens.len(), "parse started");
        self.reset(tokens);

        self.stream.shift();
        while let Some(token) = self.stream.current() {
            let invalid = matches!(token.kind, TokenKind::Invalid(_));
            let result = if is_start_of_declaration(Some(token), self.stream.remaining()) {
                self.parse_top_level_declaration()
            } else if invalid {
                Err(self.stream.error(ParseErrorKind::Unknown))
            } else {
                Ok(())
            };
            if let Err(error) = result {
                self.record(error);
            }
            self.stream.shift();
        }

        self.top_level.range = root_range;
        let output = ParseOutput {
            root: std::mem::take(&mut self.top_level),
            errors: std::mem::take(&mut self.errors),
        };
        debug!(
            declarations = output.root.len(),
            errors = output.errors.len(),
            "parse finished"
        );
        output
    }

    fn parse_top_level_declaration(&mut self) -> ParseResult<()> {
        // 先追加已经构造出的声明，再上报错误
        let mut parsed: Vec<Declaration> = Vec::new();
        let result = self.parse_declaration(DeclarationContext::TopLevel, &mut parsed);
        for declaration in parsed {
            self.top_level.append(declaration);
        }
        result
    }

    /// 记录一个错误，解析继续
    fn record(&mut self, error: ParseError) {
        debug!(
            code = error.kind.code(),
            start = error.span.start,
            end = error.span.end,
            "recovered from parse error: {}",
            error.kind
        );
        self.errors.push(error);
    }
}

/// 用一个新的解析器解析源码
pub fn parse(text: &str) -> ParseOutput {
    Parser::new().parse(text)
}
