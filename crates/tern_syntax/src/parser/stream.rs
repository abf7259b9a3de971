//! Token stream navigator for the hand-written parser.
//!
//! 一个 token 数组加一个游标：游标之前是已消费的，游标处是当前 token，
//! 之后是尚未消费的。`shift` / `unshift` 互为逆操作，回溯只允许一步一步退。

use tern_diagnostics::Span;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::source::{SourceLocation, SourceRange};
use crate::token::Token;

#[derive(Debug, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    /// 当前 token 的下标；`None` 表示还没开始，`Some(len)` 表示已到末尾
    cursor: Option<usize>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            cursor: None,
        }
    }

    /// 换一批 token，回到初始状态
    pub fn reset(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
        self.cursor = None;
    }

    pub fn current(&self) -> Option<&Token> {
        self.cursor.and_then(|index| self.tokens.get(index))
    }

    /// 当前 token 进入已消费部分，下一个 token 成为当前 token。
    /// 到达末尾后再调用不会有任何变化。
    pub fn shift(&mut self) {
        let next = self.cursor.map_or(0, |index| index + 1);
        self.cursor = Some(next.min(self.tokens.len()));
    }

    /// 撤销最近一次 `shift`
    pub fn unshift(&mut self) -> ParseResult<()> {
        match self.cursor {
            Some(index) if index < self.tokens.len() => {
                self.cursor = index.checked_sub(1);
                Ok(())
            }
            _ => Err(self.error(ParseErrorKind::Internal)),
        }
    }

    /// 尚未消费的 token（不含当前 token），按顺序
    pub fn remaining(&self) -> &[Token] {
        let start = self.cursor.map_or(0, |index| (index + 1).min(self.tokens.len()));
        &self.tokens[start..]
    }

    /// 已消费的 token，按顺序
    pub fn consumed(&self) -> &[Token] {
        let end = self.cursor.unwrap_or(0).min(self.tokens.len());
        &self.tokens[..end]
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_some() && self.current().is_none()
    }

    /// 越过当前 token，再跳过后面所有空白
    pub fn skip_whitespace(&mut self) {
        self.shift();
        self.skip_current_whitespace();
    }

    /// 当前 token 是空白时一直前进
    pub fn skip_current_whitespace(&mut self) {
        while self.current().is_some_and(Token::is_whitespace) {
            self.shift();
        }
    }

    /// 去掉开头的空白，不改变导航器状态
    pub fn peek_skipping_whitespace(tokens: &[Token]) -> &[Token] {
        let start = tokens
            .iter()
            .position(|t| !t.is_whitespace())
            .unwrap_or(tokens.len());
        &tokens[start..]
    }

    /// 当前 token 之后第一个有意义的 token。
    /// `skip_line_breaks == false` 时遇到换行就停下并返回换行本身。
    pub fn peek_significant(&self, skip_line_breaks: bool) -> Option<&Token> {
        self.remaining().iter().find(|t| {
            if skip_line_breaks {
                !t.is_whitespace()
            } else {
                !t.is_inline_whitespace()
            }
        })
    }

    /// 当前位置的字节范围；在末尾时是输入结尾处的空范围
    pub fn current_span(&self) -> Span {
        match self.current() {
            Some(token) => token.span.clone(),
            None => {
                let end = self.tokens.last().map_or(0, |t| t.span.end);
                end..end
            }
        }
    }

    pub fn current_range(&self) -> SourceRange {
        match self.current() {
            Some(token) => token.range,
            None => {
                let end = self.end_location();
                SourceRange::new(end, end)
            }
        }
    }

    /// 当前 token 的起点
    pub fn current_start(&self) -> SourceLocation {
        self.current_range().start
    }

    /// 从 `start` 到当前 token 结束的范围（当前 token 是节点最后一个 token）
    pub fn range_from(&self, start: SourceLocation) -> SourceRange {
        let end = match self.current() {
            Some(token) => token.range.end,
            None => self.end_location(),
        };
        SourceRange::new(start, end)
    }

    fn end_location(&self) -> SourceLocation {
        self.tokens
            .last()
            .map_or_else(SourceLocation::default, |t| t.range.end)
    }

    /// 在当前位置构造错误
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current_span(), self.current_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn snapshot(stream: &TokenStream) -> (Option<Token>, usize, usize) {
        (
            stream.current().cloned(),
            stream.consumed().len(),
            stream.remaining().len(),
        )
    }

    #[test]
    fn test_shift_unshift_are_inverse() {
        let mut stream = TokenStream::new(lex("import A.B"));
        let initial = snapshot(&stream);

        stream.shift();
        stream.shift();
        stream.shift();
        let middle = snapshot(&stream);

        stream.unshift().unwrap();
        stream.shift();
        assert_eq!(snapshot(&stream), middle);

        stream.unshift().unwrap();
        stream.unshift().unwrap();
        stream.unshift().unwrap();
        assert_eq!(snapshot(&stream), initial);
    }

    #[test]
    fn test_tokens_are_never_lost() {
        let tokens = lex("import struct A.B.C");
        let mut stream = TokenStream::new(tokens.clone());
        for _ in 0..4 {
            stream.shift();
        }

        let mut rebuilt: Vec<Token> = stream.consumed().to_vec();
        rebuilt.extend(stream.current().cloned());
        rebuilt.extend(stream.remaining().iter().cloned());
        assert_eq!(rebuilt, tokens);
    }

    #[test]
    fn test_unshift_without_current_is_internal_error() {
        let mut stream = TokenStream::new(lex("a"));
        assert_eq!(stream.unshift().unwrap_err().kind, ParseErrorKind::Internal);

        stream.shift();
        stream.shift();
        assert!(stream.is_at_end());
        assert_eq!(stream.unshift().unwrap_err().kind, ParseErrorKind::Internal);
    }

    #[test]
    fn test_shift_at_end_is_noop() {
        let mut stream = TokenStream::new(lex("a"));
        stream.shift();
        stream.shift();
        stream.shift();
        assert!(stream.current().is_none());
        assert_eq!(stream.consumed().len(), 1);
    }

    #[test]
    fn test_peek_skipping_whitespace_does_not_move() {
        let mut stream = TokenStream::new(lex("@  foo\n import"));
        stream.shift();
        let before = snapshot(&stream);

        let peeked = TokenStream::peek_skipping_whitespace(stream.remaining());
        assert!(matches!(&peeked[0].kind, crate::token::TokenKind::Identifier(n) if n == "foo"));
        assert_eq!(snapshot(&stream), before);
    }

    #[test]
    fn test_skip_whitespace() {
        let mut stream = TokenStream::new(lex("import \t A"));
        stream.shift();
        stream.skip_whitespace();
        assert!(matches!(
            stream.current().map(|t| &t.kind),
            Some(crate::token::TokenKind::Identifier(name)) if name == "A"
        ));
    }
}
