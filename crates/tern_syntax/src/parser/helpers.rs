//! 解析器内部的小工具：向前看、期望某个 token、读标识符、嵌套深度、语句分隔。

use super::decl::DeclarationContext;
use super::error::{ParseErrorKind, ParseResult};
use super::Parser;
use crate::token::{KeywordKind, Punctuator, Token, TokenKind};

impl Parser {
    pub(super) fn current_kind(&self) -> Option<&TokenKind> {
        self.stream.current().map(|t| &t.kind)
    }

    pub(super) fn current_is_punctuator(&self, punctuator: Punctuator) -> bool {
        self.stream
            .current()
            .is_some_and(|t| t.is_punctuator(punctuator))
    }

    pub(super) fn current_is_keyword(&self, name: &str) -> bool {
        self.stream.current().is_some_and(|t| t.is_keyword(name))
    }

    /// 紧跟在当前 token 后面（中间没有空白）的 token
    pub(super) fn next_adjacent(&self) -> Option<&Token> {
        self.stream.remaining().first()
    }

    pub(super) fn next_adjacent_is_punctuator(&self, punctuator: Punctuator) -> bool {
        self.next_adjacent()
            .is_some_and(|t| t.is_punctuator(punctuator))
    }

    pub(super) fn next_is_punctuator(&self, punctuator: Punctuator, skip_line_breaks: bool) -> bool {
        self.stream
            .peek_significant(skip_line_breaks)
            .is_some_and(|t| t.is_punctuator(punctuator))
    }

    pub(super) fn next_is_keyword(&self, name: &str, skip_line_breaks: bool) -> bool {
        self.stream
            .peek_significant(skip_line_breaks)
            .is_some_and(|t| t.is_keyword(name))
    }

    /// 越过当前 token，再跳过空白。
    /// `skip_line_breaks == false` 时停在换行上。
    pub(super) fn advance(&mut self, skip_line_breaks: bool) {
        self.stream.shift();
        while let Some(token) = self.stream.current() {
            let skip = if skip_line_breaks {
                token.is_whitespace()
            } else {
                token.is_inline_whitespace()
            };
            if !skip {
                break;
            }
            self.stream.shift();
        }
    }

    /// 前进到下一个有意义的 token，并要求它是 `punctuator`
    pub(super) fn expect_next_punctuator(&mut self, punctuator: Punctuator) -> ParseResult<()> {
        self.advance(true);
        self.expect_current_punctuator(punctuator)
    }

    pub(super) fn expect_current_punctuator(&self, punctuator: Punctuator) -> ParseResult<()> {
        if self.current_is_punctuator(punctuator) {
            Ok(())
        } else {
            Err(self
                .stream
                .error(ParseErrorKind::ExpectedToken(punctuator.to_string())))
        }
    }

    pub(super) fn expect_next_keyword(&mut self, name: &str) -> ParseResult<()> {
        self.advance(true);
        if self.current_is_keyword(name) {
            Ok(())
        } else {
            Err(self
                .stream
                .error(ParseErrorKind::ExpectedToken(format!("`{}`", name))))
        }
    }

    /// 当前 token 是标识符时返回名字（反引号标识符也算）。
    /// `include_contextual` 为真时上下文关键字也当作标识符。
    pub(super) fn read_identifier(&self, include_contextual: bool) -> Option<String> {
        match self.current_kind()? {
            TokenKind::Identifier(name) | TokenKind::BacktickIdentifier(name) => Some(name.clone()),
            TokenKind::Keyword(name, KeywordKind::Contextual) if include_contextual => {
                Some(name.clone())
            }
            _ => None,
        }
    }

    pub(super) fn expect_identifier(&self) -> ParseResult<String> {
        self.read_identifier(true)
            .ok_or_else(|| self.stream.error(ParseErrorKind::MissingIdentifier))
    }

    /// 进入一层嵌套；超过配置的上限时报错而不是继续递归
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= self.config.max_depth {
            return Err(self.stream.error(ParseErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// 语句/声明之后必须是 `;`、换行或输入结束。
    /// 代码块和类型体里，`}` 也可以结束语句，且不被消费。
    pub(super) fn ensure_statement_separator(&mut self, context: DeclarationContext) -> ParseResult<()> {
        self.stream.shift();
        while let Some(token) = self.stream.current() {
            match &token.kind {
                TokenKind::Punctuator(Punctuator::Semi) => return Ok(()),
                TokenKind::Punctuator(Punctuator::RightBrace) if context.is_nested() => {
                    return self.stream.unshift();
                }
                TokenKind::LineFeed | TokenKind::CarriageReturn => return Ok(()),
                _ if token.is_whitespace() => self.stream.shift(),
                _ => {
                    self.stream.unshift()?;
                    return Err(self.stream.error(ParseErrorKind::MissingSeparator));
                }
            }
        }
        Ok(())
    }

    /// 块内出错后跳到下一个语句边界：换行、`;`，或本层的 `}`（停在它前面）
    pub(super) fn synchronize(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.stream.current() {
            match &token.kind {
                TokenKind::Punctuator(Punctuator::LeftBrace) => depth += 1,
                TokenKind::Punctuator(Punctuator::RightBrace) if depth == 0 => {
                    let _ = self.stream.unshift();
                    return;
                }
                TokenKind::Punctuator(Punctuator::RightBrace) => depth -= 1,
                TokenKind::LineFeed
                | TokenKind::CarriageReturn
                | TokenKind::Punctuator(Punctuator::Semi)
                    if depth == 0 =>
                {
                    return
                }
                _ => {}
            }
            self.stream.shift();
        }
    }
}
