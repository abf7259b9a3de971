//! Statements
//!
//! 代码块里的语句逐条解析；某条语句出错时记录错误，跳到下一个语句边界继续，
//! 错误不会越过所在的代码块。

use tracing::trace;

use super::decl::{is_start_of_declaration, DeclarationContext};
use super::error::{ParseErrorKind, ParseResult};
use super::Parser;
use crate::ast::{
    CaseItem, CatchClause, CodeBlock, CompilerControlKind, Condition, ElseClause, Expression,
    Statement, StatementKind, SwitchCase,
};
use crate::token::{Punctuator, Token, TokenKind};

fn is_case_terminator(token: &Token) -> bool {
    token.is_punctuator(Punctuator::RightBrace)
        || token.is_keyword("case")
        || token.is_keyword("default")
}

fn is_block_terminator(token: &Token) -> bool {
    token.is_punctuator(Punctuator::RightBrace)
}

impl Parser {
    /// 当前 token 是 `{`，返回时是对应的 `}`
    pub(super) fn parse_code_block(&mut self) -> ParseResult<CodeBlock> {
        self.expect_current_punctuator(Punctuator::LeftBrace)?;
        self.nested(|parser| {
            let start = parser.stream.current_start();
            let statements = parser.parse_statements(is_block_terminator)?;
            Ok(CodeBlock {
                statements,
                range: parser.stream.range_from(start),
            })
        })
    }

    /// 从当前 token 之后开始读语句，直到 `stop` 成立的 token（停在它上面，不消费）
    fn parse_statements(&mut self, stop: fn(&Token) -> bool) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            self.stream.skip_whitespace();
            let Some(token) = self.stream.current() else {
                return Err(self
                    .stream
                    .error(ParseErrorKind::ExpectedToken(Punctuator::RightBrace.to_string())));
            };
            if stop(token) {
                return Ok(statements);
            }
            if token.is_punctuator(Punctuator::Semi) {
                continue;
            }

            if let Err(error) = self.parse_statement_into(&mut statements) {
                self.record(error);
                self.synchronize();
            }
        }
    }

    /// 一条语句（含分隔符检查）。块内声明和顶层一样先保留已构造的部分
    fn parse_statement_into(&mut self, statements: &mut Vec<Statement>) -> ParseResult<()> {
        if is_start_of_declaration(self.stream.current(), self.stream.remaining()) {
            let mut declarations = Vec::new();
            let result = self.parse_declaration(DeclarationContext::CodeBlock, &mut declarations);
            statements.extend(declarations.into_iter().map(|declaration| {
                let range = declaration.range;
                Statement::new(StatementKind::Declaration(Box::new(declaration)), range)
            }));
            return result;
        }

        let statement = self.parse_statement()?;
        statements.push(statement);
        self.ensure_statement_separator(DeclarationContext::CodeBlock)
    }

    /// 当前 token 是语句的第一个 token，返回时是最后一个
    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let start = self.stream.current_start();

        if self.current_is_punctuator(Punctuator::Hash) {
            let kind = self.parse_compiler_control()?;
            return Ok(Statement::new(
                StatementKind::CompilerControl(kind),
                self.stream.range_from(start),
            ));
        }

        // outer: while ...
        if let Some(label) = self.read_identifier(false) {
            if self.next_is_punctuator(Punctuator::Colon, false) {
                self.advance(false);
                self.advance(true);
                let statement = self.parse_statement()?;
                return Ok(Statement::new(
                    StatementKind::Labeled {
                        label,
                        statement: Box::new(statement),
                    },
                    self.stream.range_from(start),
                ));
            }
        }

        let keyword = match self.current_kind() {
            Some(TokenKind::Keyword(name, _)) => Some(name.clone()),
            _ => None,
        };
        let kind = match keyword.as_deref() {
            Some("break") => StatementKind::Break {
                label: self.parse_jump_label(),
            },
            Some("continue") => StatementKind::Continue {
                label: self.parse_jump_label(),
            },
            Some("fallthrough") => StatementKind::Fallthrough,
            Some("return") => StatementKind::Return(self.parse_return_value()?),
            Some("throw") => {
                self.advance(true);
                StatementKind::Throw(self.parse_expression()?)
            }
            Some("defer") => {
                self.advance(true);
                StatementKind::Defer(self.parse_code_block()?)
            }
            Some("do") => self.parse_do()?,
            Some("if") => self.parse_if()?,
            Some("guard") => self.parse_guard()?,
            Some("while") => self.parse_while()?,
            Some("repeat") => self.parse_repeat_while()?,
            Some("for") => self.parse_for_in()?,
            Some("switch") => self.parse_switch()?,
            _ => StatementKind::Expression(self.parse_expression()?),
        };
        trace!(start = %start, "parsed statement");
        Ok(Statement::new(kind, self.stream.range_from(start)))
    }

    /// `break outer`：标签必须在同一行
    fn parse_jump_label(&mut self) -> Option<String> {
        let is_label = self
            .stream
            .peek_significant(false)
            .is_some_and(|t| matches!(t.kind, TokenKind::Identifier(_)));
        if !is_label {
            return None;
        }
        self.advance(false);
        self.read_identifier(false)
    }

    fn parse_return_value(&mut self) -> ParseResult<Option<Expression>> {
        let has_value = self.stream.peek_significant(false).is_some_and(|t| {
            !t.is_line_break()
                && !t.is_punctuator(Punctuator::Semi)
                && !t.is_punctuator(Punctuator::RightBrace)
                && !t.is_keyword("case")
                && !t.is_keyword("default")
        });
        if !has_value {
            return Ok(None);
        }
        self.advance(false);
        Ok(Some(self.parse_expression()?))
    }

    /// 条件之后的 `{ ... }`
    fn parse_body_after_conditions(&mut self) -> ParseResult<CodeBlock> {
        self.expect_next_punctuator(Punctuator::LeftBrace)?;
        self.parse_code_block()
    }

    fn parse_if(&mut self) -> ParseResult<StatementKind> {
        self.advance(true);
        let conditions = self.parse_conditions()?;
        let body = self.parse_body_after_conditions()?;

        let mut else_clause = None;
        if self.next_is_keyword("else", true) {
            self.advance(true);
            self.advance(true);
            if self.current_is_keyword("if") {
                let start = self.stream.current_start();
                let nested = self.nested(|parser| parser.parse_if())?;
                let statement = Statement::new(nested, self.stream.range_from(start));
                else_clause = Some(ElseClause::ElseIf(Box::new(statement)));
            } else if self.current_is_punctuator(Punctuator::LeftBrace) {
                else_clause = Some(ElseClause::Else(self.parse_code_block()?));
            } else {
                return Err(self
                    .stream
                    .error(ParseErrorKind::ExpectedToken("`{` or `if`".to_string())));
            }
        }

        Ok(StatementKind::If {
            conditions,
            body,
            else_clause,
        })
    }

    fn parse_guard(&mut self) -> ParseResult<StatementKind> {
        self.advance(true);
        let conditions = self.parse_conditions()?;
        self.expect_next_keyword("else")?;
        let body = self.parse_body_after_conditions()?;
        Ok(StatementKind::Guard { conditions, body })
    }

    fn parse_while(&mut self) -> ParseResult<StatementKind> {
        self.advance(true);
        let conditions = self.parse_conditions()?;
        let body = self.parse_body_after_conditions()?;
        Ok(StatementKind::While { conditions, body })
    }

    /// `repeat { ... } while cond`
    fn parse_repeat_while(&mut self) -> ParseResult<StatementKind> {
        self.advance(true);
        let body = self.parse_code_block()?;
        self.expect_next_keyword("while")?;
        self.advance(true);
        let condition = self.parse_expression()?;
        Ok(StatementKind::RepeatWhile { body, condition })
    }

    /// `for [case] pattern in collection [where cond] { ... }`
    fn parse_for_in(&mut self) -> ParseResult<StatementKind> {
        self.advance(true);
        let is_case_matching = self.current_is_keyword("case");
        let pattern = if is_case_matching {
            self.advance(true);
            self.parse_pattern(false)?
        } else {
            self.parse_declaration_pattern()?
        };

        self.expect_next_keyword("in")?;
        self.advance(true);
        let collection = self.parse_expression()?;
        let where_clause = self.parse_where_clause()?;
        let body = self.parse_body_after_conditions()?;

        Ok(StatementKind::ForIn {
            is_case_matching,
            pattern,
            collection,
            where_clause,
            body,
        })
    }

    fn parse_where_clause(&mut self) -> ParseResult<Option<Expression>> {
        if !self.next_is_keyword("where", true) {
            return Ok(None);
        }
        self.advance(true);
        self.advance(true);
        Ok(Some(self.parse_expression()?))
    }

    /// `do { ... } catch pattern where cond { ... }`
    fn parse_do(&mut self) -> ParseResult<StatementKind> {
        self.advance(true);
        let body = self.parse_code_block()?;

        let mut catches = Vec::new();
        while self.next_is_keyword("catch", true) {
            self.advance(true);
            let has_pattern = self.stream.peek_significant(true).is_some_and(|t| {
                !t.is_punctuator(Punctuator::LeftBrace) && !t.is_keyword("where")
            });
            let pattern = if has_pattern {
                self.advance(true);
                Some(self.parse_pattern(false)?)
            } else {
                None
            };
            let where_clause = self.parse_where_clause()?;
            let body = self.parse_body_after_conditions()?;
            catches.push(CatchClause {
                pattern,
                where_clause,
                body,
            });
        }

        Ok(StatementKind::Do { body, catches })
    }

    /// `switch x { case a, b where c: ... default: ... }`
    fn parse_switch(&mut self) -> ParseResult<StatementKind> {
        self.advance(true);
        let expression = self.parse_expression()?;
        self.expect_next_punctuator(Punctuator::LeftBrace)?;

        let cases = self.nested(|parser| {
            let mut cases = Vec::new();
            parser.stream.skip_whitespace();
            loop {
                let Some(token) = parser.stream.current() else {
                    return Err(parser
                        .stream
                        .error(ParseErrorKind::ExpectedToken(Punctuator::RightBrace.to_string())));
                };
                if token.is_punctuator(Punctuator::RightBrace) {
                    return Ok(cases);
                }
                if token.is_keyword("case") {
                    let items = parser.parse_case_items()?;
                    parser.expect_next_punctuator(Punctuator::Colon)?;
                    let statements = parser.parse_statements(is_case_terminator)?;
                    cases.push(SwitchCase::Case { items, statements });
                } else if token.is_keyword("default") {
                    parser.expect_next_punctuator(Punctuator::Colon)?;
                    let statements = parser.parse_statements(is_case_terminator)?;
                    cases.push(SwitchCase::Default { statements });
                } else {
                    return Err(parser.stream.error(ParseErrorKind::ExpectedToken(
                        "`case` or `default`".to_string(),
                    )));
                }
            }
        })?;

        Ok(StatementKind::Switch { expression, cases })
    }

    /// 当前 token 是 `case`，返回时是最后一个 item 的最后一个 token
    fn parse_case_items(&mut self) -> ParseResult<Vec<CaseItem>> {
        let mut items = Vec::new();
        loop {
            self.advance(true);
            let pattern = self.parse_pattern(false)?;
            let where_clause = self.parse_where_clause()?;
            items.push(CaseItem {
                pattern,
                where_clause,
            });
            if !self.next_is_punctuator(Punctuator::Comma, true) {
                return Ok(items);
            }
            self.advance(true);
        }
    }

    /// if / guard / while 的条件列表，逗号分隔
    pub(super) fn parse_conditions(&mut self) -> ParseResult<Vec<Condition>> {
        let mut conditions = Vec::new();
        loop {
            let condition = if self.current_is_keyword("case") {
                self.advance(true);
                let pattern = self.parse_pattern(false)?;
                self.expect_next_punctuator(Punctuator::Equal)?;
                self.advance(true);
                Condition::Case(pattern, self.parse_expression()?)
            } else if self.current_is_keyword("let") || self.current_is_keyword("var") {
                let mutable = self.current_is_keyword("var");
                self.advance(true);
                let pattern = self.parse_declaration_pattern()?;
                self.expect_next_punctuator(Punctuator::Equal)?;
                self.advance(true);
                Condition::OptionalBinding {
                    mutable,
                    pattern,
                    initializer: self.parse_expression()?,
                }
            } else {
                Condition::Expression(self.parse_expression()?)
            };
            conditions.push(condition);

            if !self.next_is_punctuator(Punctuator::Comma, false) {
                return Ok(conditions);
            }
            self.advance(false);
            self.advance(true);
        }
    }

    /// `#if cond` / `#elseif cond` / `#else` / `#endif` / `#sourceLocation(file: "a", line: 1)`
    fn parse_compiler_control(&mut self) -> ParseResult<CompilerControlKind> {
        let directive = match self.next_adjacent().map(|t| &t.kind) {
            Some(TokenKind::Identifier(name)) | Some(TokenKind::Keyword(name, _)) => name.clone(),
            _ => {
                self.stream.shift();
                return Err(self
                    .stream
                    .error(ParseErrorKind::ExpectedToken("compiler control directive".to_string())));
            }
        };
        self.stream.shift();

        match directive.as_str() {
            "if" => Ok(CompilerControlKind::If(self.read_rest_of_line())),
            "elseif" => Ok(CompilerControlKind::ElseIf(self.read_rest_of_line())),
            "else" => Ok(CompilerControlKind::Else),
            "endif" => Ok(CompilerControlKind::EndIf),
            "sourceLocation" => self.parse_source_location(),
            _ => Err(self
                .stream
                .error(ParseErrorKind::ExpectedToken("compiler control directive".to_string()))),
        }
    }

    /// 本行剩下的 token 原样拼成文本，返回时当前 token 是本行最后一个 token
    fn read_rest_of_line(&mut self) -> String {
        let mut text = String::new();
        while let Some(token) = self.stream.remaining().first() {
            if token.is_line_break() {
                break;
            }
            if !matches!(token.kind, TokenKind::Comment(_)) {
                text.push_str(&token.kind.source_text());
            }
            self.stream.shift();
        }
        text.trim().to_string()
    }

    /// 当前 token 是 `sourceLocation`
    fn parse_source_location(&mut self) -> ParseResult<CompilerControlKind> {
        self.expect_next_punctuator(Punctuator::LeftParen)?;
        self.advance(true);
        if self.current_is_punctuator(Punctuator::RightParen) {
            return Ok(CompilerControlKind::SourceLocation {
                file_name: None,
                line_number: None,
            });
        }

        self.expect_label("file")?;
        let file_name = match self.current_kind() {
            Some(TokenKind::StringLiteral(text)) => text.clone(),
            _ => {
                return Err(self
                    .stream
                    .error(ParseErrorKind::ExpectedToken("string literal".to_string())))
            }
        };
        self.expect_next_punctuator(Punctuator::Comma)?;
        self.advance(true);
        self.expect_label("line")?;
        let line_number = match self.current_kind() {
            Some(TokenKind::IntegerLiteral(text)) => text.replace('_', "").parse::<usize>().ok(),
            _ => None,
        };
        let Some(line_number) = line_number else {
            return Err(self
                .stream
                .error(ParseErrorKind::ExpectedToken("line number".to_string())));
        };
        self.expect_next_punctuator(Punctuator::RightParen)?;

        Ok(CompilerControlKind::SourceLocation {
            file_name: Some(file_name),
            line_number: Some(line_number),
        })
    }

    /// 当前 token 必须是 `name`，后面跟 `:`；返回时当前 token 是值
    fn expect_label(&mut self, name: &str) -> ParseResult<()> {
        if self.read_identifier(true).as_deref() != Some(name) {
            return Err(self
                .stream
                .error(ParseErrorKind::ExpectedToken(format!("`{}`", name))));
        }
        self.expect_next_punctuator(Punctuator::Colon)?;
        self.advance(true);
        Ok(())
    }
}
