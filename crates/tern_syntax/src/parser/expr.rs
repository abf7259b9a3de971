//! Expressions
//!
//! 优先级爬升 (precedence climbing)：
//!
//! | 运算符 | 优先级 | 结合性 |
//! |---|---|---|
//! | `=` `+=` `-=` ... | 90 | 右 |
//! | 未知运算符 | 100 | 左 |
//! | `\|\|` | 110 | 左 |
//! | `&&` | 120 | 左 |
//! | `==` `<` ... | 130 | 左 |
//! | `??` | 131 | 右 |
//! | `...` `..<` | 135 | 左 |
//! | `+` `-` `\|` `^` | 140 | 左 |
//! | `*` `/` `%` `&` | 150 | 左 |
//! | `<<` `>>` | 160 | 左 |
//!
//! 二元运算符必须和左操作数在同一行，两侧空白要对称：
//! 只有左边有空白的运算符是下一个操作数的前缀。

use super::error::{ParseErrorKind, ParseResult};
use super::Parser;
use crate::ast::{Argument, Expression, ExpressionKind, LiteralKind, TryKind};
use crate::token::{KeywordKind, Punctuator, Token, TokenKind};

const ASSIGNMENT_PRECEDENCE: u8 = 90;

/// 返回 (优先级, 是否右结合)
fn infix_precedence(operator: &str) -> (u8, bool) {
    match operator {
        "=" | "*=" | "/=" | "%=" | "+=" | "-=" | "<<=" | ">>=" | "&=" | "|=" | "^=" => {
            (ASSIGNMENT_PRECEDENCE, true)
        }
        "||" => (110, false),
        "&&" => (120, false),
        "==" | "!=" | "===" | "!==" | "<" | "<=" | ">" | ">=" | "~=" => (130, false),
        "??" => (131, true),
        "..." | "..<" => (135, false),
        "+" | "-" | "&+" | "&-" | "|" | "^" => (140, false),
        "*" | "/" | "%" | "&*" | "&" => (150, false),
        "<<" | ">>" => (160, false),
        _ => (100, false),
    }
}

impl Parser {
    /// 当前 token 是表达式的第一个 token，返回时是最后一个
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.nested(|parser| parser.parse_binary(0))
    }

    /// 不含顶层赋值：模式、默认参数里 `=` 属于外层语法
    pub(super) fn parse_expression_without_assignment(&mut self) -> ParseResult<Expression> {
        self.nested(|parser| parser.parse_binary(ASSIGNMENT_PRECEDENCE + 1))
    }

    fn parse_binary(&mut self, min_precedence: u8) -> ParseResult<Expression> {
        let start = self.stream.current_start();
        let mut lhs = self.parse_prefix()?;

        while let Some(operator) = self.peek_binary_operator() {
            let (precedence, right_associative) = infix_precedence(&operator);
            if precedence < min_precedence {
                break;
            }
            self.advance(false);
            self.advance(true);

            let next_min = if right_associative {
                precedence
            } else {
                precedence + 1
            };
            let rhs = self.nested(|parser| parser.parse_binary(next_min))?;
            let range = self.stream.range_from(start);
            let kind = if operator == "=" {
                ExpressionKind::Assignment {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }
            } else {
                ExpressionKind::Binary {
                    operator,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }
            };
            lhs = Expression::new(kind, range);
        }
        Ok(lhs)
    }

    /// 同一行上的下一个二元运算符（不移动导航器）
    fn peek_binary_operator(&self) -> Option<String> {
        let remaining = self.stream.remaining();
        let spaced_before = remaining.first().is_some_and(Token::is_inline_whitespace);
        let index = remaining.iter().position(|t| !t.is_inline_whitespace())?;
        let operator = match &remaining[index].kind {
            TokenKind::Operator(op) => op.clone(),
            TokenKind::Punctuator(Punctuator::Equal) => "=".to_string(),
            _ => return None,
        };
        let spaced_after = remaining.get(index + 1).map_or(true, Token::is_whitespace);
        if spaced_before != spaced_after {
            return None;
        }
        Some(operator)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        let start = self.stream.current_start();

        if self.current_is_keyword("try") {
            let kind = if self.next_adjacent_is_punctuator(Punctuator::Question) {
                self.stream.shift();
                TryKind::Optional
            } else if self.next_adjacent_is_punctuator(Punctuator::Exclaim) {
                self.stream.shift();
                TryKind::Forced
            } else {
                TryKind::Try
            };
            self.advance(true);
            let expression = self.nested(|parser| parser.parse_binary(0))?;
            return Ok(Expression::new(
                ExpressionKind::Try {
                    kind,
                    expression: Box::new(expression),
                },
                self.stream.range_from(start),
            ));
        }

        let operator = match self.current_kind() {
            Some(TokenKind::Operator(op)) => Some(op.clone()),
            Some(TokenKind::Punctuator(Punctuator::Exclaim)) => Some("!".to_string()),
            _ => None,
        };
        if let Some(operator) = operator {
            // 前缀运算符必须紧贴操作数
            if self.next_adjacent().map_or(true, Token::is_whitespace) {
                return Err(self.stream.error(ParseErrorKind::ExpectedExpression));
            }
            self.stream.shift();
            let operand = self.nested(|parser| parser.parse_prefix())?;
            return Ok(Expression::new(
                ExpressionKind::Prefix {
                    operator,
                    operand: Box::new(operand),
                },
                self.stream.range_from(start),
            ));
        }

        let primary = self.parse_primary()?;
        self.parse_postfix(primary)
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let start = self.stream.current_start();
        let Some(token_kind) = self.current_kind().cloned() else {
            return Err(self.stream.error(ParseErrorKind::ExpectedExpression));
        };

        let kind = match &token_kind {
            TokenKind::Identifier(name) | TokenKind::BacktickIdentifier(name) => {
                ExpressionKind::Identifier(name.clone())
            }
            TokenKind::Keyword(name, KeywordKind::Contextual) => ExpressionKind::Identifier(name.clone()),
            TokenKind::IntegerLiteral(text) => ExpressionKind::Literal(LiteralKind::Integer(text.clone())),
            TokenKind::FloatingPointLiteral(text) => {
                ExpressionKind::Literal(LiteralKind::FloatingPoint(text.clone()))
            }
            TokenKind::StringLiteral(text) => ExpressionKind::Literal(LiteralKind::String(text.clone())),
            TokenKind::Keyword(name, _) => match name.as_str() {
                "true" => ExpressionKind::Literal(LiteralKind::Boolean(true)),
                "false" => ExpressionKind::Literal(LiteralKind::Boolean(false)),
                "nil" => ExpressionKind::Literal(LiteralKind::Nil),
                "self" => ExpressionKind::SelfExpression,
                "_" => ExpressionKind::Wildcard,
                _ => return Err(self.stream.error(ParseErrorKind::ExpectedExpression)),
            },
            TokenKind::Punctuator(Punctuator::Period) => {
                self.stream.shift();
                let name = self.expect_identifier()?;
                ExpressionKind::ImplicitMember(name)
            }
            TokenKind::Punctuator(Punctuator::LeftParen) => {
                let mut elements = self.parse_argument_list(Punctuator::RightParen)?;
                if elements.len() == 1 && elements[0].label.is_none() {
                    let inner = elements.remove(0).expression;
                    ExpressionKind::Parenthesized(Box::new(inner))
                } else {
                    ExpressionKind::Tuple(elements)
                }
            }
            TokenKind::Punctuator(Punctuator::LeftSquare) => self.parse_collection_literal()?,
            _ => return Err(self.stream.error(ParseErrorKind::ExpectedExpression)),
        };
        Ok(Expression::new(kind, self.stream.range_from(start)))
    }

    /// 调用、下标、成员访问、强制解包，都必须紧贴前一个 token
    fn parse_postfix(&mut self, mut expression: Expression) -> ParseResult<Expression> {
        let start = expression.range.start;
        loop {
            let kind = if self.next_adjacent_is_punctuator(Punctuator::LeftParen) {
                self.stream.shift();
                let arguments = self.parse_argument_list(Punctuator::RightParen)?;
                ExpressionKind::FunctionCall {
                    callee: Box::new(expression),
                    arguments,
                }
            } else if self.next_adjacent_is_punctuator(Punctuator::LeftSquare) {
                self.stream.shift();
                let arguments = self.parse_argument_list(Punctuator::RightSquare)?;
                ExpressionKind::Subscript {
                    base: Box::new(expression),
                    arguments,
                }
            } else if self.next_adjacent_is_punctuator(Punctuator::Period) {
                self.stream.shift();
                self.stream.shift();
                let member = match self.current_kind() {
                    Some(TokenKind::Identifier(name))
                    | Some(TokenKind::BacktickIdentifier(name))
                    | Some(TokenKind::Keyword(name, _))
                    | Some(TokenKind::IntegerLiteral(name)) => name.clone(),
                    _ => return Err(self.stream.error(ParseErrorKind::MissingIdentifier)),
                };
                ExpressionKind::ExplicitMember {
                    base: Box::new(expression),
                    member,
                }
            } else if self.next_adjacent_is_punctuator(Punctuator::Exclaim) {
                self.stream.shift();
                ExpressionKind::ForcedValue(Box::new(expression))
            } else {
                return Ok(expression);
            };
            expression = Expression::new(kind, self.stream.range_from(start));
        }
    }

    /// 当前 token 是开括号，返回时是 `closer`。允许 `label:` 和末尾逗号。
    fn parse_argument_list(&mut self, closer: Punctuator) -> ParseResult<Vec<Argument>> {
        let mut arguments = Vec::new();
        self.advance(true);
        while !self.current_is_punctuator(closer) {
            let label = self.read_argument_label();
            if label.is_some() {
                self.advance(true);
                self.advance(true);
            }
            let expression = self.parse_expression()?;
            arguments.push(Argument { label, expression });

            if self.next_is_punctuator(Punctuator::Comma, true) {
                self.advance(true);
                self.advance(true);
                continue;
            }
            self.expect_next_punctuator(closer)?;
        }
        Ok(arguments)
    }

    /// `name:` 形式的参数标签，任何关键字都可以作标签
    fn read_argument_label(&self) -> Option<String> {
        let name = match self.current_kind()? {
            TokenKind::Identifier(name)
            | TokenKind::BacktickIdentifier(name)
            | TokenKind::Keyword(name, _) => name.clone(),
            _ => return None,
        };
        self.next_is_punctuator(Punctuator::Colon, true)
            .then_some(name)
    }

    /// `[a, b]`、`[k: v]`、`[]`、`[:]`，当前 token 是 `[`
    fn parse_collection_literal(&mut self) -> ParseResult<ExpressionKind> {
        self.advance(true);
        if self.current_is_punctuator(Punctuator::RightSquare) {
            return Ok(ExpressionKind::Literal(LiteralKind::Array(Vec::new())));
        }
        if self.current_is_punctuator(Punctuator::Colon) {
            self.expect_next_punctuator(Punctuator::RightSquare)?;
            return Ok(ExpressionKind::Literal(LiteralKind::Dictionary(Vec::new())));
        }

        let first = self.parse_expression()?;
        if self.next_is_punctuator(Punctuator::Colon, true) {
            let mut entries = Vec::new();
            let mut key = first;
            loop {
                self.advance(true);
                self.advance(true);
                let value = self.parse_expression()?;
                entries.push((key, value));
                if !self.next_is_punctuator(Punctuator::Comma, true) {
                    break;
                }
                self.advance(true);
                self.advance(true);
                if self.current_is_punctuator(Punctuator::RightSquare) {
                    return Ok(ExpressionKind::Literal(LiteralKind::Dictionary(entries)));
                }
                key = self.parse_expression()?;
                if !self.next_is_punctuator(Punctuator::Colon, true) {
                    self.advance(true);
                    return Err(self
                        .stream
                        .error(ParseErrorKind::ExpectedToken(Punctuator::Colon.to_string())));
                }
            }
            self.expect_next_punctuator(Punctuator::RightSquare)?;
            return Ok(ExpressionKind::Literal(LiteralKind::Dictionary(entries)));
        }

        let mut elements = vec![first];
        while self.next_is_punctuator(Punctuator::Comma, true) {
            self.advance(true);
            self.advance(true);
            if self.current_is_punctuator(Punctuator::RightSquare) {
                return Ok(ExpressionKind::Literal(LiteralKind::Array(elements)));
            }
            elements.push(self.parse_expression()?);
        }
        self.expect_next_punctuator(Punctuator::RightSquare)?;
        Ok(ExpressionKind::Literal(LiteralKind::Array(elements)))
    }
}

#[cfg(test)]
mod tests {
    use super::infix_precedence;

    #[test]
    fn test_precedence_table() {
        assert!(infix_precedence("*").0 > infix_precedence("+").0);
        assert!(infix_precedence("+").0 > infix_precedence("==").0);
        assert!(infix_precedence("==").0 > infix_precedence("&&").0);
        assert!(infix_precedence("&&").0 > infix_precedence("||").0);
        assert_eq!(infix_precedence("="), (90, true));
        assert_eq!(infix_precedence("??"), (131, true));
        assert_eq!(infix_precedence("<>"), (100, false));
    }
}
