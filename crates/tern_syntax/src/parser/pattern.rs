//! Patterns
//!
//! 两个入口：
//! - `parse_declaration_pattern`: let/var、for-in、可选绑定里的 `x`、`_`、`(a, b)`，可带 `: Type`
//! - `parse_pattern`: case / catch 里的完整模式

use super::error::{ParseErrorKind, ParseResult};
use super::Parser;
use crate::ast::{Pattern, PatternKind};
use crate::token::{KeywordKind, Punctuator, TokenKind};

impl Parser {
    pub(super) fn parse_declaration_pattern(&mut self) -> ParseResult<Pattern> {
        self.nested(|parser| {
            let start = parser.stream.current_start();
            let kind = match parser.current_kind() {
                Some(TokenKind::Keyword(name, KeywordKind::Pattern)) if name == "_" => {
                    PatternKind::Wildcard
                }
                Some(TokenKind::Punctuator(Punctuator::LeftParen)) => {
                    PatternKind::Tuple(parser.parse_tuple_pattern(|p| p.parse_declaration_pattern())?)
                }
                _ => match parser.read_identifier(true) {
                    Some(name) => PatternKind::Identifier(name),
                    None => return Err(parser.stream.error(ParseErrorKind::ExpectedPattern)),
                },
            };
            let pattern = Pattern::new(kind, parser.stream.range_from(start));

            if !parser.next_is_punctuator(Punctuator::Colon, false) {
                return Ok(pattern);
            }
            parser.advance(false);
            parser.advance(true);
            let annotation = parser.parse_type()?;
            Ok(Pattern::new(
                PatternKind::TypeAnnotated {
                    pattern: Box::new(pattern),
                    annotation,
                },
                parser.stream.range_from(start),
            ))
        })
    }

    /// `binding` 为真时处在 `let`/`var` 之内：裸标识符是绑定而不是表达式
    pub(super) fn parse_pattern(&mut self, binding: bool) -> ParseResult<Pattern> {
        self.nested(|parser| {
            let start = parser.stream.current_start();
            let kind = parser.parse_pattern_kind(binding)?;
            let mut pattern = Pattern::new(kind, parser.stream.range_from(start));
            while parser.next_adjacent_is_punctuator(Punctuator::Question) {
                parser.stream.shift();
                pattern = Pattern::new(
                    PatternKind::Optional(Box::new(pattern)),
                    parser.stream.range_from(start),
                );
            }
            Ok(pattern)
        })
    }

    fn parse_pattern_kind(&mut self, binding: bool) -> ParseResult<PatternKind> {
        let kind = match self.stream.current() {
            Some(token) => token.kind.clone(),
            None => return Err(self.stream.error(ParseErrorKind::ExpectedPattern)),
        };

        match &kind {
            TokenKind::Keyword(name, _) if name == "let" || name == "var" => {
                let mutable = name == "var";
                self.advance(true);
                let pattern = self.parse_pattern(true)?;
                Ok(PatternKind::ValueBinding {
                    mutable,
                    pattern: Box::new(pattern),
                })
            }
            TokenKind::Keyword(name, KeywordKind::Pattern) if name == "_" => Ok(PatternKind::Wildcard),
            TokenKind::Punctuator(Punctuator::LeftParen) => Ok(PatternKind::Tuple(
                self.parse_tuple_pattern(|p| p.parse_pattern(binding))?,
            )),
            // .some(let x)
            TokenKind::Punctuator(Punctuator::Period) => {
                self.stream.shift();
                let case_name = self.expect_identifier()?;
                self.parse_enum_case_pattern(binding, None, case_name)
            }
            TokenKind::Identifier(name) | TokenKind::BacktickIdentifier(name) => {
                let name = name.clone();
                // Color.red(...)
                let qualified = self.next_adjacent_is_punctuator(Punctuator::Period)
                    && self.stream.remaining().get(1).is_some_and(|t| {
                        matches!(
                            t.kind,
                            TokenKind::Identifier(_) | TokenKind::Keyword(_, KeywordKind::Contextual)
                        )
                    });
                if qualified {
                    self.stream.shift();
                    self.stream.shift();
                    let case_name = self.expect_identifier()?;
                    return self.parse_enum_case_pattern(binding, Some(name), case_name);
                }
                if binding {
                    return Ok(PatternKind::Identifier(name));
                }
                let expression = self.parse_expression_without_assignment()?;
                Ok(PatternKind::Expression(Box::new(expression)))
            }
            _ => {
                if binding {
                    if let Some(name) = self.read_identifier(true) {
                        return Ok(PatternKind::Identifier(name));
                    }
                }
                match self.parse_expression_without_assignment() {
                    Ok(expression) => Ok(PatternKind::Expression(Box::new(expression))),
                    Err(error) if error.kind == ParseErrorKind::ExpectedExpression => {
                        Err(self.stream.error(ParseErrorKind::ExpectedPattern))
                    }
                    Err(error) => Err(error),
                }
            }
        }
    }

    /// 当前 token 是 case 名；紧跟 `(` 时解析关联值的元组模式
    fn parse_enum_case_pattern(
        &mut self,
        binding: bool,
        type_name: Option<String>,
        case_name: String,
    ) -> ParseResult<PatternKind> {
        let associated = if self.next_adjacent_is_punctuator(Punctuator::LeftParen) {
            self.stream.shift();
            let start = self.stream.current_start();
            let elements = self.parse_tuple_pattern(|p| p.parse_pattern(binding))?;
            Some(Box::new(Pattern::new(
                PatternKind::Tuple(elements),
                self.stream.range_from(start),
            )))
        } else {
            None
        };
        Ok(PatternKind::EnumCase {
            type_name,
            case_name,
            associated,
        })
    }

    /// 当前 token 是 `(`，返回时是 `)`
    fn parse_tuple_pattern(
        &mut self,
        mut element: impl FnMut(&mut Self) -> ParseResult<Pattern>,
    ) -> ParseResult<Vec<Pattern>> {
        let mut elements = Vec::new();
        self.advance(true);
        if self.current_is_punctuator(Punctuator::RightParen) {
            return Ok(elements);
        }
        loop {
            elements.push(element(self)?);
            if !self.next_is_punctuator(Punctuator::Comma, true) {
                break;
            }
            self.advance(true);
            self.advance(true);
        }
        self.expect_next_punctuator(Punctuator::RightParen)?;
        Ok(elements)
    }
}
