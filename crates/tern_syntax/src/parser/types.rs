//! 类型标注: `A.B<C>`, `[T]`, `[K: V]`, `(A, B)`, `(A) throws -> B`, `T?`, `T!`

use super::error::{ParseErrorKind, ParseResult};
use super::Parser;
use crate::ast::{Type, TypeSegment};
use crate::token::{KeywordKind, Punctuator, TokenKind};

impl Parser {
    /// 当前 token 是类型的第一个 token，返回时是最后一个
    pub(super) fn parse_type(&mut self) -> ParseResult<Type> {
        self.nested(|parser| {
            let base = parser.parse_primary_type()?;
            Ok(parser.parse_type_suffixes(base))
        })
    }

    fn parse_primary_type(&mut self) -> ParseResult<Type> {
        match self.current_kind() {
            Some(TokenKind::Punctuator(Punctuator::LeftSquare)) => self.parse_collection_type(),
            Some(TokenKind::Punctuator(Punctuator::LeftParen)) => self.parse_tuple_or_function_type(),
            Some(TokenKind::Identifier(_))
            | Some(TokenKind::BacktickIdentifier(_))
            | Some(TokenKind::Keyword(_, KeywordKind::Contextual)) => self.parse_named_type(),
            Some(TokenKind::Keyword(name, _)) if name == "self" => self.parse_named_type(),
            _ => Err(self.stream.error(ParseErrorKind::ExpectedType)),
        }
    }

    /// `A.B<C, D>.E`，`<` 和 `.` 都必须紧贴前一个 token
    fn parse_named_type(&mut self) -> ParseResult<Type> {
        let mut segments = Vec::new();
        loop {
            let name = match self.current_kind() {
                Some(TokenKind::Identifier(name))
                | Some(TokenKind::BacktickIdentifier(name))
                | Some(TokenKind::Keyword(name, _)) => name.clone(),
                _ => return Err(self.stream.error(ParseErrorKind::ExpectedType)),
            };

            let mut generic_arguments = Vec::new();
            if self.next_adjacent().is_some_and(|t| t.is_operator("<")) {
                self.stream.shift();
                loop {
                    self.advance(true);
                    generic_arguments.push(self.parse_type()?);
                    if !self.next_is_punctuator(Punctuator::Comma, true) {
                        break;
                    }
                    self.advance(true);
                }
                self.advance(true);
                if !self.stream.current().is_some_and(|t| t.is_operator(">")) {
                    return Err(self
                        .stream
                        .error(ParseErrorKind::ExpectedToken("`>`".to_string())));
                }
            }
            segments.push(TypeSegment {
                name,
                generic_arguments,
            });

            let continues = self.next_adjacent_is_punctuator(Punctuator::Period)
                && self.stream.remaining().get(1).is_some_and(|t| {
                    matches!(
                        t.kind,
                        TokenKind::Identifier(_)
                            | TokenKind::BacktickIdentifier(_)
                            | TokenKind::Keyword(_, KeywordKind::Contextual)
                    )
                });
            if !continues {
                return Ok(Type::Named(segments));
            }
            self.stream.shift();
            self.stream.shift();
        }
    }

    /// `[T]` 或 `[K: V]`
    fn parse_collection_type(&mut self) -> ParseResult<Type> {
        self.advance(true);
        let first = self.parse_type()?;
        if self.next_is_punctuator(Punctuator::Colon, true) {
            self.advance(true);
            self.advance(true);
            let value = self.parse_type()?;
            self.expect_next_punctuator(Punctuator::RightSquare)?;
            return Ok(Type::Dictionary(Box::new(first), Box::new(value)));
        }
        self.expect_next_punctuator(Punctuator::RightSquare)?;
        Ok(Type::Array(Box::new(first)))
    }

    /// `(A, B)`，后面跟 `throws`/`->` 时是函数类型
    fn parse_tuple_or_function_type(&mut self) -> ParseResult<Type> {
        let mut elements = Vec::new();
        self.advance(true);
        if !self.current_is_punctuator(Punctuator::RightParen) {
            loop {
                elements.push(self.parse_type()?);
                if !self.next_is_punctuator(Punctuator::Comma, true) {
                    break;
                }
                self.advance(true);
                self.advance(true);
            }
            self.expect_next_punctuator(Punctuator::RightParen)?;
        }

        let throws = self.next_is_keyword("throws", false);
        if throws {
            self.advance(false);
        }
        if self.next_is_punctuator(Punctuator::Arrow, false) {
            self.advance(false);
            self.advance(true);
            let result = self.parse_type()?;
            return Ok(Type::Function {
                parameters: elements,
                throws,
                result: Box::new(result),
            });
        }
        if throws {
            self.advance(true);
            return Err(self
                .stream
                .error(ParseErrorKind::ExpectedToken(Punctuator::Arrow.to_string())));
        }
        Ok(Type::Tuple(elements))
    }

    /// 紧贴的 `?` / `!`
    fn parse_type_suffixes(&mut self, mut ty: Type) -> Type {
        loop {
            if self.next_adjacent_is_punctuator(Punctuator::Question) {
                self.stream.shift();
                ty = Type::Optional(Box::new(ty));
            } else if self.next_adjacent_is_punctuator(Punctuator::Exclaim) {
                self.stream.shift();
                ty = Type::ImplicitlyUnwrappedOptional(Box::new(ty));
            } else {
                return ty;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::DeclarationKind;
    use crate::parser::Parser;

    fn alias(text: &str) -> String {
        let output = Parser::new().parse(text);
        assert!(output.errors.is_empty(), "{:?}", output.messages());
        match &output.root.declarations[0].kind {
            DeclarationKind::Typealias { assignment, .. } => assignment.to_string(),
            other => panic!("expected typealias, got {:?}", other),
        }
    }

    #[test]
    fn test_named_and_generic_types() {
        assert_eq!(alias("typealias T = Int"), "Int");
        assert_eq!(alias("typealias T = Swift.Array<Int>"), "Swift.Array<Int>");
        assert_eq!(alias("typealias T = Dictionary<String, [Int]>"), "Dictionary<String, [Int]>");
    }

    #[test]
    fn test_collection_and_optional_types() {
        assert_eq!(alias("typealias T = [String: Int]?"), "[String: Int]?");
        assert_eq!(alias("typealias T = Int!"), "Int!");
        assert_eq!(alias("typealias T = Array<Int>?"), "Array<Int>?");
    }

    #[test]
    fn test_tuple_and_function_types() {
        assert_eq!(alias("typealias T = ()"), "()");
        assert_eq!(alias("typealias T = (Int, String)"), "(Int, String)");
        assert_eq!(
            alias("typealias T = (Int) throws -> String"),
            "(Int) throws -> String"
        );
    }

    #[test]
    fn test_missing_type() {
        let output = Parser::new().parse("typealias T = ;");
        assert_eq!(output.messages(), vec!["Expected type."]);
    }
}
