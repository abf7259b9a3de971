//! Declarations
//!
//! 声明起始判定 → 特性 → 修饰符 → 按关键字分派到具体的声明解析函数，
//! 具体函数返回后统一检查语句分隔符。

use tracing::{debug, trace};

use super::error::{ParseErrorKind, ParseResult};
use super::stream::TokenStream;
use super::Parser;
use crate::ast::{
    Attribute, Declaration, DeclarationKind, FunctionDeclaration, ImportDeclaration, ImportKind,
    Parameter, PatternInitializer, TypeDeclaration,
};
use crate::source::SourceLocation;
use crate::token::{KeywordKind, Punctuator, Token, TokenKind};

/// 声明出现的位置，决定分隔符规则和 `case` 是否可用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DeclarationContext {
    TopLevel,
    CodeBlock,
    TypeBody,
    EnumBody,
}

impl DeclarationContext {
    /// 嵌套在花括号里：`}` 可以结束声明
    pub(super) fn is_nested(self) -> bool {
        self != Self::TopLevel
    }
}

/// 声明修饰符。访问控制和 `static` 本身是声明关键字，其余是上下文关键字
const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "internal",
    "fileprivate",
    "open",
    "static",
    "final",
    "override",
    "mutating",
    "nonmutating",
    "lazy",
    "required",
    "convenience",
    "dynamic",
    "optional",
    "weak",
    "unowned",
    "indirect",
];

fn is_modifier(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Keyword(name, KeywordKind::Declaration | KeywordKind::Contextual) => {
            MODIFIERS.contains(&name.as_str())
        }
        _ => false,
    }
}

/// `head` 是否开始一个声明。`tail` 是 `head` 之后的 token，不改变任何状态。
///
/// - `@` 之后（跳过空白）必须是标识符，再跳过空白后递归判断
/// - 声明关键字直接算
pub(super) fn is_start_of_declaration(head: Option<&Token>, tail: &[Token]) -> bool {
    let Some(head) = head else {
        return false;
    };
    match &head.kind {
        TokenKind::Punctuator(Punctuator::At) => {
            let rest = TokenStream::peek_skipping_whitespace(tail);
            match rest.split_first() {
                Some((name, rest)) if matches!(name.kind, TokenKind::Identifier(_)) => {
                    let rest = TokenStream::peek_skipping_whitespace(rest);
                    match rest.split_first() {
                        Some((next, tail)) => is_start_of_declaration(Some(next), tail),
                        None => false,
                    }
                }
                _ => false,
            }
        }
        TokenKind::Keyword(_, KeywordKind::Declaration) => true,
        _ => false,
    }
}

/// 声明头部：起点、特性、修饰符
struct DeclarationHeader {
    start: SourceLocation,
    attributes: Vec<Attribute>,
    modifiers: Vec<String>,
}

impl Parser {
    /// 解析一个声明，结果追加到 `out`。
    ///
    /// 有些声明（import）在报错之前就已经构造完成，它们照样进入 `out`。
    pub(super) fn parse_declaration(
        &mut self,
        context: DeclarationContext,
        out: &mut Vec<Declaration>,
    ) -> ParseResult<()> {
        let start = self.stream.current_start();
        let attributes = self.parse_attributes();
        let modifiers = self.parse_modifiers();

        let keyword = match self.current_kind() {
            Some(TokenKind::Keyword(name, kind)) => Some((name.clone(), *kind)),
            _ => None,
        };
        let Some((keyword, kind)) = keyword else {
            return Err(self.stream.error(if modifiers.is_empty() {
                ParseErrorKind::Internal
            } else {
                ParseErrorKind::ExpectedDeclaration
            }));
        };
        let is_enum_case = context == DeclarationContext::EnumBody && keyword == "case";
        if kind != KeywordKind::Declaration && !is_enum_case {
            return Err(self.stream.error(if modifiers.is_empty() {
                ParseErrorKind::Internal
            } else {
                ParseErrorKind::ExpectedDeclaration
            }));
        }

        trace!(keyword = %keyword, ?context, "dispatching declaration");
        let header = DeclarationHeader {
            start,
            attributes,
            modifiers,
        };
        let declaration = match keyword.as_str() {
            "import" => {
                self.parse_import_declaration(header, out)?;
                return self.ensure_statement_separator(context);
            }
            "let" => {
                let initializers = self.parse_pattern_initializers()?;
                self.finish(header, DeclarationKind::Constant(initializers))
            }
            "var" => {
                let initializers = self.parse_pattern_initializers()?;
                self.finish(header, DeclarationKind::Variable(initializers))
            }
            "typealias" => {
                let kind = self.parse_typealias()?;
                self.finish(header, kind)
            }
            "func" => {
                let function = self.parse_function()?;
                self.finish(header, DeclarationKind::Function(function))
            }
            "struct" => {
                let ty = self.parse_type_declaration(DeclarationContext::TypeBody)?;
                self.finish(header, DeclarationKind::Struct(ty))
            }
            "class" => {
                let ty = self.parse_type_declaration(DeclarationContext::TypeBody)?;
                self.finish(header, DeclarationKind::Class(ty))
            }
            "enum" => {
                let ty = self.parse_type_declaration(DeclarationContext::EnumBody)?;
                self.finish(header, DeclarationKind::Enum(ty))
            }
            "protocol" => {
                let ty = self.parse_type_declaration(DeclarationContext::TypeBody)?;
                self.finish(header, DeclarationKind::Protocol(ty))
            }
            "extension" => {
                let ty = self.parse_type_declaration(DeclarationContext::TypeBody)?;
                self.finish(header, DeclarationKind::Extension(ty))
            }
            "case" => {
                let names = self.parse_enum_case()?;
                self.finish(header, DeclarationKind::EnumCase(names))
            }
            other => {
                return Err(self
                    .stream
                    .error(ParseErrorKind::UnsupportedDeclaration(other.to_string())))
            }
        };
        out.push(declaration);
        self.ensure_statement_separator(context)
    }

    fn finish(&self, header: DeclarationHeader, kind: DeclarationKind) -> Declaration {
        Declaration {
            attributes: header.attributes,
            modifiers: header.modifiers,
            kind,
            range: self.stream.range_from(header.start),
        }
    }

    /// 连续的 `@name`，结束时当前 token 是特性之后第一个非空白 token。
    /// `@` 后面不是标识符时这个特性被丢弃。
    fn parse_attributes(&mut self) -> Vec<Attribute> {
        let mut attributes = Vec::new();
        while self.current_is_punctuator(Punctuator::At) {
            self.stream.skip_whitespace();
            match self.read_identifier(false) {
                Some(name) => {
                    attributes.push(Attribute::new(name));
                    self.stream.skip_whitespace();
                }
                None => debug!("dropped attribute marker without a name"),
            }
        }
        attributes
    }

    fn parse_modifiers(&mut self) -> Vec<String> {
        let mut modifiers = Vec::new();
        while let Some(token) = self.stream.current() {
            if !is_modifier(token) {
                break;
            }
            if let TokenKind::Keyword(name, _) = &token.kind {
                modifiers.push(name.clone());
            }
            self.stream.skip_whitespace();
        }
        modifiers
    }

    /// `import [kind] Module(.Sub)*`
    fn parse_import_declaration(
        &mut self,
        header: DeclarationHeader,
        out: &mut Vec<Declaration>,
    ) -> ParseResult<()> {
        self.stream.skip_whitespace();

        let mut kind = ImportKind::Module;
        if let Some(TokenKind::Keyword(name, KeywordKind::Declaration)) = self.current_kind() {
            if let Some(qualified) = ImportKind::from_keyword(name) {
                kind = qualified;
                self.stream.skip_whitespace();
            }
        }

        let module = self.expect_identifier()?;

        let mut submodules = Vec::new();
        self.stream.shift();
        while let Some(token) = self.stream.current() {
            if !token.is_punctuator(Punctuator::Period) {
                self.stream.unshift()?;
                break;
            }
            self.stream.shift();
            if let Some(name) = self.read_identifier(true) {
                submodules.push(name);
                self.stream.shift();
            }
        }

        let missing_symbol = kind != ImportKind::Module && submodules.is_empty();
        let declaration = self.finish(
            header,
            DeclarationKind::Import(ImportDeclaration {
                module,
                submodules,
                kind,
            }),
        );
        out.push(declaration);

        if missing_symbol {
            return Err(self
                .stream
                .error(ParseErrorKind::MissingModuleNameInImportDeclaration));
        }
        Ok(())
    }

    /// `let a = 1, (b, c): (Int, Int) = (2, 3)`，当前 token 是 `let`/`var`
    fn parse_pattern_initializers(&mut self) -> ParseResult<Vec<PatternInitializer>> {
        let mut initializers = Vec::new();
        loop {
            self.advance(true);
            let pattern = self.parse_declaration_pattern()?;
            let initializer = if self.next_is_punctuator(Punctuator::Equal, false) {
                self.advance(false);
                self.advance(true);
                Some(self.parse_expression()?)
            } else {
                None
            };
            initializers.push(PatternInitializer {
                pattern,
                initializer,
            });

            if !self.next_is_punctuator(Punctuator::Comma, false) {
                break;
            }
            self.advance(false);
        }
        Ok(initializers)
    }

    /// `typealias Name = Type`
    fn parse_typealias(&mut self) -> ParseResult<DeclarationKind> {
        self.advance(true);
        let name = self.expect_identifier()?;
        self.expect_next_punctuator(Punctuator::Equal)?;
        self.advance(true);
        let assignment = self.parse_type()?;
        Ok(DeclarationKind::Typealias { name, assignment })
    }

    /// `func name(params) [throws] [-> Result] [{ body }]`
    fn parse_function(&mut self) -> ParseResult<FunctionDeclaration> {
        self.advance(true);
        let name = self.expect_identifier()?;
        self.expect_next_punctuator(Punctuator::LeftParen)?;
        let parameters = self.parse_parameter_clause()?;

        let mut throws = false;
        if self.next_is_keyword("throws", false) || self.next_is_keyword("rethrows", false) {
            self.advance(false);
            throws = true;
        }

        let mut result = None;
        if self.next_is_punctuator(Punctuator::Arrow, false) {
            self.advance(false);
            self.advance(true);
            result = Some(self.parse_type()?);
        }

        let body = if self.next_is_punctuator(Punctuator::LeftBrace, true) {
            self.advance(true);
            Some(self.parse_code_block()?)
        } else {
            None
        };

        Ok(FunctionDeclaration {
            name,
            parameters,
            throws,
            result,
            body,
        })
    }

    /// 当前 token 是 `(`，返回时是 `)`
    fn parse_parameter_clause(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut parameters = Vec::new();
        self.advance(true);
        if self.current_is_punctuator(Punctuator::RightParen) {
            return Ok(parameters);
        }

        loop {
            let first = self.parse_parameter_name()?;
            let (external_name, local_name) = if self.next_is_punctuator(Punctuator::Colon, true) {
                (None, first)
            } else {
                self.advance(true);
                (Some(first), self.parse_parameter_name()?)
            };

            self.expect_next_punctuator(Punctuator::Colon)?;
            self.advance(true);
            let type_annotation = self.parse_type()?;

            let default_argument = if self.next_is_punctuator(Punctuator::Equal, true) {
                self.advance(true);
                self.advance(true);
                Some(self.parse_expression_without_assignment()?)
            } else {
                None
            };

            parameters.push(Parameter {
                external_name,
                local_name,
                type_annotation,
                default_argument,
            });

            if self.next_is_punctuator(Punctuator::Comma, true) {
                self.advance(true);
                self.advance(true);
                continue;
            }
            self.expect_next_punctuator(Punctuator::RightParen)?;
            return Ok(parameters);
        }
    }

    /// 参数名可以是 `_`、标识符，或任意关键字（外部名 `for:`、`in:` 都合法）
    fn parse_parameter_name(&self) -> ParseResult<String> {
        match self.current_kind() {
            Some(TokenKind::Identifier(name))
            | Some(TokenKind::BacktickIdentifier(name))
            | Some(TokenKind::Keyword(name, _)) => Ok(name.clone()),
            _ => Err(self.stream.error(ParseErrorKind::MissingIdentifier)),
        }
    }

    /// `struct Name: A, B { members }`，当前 token 是引入关键字
    fn parse_type_declaration(
        &mut self,
        body: DeclarationContext,
    ) -> ParseResult<TypeDeclaration> {
        self.advance(true);
        // extension 的名字可以带点: extension Swift.Array
        let name = match self.stream.current() {
            Some(token) if matches!(token.kind, TokenKind::Identifier(_)) => {
                self.parse_type()?.to_string()
            }
            _ => self.expect_identifier()?,
        };

        let mut inherits = Vec::new();
        if self.next_is_punctuator(Punctuator::Colon, false) {
            self.advance(false);
            loop {
                self.advance(true);
                inherits.push(self.parse_type()?);
                if !self.next_is_punctuator(Punctuator::Comma, true) {
                    break;
                }
                self.advance(true);
            }
        }

        self.expect_next_punctuator(Punctuator::LeftBrace)?;
        let members = self.parse_members(body)?;
        Ok(TypeDeclaration {
            name,
            inherits,
            members,
        })
    }

    /// 类型体。当前 token 是 `{`，返回时是 `}`。
    /// 成员出错只影响该成员，错误记录后跳到下一个成员。
    fn parse_members(&mut self, context: DeclarationContext) -> ParseResult<Vec<Declaration>> {
        self.nested(|parser| {
            let mut members = Vec::new();
            loop {
                parser.stream.skip_whitespace();
                let Some(token) = parser.stream.current() else {
                    return Err(parser
                        .stream
                        .error(ParseErrorKind::ExpectedToken(Punctuator::RightBrace.to_string())));
                };
                if token.is_punctuator(Punctuator::RightBrace) {
                    return Ok(members);
                }
                if token.is_punctuator(Punctuator::Semi) {
                    continue;
                }

                let is_member = is_start_of_declaration(Some(token), parser.stream.remaining())
                    || (context == DeclarationContext::EnumBody && token.is_keyword("case"));
                let result = if is_member {
                    let mut parsed = Vec::new();
                    let result = parser.parse_declaration(context, &mut parsed);
                    members.extend(parsed);
                    result
                } else {
                    Err(parser.stream.error(ParseErrorKind::ExpectedToken(
                        "declaration".to_string(),
                    )))
                };
                if let Err(error) = result {
                    parser.record(error);
                    parser.synchronize();
                }
            }
        })
    }

    /// enum 内部的 `case a, b, c`
    fn parse_enum_case(&mut self) -> ParseResult<Vec<String>> {
        let mut names = Vec::new();
        loop {
            self.advance(true);
            names.push(self.expect_identifier()?);
            if !self.next_is_punctuator(Punctuator::Comma, false) {
                return Ok(names);
            }
            self.advance(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn starts(text: &str) -> bool {
        let tokens = lex(text);
        match tokens.split_first() {
            Some((head, tail)) => is_start_of_declaration(Some(head), tail),
            None => is_start_of_declaration(None, &[]),
        }
    }

    #[test]
    fn test_declaration_keywords_start_declarations() {
        assert!(starts("import A"));
        assert!(starts("struct S {}"));
        assert!(starts("public func f()"));
    }

    #[test]
    fn test_attributes_before_declaration() {
        assert!(starts("@available import A"));
        assert!(starts("@a   @b\nimport A"));
        assert!(!starts("@available"));
        assert!(!starts("@ 1 import A"));
        assert!(!starts("@a return"));
    }

    #[test]
    fn test_other_tokens_are_not_declarations() {
        assert!(!starts(""));
        assert!(!starts("foo"));
        assert!(!starts("if x {}"));
        assert!(!starts(";"));
    }
}
