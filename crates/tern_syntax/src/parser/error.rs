//! Parse Errors
//!
//! 每种语法错误对应一条固定消息和一个稳定错误码；顶层循环把它们
//! 转成诊断后继续解析，从不中断。

use tern_diagnostics::{Diagnostic, Span};
use thiserror::Error;

use crate::source::SourceRange;

/// 解析错误的种类，`Display` 就是面向用户的消息
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// 解析器内部状态不一致（没有可回退的 token、分派前提不成立）
    #[error("Fatal error.")]
    Internal,

    #[error("Statements must be separated by line breaks or semicolons.")]
    MissingSeparator,

    #[error("Missing identifier.")]
    MissingIdentifier,

    #[error("Missing module name in import declaration.")]
    MissingModuleNameInImportDeclaration,

    #[error("Expected {0}.")]
    ExpectedToken(String),

    #[error("Expected expression.")]
    ExpectedExpression,

    #[error("Expected pattern.")]
    ExpectedPattern,

    #[error("Expected type.")]
    ExpectedType,

    #[error("Expected declaration after modifiers.")]
    ExpectedDeclaration,

    #[error("Declaration `{0}` is not supported.")]
    UnsupportedDeclaration(String),

    #[error("Nesting is too deep.")]
    NestingTooDeep,

    /// 兜底：没有专门分类的问题（例如词法分析器不认识的输入）
    #[error("Unknown error.")]
    Unknown,
}

impl ParseErrorKind {
    /// 稳定错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Internal => "P0000",
            Self::MissingSeparator => "P0001",
            Self::MissingIdentifier => "P0002",
            Self::MissingModuleNameInImportDeclaration => "P0003",
            Self::ExpectedToken(_) => "P0004",
            Self::ExpectedExpression => "P0005",
            Self::ExpectedPattern => "P0006",
            Self::ExpectedType => "P0007",
            Self::ExpectedDeclaration => "P0008",
            Self::UnsupportedDeclaration(_) => "P0009",
            Self::NestingTooDeep => "P0010",
            Self::Unknown => "P9999",
        }
    }
}

/// 带位置的解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 出错 token 的字节范围；输入结束时为末尾的空范围
    pub span: Span,
    pub range: SourceRange,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, range: SourceRange) -> Self {
        Self { kind, span, range }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// 转换为统一诊断
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.message())
            .with_code(self.kind.code())
            .span(self.span.clone())
            .with_note(format!("at {}", self.range.start));
        match self.kind {
            ParseErrorKind::MissingSeparator => {
                diagnostic.suggest("insert `;` or a line break before this token")
            }
            ParseErrorKind::MissingModuleNameInImportDeclaration => {
                diagnostic.suggest("qualified imports name a symbol, e.g. `import struct Module.Symbol`")
            }
            _ => diagnostic,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_stable() {
        assert_eq!(ParseErrorKind::Internal.to_string(), "Fatal error.");
        assert_eq!(
            ParseErrorKind::MissingSeparator.to_string(),
            "Statements must be separated by line breaks or semicolons."
        );
        assert_eq!(ParseErrorKind::MissingIdentifier.to_string(), "Missing identifier.");
        assert_eq!(
            ParseErrorKind::MissingModuleNameInImportDeclaration.to_string(),
            "Missing module name in import declaration."
        );
        assert_eq!(ParseErrorKind::Unknown.to_string(), "Unknown error.");
        assert_eq!(
            ParseErrorKind::ExpectedToken("`}`".into()).to_string(),
            "Expected `}`."
        );
    }

    #[test]
    fn test_to_diagnostic() {
        let error = ParseError::new(ParseErrorKind::MissingIdentifier, 7..8, SourceRange::default());
        let diagnostic = error.to_diagnostic();

        assert_eq!(diagnostic.message, "Missing identifier.");
        assert_eq!(diagnostic.code, Some("P0002"));
        assert_eq!(diagnostic.span, Some(7..8));
        assert!(diagnostic.level.is_error());
    }
}
