//! Diagnostic - 诊断信息
//!
//! 一条诊断 = 级别 + 稳定错误码 + 人类可读消息 + 可选位置

use std::fmt;

use crate::level::DiagnosticLevel;
use crate::span::Span;

/// 修复建议
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub message: String,
    /// 建议的替换文本
    pub replacement: Option<String>,
}

impl Suggestion {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }
}

/// 诊断信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// 稳定错误码 (P0001 ...)，快照测试和工具按它过滤
    pub code: Option<&'static str>,
    pub message: String,
    /// 源码字节范围（可选）
    pub span: Option<Span>,
    pub notes: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            code: None,
            message: message.into(),
            span: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// 创建错误诊断
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    /// 创建警告诊断
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    /// 创建注释诊断
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Note, message)
    }

    /// 设置错误码
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// 设置位置信息
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// 添加简单建议（仅消息）
    pub fn suggest(self, message: impl Into<String>) -> Self {
        self.with_suggestion(Suggestion::new(message))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{}]: {}", self.level, code, self.message),
            None => write!(f, "{}: {}", self.level, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::error("Missing identifier.")
            .with_code("P0003")
            .span(7..8)
            .with_note("import needs a module name")
            .suggest("write `import Foundation`");

        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.code, Some("P0003"));
        assert_eq!(diag.message, "Missing identifier.");
        assert_eq!(diag.span, Some(7..8));
        assert_eq!(diag.notes, vec!["import needs a module name".to_string()]);
        assert_eq!(diag.suggestions.len(), 1);
        assert_eq!(diag.suggestions[0].replacement, None);
    }

    #[test]
    fn test_display_with_and_without_code() {
        let coded = Diagnostic::error("Missing identifier.").with_code("P0003");
        assert_eq!(coded.to_string(), "error[P0003]: Missing identifier.");

        let plain = Diagnostic::warning("attribute dropped");
        assert_eq!(plain.to_string(), "warning: attribute dropped");
    }

    #[test]
    fn test_suggestion_replacement() {
        let suggestion = Suggestion::new("add a separator").with_replacement(";");
        assert_eq!(suggestion.replacement.as_deref(), Some(";"));
    }
}
