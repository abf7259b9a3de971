//! DiagnosticSink - 诊断收集器
//!
//! 只追加、保持发现顺序；收集过程中从不中断调用方

use crate::diagnostic::Diagnostic;
use crate::level::DiagnosticLevel;

/// 诊断收集器
#[derive(Debug, Default, Clone)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if diagnostic.level.is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// 添加错误
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::error(message));
    }

    /// 添加警告
    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::warning(message));
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// 按顺序取出所有消息文本
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }

    /// 统计带某个错误码的诊断数量
    pub fn count_code(&self, code: &str) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.code == Some(code))
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.level, DiagnosticLevel::Warning))
            .count()
    }

    /// 清空所有诊断
    pub fn clear(&mut self) {
        self.diagnostics.clear();
        self.has_errors = false;
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Extend<Diagnostic> for DiagnosticSink {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diagnostic in iter {
            self.add(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_creation() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let mut sink = DiagnosticSink::new();
        sink.error("first");
        sink.warning("second");
        sink.error("third");

        assert_eq!(sink.messages(), vec!["first", "second", "third"]);
        assert_eq!(sink.error_count(), 2);
        assert_eq!(sink.warning_count(), 1);
    }

    #[test]
    fn test_count_code() {
        let mut sink = DiagnosticSink::new();
        sink.extend(vec![
            Diagnostic::error("a").with_code("P0001"),
            Diagnostic::error("b").with_code("P0002"),
            Diagnostic::error("c").with_code("P0001"),
        ]);

        assert_eq!(sink.count_code("P0001"), 2);
        assert_eq!(sink.count_code("P0009"), 0);
        assert!(sink.has_errors());
    }

    #[test]
    fn test_clear() {
        let mut sink = DiagnosticSink::new();
        sink.error("error");
        sink.clear();

        assert_eq!(sink.len(), 0);
        assert!(!sink.has_errors());
    }
}
