//! DiagnosticLevel - 诊断级别

use std::fmt;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticLevel {
    /// 错误 - 解析结果不完整
    Error,
    /// 警告 - 结果可用但值得注意
    Warning,
    /// 注释 - 补充说明
    Note,
}

impl DiagnosticLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name() {
        assert_eq!(DiagnosticLevel::Error.name(), "error");
        assert_eq!(DiagnosticLevel::Warning.name(), "warning");
        assert_eq!(DiagnosticLevel::Note.name(), "note");
    }

    #[test]
    fn test_is_error() {
        assert!(DiagnosticLevel::Error.is_error());
        assert!(!DiagnosticLevel::Warning.is_error());
        assert!(!DiagnosticLevel::Note.is_error());
    }
}
