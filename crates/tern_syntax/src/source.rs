//! Source positions
//!
//! 字节 span 之外的行列信息：AST 节点和 dump 都使用行列范围

use std::fmt;

use tern_diagnostics::Span;

/// 源码中的一个位置，行列均从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// 行列范围，`end` 指向最后一个字符之后
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// 从 self 的起点到 other 的终点
    pub fn to(self, other: SourceRange) -> SourceRange {
        SourceRange {
            start: self.start,
            end: other.end,
        }
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// 字节偏移 → 行列的查找表
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// 每一行首字节的偏移
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let bytes = text.as_bytes();
        for (offset, byte) in bytes.iter().enumerate() {
            match byte {
                b'\n' => line_starts.push(offset + 1),
                // 单独的 \r 也算换行；\r\n 只在 \n 处记一次
                b'\r' if bytes.get(offset + 1) != Some(&b'\n') => line_starts.push(offset + 1),
                _ => {}
            }
        }
        Self { line_starts }
    }

    pub fn location(&self, offset: usize) -> SourceLocation {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        SourceLocation {
            line: line + 1,
            column: offset - self.line_starts[line] + 1,
        }
    }

    pub fn range(&self, span: &Span) -> SourceRange {
        SourceRange {
            start: self.location(span.start),
            end: self.location(span.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locations_across_lines() {
        let index = LineIndex::new("import A\nimport B");
        assert_eq!(index.location(0), SourceLocation::new(1, 1));
        assert_eq!(index.location(7), SourceLocation::new(1, 8));
        assert_eq!(index.location(9), SourceLocation::new(2, 1));
        assert_eq!(index.location(16), SourceLocation::new(2, 8));
    }

    #[test]
    fn test_carriage_returns() {
        let index = LineIndex::new("a\r\nb\rc");
        assert_eq!(index.location(3), SourceLocation::new(2, 1));
        assert_eq!(index.location(5), SourceLocation::new(3, 1));
    }

    #[test]
    fn test_range_display() {
        let index = LineIndex::new("import Foundation");
        assert_eq!(index.range(&(0..17)).to_string(), "1:1-1:18");
    }
}
