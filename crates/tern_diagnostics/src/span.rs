//! Span - 源码字节范围

/// 源码位置范围 (字节偏移，左闭右开)
pub type Span = std::ops::Range<usize>;

/// Span 辅助函数
pub trait SpanExt {
    fn new(start: usize, end: usize) -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool;

    /// 覆盖两个 span 的最小范围
    fn to(&self, other: &Self) -> Self;
}

impl SpanExt for Span {
    fn new(start: usize, end: usize) -> Self {
        start..end
    }

    fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    fn to(&self, other: &Self) -> Self {
        self.start.min(other.start)..self.end.max(other.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_creation() {
        let span = <Span as SpanExt>::new(10, 20);
        assert_eq!(SpanExt::len(&span), 10);
        assert!(!SpanExt::is_empty(&span));
    }

    #[test]
    fn test_span_to() {
        let a: Span = 4..9;
        let b: Span = 12..15;
        assert_eq!(a.to(&b), 4..15);
        assert_eq!(b.to(&a), 4..15);
    }
}
