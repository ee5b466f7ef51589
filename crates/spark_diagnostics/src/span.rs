//! Span - 源码位置信息
//!
//! 表示源代码中的位置范围，以及字节偏移到行列号的换算

/// 源码位置范围 (字节偏移)
pub type Span = std::ops::Range<usize>;

/// Span 辅助函数
pub trait SpanExt {
    /// 创建一个新的 Span
    fn new(start: usize, end: usize) -> Self;

    /// 获取起始位置
    fn start(&self) -> usize;

    /// 获取结束位置
    fn end(&self) -> usize;

    /// 获取长度
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool;

    /// 覆盖两个 Span 的最小范围
    fn join(&self, other: &Self) -> Self;
}

impl SpanExt for Span {
    fn new(start: usize, end: usize) -> Self {
        start..end
    }

    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.end
    }

    fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    fn join(&self, other: &Self) -> Self {
        self.start.min(other.start)..self.end.max(other.end)
    }
}

/// 行列号 (均从 1 开始，列按字符计数)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// 行首偏移表，用于把字节偏移换算成行列号
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    /// 行数 (空文件也算一行)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 字节偏移 -> 行列号，超出范围时夹到文件末尾
    pub fn line_col(&self, offset: usize) -> LineCol {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        LineCol {
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_creation() {
        let span = Span::new(10, 20);
        assert_eq!(span.start(), 10);
        assert_eq!(span.end(), 20);
        assert_eq!(SpanExt::len(&span), 10);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_empty_span() {
        let span = Span::new(5, 5);
        assert!(span.is_empty());
        assert_eq!(SpanExt::len(&span), 0);
    }

    #[test]
    fn test_span_join() {
        let a = Span::new(4, 8);
        let b = Span::new(2, 6);
        assert_eq!(a.join(&b), 2..8);
    }

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("fun main {\n  return 1\n}");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(0), LineCol { line: 1, column: 1 });
        assert_eq!(index.line_col(4), LineCol { line: 1, column: 5 });
        assert_eq!(index.line_col(11), LineCol { line: 2, column: 1 });
        assert_eq!(index.line_col(13), LineCol { line: 2, column: 3 });
        assert_eq!(index.line_col(22), LineCol { line: 3, column: 1 });
    }

    #[test]
    fn test_line_col_counts_chars() {
        // 'é' 占两个字节，但列号按字符计
        let index = LineIndex::new("\"é\" x");
        assert_eq!(index.line_col(5), LineCol { line: 1, column: 5 });
    }

    #[test]
    fn test_line_col_clamps() {
        let index = LineIndex::new("ab");
        assert_eq!(index.line_col(100), LineCol { line: 1, column: 3 });
    }
}
