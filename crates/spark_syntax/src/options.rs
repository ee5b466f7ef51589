//! Parse Options
//!
//! 前端的配置项

/// 解析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// 报告全部错误；关闭后只返回第一个
    pub recover: bool,
    /// 允许没有函数体的非 extern 函数 (原型)
    pub allow_prototypes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recover: true,
            allow_prototypes: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recover(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    pub fn with_prototypes(mut self, allow: bool) -> Self {
        self.allow_prototypes = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert!(options.recover);
        assert!(options.allow_prototypes);
    }

    #[test]
    fn test_builder() {
        let options = ParseOptions::new()
            .with_recover(false)
            .with_prototypes(false);
        assert!(!options.recover);
        assert!(!options.allow_prototypes);
    }
}
