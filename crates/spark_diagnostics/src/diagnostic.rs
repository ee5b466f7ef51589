//! Diagnostic
//!
//! 一条诊断：级别、错误码、主位置，以及附加标注、注释和修复建议。

use crate::level::DiagnosticLevel;
use crate::span::Span;

/// 修复建议，可以附带替换文本
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub message: String,
    pub replacement: Option<String>,
}

impl Suggestion {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    pub fn with_replacement(self, replacement: impl Into<String>) -> Self {
        Self {
            replacement: Some(replacement.into()),
            ..self
        }
    }
}

/// 指向另一处源码的标注，例如重复定义的第一次出现
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryLabel {
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// 错误码，例如 "E0103"
    pub code: Option<&'static str>,
    pub message: String,
    pub file: Option<String>,
    /// 主位置；没有位置的诊断按纯文本输出
    pub span: Option<Span>,
    pub labels: Vec<SecondaryLabel>,
    pub notes: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            code: None,
            message: message.into(),
            file: None,
            span: None,
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    pub fn with_code(self, code: &'static str) -> Self {
        Self {
            code: Some(code),
            ..self
        }
    }

    pub fn with_file(self, file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..self
        }
    }

    pub fn span(self, span: Span) -> Self {
        Self {
            span: Some(span),
            ..self
        }
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        let message = message.into();
        self.labels.push(SecondaryLabel { span, message });
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

    /// 只有说明文字、没有替换文本的建议
    pub fn suggest(self, message: impl Into<String>) -> Self {
        self.with_suggestion(Suggestion::new(message))
    }

    /// 排序用的起始偏移，没有位置的排在最后
    pub fn sort_key(&self) -> usize {
        match &self.span {
            Some(span) => span.start,
            None => usize::MAX,
        }
    }
}
