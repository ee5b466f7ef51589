//! Syntax Errors
//!
//! 前端错误的统一类型，以及到 `spark_diagnostics` 的转换。
//!
//! 错误码：词法错误 E00xx，解析错误 E01xx。

use crate::ast::Span;
use crate::lexer::{LexError, LexErrorKind};
use crate::parser::{ParseError, ParseErrorKind};
use spark_diagnostics::{Diagnostic, DiagnosticSink, Suggestion};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(err) => err.span.clone(),
            SyntaxError::Parse(err) => err.span.clone(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SyntaxError::Lex(err) => match err.kind {
                LexErrorKind::MalformedNumber => "E0001",
                LexErrorKind::UnterminatedLiteral => "E0002",
                LexErrorKind::UnrecognizedCharacter => "E0003",
                LexErrorKind::MalformedChar => "E0004",
            },
            SyntaxError::Parse(err) => match err.kind {
                ParseErrorKind::ExpectedToken { .. } => "E0101",
                ParseErrorKind::ExpectedType { .. } => "E0102",
                ParseErrorKind::UnbalancedDelimiter { .. } => "E0103",
                ParseErrorKind::DuplicateField { .. } => "E0104",
                ParseErrorKind::ExternWithBody => "E0105",
                ParseErrorKind::MissingBodyForNonExtern { .. } => "E0106",
                ParseErrorKind::AmbiguousGenericClose => "E0107",
                ParseErrorKind::InvalidTupleArity => "E0108",
                ParseErrorKind::DuplicateWildcard => "E0109",
                ParseErrorKind::WildcardNotLast => "E0110",
                ParseErrorKind::InvalidAssignTarget => "E0111",
                ParseErrorKind::UnnamedField => "E0112",
                ParseErrorKind::MalformedArraySize => "E0113",
            },
        }
    }

    /// 转换为诊断信息
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string())
            .with_code(self.code())
            .span(self.span());

        match self {
            SyntaxError::Lex(err) => match err.kind {
                LexErrorKind::MalformedNumber => {
                    diag.with_note("numbers are decimal, or 0b / 0o / 0x prefixed integers")
                }
                LexErrorKind::UnterminatedLiteral => diag.suggest("add the closing quote"),
                _ => diag,
            },
            SyntaxError::Parse(err) => match &err.kind {
                ParseErrorKind::DuplicateField { first, .. } => {
                    diag.with_label(first.clone(), "first defined here")
                }
                ParseErrorKind::UnbalancedDelimiter { open, .. } => {
                    diag.with_note(format!("`{}` opened here is never closed", open))
                }
                ParseErrorKind::AmbiguousGenericClose => diag.with_suggestion(
                    Suggestion::new("put a space between the closing `>` characters")
                        .with_replacement("> >"),
                ),
                ParseErrorKind::ExternWithBody => {
                    diag.suggest("remove `extern` or remove the function body")
                }
                ParseErrorKind::MissingBodyForNonExtern { .. } => {
                    diag.suggest("add a body or mark the function `extern`")
                }
                ParseErrorKind::WildcardNotLast => {
                    diag.with_note("arms after the wildcard are unreachable")
                }
                ParseErrorKind::UnnamedField => {
                    diag.with_note("an unnamed field is only allowed in the last position")
                }
                _ => diag,
            },
        }
    }
}

/// 把一组错误转换成诊断，按位置排序
pub fn report(errors: &[SyntaxError], file: &str) -> Vec<Diagnostic> {
    let mut sink = DiagnosticSink::new();
    sink.extend(errors.iter().map(|err| err.to_diagnostic().with_file(file)));
    sink.into_sorted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Token;

    fn parse_error(kind: ParseErrorKind, span: Span) -> SyntaxError {
        SyntaxError::Parse(ParseError::new(kind, span))
    }

    #[test]
    fn test_codes() {
        let lex = SyntaxError::from(LexError {
            kind: LexErrorKind::UnrecognizedCharacter,
            span: 4..5,
            lexeme: "@".to_string(),
        });
        assert_eq!(lex.code(), "E0003");
        assert_eq!(lex.span(), 4..5);
        assert_eq!(lex.to_string(), "unrecognized character `@`");

        let parse = parse_error(ParseErrorKind::InvalidTupleArity, 0..3);
        assert_eq!(parse.code(), "E0108");
    }

    #[test]
    fn test_duplicate_field_label() {
        let err = parse_error(
            ParseErrorKind::DuplicateField {
                name: "a".to_string(),
                first: 3..4,
            },
            10..11,
        );
        let diag = err.to_diagnostic();
        assert_eq!(diag.message, "duplicate field `a`");
        assert_eq!(diag.code, Some("E0104"));
        assert_eq!(diag.span, Some(10..11));
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.labels[0].span, 3..4);
    }

    #[test]
    fn test_expected_token_message() {
        let err = parse_error(
            ParseErrorKind::ExpectedToken {
                expected: vec![crate::parser::Expected::Token(Token::RBrace)],
                found: Some(Token::Comma),
            },
            7..8,
        );
        assert!(err.to_string().starts_with("expected `}`"));
    }

    #[test]
    fn test_report_sorted_with_file() {
        let errors = vec![
            parse_error(ParseErrorKind::UnnamedField, 20..23),
            parse_error(ParseErrorKind::ExternWithBody, 5..11),
        ];
        let diags = report(&errors, "main.spk");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].code, Some("E0105"));
        assert_eq!(diags[1].code, Some("E0112"));
        assert!(diags.iter().all(|d| d.file.as_deref() == Some("main.spk")));
        assert_eq!(diags[0].suggestions.len(), 1);
    }
}
