//! Parse Errors
//!
//! 解析错误。直接实现 `chumsky::Error<Token>`，组合子产生的错误和
//! 结构校验 (validate) 发出的错误都是同一个类型。

use crate::ast::Span;
use crate::lexer::Token;
use std::fmt;
use thiserror::Error;

/// 期望的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Token(Token),
    EndOfInput,
    /// 一类输入，例如 "identifier", "expression"
    Label(&'static str),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(Token::Eof) | Expected::EndOfInput => write!(f, "end of input"),
            Expected::Token(token) => write!(f, "`{}`", token),
            Expected::Label(label) => write!(f, "{}", label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {}, found {}", expected_list(.expected), found_text(.found))]
    ExpectedToken {
        expected: Vec<Expected>,
        found: Option<Token>,
    },

    #[error("expected a type, found {}", found_text(.found))]
    ExpectedType { found: Option<Token> },

    #[error("unclosed delimiter `{open}`, found {}", found_text(.found))]
    UnbalancedDelimiter { open: Token, found: Option<Token> },

    #[error("duplicate field `{name}`")]
    DuplicateField { name: String, first: Span },

    #[error("extern function cannot have a body")]
    ExternWithBody,

    #[error("function `{name}` has no body")]
    MissingBodyForNonExtern { name: String },

    #[error("`>` left over after closing a generic argument list")]
    AmbiguousGenericClose,

    #[error("empty element in tuple")]
    InvalidTupleArity,

    #[error("match has more than one wildcard arm")]
    DuplicateWildcard,

    #[error("wildcard arm must be the last arm")]
    WildcardNotLast,

    #[error("invalid assignment target")]
    InvalidAssignTarget,

    #[error("only the last struct field may omit its name")]
    UnnamedField,

    #[error("array size must be an integer literal that fits in u64")]
    MalformedArraySize,
}

fn expected_list(expected: &[Expected]) -> String {
    match expected {
        [] => "something else".to_string(),
        [one] => one.to_string(),
        [init @ .., last] => format!(
            "one of {} or {}",
            init.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            last
        ),
    }
}

fn found_text(found: &Option<Token>) -> String {
    found
        .as_ref()
        .map_or_else(|| "end of input".to_string(), Token::describe)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl chumsky::Error<Token> for ParseError {
    type Span = Span;
    type Label = &'static str;

    fn expected_input_found<Iter: IntoIterator<Item = Option<Token>>>(
        span: Self::Span,
        expected: Iter,
        found: Option<Token>,
    ) -> Self {
        let mut list: Vec<Expected> = Vec::new();
        for item in expected {
            let item = item.map_or(Expected::EndOfInput, Expected::Token);
            if !list.contains(&item) {
                list.push(item);
            }
        }
        Self::new(
            ParseErrorKind::ExpectedToken {
                expected: list,
                found,
            },
            span,
        )
    }

    fn unclosed_delimiter(
        unclosed_span: Self::Span,
        unclosed: Token,
        _span: Self::Span,
        _expected: Token,
        found: Option<Token>,
    ) -> Self {
        Self::new(
            ParseErrorKind::UnbalancedDelimiter {
                open: unclosed,
                found,
            },
            unclosed_span,
        )
    }

    fn with_label(mut self, label: Self::Label) -> Self {
        if let ParseErrorKind::ExpectedToken { found, .. } = &self.kind {
            self.kind = if label == "type" {
                ParseErrorKind::ExpectedType {
                    found: found.clone(),
                }
            } else {
                ParseErrorKind::ExpectedToken {
                    expected: vec![Expected::Label(label)],
                    found: found.clone(),
                }
            };
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        if let (
            ParseErrorKind::ExpectedToken { expected, .. },
            ParseErrorKind::ExpectedToken {
                expected: other_expected,
                ..
            },
        ) = (&mut self.kind, other.kind)
        {
            for item in other_expected {
                if !expected.contains(&item) {
                    expected.push(item);
                }
            }
        }
        self
    }
}
