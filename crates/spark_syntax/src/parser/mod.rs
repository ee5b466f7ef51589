//! Parser Module
//!
//! 模块化的 Parser 实现，按语法类别拆分：类型、表达式、模式、语句、声明。
//!
//! 解析器的输入不是词法分析器的原始输出，而是经过 [`split_tokens`] 处理
//! 的 token 流：`>>` 和 `>=` 被拆成两半，方便泛型参数列表收尾。

pub mod decl;
pub mod error;
pub mod expr;
pub mod helpers;
pub mod pattern;
pub mod stmt;
pub mod types;


pub use error::{Expected, ParseError, ParseErrorKind};

use crate::ast::{Module, Span};
use crate::lexer::{SpannedToken, Token};
use crate::options::ParseOptions;
use chumsky::prelude::*;
use chumsky::Stream;

/// 主入口：解析整个源文件
pub fn module_parser(options: ParseOptions) -> impl Parser<Token, Module, Error = ParseError> {
    decl::item_parser(options)
        .repeated()
        .then_ignore(just(Token::Eof))
        .map(|items| Module { items })
}

/// 把词法分析结果转成解析器的输入
///
/// `>>` 变成 `GtJoint` + `>`，`>=` 变成 `GtJoint` + `=`，两半各占一个字节。
pub fn split_tokens(tokens: impl IntoIterator<Item = SpannedToken>) -> Vec<(Token, Span)> {
    let mut out = Vec::new();
    for SpannedToken { token, span, .. } in tokens {
        let second = match token {
            Token::Shr => Token::Gt,
            Token::Geq => Token::Assign,
            token => {
                out.push((token, span));
                continue;
            }
        };
        let mid = span.start + 1;
        out.push((Token::GtJoint, span.start..mid));
        out.push((second, mid..span.end));
    }
    out
}

/// 用给定的解析器解析 token 流，返回结果和按位置排序的错误
///
/// 括号是否配对由 [`check_delimiters`] 统一判断。解析器在同一位置报的
/// "期望某个 token" 只是没闭合的括号引起的，不再重复报告。
pub fn parse_tokens<O>(
    parser: impl Parser<Token, O, Error = ParseError>,
    tokens: Vec<(Token, Span)>,
    source_len: usize,
) -> (Option<O>, Vec<ParseError>) {
    let eoi = source_len..source_len;
    let unclosed = check_delimiters(&tokens, eoi.clone());

    let stream = Stream::from_iter(eoi, tokens.into_iter());
    let (output, errors) = parser.parse_recovery(stream);

    let mut errors: Vec<ParseError> = errors
        .into_iter()
        .filter(|error| match error.kind {
            ParseErrorKind::UnbalancedDelimiter { .. } => false,
            ParseErrorKind::ExpectedToken { .. } | ParseErrorKind::ExpectedType { .. } => {
                !unclosed.iter().any(|u| u.found_at == error.span.start)
            }
            _ => true,
        })
        .collect();
    errors.extend(unclosed.into_iter().map(|u| u.error));
    errors.sort_by_key(|error| error.span.start);
    errors.dedup();
    (output, errors)
}

/// 没有闭合的括号
#[derive(Debug)]
pub struct Unclosed {
    /// `UnbalancedDelimiter`，位置是左括号
    pub error: ParseError,
    /// 发现问题的位置：不匹配的右括号，或者输入结尾
    pub found_at: usize,
}

fn closing(open: &Token) -> Option<Token> {
    match open {
        Token::LParen => Some(Token::RParen),
        Token::LBracket => Some(Token::RBracket),
        Token::LBrace => Some(Token::RBrace),
        _ => None,
    }
}

/// 检查 `(` `[` `{` 是否配对
///
/// 右括号能对上栈里更早的左括号时，中间没闭合的都报错；对不上任何
/// 左括号的右括号交给解析器报。到结尾还在栈里的左括号全部报错。
pub fn check_delimiters(tokens: &[(Token, Span)], eoi: Span) -> Vec<Unclosed> {
    let mut stack: Vec<(Token, Span)> = Vec::new();
    let mut unclosed = Vec::new();

    let unclosed_at = |(open, span): (Token, Span), found: Option<Token>, at: usize| Unclosed {
        error: ParseError::new(ParseErrorKind::UnbalancedDelimiter { open, found }, span),
        found_at: at,
    };

    for (token, span) in tokens {
        if *token == Token::Eof {
            break;
        }
        if closing(token).is_some() {
            stack.push((token.clone(), span.clone()));
            continue;
        }
        if !matches!(token, Token::RParen | Token::RBracket | Token::RBrace) {
            continue;
        }
        let matched = stack
            .iter()
            .rposition(|(open, _)| closing(open).as_ref() == Some(token));
        if let Some(index) = matched {
            for open in stack.drain(index + 1..).rev() {
                unclosed.push(unclosed_at(open, Some(token.clone()), span.start));
            }
            stack.pop();
        }
    }

    let end = tokens
        .iter()
        .find(|(token, _)| *token == Token::Eof)
        .map_or(eoi.start, |(_, span)| span.start);
    while let Some(open) = stack.pop() {
        unclosed.push(unclosed_at(open, None, end));
    }
    unclosed
}
