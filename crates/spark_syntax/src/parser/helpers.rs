//! Parser Helper Functions
//!
//! 辅助解析函数：标识符、路径、重名检查

use super::error::{ParseError, ParseErrorKind};
use crate::ast::{Ident, Path, Span};
use crate::lexer::Token;
use chumsky::prelude::*;
use std::collections::HashMap;

/// 解析标识符
#[allow(clippy::result_large_err)]
pub fn ident_parser() -> impl Parser<Token, Ident, Error = ParseError> + Clone {
    select! { Token::Ident(name) => name }
        .map_with_span(|name, span| Ident { name, span })
        .labelled("identifier")
}

/// 只在第一个 token 就失败时把错误换成 `label`
///
/// `labelled` 会改写所有向外传出的错误，已经进入内部的错误也会被换掉，
/// 原本的期望集合就丢了。这里借 `map_err_with_span` 给出的起点判断：
/// 错误位置和起点相同，说明一个 token 都没吃下。
pub fn start_labelled<O>(
    parser: impl Parser<Token, O, Error = ParseError> + Clone,
    label: &'static str,
) -> impl Parser<Token, O, Error = ParseError> + Clone {
    parser.map_err_with_span(move |err: ParseError, span: Span| {
        if err.span.start == span.start {
            err.with_label(label)
        } else {
            err
        }
    })
}

/// 解析路径: ident (':' ident)*
pub fn path_parser() -> impl Parser<Token, Path, Error = ParseError> + Clone {
    ident_parser()
        .then(just(Token::Colon).ignore_then(ident_parser()).repeated())
        .map_with_span(|(first, rest), span| {
            let mut segments = Vec::with_capacity(rest.len() + 1);
            segments.push(first);
            segments.extend(rest);
            Path { segments, span }
        })
}

/// 检查名字是否重复，重复的报 DuplicateField 并记下第一次出现的位置
pub fn check_unique_names<'a>(
    names: impl IntoIterator<Item = &'a Ident>,
    emit: &mut dyn FnMut(ParseError),
) {
    let mut seen: HashMap<&str, Span> = HashMap::new();
    for ident in names {
        match seen.get(ident.name.as_str()) {
            Some(first) => emit(ParseError::new(
                ParseErrorKind::DuplicateField {
                    name: ident.name.clone(),
                    first: first.clone(),
                },
                ident.span.clone(),
            )),
            None => {
                seen.insert(&ident.name, ident.span.clone());
            }
        }
    }
}
