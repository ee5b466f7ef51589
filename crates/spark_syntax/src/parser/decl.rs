//! Declaration Parser
//!
//! 顶层声明解析：imp、fun、type

use super::error::{ParseError, ParseErrorKind};
use super::expr::expr_parser;
use super::helpers::{check_unique_names, ident_parser, path_parser};
use super::stmt::body_parser;
use super::types::type_parser;
use crate::ast::*;
use crate::lexer::Token;
use crate::options::ParseOptions;
use chumsky::prelude::*;

/// 解析一个顶层声明 (公共接口)
///
/// 解析失败时逐个跳过 token，直到下一个能开始声明的位置。
pub fn item_parser(options: ParseOptions) -> impl Parser<Token, Item, Error = ParseError> + Clone {
    choice((import_parser(), type_def_parser(), function_parser(options)))
        .recover_with(skip_then_retry_until([Token::Eof]))
        .boxed()
}

// imp std:io
fn import_parser() -> impl Parser<Token, Item, Error = ParseError> + Clone {
    just(Token::Imp)
        .ignore_then(path_parser())
        .map_with_span(|path, span| Item::Import(ImportDecl { path, span }))
}

// fun area geo:Shape s -> f64 { ... }
fn function_parser(options: ParseOptions) -> impl Parser<Token, Item, Error = ParseError> + Clone {
    let param = type_parser()
        .then(ident_parser())
        .map_with_span(|(ty, name), span| Param { ty, name, span });

    // 以 `{` 开头就必须是完整的函数体，不能退回成没有函数体
    let body = body_parser(expr_parser())
        .map(Some)
        .or(just(Token::LBrace).not().rewind().to(None));

    just(Token::Fun)
        .ignore_then(ident_parser())
        .then(param.separated_by(just(Token::Comma)))
        .then(just(Token::Arrow).ignore_then(type_parser()).or_not())
        .then(just(Token::Extern).map_with_span(|_, span: Span| span).or_not())
        .then(body)
        .validate(
            move |((((name, params), ret), extern_span), body), span, emit| {
                let is_extern = extern_span.is_some();
                let body = match (extern_span, body) {
                    (Some(at), Some(_)) => {
                        emit(ParseError::new(ParseErrorKind::ExternWithBody, at));
                        None
                    }
                    (None, None) if !options.allow_prototypes => {
                        emit(ParseError::new(
                            ParseErrorKind::MissingBodyForNonExtern {
                                name: name.name.clone(),
                            },
                            name.span.clone(),
                        ));
                        None
                    }
                    (_, body) => body,
                };
                Item::Function(FunctionDecl {
                    name,
                    params,
                    ret,
                    is_extern,
                    body,
                    span,
                })
            },
        )
}

// type Point = { i32 x, i32 y }
// type Shape = Circle | Square
fn type_def_parser() -> impl Parser<Token, Item, Error = ParseError> + Clone {
    // <T, U>，`type Box<T>= ...` 里的 `>=` 被拆开后以 GtJoint 收尾。
    // `type T<A>> = ...` 以 GtJoint 收尾后还剩一个 `>`，报错后跳过它
    let close = just(Token::Gt).to(None::<Span>).or(just(Token::GtJoint).ignore_then(
        just(Token::Gt)
            .map_with_span(|_, span: Span| span)
            .or_not(),
    ));
    let generics = just(Token::Lt)
        .ignore_then(
            ident_parser()
                .separated_by(just(Token::Comma))
                .allow_trailing()
                .at_least(1),
        )
        .then(close)
        .validate(|(generics, dangling), _span, emit| {
            if let Some(at) = dangling {
                emit(ParseError::new(ParseErrorKind::AmbiguousGenericClose, at));
            }
            generics
        })
        .or_not()
        .map(Option::unwrap_or_default);

    let field = type_parser()
        .then(ident_parser().or_not())
        .map_with_span(|(ty, name), span| StructField { ty, name, span });
    let struct_body = field
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .validate(|fields: Vec<StructField>, _span, emit| {
            let last = fields.len().saturating_sub(1);
            for field in &fields[..last] {
                if field.name.is_none() {
                    emit(ParseError::new(
                        ParseErrorKind::UnnamedField,
                        field.span.clone(),
                    ));
                }
            }
            check_unique_names(fields.iter().filter_map(|f| f.name.as_ref()), emit);
            TypeDefBody::Struct(fields)
        });

    let variants = type_parser()
        .separated_by(just(Token::Pipe))
        .at_least(1)
        .map(|mut variants| {
            if variants.len() == 1 {
                TypeDefBody::Alias(variants.remove(0))
            } else {
                TypeDefBody::Union(variants)
            }
        });

    just(Token::Type)
        .ignore_then(ident_parser())
        .then(generics)
        .then_ignore(just(Token::Assign))
        .then(struct_body.or(variants))
        .map_with_span(|((name, generics), body), span| {
            Item::Type(TypeDef {
                name,
                generics,
                body,
                span,
            })
        })
}
