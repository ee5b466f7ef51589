//! Expression Parser
//!
//! 表达式解析：字面量、路径、后缀链、前缀运算与类型转换、if / match、块

pub mod binary;
pub mod literal;

use super::error::{ParseError, ParseErrorKind};
use super::helpers::{check_unique_names, ident_parser, path_parser, start_labelled};
use super::pattern::pattern_parser;
use super::stmt::body_parser;
use super::types::type_parser;
use crate::ast::*;
use crate::lexer::Token;
use chumsky::prelude::*;

#[derive(Clone)]
enum PostfixOp {
    Index(Expr, Span),
    Field(Ident),
    Call(Vec<Expr>, Span),
}

#[derive(Clone)]
enum PrefixOp {
    Unary(UnaryOp, Span),
    Cast(TypeExpr, Span),
}

/// 解析表达式 (公共接口)
pub fn expr_parser() -> impl Parser<Token, Expr, Error = ParseError> + Clone {
    recursive(|expr| {
        let ty = type_parser().boxed();
        let body = body_parser(expr.clone());

        // 字面量
        let val = literal::literal_parser();

        // 变量或限定名
        let path = path_parser().map(|path| Expr {
            span: path.span.clone(),
            kind: ExprKind::Path(path),
        });

        // Array literal: [1, 2, 3]
        let array = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map_with_span(|items, span| Expr::literal(Literal::Array(items), span));

        // (), (e), (e,), (a, b)
        let group = expr
            .clone()
            .or_not()
            .then(
                just(Token::Comma)
                    .ignore_then(expr.clone().or_not())
                    .repeated(),
            )
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .validate(|(first, rest), span, emit| group_expr(first, rest, span, emit));

        // Struct literal: #Point { x = 1, y = 2 } 或 #{ x = 1 }
        let field_init = ident_parser()
            .then_ignore(just(Token::Assign))
            .then(expr.clone())
            .map(|(name, value)| FieldInit { name, value });
        let struct_literal = just(Token::Hash)
            .ignore_then(ty.clone().or_not())
            .then(
                field_init
                    .separated_by(just(Token::Comma))
                    .allow_trailing()
                    .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            )
            .validate(|(ty, fields), span, emit| {
                check_unique_names(fields.iter().map(|f| &f.name), emit);
                Expr::literal(Literal::Struct { ty, fields }, span)
            });

        let block = body.clone().map(|body| Expr {
            span: body.span.clone(),
            kind: ExprKind::Block(body),
        });

        // if cond { ... } else if ... else { ... }
        let if_expr = recursive(|if_expr| {
            just(Token::If)
                .ignore_then(expr.clone())
                .then(body.clone())
                .then(
                    just(Token::Else)
                        .ignore_then(
                            body.clone()
                                .map(ElseBranch::Body)
                                .or(if_expr.map(|e| ElseBranch::If(Box::new(e)))),
                        )
                        .or_not(),
                )
                .map_with_span(|((cond, then_body), else_branch), span| Expr {
                    kind: ExprKind::If(IfExpr {
                        cond: Box::new(cond),
                        then_body,
                        else_branch,
                    }),
                    span,
                })
        });

        // match value { pattern -> expr, -> default }
        let arm = pattern_parser(ty.clone())
            .or_not()
            .then(just(Token::Arrow).map_with_span(|_, span: Span| span))
            .then(expr.clone())
            .map_with_span(|((pattern, arrow), body), span| MatchArm {
                pattern: pattern.unwrap_or(Pattern {
                    kind: PatternKind::Wildcard,
                    span: arrow,
                }),
                body,
                span,
            });
        let match_expr = just(Token::Match)
            .ignore_then(expr.clone())
            .then(
                arm.separated_by(just(Token::Comma))
                    .allow_trailing()
                    .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            )
            .validate(|(scrutinee, arms), span, emit| {
                check_wildcards(&arms, emit);
                Expr {
                    kind: ExprKind::Match {
                        scrutinee: Box::new(scrutinee),
                        arms,
                    },
                    span,
                }
            });

        let atom = start_labelled(
            choice((
                val,
                struct_literal,
                array,
                group,
                block,
                if_expr,
                match_expr,
                path,
            )),
            "expression",
        )
        .boxed();

        // 后缀操作符: 索引 a[i]，成员 a.x，调用 f.(x, y)
        let call_args = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .delimited_by(just(Token::LParen), just(Token::RParen));
        let postfix_op = choice((
            expr.clone()
                .delimited_by(just(Token::LBracket), just(Token::RBracket))
                .map_with_span(PostfixOp::Index),
            just(Token::Dot).ignore_then(choice((
                ident_parser().map(PostfixOp::Field),
                call_args.map_with_span(PostfixOp::Call),
            ))),
        ));
        let postfix = atom
            .then(postfix_op.repeated())
            .foldl(|lhs, op| match op {
                PostfixOp::Index(index, index_span) => {
                    let span = lhs.span.start..index_span.end;
                    Expr {
                        kind: ExprKind::Index {
                            base: Box::new(lhs),
                            index: Box::new(index),
                        },
                        span,
                    }
                }
                PostfixOp::Field(field) => {
                    let span = lhs.span.start..field.span.end;
                    Expr {
                        kind: ExprKind::Field {
                            base: Box::new(lhs),
                            field,
                        },
                        span,
                    }
                }
                PostfixOp::Call(args, call_span) => {
                    let span = lhs.span.start..call_span.end;
                    Expr {
                        kind: ExprKind::Call {
                            callee: Box::new(lhs),
                            args,
                        },
                        span,
                    }
                }
            })
            .boxed();

        // 前缀: !x, -x, ~x, $f64 x
        let prefix = choice((
            just(Token::Bang).to(UnaryOp::Not),
            just(Token::Minus).to(UnaryOp::Neg),
            just(Token::Tilde).to(UnaryOp::BitNot),
        ))
        .map_with_span(PrefixOp::Unary)
        .or(just(Token::Dollar)
            .ignore_then(ty)
            .map_with_span(PrefixOp::Cast));

        let unary = prefix
            .repeated()
            .then(postfix)
            .foldr(|op, rhs| match op {
                PrefixOp::Unary(op, span) => {
                    let span = span.start..rhs.span.end;
                    Expr {
                        kind: ExprKind::Unary(op, Box::new(rhs)),
                        span,
                    }
                }
                PrefixOp::Cast(ty, span) => {
                    let span = span.start..rhs.span.end;
                    Expr {
                        kind: ExprKind::Cast {
                            ty,
                            operand: Box::new(rhs),
                        },
                        span,
                    }
                }
            })
            .boxed();

        start_labelled(binary::parser(unary), "expression")
    })
}

/// 括号分组
///
/// `()` 是空元组，`(e)` 就是 e，带逗号的是元组，允许一个尾逗号。
fn group_expr(
    first: Option<Expr>,
    rest: Vec<Option<Expr>>,
    span: Span,
    emit: &mut dyn FnMut(ParseError),
) -> Expr {
    if rest.is_empty() {
        return match first {
            Some(inner) => Expr::new(inner.kind, span),
            None => Expr::literal(Literal::Tuple(Vec::new()), span),
        };
    }

    let mut elements: Vec<Option<Expr>> = std::iter::once(first).chain(rest).collect();
    if matches!(elements.last(), Some(None)) {
        elements.pop();
    }
    if elements.iter().any(Option::is_none) {
        emit(ParseError::new(
            ParseErrorKind::InvalidTupleArity,
            span.clone(),
        ));
    }
    Expr::literal(Literal::Tuple(elements.into_iter().flatten().collect()), span)
}

/// 通配分支最多一个，并且必须是最后一个
fn check_wildcards(arms: &[MatchArm], emit: &mut dyn FnMut(ParseError)) {
    let wildcards: Vec<usize> = arms
        .iter()
        .enumerate()
        .filter(|(_, arm)| arm.pattern.is_wildcard())
        .map(|(i, _)| i)
        .collect();

    match wildcards.as_slice() {
        [] => {}
        [only] => {
            if *only + 1 != arms.len() {
                emit(ParseError::new(
                    ParseErrorKind::WildcardNotLast,
                    arms[*only].pattern.span.clone(),
                ));
            }
        }
        [_, extra @ ..] => {
            for i in extra {
                emit(ParseError::new(
                    ParseErrorKind::DuplicateWildcard,
                    arms[*i].pattern.span.clone(),
                ));
            }
        }
    }
}
