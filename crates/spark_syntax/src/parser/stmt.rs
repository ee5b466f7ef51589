//! Statement Parser
//!
//! 语句解析：变量声明、赋值、return、break、cont、loop、块
//!
//! 语句之间没有分隔符。块是错误恢复的单位：块内解析失败时跳到
//! 匹配的 `}`，继续解析后面的内容。

use super::error::{ParseError, ParseErrorKind};
use super::helpers::{ident_parser, start_labelled};
use super::types::type_parser;
use crate::ast::*;
use crate::lexer::Token;
use chumsky::prelude::*;

/// 解析语句块 `{ stmt* }`
pub fn body_parser<'a>(
    expr: impl Parser<Token, Expr, Error = ParseError> + Clone + 'a,
) -> BoxedParser<'a, Token, Body, ParseError> {
    recursive(|body| {
        // 变量声明: let x, mut (i32) count = 0
        let mutability = choice((
            just(Token::Let).to(Mutability::Let),
            just(Token::Mut).to(Mutability::Mut),
        ));
        let var_decl = mutability
            .then(
                type_parser()
                    .delimited_by(just(Token::LParen), just(Token::RParen))
                    .or_not(),
            )
            .then(ident_parser())
            .map_with_span(|((mutability, ty), name), span| VarDecl {
                mutability,
                ty,
                name,
                span,
            })
            .then(just(Token::Assign).ignore_then(expr.clone()).or_not())
            .map_with_span(|(decl, value), span| match value {
                Some(value) => Stmt::Assign {
                    target: AssignTarget::Decl(decl),
                    value,
                    span,
                },
                None => Stmt::VarDecl(decl),
            });

        // Return
        let ret = just(Token::Return)
            .ignore_then(expr.clone().or_not())
            .map_with_span(|value, span| Stmt::Return { value, span });

        let brk = just(Token::Break).map_with_span(|_, span| Stmt::Break(span));
        let cont = just(Token::Cont).map_with_span(|_, span| Stmt::Continue(span));

        // loop { ... }
        let loop_stmt = just(Token::Loop)
            .ignore_then(body.clone())
            .map_with_span(|body, span| Stmt::Loop { body, span });

        // 表达式语句或赋值: f.(x), a[i] = 1
        let expr_stmt = expr
            .clone()
            .then(just(Token::Assign).ignore_then(expr).or_not())
            .validate(|(target, value), span, emit| match value {
                None => Stmt::Expr(target),
                Some(value) => {
                    if !target.is_place() {
                        emit(ParseError::new(
                            ParseErrorKind::InvalidAssignTarget,
                            target.span.clone(),
                        ));
                    }
                    Stmt::Assign {
                        target: AssignTarget::Place(target),
                        value,
                        span,
                    }
                }
            });

        let stmt = start_labelled(
            choice((var_decl, ret, brk, cont, loop_stmt, expr_stmt)),
            "statement",
        );

        stmt.repeated()
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .map_with_span(|stmts, span| Body { stmts, span })
            .recover_with(nested_delimiters(
                Token::LBrace,
                Token::RBrace,
                [
                    (Token::LParen, Token::RParen),
                    (Token::LBracket, Token::RBracket),
                ],
                |span| Body {
                    stmts: Vec::new(),
                    span,
                },
            ))
    })
    .boxed()
}
