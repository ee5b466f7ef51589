use crate::ast::{Expr, Literal};
use crate::lexer::Token;
use crate::parser::ParseError;
use chumsky::prelude::*;

/// 解析标量字面量: 数字、字符串、字符、布尔
#[allow(clippy::result_large_err)]
pub fn literal_value_parser() -> impl Parser<Token, Literal, Error = ParseError> + Clone {
    select! {
        Token::Number(n) => Literal::Number(n),
        Token::Str(s) => Literal::String(s),
        Token::Char(c) => Literal::Char(c),
        Token::True => Literal::Bool(true),
        Token::False => Literal::Bool(false),
    }
    .labelled("literal")
}

/// 解析字面量表达式
pub fn literal_parser() -> impl Parser<Token, Expr, Error = ParseError> + Clone {
    literal_value_parser().map_with_span(Expr::literal)
}
