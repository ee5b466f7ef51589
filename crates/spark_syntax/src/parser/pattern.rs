use super::expr::literal::literal_value_parser;
use super::helpers::{ident_parser, start_labelled};
use super::ParseError;
use crate::ast::{Literal, Pattern, PatternKind, TypeExpr};
use crate::lexer::Token;
use chumsky::prelude::*;

/// 解析 match 分支的模式
///
/// 字面量 (`1`, `-1`, `"a"`, `'c'`, `true`) 或类型标签 (`Circle c`, `geo:Point`)。
/// 省略模式的通配分支由 match 解析器处理。
pub fn pattern_parser(
    ty: impl Parser<Token, TypeExpr, Error = ParseError> + Clone,
) -> impl Parser<Token, Pattern, Error = ParseError> + Clone {
    // -1
    #[allow(clippy::result_large_err)]
    let negative = just(Token::Minus)
        .ignore_then(select! { Token::Number(n) => Literal::Number(n) })
        .map_with_span(|value, span| Pattern {
            kind: PatternKind::Literal {
                negated: true,
                value,
            },
            span,
        });

    let literal = literal_value_parser().map_with_span(|value, span| Pattern {
        kind: PatternKind::Literal {
            negated: false,
            value,
        },
        span,
    });

    let type_tag = ty
        .then(ident_parser().or_not())
        .map_with_span(|(ty, binding), span| Pattern {
            kind: PatternKind::TypeTag { ty, binding },
            span,
        });

    start_labelled(choice((negative, literal, type_tag)), "pattern")
}
