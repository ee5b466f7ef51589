//! Binary Expression Parser
//!
//! 按 `BinaryOp::PRECEDENCE` 逐级构建二元运算解析器，每一级左结合。

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::ParseError;
use chumsky::prelude::*;
use spark_diagnostics::SpanExt;

/// 单个运算符对应的 Token 序列
///
/// `>>` 和 `>=` 在解析器输入里已经被拆成两半，这里再拼回来。
fn operator(op: BinaryOp) -> BoxedParser<'static, Token, BinaryOp, ParseError> {
    let token = match op {
        BinaryOp::Mul => Token::Star,
        BinaryOp::Div => Token::Slash,
        BinaryOp::Rem => Token::Percent,
        BinaryOp::Add => Token::Plus,
        BinaryOp::Sub => Token::Minus,
        BinaryOp::Shl => Token::Shl,
        BinaryOp::Shr => {
            return just(Token::GtJoint)
                .then(just(Token::Gt))
                .to(op)
                .boxed()
        }
        BinaryOp::Lt => Token::Lt,
        BinaryOp::Gt => Token::Gt,
        BinaryOp::Le => Token::Leq,
        BinaryOp::Ge => {
            return just(Token::GtJoint)
                .then(just(Token::Assign))
                .to(op)
                .boxed()
        }
        BinaryOp::Eq => Token::EqEq,
        BinaryOp::Ne => Token::NotEq,
        BinaryOp::BitAnd => Token::Amp,
        BinaryOp::BitXor => Token::Caret,
        BinaryOp::BitOr => Token::Pipe,
        BinaryOp::And => Token::AndAnd,
        BinaryOp::Or => Token::OrOr,
    };
    just(token).to(op).boxed()
}

pub fn parser<'a>(
    unary: impl Parser<Token, Expr, Error = ParseError> + Clone + 'a,
) -> impl Parser<Token, Expr, Error = ParseError> + Clone + 'a {
    let mut level: BoxedParser<'a, Token, Expr, ParseError> = unary.boxed();

    for ops in BinaryOp::PRECEDENCE {
        let op = ops[1..]
            .iter()
            .fold(operator(ops[0]), |acc, op| acc.or(operator(*op)).boxed());

        level = level
            .clone()
            .then(op.then(level).repeated())
            .foldl(|lhs, (op, rhs)| {
                let span = lhs.span.join(&rhs.span);
                Expr {
                    kind: ExprKind::Binary(Box::new(lhs), op, Box::new(rhs)),
                    span,
                }
            })
            .boxed();
    }

    level
}
