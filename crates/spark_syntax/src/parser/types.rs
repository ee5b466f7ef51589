//! Type Parser
//!
//! 类型表达式解析：基础类型、命名类型 (泛型)、指针、数组、函数类型。
//!
//! 解析器的输入里 `>>` 被拆成 `GtJoint` + `>`，`>=` 被拆成 `GtJoint` + `=`。
//! 泛型参数列表可以用 `>` 或 `GtJoint` 收尾；内部解析器同时返回
//! "最后一个收尾符是不是 GtJoint"，完整类型如果以 GtJoint 收尾，
//! 后面就剩下一个没有归属的 `>`，报 AmbiguousGenericClose。

use super::error::{ParseError, ParseErrorKind};
use super::helpers::{path_parser, start_labelled};
use crate::ast::{NumberLit, TypeExpr, TypeKind};
use crate::lexer::Token;
use chumsky::prelude::*;

/// (类型, 是否以 GtJoint 收尾)
type Closed = (TypeExpr, bool);

/// 解析一个完整的类型
pub fn type_parser() -> impl Parser<Token, TypeExpr, Error = ParseError> + Clone {
    complete(closed_type_parser())
}

/// 丢掉收尾标记，以 GtJoint 收尾时报错
fn complete(
    ty: impl Parser<Token, Closed, Error = ParseError> + Clone,
) -> impl Parser<Token, TypeExpr, Error = ParseError> + Clone {
    ty.validate(|(ty, dangling), _span, emit| {
        if dangling {
            let at = ty.span.end;
            emit(ParseError::new(
                ParseErrorKind::AmbiguousGenericClose,
                at..at + 1,
            ))
        }
        ty
    })
}

fn closed_type_parser() -> impl Parser<Token, Closed, Error = ParseError> + Clone {
    recursive(|ty| {
        // i32, bool ...
        let primitive = select! { Token::Prim(p) => p }
            .map_with_span(|p, span| (TypeExpr::new(TypeKind::Primitive(p), span), false));

        // <T, U>，以 `>` 或 GtJoint 收尾
        let generics = just(Token::Lt)
            .ignore_then(
                ty.clone()
                    .map(|(arg, _): Closed| arg)
                    .separated_by(just(Token::Comma))
                    .allow_trailing()
                    .at_least(1),
            )
            .then(choice((
                just(Token::Gt).to(false),
                just(Token::GtJoint).to(true),
            )));

        // geo:Shape, Map<K, V>
        let named = path_parser()
            .then(generics.or_not())
            .map_with_span(|(path, generics), span| {
                let (generics, joint) = generics.unwrap_or_default();
                (TypeExpr::new(TypeKind::Named { path, generics }, span), joint)
            });

        // *T
        let pointer = just(Token::Star)
            .ignore_then(ty.clone())
            .map_with_span(|(inner, joint): Closed, span| {
                (TypeExpr::new(TypeKind::Pointer(Box::new(inner)), span), joint)
            });

        // [4]T 或 []T
        let size = select! { Token::Number(n) => n }.validate(
            |n: NumberLit, span, emit| {
                let size = n.as_u64();
                if size.is_none() {
                    emit(ParseError::new(ParseErrorKind::MalformedArraySize, span))
                }
                size
            },
        );
        let array = size
            .or_not()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .then(ty.clone())
            .map_with_span(|(size, (element, joint)): (_, Closed), span| {
                let kind = TypeKind::Array {
                    size: size.flatten(),
                    element: Box::new(element),
                };
                (TypeExpr::new(kind, span), joint)
            });

        // (T) / (A, B) -> R / () / (T,)
        let element = complete(ty.clone())
            .or_not()
            .map_with_span(|ty, span| (ty, span));
        let paren = element
            .clone()
            .then(just(Token::Comma).ignore_then(element).repeated())
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .then(just(Token::Arrow).ignore_then(ty.clone()).or_not())
            .validate(|((first, rest), ret), span, emit| {
                let has_comma = !rest.is_empty();
                let mut elements: Vec<_> = std::iter::once(first).chain(rest).collect();
                // 尾逗号
                if elements.len() > 1 && matches!(elements.last(), Some((None, _))) {
                    elements.pop();
                }

                let mut params = Vec::with_capacity(elements.len());
                for (element, element_span) in elements {
                    match element {
                        Some(ty) => params.push(ty),
                        None if has_comma => emit(ParseError::new(
                            ParseErrorKind::ExpectedType {
                                found: Some(Token::Comma),
                            },
                            element_span,
                        )),
                        None => {}
                    }
                }

                match ret {
                    None if params.len() == 1 && !has_comma => {
                        // (T) 就是 T
                        let inner = params.remove(0);
                        (TypeExpr::new(inner.kind, span), false)
                    }
                    None => (
                        TypeExpr::new(TypeKind::Function { params, ret: None }, span),
                        false,
                    ),
                    Some((ret, joint)) => {
                        let kind = TypeKind::Function {
                            params,
                            ret: Some(Box::new(ret)),
                        };
                        (TypeExpr::new(kind, span), joint)
                    }
                }
            });

        start_labelled(choice((primitive, named, pointer, array, paren)), "type").boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::PrimitiveType;
    use crate::parser::tests::{feed, parse_with};

    fn parse(source: &str) -> Result<TypeExpr, Vec<ParseError>> {
        parse_with(type_parser().then_ignore(just(Token::Eof)), source)
    }

    fn ok(source: &str) -> TypeExpr {
        match parse(source) {
            Ok(ty) => ty,
            Err(errors) => panic!("failed to parse `{}`: {:?}", source, errors),
        }
    }

    fn first_error(source: &str) -> ParseErrorKind {
        match parse(source) {
            Ok(ty) => panic!("expected an error for `{}`, got {}", source, ty),
            Err(errors) => errors[0].kind.clone(),
        }
    }

    #[test]
    fn test_primitive_and_path() {
        assert_eq!(
            ok("i32").kind,
            TypeKind::Primitive(PrimitiveType::I32)
        );
        assert_eq!(ok("geo:Shape").to_string(), "geo:Shape");
    }

    #[test]
    fn test_nested_generics() {
        assert_eq!(ok("Map<i32, T>").to_string(), "Map<i32, T>");
        assert_eq!(ok("Foo<Bar<Baz<i32>>>").to_string(), "Foo<Bar<Baz<i32>>>");
        let deep = ok("A<B<C<D<i32>>>>");
        assert_eq!(deep.to_string(), "A<B<C<D<i32>>>>");
        assert_eq!(deep.generic_depth(), 4);
        assert_eq!(ok("A<B<C>, D>").to_string(), "A<B<C>, D>");
        assert_eq!(ok("A<B<C> >").to_string(), "A<B<C>>");
    }

    #[test]
    fn test_split_tokens_in_feed() {
        let tokens: Vec<Token> = feed("A<B<C>>").into_iter().map(|(t, _)| t).collect();
        assert_eq!(tokens[5], Token::GtJoint);
        assert_eq!(tokens[6], Token::Gt);
    }

    #[test]
    fn test_dangling_close() {
        assert_eq!(first_error("A<B>>"), ParseErrorKind::AmbiguousGenericClose);
    }

    #[test]
    fn test_pointer_and_array() {
        assert_eq!(ok("*[4]u8").to_string(), "*[4]u8");
        assert_eq!(ok("[]Vec<i32>").to_string(), "[]Vec<i32>");
        assert_eq!(ok("*Box<*Box<i8>>").to_string(), "*Box<*Box<i8>>");
    }

    #[test]
    fn test_bad_array_size() {
        assert_eq!(first_error("[1.5]i32"), ParseErrorKind::MalformedArraySize);
        assert_eq!(
            first_error("[99999999999999999999]i32"),
            ParseErrorKind::MalformedArraySize
        );
    }

    #[test]
    fn test_paren_types() {
        // 单个类型加括号是透明的
        assert_eq!(ok("(i32)").kind, TypeKind::Primitive(PrimitiveType::I32));
        assert_eq!(ok("(i32, i32) -> bool").to_string(), "(i32, i32) -> bool");
        assert_eq!(ok("(i32) -> bool").to_string(), "(i32) -> bool");
        assert_eq!(ok("(i32,) -> bool").to_string(), "(i32) -> bool");
        assert_eq!(ok("() -> unit").to_string(), "() -> unit");
        assert_eq!(ok("(i32, u8)").to_string(), "(i32, u8)");
        assert_eq!(ok("()").to_string(), "()");
        assert_eq!(ok("() -> Vec<T>").to_string(), "() -> Vec<T>");
    }

    #[test]
    fn test_empty_paren_element() {
        assert!(matches!(
            first_error("(,)"),
            ParseErrorKind::ExpectedType { .. }
        ));
        assert!(matches!(
            first_error("(i32,,u8)"),
            ParseErrorKind::ExpectedType { .. }
        ));
    }

    #[test]
    fn test_not_a_type() {
        assert_eq!(
            first_error("+"),
            ParseErrorKind::ExpectedType {
                found: Some(Token::Plus)
            }
        );
    }
}
