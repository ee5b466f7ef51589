//! Spark Syntax
//!
//! Spark 语言前端：词法分析、语法分析、AST。
//!
//! 源码先由 [`lexer`] 切成 token，全部词法正确后才交给 [`parser`]。
//! 解析失败时返回按位置排序的 [`SyntaxError`] 列表，可以用 [`report`]
//! 转成 `spark_diagnostics` 的诊断信息输出。
//!
//! ```rust
//! use spark_syntax::{parse_module, report};
//!
//! let module = parse_module("imp std:io fun main { io:print.(\"hi\") }").unwrap();
//! assert_eq!(module.items.len(), 2);
//!
//! let errors = parse_module("type P = { i32 a, i32 a }").unwrap_err();
//! let diagnostics = report(&errors, "p.spk");
//! assert_eq!(diagnostics[0].code, Some("E0104"));
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;

pub use error::{report, SyntaxError};
pub use lexer::{LexError, LexErrorKind, Lexer, SpannedToken, Token};
pub use options::ParseOptions;
pub use parser::{Expected, ParseError, ParseErrorKind};

use ast::{Expr, Module, TypeExpr};
use chumsky::{primitive::just, Parser};
use tracing::{debug, trace};

/// 词法分析整个源文件，报告所有词法错误
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, Vec<LexError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for item in Lexer::new(source) {
        match item {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        debug!(tokens = tokens.len(), "tokenized");
        Ok(tokens)
    } else {
        debug!(errors = errors.len(), "lexing failed");
        Err(errors)
    }
}

/// 用默认选项解析一个源文件
pub fn parse_module(source: &str) -> Result<Module, Vec<SyntaxError>> {
    parse_module_with(source, &ParseOptions::default())
}

pub fn parse_module_with(
    source: &str,
    options: &ParseOptions,
) -> Result<Module, Vec<SyntaxError>> {
    let module = run(parser::module_parser(*options), source, options)?;
    debug!(items = module.items.len(), "parsed module");
    Ok(module)
}

/// 解析单个表达式
pub fn parse_expr(source: &str) -> Result<Expr, Vec<SyntaxError>> {
    run(
        parser::expr::expr_parser().then_ignore(just(Token::Eof)),
        source,
        &ParseOptions::default(),
    )
}

/// 解析单个类型
pub fn parse_type(source: &str) -> Result<TypeExpr, Vec<SyntaxError>> {
    run(
        parser::types::type_parser().then_ignore(just(Token::Eof)),
        source,
        &ParseOptions::default(),
    )
}

fn run<O>(
    parser: impl Parser<Token, O, Error = ParseError>,
    source: &str,
    options: &ParseOptions,
) -> Result<O, Vec<SyntaxError>> {
    let tokens = tokenize(source)
        .map_err(|errors| finish(errors.into_iter().map(SyntaxError::from).collect(), options))?;
    trace!(tokens = tokens.len(), "parsing");

    let (output, errors) = parser::parse_tokens(parser, parser::split_tokens(tokens), source.len());
    match output {
        Some(output) if errors.is_empty() => Ok(output),
        _ => {
            debug!(errors = errors.len(), "parsing failed");
            Err(finish(errors.into_iter().map(SyntaxError::from).collect(), options))
        }
    }
}

/// 按位置排序；不做恢复时只保留第一个
fn finish(mut errors: Vec<SyntaxError>, options: &ParseOptions) -> Vec<SyntaxError> {
    errors.sort_by_key(|err| err.span().start);
    if !options.recover {
        errors.truncate(1);
    }
    errors
}
