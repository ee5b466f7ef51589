//! Lexer
//!
//! 词法分析：源码 -> Token 流。基于 logos，外面包一层 [`Lexer`]
//! 负责行列号、错误位置和结尾的 `Eof`。

use crate::ast::{Base, NumberLit, PrimitiveType};
use logos::Logos;
use spark_diagnostics::{LineIndex, Span};
use std::fmt;
use thiserror::Error;

/// 词法错误类型
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    MalformedNumber,
    UnterminatedLiteral,
    #[default]
    UnrecognizedCharacter,
    MalformedChar,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", lex_message(.kind, .lexeme))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    /// 出错的源码片段
    pub lexeme: String,
}

fn lex_message(kind: &LexErrorKind, lexeme: &str) -> String {
    match kind {
        LexErrorKind::MalformedNumber => format!("malformed number literal `{}`", lexeme),
        LexErrorKind::UnterminatedLiteral => "unterminated literal".to_string(),
        LexErrorKind::UnrecognizedCharacter => format!("unrecognized character `{}`", lexeme),
        LexErrorKind::MalformedChar => format!(
            "char literal {} must contain exactly one character",
            lexeme
        ),
    }
}

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // --- 关键字 (Keywords) ---
    #[token("imp")]
    Imp,
    #[token("fun")]
    Fun,
    #[token("type")]
    Type,
    #[token("let")]
    Let,
    #[token("mut")]
    Mut,
    #[token("return")]
    Return,
    #[token("match")]
    Match,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("loop")]
    Loop,
    #[token("break")]
    Break,
    #[token("cont")]
    Cont,
    #[token("extern")]
    Extern,

    // 字面量关键字
    #[token("true")]
    True,
    #[token("false")]
    False,

    // --- 基础类型关键字 ---
    #[token("bool", |_| PrimitiveType::Bool)]
    #[token("char", |_| PrimitiveType::Char)]
    #[token("unit", |_| PrimitiveType::Unit)]
    #[token("i8", |_| PrimitiveType::I8)]
    #[token("i16", |_| PrimitiveType::I16)]
    #[token("i32", |_| PrimitiveType::I32)]
    #[token("i64", |_| PrimitiveType::I64)]
    #[token("u8", |_| PrimitiveType::U8)]
    #[token("u16", |_| PrimitiveType::U16)]
    #[token("u32", |_| PrimitiveType::U32)]
    #[token("u64", |_| PrimitiveType::U64)]
    #[token("f32", |_| PrimitiveType::F32)]
    #[token("f64", |_| PrimitiveType::F64)]
    Prim(PrimitiveType),

    // --- 符号 (Symbols) ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,

    #[token("=")]
    Assign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Leq,
    #[token(">=")]
    Geq,

    #[token("!")]
    Bang,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token("#")]
    Hash,
    #[token("$")]
    Dollar,

    // --- 复杂数据 (Data) ---
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // 先按宽松的形状吃掉整个数字，再在回调里校验。
    // 带前缀的整数没有小数和指数，`0x1E+5` 是 `0x1E` `+` `5`
    #[regex(r"0[box][0-9a-zA-Z_]*", number)]
    #[regex(
        r"([1-9][0-9a-zA-Z_]*|0|0[0-9ac-np-wyzA-Z_][0-9a-zA-Z_]*)(\.[0-9a-zA-Z_]*)?([eE][+-][0-9a-zA-Z_]*)?",
        number
    )]
    Number(NumberLit),

    #[regex(r#""([^"\\]|\\.)*""#, string)]
    #[regex(r#""([^"\\]|\\.)*"#, unterminated_string)]
    Str(String),

    #[regex(r"'([^'\\]|\\.)*'", char_literal)]
    #[regex(r"'([^'\\]|\\.)*", unterminated_char)]
    Char(char),

    #[regex(r"//[^\n]*", logos::skip)]
    Comment,

    // 输入结束，由 Lexer 在最后补上
    Eof,

    // `>>` / `>=` 拆开后的前半个 `>`，只出现在解析器的输入里
    GtJoint,
}

fn number(lex: &mut logos::Lexer<Token>) -> Result<NumberLit, LexErrorKind> {
    parse_number(lex.slice()).ok_or(LexErrorKind::MalformedNumber)
}

/// 校验并拆分数字字面量
///
/// 十进制: `[0-9]+(.[0-9]+)?([eE][+-][0-9]+)?`，另有 `0b` `0o` `0x` 前缀的整数。
fn parse_number(text: &str) -> Option<NumberLit> {
    for (prefix, base) in [("0b", Base::Binary), ("0o", Base::Octal), ("0x", Base::Hex)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base.radix())) {
                return None;
            }
            // 超出 u128 的整数同样视为非法
            u128::from_str_radix(digits, base.radix()).ok()?;
            return Some(NumberLit {
                digits: digits.to_string(),
                base,
                has_fraction: false,
                has_exponent: false,
            });
        }
    }

    let bytes = text.as_bytes();
    let digits_from = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut pos = digits_from(0);
    if pos == 0 {
        return None;
    }

    let mut has_fraction = false;
    if bytes.get(pos) == Some(&b'.') {
        let n = digits_from(pos + 1);
        if n == 0 {
            return None;
        }
        pos += 1 + n;
        has_fraction = true;
    }

    let mut has_exponent = false;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        if !matches!(bytes.get(pos + 1), Some(b'+' | b'-')) {
            return None;
        }
        let n = digits_from(pos + 2);
        if n == 0 {
            return None;
        }
        pos += 2 + n;
        has_exponent = true;
    }

    if pos != bytes.len() {
        return None;
    }
    if !has_fraction && !has_exponent {
        text.parse::<u128>().ok()?;
    }

    Some(NumberLit {
        digits: text.to_string(),
        base: Base::Decimal,
        has_fraction,
        has_exponent,
    })
}

/// 处理转义: \n \t \r \0 \\ \" \'，其他 \c 解码为 c
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// 去掉首尾引号
fn inner(slice: &str) -> &str {
    &slice[1..slice.len() - 1]
}

fn string(lex: &mut logos::Lexer<Token>) -> String {
    unescape(inner(lex.slice()))
}

fn char_literal(lex: &mut logos::Lexer<Token>) -> Result<char, LexErrorKind> {
    let decoded = unescape(inner(lex.slice()));
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LexErrorKind::MalformedChar),
    }
}

fn unterminated_string(_: &mut logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::UnterminatedLiteral)
}

fn unterminated_char(_: &mut logos::Lexer<Token>) -> Result<char, LexErrorKind> {
    Err(LexErrorKind::UnterminatedLiteral)
}

impl Token {
    /// 用于错误信息的描述
    pub fn describe(&self) -> String {
        match self {
            Token::Eof => "end of input".to_string(),
            Token::Ident(name) => format!("identifier `{}`", name),
            Token::Number(n) => format!("number `{}`", n.lexeme()),
            Token::Str(_) => "string literal".to_string(),
            Token::Char(_) => "char literal".to_string(),
            other => format!("`{}`", other),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Imp => "imp",
            Token::Fun => "fun",
            Token::Type => "type",
            Token::Let => "let",
            Token::Mut => "mut",
            Token::Return => "return",
            Token::Match => "match",
            Token::If => "if",
            Token::Else => "else",
            Token::Loop => "loop",
            Token::Break => "break",
            Token::Cont => "cont",
            Token::Extern => "extern",
            Token::True => "true",
            Token::False => "false",
            Token::Prim(p) => p.name(),
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Amp => "&",
            Token::Pipe => "|",
            Token::Caret => "^",
            Token::Tilde => "~",
            Token::Shl => "<<",
            Token::Shr => ">>",
            Token::Assign => "=",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::Gt | Token::GtJoint => ">",
            Token::Leq => "<=",
            Token::Geq => ">=",
            Token::Bang => "!",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::Comma => ",",
            Token::Dot => ".",
            Token::Colon => ":",
            Token::Arrow => "->",
            Token::Hash => "#",
            Token::Dollar => "$",
            Token::Ident(name) => return write!(f, "{}", name),
            Token::Number(n) => return write!(f, "{}", n.lexeme()),
            Token::Str(s) => return write!(f, "{:?}", s),
            Token::Char(c) => return write!(f, "{:?}", c),
            Token::Comment => "//",
            Token::Eof => "<eof>",
        };
        write!(f, "{}", text)
    }
}

/// 带位置的 Token，行列号从 1 开始
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

/// 惰性的词法分析器，最后产出一次 `Token::Eof`
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, Token>,
    lines: LineIndex<'src>,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: Token::lexer(source),
            lines: LineIndex::new(source),
            done: false,
        }
    }

    /// 从之前保存的偏移处重新扫描，span 仍然是整个文件中的绝对位置。
    /// 偏移不在字符边界上时返回 None。
    pub fn starting_at(source: &'src str, offset: usize) -> Option<Self> {
        if !source.is_char_boundary(offset) {
            return None;
        }
        let mut lexer = Self::new(source);
        lexer.inner.bump(offset);
        Some(lexer)
    }

    /// 已经扫描到的字节偏移
    pub fn offset(&self) -> usize {
        self.inner.span().end
    }

    fn spanned(&self, token: Token, span: Span) -> SpannedToken {
        let pos = self.lines.line_col(span.start);
        SpannedToken {
            token,
            span,
            line: pos.line,
            column: pos.column,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<SpannedToken, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next() {
            Some(Ok(token)) => Some(Ok(self.spanned(token, self.inner.span()))),
            Some(Err(kind)) => Some(Err(LexError {
                kind,
                span: self.inner.span(),
                lexeme: self.inner.slice().to_string(),
            })),
            None => {
                self.done = true;
                let end = self.inner.source().len();
                Some(Ok(self.spanned(Token::Eof, end..end)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NumberValue;

    fn tokens(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .map(|t| t.expect("lex error").token)
            .collect()
    }

    fn first_error(source: &str) -> LexErrorKind {
        Lexer::new(source)
            .find_map(Result::err)
            .expect("expected a lex error")
            .kind
    }

    fn number_value(source: &str) -> NumberValue {
        match tokens(source).first() {
            Some(Token::Number(n)) => n.value(),
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn test_lexer_basic() {
        assert_eq!(
            tokens("let x = 10 + 20"),
            vec![
                Token::Let,
                Token::Ident("x".to_string()),
                Token::Assign,
                Token::Number(NumberLit {
                    digits: "10".to_string(),
                    base: Base::Decimal,
                    has_fraction: false,
                    has_exponent: false,
                }),
                Token::Plus,
                Token::Number(NumberLit {
                    digits: "20".to_string(),
                    base: Base::Decimal,
                    has_fraction: false,
                    has_exponent: false,
                }),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_primitives() {
        assert_eq!(
            tokens("imp fun type cont extern i32 f64 unit impish"),
            vec![
                Token::Imp,
                Token::Fun,
                Token::Type,
                Token::Cont,
                Token::Extern,
                Token::Prim(PrimitiveType::I32),
                Token::Prim(PrimitiveType::F64),
                Token::Prim(PrimitiveType::Unit),
                Token::Ident("impish".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_longest_match_operators() {
        assert_eq!(
            tokens("<= >= << >> && || == != -> < > & | ="),
            vec![
                Token::Leq,
                Token::Geq,
                Token::Shl,
                Token::Shr,
                Token::AndAnd,
                Token::OrOr,
                Token::EqEq,
                Token::NotEq,
                Token::Arrow,
                Token::Lt,
                Token::Gt,
                Token::Amp,
                Token::Pipe,
                Token::Assign,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_number_bases() {
        assert_eq!(number_value("0x1A"), NumberValue::Int(26));
        assert_eq!(number_value("0b101"), NumberValue::Int(5));
        assert_eq!(number_value("0o17"), NumberValue::Int(15));
        assert_eq!(number_value("1.5e+2"), NumberValue::Float(150.0));
        assert_eq!(number_value("2.5"), NumberValue::Float(2.5));
        assert_eq!(number_value("3e-1"), NumberValue::Float(0.3));
    }

    #[test]
    fn test_prefixed_number_stops_before_sign() {
        let hex = |digits: &str| {
            Token::Number(NumberLit {
                digits: digits.to_string(),
                base: Base::Hex,
                has_fraction: false,
                has_exponent: false,
            })
        };
        let five = Token::Number(NumberLit {
            digits: "5".to_string(),
            base: Base::Decimal,
            has_fraction: false,
            has_exponent: false,
        });
        assert_eq!(
            tokens("0x1E+5"),
            vec![hex("1E"), Token::Plus, five, Token::Eof]
        );
        assert_eq!(tokens("0xE-1")[..2], [hex("E"), Token::Minus]);
        // 十进制的指数照常
        assert_eq!(number_value("0e+1"), NumberValue::Float(0.0));
        assert_eq!(number_value("0.5"), NumberValue::Float(0.5));
    }

    #[test]
    fn test_malformed_numbers() {
        for source in ["1.", "1e5", "1e+", "0x", "0b2", "0o8", "12ab"] {
            assert_eq!(
                first_error(source),
                LexErrorKind::MalformedNumber,
                "source: {}",
                source
            );
        }
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            tokens(r#""a\n\t\"b\\" "\q""#),
            vec![
                Token::Str("a\n\t\"b\\".to_string()),
                Token::Str("q".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(
            tokens(r"'a' '\n' '\''"),
            vec![
                Token::Char('a'),
                Token::Char('\n'),
                Token::Char('\''),
                Token::Eof
            ]
        );
        assert_eq!(first_error("'ab'"), LexErrorKind::MalformedChar);
        assert_eq!(first_error("''"), LexErrorKind::MalformedChar);
    }

    #[test]
    fn test_unterminated_literals() {
        assert_eq!(first_error("\"abc"), LexErrorKind::UnterminatedLiteral);
        assert_eq!(first_error("'a"), LexErrorKind::UnterminatedLiteral);
    }

    #[test]
    fn test_unrecognized_character() {
        let err = Lexer::new("let @ = 1")
            .find_map(Result::err)
            .expect("expected a lex error");
        assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter);
        assert_eq!(err.span, 4..5);
        assert_eq!(err.to_string(), "unrecognized character `@`");
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            tokens("break // trailing comment\ncont"),
            vec![Token::Break, Token::Cont, Token::Eof]
        );
    }

    #[test]
    fn test_positions() {
        let toks: Vec<_> = Lexer::new("fun f\n  x")
            .collect::<Result<_, _>>()
            .expect("lex error");
        assert_eq!(toks[0].span, 0..3);
        assert_eq!((toks[0].line, toks[0].column), (1, 1));
        assert_eq!((toks[2].line, toks[2].column), (2, 3));
        // Eof 在文件末尾
        assert_eq!(toks[3].token, Token::Eof);
        assert_eq!(toks[3].span, 9..9);
    }

    #[test]
    fn test_eof_emitted_once() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next().map(|t| t.map(|t| t.token)), Some(Ok(Token::Eof)));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_restart_from_offset() {
        let source = "let a = b";
        let mut lexer = Lexer::new(source);
        lexer.next();
        lexer.next();
        let saved = lexer.offset();
        assert_eq!(saved, 5);

        let rest: Vec<_> = Lexer::starting_at(source, saved)
            .expect("valid offset")
            .map(|t| t.expect("lex error"))
            .collect();
        assert_eq!(rest[0].token, Token::Assign);
        assert_eq!(rest[0].span, 6..7);
        assert_eq!(rest[1].token, Token::Ident("b".to_string()));
    }

    #[test]
    fn test_restart_rejects_bad_offset() {
        assert!(Lexer::starting_at("'é'", 2).is_none());
        assert!(Lexer::starting_at("ab", 10).is_none());
    }
}
