use super::stmt::Body;
use super::types::{Ident, Path, TypeExpr};
use super::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    // 字面量: 1, "hello", true, [1, 2], (a, b), #Point { x = 1 }
    Literal(Literal),

    // 变量或限定名: x, geo:origin
    Path(Path),

    // 索引: arr[i]
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },

    // 成员访问: p.x
    Field {
        base: Box<Expr>,
        field: Ident,
    },

    // 函数调用: f.(a, b)
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    // 一元操作: -a, !b, ~c
    Unary(UnaryOp, Box<Expr>),

    // 二元操作: a + b, a == b
    Binary(Box<Expr>, BinaryOp, Box<Expr>),

    If(IfExpr),

    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },

    // 类型转换: $f64 x
    Cast {
        ty: TypeExpr,
        operand: Box<Expr>,
    },

    // 块表达式: { ... }
    Block(Body),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn literal(lit: Literal, span: Span) -> Self {
        Self::new(ExprKind::Literal(lit), span)
    }

    /// 可以作为赋值目标的表达式: 路径、索引、成员访问
    pub fn is_place(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Path(_) | ExprKind::Index { .. } | ExprKind::Field { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfExpr {
    pub cond: Box<Expr>,
    pub then_body: Body,
    pub else_branch: Option<ElseBranch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElseBranch {
    Body(Body),
    // else if ...，内部一定是 ExprKind::If
    If(Box<Expr>),
}

/// match 分支: `pattern -> expr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub body: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternKind {
    // 按类型匹配并可选绑定: Circle c
    TypeTag {
        ty: TypeExpr,
        binding: Option<Ident>,
    },
    // 字面量，negated 表示前面有 `-`
    Literal { negated: bool, value: Literal },
    // 省略模式的分支
    Wildcard,
}

impl Pattern {
    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, PatternKind::Wildcard)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    Bool(bool),
    Char(char),
    Number(NumberLit),
    Array(Vec<Expr>),
    Tuple(Vec<Expr>),
    // #Point { x = 1, y = 2 }，字段名唯一
    Struct {
        ty: Option<TypeExpr>,
        fields: Vec<FieldInit>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInit {
    pub name: Ident,
    pub value: Expr,
}

/// 数字字面量的进制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl Base {
    pub fn radix(&self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Octal => 8,
            Base::Decimal => 10,
            Base::Hex => 16,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Base::Binary => "0b",
            Base::Octal => "0o",
            Base::Decimal => "",
            Base::Hex => "0x",
        }
    }
}

/// 数字字面量
///
/// `digits` 对带前缀的字面量去掉了 `0b`/`0o`/`0x`，十进制保留完整词素。
/// 词法阶段已保证 digits 合法且整数不超过 u128。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberLit {
    pub digits: String,
    pub base: Base,
    pub has_fraction: bool,
    pub has_exponent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int(u128),
    Float(f64),
}

impl NumberLit {
    pub fn is_float(&self) -> bool {
        self.has_fraction || self.has_exponent
    }

    /// 按进制求值
    pub fn value(&self) -> NumberValue {
        if self.is_float() {
            NumberValue::Float(self.digits.parse().unwrap_or(f64::NAN))
        } else {
            NumberValue::Int(u128::from_str_radix(&self.digits, self.base.radix()).unwrap_or(u128::MAX))
        }
    }

    /// 作为数组长度使用时的值
    pub fn as_u64(&self) -> Option<u64> {
        match self.value() {
            NumberValue::Int(v) => u64::try_from(v).ok(),
            NumberValue::Float(_) => None,
        }
    }

    /// 源码形式
    pub fn lexeme(&self) -> String {
        format!("{}{}", self.base.prefix(), self.digits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mul,
    Div,
    Rem, // *, /, %
    Add,
    Sub, // +, -
    Shl,
    Shr, // <<, >>
    Lt,
    Gt,
    Le,
    Ge, // <, >, <=, >=
    Eq,
    Ne, // ==, !=
    BitAnd,
    BitXor,
    BitOr, // &, ^, |
    And,
    Or, // &&, ||
}

impl BinaryOp {
    /// 优先级表，从结合最紧的一级开始，全部左结合
    pub const PRECEDENCE: &'static [&'static [BinaryOp]] = &[
        &[BinaryOp::Mul, BinaryOp::Div, BinaryOp::Rem],
        &[BinaryOp::Add, BinaryOp::Sub],
        &[BinaryOp::Shl, BinaryOp::Shr],
        &[BinaryOp::Lt, BinaryOp::Gt, BinaryOp::Le, BinaryOp::Ge],
        &[BinaryOp::Eq, BinaryOp::Ne],
        &[BinaryOp::BitAnd],
        &[BinaryOp::BitXor],
        &[BinaryOp::BitOr],
        &[BinaryOp::And],
        &[BinaryOp::Or],
    ];

    /// 优先级层号，1 结合最紧
    pub fn precedence(&self) -> usize {
        Self::PRECEDENCE
            .iter()
            .position(|level| level.contains(self))
            .map_or(usize::MAX, |i| i + 1)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,    // !x
    Neg,    // -x
    BitNot, // ~x
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::BitNot => "~",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(digits: &str, base: Base) -> NumberLit {
        NumberLit {
            digits: digits.to_string(),
            base,
            has_fraction: digits.contains('.'),
            has_exponent: base == Base::Decimal && digits.contains(|c: char| c == 'e' || c == 'E'),
        }
    }

    #[test]
    fn test_number_value_by_base() {
        assert_eq!(number("1A", Base::Hex).value(), NumberValue::Int(26));
        assert_eq!(number("101", Base::Binary).value(), NumberValue::Int(5));
        assert_eq!(number("17", Base::Octal).value(), NumberValue::Int(15));
        assert_eq!(number("42", Base::Decimal).value(), NumberValue::Int(42));
        assert_eq!(number("1.5e+2", Base::Decimal).value(), NumberValue::Float(150.0));
    }

    #[test]
    fn test_number_as_u64() {
        assert_eq!(number("ff", Base::Hex).as_u64(), Some(255));
        assert_eq!(number("2.5", Base::Decimal).as_u64(), None);
        assert_eq!(number("100000000000000000000", Base::Decimal).as_u64(), None);
    }

    #[test]
    fn test_lexeme_keeps_prefix() {
        assert_eq!(number("1A", Base::Hex).lexeme(), "0x1A");
        assert_eq!(number("3.0", Base::Decimal).lexeme(), "3.0");
    }

    #[test]
    fn test_precedence_levels() {
        assert_eq!(BinaryOp::Mul.precedence(), 1);
        assert_eq!(BinaryOp::Add.precedence(), 2);
        assert_eq!(BinaryOp::Shr.precedence(), 3);
        assert_eq!(BinaryOp::Ge.precedence(), 4);
        assert_eq!(BinaryOp::Ne.precedence(), 5);
        assert_eq!(BinaryOp::BitAnd.precedence(), 6);
        assert_eq!(BinaryOp::BitXor.precedence(), 7);
        assert_eq!(BinaryOp::BitOr.precedence(), 8);
        assert_eq!(BinaryOp::And.precedence(), 9);
        assert_eq!(BinaryOp::Or.precedence(), 10);
    }

    #[test]
    fn test_every_operator_has_a_level() {
        let all = BinaryOp::PRECEDENCE.iter().flat_map(|l| l.iter()).count();
        assert_eq!(all, 18);
    }
}
