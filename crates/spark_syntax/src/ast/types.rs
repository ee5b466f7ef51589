use super::Span;

/// 标识符：名字 + 位置
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

/// 路径: `std:io`, `geo:Shape`
///
/// 至少包含一段。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    pub segments: Vec<Ident>,
    pub span: Span,
}

impl Path {
    /// 最后一段名字
    pub fn last(&self) -> Option<&Ident> {
        self.segments.last()
    }

    /// 只有一段的路径，即普通变量名
    pub fn as_single(&self) -> Option<&Ident> {
        match self.segments.as_slice() {
            [ident] => Some(ident),
            _ => None,
        }
    }

    /// 用 `:` 连接的完整名字
    pub fn joined(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(":")
    }
}

/// 基础类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    Char,
    Unit,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 13] = [
        Self::Bool,
        Self::Char,
        Self::Unit,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
    ];

    /// 源码中的关键字
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Unit => "unit",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed() || matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// 数值类型的位宽
    pub fn bit_width(&self) -> Option<u32> {
        match self {
            Self::I8 | Self::U8 => Some(8),
            Self::I16 | Self::U16 => Some(16),
            Self::I32 | Self::U32 | Self::F32 => Some(32),
            Self::I64 | Self::U64 | Self::F64 => Some(64),
            Self::Bool | Self::Char | Self::Unit => None,
        }
    }
}

/// 类型表达式
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeExpr {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    // i32, bool, unit ...
    Primitive(PrimitiveType),

    // 命名类型，可带泛型参数: geo:Shape, Map<K, V>
    Named { path: Path, generics: Vec<TypeExpr> },

    // 指针: *T
    Pointer(Box<TypeExpr>),

    // 数组: [4]T 或 []T (长度未知)
    Array {
        size: Option<u64>,
        element: Box<TypeExpr>,
    },

    // 函数类型: (A, B) -> R，返回值可省略
    Function {
        params: Vec<TypeExpr>,
        ret: Option<Box<TypeExpr>>,
    },
}

impl TypeExpr {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// 泛型嵌套深度: `A<B<C>>` 为 2
    pub fn generic_depth(&self) -> usize {
        match &self.kind {
            TypeKind::Primitive(_) => 0,
            TypeKind::Named { generics, .. } if generics.is_empty() => 0,
            TypeKind::Named { generics, .. } => {
                1 + generics.iter().map(TypeExpr::generic_depth).max().unwrap_or(0)
            }
            TypeKind::Pointer(inner) => inner.generic_depth(),
            TypeKind::Array { element, .. } => element.generic_depth(),
            TypeKind::Function { params, ret } => params
                .iter()
                .chain(ret.as_deref())
                .map(TypeExpr::generic_depth)
                .max()
                .unwrap_or(0),
        }
    }
}
