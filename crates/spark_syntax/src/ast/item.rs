use crate::ast::stmt::Body;
use crate::ast::types::{Ident, Path, TypeExpr};
use crate::ast::Span;

/// 整个源文件
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    pub items: Vec<Item>,
}

impl Module {
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(import) => Some(import),
            _ => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(func) => Some(func),
            _ => None,
        })
    }

    pub fn type_defs(&self) -> impl Iterator<Item = &TypeDef> {
        self.items.iter().filter_map(|item| match item {
            Item::Type(def) => Some(def),
            _ => None,
        })
    }
}

// 顶层定义：只能出现在文件最外层，按源码顺序保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Import(ImportDecl),
    Function(FunctionDecl),
    Type(TypeDef),
}

impl Item {
    pub fn span(&self) -> Span {
        match self {
            Item::Import(import) => import.span.clone(),
            Item::Function(func) => func.span.clone(),
            Item::Type(def) => def.span.clone(),
        }
    }
}

// imp std:io
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub path: Path,
    pub span: Span,
}

/// 函数声明
///
/// `extern` 函数没有函数体；非 extern 且有函数体的是函数定义，
/// 没有函数体的是原型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub ret: Option<TypeExpr>,
    pub is_extern: bool,
    pub body: Option<Body>,
    pub span: Span,
}

impl FunctionDecl {
    pub fn is_definition(&self) -> bool {
        !self.is_extern && self.body.is_some()
    }

    pub fn is_prototype(&self) -> bool {
        !self.is_extern && self.body.is_none()
    }
}

// i32 x
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: TypeExpr,
    pub name: Ident,
    pub span: Span,
}

// type Name<T> = ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: Ident,
    pub generics: Vec<Ident>,
    pub body: TypeDefBody,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefBody {
    // { i32 x, i32 y }
    Struct(Vec<StructField>),
    // 单个类型
    Alias(TypeExpr),
    // A | B | C，至少两个
    Union(Vec<TypeExpr>),
}

/// 结构体字段，只有最后一个字段可以省略名字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub ty: TypeExpr,
    pub name: Option<Ident>,
    pub span: Span,
}
