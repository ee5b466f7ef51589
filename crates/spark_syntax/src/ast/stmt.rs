use crate::ast::expr::Expr;
use crate::ast::types::{Ident, TypeExpr};
use crate::ast::Span;

/// 语句块: `{ stmt* }`，同时是一个作用域
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Body {
    /// 块的值：末尾的表达式语句，没有则为 unit
    pub fn tail(&self) -> Option<&Expr> {
        match self.stmts.last() {
            Some(Stmt::Expr(expr)) => Some(expr),
            _ => None,
        }
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutability {
    Let,
    Mut,
}

/// 变量声明: `let x`, `mut (i32) count`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub mutability: Mutability,
    pub ty: Option<TypeExpr>, // None 表示需要类型推导
    pub name: Ident,
    pub span: Span,
}

/// 赋值目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignTarget {
    // 已有的位置: x, a[i], p.x
    Place(Expr),
    // 新声明: let x = 1
    Decl(VarDecl),
}

// 语句：出现在块内部，没有分隔符
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    // 表达式语句，包括单独出现的 if / match
    Expr(Expr),

    // 赋值: x = x + 1, let y = 2
    Assign {
        target: AssignTarget,
        value: Expr,
        span: Span,
    },

    // 不带初值的声明: let x
    VarDecl(VarDecl),

    Return {
        value: Option<Expr>,
        span: Span,
    },
    Break(Span),
    Continue(Span),

    // 循环: loop { ... }
    Loop {
        body: Body,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Expr(expr) => expr.span.clone(),
            Stmt::VarDecl(decl) => decl.span.clone(),
            Stmt::Assign { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Break(span)
            | Stmt::Continue(span)
            | Stmt::Loop { span, .. } => span.clone(),
        }
    }
}
