pub mod display;
pub mod expr;
pub mod item;
pub mod stmt;
pub mod types;
pub mod visitor;

pub use spark_diagnostics::Span;

// 重新导出核心类型，方便外部直接使用 spark_syntax::ast::Expr 等
pub use expr::{
    Base, BinaryOp, ElseBranch, Expr, ExprKind, FieldInit, IfExpr, Literal, MatchArm, NumberLit,
    NumberValue, Pattern, PatternKind, UnaryOp,
};
pub use item::{
    FunctionDecl, ImportDecl, Item, Module, Param, StructField, TypeDef, TypeDefBody,
};
pub use stmt::{AssignTarget, Body, Mutability, Stmt, VarDecl};
pub use types::{Ident, Path, PrimitiveType, TypeExpr, TypeKind};
pub use visitor::Visitor;
