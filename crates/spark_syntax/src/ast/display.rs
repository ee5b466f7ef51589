//! AST Display
//!
//! 把 AST 打印回源码形式。二元表达式总是带括号，
//! 方便直接看出优先级: `1 + 2 * 3` 打印为 `(1 + (2 * 3))`。

use super::*;
use std::fmt::{self, Display};

fn comma_list<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// 打印成 "geo:Shape<T>", "*[4]i32", "(i32, i32) -> bool"
impl Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Primitive(p) => write!(f, "{}", p),
            TypeKind::Named { path, generics } => {
                write!(f, "{}", path)?;
                if !generics.is_empty() {
                    write!(f, "<")?;
                    comma_list(f, generics)?;
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeKind::Pointer(inner) => write!(f, "*{}", inner),
            TypeKind::Array { size, element } => match size {
                Some(n) => write!(f, "[{}]{}", n, element),
                None => write!(f, "[]{}", element),
            },
            TypeKind::Function { params, ret } => {
                write!(f, "(")?;
                comma_list(f, params)?;
                // (T) 单独出现会被当成括号，需要尾逗号
                if params.len() == 1 && ret.is_none() {
                    write!(f, ",")?;
                }
                write!(f, ")")?;
                if let Some(ret) = ret {
                    write!(f, " -> {}", ret)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Char(c) => write!(f, "{:?}", c),
            Literal::Number(n) => write!(f, "{}", n.lexeme()),
            Literal::Array(items) => {
                write!(f, "[")?;
                comma_list(f, items)?;
                write!(f, "]")
            }
            Literal::Tuple(items) => {
                write!(f, "(")?;
                comma_list(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Literal::Struct { ty, fields } => {
                write!(f, "#")?;
                if let Some(ty) = ty {
                    write!(f, "{} ", ty)?;
                }
                write!(f, "{{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", field.name, field.value)?;
                }
                write!(f, " }}")
            }
        }
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PatternKind::TypeTag { ty, binding } => match binding {
                Some(name) => write!(f, "{} {}", ty, name),
                None => write!(f, "{}", ty),
            },
            PatternKind::Literal { negated, value } => {
                if *negated {
                    write!(f, "-")?;
                }
                write!(f, "{}", value)
            }
            PatternKind::Wildcard => Ok(()),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(lit) => write!(f, "{}", lit),
            ExprKind::Path(path) => write!(f, "{}", path),
            ExprKind::Index { base, index } => write!(f, "{}[{}]", base, index),
            ExprKind::Field { base, field } => write!(f, "{}.{}", base, field),
            ExprKind::Call { callee, args } => {
                write!(f, "{}.(", callee)?;
                comma_list(f, args)?;
                write!(f, ")")
            }
            ExprKind::Unary(op, operand) => write!(f, "{}{}", op.symbol(), operand),
            ExprKind::Binary(lhs, op, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            ExprKind::If(if_expr) => write!(f, "{}", if_expr),
            ExprKind::Match { scrutinee, arms } => {
                write!(f, "match {} {{ ", scrutinee)?;
                for (i, arm) in arms.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if arm.pattern.is_wildcard() {
                        write!(f, "-> {}", arm.body)?;
                    } else {
                        write!(f, "{} -> {}", arm.pattern, arm.body)?;
                    }
                }
                write!(f, " }}")
            }
            ExprKind::Cast { ty, operand } => write!(f, "${} {}", ty, operand),
            ExprKind::Block(body) => write!(f, "{}", body),
        }
    }
}

impl Display for IfExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {} {}", self.cond, self.then_body)?;
        match &self.else_branch {
            Some(ElseBranch::Body(body)) => write!(f, " else {}", body),
            Some(ElseBranch::If(expr)) => write!(f, " else {}", expr),
            None => Ok(()),
        }
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stmts.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{")?;
        for stmt in &self.stmts {
            write!(f, " {}", stmt)?;
        }
        write!(f, " }}")
    }
}

impl Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.mutability {
            Mutability::Let => "let",
            Mutability::Mut => "mut",
        };
        match &self.ty {
            Some(ty) => write!(f, "{} ({}) {}", keyword, ty, self.name),
            None => write!(f, "{} {}", keyword, self.name),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr(expr) => write!(f, "{}", expr),
            Stmt::Assign { target, value, .. } => match target {
                AssignTarget::Place(place) => write!(f, "{} = {}", place, value),
                AssignTarget::Decl(decl) => write!(f, "{} = {}", decl, value),
            },
            Stmt::VarDecl(decl) => write!(f, "{}", decl),
            Stmt::Return { value, .. } => match value {
                Some(value) => write!(f, "return {}", value),
                None => write!(f, "return"),
            },
            Stmt::Break(_) => write!(f, "break"),
            Stmt::Continue(_) => write!(f, "cont"),
            Stmt::Loop { body, .. } => write!(f, "loop {}", body),
        }
    }
}
