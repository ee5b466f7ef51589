use super::*;

/// AST 遍历
///
/// 每个方法默认调用对应的 `walk_*` 继续向下遍历，
/// 实现者只需覆盖关心的节点，覆盖后如需继续遍历子节点自行调用 `walk_*`。
pub trait Visitor: Sized {
    // 访问模块
    fn visit_module(&mut self, module: &Module) {
        walk_module(self, module);
    }

    // 访问顶层定义
    fn visit_item(&mut self, item: &Item) {
        walk_item(self, item);
    }

    fn visit_import(&mut self, _import: &ImportDecl) {}

    fn visit_function(&mut self, func: &FunctionDecl) {
        walk_function(self, func);
    }

    fn visit_type_def(&mut self, def: &TypeDef) {
        walk_type_def(self, def);
    }

    fn visit_body(&mut self, body: &Body) {
        walk_body(self, body);
    }

    // 访问语句
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    // 访问表达式
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_type(&mut self, ty: &TypeExpr) {
        walk_type(self, ty);
    }
}

pub fn walk_module<V: Visitor>(v: &mut V, module: &Module) {
    for item in &module.items {
        v.visit_item(item);
    }
}

pub fn walk_item<V: Visitor>(v: &mut V, item: &Item) {
    match item {
        Item::Import(import) => v.visit_import(import),
        Item::Function(func) => v.visit_function(func),
        Item::Type(def) => v.visit_type_def(def),
    }
}

pub fn walk_function<V: Visitor>(v: &mut V, func: &FunctionDecl) {
    for param in &func.params {
        v.visit_type(&param.ty);
    }
    if let Some(ret) = &func.ret {
        v.visit_type(ret);
    }
    if let Some(body) = &func.body {
        v.visit_body(body);
    }
}

pub fn walk_type_def<V: Visitor>(v: &mut V, def: &TypeDef) {
    match &def.body {
        TypeDefBody::Struct(fields) => {
            for field in fields {
                v.visit_type(&field.ty);
            }
        }
        TypeDefBody::Alias(ty) => v.visit_type(ty),
        TypeDefBody::Union(variants) => {
            for ty in variants {
                v.visit_type(ty);
            }
        }
    }
}

pub fn walk_body<V: Visitor>(v: &mut V, body: &Body) {
    for stmt in &body.stmts {
        v.visit_stmt(stmt);
    }
}

fn walk_var_decl<V: Visitor>(v: &mut V, decl: &VarDecl) {
    if let Some(ty) = &decl.ty {
        v.visit_type(ty);
    }
}

pub fn walk_stmt<V: Visitor>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expr(expr) => v.visit_expr(expr),
        Stmt::Assign { target, value, .. } => {
            match target {
                AssignTarget::Place(place) => v.visit_expr(place),
                AssignTarget::Decl(decl) => walk_var_decl(v, decl),
            }
            v.visit_expr(value);
        }
        Stmt::VarDecl(decl) => walk_var_decl(v, decl),
        Stmt::Return { value, .. } => {
            if let Some(value) = value {
                v.visit_expr(value);
            }
        }
        Stmt::Break(_) | Stmt::Continue(_) => {}
        Stmt::Loop { body, .. } => v.visit_body(body),
    }
}

fn walk_literal<V: Visitor>(v: &mut V, lit: &Literal) {
    match lit {
        Literal::Array(items) | Literal::Tuple(items) => {
            for item in items {
                v.visit_expr(item);
            }
        }
        Literal::Struct { ty, fields } => {
            if let Some(ty) = ty {
                v.visit_type(ty);
            }
            for field in fields {
                v.visit_expr(&field.value);
            }
        }
        Literal::String(_) | Literal::Bool(_) | Literal::Char(_) | Literal::Number(_) => {}
    }
}

pub fn walk_expr<V: Visitor>(v: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Literal(lit) => walk_literal(v, lit),
        ExprKind::Path(_) => {}
        ExprKind::Index { base, index } => {
            v.visit_expr(base);
            v.visit_expr(index);
        }
        ExprKind::Field { base, .. } => v.visit_expr(base),
        ExprKind::Call { callee, args } => {
            v.visit_expr(callee);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        ExprKind::Unary(_, operand) => v.visit_expr(operand),
        ExprKind::Binary(lhs, _, rhs) => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        ExprKind::If(if_expr) => {
            v.visit_expr(&if_expr.cond);
            v.visit_body(&if_expr.then_body);
            match &if_expr.else_branch {
                Some(ElseBranch::Body(body)) => v.visit_body(body),
                Some(ElseBranch::If(chained)) => v.visit_expr(chained),
                None => {}
            }
        }
        ExprKind::Match { scrutinee, arms } => {
            v.visit_expr(scrutinee);
            for arm in arms {
                v.visit_pattern(&arm.pattern);
                v.visit_expr(&arm.body);
            }
        }
        ExprKind::Cast { ty, operand } => {
            v.visit_type(ty);
            v.visit_expr(operand);
        }
        ExprKind::Block(body) => v.visit_body(body),
    }
}

pub fn walk_pattern<V: Visitor>(v: &mut V, pattern: &Pattern) {
    if let PatternKind::TypeTag { ty, .. } = &pattern.kind {
        v.visit_type(ty);
    }
}

pub fn walk_type<V: Visitor>(v: &mut V, ty: &TypeExpr) {
    match &ty.kind {
        TypeKind::Primitive(_) => {}
        TypeKind::Named { generics, .. } => {
            for arg in generics {
                v.visit_type(arg);
            }
        }
        TypeKind::Pointer(inner) => v.visit_type(inner),
        TypeKind::Array { element, .. } => v.visit_type(element),
        TypeKind::Function { params, ret } => {
            for param in params {
                v.visit_type(param);
            }
            if let Some(ret) = ret {
                v.visit_type(ret);
            }
        }
    }
}
