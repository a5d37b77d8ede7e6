// ABOUTME: Static resolver binding each variable use to a lexical scope distance

use crate::ast::{Expr, ExprId, FunctionDecl, Stmt};
use crate::error;
use crate::token::Token;
use std::collections::HashMap;

/// Where a name sits between declaration and the end of its initializer.
/// Reading a name while it is only `Declared` is the self-initializer error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VariableState {
    Declared,
    Defined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
    None,
    Function,
}

/// Output of the resolver pass: the side-table mapping variable-reference
/// nodes to scope distances (absent means global), plus the sticky error flag.
pub struct Resolution {
    pub locals: HashMap<ExprId, usize>,
    pub had_error: bool,
}

/// Single pass over the statement tree. Maintains a stack of per-scope name
/// states; the top level is not a scope (globals resolve dynamically).
/// Errors are reported and resolution continues.
pub struct Resolver {
    scopes: Vec<HashMap<String, VariableState>>,
    locals: HashMap<ExprId, usize>,
    current_function: FunctionKind,
    had_error: bool,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionKind::None,
            had_error: false,
        }
    }

    pub fn resolve(mut self, statements: &[Stmt]) -> Resolution {
        self.resolve_statements(statements);
        Resolution {
            locals: self.locals,
            had_error: self.had_error,
        }
    }

    fn resolve_statements(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Expression(expr) | Stmt::Print(expr) => self.resolve_expr(expr),
            Stmt::Var { name, initializer } => {
                self.declare(name);
                if let Some(init) = initializer {
                    self.resolve_expr(init);
                }
                self.define(name);
            }
            Stmt::Block(statements) => {
                self.scopes.push(HashMap::new());
                self.resolve_statements(statements);
                self.scopes.pop();
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }
            Stmt::Function(decl) => {
                // The name is usable inside the body, so it is defined
                // before the body resolves; that is what allows recursion.
                self.declare(&decl.name);
                self.define(&decl.name);
                self.resolve_function(decl);
            }
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionKind::None {
                    self.error(keyword, "Can't return from top-level code.");
                }
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Unary { operand, .. } => self.resolve_expr(operand),
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Grouping(inner) => self.resolve_expr(inner),
            Expr::Variable { id, name } => {
                let read_in_own_initializer = self
                    .scopes
                    .last()
                    .is_some_and(|scope| scope.get(&name.lexeme) == Some(&VariableState::Declared));
                if read_in_own_initializer {
                    self.error(name, "Can't read local variable in its own initializer.");
                }
                self.resolve_local(*id, name);
            }
            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, name);
            }
            Expr::Call { callee, args, .. } => {
                self.resolve_expr(callee);
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
        }
    }

    fn resolve_function(&mut self, decl: &FunctionDecl) {
        let enclosing = self.current_function;
        self.current_function = FunctionKind::Function;

        self.scopes.push(HashMap::new());
        for param in &decl.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_statements(&decl.body);
        self.scopes.pop();

        self.current_function = enclosing;
    }

    /// Marks a name as existing-but-uninitialized in the innermost scope.
    /// At top level there is no scope and declaration is dynamic.
    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }
        let duplicate = self
            .scopes
            .last()
            .is_some_and(|scope| scope.contains_key(&name.lexeme));
        if duplicate {
            self.error(name, "Already a variable with this name in this scope.");
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), VariableState::Declared);
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), VariableState::Defined);
        }
    }

    /// Walks the scope stack top-down and records the hop count to the first
    /// scope containing the name. Not found means global: no entry.
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.locals.insert(id, distance);
                return;
            }
        }
    }

    fn error(&mut self, token: &Token, message: &str) {
        error::report_token_error(token, message);
        self.had_error = true;
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
