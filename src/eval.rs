// ABOUTME: Tree-walking evaluator executing statements and expressions over an environment chain

use crate::ast::{Expr, ExprId, Stmt};
use crate::env::Environment;
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::token::{Literal, Token, TokenKind};
use crate::value::{Callable, LoxFunction, NativeFunction, Value};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Non-local exits out of statement execution. `Return` is ordinary control
/// flow caught at the function-call boundary; `Error` aborts the program.
#[derive(Debug)]
pub enum Unwind {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

/// Wall-clock seconds since the Unix epoch, the one built-in.
fn native_clock(_args: &[Value]) -> Result<Value, RuntimeErrorKind> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Ok(Value::Number(elapsed.as_secs_f64()))
}

/// The evaluator: owns the global environment, the pointer to the currently
/// active environment, and the resolver side-table.
#[derive(Debug)]
pub struct Interpreter {
    globals: Rc<Environment>,
    environment: Rc<Environment>,
    locals: HashMap<ExprId, usize>,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Environment::new();
        globals.define(
            "clock".to_string(),
            Value::Callable(Callable::Native(Rc::new(NativeFunction {
                name: "clock",
                arity: 0,
                func: native_clock,
            }))),
        );
        Interpreter {
            environment: globals.clone(),
            globals,
            locals: HashMap::new(),
        }
    }

    /// Installs the resolver's side-table before running a program.
    pub fn bind_locals(&mut self, locals: HashMap<ExprId, usize>) {
        self.locals = locals;
    }

    /// The global environment; tests use this to observe program effects.
    pub fn globals(&self) -> Rc<Environment> {
        self.globals.clone()
    }

    /// Executes a program. The first runtime error stops execution and is
    /// handed back for reporting.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                // A stray return at top level is rejected by the resolver;
                // an interpreter driven without one just stops quietly.
                Err(Unwind::Return(_)) => return Ok(()),
                Err(Unwind::Error(error)) => return Err(error),
            }
        }
        Ok(())
    }

    /// Evaluate-mode entry point: a single expression against globals.
    pub fn evaluate_expression(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        self.evaluate(expr)
    }

    // ===== Statements =====

    fn execute(&mut self, statement: &Stmt) -> Result<(), Unwind> {
        match statement {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                println!("{value}");
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(init) => self.evaluate(init)?,
                    None => Value::Nil,
                };
                self.environment.define(name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block(statements) => {
                let scope = Environment::with_parent(self.environment.clone());
                self.execute_block(statements, scope)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
            Stmt::Function(decl) => {
                let function = LoxFunction {
                    declaration: decl.clone(),
                    closure: self.environment.clone(),
                };
                self.environment.define(
                    decl.name.lexeme.clone(),
                    Value::Callable(Callable::Function(Rc::new(function))),
                );
                Ok(())
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Err(Unwind::Return(value))
            }
        }
    }

    /// Runs statements in the given environment, restoring the previous one
    /// on every exit path, including unwinds.
    fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<Environment>,
    ) -> Result<(), Unwind> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let result = statements
            .iter()
            .try_for_each(|statement| self.execute(statement));
        self.environment = previous;
        result
    }

    // ===== Expressions =====

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                Literal::None => Value::Nil,
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Number(n) => Value::Number(*n),
                Literal::Str(s) => Value::Str(s.clone()),
            }),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                match op.kind {
                    TokenKind::Minus => match value {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(RuntimeError::new(RuntimeErrorKind::NumberOperand, op)),
                    },
                    TokenKind::Bang => Ok(Value::Bool(!value.is_truthy())),
                    _ => unreachable!("parser only builds unary '-' and '!'"),
                }
            }
            Expr::Binary { left, op, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                self.binary_op(left, op, right)
            }
            Expr::Logical { left, op, right } => {
                let left = self.evaluate(left)?;
                match op.kind {
                    TokenKind::Or if left.is_truthy() => Ok(left),
                    TokenKind::And if !left.is_truthy() => Ok(left),
                    _ => self.evaluate(right),
                }
            }
            Expr::Variable { id, name } => self.look_up_variable(*id, name),
            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;
                let assigned = match self.locals.get(id) {
                    Some(&distance) => {
                        self.environment
                            .assign_at(distance, &name.lexeme, value.clone())
                    }
                    None => self.globals.assign(&name.lexeme, value.clone()),
                };
                if assigned {
                    Ok(value)
                } else {
                    Err(RuntimeError::new(
                        RuntimeErrorKind::UndefinedVariable(name.lexeme.clone()),
                        name,
                    ))
                }
            }
            Expr::Call {
                callee,
                paren,
                args,
            } => {
                let callee = self.evaluate(callee)?;
                let mut arguments = Vec::with_capacity(args.len());
                for arg in args {
                    arguments.push(self.evaluate(arg)?);
                }
                self.call(callee, arguments, paren)
            }
        }
    }

    fn binary_op(&self, left: Value, op: &Token, right: Value) -> Result<Value, RuntimeError> {
        match op.kind {
            TokenKind::Plus => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
                _ => Err(RuntimeError::new(RuntimeErrorKind::AddOperands, op)),
            },
            TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
            TokenKind::BangEqual => Ok(Value::Bool(left != right)),
            _ => {
                let (a, b) = match (left, right) {
                    (Value::Number(a), Value::Number(b)) => (a, b),
                    _ => return Err(RuntimeError::new(RuntimeErrorKind::NumberOperands, op)),
                };
                match op.kind {
                    TokenKind::Minus => Ok(Value::Number(a - b)),
                    TokenKind::Star => Ok(Value::Number(a * b)),
                    TokenKind::Slash => Ok(Value::Number(a / b)),
                    TokenKind::Greater => Ok(Value::Bool(a > b)),
                    TokenKind::GreaterEqual => Ok(Value::Bool(a >= b)),
                    TokenKind::Less => Ok(Value::Bool(a < b)),
                    TokenKind::LessEqual => Ok(Value::Bool(a <= b)),
                    _ => unreachable!("parser only builds arithmetic and comparison operators"),
                }
            }
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value, RuntimeError> {
        let found = match self.locals.get(&id) {
            Some(&distance) => self.environment.get_at(distance, &name.lexeme),
            None => self.globals.get(&name.lexeme),
        };
        found.ok_or_else(|| {
            RuntimeError::new(
                RuntimeErrorKind::UndefinedVariable(name.lexeme.clone()),
                name,
            )
        })
    }

    fn call(
        &mut self,
        callee: Value,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Callable(Callable::Native(native)) => {
                if arguments.len() != native.arity {
                    return Err(RuntimeError::new(
                        RuntimeErrorKind::ArityMismatch {
                            expected: native.arity,
                            actual: arguments.len(),
                        },
                        paren,
                    ));
                }
                (native.func)(&arguments).map_err(|kind| RuntimeError::new(kind, paren))
            }
            Value::Callable(Callable::Function(function)) => {
                if arguments.len() != function.arity() {
                    return Err(RuntimeError::new(
                        RuntimeErrorKind::ArityMismatch {
                            expected: function.arity(),
                            actual: arguments.len(),
                        },
                        paren,
                    ));
                }
                self.call_function(&function, arguments)
            }
            _ => Err(RuntimeError::new(RuntimeErrorKind::NotCallable, paren)),
        }
    }

    /// Invokes a function value: a fresh frame chained to the captured
    /// closure, parameters bound by position, body run as a block. A return
    /// unwind is caught here; falling off the end yields nil.
    fn call_function(
        &mut self,
        function: &LoxFunction,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let frame = Environment::with_parent(function.closure.clone());
        for (param, argument) in function.declaration.params.iter().zip(arguments) {
            frame.define(param.lexeme.clone(), argument);
        }

        match self.execute_block(&function.declaration.body, frame) {
            Ok(()) => Ok(Value::Nil),
            Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
