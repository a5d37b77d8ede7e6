// ABOUTME: Error types for the compile pipeline and runtime, plus the diagnostic line formats

use crate::token::{Token, TokenKind};
use thiserror::Error;

/// Synchronization sentinel thrown by the parser when it must abandon the
/// current declaration. The diagnostic line has already been written by the
/// time this is constructed; the value only unwinds the recursive descent.
#[derive(Error, Debug)]
#[error("parse error")]
pub struct ParseError;

/// The category of a runtime failure. Each variant's message is the exact
/// text emitted to diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("Operand must be a number.")]
    NumberOperand,

    #[error("Operands must be numbers.")]
    NumberOperands,

    #[error("Operands must be two numbers or two strings.")]
    AddOperands,

    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(String),

    #[error("Can only call functions and classes.")]
    NotCallable,

    #[error("Expected {expected} arguments but got {actual}.")]
    ArityMismatch { expected: usize, actual: usize },
}

/// A runtime error attributed to the source line of the token that triggered
/// it. Unwinds the evaluator back to the top of the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: usize,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, token: &Token) -> Self {
        RuntimeError {
            kind,
            line: token.line,
        }
    }
}

/// Scanner diagnostic: `[line N] Error: MSG`.
pub fn report_scan_error(line: usize, message: &str) {
    eprintln!("[line {line}] Error: {message}");
}

/// Parser and resolver diagnostic: `[line N] Error at 'LEX': MSG`, or
/// `Error at end` when the offending token is EOF.
pub fn report_token_error(token: &Token, message: &str) {
    if token.kind == TokenKind::Eof {
        eprintln!("[line {}] Error at end: {}", token.line, message);
    } else {
        eprintln!("[line {}] Error at '{}': {}", token.line, token.lexeme, message);
    }
}

/// Runtime diagnostic: the message followed by a `[line N]` footer.
pub fn report_runtime_error(error: &RuntimeError) {
    eprintln!("{}", error.kind);
    eprintln!("[line {}]", error.line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Literal;

    #[test]
    fn test_runtime_error_messages() {
        assert_eq!(
            format!("{}", RuntimeErrorKind::NumberOperands),
            "Operands must be numbers."
        );
        assert_eq!(
            format!("{}", RuntimeErrorKind::AddOperands),
            "Operands must be two numbers or two strings."
        );
        assert_eq!(
            format!("{}", RuntimeErrorKind::UndefinedVariable("x".to_string())),
            "Undefined variable 'x'."
        );
        assert_eq!(
            format!(
                "{}",
                RuntimeErrorKind::ArityMismatch {
                    expected: 2,
                    actual: 3
                }
            ),
            "Expected 2 arguments but got 3."
        );
    }

    #[test]
    fn test_runtime_error_carries_token_line() {
        let token = Token::new(TokenKind::Minus, "-".to_string(), Literal::None, 12);
        let error = RuntimeError::new(RuntimeErrorKind::NumberOperand, &token);
        assert_eq!(error.line, 12);
        assert_eq!(format!("{}", error), "Operand must be a number.");
    }
}
