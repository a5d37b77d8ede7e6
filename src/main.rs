// ABOUTME: Command-line entry point dispatching the tokenize, parse, evaluate, and run pipelines

use clap::{Parser as CliParser, ValueEnum};
use rlox::ast::{paren_form, Expr, Stmt};
use rlox::error;
use rlox::eval::Interpreter;
use rlox::parser::Parser;
use rlox::resolver::Resolver;
use rlox::scanner::Scanner;
use std::path::PathBuf;
use std::process;

/// Exit codes, following the sysexits convention the pipeline errors map to.
const EXIT_USAGE: i32 = 1;
const EXIT_COMPILE_ERROR: i32 = 65;
const EXIT_RUNTIME_ERROR: i32 = 70;

/// Tree-walking interpreter for the Lox scripting language
#[derive(CliParser, Debug)]
#[command(name = "rlox")]
#[command(version)]
#[command(about = "A tree-walking interpreter for the Lox scripting language")]
struct CliArgs {
    /// Pipeline to run over the source file
    #[arg(value_enum)]
    command: Pipeline,

    /// Path to a UTF-8 source file
    #[arg(value_name = "FILE")]
    script: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pipeline {
    /// Print the token stream
    Tokenize,
    /// Print the parenthesized tree of a single expression
    Parse,
    /// Evaluate a single expression and print its value
    Evaluate,
    /// Execute a full program
    Run,
}

fn main() {
    // Handled by hand so CLI misuse exits 1 rather than clap's default.
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            process::exit(EXIT_USAGE);
        }
    };

    let source = match std::fs::read_to_string(&args.script) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Cannot read source file {}: {}", args.script.display(), err);
            process::exit(EXIT_USAGE);
        }
    };

    let code = match args.command {
        Pipeline::Tokenize => tokenize(&source),
        Pipeline::Parse => parse(&source),
        Pipeline::Evaluate => evaluate(&source),
        Pipeline::Run => run(&source),
    };
    process::exit(code);
}

/// Prints one line per token. Lexical errors go to diagnostics but never
/// suppress the tokens that follow them.
fn tokenize(source: &str) -> i32 {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    for token in &tokens {
        println!("{token}");
    }
    if scanner.had_error() {
        EXIT_COMPILE_ERROR
    } else {
        0
    }
}

fn parse(source: &str) -> i32 {
    let Some(expr) = parse_expression(source) else {
        return EXIT_COMPILE_ERROR;
    };
    println!("{}", paren_form(&expr));
    0
}

fn evaluate(source: &str) -> i32 {
    let Some(expr) = parse_expression(source) else {
        return EXIT_COMPILE_ERROR;
    };
    let mut interpreter = Interpreter::new();
    match interpreter.evaluate_expression(&expr) {
        Ok(value) => {
            println!("{value}");
            0
        }
        Err(runtime_error) => {
            error::report_runtime_error(&runtime_error);
            EXIT_RUNTIME_ERROR
        }
    }
}

fn run(source: &str) -> i32 {
    let Some(statements) = parse_program(source) else {
        return EXIT_COMPILE_ERROR;
    };

    let resolution = Resolver::new().resolve(&statements);
    if resolution.had_error {
        return EXIT_COMPILE_ERROR;
    }

    let mut interpreter = Interpreter::new();
    interpreter.bind_locals(resolution.locals);
    match interpreter.interpret(&statements) {
        Ok(()) => 0,
        Err(runtime_error) => {
            error::report_runtime_error(&runtime_error);
            EXIT_RUNTIME_ERROR
        }
    }
}

/// Scan-and-parse for the single-expression pipelines. `None` means a scan
/// or parse error was already reported.
fn parse_expression(source: &str) -> Option<Expr> {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    if scanner.had_error() {
        return None;
    }

    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression()?;
    if parser.had_error() {
        return None;
    }
    Some(expr)
}

/// Scan-and-parse for program mode.
fn parse_program(source: &str) -> Option<Vec<Stmt>> {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    if scanner.had_error() {
        return None;
    }

    let mut parser = Parser::new(tokens);
    let statements = parser.parse_program();
    if parser.had_error() {
        return None;
    }
    Some(statements)
}
