// ABOUTME: Pipeline tests running whole programs through the library and observing globals

use rlox::eval::Interpreter;
use rlox::parser::Parser;
use rlox::resolver::Resolver;
use rlox::scanner::Scanner;
use rlox::token::TokenKind;
use rlox::value::Value;

/// Runs a program through scan, parse, resolve, and interpret, failing the
/// test on any compile-stage error.
fn run(source: &str) -> Interpreter {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    assert!(!scanner.had_error(), "scan error in {source:?}");

    let mut parser = Parser::new(tokens);
    let statements = parser.parse_program();
    assert!(!parser.had_error(), "parse error in {source:?}");

    let resolution = Resolver::new().resolve(&statements);
    assert!(!resolution.had_error, "resolve error in {source:?}");

    let mut interpreter = Interpreter::new();
    interpreter.bind_locals(resolution.locals);
    interpreter
        .interpret(&statements)
        .expect("program should run without runtime errors");
    interpreter
}

fn global(interpreter: &Interpreter, name: &str) -> Value {
    interpreter
        .globals()
        .get(name)
        .unwrap_or_else(|| panic!("global '{name}' should be defined"))
}

#[test]
fn test_scanner_always_terminates_with_eof() {
    for source in ["", "var a = 1;", "\"unterminated", "@#^"] {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}

#[test]
fn test_uninitialized_variable_is_nil() {
    let interpreter = run("var a;");
    assert_eq!(global(&interpreter, "a"), Value::Nil);
}

#[test]
fn test_global_redefinition_is_allowed() {
    let interpreter = run("var a = 1; var a = 2;");
    assert_eq!(global(&interpreter, "a"), Value::Number(2.0));
}

#[test]
fn test_closures_share_their_defining_frame() {
    // bump and read capture the same block frame, which outlives the block.
    let interpreter = run(
        "var inc; var get;\n\
         {\n\
           var n = 10;\n\
           fun bump() { n = n + 1; }\n\
           fun read() { return n; }\n\
           inc = bump; get = read;\n\
         }\n\
         inc();\n\
         var r = get();",
    );
    assert_eq!(global(&interpreter, "r"), Value::Number(11.0));
}

#[test]
fn test_function_returning_function_called_immediately() {
    let interpreter = run(
        "fun makeAdder(a) { fun add(b) { return a + b; } return add; }\n\
         var r = makeAdder(2)(3);",
    );
    assert_eq!(global(&interpreter, "r"), Value::Number(5.0));
}

#[test]
fn test_resolved_distances_agree_with_environment_chain() {
    // Each read of `x` must land on the binding visible where the read
    // appears, however deeply blocks nest.
    let interpreter = run(
        "var x = \"global\";\n\
         var from_outer; var from_inner; var from_shadow;\n\
         {\n\
           var x = \"outer\";\n\
           from_outer = x;\n\
           {\n\
             from_inner = x;\n\
             var x = \"inner\";\n\
             from_shadow = x;\n\
           }\n\
         }",
    );
    assert_eq!(global(&interpreter, "from_outer"), Value::Str("outer".to_string()));
    assert_eq!(global(&interpreter, "from_inner"), Value::Str("outer".to_string()));
    assert_eq!(global(&interpreter, "from_shadow"), Value::Str("inner".to_string()));
}

#[test]
fn test_function_resolves_names_at_declaration_site() {
    let interpreter = run(
        "var label = \"first\";\n\
         var before; var after;\n\
         {\n\
           fun read() { return label; }\n\
           before = read();\n\
           var label = \"second\";\n\
           after = read();\n\
         }",
    );
    // read captured the scope before the block-local label existed.
    assert_eq!(global(&interpreter, "before"), Value::Str("first".to_string()));
    assert_eq!(global(&interpreter, "after"), Value::Str("first".to_string()));
}

#[test]
fn test_function_equality_is_identity() {
    let interpreter = run(
        "fun f() {}\n\
         var alias = f;\n\
         var same = alias == f;\n\
         var cross = f == 1;",
    );
    assert_eq!(global(&interpreter, "same"), Value::Bool(true));
    assert_eq!(global(&interpreter, "cross"), Value::Bool(false));
}

#[test]
fn test_value_equals_itself_except_nan() {
    let interpreter = run(
        "var n = 1; var s = \"s\"; var b = true; var z;\n\
         var nan = 0 / 0;\n\
         var n_eq = n == n; var s_eq = s == s; var b_eq = b == b; var z_eq = z == z;\n\
         var nan_eq = nan == nan; var nan_ne = nan != nan;",
    );
    assert_eq!(global(&interpreter, "n_eq"), Value::Bool(true));
    assert_eq!(global(&interpreter, "s_eq"), Value::Bool(true));
    assert_eq!(global(&interpreter, "b_eq"), Value::Bool(true));
    assert_eq!(global(&interpreter, "z_eq"), Value::Bool(true));
    assert_eq!(global(&interpreter, "nan_eq"), Value::Bool(false));
    assert_eq!(global(&interpreter, "nan_ne"), Value::Bool(true));
}

#[test]
fn test_while_and_for_agree() {
    let interpreter = run(
        "var a = 0;\n\
         var i = 0;\n\
         while (i < 5) { a = a + i; i = i + 1; }\n\
         var b = 0;\n\
         for (var j = 0; j < 5; j = j + 1) b = b + j;",
    );
    assert_eq!(global(&interpreter, "a"), global(&interpreter, "b"));
}

#[test]
fn test_nested_calls_restore_environments() {
    let interpreter = run(
        "var depth = 0;\n\
         fun outer() { var local = 1; inner(); return local; }\n\
         fun inner() { var local = 2; depth = depth + 1; }\n\
         var r = outer();",
    );
    assert_eq!(global(&interpreter, "r"), Value::Number(1.0));
    assert_eq!(global(&interpreter, "depth"), Value::Number(1.0));
}

#[test]
fn test_clock_is_predefined_and_monotonic_enough() {
    let interpreter = run("var before = clock(); var after = clock(); var ok = before <= after;");
    assert_eq!(global(&interpreter, "ok"), Value::Bool(true));
}

#[test]
fn test_runtime_error_stops_execution() {
    let mut scanner = Scanner::new("var a = 1; a = a + nil; a = 99;");
    let tokens = scanner.scan_tokens();
    let mut parser = Parser::new(tokens);
    let statements = parser.parse_program();
    let resolution = Resolver::new().resolve(&statements);

    let mut interpreter = Interpreter::new();
    interpreter.bind_locals(resolution.locals);
    let error = interpreter
        .interpret(&statements)
        .expect_err("should stop on the type error");
    assert_eq!(error.line, 1);
    // The statement after the failure never ran.
    assert_eq!(interpreter.globals().get("a"), Some(Value::Number(1.0)));
}
