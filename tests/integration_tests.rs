//! End-to-end tests: raw AST → normalization → inference → evaluation

use boom::ast::RawExpr;
use boom::desugar::normalize;
use boom::interpreter::{RunError, Value, run};
use boom::library::Library;
use boom::types::{Type, infer};

fn run_program(raw: RawExpr) -> (Result<Value, RunError>, String) {
    let expr = normalize(raw).expect("normalization failed");
    let mut out = Vec::new();
    let result = run(&expr, &Library::standard(), &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn call(func: &str, arg: RawExpr) -> RawExpr {
    RawExpr::app(RawExpr::var_ref(func), arg)
}

#[test]
fn hello_world() {
    let (result, out) = run_program(RawExpr::seq([call("print", RawExpr::string("Hello, world!"))]));
    assert_eq!(result, Ok(Value::string("Hello, world!")));
    assert_eq!(out, "Hello, world!");
}

#[test]
fn function_definitions_and_calls() {
    // def greet(name: String) print(name) end
    // greet("a"); greet("b")
    let raw = RawExpr::seq([
        RawExpr::defun(
            "greet",
            Some(("name", Some("String"))),
            Some(call("print", RawExpr::var_ref("name"))),
        ),
        call("greet", RawExpr::string("a")),
        call("greet", RawExpr::string("b")),
    ]);
    let (result, out) = run_program(raw);
    assert_eq!(result, Ok(Value::string("b")));
    assert_eq!(out, "ab");
}

#[test]
fn zero_parameter_function_takes_unit() {
    // def hello() print("hi") end; hello(())
    let raw = RawExpr::seq([
        RawExpr::defun("hello", None, Some(call("print", RawExpr::string("hi")))),
        call("hello", RawExpr::unit()),
    ]);
    let (result, out) = run_program(raw);
    assert_eq!(result, Ok(Value::string("hi")));
    assert_eq!(out, "hi");
}

#[test]
fn zero_parameter_function_rejects_arguments() {
    let raw = RawExpr::seq([
        RawExpr::defun("hello", None, None),
        call("hello", RawExpr::int(1)),
    ]);
    let (result, out) = run_program(raw);
    assert!(matches!(result, Err(RunError::Type(_))));
    assert_eq!(out, "");
}

#[test]
fn variables_are_let_bound() {
    // x = "v"; p(x)
    let raw = RawExpr::seq([
        RawExpr::defvar("x", RawExpr::string("v")),
        call("p", RawExpr::var_ref("x")),
    ]);
    let (result, out) = run_program(raw);
    assert_eq!(result, Ok(Value::string("v")));
    assert_eq!(out, "\"v\"\n");
}

#[test]
fn classes_are_usable_before_their_definition() {
    // p(A.new(())); class A; end
    let raw = RawExpr::seq([
        call("p", call("A.new", RawExpr::unit())),
        RawExpr::defclass("A", Vec::new()),
    ]);
    let (result, out) = run_program(raw);
    assert_eq!(result, Ok(Value::Object("A".to_string())));
    assert_eq!(out, "#<A>\n");
}

#[test]
fn class_object_has_class_type() {
    let raw = RawExpr::seq([RawExpr::defclass("A", Vec::new()), RawExpr::var_ref("A")]);
    let expr = normalize(raw).unwrap();
    assert_eq!(infer(&expr, &Library::standard()), Ok(Type::raw("Class")));
}

#[test]
fn method_bodies_are_not_type_checked() {
    // Known limitation: the method below references an unbound name and
    // applies an Int, yet the program is accepted and runs.
    let raw = RawExpr::seq([
        RawExpr::defclass(
            "A",
            [RawExpr::defun(
                "broken",
                None,
                Some(RawExpr::app(RawExpr::int(1), RawExpr::var_ref("nowhere"))),
            )],
        ),
        call("A.new", RawExpr::unit()),
    ]);
    let (result, _) = run_program(raw);
    assert_eq!(result, Ok(Value::Object("A".to_string())));
}

#[test]
fn lone_definition_returns_the_function() {
    let raw = RawExpr::defun("id", Some(("x", None)), Some(RawExpr::var_ref("x")));
    let expr = normalize(raw).unwrap();
    let ty = infer(&expr, &Library::standard()).unwrap();
    assert!(matches!(ty, Type::Fun(_, _)));
}

#[test]
fn empty_program_is_unit() {
    let (result, out) = run_program(RawExpr::seq(Vec::new()));
    assert_eq!(result, Ok(Value::Unit));
    assert_eq!(out, "");
}
