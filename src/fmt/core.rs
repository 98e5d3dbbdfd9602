use std::fmt::{self, Display};

use crate::core::{CoreAbstraction, CoreClassDef, CoreExpr, LiteralValue};

const INDENT: &str = "  ";

struct Formatter {
    buffer: String,
    indent_level: usize,
    multiline: bool,
}

impl Formatter {
    fn new(multiline: bool) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            multiline,
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Separator between a block form's children: a space on one line, or a
    /// newline plus indentation in multiline mode.
    fn write_break(&mut self) {
        if self.multiline {
            self.buffer.push('\n');
            for _ in 0..self.indent_level {
                self.buffer.push_str(INDENT);
            }
        } else {
            self.buffer.push(' ');
        }
    }

    fn finish(self) -> String {
        self.buffer
    }
}

impl Display for CoreExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new(f.alternate());
        format_expression(self, &mut formatter);
        write!(f, "{}", formatter.finish())
    }
}

fn format_expression(expr: &CoreExpr, fmt: &mut Formatter) {
    match expr {
        CoreExpr::Literal(lit) => {
            fmt.write_str("(lit ");
            fmt.write_str(&lit.type_name);
            fmt.write_str(" ");
            match &lit.value {
                LiteralValue::Int(i) => fmt.write_str(&i.to_string()),
                LiteralValue::String(s) => fmt.write_str(&format!("{:?}", s)),
                LiteralValue::Unit => fmt.write_str("()"),
            }
            fmt.write_str(")");
        }
        CoreExpr::Reference(reference) => {
            fmt.write_str("(ref ");
            fmt.write_str(&reference.name);
            fmt.write_str(")");
        }
        CoreExpr::Var(var) => {
            fmt.write_str("(var ");
            fmt.write_str(&var.name);
            fmt.write_str(")");
        }
        CoreExpr::Apply(apply) => {
            fmt.write_str("(app ");
            format_expression(&apply.func, fmt);
            fmt.write_str(" ");
            format_expression(&apply.arg, fmt);
            fmt.write_str(")");
        }
        CoreExpr::Abstraction(lambda) => format_abstraction(lambda, fmt),
        CoreExpr::Let(binding) => {
            fmt.write_str("(let ");
            fmt.write_str(&binding.name);
            fmt.write_str(" ");
            format_expression(&binding.value, fmt);
            fmt.indent();
            fmt.write_break();
            format_expression(&binding.body, fmt);
            fmt.dedent();
            fmt.write_str(")");
        }
        CoreExpr::Sequence(seq) => {
            fmt.write_str("(seq");
            fmt.indent();
            fmt.write_break();
            format_expression(&seq.first, fmt);
            fmt.write_break();
            format_expression(&seq.second, fmt);
            fmt.dedent();
            fmt.write_str(")");
        }
        CoreExpr::WithDefinitions(with_defs) => {
            fmt.write_str("(withdef (");
            for (i, def) in with_defs.defs.iter().enumerate() {
                if i > 0 {
                    fmt.write_str(" ");
                }
                format_class(def, fmt);
            }
            fmt.write_str(")");
            fmt.indent();
            fmt.write_break();
            format_expression(&with_defs.body, fmt);
            fmt.dedent();
            fmt.write_str(")");
        }
    }
}

fn format_abstraction(lambda: &CoreAbstraction, fmt: &mut Formatter) {
    fmt.write_str("(fn ");
    fmt.write_str(&lambda.param);
    if let Some(annotation) = &lambda.annotation {
        fmt.write_str(": ");
        fmt.write_str(annotation);
    }
    fmt.write_str(" ");
    format_expression(&lambda.body, fmt);
    fmt.write_str(")");
}

fn format_class(def: &CoreClassDef, fmt: &mut Formatter) {
    fmt.write_str("(class ");
    fmt.write_str(&def.name);
    for method in &def.methods {
        fmt.write_str(" (def ");
        fmt.write_str(&method.name);
        fmt.write_str(" ");
        format_abstraction(&method.body, fmt);
        fmt.write_str(")");
    }
    fmt.write_str(")");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CoreMethodDef;

    #[test]
    fn test_format_application() {
        let expr = CoreExpr::apply(CoreExpr::var("f"), CoreExpr::int(7));
        assert_eq!(expr.to_string(), "(app (var f) (lit Int 7))");
    }

    #[test]
    fn test_format_literals() {
        assert_eq!(CoreExpr::string("a b").to_string(), "(lit String \"a b\")");
        assert_eq!(CoreExpr::unit().to_string(), "(lit Unit ())");
        assert_eq!(CoreExpr::reference("print").to_string(), "(ref print)");
    }

    #[test]
    fn test_format_annotated_abstraction() {
        let expr = CoreExpr::abstraction("x", Some("Int"), CoreExpr::var("x"));
        assert_eq!(expr.to_string(), "(fn x: Int (var x))");
    }

    #[test]
    fn test_format_let_single_line() {
        let expr = CoreExpr::let_in(
            "x",
            CoreExpr::int(1),
            CoreExpr::sequence(CoreExpr::var("x"), CoreExpr::var("x")),
        );
        assert_eq!(
            expr.to_string(),
            "(let x (lit Int 1) (seq (var x) (var x)))"
        );
    }

    #[test]
    fn test_format_let_multiline() {
        let expr = CoreExpr::let_in(
            "x",
            CoreExpr::int(1),
            CoreExpr::sequence(CoreExpr::var("x"), CoreExpr::var("x")),
        );
        assert_eq!(
            format!("{:#}", expr),
            "(let x (lit Int 1)\n  (seq\n    (var x)\n    (var x)))"
        );
    }

    #[test]
    fn test_format_class_definitions() {
        let mut class = CoreClassDef::new("A");
        class.methods.push(CoreMethodDef {
            name: "m".to_string(),
            body: CoreAbstraction {
                param: "x".to_string(),
                annotation: None,
                body: Box::new(CoreExpr::var("x")),
            },
        });
        let expr = CoreExpr::with_definitions(vec![class, CoreClassDef::new("B")], CoreExpr::var("A"));
        assert_eq!(
            expr.to_string(),
            "(withdef ((class A (def m (fn x (var x)))) (class B)) (var A))"
        );
    }
}
