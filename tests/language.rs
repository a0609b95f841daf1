use std::{cell::RefCell, rc::Rc};

use hygge::{run, scan_and_parse, Error, ErrorKind, Interpreter, RuntimeError, Statement};
use pretty_assertions::assert_eq;

struct Session {
    buffer: Rc<RefCell<Vec<u8>>>,
    itp: Interpreter,
}

impl Session {
    fn new() -> Self {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        let itp = Interpreter::new(buffer.clone());
        Self { buffer, itp }
    }

    fn run(&mut self, src: &str) -> Result<(), Error> {
        run(src, &mut self.itp)
    }

    fn output(&self) -> String {
        String::from_utf8(self.buffer.borrow().clone()).unwrap()
    }
}

fn assert_output(src: &str, expected: &str) {
    let mut session = Session::new();
    if let Err(e) = session.run(src) {
        panic!("Script failed: {e}");
    }
    assert_eq!(session.output(), expected);
}

fn runtime_failure(src: &str) -> (String, RuntimeError) {
    let mut session = Session::new();
    match session.run(src) {
        Err(Error::Runtime(err)) => (session.output(), err),
        other => panic!("Script was expected to fail at runtime, got {:?}", other),
    }
}

#[test]
fn block_declarations_do_not_leak() {
    assert_output("sæt x = 1; { sæt x = 2; } skriv x;", "1\n");
}

#[test]
fn reassignment() {
    assert_output("sæt x = 1; x = 2; skriv x;", "2\n");
}

#[test]
fn assignment_without_declaration_halts() {
    let (output, err) = runtime_failure("x = 2; skriv \"aldrig\";");
    assert_eq!(output, "");
    assert!(matches!(err, RuntimeError::UndefinedVariable(_)));
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(err.line(), 1);
}

#[test]
fn plus_on_numbers_and_strings() {
    assert_output("skriv 1 + 2;", "3\n");
    assert_output("skriv \"a\" + \"b\";", "ab\n");

    let (output, err) = runtime_failure("skriv 1 + \"a\";");
    assert_eq!(output, "");
    assert!(matches!(err, RuntimeError::OperandsMustBeNumbersOrStrings(_)));
}

#[test]
fn integral_numbers_print_without_fraction() {
    assert_output("skriv 3 / 2;", "1.5\n");
    assert_output("skriv 4 / 2;", "2\n");
    assert_output("skriv 10;", "10\n");
    assert_output("skriv 2.50;", "2.5\n");
}

#[test]
fn falsy_while_never_runs() {
    assert_output(
        "sæt n = 0; imens (n > 0) { skriv n; n = n - 1; } skriv \"slut\";",
        "slut\n",
    );
}

#[test]
fn arity_and_callability_errors() {
    let (_, err) = runtime_failure("gøremål f(a) { skriv a; }\nf(1, 2);");
    assert_eq!(err.to_string(), "Expected 1 arguments but got 2.\n[line 2]");

    let (_, err) = runtime_failure("sæt ikke = 3;\nikke();");
    assert!(matches!(err, RuntimeError::ValueNotCallable(2, _)));
    assert_eq!(err.to_string(), "Can only call functions and classes.\n[line 2]");
}

#[test]
fn syntax_errors_stop_before_evaluation() {
    let mut session = Session::new();
    let err = session.run("skriv 1;\nsæt a = ;\nskriv 2;").unwrap_err();
    assert!(err.is_parse());
    assert_eq!(session.output(), "");

    let Error::Parse(errors) = err else {
        unreachable!()
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::Syntax);
    assert_eq!(errors[0].line(), 2);
    assert_eq!(errors[0].location().as_deref(), Some("at ';'"));
    assert_eq!(errors[0].message(), "Expect expression.");
}

#[test]
fn lexical_and_syntax_errors_are_collected_together() {
    let errors = scan_and_parse("skriv 1 $ 2;\nskriv (;\nskriv \"aaa").unwrap_err();
    let kinds: Vec<_> = errors.iter().map(|e| (e.kind(), e.line())).collect();
    assert_eq!(
        kinds,
        vec![
            (ErrorKind::Lexical, 1),
            (ErrorKind::Syntax, 1),
            (ErrorKind::Syntax, 2),
            (ErrorKind::Lexical, 3),
            (ErrorKind::Syntax, 3),
        ]
    );
}

#[test]
fn scan_and_parse_returns_statements() {
    let stmts = scan_and_parse("// intro\nsæt a = 1;\nskriv a;").unwrap();
    assert_eq!(stmts.len(), 2);
    assert!(matches!(stmts[0], Statement::Declare(..)));
    assert!(matches!(stmts[1], Statement::Print(..)));
}

#[test]
fn runtime_error_keeps_earlier_effects() {
    let mut session = Session::new();
    let err = session
        .run("sæt a = 1; skriv a; a = 2; skriv -\"x\"; skriv 3;")
        .unwrap_err();
    assert!(err.is_runtime());
    assert_eq!(session.output(), "1\n");

    // the failed pass left `a` mutated, the session carries on
    session.run("skriv a;").unwrap();
    assert_eq!(session.output(), "1\n2\n");
}

#[test]
fn deep_recursion_within_the_call_limit() {
    let src = r#"
        sæt n = 0;
        gøremål f(d) { hvis (d > 0) { n = n + 1; f(d - 1); } }
        f(200);
        skriv n;
    "#;
    // the evaluator recurses on the host stack, debug builds need the room
    let output = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(move || {
            let mut session = Session::new();
            session.run(src).map(|_| session.output()).map_err(|e| e.to_string())
        })
        .unwrap()
        .join()
        .unwrap();
    assert_eq!(output, Ok("200\n".to_string()));
}

#[test]
fn fibonacci_with_globals() {
    let src = r#"
        sæt a = 0;
        sæt b = 1;
        for (sæt i = 0; i < 10; i = i + 1) {
            skriv a;
            sæt tmp = a + b;
            a = b;
            b = tmp;
        }
    "#;
    assert_output(src, "0\n1\n1\n2\n3\n5\n8\n13\n21\n34\n");
}

#[test]
fn functions_communicate_through_globals() {
    let src = r#"
        sæt resultat = ingenting;
        gøremål kvadrat(n) {
            resultat = n * n;
        }
        kvadrat(7);
        skriv resultat;
    "#;
    assert_output(src, "49\n");
}

#[test]
fn logical_values_and_truthiness() {
    let src = r#"
        skriv "" eller "tom";
        skriv 0 og "nul er sandt";
        hvis (ingenting eller falsk) skriv "nej"; ellers skriv "ja";
    "#;
    assert_output(src, "\nnul er sandt\nja\n");
}

#[test]
fn equality_works_for_every_kind() {
    assert_output(
        "skriv \"hygge\" == \"hygge\"; skriv sandt == sandt; skriv Clock == Clock; skriv 1 != ingenting;",
        "sandt\nsandt\nsandt\nsandt\n",
    );
}

#[test]
fn unicode_identifiers_and_strings() {
    assert_output("sæt smørrebrød = \"lækkert\"; skriv smørrebrød;", "lækkert\n");
}
