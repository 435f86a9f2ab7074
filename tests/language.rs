use std::{
    fs::{self},
    rc::Rc,
    time::Duration,
};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use ripple::{
    Clock, Context, ManualClock, OutputBuffer, Value,
    error::{Error, ParseError, RuntimeError},
    parse_program,
};
use walkdir::WalkDir;

/// Runs `src` on a fresh context with virtual time and returns what it
/// printed.
fn run(src: &str) -> Result<String, Error> {
    let output = OutputBuffer::new();
    let context = Context::builder().output(output.clone())
                                    .clock(Rc::new(ManualClock::new()))
                                    .build();
    context.run(src)?;
    Ok(output.contents())
}

fn assert_output(src: &str, expected: &str) {
    match run(src) {
        Ok(output) => assert_eq!(output, expected),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = run(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) -> Error {
    match run(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn script_examples_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "rpl"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Failed to read \
                                                                      {expected_path:?}: {e}")
                                                          });

        count += 1;
        match run(&source) {
            Ok(output) => assert_eq!(output, expected, "output of {path:?}"),
            Err(e) => panic!("Script {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn variables_and_arithmetic() {
    assert_output("var x = 10; var y = 5; print(\"x = \" + (x + y));", "x = 15\n");
    assert_output("print(7 * 9, 8 - 5, 10 / 4);", "63 3 2.5\n");
    assert_output("print(1 / 3);", "0.333333\n");
    assert_output("print(-4 + 1);", "-3\n");
    assert_output("print(2 + 3 * 4, (2 + 3) * 4);", "14 20\n");
}

#[test]
fn add_mutates_captured_global() {
    assert_output("var x = 10; function add(n){ x = x + n; } add(5); print(x);", "15\n");
}

#[test]
fn early_prints_before_late() {
    assert_output("setTimeout(function(){ print(\"late\"); }, 10); print(\"early\");",
                  "early\nlate\n");
}

#[test]
fn division_by_zero_flows_through() {
    assert_output("print(1 / 0, -1 / 0, 0 / 0);", "Infinity -Infinity NaN\n");
    assert_output("var n = 0 / 0; print(n == n);", "false\n");
}

#[test]
fn string_concatenation() {
    assert_output("print(\"a\" + 1);", "a1\n");
    assert_output("print(1 + \"a\");", "1a\n");
    assert_output("print(\"list: \" + [1, 2]);", "list: [Array]\n");
    assert_output("print(\"\" + { a: 1 });", "[Object]\n");
    assert_output("print(\"f: \" + print);", "f: [Function]\n");
}

#[test]
fn equality_semantics() {
    assert_output("print(1 == 1, \"a\" == \"a\", null == null, true == true);",
                  "true true true true\n");
    assert_output("print(1 == \"1\", 0 == false, null == 0);", "false false false\n");
    assert_output("var a = [1]; var b = a; print(a == b, a == [1]);", "true false\n");
}

#[test]
fn closures_capture_their_frame() {
    assert_output("function counter() {
                       var count = 0;
                       function () { count = count + 1; count; };
                   }
                   var next = counter();
                   next();
                   next();
                   print(next());",
                  "3\n");
}

#[test]
fn closures_see_later_changes_to_captured_bindings() {
    assert_output("var x = 1; function show() { print(x); } x = 2; show();", "2\n");
}

#[test]
fn shadowing_does_not_leak() {
    assert_output("var x = \"outer\";
                   function f() { var x = \"inner\"; print(x); }
                   f();
                   print(x);",
                  "inner\nouter\n");
}

#[test]
fn closure_scope_not_caller_scope() {
    let err = assert_failure("function f() { secret; }
                              function g() { var secret = 1; f(); }
                              g();");
    assert!(matches!(err, Error::Runtime(RuntimeError::UnknownVariable { ref name, line: 1 })
                          if name == "secret"));
}

#[test]
fn free_variables_resolve_in_defining_scope_despite_caller_shadowing() {
    assert_output("var x = 1;
                   function f() { x; }
                   function g() { var x = 2; print(f()); }
                   g();",
                  "1\n");
}

#[test]
fn recursion() {
    assert_output("function fib(n) { if (n < 2) { n; } else { fib(n - 1) + fib(n - 2); } }
                   print(fib(15));",
                  "610\n");
}

#[test]
fn name_errors() {
    let err = assert_failure("print(missing);");
    assert!(matches!(err, Error::Runtime(ref e) if e.is_name_error()));

    let err = assert_failure("\n\nmissing = 1;");
    assert!(matches!(err, Error::Runtime(RuntimeError::UndefinedAssignment { line: 3, .. })));
}

#[test]
fn errors_keep_earlier_side_effects() {
    let output = OutputBuffer::new();
    let context = Context::builder().output(output.clone())
                                    .clock(Rc::new(ManualClock::new()))
                                    .build();

    let err = context.run("var kept = 1; print(\"before\"); nope();").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::UnknownVariable { .. })));
    assert_eq!(output.contents(), "before\n");
    assert_eq!(context.globals().lookup("kept", 0).unwrap(), Value::Number(1.0));
}

#[test]
fn invocation_errors() {
    let err = assert_failure("var s = \"text\"; s(1);");
    assert_eq!(err.to_string(), "Error on line 1: 's' is a string, not a function.");
}

#[test]
fn type_errors() {
    let err = assert_failure("\"a\" - 1;");
    assert!(matches!(err, Error::Runtime(RuntimeError::TypeError { .. })));
    let err = assert_failure("[1] < 2;");
    assert!(matches!(err, Error::Runtime(RuntimeError::TypeError { .. })));
}

#[test]
fn return_is_not_supported() {
    let err = assert_failure("function f() { return 1; }");
    assert!(matches!(err, Error::Parse(ParseError::UnexpectedToken { .. })));
    assert_output("function f() { 1; } print(f());", "1\n");
}

#[test]
fn parse_errors_report_line_and_column() {
    let err = assert_failure("var a = 1;\nvar b = ;");
    let Error::Parse(err) = err else { panic!("expected a parse error") };
    assert_eq!((err.position().line, err.position().column), (2, 9));
    assert_eq!(err.to_string(), "Error on line 2, column 9: Expected expression, found ';'.");

    let err = assert_failure("print(\"open);");
    assert!(matches!(err, Error::Parse(ParseError::UnterminatedString { .. })));

    let err = assert_failure("var a = 1 @ 2;");
    assert!(matches!(err, Error::Parse(ParseError::UnexpectedCharacter { .. })));
}

#[test]
fn comments_are_ignored() {
    assert_output("// leading comment\nprint(1); // trailing\n// done", "1\n");
}

#[test]
fn timers_run_after_synchronous_code() {
    assert_output("setTimeout(function () { print(\"deferred\"); }, 0);
                   print(\"sync\");",
                  "sync\ndeferred\n");
}

#[test]
fn timers_fire_in_due_order() {
    assert_output("setTimeout(function () { print(\"late\"); }, 100);
                   setTimeout(function () { print(\"early\"); }, 10);",
                  "early\nlate\n");
}

#[test]
fn timers_with_equal_delay_fire_fifo() {
    assert_output("setTimeout(function () { print(1); }, 5);
                   setTimeout(function () { print(2); }, 5);
                   setTimeout(function () { print(3); }, 5);",
                  "1\n2\n3\n");
}

#[test]
fn timer_delays_are_clamped() {
    assert_output("setTimeout(function () { print(\"b\"); }, 1);
                   setTimeout(function () { print(\"a\"); }, -50);
                   setTimeout(function () { print(\"c\"); }, \"soon\");
                   setTimeout(function () { print(\"d\"); });",
                  "a\nc\nd\nb\n");
}

#[test]
fn timer_with_non_function_is_ignored() {
    assert_output("print(setTimeout(42, 10));", "null\n");
    assert_output("setTimeout(print, 0); print(\"only\");", "only\n");
}

#[test]
fn timers_can_schedule_timers() {
    assert_output("function tick(n) {
                       print(\"tick \" + n);
                       if (n < 3) { setTimeout(function () { tick(n + 1); }, 10); }
                   }
                   setTimeout(function () { tick(1); }, 10);",
                  "tick 1\ntick 2\ntick 3\n");
}

#[test]
fn timer_callbacks_use_their_closure() {
    assert_output("var message = \"old\";
                   function later(text) { setTimeout(function () { print(text, message); }, 1); }
                   later(\"captured\");
                   message = \"new\";",
                  "captured new\n");
}

#[test]
fn virtual_time_ends_at_latest_due_time() {
    let clock = Rc::new(ManualClock::new());
    let context = Context::builder().output(OutputBuffer::new())
                                    .clock(clock.clone())
                                    .build();

    context.run("setTimeout(function () { setTimeout(function () { 1; }, 40); }, 60);
                 setTimeout(function () { 1; }, 20);")
           .unwrap();

    assert_eq!(clock.now(), Duration::from_millis(100));
    assert_eq!(context.pending_tasks(), 0);
}

#[test]
fn failing_task_leaves_the_rest_queued() {
    let output = OutputBuffer::new();
    let context = Context::builder().output(output.clone())
                                    .clock(Rc::new(ManualClock::new()))
                                    .build();

    let err = context.run("setTimeout(function () { print(\"first\"); }, 1);
                           setTimeout(function () { broken(); }, 2);
                           setTimeout(function () { print(\"third\"); }, 3);")
                     .unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::UnknownVariable { .. })));
    assert_eq!(output.contents(), "first\n");
    assert_eq!(context.pending_tasks(), 1);

    assert_eq!(context.run_event_loop().unwrap(), 1);
    assert_eq!(output.contents(), "first\nthird\n");
}

#[test]
fn scopes_of_if_and_while() {
    assert_failure("if (1) { var a = 1; } print(a);");
    assert_failure("var i = 0; while (i < 2) { var b = i; i = i + 1; } print(b);");
    assert_output("var total = 0; var i = 0;
                   while (i < 4) { total = total + i; i = i + 1; }
                   print(total);",
                  "6\n");
}

#[test]
fn deep_recursion_hits_the_call_limit() {
    let context = Context::builder().output(OutputBuffer::new())
                                    .clock(Rc::new(ManualClock::new()))
                                    .max_call_depth(200)
                                    .build();
    let err = context.run("function forever(n) { forever(n + 1); } forever(0);").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::StackOverflow { limit: 200, .. })));
}

#[test]
fn deep_nesting_is_handled() {
    let depth = 2000;
    let source = format!("print({}1{});", "(".repeat(depth), ")".repeat(depth));
    assert_output(&source, "1\n");

    let negations = format!("print({}1);", "-".repeat(depth));
    assert_output(&negations, "1\n");
}

#[test]
fn very_deep_program_is_freed_after_running() {
    let negations = format!("print({}1);", "-".repeat(200_000));
    assert_output(&negations, "1\n");
}

#[test]
fn very_deep_list_is_freed_when_rebound() {
    assert_output("var a = [];
                   var i = 0;
                   while (i < 200000) { a = [a]; i = i + 1; }
                   a = 0;
                   print(a);",
                  "0\n");
}

#[test]
fn host_functions_can_be_registered() {
    let output = OutputBuffer::new();
    let context = Context::builder().output(output.clone())
                                    .clock(Rc::new(ManualClock::new()))
                                    .build();
    context.define_native("len", |args| {
               Ok(match args.first() {
                   Some(Value::List(items)) => Value::Number(items.len() as f64),
                   Some(Value::String(s)) => Value::Number(s.chars().count() as f64),
                   _ => Value::Null,
               })
           });

    context.run("print(len([1, 2, 3]), len(\"four\"), len(1));").unwrap();
    assert_eq!(output.contents(), "3 4 null\n");
}

#[test]
fn run_script_is_the_simple_entry_point() {
    assert!(ripple::run_script("var a = 1;", false).is_ok());
    assert!(ripple::run_script("a;", false).is_err());
}

#[test]
fn print_result_uses_the_context_output() {
    let output = OutputBuffer::new();
    let context = Context::builder().output(output.clone())
                                    .clock(Rc::new(ManualClock::new()))
                                    .build();
    ripple::run_script_with(&context, "print(\"side\"); 6 * 7;", true).unwrap();
    ripple::run_script_with(&context, "print(\"only\");", true).unwrap();
    assert_eq!(output.contents(), "side\n42\nonly\n");
}

#[test]
fn parsed_programs_can_be_reused() {
    let program = parse_program("counter = counter + 1; counter;").unwrap();
    let context = Context::builder().output(OutputBuffer::new())
                                    .clock(Rc::new(ManualClock::new()))
                                    .build();
    context.run("var counter = 0;").unwrap();

    context.execute(&program).unwrap();
    assert_eq!(context.execute(&program).unwrap(), Value::Number(2.0));
}

#[test]
fn empty_and_comment_only_programs() {
    assert_success("");
    assert_success("   \n// nothing here\n");
}

proptest! {
    #[test]
    fn numeric_literals_evaluate_to_their_value(whole in 0u64..1_000_000_000, frac in 0u32..1000) {
        let literal = format!("{whole}.{frac:03}");
        let expected: f64 = literal.parse().unwrap();

        let context = Context::builder().output(OutputBuffer::new())
                                        .clock(Rc::new(ManualClock::new()))
                                        .build();
        let value = context.run(&format!("{literal};")).unwrap();
        prop_assert_eq!(value, Value::Number(expected));
    }

    #[test]
    fn integer_literals_print_as_written(n in 0u32..1_000_000) {
        let output = run(&format!("print({n});")).unwrap();
        prop_assert_eq!(output, format!("{n}\n"));
    }

    #[test]
    fn decimal_literals_round_trip_through_six_digits(whole in 0u32..10_000, frac in 0u32..1_000_000) {
        let literal = format!("{whole}.{frac:06}");
        let output = run(&format!("print({literal});")).unwrap();

        let expected = literal.trim_end_matches('0').trim_end_matches('.').to_string();
        prop_assert_eq!(output, format!("{expected}\n"));
    }

    #[test]
    fn addition_is_commutative(a in 0u16..10_000, b in 0u16..10_000) {
        let output = run(&format!("print({a} + {b} == {b} + {a});")).unwrap();
        prop_assert_eq!(output, "true\n");
    }
}
