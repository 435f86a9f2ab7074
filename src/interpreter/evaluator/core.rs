use std::{
    cell::{Cell, RefCell},
    io::Write,
    rc::Rc,
};

use crate::{
    ast::Expr,
    error::{Error, RuntimeError},
    interpreter::{
        environment::Environment,
        evaluator::function::{
            print::{SharedOutput, print},
            timeout::set_timeout,
        },
        parser::core::parse_program,
        scheduler::{
            clock::{Clock, SystemClock},
            core::Scheduler,
        },
        value::{core::Value, function::NativeFunction},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 2048;

/// Stores the runtime evaluation context.
///
/// A context owns the global frame and the task scheduler. Programs are run
/// against it with [`Context::run`], or in separate steps with
/// [`Context::execute`] followed by [`Context::run_event_loop`]. Globals and
/// pending tasks persist between runs, so one context can evaluate several
/// scripts in turn.
///
/// ## Usage
///
/// ```
/// use ripple::{Context, OutputBuffer};
///
/// let output = OutputBuffer::new();
/// let context = Context::builder().output(output.clone()).build();
///
/// context.run("setTimeout(function () { print(\"later\"); }, 0); print(\"now\");")
///        .unwrap();
///
/// assert_eq!(output.contents(), "now\nlater\n");
/// ```
pub struct Context {
    globals:        Environment,
    scheduler:      Scheduler,
    output:         SharedOutput,
    max_call_depth: usize,
    depth:          Cell<usize>,
}

/// Configures a [`Context`] before it is created.
///
/// Every setting is optional: output goes to stdout, time comes from the
/// system clock and the call depth is [`DEFAULT_MAX_CALL_DEPTH`].
pub struct ContextBuilder {
    output:         Option<SharedOutput>,
    clock:          Option<Rc<dyn Clock>>,
    max_call_depth: usize,
}

impl ContextBuilder {
    /// Sends `print` output to `writer`.
    #[must_use]
    pub fn output(mut self, writer: impl Write + 'static) -> Self {
        self.output = Some(Rc::new(RefCell::new(writer)));
        self
    }

    /// Reads scheduler time from `clock`.
    ///
    /// Pass a shared [`ManualClock`](crate::ManualClock) to control time
    /// from the outside.
    #[must_use]
    pub fn clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the maximum number of nested user function calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Creates the context and installs the built-in globals.
    #[must_use]
    pub fn build(self) -> Context {
        let output = self.output
                         .unwrap_or_else(|| Rc::new(RefCell::new(std::io::stdout())));
        let clock = self.clock.unwrap_or_else(|| Rc::new(SystemClock::new()));

        let context = Context { globals: Environment::new_global(),
                                scheduler: Scheduler::new(clock),
                                output,
                                max_call_depth: self.max_call_depth,
                                depth: Cell::new(0) };
        context.install_builtins();
        context
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context printing to stdout and using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a context.
    #[must_use]
    pub const fn builder() -> ContextBuilder {
        ContextBuilder { output:         None,
                         clock:          None,
                         max_call_depth: DEFAULT_MAX_CALL_DEPTH, }
    }

    /// The global frame.
    #[must_use]
    pub const fn globals(&self) -> &Environment {
        &self.globals
    }

    /// The task scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Number of tasks waiting in the queue.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Writes the rendering of `value` and a newline to the output sink
    /// that `print` uses.
    pub fn write_line(&self, value: &Value) -> EvalResult<()> {
        let mut out = self.output.borrow_mut();
        writeln!(out, "{value}")?;
        out.flush()?;
        Ok(())
    }

    /// The configured limit on nested user calls.
    #[must_use]
    pub const fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Binds a host function as a global.
    ///
    /// # Example
    /// ```
    /// use ripple::{Context, Value};
    ///
    /// let context = Context::new();
    /// context.define_native("double", |args| {
    ///            Ok(match args.first() {
    ///                Some(Value::Number(n)) => Value::Number(n * 2.0),
    ///                _ => Value::Null,
    ///            })
    ///        });
    ///
    /// assert_eq!(context.run("double(21);").unwrap(), Value::Number(42.0));
    /// ```
    pub fn define_native(&self,
                         name: &'static str,
                         func: impl Fn(&[Value]) -> EvalResult<Value> + 'static) {
        self.globals.define(name, NativeFunction::new(name, func).into());
    }

    /// Installs `print`, `setTimeout`, `true`, `false` and `null`.
    ///
    /// The constants are plain bindings, so scripts may shadow or reassign
    /// them.
    fn install_builtins(&self) {
        self.globals.define("print", print(Rc::clone(&self.output)).into());
        self.globals.define("setTimeout", set_timeout(self.scheduler.clone()).into());
        self.globals.define("true", Value::Boolean(true));
        self.globals.define("false", Value::Boolean(false));
        self.globals.define("null", Value::Null);
    }

    /// Parses and runs `source`, then drains the task queue.
    ///
    /// # Returns
    /// The value of the last top-level statement, or `Null` for an empty
    /// program. Values produced by deferred tasks are discarded.
    ///
    /// # Errors
    /// A `ParseError` if the source does not parse, in which case nothing is
    /// evaluated. Otherwise the first `RuntimeError` raised by the program or
    /// by a task. Bindings made and tasks queued before the failure remain.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn run(&self, source: &str) -> Result<Value, Error> {
        let program = parse_program(source)?;
        let value = self.execute(&program)?;
        self.run_event_loop()?;
        Ok(value)
    }

    /// Evaluates the statements of a parsed program in the global frame.
    ///
    /// Tasks queued by the program are left for [`Context::run_event_loop`].
    ///
    /// # Returns
    /// The value of the last statement, or `Null` if there are none.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub fn execute(&self, program: &[Expr]) -> EvalResult<Value> {
        let mut last = Value::Null;
        for statement in program {
            last = self.eval(statement, &self.globals)?;
        }
        Ok(last)
    }

    /// Fires queued tasks until none remain.
    ///
    /// Each task calls its function with no arguments in a fresh frame whose
    /// parent is the function's closure. The clock is waited on between
    /// tasks that are not yet due.
    ///
    /// # Returns
    /// The number of tasks fired.
    ///
    /// # Errors
    /// The first error raised by a task. Tasks that had not fired yet stay
    /// queued for the next call.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_event_loop(&self) -> EvalResult<usize> {
        self.scheduler.run_until_idle(|task| {
                          self.call_function(&task.callback, Vec::new(), task.callback.def.line)
                              .map(drop)
                      })
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the single evaluation entry point: every node kind, statement
    /// forms included, is dispatched from here. Deep nesting grows the native
    /// stack on demand instead of overflowing it.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: The frame names are resolved in and declared into.
    ///
    /// # Returns
    /// The value the node produces.
    pub fn eval(&self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match expr {
            Expr::NumberLiteral { value, .. } => Ok(Value::Number(*value)),
            Expr::StringLiteral { value, .. } => Ok(Value::from(value.as_str())),
            Expr::Identifier { name, line } => env.lookup(name, *line),
            Expr::ArrayLiteral { elements, .. } => self.eval_array_literal(elements, env),
            Expr::ObjectLiteral { entries, .. } => self.eval_object_literal(entries, env),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line, env),
            Expr::Block { statements, .. } => self.eval_block(statements, env),
            Expr::VarDecl { name, value, .. } => self.eval_var_decl(name, value, env),
            Expr::Assignment { name, value, line } => {
                self.eval_assignment(name, value, *line, env)
            },
            Expr::If { condition,
                       then_branch,
                       else_branch,
                       .. } => self.eval_if(condition, then_branch, else_branch.as_deref(), env),
            Expr::While { condition, body, .. } => self.eval_while(condition, body, env),
            Expr::FunctionDecl(def) => Ok(Self::eval_function_decl(def, env)),
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line, env),
        })
    }

    /// Current nesting depth of user function calls.
    pub(crate) const fn call_depth(&self) -> &Cell<usize> {
        &self.depth
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::ParseError,
        interpreter::{evaluator::function::print::OutputBuffer, scheduler::clock::ManualClock},
    };

    fn context() -> (Context, OutputBuffer) {
        let output = OutputBuffer::new();
        let context = Context::builder().output(output.clone())
                                        .clock(Rc::new(ManualClock::new()))
                                        .build();
        (context, output)
    }

    #[test]
    fn run_returns_last_statement_value() {
        let (context, _) = context();
        assert_eq!(context.run("var x = 10; x + 5;").unwrap(), Value::Number(15.0));
        assert_eq!(context.run("").unwrap(), Value::Null);
    }

    #[test]
    fn globals_persist_between_runs() {
        let (context, output) = context();
        context.run("var greeting = \"hi\";").unwrap();
        context.run("print(greeting);").unwrap();
        assert_eq!(output.contents(), "hi\n");
        assert!(context.globals().contains("greeting"));
    }

    #[test]
    fn parse_errors_evaluate_nothing() {
        let (context, output) = context();
        let err = context.run("print(1); var = ;").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnexpectedToken { .. })));
        assert_eq!(output.contents(), "");
    }

    #[test]
    fn execute_leaves_tasks_queued() {
        let (context, output) = context();
        let program = parse_program("setTimeout(function () { print(1); }, 5);").unwrap();
        context.execute(&program).unwrap();

        assert_eq!(context.pending_tasks(), 1);
        assert_eq!(output.contents(), "");

        assert_eq!(context.run_event_loop().unwrap(), 1);
        assert_eq!(context.pending_tasks(), 0);
        assert_eq!(output.contents(), "1\n");
    }

    #[test]
    fn builtin_constants_can_be_shadowed() {
        let (context, _) = context();
        assert_eq!(context.run("true;").unwrap(), Value::Boolean(true));
        assert_eq!(context.run("var true = 0; true;").unwrap(), Value::Number(0.0));
        assert_eq!(context.run("null;").unwrap(), Value::Null);
    }

    #[test]
    fn scheduler_time_follows_the_clock() {
        let clock = Rc::new(ManualClock::new());
        let context = Context::builder().output(OutputBuffer::new())
                                        .clock(clock.clone())
                                        .build();
        context.run("setTimeout(function () { 1; }, 250);").unwrap();
        assert_eq!(clock.now(), Duration::from_millis(250));
        assert_eq!(context.scheduler().now(), clock.now());
    }
}
