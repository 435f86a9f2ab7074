use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::{core::Value, function::Function},
    },
    util::stack::ensure_sufficient_stack,
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is resolved by name first, then the arguments are evaluated
    /// left to right. Only after that is the callee checked for being
    /// callable.
    ///
    /// # Parameters
    /// - `callee`: Name the function is bound to.
    /// - `arguments`: Argument expressions.
    /// - `line`: Line number for error reporting.
    /// - `env`: The caller's frame.
    ///
    /// # Returns
    /// The function result or an error if lookup, evaluation or the call
    /// itself fails.
    pub(crate) fn eval_call(&self,
                            callee: &str,
                            arguments: &[Expr],
                            line: usize,
                            env: &Environment)
                            -> EvalResult<Value> {
        let target = env.lookup(callee, line)?;
        let args = arguments.iter()
                            .map(|arg| self.eval(arg, env))
                            .collect::<EvalResult<Vec<_>>>()?;

        match &target {
            Value::Function(function) => self.call_function(function, args, line),
            Value::NativeFunction(native) => {
                tracing::trace!(name = native.name(), args = args.len(), line, "native call");
                native.call(&args)
            },
            other => Err(RuntimeError::NotCallable { name: callee.to_string(),
                                                     found: other.type_name(),
                                                     line }),
        }
    }

    /// Executes a user-defined function.
    ///
    /// The body runs in a new frame whose parent is the function's closure,
    /// not the caller's frame. Parameters are bound positionally: surplus
    /// arguments are dropped and parameters without an argument stay
    /// unbound, so reading one is a name error.
    ///
    /// # Errors
    /// - `StackOverflow` when the call would exceed the context's maximum
    ///   call depth.
    /// - Any error raised by the body.
    ///
    /// # Returns
    /// The value of the last statement of the body.
    pub fn call_function(&self,
                         function: &Function,
                         args: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        let depth = self.call_depth().get();
        if depth >= self.max_call_depth() {
            return Err(RuntimeError::StackOverflow { limit: self.max_call_depth(),
                                                     line });
        }

        tracing::trace!(name = function.name(), depth, line, "call");

        let frame = function.closure.child();
        for (param, arg) in function.def.params.iter().zip(args) {
            frame.define(param.as_str(), arg);
        }

        self.call_depth().set(depth + 1);
        let result = ensure_sufficient_stack(|| self.eval(&function.def.body, &frame));
        self.call_depth().set(depth);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        Context, Value,
        error::{Error, RuntimeError},
        interpreter::{evaluator::function::print::OutputBuffer, scheduler::clock::ManualClock},
    };

    fn context_with_depth(depth: usize) -> Context {
        Context::builder().output(OutputBuffer::new())
                          .clock(Rc::new(ManualClock::new()))
                          .max_call_depth(depth)
                          .build()
    }

    fn run(source: &str) -> Result<Value, Error> {
        context_with_depth(64).run(source)
    }

    #[test]
    fn result_is_last_statement() {
        assert_eq!(run("function f(a, b) { a * b; } f(6, 7);").unwrap(), Value::Number(42.0));
        assert_eq!(run("function f() { } f();").unwrap(), Value::Null);
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(run("function f(a) { a; } f(1, 2, 3);").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn missing_parameters_are_unbound() {
        let err = run("function f(a, b) { b; } f(1);").unwrap_err();
        assert!(matches!(err,
                         Error::Runtime(RuntimeError::UnknownVariable { ref name, line: 1 })
                         if name == "b"));
    }

    #[test]
    fn missing_parameter_falls_back_to_closure_binding() {
        assert_eq!(run("var b = 9; function f(a, b) { b; } f(1);").unwrap(),
                   Value::Number(9.0));
    }

    #[test]
    fn calling_a_number_is_an_invocation_error() {
        let err = run("var x = 1;\nx();").unwrap_err();
        assert!(matches!(err,
                         Error::Runtime(RuntimeError::NotCallable { found: "number",
                                                                    line: 2,
                                                                    .. })));
    }

    #[test]
    fn arguments_are_evaluated_before_the_callable_check() {
        let err = run("var x = 1; x(y);").unwrap_err();
        assert!(matches!(err, Error::Runtime(RuntimeError::UnknownVariable { .. })));
    }

    #[test]
    fn depth_limit_raises_stack_overflow() {
        let context = context_with_depth(10);
        let err = context.run("function down(n) { down(n + 1); } down(0);").unwrap_err();
        assert!(matches!(err, Error::Runtime(RuntimeError::StackOverflow { limit: 10, .. })));

        // The depth counter unwinds with the error.
        assert_eq!(context.run("function one() { 1; } one();").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn recursion_within_the_limit() {
        let source = "function sum(n) { if (n < 1) { 0; } else { n + sum(n - 1); } } sum(50);";
        assert_eq!(run(source).unwrap(), Value::Number(1275.0));
    }
}
