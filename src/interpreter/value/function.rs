use std::{fmt, rc::Rc};

use crate::{
    ast::FunctionDef,
    interpreter::{
        environment::Environment,
        evaluator::core::EvalResult,
        value::core::Value,
    },
};

/// A user-defined function value.
///
/// Created whenever a `function` declaration or expression is evaluated.
/// The definition is shared with the AST; the closure is the frame that was
/// active at that moment.
pub struct Function {
    /// Parameters and body.
    pub def:     Rc<FunctionDef>,
    /// The defining frame.
    pub closure: Environment,
}

impl Function {
    /// Creates a function closing over `closure`.
    #[must_use]
    pub const fn new(def: Rc<FunctionDef>, closure: Environment) -> Self {
        Self { def, closure }
    }

    /// The declared name, or `<anonymous>` for function expressions.
    #[must_use]
    pub fn name(&self) -> &str {
        self.def.name.as_deref().unwrap_or("<anonymous>")
    }
}

// The closure can reach this function again, so it is left out.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.name())
         .field("params", &self.def.params)
         .field("line", &self.def.line)
         .finish_non_exhaustive()
    }
}

/// Signature of a host function callable from scripts.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult<Value>;

/// A function implemented in Rust.
///
/// Natives receive the already evaluated arguments and never see the
/// caller's environment. State they need, such as an output sink or the
/// scheduler, is captured by the closure.
pub struct NativeFunction {
    name: &'static str,
    func: Box<NativeFn>,
}

impl NativeFunction {
    /// Wraps `func` under the given name.
    ///
    /// # Example
    /// ```
    /// use ripple::interpreter::value::{core::Value, function::NativeFunction};
    ///
    /// let len = NativeFunction::new("argc", |args| Ok(Value::Number(args.len() as f64)));
    /// assert_eq!(len.call(&[Value::Null, Value::Null]).unwrap(), Value::Number(2.0));
    /// ```
    pub fn new(name: &'static str, func: impl Fn(&[Value]) -> EvalResult<Value> + 'static) -> Self {
        Self { name,
               func: Box::new(func) }
    }

    /// The name the function was registered under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes the host function.
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .finish_non_exhaustive()
    }
}
