use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, FunctionDef},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::{core::Value, function::Function},
    },
};

impl Context {
    /// Evaluates the elements of an array literal from left to right.
    pub(crate) fn eval_array_literal(&self,
                                     elements: &[Expr],
                                     env: &Environment)
                                     -> EvalResult<Value> {
        let values = elements.iter()
                             .map(|element| self.eval(element, env))
                             .collect::<EvalResult<Vec<_>>>()?;
        Ok(Value::from(values))
    }

    /// Evaluates an object literal. Entries are evaluated in source order; a
    /// repeated key keeps the last value.
    pub(crate) fn eval_object_literal(&self,
                                      entries: &[(String, Expr)],
                                      env: &Environment)
                                      -> EvalResult<Value> {
        let mut map = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            map.insert(key.clone(), self.eval(value, env)?);
        }
        Ok(Value::from(map))
    }

    /// Evaluates statements in order in `env` and yields the last value.
    ///
    /// The block does not open a scope of its own; callers that need one
    /// pass a child frame.
    pub(crate) fn eval_block(&self, statements: &[Expr], env: &Environment) -> EvalResult<Value> {
        let mut last = Value::Null;
        for statement in statements {
            last = self.eval(statement, env)?;
        }
        Ok(last)
    }

    /// Evaluates a conditional.
    ///
    /// The chosen branch runs in a fresh child frame, so declarations inside
    /// it do not leak while assignments still reach outer bindings.
    ///
    /// # Returns
    /// The value of the branch that ran, or `Null` if the condition was false
    /// and there is no else branch.
    pub(crate) fn eval_if(&self,
                          condition: &Expr,
                          then_branch: &Expr,
                          else_branch: Option<&Expr>,
                          env: &Environment)
                          -> EvalResult<Value> {
        if self.eval(condition, env)?.is_truthy() {
            self.eval(then_branch, &env.child())
        } else if let Some(else_branch) = else_branch {
            self.eval(else_branch, &env.child())
        } else {
            Ok(Value::Null)
        }
    }

    /// Evaluates a loop.
    ///
    /// The condition is re-evaluated in `env` before every iteration and each
    /// iteration runs the body in its own fresh child frame.
    ///
    /// # Returns
    /// Always `Null`.
    pub(crate) fn eval_while(&self,
                             condition: &Expr,
                             body: &Expr,
                             env: &Environment)
                             -> EvalResult<Value> {
        while self.eval(condition, env)?.is_truthy() {
            self.eval(body, &env.child())?;
        }
        Ok(Value::Null)
    }

    /// Evaluates `var name = value;` by defining `name` in the current frame.
    pub(crate) fn eval_var_decl(&self,
                                name: &str,
                                value: &Expr,
                                env: &Environment)
                                -> EvalResult<Value> {
        let value = self.eval(value, env)?;
        env.define(name, value.clone());
        Ok(value)
    }

    /// Evaluates `name = value;`. The nearest existing binding is updated; a
    /// name that is bound nowhere is an error and is not created.
    pub(crate) fn eval_assignment(&self,
                                  name: &str,
                                  value: &Expr,
                                  line: usize,
                                  env: &Environment)
                                  -> EvalResult<Value> {
        let value = self.eval(value, env)?;
        env.assign(name, value.clone(), line)?;
        Ok(value)
    }

    /// Creates a function value closing over `env`. A named function is also
    /// bound in `env`, which lets it call itself.
    pub(crate) fn eval_function_decl(def: &Rc<FunctionDef>, env: &Environment) -> Value {
        let function = Value::from(Function::new(Rc::clone(def), env.clone()));
        if let Some(name) = &def.name {
            env.define(name.as_str(), function.clone());
        }
        function
    }
}
