use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` accepts any two values and uses [`Value`]'s equality: scalars by
    /// value, containers and functions by identity, mixed types never equal.
    /// `<` and `>` need two numbers; any comparison involving NaN is false.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use ripple::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Number(3.0);
    /// let b = Value::Number(5.0);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Greater, &a, &b, 1);
    /// assert_eq!(result.unwrap(), Value::Boolean(false));
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Equal, &a, &Value::from("3"), 1);
    /// assert_eq!(result.unwrap(), Value::Boolean(false));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        let result = match op {
            BinaryOperator::Equal => left == right,
            BinaryOperator::Less | BinaryOperator::Greater => {
                let (Value::Number(a), Value::Number(b)) = (left, right) else {
                    return Err(RuntimeError::TypeError { details: format!("cannot compare {} \
                                                                           and {} with '{op}'",
                                                                          left.type_name(),
                                                                          right.type_name()),
                                                         line });
                };
                if op == BinaryOperator::Less { a < b } else { a > b }
            },
            _ => unreachable!("eval_comparison used with non comparison operator"),
        };
        Ok(Value::Boolean(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(op: BinaryOperator, left: &Value, right: &Value) -> bool {
        match Context::eval_comparison(op, left, right, 1).unwrap() {
            Value::Boolean(b) => b,
            other => panic!("expected a boolean, found {other:?}"),
        }
    }

    #[test]
    fn nan_compares_false() {
        let nan = Value::Number(f64::NAN);
        let one = Value::Number(1.0);
        assert!(!compare(BinaryOperator::Less, &nan, &one));
        assert!(!compare(BinaryOperator::Greater, &nan, &one));
        assert!(!compare(BinaryOperator::Equal, &nan, &nan));
    }

    #[test]
    fn equality_across_types_is_false() {
        assert!(!compare(BinaryOperator::Equal, &Value::Null, &Value::Boolean(false)));
        assert!(compare(BinaryOperator::Equal, &Value::Null, &Value::Null));
        assert!(compare(BinaryOperator::Equal, &Value::from("ab"), &Value::from("ab")));
    }

    #[test]
    fn ordering_needs_numbers() {
        let err = Context::eval_comparison(BinaryOperator::Less,
                                           &Value::from("a"),
                                           &Value::from("b"),
                                           3).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }
}
