use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `+`, `-`, `*` or `/`.
    ///
    /// `+` concatenates the renderings of both operands when either one is a
    /// string. Otherwise every operator needs two numbers. Division by zero
    /// and NaN follow IEEE-754 and are not errors.
    ///
    /// # Parameters
    /// - `op`: An arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(Value::String)` for concatenation.
    /// - `Ok(Value::Number)` for numeric arithmetic.
    /// - `Err(RuntimeError::TypeError)` for any other operand types.
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};

        if op == Add && (matches!(left, Value::String(_)) || matches!(right, Value::String(_))) {
            return Ok(Value::from(format!("{left}{right}")));
        }

        let (Value::Number(a), Value::Number(b)) = (left, right) else {
            return Err(RuntimeError::TypeError { details: format!("cannot apply '{op}' to {} and {}",
                                                                  left.type_name(),
                                                                  right.type_name()),
                                                 line });
        };

        let result = match op {
            Add => a + b,
            Sub => a - b,
            Mul => a * b,
            Div => a / b,
            _ => unreachable!("eval_arithmetic used with non arithmetic operator"),
        };
        Ok(Value::Number(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        Context::eval_arithmetic(op, &left, &right, 1)
    }

    #[test]
    fn concatenation_renders_either_side() {
        assert_eq!(eval(BinaryOperator::Add, "a".into(), Value::Number(1.0)).unwrap(),
                   Value::from("a1"));
        assert_eq!(eval(BinaryOperator::Add, Value::Number(0.5), "b".into()).unwrap(),
                   Value::from("0.5b"));
        assert_eq!(eval(BinaryOperator::Add, "n: ".into(), Value::Null).unwrap(),
                   Value::from("n: null"));
        assert_eq!(eval(BinaryOperator::Add, "".into(), Value::from(vec![])).unwrap(),
                   Value::from("[Array]"));
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        let Value::Number(n) = eval(BinaryOperator::Div, Value::Number(1.0), Value::Number(0.0)).unwrap()
        else {
            panic!("expected a number");
        };
        assert!(n.is_infinite());

        let Value::Number(n) = eval(BinaryOperator::Div, Value::Number(0.0), Value::Number(0.0)).unwrap()
        else {
            panic!("expected a number");
        };
        assert!(n.is_nan());
    }

    #[test]
    fn only_plus_accepts_strings() {
        let err = eval(BinaryOperator::Sub, "a".into(), Value::Number(1.0)).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeError { line: 1, .. }));
        assert_eq!(err.to_string(),
                   "Error on line 1: Type error: cannot apply '-' to string and number.");
    }

    #[test]
    fn booleans_are_not_numbers() {
        assert!(eval(BinaryOperator::Add, Value::Boolean(true), Value::Number(1.0)).is_err());
        assert!(eval(BinaryOperator::Mul, Value::Null, Value::Null).is_err());
    }
}
