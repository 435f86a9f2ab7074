#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur during evaluation and runtime.
///
/// Arithmetic anomalies (division by zero, NaN) are deliberately absent: they
/// flow through evaluation as IEEE-754 values.
pub enum RuntimeError {
    /// Read a name that no frame in the chain binds.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Assigned to a name that no frame in the chain binds.
    #[error("Error on line {line}: Cannot assign to undeclared variable '{name}'.")]
    UndefinedAssignment {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a value that is not a function.
    #[error("Error on line {line}: '{name}' is a {found}, not a function.")]
    NotCallable {
        /// The callee name.
        name:  String,
        /// The type name of the value bound to it.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An operand had a type the operator does not accept.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Nested user calls exceeded the configured limit.
    #[error("Error on line {line}: Maximum call depth of {limit} exceeded.")]
    StackOverflow {
        /// The configured maximum depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The output sink used by `print` failed.
    #[error("Output error: {details}.")]
    Output {
        /// The underlying I/O failure.
        details: String,
    },
}

impl RuntimeError {
    /// Returns `true` for the two name-resolution failures.
    ///
    /// ```
    /// use ripple::error::RuntimeError;
    ///
    /// let err = RuntimeError::UndefinedAssignment { name: "x".into(),
    ///                                               line: 1, };
    /// assert!(err.is_name_error());
    /// ```
    #[must_use]
    pub const fn is_name_error(&self) -> bool {
        matches!(self, Self::UnknownVariable { .. } | Self::UndefinedAssignment { .. })
    }

    /// Returns the source line the error refers to, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::UnknownVariable { line, .. }
            | Self::UndefinedAssignment { line, .. }
            | Self::NotCallable { line, .. }
            | Self::TypeError { line, .. }
            | Self::StackOverflow { line, .. } => Some(*line),
            Self::Output { .. } => None,
        }
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        Self::Output { details: err.to_string() }
    }
}
