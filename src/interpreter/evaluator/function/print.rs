use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use crate::interpreter::value::{core::Value, function::NativeFunction};

/// A writer shared between the context and the `print` native.
pub type SharedOutput = Rc<RefCell<dyn Write>>;

/// An in-memory output sink.
///
/// Clones share one buffer, so a test can hand one clone to
/// [`ContextBuilder::output`](crate::ContextBuilder::output) and read what
/// was printed through another.
///
/// # Example
/// ```
/// use std::io::Write;
///
/// use ripple::OutputBuffer;
///
/// let buffer = OutputBuffer::new();
/// let mut writer = buffer.clone();
/// writeln!(writer, "hello").unwrap();
///
/// assert_eq!(buffer.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer(Rc<RefCell<Vec<u8>>>);

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Creates the `print` native writing to `output`.
///
/// `print` accepts any number of values of any type. Their renderings are
/// written separated by single spaces and followed by a newline; a call with
/// no arguments prints an empty line. It always returns `Null`.
///
/// # Errors
/// The native fails with `RuntimeError::Output` if the sink cannot be
/// written to.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use ripple::{
///     OutputBuffer,
///     interpreter::{evaluator::function::print::print, value::core::Value},
/// };
///
/// let buffer = OutputBuffer::new();
/// let native = print(Rc::new(RefCell::new(buffer.clone())));
///
/// let result = native.call(&[Value::from("x ="), Value::Number(15.0)]).unwrap();
///
/// assert_eq!(result, Value::Null);
/// assert_eq!(buffer.contents(), "x = 15\n");
/// ```
#[must_use]
pub fn print(output: SharedOutput) -> NativeFunction {
    NativeFunction::new("print", move |args| {
        let line = args.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");

        let mut out = output.borrow_mut();
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(Value::Null)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn no_arguments_prints_empty_line() {
        let buffer = OutputBuffer::new();
        print(Rc::new(RefCell::new(buffer.clone()))).call(&[]).unwrap();
        assert_eq!(buffer.contents(), "\n");
    }

    #[test]
    fn mixed_values_are_space_separated() {
        let buffer = OutputBuffer::new();
        let native = print(Rc::new(RefCell::new(buffer.clone())));
        native.call(&[Value::Boolean(true), Value::Null, Value::from(vec![])]).unwrap();
        assert_eq!(buffer.contents(), "true null [Array]\n");

        buffer.clear();
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn write_failures_surface_as_output_errors() {
        let native = print(Rc::new(RefCell::new(BrokenPipe)));
        let err = native.call(&[Value::Number(1.0)]).unwrap_err();
        assert!(matches!(err, RuntimeError::Output { .. }));
    }
}
