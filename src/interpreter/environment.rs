use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A single scope: its own bindings plus a link to the enclosing scope.
#[derive(Default)]
struct Frame {
    vars:   HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A shared handle to a scope frame.
///
/// Cloning the handle does not copy the frame. Child frames, function
/// closures and queued tasks all hold handles to the frames they need, so a
/// frame lives for as long as anything can still reach it.
///
/// # Example
/// ```
/// use ripple::interpreter::{environment::Environment, value::core::Value};
///
/// let globals = Environment::new_global();
/// globals.define("x", Value::Number(1.0));
///
/// let inner = globals.child();
/// inner.assign("x", Value::Number(2.0), 1).unwrap();
///
/// assert_eq!(globals.lookup("x", 1).unwrap(), Value::Number(2.0));
/// ```
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// Creates a root frame with no parent.
    #[must_use]
    pub fn new_global() -> Self {
        Self(Rc::new(RefCell::new(Frame::default())))
    }

    /// Creates an empty frame whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Frame { vars:   HashMap::new(),
                                          parent: Some(self.clone()), })))
    }

    /// Binds `name` in this frame, replacing any binding it already has
    /// here. Enclosing frames are never touched.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().vars.insert(name.into(), value);
    }

    /// Resolves `name`, searching outward from this frame.
    ///
    /// # Errors
    /// `RuntimeError::UnknownVariable` if no frame in the chain binds it.
    pub fn lookup(&self, name: &str, line: usize) -> EvalResult<Value> {
        let mut frame = self.clone();
        loop {
            let parent = {
                let current = frame.0.borrow();
                if let Some(value) = current.vars.get(name) {
                    return Ok(value.clone());
                }
                current.parent.clone()
            };
            match parent {
                Some(parent) => frame = parent,
                None => {
                    return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                               line });
                },
            }
        }
    }

    /// Rebinds `name` in the nearest frame that already has it.
    ///
    /// Assignment never creates a binding.
    ///
    /// # Errors
    /// `RuntimeError::UndefinedAssignment` if no frame in the chain binds it.
    pub fn assign(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let mut frame = self.clone();
        loop {
            let parent = {
                let mut current = frame.0.borrow_mut();
                if let Some(slot) = current.vars.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }
                current.parent.clone()
            };
            match parent {
                Some(parent) => frame = parent,
                None => {
                    return Err(RuntimeError::UndefinedAssignment { name: name.to_string(),
                                                                   line });
                },
            }
        }
    }

    /// Returns `true` if this frame itself binds `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().vars.contains_key(name)
    }

    /// Returns `true` if both handles refer to the same frame.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of frames between this one and the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut parent = self.0.borrow().parent.clone();
        while let Some(frame) = parent {
            depth += 1;
            parent = frame.0.borrow().parent.clone();
        }
        depth
    }
}

// Values can hold closures over this frame, so only the names are shown.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.0.borrow();
        let mut names: Vec<_> = frame.vars.keys().collect();
        names.sort();
        f.debug_struct("Environment")
         .field("names", &names)
         .field("depth", &self.depth())
         .finish()
    }
}
