use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    interpreter::value::function::{Function, NativeFunction},
    util::num::format_number,
};

/// Represents a runtime value in the interpreter.
///
/// Every expression evaluates to exactly one `Value`. Scalars are copied on
/// clone; lists, maps and functions are reference counted, so cloning one
/// yields another handle to the same allocation.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value. Produced by empty blocks, loops, `print` and
    /// `setTimeout`.
    Null,
    /// A double precision number. NaN and the infinities are ordinary values.
    Number(f64),
    /// An immutable string.
    String(Rc<str>),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators and the predefined `true` and
    /// `false` bindings.
    Boolean(bool),
    /// An ordered sequence of values.
    List(Rc<Vec<Self>>),
    /// A mapping from string keys to values.
    Map(Rc<HashMap<String, Self>>),
    /// A user-defined function together with its closure.
    Function(Rc<Function>),
    /// A function implemented by the host.
    NativeFunction(Rc<NativeFunction>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<HashMap<String, Self>> for Value {
    fn from(v: HashMap<String, Self>) -> Self {
        Self::Map(Rc::new(v))
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Self::Function(Rc::new(v))
    }
}

impl From<NativeFunction> for Value {
    fn from(v: NativeFunction) -> Self {
        Self::NativeFunction(Rc::new(v))
    }
}

impl Value {
    /// Returns the name of the value's type as used in error messages.
    ///
    /// # Example
    /// ```
    /// use ripple::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Null.type_name(), "null");
    /// assert_eq!(Value::from("hi").type_name(), "string");
    /// assert_eq!(Value::from(vec![]).type_name(), "list");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Function(_) => "function",
            Self::NativeFunction(_) => "native function",
        }
    }

    /// Decides whether the value counts as true in a condition.
    ///
    /// A boolean is itself and a number is true when it is not zero, which
    /// makes NaN true. Every other value is false, including non-empty
    /// strings, lists and functions.
    ///
    /// # Example
    /// ```
    /// use ripple::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(-1.0).is_truthy());
    /// assert!(Value::Number(f64::NAN).is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::from("text").is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0,
            _ => false,
        }
    }
}

impl Value {
    /// Moves the elements of a list or map out into `out`, provided this is
    /// the last handle to the container.
    fn take_children(&mut self, out: &mut Vec<Self>) {
        match self {
            Self::List(items) => {
                if let Some(items) = Rc::get_mut(items) {
                    out.append(items);
                }
            },
            Self::Map(entries) => {
                if let Some(entries) = Rc::get_mut(entries) {
                    out.extend(entries.drain().map(|(_, value)| value));
                }
            },
            _ => {},
        }
    }
}

/// Frees nested lists and maps with an explicit work list, so a value nested
/// arbitrarily deep is dropped without recursing once per level.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.take_children(&mut pending);
        }
    }
}

/// Equality as seen by the `==` operator.
///
/// Scalars compare by value with numbers following IEEE rules, so NaN is
/// unequal to itself. Lists, maps and functions compare by identity. Values
/// of different types are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::NativeFunction(a), Self::NativeFunction(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(_) => write!(f, "[Array]"),
            Self::Map(_) => write!(f, "[Object]"),
            Self::Function(_) | Self::NativeFunction(_) => write!(f, "[Function]"),
        }
    }
}
