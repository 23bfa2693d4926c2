use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::EvalResult;
use crate::parser::Expression;
use crate::runtime::{Environment, Operation};

/// Runtime value representation
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value, produced by `()` and by operations with nothing to return
    #[default]
    Nil,
    /// Boolean value
    Bool(bool),
    /// Double precision number
    Number(f64),
    /// String value
    String(String),

    // Collections (Arc keeps clones of large vectors cheap)
    /// Ordered sequence of numbers, e.g. a feature vector
    Numbers(Arc<Vec<f64>>),
    /// Ordered sequence of strings
    Strings(Arc<Vec<String>>),

    /// Callable bound in the environment
    Operation(Arc<dyn Operation>),
    /// Host value the language itself never inspects
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Creates a number sequence value
    pub fn numbers(values: Vec<f64>) -> Self {
        Value::Numbers(Arc::new(values))
    }

    /// Creates a string sequence value
    pub fn strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Value::Strings(Arc::new(values.into_iter().map(Into::into).collect()))
    }

    /// Wraps an [`Operation`] implementation
    pub fn operation<O: Operation + 'static>(operation: O) -> Self {
        Value::Operation(Arc::new(operation))
    }

    /// Wraps a closure as an operation
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut Environment, &[Expression]) -> EvalResult<Value> + Send + Sync + 'static,
    {
        Value::Operation(Arc::new(f))
    }

    /// Wraps an arbitrary host value
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(Arc::new(value))
    }

    /// Returns the kind name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Numbers(_) => "numbers",
            Value::Strings(_) => "strings",
            Value::Operation(_) => "operation",
            Value::Opaque(_) => "opaque",
        }
    }

    /// True for [`Value::Nil`]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// The number, if this is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number sequence, if this is one
    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            Value::Numbers(v) => Some(v),
            _ => None,
        }
    }

    /// The string sequence, if this is one
    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Value::Strings(v) => Some(v),
            _ => None,
        }
    }

    /// The operation, if this is one
    pub fn as_operation(&self) -> Option<&Arc<dyn Operation>> {
        match self {
            Value::Operation(op) => Some(op),
            _ => None,
        }
    }

    /// Borrows an opaque host value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(inner) => inner.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Numbers(values) => {
                write!(f, "[")?;
                for (i, n) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", n)?;
                }
                write!(f, "]")
            }
            Value::Strings(values) => {
                write!(f, "[")?;
                for (i, s) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:?}", s)?;
                }
                write!(f, "]")
            }
            Value::Operation(_) => write!(f, "<operation>"),
            Value::Opaque(_) => write!(f, "<opaque>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Numbers(v) => f.debug_tuple("Numbers").field(v).finish(),
            Value::Strings(v) => f.debug_tuple("Strings").field(v).finish(),
            Value::Operation(_) => write!(f, "Operation(..)"),
            Value::Opaque(_) => write!(f, "Opaque(..)"),
        }
    }
}

// Operations and opaque values compare by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Numbers(a), Value::Numbers(b)) => a == b,
            (Value::Strings(a), Value::Strings(b)) => a == b,
            (Value::Operation(a), Value::Operation(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            (Value::Opaque(a), Value::Opaque(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::numbers(values)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::Strings(Arc::new(values))
    }
}
