use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use super::{Function, Shape};
use crate::tagged::{Record, Variant};

/// A dynamically typed value flowing through dispatched operations.
///
/// Dispatch is a runtime predicate over this enum, so every kind of data the
/// environment can see (primitives, tagged instances, functions and shape
/// descriptors) is one of its variants.
#[derive(Clone)]
pub enum Value {
    /// Absence of a meaningful value (e.g. the result slot of `State::modify`)
    Null,
    Bool(bool),
    /// Integer numbers; the `Number` shape generates these
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Array(Vec<Value>),
    /// String-keyed object with deterministic key order
    Object(BTreeMap<String, Value>),
    /// Instance of a tagged product
    Record(Record),
    /// Instance of a tagged sum
    Variant(Variant),
    Func(Function),
    /// Generation shape descriptor, only meaningful as a dispatch key
    Shape(Shape),
}

impl Value {
    /// Wrap a native closure as a function value.
    pub fn func<F>(name: &str, f: F) -> Self
    where
        F: Fn(&crate::environment::Environment, &[Value]) -> super::MethodResult
            + Send
            + Sync
            + 'static,
    {
        Value::Func(Function::new(name, f))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Friendly type name used in error messages
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "Null".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::Int(_) => "Number (integer)".to_string(),
            Value::Float(_) => "Number (float)".to_string(),
            Value::Char(_) => "Char".to_string(),
            Value::Str(_) => "String".to_string(),
            Value::Array(_) => "Array".to_string(),
            Value::Object(_) => "Object".to_string(),
            Value::Record(r) => format!("Record {}", r.product().name()),
            Value::Variant(v) => format!("{}.{}", v.sum().name(), v.name()),
            Value::Func(_) => "Function".to_string(),
            Value::Shape(_) => "Shape".to_string(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<&Variant> {
        match self {
            Value::Variant(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&Function> {
        match self {
            Value::Func(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Value::Shape(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness in the loose sense used by folds over booleans
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Variant(a), Value::Variant(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => a.ptr_eq(b),
            (Value::Shape(a), Value::Shape(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Array(items) => write!(f, "[{}]", items.iter().join(", ")),
            Value::Object(fields) => write!(
                f,
                "{{{}}}",
                fields.iter().map(|(k, v)| format!("{}: {}", k, v)).join(", ")
            ),
            Value::Record(r) => write!(f, "{}", r),
            Value::Variant(v) => write!(f, "{}", v),
            Value::Func(func) => write!(f, "<fn {}>", func.name()),
            Value::Shape(s) => write!(f, "<shape {}>", s),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Shape> for Value {
    fn from(shape: Shape) -> Self {
        Value::Shape(shape)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Func(f)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Variant> for Value {
    fn from(v: Variant) -> Self {
        Value::Variant(v)
    }
}
