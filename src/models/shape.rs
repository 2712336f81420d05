//! Shape descriptors: dispatch keys describing how to generate a value.
//!
//! Shapes are never data themselves. `arbitrary` and `empty` dispatch on a
//! `Value::Shape`, and data types register generators for the constructor
//! shapes that name them.

use std::fmt;

use itertools::Itertools;

use crate::tagged::{ProductType, SumType};

/// Identity of a tagged type, used by constructor shapes
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Product(ProductType),
    Sum(SumType),
}

impl TypeRef {
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Product(p) => p.name(),
            TypeRef::Sum(s) => s.name(),
        }
    }
}

impl From<ProductType> for TypeRef {
    fn from(p: ProductType) -> Self {
        TypeRef::Product(p)
    }
}

impl From<SumType> for TypeRef {
    fn from(s: SumType) -> Self {
        TypeRef::Sum(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Any primitive: Bool, Number or String
    AnyVal,
    Bool,
    /// Integer numbers
    Number,
    Float,
    /// Printable ASCII character
    Char,
    Str,
    /// Array of `AnyVal`
    Array,
    /// Object with string keys and `ArrayOf(AnyVal)` values
    Object,
    Function,
    ArrayOf(Box<Shape>),
    /// Object with the given named field shapes
    ObjectLike(Vec<(String, Shape)>),
    /// Plain constructor identity, e.g. `Tuple2`
    Constructor(TypeRef),
    /// A tagged type parameterized by an element shape, e.g. option of Number
    Of(TypeRef, Box<Shape>),
}

impl Shape {
    pub fn array_of(inner: Shape) -> Self {
        Shape::ArrayOf(Box::new(inner))
    }

    pub fn object_like<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Shape)>,
        K: Into<String>,
    {
        Shape::ObjectLike(fields.into_iter().map(|(k, s)| (k.into(), s)).collect())
    }

    pub fn constructor(ty: impl Into<TypeRef>) -> Self {
        Shape::Constructor(ty.into())
    }

    pub fn of(ty: impl Into<TypeRef>, inner: Shape) -> Self {
        Shape::Of(ty.into(), Box::new(inner))
    }

    /// Does this shape name the given tagged type (bare or parameterized)?
    pub fn names(&self, ty: &TypeRef) -> bool {
        match self {
            Shape::Constructor(t) | Shape::Of(t, _) => t == ty,
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::AnyVal => write!(f, "AnyVal"),
            Shape::Bool => write!(f, "Bool"),
            Shape::Number => write!(f, "Number"),
            Shape::Float => write!(f, "Float"),
            Shape::Char => write!(f, "Char"),
            Shape::Str => write!(f, "String"),
            Shape::Array => write!(f, "Array"),
            Shape::Object => write!(f, "Object"),
            Shape::Function => write!(f, "Function"),
            Shape::ArrayOf(inner) => write!(f, "arrayOf({})", inner),
            Shape::ObjectLike(fields) => write!(
                f,
                "objectLike({{{}}})",
                fields.iter().map(|(k, s)| format!("{}: {}", k, s)).join(", ")
            ),
            Shape::Constructor(t) => write!(f, "{}", t.name()),
            Shape::Of(t, inner) => write!(f, "{}Of({})", t.name(), inner),
        }
    }
}
