//! Ready-made dispatch predicates over `Value`.

use super::{Shape, TypeRef, Value};

pub fn is_null(v: &Value) -> bool {
    matches!(v, Value::Null)
}

pub fn is_bool(v: &Value) -> bool {
    matches!(v, Value::Bool(_))
}

pub fn is_int(v: &Value) -> bool {
    matches!(v, Value::Int(_))
}

pub fn is_float(v: &Value) -> bool {
    matches!(v, Value::Float(_))
}

/// Integer or float
pub fn is_number(v: &Value) -> bool {
    matches!(v, Value::Int(_) | Value::Float(_))
}

pub fn is_char(v: &Value) -> bool {
    matches!(v, Value::Char(_))
}

pub fn is_str(v: &Value) -> bool {
    matches!(v, Value::Str(_))
}

pub fn is_array(v: &Value) -> bool {
    matches!(v, Value::Array(_))
}

pub fn is_object(v: &Value) -> bool {
    matches!(v, Value::Object(_))
}

pub fn is_function(v: &Value) -> bool {
    matches!(v, Value::Func(_))
}

pub fn is_record(v: &Value) -> bool {
    matches!(v, Value::Record(_))
}

pub fn is_variant(v: &Value) -> bool {
    matches!(v, Value::Variant(_))
}

pub fn is_shape(v: &Value) -> bool {
    matches!(v, Value::Shape(_))
}

/// Matches exactly the given shape descriptor
pub fn shape_is(shape: Shape) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |v| matches!(v, Value::Shape(s) if *s == shape)
}

/// Matches shapes accepted by `f`
pub fn shape_where<F>(f: F) -> impl Fn(&Value) -> bool + Send + Sync + 'static
where
    F: Fn(&Shape) -> bool + Send + Sync + 'static,
{
    move |v| matches!(v, Value::Shape(s) if f(s))
}

/// Matches `Constructor(ty)` exactly
pub fn shape_is_constructor(ty: impl Into<TypeRef>) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    let ty = ty.into();
    move |v| matches!(v, Value::Shape(Shape::Constructor(t)) if *t == ty)
}

/// Matches `Of(ty, _)` for any element shape
pub fn shape_is_of(ty: impl Into<TypeRef>) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    let ty = ty.into();
    move |v| matches!(v, Value::Shape(Shape::Of(t, _)) if *t == ty)
}

/// Matches `Constructor(ty)` and `Of(ty, _)` alike
pub fn shape_names(ty: impl Into<TypeRef>) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    let ty = ty.into();
    move |v| matches!(v, Value::Shape(s) if s.names(&ty))
}

/// Either predicate
pub fn either<A, B>(a: A, b: B) -> impl Fn(&Value) -> bool + Send + Sync + 'static
where
    A: Fn(&Value) -> bool + Send + Sync + 'static,
    B: Fn(&Value) -> bool + Send + Sync + 'static,
{
    move |v| a(v) || b(v)
}

/// Accepts every value; only useful as the last registration for a name
pub fn any(_: &Value) -> bool {
    true
}
