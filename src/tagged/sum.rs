use std::fmt;
use std::sync::Arc;

use super::{drain_nested, next_type_id};
use crate::error::Error;
use crate::models::{Function, Value};

struct VariantDef {
    name: String,
    fields: Vec<String>,
}

struct SumDef {
    id: u64,
    name: String,
    variants: Vec<VariantDef>,
}

/// A named, closed set of variants.
#[derive(Clone)]
pub struct SumType(Arc<SumDef>);

/// Define a new sum type from `(variant, fields)` pairs.
///
/// Zero-field variants are singletons; build them with [`SumType::singleton`].
///
/// ```
/// use lambdata::tagged::{define_sum, Cases};
/// use lambdata::Value;
///
/// let shape = define_sum("Shape", &[("Circle", &["r"]), ("Dot", &[])]);
/// let c = shape.construct("Circle", vec![Value::Int(3)]).unwrap();
/// let area = c
///     .as_variant()
///     .unwrap()
///     .cata(Cases::new().on("Circle", |v| v[0].clone()).on("Dot", |_| Value::Int(0)))
///     .unwrap();
/// assert_eq!(area, Value::Int(3));
/// ```
pub fn define_sum(name: &str, variants: &[(&str, &[&str])]) -> SumType {
    SumType(Arc::new(SumDef {
        id: next_type_id(),
        name: name.to_string(),
        variants: variants
            .iter()
            .map(|(variant, fields)| VariantDef {
                name: variant.to_string(),
                fields: fields.iter().map(|f| f.to_string()).collect(),
            })
            .collect(),
    }))
}

impl SumType {
    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Variant names in declaration order
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.0.variants.iter().map(|v| v.name.as_str())
    }

    pub fn variant_count(&self) -> usize {
        self.0.variants.len()
    }

    pub fn tag_of(&self, variant: &str) -> Option<usize> {
        self.0.variants.iter().position(|v| v.name == variant)
    }

    pub fn fields_of(&self, variant: &str) -> Option<&[String]> {
        self.tag_of(variant)
            .map(|tag| self.0.variants[tag].fields.as_slice())
    }

    fn unknown(&self, variant: &str) -> Error {
        Error::UnknownVariant {
            sum: self.name().to_string(),
            variant: variant.to_string(),
        }
    }

    pub fn construct_variant(&self, variant: &str, args: Vec<Value>) -> Result<Variant, Error> {
        let tag = self.tag_of(variant).ok_or_else(|| self.unknown(variant))?;
        let expected = self.0.variants[tag].fields.len();
        if args.len() != expected {
            return Err(Error::Arity {
                constructor: format!("{}.{}", self.name(), variant),
                expected,
                got: args.len(),
            });
        }
        Ok(Variant(Arc::new(VariantNode {
            sum: self.clone(),
            tag,
            values: args,
        })))
    }

    /// Build variant `tag` directly; the caller guarantees the arity
    pub(crate) fn instance(&self, tag: usize, values: Vec<Value>) -> Value {
        debug_assert_eq!(self.0.variants[tag].fields.len(), values.len());
        Value::Variant(Variant(Arc::new(VariantNode {
            sum: self.clone(),
            tag,
            values,
        })))
    }

    pub fn construct(&self, variant: &str, args: Vec<Value>) -> Result<Value, Error> {
        self.construct_variant(variant, args).map(Value::Variant)
    }

    /// The value of a zero-field variant
    pub fn singleton(&self, variant: &str) -> Result<Value, Error> {
        self.construct(variant, Vec::new())
    }

    pub fn is_instance(&self, value: &Value) -> bool {
        matches!(value, Value::Variant(v) if v.sum() == self)
    }

    /// Dispatch predicate accepting any variant of this sum
    pub fn predicate(&self) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
        let ty = self.clone();
        move |v| ty.is_instance(v)
    }

    /// Dispatch predicate accepting one variant only
    pub fn variant_predicate(&self, variant: &str) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
        let ty = self.clone();
        let tag = self.tag_of(variant);
        move |v| matches!(v, Value::Variant(x) if x.sum() == &ty && Some(x.tag()) == tag)
    }

    /// A variant constructor as a first-class function value
    pub fn constructor(&self, variant: &str) -> Result<Function, Error> {
        if self.tag_of(variant).is_none() {
            return Err(self.unknown(variant));
        }
        let ty = self.clone();
        let name = variant.to_string();
        Ok(Function::new(variant, move |_, args| {
            ty.construct(&name, args.to_vec())
        }))
    }
}

impl PartialEq for SumType {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl fmt::Debug for SumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.0.name, self.0.id)
    }
}

struct VariantNode {
    sum: SumType,
    tag: usize,
    values: Vec<Value>,
}

impl Drop for VariantNode {
    fn drop(&mut self) {
        if !self.values.is_empty() {
            drain_nested(std::mem::take(&mut self.values));
        }
    }
}

/// An instance of one variant of a sum type.
#[derive(Clone)]
pub struct Variant(Arc<VariantNode>);

impl Variant {
    #[inline]
    pub fn sum(&self) -> &SumType {
        &self.0.sum
    }

    #[inline]
    pub fn tag(&self) -> usize {
        self.0.tag
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.sum.0.variants[self.0.tag].name
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.0.values
    }

    pub fn is(&self, variant: &str) -> bool {
        self.name() == variant
    }

    /// Field by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.sum().0.variants[self.0.tag]
            .fields
            .iter()
            .position(|f| f == field)
            .and_then(|i| self.0.values.get(i))
    }

    /// Total eliminator.
    ///
    /// Every variant of the sum must have a handler, even when this instance
    /// would never reach it; the first missing one (in declaration order) is
    /// reported. A handler naming no variant is rejected as unknown.
    pub fn cata<R>(&self, cases: Cases<'_, R>) -> Result<R, Error> {
        let sum = self.sum();
        if let Some((name, _)) = cases
            .handlers
            .iter()
            .find(|(name, _)| sum.tag_of(name).is_none())
        {
            return Err(sum.unknown(name));
        }
        if let Some(missing) = sum
            .variant_names()
            .find(|v| !cases.handlers.iter().any(|(name, _)| name.as_str() == *v))
        {
            return Err(Error::MissingVariant {
                sum: sum.name().to_string(),
                variant: missing.to_string(),
            });
        }

        let own = self.name();
        match cases.handlers.into_iter().find(|(name, _)| name == own) {
            Some((_, handler)) => Ok(handler(self.values())),
            None => Err(sum.unknown(own)),
        }
    }

    pub(super) fn into_unique_values(self) -> Option<Vec<Value>> {
        Arc::try_unwrap(self.0)
            .ok()
            .map(|mut node| std::mem::take(&mut node.values))
    }
}

/// Handlers for [`Variant::cata`], keyed by variant name.
pub struct Cases<'a, R> {
    handlers: Vec<(String, Box<dyn FnOnce(&[Value]) -> R + 'a>)>,
}

impl<'a, R> Cases<'a, R> {
    pub fn new() -> Self {
        Cases {
            handlers: Vec::new(),
        }
    }

    pub fn on<F>(mut self, variant: &str, handler: F) -> Self
    where
        F: FnOnce(&[Value]) -> R + 'a,
    {
        self.handlers.push((variant.to_string(), Box::new(handler)));
        self
    }
}

impl<'a, R> Default for Cases<'a, R> {
    fn default() -> Self {
        Self::new()
    }
}

// Equality and display walk the last field of same-sum chains in a loop, so
// a million-element cons list compares and prints in constant stack.

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.clone();
        let mut b = other.clone();
        loop {
            if Arc::ptr_eq(&a.0, &b.0) {
                return true;
            }
            if a.sum() != b.sum() || a.tag() != b.tag() || a.values().len() != b.values().len() {
                return false;
            }
            let next = match (a.values().split_last(), b.values().split_last()) {
                (Some((Value::Variant(x), xs)), Some((Value::Variant(y), ys)))
                    if x.sum() == a.sum() && y.sum() == b.sum() =>
                {
                    if xs != ys {
                        return false;
                    }
                    (x.clone(), y.clone())
                }
                _ => return a.values() == b.values(),
            };
            a = next.0;
            b = next.1;
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = self.clone();
        let mut open = 0usize;
        loop {
            let next = match current.values().split_last() {
                None => {
                    write!(f, "{}", current.name())?;
                    None
                }
                Some((last, init)) => {
                    write!(f, "{}(", current.name())?;
                    for v in init {
                        write!(f, "{}, ", v)?;
                    }
                    match last {
                        Value::Variant(next) if next.sum() == current.sum() => {
                            open += 1;
                            Some(next.clone())
                        }
                        other => {
                            write!(f, "{})", other)?;
                            None
                        }
                    }
                }
            };
            match next {
                Some(next) => current = next,
                None => break,
            }
        }
        for _ in 0..open {
            write!(f, ")")?;
        }
        Ok(())
    }
}
