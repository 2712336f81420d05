use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use super::{drain_nested, next_type_id};
use crate::error::Error;
use crate::models::{Function, Value};

struct ProductDef {
    id: u64,
    name: String,
    fields: Vec<String>,
}

/// A named, fixed-arity record type.
#[derive(Clone)]
pub struct ProductType(Arc<ProductDef>);

/// Define a new product type with positional fields.
///
/// ```
/// use lambdata::tagged::define_product;
/// use lambdata::Value;
///
/// let point = define_product("Point", &["x", "y"]);
/// let p = point.construct(vec![Value::Int(1), Value::Int(2)]).unwrap();
/// assert_eq!(p.as_record().unwrap().get("y"), Some(&Value::Int(2)));
/// assert!(point.construct(vec![Value::Int(1)]).is_err());
/// ```
pub fn define_product(name: &str, fields: &[&str]) -> ProductType {
    ProductType(Arc::new(ProductDef {
        id: next_type_id(),
        name: name.to_string(),
        fields: fields.iter().map(|f| f.to_string()).collect(),
    }))
}

impl ProductType {
    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.0.fields
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.0.fields.len()
    }

    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.0.fields.iter().position(|f| f == field)
    }

    /// Build a record; the argument count must equal the arity
    pub fn construct_record(&self, args: Vec<Value>) -> Result<Record, Error> {
        if args.len() != self.arity() {
            return Err(Error::Arity {
                constructor: self.name().to_string(),
                expected: self.arity(),
                got: args.len(),
            });
        }
        Ok(Record(Arc::new(RecordNode {
            product: self.clone(),
            values: args,
        })))
    }

    /// Build a record directly; the caller guarantees the arity
    pub(crate) fn instance(&self, values: Vec<Value>) -> Value {
        debug_assert_eq!(self.arity(), values.len());
        Value::Record(Record(Arc::new(RecordNode {
            product: self.clone(),
            values,
        })))
    }

    pub fn construct(&self, args: Vec<Value>) -> Result<Value, Error> {
        self.construct_record(args).map(Value::Record)
    }

    pub fn is_instance(&self, value: &Value) -> bool {
        matches!(value, Value::Record(r) if r.product() == self)
    }

    /// Dispatch predicate accepting instances of this product
    pub fn predicate(&self) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
        let ty = self.clone();
        move |v| ty.is_instance(v)
    }

    /// The constructor as a first-class function value
    pub fn constructor(&self) -> Function {
        let ty = self.clone();
        Function::new(self.name(), move |_, args| ty.construct(args.to_vec()))
    }
}

impl PartialEq for ProductType {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl fmt::Debug for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.0.name, self.0.id)
    }
}

struct RecordNode {
    product: ProductType,
    values: Vec<Value>,
}

impl Drop for RecordNode {
    fn drop(&mut self) {
        if !self.values.is_empty() {
            drain_nested(std::mem::take(&mut self.values));
        }
    }
}

/// An instance of a product type.
#[derive(Clone)]
pub struct Record(Arc<RecordNode>);

impl Record {
    #[inline]
    pub fn product(&self) -> &ProductType {
        &self.0.product
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.0.values
    }

    /// Field by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.product()
            .field_index(field)
            .and_then(|i| self.0.values.get(i))
    }

    /// Field by position
    pub fn field(&self, index: usize) -> Option<&Value> {
        self.0.values.get(index)
    }

    /// Copy of this record with one field replaced
    pub fn with_field(&self, field: &str, value: Value) -> Result<Record, Error> {
        let index = self
            .product()
            .field_index(field)
            .ok_or_else(|| Error::Type {
                op: format!("{}.{}", self.product().name(), field),
                expected: "a declared field",
                got: field.to_string(),
            })?;
        let mut values = self.0.values.clone();
        values[index] = value;
        self.product().construct_record(values)
    }

    pub(super) fn into_unique_values(self) -> Option<Vec<Value>> {
        Arc::try_unwrap(self.0)
            .ok()
            .map(|mut node| std::mem::take(&mut node.values))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.product() == other.product() && self.values() == other.values())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.product().name(), self.values().iter().join(", "))
    }
}
