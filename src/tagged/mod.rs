//! Tagged constructors for algebraic data types.
//!
//! - `define_product` creates a named, fixed-arity record type
//! - `define_sum` creates a named, closed set of variants with a total
//!   eliminator (`Variant::cata`)
//!
//! Every definition gets a fresh identity, so two definitions that happen to
//! share a name and field list never accept each other's instances.
//!
//! # Stack safety
//!
//! Right-nested chains (cons lists built from a sum, for instance) can be
//! millions of nodes deep. Dropping, comparing and displaying such chains is
//! iterative; none of them recurse per node.

mod product;
mod sum;
#[cfg(test)]
mod tests;

pub use product::{define_product, ProductType, Record};
pub use sum::{define_sum, Cases, SumType, Variant};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::Value;

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

fn next_type_id() -> u64 {
    NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Release nested tagged nodes without recursing through their destructors.
///
/// Uniquely owned children are unlinked onto an explicit stack; shared ones
/// just lose a reference.
fn drain_nested(mut stack: Vec<Value>) {
    while let Some(value) = stack.pop() {
        match value {
            Value::Variant(v) => {
                if let Some(mut values) = v.into_unique_values() {
                    stack.append(&mut values);
                }
            }
            Value::Record(r) => {
                if let Some(mut values) = r.into_unique_values() {
                    stack.append(&mut values);
                }
            }
            Value::Array(mut items) => stack.append(&mut items),
            _ => {}
        }
    }
}
