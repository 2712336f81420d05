//! lambdata - functional data types over an immutable dispatch environment
//!
//! This library provides ad-hoc polymorphism without mutable global
//! registries, closed algebraic data types, stack-safe recursion and an
//! automated property-based testing engine.
//!
//! # Architecture
//!
//! 1. **Dispatch** (`environment` module)
//!    - Operation name mapped to ordered (predicate, implementation) entries
//!    - First entry whose predicate accepts the first argument wins
//!    - Every registration returns a new environment; parents never change
//!
//! 2. **Tagged constructors** (`tagged` module)
//!    - Fixed-arity products and closed sums with a total `cata`
//!
//! 3. **Trampoline** (`trampoline` module)
//!    - Recursion reified as `Bounce` nodes driven by an explicit loop
//!
//! 4. **Property testing** (`quickcheck` module)
//!    - `arbitrary` and `shrink` are dispatched operations
//!    - `for_all` runs trials and shrinks the first counterexample greedily
//!
//! Data types (`data`), primitive instances (`stdlib`), fluent composition
//! (`pipeline`), the law suite (`laws`) and the `workflow` demo are built on
//! those four.
//!
//! # Example
//!
//! ```rust
//! use lambdata::models::predicates::{is_int, is_str};
//! use lambdata::{Environment, Value};
//!
//! let env = Environment::new()
//!     .register_method("describe", is_int, |_, _| Ok(Value::str("a number")))
//!     .unwrap()
//!     .register_method("describe", is_str, |_, _| Ok(Value::str("some text")))
//!     .unwrap();
//!
//! assert_eq!(env.call1("describe", Value::Int(3)).unwrap(), Value::str("a number"));
//! assert!(env.call1("describe", Value::Bool(true)).is_err());
//! ```

pub mod data;
pub mod environment;
pub mod error;
pub mod laws;
pub mod models;
pub mod pipeline;
pub mod quickcheck;
pub mod stdlib;
pub mod tagged;
pub mod trampoline;
pub mod workflow;

pub use environment::{CombineMode, Environment, Member};
pub use error::{Error, MemberKind};
pub use models::{Function, MethodResult, Shape, TypeRef, Value};
pub use pipeline::{kleisli, lift_a2, sequence, Pipeline};
pub use quickcheck::{for_all, CheckConfig, FailureReport};
pub use tagged::{define_product, define_sum, Cases, ProductType, Record, SumType, Variant};

/// The standard environment: every built-in instance, data type, generator
/// and shrink, with `goal` set to 100.
pub fn standard() -> Result<Environment, Error> {
    Environment::standard()
}
