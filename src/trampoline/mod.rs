//! Trampoline-based iterative evaluation
//!
//! Recursion is reified as a chain of continuation nodes: a finished node
//! holds the result, a pending node holds a thunk yielding the next node.
//! Only `run` unwinds the chain, in a loop, so chains of millions of steps
//! evaluate in constant stack.

mod engine;
mod types;

pub use engine::{run, run_counted};
pub use types::{done, pending, Bounce};
