//! Error type shared by every component.
//!
//! All errors are fail-fast: the call that triggers one returns it to its
//! caller and nothing inside the crate retries or substitutes a default.

use std::fmt;

/// Which kind of member already occupies a name in an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// One of the environment's own API members (`method`, `property`, ...)
    Reserved,
    /// A dispatched operation
    Method,
    /// A plain value
    Property,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Reserved => write!(f, "reserved member"),
            MemberKind::Method => write!(f, "method"),
            MemberKind::Property => write!(f, "property"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No registered predicate accepted the first argument of a call
    Dispatch {
        method: String,
        /// Friendly type name of the first argument (or `nothing` when the call had none)
        argument: String,
        /// How many predicates were tried
        candidates: usize,
    },

    /// A tagged constructor was invoked with the wrong number of arguments
    Arity {
        constructor: String,
        expected: usize,
        got: usize,
    },

    /// A `cata` handler set does not cover every declared variant
    MissingVariant { sum: String, variant: String },

    /// A variant name that the sum never declared
    UnknownVariant { sum: String, variant: String },

    /// Materializing an environment would bind one name twice
    BindingCollision { name: String, existing: MemberKind },

    /// An implementation received a value of the wrong kind
    Type {
        op: String,
        expected: &'static str,
        got: String,
    },

    /// An implementation was called with too few arguments
    MissingArgument { op: String, index: usize },

    /// Reading or parsing a check configuration failed
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Dispatch {
                method,
                argument,
                candidates,
            } => write!(
                f,
                "Method '{}' not implemented for {} ({} candidates tried)",
                method, argument, candidates
            ),
            Error::Arity {
                constructor,
                expected,
                got,
            } => write!(
                f,
                "{}: expected {} arguments, got {}",
                constructor, expected, got
            ),
            Error::MissingVariant { sum, variant } => {
                write!(f, "Cases given to {} didn't include: {}", sum, variant)
            }
            Error::UnknownVariant { sum, variant } => {
                write!(f, "{} has no variant named {}", sum, variant)
            }
            Error::BindingCollision { name, existing } => {
                write!(f, "'{}' already in environment as a {}", name, existing)
            }
            Error::Type { op, expected, got } => {
                write!(f, "Cannot perform '{}': expected {}, got {}", op, expected, got)
            }
            Error::MissingArgument { op, index } => {
                write!(f, "'{}' is missing argument #{}", op, index)
            }
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
