//! A document workflow driven through the State wrapper.
//!
//! The workflow states form a closed sum. `transition(state, event)` is a
//! dispatched operation with one registration per state, and a run of events
//! is a chain of `State::modify` steps executed with `run_state`.

use std::sync::OnceLock;

use crate::data::state::{self, modify};
use crate::environment::Environment;
use crate::error::Error;
use crate::models::{arg, type_error, Function, Value};
use crate::tagged::{define_sum, SumType};

/// `(from, event, to)`; anything else leaves the state unchanged
pub const TRANSITIONS: &[(&str, &str, &str)] = &[
    ("Draft", "submit", "Review"),
    ("Review", "approve", "Approved"),
    ("Review", "reject", "Rejected"),
    ("Rejected", "revise", "Draft"),
    ("Approved", "publish", "Published"),
    ("Published", "retract", "Draft"),
];

static WORKFLOW: OnceLock<SumType> = OnceLock::new();

pub fn workflow_type() -> &'static SumType {
    WORKFLOW.get_or_init(|| {
        define_sum(
            "Workflow",
            &[
                ("Draft", &[]),
                ("Review", &[]),
                ("Approved", &[]),
                ("Rejected", &[]),
                ("Published", &[]),
            ],
        )
    })
}

pub fn workflow_state(name: &str) -> Result<Value, Error> {
    workflow_type().singleton(name)
}

/// Events accepted in `state`
pub fn allowed_events(state: &str) -> Vec<&'static str> {
    TRANSITIONS
        .iter()
        .filter(|(from, _, _)| *from == state)
        .map(|(_, event, _)| *event)
        .collect()
}

/// Attach `transition` for every workflow state
pub fn register(env: &Environment) -> Result<Environment, Error> {
    let ty = workflow_type();
    let mut env = env.clone();
    for from in ty.variant_names() {
        let from = from.to_string();
        env = env.register_method("transition", ty.variant_predicate(&from), move |_, args| {
            let event = arg(args, 1, "transition")?.as_str().unwrap_or_default();
            let next = TRANSITIONS
                .iter()
                .find(|(f, e, _)| *f == from && *e == event)
                .map_or(from.as_str(), |(_, _, to)| *to);
            workflow_state(next)
        })?;
    }
    Ok(env)
}

/// One event as a state step
pub fn step(event: &str) -> Value {
    let event = Value::str(event);
    modify(Function::new("transition", move |env, args| {
        let current = args.first().cloned().unwrap_or(Value::Null);
        env.call2("transition", current, event.clone())
    }))
}

/// Apply `events` in order from `initial`, returning every visited state
pub fn run(env: &Environment, initial: Value, events: &[&str]) -> Result<Vec<Value>, Error> {
    let mut visited = vec![initial.clone()];
    let mut current = initial;
    for event in events {
        let program = step(event);
        let (_, next) = match &program {
            Value::Record(st) => state::run_state(env, st, current)?,
            other => return Err(type_error("workflow", "State", other)),
        };
        visited.push(next.clone());
        current = next;
    }
    Ok(visited)
}
