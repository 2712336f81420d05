//! Shrink candidates: structurally simpler values tried by `find_smallest`.
//!
//! Every sequence is ordered from most to least aggressive, so the greedy
//! search settles on the smallest failing candidate it meets.

use std::collections::BTreeMap;

use crate::environment::Environment;
use crate::error::Error;
use crate::models::predicates::{
    is_array, is_bool, is_char, is_float, is_function, is_int, is_null, is_object, is_record,
    is_shape, is_str, is_variant,
};
use crate::models::{arg, type_error, Value};

/// `0`, then `-n` for negative `n`, then `n/2, n/4, ...` while non-zero
pub fn int_candidates(n: i64) -> Vec<i64> {
    if n == 0 {
        return Vec::new();
    }
    let mut out = vec![0];
    if n < 0 {
        if let Some(flipped) = n.checked_neg() {
            out.push(flipped);
        }
    }
    let mut x = n / 2;
    while x != 0 {
        out.push(x);
        x /= 2;
    }
    out
}

/// As [`int_candidates`], truncating toward zero; non-finite values shrink to `0.0`
pub fn float_candidates(x: f64) -> Vec<f64> {
    if !x.is_finite() {
        return vec![0.0];
    }
    if x == 0.0 {
        return Vec::new();
    }
    let mut out = vec![0.0];
    if x < 0.0 {
        out.push(-x);
    }
    let mut half = (x / 2.0).trunc();
    while half != 0.0 {
        out.push(half);
        half = (half / 2.0).trunc();
    }
    out
}

/// `""`, then prefixes of `len/2, len/4, ..., 1` characters
pub fn str_candidates(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    let mut out = vec![String::new()];
    let mut len = chars.len() / 2;
    while len > 0 {
        out.push(chars[..len].iter().collect());
        len /= 2;
    }
    out
}

/// `[]`, then suffixes of `len/2, len/4, ..., 1` items
pub fn slice_candidates(items: &[Value]) -> Vec<Vec<Value>> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Vec::new()];
    let mut len = items.len() / 2;
    while len > 0 {
        out.push(items[items.len() - len..].to_vec());
        len /= 2;
    }
    out
}

/// Candidates for `value` through the environment's `shrink`
pub fn shrink(env: &Environment, value: &Value) -> Result<Vec<Value>, Error> {
    match env.call1("shrink", value.clone())? {
        Value::Array(items) => Ok(items),
        other => Err(type_error("shrink", "Array of candidates", &other)),
    }
}

/// Copies of `values` with one position replaced by each of its own candidates
fn fieldwise(env: &Environment, values: &[Value]) -> Result<Vec<Vec<Value>>, Error> {
    let mut out = Vec::new();
    for (i, value) in values.iter().enumerate() {
        for candidate in shrink(env, value)? {
            let mut copy = values.to_vec();
            copy[i] = candidate;
            out.push(copy);
        }
    }
    Ok(out)
}

fn candidates<T: Into<Value>>(items: Vec<T>) -> Value {
    Value::Array(items.into_iter().map(Into::into).collect())
}

/// Shrinks for primitives and arrays
pub(crate) fn register_primitives(env: &Environment) -> Result<Environment, Error> {
    env.register_method("shrink", is_int, |_, args| match &args[0] {
        Value::Int(n) => Ok(candidates(int_candidates(*n))),
        other => Err(type_error("shrink", "Number (integer)", other)),
    })?
    .register_method("shrink", is_float, |_, args| match &args[0] {
        Value::Float(x) => Ok(candidates(float_candidates(*x))),
        other => Err(type_error("shrink", "Number (float)", other)),
    })?
    .register_method("shrink", is_bool, |_, args| {
        let out = if args[0] == Value::Bool(true) {
            vec![false]
        } else {
            Vec::new()
        };
        Ok(candidates(out))
    })?
    .register_method("shrink", is_char, |_, args| {
        let out = if args[0] == Value::Char('a') {
            Vec::new()
        } else {
            vec!['a']
        };
        Ok(candidates(out))
    })?
    .register_method("shrink", is_str, |_, args| match &args[0] {
        Value::Str(s) => Ok(candidates(str_candidates(s))),
        other => Err(type_error("shrink", "String", other)),
    })?
    .register_method("shrink", is_array, |_, args| match &args[0] {
        Value::Array(items) => Ok(candidates(slice_candidates(items))),
        other => Err(type_error("shrink", "Array", other)),
    })
}

/// Structural shrinks for objects, records and variants, plus the values
/// that never shrink. Registered after every specific shrink.
pub(crate) fn register_structural(env: &Environment) -> Result<Environment, Error> {
    env.register_method("shrink", is_object, |env, args| {
        let fields = match arg(args, 0, "shrink")? {
            Value::Object(fields) if !fields.is_empty() => fields,
            _ => return Ok(Value::Array(Vec::new())),
        };
        let keys: Vec<&String> = fields.keys().collect();
        let values: Vec<Value> = fields.values().cloned().collect();
        let mut out = vec![Value::Object(BTreeMap::new())];
        for copy in fieldwise(env, &values)? {
            let object = keys.iter().map(|k| (*k).clone()).zip(copy).collect();
            out.push(Value::Object(object));
        }
        Ok(Value::Array(out))
    })?
    .register_method("shrink", is_record, |env, args| {
        let record = match arg(args, 0, "shrink")? {
            Value::Record(r) => r,
            other => return Err(type_error("shrink", "Record", other)),
        };
        let out = fieldwise(env, record.values())?
            .into_iter()
            .map(|values| record.product().instance(values))
            .collect();
        Ok(Value::Array(out))
    })?
    .register_method("shrink", is_variant, |env, args| {
        let variant = match arg(args, 0, "shrink")? {
            Value::Variant(v) => v,
            other => return Err(type_error("shrink", "Variant", other)),
        };
        let sum = variant.sum();
        let mut out: Vec<Value> = sum
            .variant_names()
            .enumerate()
            .filter(|(tag, name)| {
                *tag != variant.tag() && sum.fields_of(name).is_some_and(|f| f.is_empty())
            })
            .map(|(tag, _)| sum.instance(tag, Vec::new()))
            .collect();
        out.extend(
            fieldwise(env, variant.values())?
                .into_iter()
                .map(|values| sum.instance(variant.tag(), values)),
        );
        Ok(Value::Array(out))
    })?
    .register_method("shrink", is_function, |_, _| Ok(Value::Array(Vec::new())))?
    .register_method("shrink", is_null, |_, _| Ok(Value::Array(Vec::new())))?
    .register_method("shrink", is_shape, |_, _| Ok(Value::Array(Vec::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_candidates() {
        assert_eq!(int_candidates(0), Vec::<i64>::new());
        assert_eq!(int_candidates(1), vec![0]);
        assert_eq!(int_candidates(37), vec![0, 18, 9, 4, 2, 1]);
        assert_eq!(int_candidates(-5), vec![0, 5, -2, -1]);
        assert_eq!(int_candidates(i64::MIN)[..2], [0, i64::MIN / 2]);
    }

    #[test]
    fn test_float_candidates() {
        assert_eq!(float_candidates(9.5), vec![0.0, 4.0, 2.0, 1.0]);
        assert_eq!(float_candidates(-3.0), vec![0.0, 3.0, -1.0]);
        assert_eq!(float_candidates(f64::NAN), vec![0.0]);
        assert!(float_candidates(0.0).is_empty());
    }

    #[test]
    fn test_str_candidates_are_prefixes() {
        assert_eq!(str_candidates("abcdefgh"), vec!["", "abcd", "ab", "a"]);
        assert_eq!(str_candidates("x"), vec![""]);
        assert!(str_candidates("").is_empty());
    }

    #[test]
    fn test_slice_candidates_are_suffixes() {
        let items: Vec<Value> = (1..=5).map(Value::Int).collect();
        let out = slice_candidates(&items);
        assert_eq!(out.len(), 3);
        assert!(out[0].is_empty());
        assert_eq!(out[1], vec![Value::Int(4), Value::Int(5)]);
        assert_eq!(out[2], vec![Value::Int(5)]);
    }
}
