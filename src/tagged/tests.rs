//! Tests for tagged products and sums.
//!
//! Covers construction and arity checks, identity of definitions, total
//! elimination and the stack safety of long right-nested chains.

use super::*;
use crate::error::Error;
use crate::models::Value;

fn list_type() -> SumType {
    define_sum("List", &[("Cons", &["head", "tail"]), ("Nil", &[])])
}

fn build(list: &SumType, len: usize) -> Value {
    let mut acc = list.singleton("Nil").unwrap();
    for i in (0..len).rev() {
        acc = list.construct("Cons", vec![Value::Int(i as i64), acc]).unwrap();
    }
    acc
}

fn cons_list(len: usize) -> (SumType, Value) {
    let list = list_type();
    let value = build(&list, len);
    (list, value)
}

// ============================================================================
// Products
// ============================================================================

#[test]
fn test_product_fields_by_name_and_position() {
    let pair = define_product("Pair", &["first", "second"]);
    let p = pair
        .construct(vec![Value::Int(1), Value::str("two")])
        .unwrap();
    let record = p.as_record().unwrap();

    assert_eq!(record.get("first"), Some(&Value::Int(1)));
    assert_eq!(record.field(1), Some(&Value::str("two")));
    assert_eq!(record.get("third"), None);
    assert_eq!(pair.arity(), 2);
}

#[test]
fn test_product_arity_mismatch() {
    let pair = define_product("Pair", &["first", "second"]);
    match pair.construct(vec![Value::Int(1)]) {
        Err(Error::Arity {
            constructor,
            expected,
            got,
        }) => {
            assert_eq!(constructor, "Pair");
            assert_eq!(expected, 2);
            assert_eq!(got, 1);
        }
        other => panic!("expected arity error, got {:?}", other),
    }
}

#[test]
fn test_same_shape_definitions_are_distinct() {
    let a = define_product("Point", &["x", "y"]);
    let b = define_product("Point", &["x", "y"]);
    let pa = a.construct(vec![Value::Int(0), Value::Int(0)]).unwrap();
    let pb = b.construct(vec![Value::Int(0), Value::Int(0)]).unwrap();

    assert_ne!(a, b);
    assert!(a.is_instance(&pa));
    assert!(!a.is_instance(&pb));
    assert_ne!(pa, pb);
}

#[test]
fn test_with_field_replaces_one_slot() {
    let point = define_product("Point", &["x", "y"]);
    let p = point
        .construct_record(vec![Value::Int(1), Value::Int(2)])
        .unwrap();
    let q = p.with_field("y", Value::Int(9)).unwrap();

    assert_eq!(q.values(), &[Value::Int(1), Value::Int(9)]);
    assert_eq!(p.get("y"), Some(&Value::Int(2)));
    assert!(p.with_field("z", Value::Null).is_err());
}

#[test]
fn test_record_display() {
    let point = define_product("Point", &["x", "y"]);
    let p = point.construct(vec![Value::Int(1), Value::Int(2)]).unwrap();
    assert_eq!(p.to_string(), "Point(1, 2)");
}

// ============================================================================
// Sums
// ============================================================================

#[test]
fn test_cata_selects_matching_handler() {
    let opt = define_sum("Option", &[("Some", &["x"]), ("None", &[])]);
    let some = opt.construct("Some", vec![Value::Int(5)]).unwrap();

    let out = some
        .as_variant()
        .unwrap()
        .cata(
            Cases::new()
                .on("Some", |v| v[0].as_int().unwrap() * 2)
                .on("None", |_| 0),
        )
        .unwrap();
    assert_eq!(out, 10);
}

#[test]
fn test_cata_requires_every_variant() {
    let opt = define_sum("Option", &[("Some", &["x"]), ("None", &[])]);
    let some = opt.construct("Some", vec![Value::Int(5)]).unwrap();

    let result = some
        .as_variant()
        .unwrap()
        .cata(Cases::new().on("Some", |_| 1));
    match result {
        Err(Error::MissingVariant { sum, variant }) => {
            assert_eq!(sum, "Option");
            assert_eq!(variant, "None");
        }
        other => panic!("expected missing variant, got {:?}", other),
    }
}

#[test]
fn test_cata_reports_first_missing_in_declaration_order() {
    let colour = define_sum("Colour", &[("Red", &[]), ("Green", &[]), ("Blue", &[])]);
    let red = colour.singleton("Red").unwrap();

    let err = red
        .as_variant()
        .unwrap()
        .cata(Cases::new().on("Red", |_| ()))
        .unwrap_err();
    assert!(matches!(err, Error::MissingVariant { ref variant, .. } if variant == "Green"));
}

#[test]
fn test_cata_rejects_unknown_handler() {
    let opt = define_sum("Option", &[("Some", &["x"]), ("None", &[])]);
    let none = opt.singleton("None").unwrap();

    let err = none
        .as_variant()
        .unwrap()
        .cata(
            Cases::new()
                .on("Some", |_| 1)
                .on("None", |_| 0)
                .on("Maybe", |_| 2),
        )
        .unwrap_err();
    assert!(matches!(err, Error::UnknownVariant { .. }));
}

#[test]
fn test_unknown_variant_and_arity() {
    let opt = define_sum("Option", &[("Some", &["x"]), ("None", &[])]);
    assert!(matches!(
        opt.construct("Nope", vec![]),
        Err(Error::UnknownVariant { .. })
    ));
    assert!(matches!(opt.singleton("Some"), Err(Error::Arity { .. })));
}

#[test]
fn test_variant_predicate() {
    let opt = define_sum("Option", &[("Some", &["x"]), ("None", &[])]);
    let is_some = opt.variant_predicate("Some");
    let some = opt.construct("Some", vec![Value::Null]).unwrap();
    let none = opt.singleton("None").unwrap();

    assert!(is_some(&some));
    assert!(!is_some(&none));
    assert!(opt.is_instance(&none));
}

#[test]
fn test_constructor_function_value() {
    let opt = define_sum("Option", &[("Some", &["x"]), ("None", &[])]);
    let some = opt.constructor("Some").unwrap();
    let env = crate::environment::Environment::new();

    let v = some.call1(&env, Value::Int(3)).unwrap();
    assert_eq!(v, opt.construct("Some", vec![Value::Int(3)]).unwrap());
    assert!(opt.constructor("Other").is_err());
}

// ============================================================================
// Long chains
// ============================================================================

#[test]
fn test_display_nested_chain() {
    let (_, list) = cons_list(3);
    assert_eq!(list.to_string(), "Cons(0, Cons(1, Cons(2, Nil)))");
}

#[test]
fn test_equality_of_long_chains() {
    let list = list_type();
    let a = build(&list, 200_000);
    let b = build(&list, 200_000);
    let c = build(&list, 199_999);
    assert_eq!(a, b);
    assert_ne!(a, c);

    // Distinct definitions never compare equal, even structurally.
    let (_, other) = cons_list(200_000);
    assert_ne!(a, other);
}

#[test]
fn test_drop_million_element_chain() {
    let (_, list) = cons_list(1_000_000);
    drop(list);
}

#[test]
fn test_shared_tail_survives_drop() {
    let (list, tail) = cons_list(10);
    let longer = list.construct("Cons", vec![Value::Int(-1), tail.clone()]).unwrap();
    drop(longer);
    assert_eq!(tail.as_variant().unwrap().values()[0], Value::Int(0));
}
