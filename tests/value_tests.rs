use evalon::{ExprError, Expression, Value, PRECISION};

#[test]
fn epsilon_band_compares_equal() {
    let a = Value::Number(1.0);
    let b = Value::Number(1.0 + PRECISION / 2.0);
    // Within the band, ==, <= and >= all hold at once.
    assert!(a.eq(&b));
    assert!(a.le(&b).unwrap());
    assert!(a.ge(&b).unwrap());
    assert!(b.le(&a).unwrap());
    assert!(b.ge(&a).unwrap());
}

#[test]
fn strict_ordering_has_no_epsilon() {
    let a = Value::Number(1.0);
    let b = Value::Number(1.0 + PRECISION / 2.0);
    // lt/gt stay strict even inside the equality band.
    assert!(a.lt(&b).unwrap());
    assert!(!a.gt(&b).unwrap());
}

#[test]
fn outside_band_compares_unequal() {
    let a = Value::Number(1.0);
    let b = Value::Number(1.0 + PRECISION * 2.0);
    assert!(!a.eq(&b));
    assert!(a.le(&b).unwrap());
    assert!(!a.ge(&b).unwrap());
}

#[test]
fn epsilon_band_through_the_language() {
    let mut expr = Expression::new();
    expr.parse("1.0000005 = 1").unwrap();
    assert_eq!(expr.calculate().unwrap().as_number().unwrap(), 1.0);

    expr.parse("1.0000005 <= 1").unwrap();
    assert_eq!(expr.calculate().unwrap().as_number().unwrap(), 1.0);

    expr.parse("1.0000005 >= 1").unwrap();
    assert_eq!(expr.calculate().unwrap().as_number().unwrap(), 1.0);
}

#[test]
fn truthiness_threshold() {
    assert!(Value::Number(1.0).as_bool().unwrap());
    assert!(Value::Number(PRECISION).as_bool().unwrap());
    assert!(!Value::Number(PRECISION / 2.0).as_bool().unwrap());
    assert!(!Value::Number(0.0).as_bool().unwrap());
    // Truthiness is a threshold, not a zero test: negatives are false.
    assert!(!Value::Number(-1.0).as_bool().unwrap());
}

#[test]
fn variant_accessors() {
    let n = Value::Number(2.5);
    assert!(n.is_number());
    assert_eq!(n.as_number().unwrap(), 2.5);
    assert_eq!(n.as_int().unwrap(), 2);
    assert_eq!(n.as_str().unwrap_err(), ExprError::TypeMismatch);

    let s = Value::from("hi");
    assert!(s.is_string());
    assert_eq!(s.as_str().unwrap(), "hi");
    assert_eq!(s.as_number().unwrap_err(), ExprError::TypeMismatch);
    assert_eq!(s.as_bool().unwrap_err(), ExprError::TypeMismatch);
}

#[test]
fn add_assign_concatenates_strings() {
    let mut a = Value::from("foo");
    a.add_assign(&Value::from("bar")).unwrap();
    assert_eq!(a.as_str().unwrap(), "foobar");
}

#[test]
fn add_assign_rejects_mixed_types() {
    let mut a = Value::Number(1.0);
    assert_eq!(
        a.add_assign(&Value::from("x")).unwrap_err(),
        ExprError::TypeMismatch
    );
    let mut s = Value::from("x");
    assert_eq!(
        s.sub_assign(&Value::from("y")).unwrap_err(),
        ExprError::TypeMismatch
    );
}

#[test]
fn values_are_deep_copies() {
    let a = Value::from("shared");
    let mut b = a.clone();
    b.add_assign(&Value::from("!")).unwrap();
    assert_eq!(a.as_str().unwrap(), "shared");
    assert_eq!(b.as_str().unwrap(), "shared!");
}

#[test]
fn negate_and_not() {
    assert_eq!(Value::Number(3.0).neg().unwrap(), Value::Number(-3.0));
    assert_eq!(Value::Number(3.0).not().unwrap(), Value::Number(0.0));
    assert_eq!(Value::Number(0.0).not().unwrap(), Value::Number(1.0));
    assert_eq!(Value::from("s").neg().unwrap_err(), ExprError::TypeMismatch);
}

#[test]
fn display() {
    assert_eq!(Value::Number(1.5).to_string(), "1.5");
    assert_eq!(Value::from("x").to_string(), "x");
}
