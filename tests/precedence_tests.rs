use evalon::Expression;

fn calc(source: &str) -> f64 {
    let mut expr = Expression::new();
    expr.parse(source).unwrap();
    expr.calculate().unwrap().as_number().unwrap()
}

#[test]
fn left_associativity_sub() {
    // 6 - 2 - 1 = (6 - 2) - 1
    assert_eq!(calc("6 - 2 - 1"), 3.0);
}

#[test]
fn left_associativity_div() {
    assert_eq!(calc("12 / 3 / 2"), 2.0);
}

#[test]
fn left_associativity_pow() {
    // Power folds left like every other operator here: (2 ^ 3) ^ 2
    assert_eq!(calc("2 ^ 3 ^ 2"), 64.0);
}

#[test]
fn pow_binds_tighter_than_mul() {
    assert_eq!(calc("2 * 3 ^ 2"), 18.0);
}

#[test]
fn mul_binds_tighter_than_add() {
    assert_eq!(calc("1 + 2 * 3"), 7.0);
}

#[test]
fn add_binds_tighter_than_comparison() {
    // 1 + 2 < 4 parses as (1 + 2) < 4
    assert_eq!(calc("1 + 2 < 4"), 1.0);
}

#[test]
fn parentheses_override() {
    assert_eq!(calc("(1 + 2) * 3"), 9.0);
}

#[test]
fn unary_minus_before_binary() {
    // -2 ^ 2 parses as (-2) ^ 2
    assert_eq!(calc("-2 ^ 2"), 4.0);
}

#[test]
fn unary_minus_on_rhs() {
    assert_eq!(calc("2 ^ -2"), 0.25);
    assert_eq!(calc("3 * -2"), -6.0);
}

#[test]
fn unary_not_on_expression() {
    assert_eq!(calc("!(1 < 2)"), 0.0);
}

#[test]
fn mixed_depth_expression() {
    assert_eq!(calc("2 + 3 * 4 - 10 / 2 ^ 1"), 9.0);
}
