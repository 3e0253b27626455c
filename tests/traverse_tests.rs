use evalon::{Expression, Token};

fn parse(source: &str) -> Expression {
    let mut expr = Expression::new();
    expr.parse(source).unwrap();
    expr
}

fn node_label(token: &Token) -> String {
    match token {
        Token::Number(v) => format!("{}", v),
        Token::Str(s) => format!("{:?}", s),
        Token::Unary { op, .. } => op.symbol().to_string(),
        Token::Binary { op, .. } => op.symbol().to_string(),
        Token::Paren(_) => "()".to_string(),
        Token::Reduce { name, .. } => name.to_string(),
        Token::Math1 { name, .. } => name.to_string(),
        Token::Math2 { name, .. } => name.to_string(),
        Token::If { .. } => "If".to_string(),
        Token::Custom(_) => "custom".to_string(),
    }
}

fn labels(expr: &Expression) -> Vec<String> {
    let mut out = Vec::new();
    let finished = expr
        .traverse(&mut |t| {
            out.push(node_label(t));
            true
        })
        .unwrap();
    assert!(finished);
    out
}

#[test]
fn preorder_binary() {
    let expr = parse("2 + 3 * 10");
    assert_eq!(labels(&expr), ["+", "2", "*", "3", "10"]);
}

#[test]
fn preorder_includes_paren_nodes() {
    let expr = parse("(2)");
    assert_eq!(labels(&expr), ["()", "2"]);
}

#[test]
fn preorder_unary_then_operand() {
    let expr = parse("-5");
    assert_eq!(labels(&expr), ["-", "5"]);
}

#[test]
fn preorder_function_arguments_left_to_right() {
    let expr = parse("Min(1, 2 + 3, 4)");
    assert_eq!(labels(&expr), ["Min", "1", "+", "2", "3", "4"]);
}

#[test]
fn preorder_if_children() {
    let expr = parse("If(1, 2, 3)");
    assert_eq!(labels(&expr), ["If", "1", "2", "3"]);
}

#[test]
fn visitor_aborts_traversal() {
    let expr = parse("1 + 2 + 3 + 4");
    let mut visited = 0;
    let finished = expr
        .traverse(&mut |_| {
            visited += 1;
            visited < 3
        })
        .unwrap();
    assert!(!finished);
    assert_eq!(visited, 3);
}

#[test]
fn node_count_matches_tree_shape() {
    let expr = parse("(10 - (5 + 3)) * 3");
    // *, (), -, 10, (), +, 5, 3, 3
    let mut count = 0;
    expr.traverse(&mut |_| {
        count += 1;
        true
    })
    .unwrap();
    assert_eq!(count, 9);
}
