use evalon::{Expression, Formatter};

fn format(source: &str) -> String {
    let mut expr = Expression::new();
    expr.parse(source).unwrap();
    expr.format().unwrap()
}

#[test]
fn format_normalizes_spacing() {
    assert_eq!(format("2+3*10"), "2 + 3 * 10");
}

#[test]
fn format_preserves_parens() {
    assert_eq!(format("(10 - (5 + 3)) * 3"), "(10 - (5 + 3)) * 3");
}

#[test]
fn format_two_char_comparisons() {
    assert_eq!(format("1<=2"), "1 <= 2");
    assert_eq!(format("1>=2"), "1 >= 2");
}

#[test]
fn format_unary_prefix() {
    assert_eq!(format("-5"), "-5");
    assert_eq!(format("!(1 < 2)"), "!(1 < 2)");
}

#[test]
fn format_quotes_strings() {
    assert_eq!(format("\"a\" + \"b\""), "\"a\" + \"b\"");
}

#[test]
fn format_function_calls() {
    assert_eq!(format("Min(5,4,3)"), "Min(5, 4, 3)");
    assert_eq!(format("If(1,2,3)"), "If(1, 2, 3)");
    assert_eq!(format("ATan2(0,1)"), "ATan2(0, 1)");
}

#[test]
fn format_canonicalizes_function_case() {
    assert_eq!(format("min(2, 1)"), "Min(2, 1)");
    assert_eq!(format("sqrt(4)"), "Sqrt(4)");
}

#[test]
fn reparse_formatted_text_evaluates_the_same() {
    let sources = [
        "2 + 3 * 10",
        "(10 - (5 + 3)) * 3",
        "Min(5, 4, 6, 8, 3, 10)",
        "If(2 > 1, Sqrt(16), -1)",
        "\"Hello, \" + \"World!\"",
        "-2 ^ 2",
        "1 <= 1.5",
    ];
    for source in sources {
        let mut first = Expression::new();
        first.parse(source).unwrap();
        let text = first.format().unwrap();

        let mut second = Expression::new();
        second.parse(&text).unwrap();
        assert_eq!(
            first.calculate().unwrap(),
            second.calculate().unwrap(),
            "source: {}",
            source
        );
        // Formatting is stable after the first normalization.
        assert_eq!(second.format().unwrap(), text, "source: {}", source);
    }
}

struct FixedPointFormatter;

impl Formatter for FixedPointFormatter {
    fn append_number(&self, out: &mut String, value: f64) {
        out.push_str(&format!("{:.2}", value));
    }
}

#[test]
fn custom_formatter_controls_literals_only() {
    let mut expr = Expression::new();
    expr.parse("(1 + 2) * 3").unwrap();
    assert_eq!(
        expr.format_with(&FixedPointFormatter).unwrap(),
        "(1.00 + 2.00) * 3.00"
    );
}
