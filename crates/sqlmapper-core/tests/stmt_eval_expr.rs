use sqlmapper_core::stmt::{Expr, Value, ValueRecord};

fn param() -> Value {
    ValueRecord::new()
        .field("name", "alice")
        .field("age", 30i64)
        .field("score", 7.5f64)
        .field("blank", "")
        .field("missing", Value::Null)
        .field("ids", vec![1i64, 2, 3])
        .field("empty", Vec::<i64>::new())
        .field("active", true)
        .field(
            "address",
            ValueRecord::new().field("city", "Lisbon").field("zip", "1000"),
        )
        .into()
}

fn eval(src: &str) -> bool {
    Expr::parse(src).eval_bool(&param())
}

// ---------------------------------------------------------------------------
// Null checks
// ---------------------------------------------------------------------------

#[test]
fn present_value_is_not_null() {
    assert!(eval("name != null"));
    assert!(!eval("name == null"));
}

#[test]
fn null_and_absent_values_are_null() {
    assert!(eval("missing == null"));
    assert!(eval("nonexistent == null"));
    assert!(eval("address.country == null"));
    assert!(!eval("nonexistent.deeper != null"));
}

// ---------------------------------------------------------------------------
// Comparisons
// ---------------------------------------------------------------------------

#[test]
fn string_equality() {
    assert!(eval("name == 'alice'"));
    assert!(eval("name eq \"alice\""));
    assert!(!eval("name == 'bob'"));
    assert!(eval("address.city == 'Lisbon'"));
}

#[test]
fn numeric_comparisons_coerce() {
    assert!(eval("age > 18"));
    assert!(eval("age >= 30"));
    assert!(eval("age lt 31"));
    assert!(eval("score > 7"));
    assert!(eval("address.zip == 1000"));
    assert!(eval("address.zip gt 999"));
}

#[test]
fn uncoercible_comparison_is_false() {
    assert!(!eval("name > 3"));
    assert!(!eval("missing > 3"));
    assert!(!eval("missing < 3"));
}

#[test]
fn empty_string_comparison() {
    assert!(eval("blank == ''"));
    assert!(eval("name != ''"));
}

// ---------------------------------------------------------------------------
// Logical operators
// ---------------------------------------------------------------------------

#[test]
fn and_or_not() {
    assert!(eval("name != null and age > 18"));
    assert!(eval("name == null or age > 18"));
    assert!(!eval("name == null || age < 18"));
    assert!(eval("!(name == null)"));
    assert!(eval("not active == false"));
    assert!(eval("active && (missing != null || ids != null)"));
}

// ---------------------------------------------------------------------------
// Truthiness and calls
// ---------------------------------------------------------------------------

#[test]
fn bare_path_truthiness() {
    assert!(eval("active"));
    assert!(eval("ids"));
    assert!(!eval("empty"));
    assert!(!eval("blank"));
    assert!(!eval("missing"));
    assert!(!eval("nonexistent"));
}

#[test]
fn size_and_is_empty() {
    assert!(eval("ids.size() == 3"));
    assert!(eval("ids != null and ids.size() > 0"));
    assert!(eval("empty.size() == 0"));
    assert!(eval("name.length() == 5"));
    assert!(eval("empty.isEmpty()"));
    assert!(!eval("ids.isEmpty()"));
}

#[test]
fn indexed_paths() {
    assert!(eval("ids[0] == 1"));
    assert!(eval("ids[2] == 3"));
    assert!(eval("ids[3] == null"));
}

#[test]
fn unrecognized_expression_checks_leading_path() {
    // Method calls outside the supported set degrade to a truthiness check
    assert!(eval("name.trim() != ''"));
    assert!(!eval("missing.trim() != ''"));
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

#[test]
fn concat_builds_like_pattern() {
    assert_eq!(
        Expr::parse("'%' + name + '%'").eval(&param()),
        Value::from("%alice%")
    );
}

#[test]
fn concat_adds_integers() {
    assert_eq!(Expr::parse("age + 1").eval(&param()), Value::I64(31));
}

#[test]
fn missing_path_evaluates_to_null() {
    assert_eq!(Expr::parse("address.street").eval(&param()), Value::Null);
}
