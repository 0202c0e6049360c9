//! Integration tests for property resolution.

mod support;

use gstyle::{StyleError, Stylesheet, get_property};
use support::{Ledger, Widget, sample};

// ============================================================================
// CASCADE
// ============================================================================

#[test]
fn test_last_match_wins() {
    let s = sample();
    let sheet = Stylesheet::from_source("Button { color: red; } Button { color: blue; }").unwrap();

    assert_eq!(
        sheet.get_property(&s.save, "color").unwrap().as_deref(),
        Some("blue")
    );
}

#[test]
fn test_ruleset_without_the_property_is_skipped() {
    let s = sample();
    let sheet = Stylesheet::from_source(
        r#"
        Button { color: red; }
        .primary { color: blue; }
        Button.primary { margin: 2px; }
        "#,
    )
    .unwrap();

    assert_eq!(
        sheet.get_property(&s.save, "color").unwrap().as_deref(),
        Some("blue")
    );
    assert_eq!(
        sheet.get_property(&s.save, "margin").unwrap().as_deref(),
        Some("2px")
    );
}

#[test]
fn test_specificity_outranks_source_order() {
    let s = sample();
    let sheet = Stylesheet::from_source(
        r#"
        #main Button { color: green; }
        Button { color: red; }
        "#,
    )
    .unwrap();

    assert_eq!(
        get_property(&sheet, &s.save, "color").unwrap().as_deref(),
        Some("green")
    );
}

#[test]
fn test_combinators_and_structure() {
    let s = sample();
    let sheet = Stylesheet::from_source(
        r#"
        Window > Label { padding: 1px; }
        Box > Button:last-child { border: solid; }
        Button[label="Open"] { width: 10px; }
        .toolbar ~ Label { color: gray; }
        "#,
    )
    .unwrap();

    assert_eq!(
        sheet.get_property(&s.label, "padding").unwrap().as_deref(),
        Some("1px")
    );
    assert_eq!(
        sheet.get_property(&s.label, "color").unwrap().as_deref(),
        Some("gray")
    );
    assert_eq!(
        sheet.get_property(&s.open, "border").unwrap().as_deref(),
        Some("solid")
    );
    assert_eq!(sheet.get_property(&s.save, "border").unwrap(), None);
    assert_eq!(
        sheet.get_property(&s.open, "width").unwrap().as_deref(),
        Some("10px")
    );
}

#[test]
fn test_value_serialization() {
    let s = sample();
    let sheet = Stylesheet::from_source(
        r#"Button { font: 12px/1.5 "Fira Sans", serif; background: rgb(0, 128, 255) !important; }"#,
    )
    .unwrap();

    assert_eq!(
        sheet.get_property(&s.save, "font").unwrap().as_deref(),
        Some(r#"12px/1.5 "Fira Sans", serif"#)
    );
    assert_eq!(
        sheet.get_property(&s.save, "background").unwrap().as_deref(),
        Some("rgb(0, 128, 255)")
    );
}

#[test]
fn test_extreme_nth_coefficients() {
    let s = sample();
    assert!(matches!(
        Stylesheet::from_source("Button:nth-child(n-2147483648) { color: red; }"),
        Err(StyleError::Parse(_))
    ));

    let sheet = Stylesheet::from_source(
        r#"
        Button:nth-child(-n+1000000) { color: red; }
        Button:nth-child(1000000n-1000000) { color: blue; }
        Button:nth-last-child(-1000000n-1000000) { margin: 0; }
        "#,
    )
    .unwrap();
    assert_eq!(
        sheet.get_property(&s.save, "color").unwrap().as_deref(),
        Some("red")
    );
    assert_eq!(sheet.get_property(&s.save, "margin").unwrap(), None);
    assert!(s.ledger.balanced());
}

#[test]
fn test_unsupported_pseudo_never_matches_but_keeps_other_rules() {
    let s = sample();
    let sheet = Stylesheet::from_source(
        r#"
        Button { color: blue; }
        Button:not(.x) { color: red; }
        Button::before { color: green; }
        Button:lang(en) { color: gray; }
        "#,
    )
    .unwrap();

    assert_eq!(
        sheet.get_property(&s.open, "color").unwrap().as_deref(),
        Some("blue")
    );
}

// ============================================================================
// ABSENCE AND IDEMPOTENCE
// ============================================================================

#[test]
fn test_absent_property_is_none() {
    let s = sample();
    let sheet = Stylesheet::from_source("Label { color: red; }").unwrap();

    assert_eq!(sheet.get_property(&s.save, "margin").unwrap(), None);
    assert_eq!(sheet.get_property(&s.label, "margin").unwrap(), None);
}

#[test]
fn test_empty_stylesheet_resolves_nothing() {
    let s = sample();
    let sheet = Stylesheet::from_source("").unwrap();
    assert_eq!(sheet.get_property(&s.window, "color").unwrap(), None);
}

#[test]
fn test_resolution_is_idempotent() {
    let s = sample();
    let sheet = Stylesheet::from_source(".toolbar Button { color: red; }").unwrap();

    let first = sheet.get_property(&s.open, "color").unwrap();
    let second = sheet.get_property(&s.open, "color").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("red"));
}

// ============================================================================
// REFERENCE COUNTS
// ============================================================================

#[test]
fn test_queries_release_everything_they_retain() {
    let s = sample();
    let sheet = Stylesheet::from_source(
        r#"
        Window Box Button { color: red; }
        Label ~ Button { color: blue; }
        Button:nth-last-child(1) { margin: 0; }
        :empty { padding: 0; }
        "#,
    )
    .unwrap();

    for node in [&s.window, &s.toolbar, &s.save, &s.open, &s.label] {
        sheet.get_property(node, "color").unwrap();
        sheet.computed_properties(node).unwrap();
        assert!(s.ledger.balanced(), "leak after {:?}", node);
    }
    assert!(s.ledger.retains() > 0);
}

// ============================================================================
// COMPUTED PROPERTIES AND DIAGNOSTICS
// ============================================================================

#[test]
fn test_computed_properties_agree_with_get_property() {
    let s = sample();
    let sheet = Stylesheet::from_source(
        r#"
        Button { color: red; margin: 0; }
        .primary { color: blue; }
        Label { padding: 4px; }
        "#,
    )
    .unwrap();

    let computed = sheet.computed_properties(&s.save).unwrap();
    assert_eq!(computed.len(), 2);
    for (property, value) in &computed {
        assert_eq!(
            sheet.get_property(&s.save, property).unwrap().as_ref(),
            Some(value)
        );
    }
    assert_eq!(computed["color"], "blue");
}

#[test]
fn test_matched_rules_in_cascade_order() {
    let s = sample();
    let sheet = Stylesheet::from_source(
        r#"
        .primary { color: blue; }
        @media print { Button { color: black; } }
        Button { color: red; }
        Label { color: gray; }
        "#,
    )
    .unwrap();

    let rules = sheet.matched_rules(&s.save).unwrap();
    let selectors: Vec<String> = rules.iter().map(|r| r.selectors.to_string()).collect();
    assert_eq!(selectors, vec!["Button", ".primary"]);
}

// ============================================================================
// CONTRACT VIOLATIONS
// ============================================================================

#[test]
fn test_empty_property_name_is_rejected() {
    let s = sample();
    let sheet = Stylesheet::from_source("Button { color: red; }").unwrap();
    assert!(matches!(
        sheet.get_property(&s.save, ""),
        Err(StyleError::ContractViolation(_))
    ));
}

#[test]
fn test_nameless_node_is_rejected() {
    let ledger = Ledger::new();
    let nameless = Widget::new(&ledger, "");
    let sheet = Stylesheet::from_source("* { color: red; }").unwrap();

    assert!(matches!(
        sheet.get_property(&nameless, "color"),
        Err(StyleError::ContractViolation(_))
    ));
    assert_eq!(ledger.retains(), 0);
}
