//! Integration tests for selector parsing.
//!
//! - Type selectors: `Button`, `header`
//! - Class and ID selectors: `.primary`, `#main`
//! - Attribute selectors: `[type]`, `[lang|=en]`
//! - Pseudo-classes: `:first-child`, `:nth-child(2n+1)`
//! - Combinators: descendant, `>`, `+`, `~`
//! - Selector lists: `Button, .primary`

use gcss::parser::{
    AttributeOperator, Combinator, NthExpr, PseudoClass, Selector, Specificity,
    parse_selector_list, parse_stylesheet,
};

// ============================================================================
// SIMPLE SELECTORS
// ============================================================================

#[test]
fn test_type_selector_simple() {
    let (remaining, list) = parse_selector_list("Button").unwrap();
    assert!(remaining.is_empty());

    assert_eq!(list.selectors.len(), 1);
    let complex = &list.selectors[0];
    assert_eq!(complex.parts.len(), 1);
    assert_eq!(
        complex.parts[0].compound.selectors[0],
        Selector::Type("Button".to_string())
    );
}

#[test]
fn test_type_selector_with_hyphen() {
    let (_, list) = parse_selector_list("my-widget").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Type("my-widget".to_string())
    );
}

#[test]
fn test_compound_type_class_id() {
    let (_, list) = parse_selector_list("Button.primary#submit").unwrap();
    let compound = &list.selectors[0].parts[0].compound;
    assert_eq!(
        compound.selectors,
        vec![
            Selector::Type("Button".to_string()),
            Selector::Class("primary".to_string()),
            Selector::Id("submit".to_string()),
        ]
    );
}

#[test]
fn test_universal_selector() {
    let (_, list) = parse_selector_list("*").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Universal
    );
}

// ============================================================================
// ATTRIBUTE SELECTORS
// ============================================================================

#[test]
fn test_attribute_exists() {
    let (_, list) = parse_selector_list("[disabled]").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Attribute {
            name: "disabled".to_string(),
            operator: AttributeOperator::Exists,
            value: String::new(),
        }
    );
}

#[test]
fn test_attribute_operators() {
    let cases = [
        ("[a=b]", AttributeOperator::Equals),
        ("[a~=b]", AttributeOperator::Includes),
        ("[a|=b]", AttributeOperator::DashMatch),
        ("[a^=b]", AttributeOperator::Prefix),
        ("[a$=b]", AttributeOperator::Suffix),
        ("[a*=b]", AttributeOperator::Substring),
    ];
    for (source, expected) in cases {
        let (_, list) = parse_selector_list(source).unwrap();
        match &list.selectors[0].parts[0].compound.selectors[0] {
            Selector::Attribute {
                operator, value, ..
            } => {
                assert_eq!(*operator, expected, "operator for {source}");
                assert_eq!(value, "b");
            }
            other => panic!("expected attribute selector, got {other:?}"),
        }
    }
}

#[test]
fn test_attribute_quoted_value_with_spaces() {
    let (_, list) = parse_selector_list(r#"[ title = "hello world" ]"#).unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Attribute {
            name: "title".to_string(),
            operator: AttributeOperator::Equals,
            value: "hello world".to_string(),
        }
    );
}

// ============================================================================
// PSEUDO-CLASSES
// ============================================================================

#[test]
fn test_structural_pseudo_classes() {
    let (_, list) = parse_selector_list("Item:first-child:last-child:empty").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[1..],
        [
            Selector::PseudoClass(PseudoClass::FirstChild),
            Selector::PseudoClass(PseudoClass::LastChild),
            Selector::PseudoClass(PseudoClass::Empty),
        ]
    );
}

#[test]
fn test_nth_child_formula() {
    let (_, list) = parse_selector_list("li:nth-child(2n+1)").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[1],
        Selector::PseudoClass(PseudoClass::NthChild(NthExpr::new(2, 1)))
    );
}

#[test]
fn test_unknown_pseudo_class_is_kept() {
    let (_, list) = parse_selector_list("Button:hover").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[1],
        Selector::PseudoClass(PseudoClass::Other("hover".to_string()))
    );
}

#[test]
fn test_pseudo_elements_and_functional_pseudo_classes_are_kept() {
    let cases = [
        ("Label::before", ":before"),
        ("Label:lang(en)", "lang(en)"),
        ("Label:not(.x)", "not(.x)"),
        ("Label:not( :nth-child(2) )", "not(:nth-child(2))"),
    ];
    for (source, expected) in cases {
        let (remaining, list) = parse_selector_list(source).unwrap();
        assert!(remaining.is_empty(), "leftover input for {source}");
        assert_eq!(
            list.selectors[0].parts[0].compound.selectors[1],
            Selector::PseudoClass(PseudoClass::Other(expected.to_string())),
            "pseudo for {source}"
        );
    }
}

#[test]
fn test_unsupported_pseudo_does_not_drop_the_stylesheet() {
    let sheet = parse_stylesheet(
        r#"
        Label:lang(en) { color: red; }
        Label:not(.x) { color: green; }
        p::first-line, Label::before { content: "x"; }
        Button { color: blue; }
        "#,
    )
    .unwrap();
    assert_eq!(sheet.rulesets().count(), 4);
    assert_eq!(
        sheet.to_string().lines().next(),
        Some("Label:lang(en) {")
    );
    let dump = sheet.to_string();
    assert!(dump.contains("Label:not(.x) {"));
    assert!(dump.contains("p::first-line, Label::before {"));
}

#[test]
fn test_unbalanced_pseudo_argument_fails() {
    assert!(parse_stylesheet("Label:lang(en { color: red; }").is_err());
}

#[test]
fn test_invalid_nth_argument_fails() {
    assert!(parse_stylesheet("li:nth-child(foo) { color: red; }").is_err());
    assert!(parse_stylesheet("li:nth-child(n-2147483648) { color: red; }").is_err());
}

// ============================================================================
// COMBINATORS
// ============================================================================

#[test]
fn test_descendant_combinator() {
    let (_, list) = parse_selector_list("Container Button").unwrap();
    let parts = &list.selectors[0].parts;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].combinator, Combinator::Descendant);
    assert_eq!(parts[1].combinator, Combinator::None);
}

#[test]
fn test_explicit_combinators() {
    let (_, list) = parse_selector_list("A > B + C ~ D").unwrap();
    let combinators: Vec<_> = list.selectors[0].parts.iter().map(|p| p.combinator).collect();
    assert_eq!(
        combinators,
        vec![
            Combinator::Child,
            Combinator::AdjacentSibling,
            Combinator::GeneralSibling,
            Combinator::None,
        ]
    );
}

#[test]
fn test_combinator_without_spaces() {
    let (_, list) = parse_selector_list("A>B").unwrap();
    assert_eq!(list.selectors[0].parts[0].combinator, Combinator::Child);
}

#[test]
fn test_trailing_combinator_fails() {
    assert!(parse_selector_list("A >").is_err());
}

// ============================================================================
// SELECTOR LISTS AND SPECIFICITY
// ============================================================================

#[test]
fn test_selector_list() {
    let (_, list) = parse_selector_list("Button, .primary ,#main").unwrap();
    assert_eq!(list.selectors.len(), 3);
    assert_eq!(list.to_string(), "Button, .primary, #main");
}

#[test]
fn test_specificity_counts() {
    let (_, list) = parse_selector_list("Container > Button.primary#go[type]:first-child").unwrap();
    assert_eq!(
        list.selectors[0].specificity(),
        Specificity {
            ids: 1,
            classes: 3,
            types: 2,
        }
    );
}

#[test]
fn test_selector_display_round_trip() {
    let source = "A > B.c + [x=\"y\"] ~ li:nth-child(2n+1)";
    let (_, list) = parse_selector_list(source).unwrap();
    assert_eq!(list.to_string(), source);
}
