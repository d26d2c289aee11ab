//! Integration tests for segment classification, overload matching and
//! symbol name cleanup, through the public API only.

use std::time::{Duration, Instant};

use proptest::prelude::*;
use segment_naming::*;

#[test]
fn test_collection_index() {
    assert!("{user-id}".is_collection_index());
    assert!(!"users".is_collection_index());
    assert!(!Some("{id").is_collection_index());
    assert!(Some(String::from("{id}")).is_collection_index());
}

#[test]
fn test_is_function() {
    assert!(!"".is_function());
    assert!(!None::<&str>.is_function());
    assert!("a.b".is_function());
    assert!(!"ab".is_function());
}

#[test]
fn test_is_function_with_parameters() {
    assert!("foo(a,b)".is_function_with_parameters());
    assert!(!"foo".is_function_with_parameters());
    assert!("foo()".is_function_with_parameters());
    assert!(
        "microsoft.graph.getOffice365ActiveUserDetail(period='{period}')"
            .is_function_with_parameters()
    );
}

#[test]
fn test_remove_function_braces() {
    assert_eq!(remove_function_braces("(abc)"), "abc");
    assert_eq!(remove_function_braces("((abc))"), "abc");
    assert_eq!(Some("(abc)").map(remove_function_braces), Some("abc"));
}

#[test]
fn test_match_subset() {
    assert!("Foo(a,b)".is_function_with_parameters_match("foo(a)"));
}

#[test]
fn test_match_is_asymmetric() {
    assert!(!"Foo(a)".is_function_with_parameters_match("Foo(a,b)"));
    assert!("Foo(a,b)".is_function_with_parameters_match("Foo(a)"));
}

#[test]
fn test_match_name_mismatch() {
    assert!(!"Foo(a)".is_function_with_parameters_match("Bar(a)"));
}

#[test]
fn test_match_case_folding_is_one_to_one() {
    assert!(!"f(ß)".is_function_with_parameters_match("f(SS)"));
    assert!(!"ß(a)".is_function_with_parameters_match("SS(a)"));
    assert_eq!("a-ß".cleanup_symbol_name(), "aß");
}

#[test]
fn test_match_absent_candidate() {
    assert!(!None::<&str>.is_function_with_parameters_match("Foo(a)"));
}

#[test]
fn test_match_overloads_with_defaults() {
    let declared = "microsoft.graph.range(address='{address}')";
    assert!(declared.is_function_with_parameters_match("microsoft.graph.range(address='A1')"));
    assert!(!declared.is_function_with_parameters_match("microsoft.graph.range()"));
    assert!(!declared.is_function_with_parameters_match("microsoft.graph.cell(address='A1')"));
}

#[test]
fn test_function_signature_is_serializable() {
    let signature = FunctionSignature::parse("delta(token='{t}')", &MatchBudget::default())
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&signature).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "delta", "parameters": ["token"] }));
}

#[test]
fn test_segment_shape_round_trips_as_json() {
    let shape = "$value".shape();
    assert!(shape.value_marker);
    let json = serde_json::to_string(&shape).unwrap();
    let back: SegmentShape = serde_json::from_str(&json).unwrap();
    assert_eq!(back, shape);
}

#[test]
fn test_replace_value_identifier() {
    assert_eq!("a$valueb".replace_value_identifier(), "aContentb");
    assert_eq!(None::<&str>.map(SymbolName::replace_value_identifier), None);
}

#[test]
fn test_append() {
    assert_eq!("".append("X"), "");
    assert_eq!("base".append("X"), "baseX");
}

#[test]
fn test_cleanup_symbol_name() {
    assert_eq!("my-prop".cleanup_symbol_name(), "myProp");
    assert_eq!("a.b.c".cleanup_symbol_name(), "aBC");
    assert_eq!("trailing-".cleanup_symbol_name(), "trailing");
    assert_eq!("".cleanup_symbol_name(), "");
}

#[test]
fn test_naming_pipeline() {
    let name = "$value"
        .replace_value_identifier()
        .cleanup_symbol_name()
        .append("2");
    assert_eq!(name, "Content2");
}

#[test]
fn test_exhausted_budget_through_public_api() {
    let budget = MatchBudget::from_json(r#"{ "function_parameters_ms": 0, "symbol_cleanup_ms": 0 }"#)
        .unwrap();
    assert_eq!(budget, MatchBudget::exhausted());

    let err = "foo(a)".try_is_function_with_parameters(&budget).unwrap_err();
    assert_eq!(
        err.to_string(),
        "function parameters exceeded its evaluation budget of 0ns"
    );
    assert!(matches!(
        function_parameters_match("foo(a)", "foo(a)", &budget),
        Err(MatchError::Timeout { .. })
    ));
    assert!("my-prop".try_cleanup_symbol_name(&budget).is_err());
}

#[test]
fn test_adversarial_inputs_finish_quickly() {
    let parens = "(".repeat(50_000) + &"a,".repeat(50_000);
    let symbols = "-.".repeat(50_000);
    let started = Instant::now();

    assert!(!parens.is_function_with_parameters());
    assert!(!parens.is_function_with_parameters_match(&parens));
    assert_eq!(symbols.cleanup_symbol_name(), "");

    assert!(started.elapsed() < Duration::from_secs(5));
}

proptest! {
    #[test]
    fn prop_collection_index_definition(s in ".+") {
        prop_assert_eq!(s.is_collection_index(), s.starts_with('{') && s.ends_with('}'));
    }

    #[test]
    fn prop_clean_names_are_fixed_points(s in "[A-Za-z0-9_]*") {
        let cleaned = s.cleanup_symbol_name();
        prop_assert_eq!(&cleaned, &s);
        prop_assert_eq!(cleaned.cleanup_symbol_name(), cleaned);
    }

    #[test]
    fn prop_cleanup_is_idempotent(s in "\\PC*") {
        let once = s.cleanup_symbol_name();
        prop_assert_eq!(once.cleanup_symbol_name(), once);
    }

    #[test]
    fn prop_parameter_scan_needs_both_parens(s in "\\PC*") {
        if s.is_function_with_parameters() {
            prop_assert!(s.contains('(') && s.contains(')'));
        }
    }

    #[test]
    fn prop_signature_covers_itself(s in "[a-z.]{1,8}\\([a-z0-9=,']{0,12}\\)") {
        prop_assert!(s.is_function_with_parameters_match(&s));
    }
}
