//! Property tests for serde JSON roundtrip of stack frames and reports

use errchain::{ErrorReport, StackFrame};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

/// Generate an arbitrary StackFrame, zero values included
fn arb_frame() -> impl Strategy<Value = StackFrame> {
    (
        prop_oneof![Just(String::new()), "/[a-z]{1,8}/[a-z_]{1,8}\\.rs"],
        prop_oneof![Just(0u32), 1u32..10_000],
        prop_oneof![Just(String::new()), "[a-z_]{1,12}(::\\{\\{closure\\}\\})?"],
        prop_oneof![Just(String::new()), "[a-z_]{1,8}(::[a-z_]{1,8}){0,2}"],
        any::<bool>(),
        prop_oneof![Just(0usize), any::<usize>()],
    )
        .prop_map(|(file, line_number, function, package, in_app, address)| StackFrame {
            file,
            line_number,
            function,
            package,
            in_app,
            address,
        })
}

proptest! {
    #[test]
    fn frames_roundtrip_through_json(frames in prop::collection::vec(arb_frame(), 0..6)) {
        let encoded = serde_json::to_string(&frames).unwrap();
        let decoded: Vec<StackFrame> = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, frames);
    }

    #[test]
    fn zero_fields_are_never_encoded(frame in arb_frame()) {
        let value = serde_json::to_value(&frame).unwrap();
        let object = value.as_object().unwrap();

        prop_assert_eq!(object.contains_key("file"), !frame.file.is_empty());
        prop_assert_eq!(object.contains_key("line_number"), frame.line_number != 0);
        prop_assert_eq!(object.contains_key("function"), !frame.function.is_empty());
        prop_assert_eq!(object.contains_key("package"), !frame.package.is_empty());
        prop_assert_eq!(object.contains_key("in_app"), frame.in_app);
        prop_assert_eq!(object.contains_key("address"), frame.address != 0);
    }
}

#[test]
fn frame_uses_documented_field_names() {
    let frame = StackFrame {
        file: "/src/orders.rs".into(),
        line_number: 12,
        function: "place".into(),
        package: "shop::orders".into(),
        in_app: true,
        address: 0x10,
    };
    assert_eq!(
        serde_json::to_value(&frame).unwrap(),
        json!({
            "file": "/src/orders.rs",
            "line_number": 12,
            "function": "place",
            "package": "shop::orders",
            "in_app": true,
            "address": 16,
        })
    );
}

#[test]
fn report_decodes_with_missing_optional_fields() {
    let report: ErrorReport =
        serde_json::from_value(json!({"code": "USER", "message": "try again"})).unwrap();
    assert_eq!(report.code, "USER");
    assert!(report.messages.is_empty());
    assert!(report.stack_trace.is_empty());
}
