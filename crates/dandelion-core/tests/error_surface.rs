use dandelion_core::errors::{DandelionError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("node", 7)
        .with_context("reason", "example")
}

#[test]
fn code_shape_error_surface() {
    let err = DandelionError::InvalidCodeShape(sample_info("element-not-pair", "bad element"));
    assert_eq!(err.info().code, "element-not-pair");
    assert!(err.info().context.contains_key("node"));
    assert!(err.is_input_error());
}

#[test]
fn pruning_error_surface() {
    let err = DandelionError::PruningStalled(sample_info("pruning-stalled", "stalled"));
    assert_eq!(err.info().context.get("reason"), Some(&"example".to_string()));
}

#[test]
fn missing_input_error_surface() {
    let err = DandelionError::MissingInput(ErrorInfo::new("missing-ktree", "no k-tree"));
    assert!(err.to_string().starts_with("missing input: no k-tree"));
}

#[test]
fn serde_errors_are_not_input_errors() {
    let err = DandelionError::Serde(ErrorInfo::new("json-deserialize", "eof"));
    assert!(!err.is_input_error());
}

#[test]
fn context_is_added_without_changing_variant() {
    let err = DandelionError::Graph(ErrorInfo::new("unknown-node", "node does not exist"))
        .with_context("node", 12)
        .with_hint("nodes must be labeled 1..=n");
    match err {
        DandelionError::Graph(info) => {
            assert_eq!(info.context.get("node"), Some(&"12".to_string()));
            assert_eq!(info.hint.as_deref(), Some("nodes must be labeled 1..=n"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn display_lists_context_and_hint() {
    let info = ErrorInfo::new("C1", "message")
        .with_context("a", 1)
        .with_hint("try again later");
    assert_eq!(
        info.to_string(),
        "message (code: C1) | context: [a=1] | hint: try again later"
    );
}
