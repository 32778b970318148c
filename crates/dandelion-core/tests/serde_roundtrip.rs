use dandelion_core::{CodePair, DandelionError, ErrorInfo, KTreeCode, NodeId, SchemaVersion};

#[test]
fn code_pairs_serialize_as_arrays() {
    let code = vec![CodePair::ROOT, CodePair(2, 1), CodePair(8, 3)];
    let json = serde_json::to_string(&code).expect("serialize");
    assert_eq!(json, "[[0,-1],[2,1],[8,3]]");

    let decoded: Vec<CodePair> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, code);
}

#[test]
fn ktree_code_round_trip_json() {
    let code = KTreeCode {
        n: 11,
        k: 3,
        q: vec![NodeId::from_raw(2), NodeId::from_raw(3), NodeId::from_raw(9)],
        code: vec![CodePair::ROOT, CodePair(2, 1)],
    };
    let json = serde_json::to_string_pretty(&code).expect("serialize");
    assert!(json.contains("\"q\": [\n    2,"));
    let decoded: KTreeCode = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, code);
}

#[test]
fn errors_round_trip_json() {
    let err = DandelionError::InvalidCodeLength(
        ErrorInfo::new("code-length", "wrong length").with_context("expected", 6),
    );
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"kind\":\"InvalidCodeLength\""));
    let decoded: DandelionError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn schema_versions_compare_by_major() {
    let current = SchemaVersion::default();
    assert!(current.is_compatible_with(&SchemaVersion::new(1, 4, 2)));
    assert!(!current.is_compatible_with(&SchemaVersion::new(2, 0, 0)));
}
