use dandelion_code::{decode, encode_with_root_set, from_bytes, from_json, to_bytes, to_json};
use dandelion_core::rng::RngHandle;
use dandelion_core::{CodePair, DandelionError, KTreeCode, NodeId};
use dandelion_graph::gen_random_ktree;

fn build_code() -> KTreeCode {
    let mut rng = RngHandle::from_seed(29);
    let graph = gen_random_ktree(14, 3, &mut rng).unwrap();
    encode_with_root_set(&graph, 14, 3).unwrap()
}

#[test]
fn json_round_trip() {
    let code = build_code();
    let json = to_json(&code).unwrap();
    let restored = from_json(&json).unwrap();
    assert_eq!(code, restored);
    assert_eq!(decode(&code).unwrap(), decode(&restored).unwrap());
}

#[test]
fn binary_round_trip() {
    let code = build_code();
    let bytes = to_bytes(&code).unwrap();
    let restored = from_bytes(&bytes).unwrap();
    assert_eq!(code, restored);
}

#[test]
fn pairs_serialize_as_arrays() {
    let code = KTreeCode {
        n: 5,
        k: 1,
        q: vec![NodeId::from_raw(4)],
        code: vec![CodePair(2, 1), CodePair::ROOT],
    };
    let json = to_json(&code).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["code"], serde_json::json!([[2, 1], [0, -1]]));
    assert_eq!(value["q"], serde_json::json!([4]));
    assert_eq!(value["schema_version"]["major"], 1);
}

#[test]
fn invalid_payloads_are_rejected_with_the_validator_error() {
    let short = r#"{"n": 11, "k": 3, "q": [2, 3, 9], "code": [[0, -1]]}"#;
    let err = from_json(short).unwrap_err();
    assert!(matches!(err, DandelionError::InvalidCodeLength(_)));

    let bad_q = r#"{"n": 5, "k": 1, "q": [7], "code": [[2, 1], [0, -1]]}"#;
    let err = from_json(bad_q).unwrap_err();
    assert!(matches!(err, DandelionError::InvalidCodeShape(_)));

    let future = r#"{"schema_version": {"major": 2, "minor": 0, "patch": 0},
        "n": 5, "k": 1, "q": [4], "code": [[2, 1], [0, -1]]}"#;
    let err = from_json(future).unwrap_err();
    assert!(matches!(err, DandelionError::Serde(_)));
    assert!(!err.is_input_error());

    let err = from_json("[1, 2]").unwrap_err();
    assert!(matches!(err, DandelionError::Serde(_)));
}
