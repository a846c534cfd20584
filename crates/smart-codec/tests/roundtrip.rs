//! End-to-end round-trip properties of the codec.

use serde_json::{json, Value};
use smart_codec::{smart_decode, smart_encode, TransformConfig};

fn roundtrip(doc: &Value, config: &TransformConfig) -> Value {
    let encoded = smart_encode(doc, config).unwrap();
    smart_decode(&encoded.data, config).unwrap().data
}

#[test]
fn deep_roundtrip_restores_document() {
    let config = TransformConfig::storage(["question", "answer", "feedback"]);
    let doc = json!({
        "quiz": {
            "title": "Midterm",
            "items": [
                {
                    "question": "Explain ownership in Rust.",
                    "answer": "<p>Values have a single owner.</p>",
                    "points": 10,
                },
                {
                    "question": "What does the borrow checker do?",
                    "answer": "Prevents aliased mutation.",
                    "feedback": "Nice phrasing, but be precise!",
                },
            ],
        },
        "submitted": true,
    });
    assert_eq!(roundtrip(&doc, &config), doc);
}

#[test]
fn learner_answer_scenario() {
    let config = TransformConfig::storage(["learnerTextResponse", "learnerChoices"]);
    let doc = json!({
        "learnerTextResponse": "<p>Test answer</p>",
        "learnerChoices": ["Option A", "Option B"],
    });
    let encoded = smart_encode(&doc, &config).unwrap();

    // Both fields become base64 strings whose decoded UTF-8 equals the
    // originals.
    assert!(encoded.data["learnerTextResponse"].is_string());
    assert_ne!(encoded.data["learnerTextResponse"], doc["learnerTextResponse"]);
    for item in encoded.data["learnerChoices"].as_array().unwrap() {
        assert!(item.is_string());
    }
    assert_eq!(
        encoded.transformed_fields,
        ["learnerTextResponse", "learnerChoices[0]", "learnerChoices[1]"],
    );

    assert_eq!(smart_decode(&encoded.data, &config).unwrap().data, doc);
}

#[test]
fn id_and_content_scenario() {
    let config = TransformConfig {
        fields: vec!["content".to_string()],
        exclude: vec!["id".to_string()],
        ..Default::default()
    };
    let doc = json!({"id": 123, "content": "Should be encoded"});
    let encoded = smart_encode(&doc, &config).unwrap();
    assert_eq!(encoded.data["id"], json!(123));
    assert_ne!(encoded.data["content"], doc["content"]);
    let decoded = smart_decode(&encoded.data, &config).unwrap();
    assert_eq!(decoded.data["content"], json!("Should be encoded"));
}

#[test]
fn decode_handles_padded_and_unpadded_scenario() {
    let config = TransformConfig {
        fields: vec!["text".to_string()],
        ..Default::default()
    };
    let padded = json!({"text": "SGVsbG8="});
    assert_eq!(
        smart_decode(&padded, &config).unwrap().data,
        json!({"text": "Hello"})
    );
    let unpadded = json!({"text": "SGVsbG8"});
    assert_eq!(
        smart_decode(&unpadded, &config).unwrap().data,
        json!({"text": "Hello"})
    );
}

#[test]
fn excluded_fields_are_bit_identical_both_ways() {
    let doc = json!({
        "id": "a1b2c3",
        "content": "text to hide",
        "nested": {"id": "deep-id", "content": "more text"},
    });
    let config = TransformConfig {
        fields: vec!["content".to_string(), "id".to_string()],
        exclude: vec!["id".to_string()],
        deep: true,
        ..Default::default()
    };
    let encoded = smart_encode(&doc, &config).unwrap();
    assert_eq!(encoded.data["id"], doc["id"]);
    assert_eq!(encoded.data["nested"]["id"], doc["nested"]["id"]);
    let decoded = smart_decode(&encoded.data, &config).unwrap();
    assert_eq!(decoded.data["id"], doc["id"]);
    assert_eq!(decoded.data["nested"]["id"], doc["nested"]["id"]);
}

#[test]
fn plain_text_survives_repeated_decodes() {
    // Decoding an already-decoded document again must change nothing.
    let config = TransformConfig::storage(["question"]);
    let doc = json!({"question": "Is base64 a security mechanism? No."});
    let encoded = smart_encode(&doc, &config).unwrap();
    let once = smart_decode(&encoded.data, &config).unwrap().data;
    let twice = smart_decode(&once, &config).unwrap();
    assert_eq!(twice.data, doc);
    assert!(twice.transformed_fields.is_empty());
}

#[test]
fn shape_preserved_for_awkward_documents() {
    let config = TransformConfig::storage(["question"]);
    let docs = [
        json!({}),
        json!([]),
        json!({"a": [], "b": [[]], "c": [null, {}, [null]]}),
        json!([{"question": "free response"}, [], null, 7, "loose string"]),
    ];
    for doc in &docs {
        let out = roundtrip(doc, &config);
        assert_eq!(&out, doc);
    }
}

#[test]
fn mixed_sequence_only_touches_matched_leaves() {
    let config = TransformConfig::storage(["tags"]);
    let doc = json!({"tags": ["alpha tag", 42, null, ["keep me"], {"inner": "keep"}]});
    let encoded = smart_encode(&doc, &config).unwrap();
    let items = encoded.data["tags"].as_array().unwrap();
    assert!(items[0].is_string());
    assert_ne!(items[0], json!("alpha tag"));
    assert_eq!(items[1], json!(42));
    assert_eq!(items[2], json!(null));
    assert_eq!(items[3], json!(["keep me"]));
    assert_eq!(items[4], json!({"inner": "keep"}));
    assert_eq!(roundtrip(&doc, &config), doc);
}
