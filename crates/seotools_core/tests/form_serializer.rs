use pretty_assertions::assert_eq;
use seotools_core::{serialize_form, FieldValue, RequestValue};
use serde_json::json;

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn scalars_are_coerced_and_keep_document_order() {
    let request = serialize_form(&pairs(&[
        ("url", "https://example.com"),
        ("max_pages", "42"),
        ("use_js", "true"),
        ("ignore_robots", "false"),
        ("user_agent", "42abc"),
        ("note", ""),
    ]));

    assert_eq!(
        request.names().collect::<Vec<_>>(),
        vec!["url", "max_pages", "use_js", "ignore_robots", "user_agent", "note"]
    );
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "url": "https://example.com",
            "max_pages": 42,
            "use_js": true,
            "ignore_robots": false,
            "user_agent": "42abc",
            "note": "",
        })
    );
}

#[test]
fn repeated_fields_accumulate_in_encounter_order() {
    let request = serialize_form(&pairs(&[
        ("tag", "a"),
        ("url", "https://example.com"),
        ("tag", "2"),
        ("tag", "true"),
    ]));

    assert_eq!(request.names().collect::<Vec<_>>(), vec!["tag", "url"]);
    assert_eq!(
        request.get("tag"),
        Some(&RequestValue::List(vec![
            FieldValue::Text("a".to_string()),
            FieldValue::Int(2),
            FieldValue::Bool(true),
        ]))
    );
}

#[test]
fn declared_multi_valued_fields_wrap_single_values() {
    let request = serialize_form(&pairs(&[
        ("url", "https://example.com"),
        ("selected_bots", "googlebot"),
        ("bot_groups", "search"),
        ("devices", "iphone_14"),
    ]));

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "url": "https://example.com",
            "selected_bots": ["googlebot"],
            "bot_groups": ["search"],
            "devices": ["iphone_14"],
        })
    );
}

#[test]
fn declared_multi_valued_fields_keep_every_occurrence() {
    let request = serialize_form(&pairs(&[
        ("devices", "iphone_14"),
        ("devices", "pixel_7"),
    ]));

    assert_eq!(
        request.get("devices").and_then(RequestValue::as_list),
        Some(
            &[
                FieldValue::Text("iphone_14".to_string()),
                FieldValue::Text("pixel_7".to_string()),
            ][..]
        )
    );
}

#[test]
fn empty_form_serializes_to_empty_object() {
    let request = serialize_form::<String, String>(&[]);
    assert!(request.is_empty());
    assert_eq!(serde_json::to_value(&request).unwrap(), json!({}));
}
