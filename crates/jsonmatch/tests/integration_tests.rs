use jsonmatch::{
    Error, Kind, Node, Options, PathValue, get_value_by_path, get_value_by_path_with_options,
};
use rstest::{fixture, rstest};
use serde_json::json;

const DOC: &[u8] = br#"{"a":{"b":1},"c":[{"b":1},{"b":2}]}"#;

#[fixture]
fn doc() -> Node {
    Node::from_slice(DOC).unwrap()
}

fn predicate(path: &str, value: serde_json::Value) -> PathValue {
    PathValue::from_json(path, &value).unwrap()
}

fn paths(results: &[PathValue]) -> Vec<&str> {
    results.iter().map(|pv| pv.path.as_str()).collect()
}

#[rstest]
#[case::object_member("/a/b", "1")]
#[case::array_element("/c/1/b", "2")]
#[case::object_subtree("/a", r#"{"b":1}"#)]
#[case::array_subtree("/c", r#"[{"b":1},{"b":2}]"#)]
fn test_get_value_by_path(#[case] path: &str, #[case] expected: &str) {
    assert_eq!(get_value_by_path(DOC, path).unwrap().get(), expected);
}

#[rstest]
#[case::index_out_of_bounds("/c/5/b")]
#[case::absent_nested_key("/a/x")]
#[case::absent_root_key("/missing")]
fn test_lookup_missing(doc: Node, #[case] path: &str) {
    assert_eq!(
        doc.get_value(path).unwrap_err(),
        Error::Missing(path.to_string())
    );
}

#[rstest]
#[case::empty("")]
#[case::no_leading_slash("no-leading-slash")]
fn test_malformed_path_rejected_by_every_entry_point(doc: Node, #[case] path: &str) {
    assert!(matches!(doc.get_child(path), Err(Error::InvalidPath { .. })));
    assert!(matches!(doc.get_value(path), Err(Error::InvalidPath { .. })));
    assert!(matches!(
        get_value_by_path(DOC, path),
        Err(Error::InvalidPath { .. })
    ));
    assert!(matches!(
        doc.find_children(&[predicate(path, json!(null))]),
        Err(Error::InvalidPath { .. })
    ));
}

#[rstest]
fn test_get_child_exposes_node_shape(doc: Node) {
    assert_eq!(doc.get_child("/c").unwrap().kind(), Kind::Array);
    assert_eq!(doc.get_child("/a/b").unwrap().kind(), Kind::Other);
}

#[rstest]
fn test_whitespace_around_document_is_accepted() {
    assert_eq!(
        get_value_by_path(b" {\"a\": 1} ", "/a").unwrap().get(),
        "1"
    );
}

#[rstest]
#[case::truncated(br#"{"a":"#)]
#[case::not_json(b"hello")]
#[case::trailing_garbage(b"{} trailing")]
fn test_malformed_document_fails_to_decode(#[case] doc: &[u8]) {
    assert!(matches!(
        get_value_by_path(doc, "/a"),
        Err(Error::Decode(_))
    ));
}

#[rstest]
fn test_find_children_single_predicate(doc: Node) {
    let hits = doc.find_children(&[predicate("/b", json!(1))]).unwrap();
    assert_eq!(
        hits,
        [
            PathValue::from_json("/a", &json!({"b": 1})).unwrap(),
            PathValue::from_json("/c/0", &json!({"b": 1})).unwrap(),
        ]
    );
}

#[rstest]
fn test_find_children_intersects_predicates() {
    let doc: Node = r#"{"a":{"b":1},"c":[{"b":1,"d":2},{"b":2}],"e":{"b":1,"d":3}}"#
        .parse()
        .unwrap();
    let broad = doc.find_children(&[predicate("/b", json!(1))]).unwrap();
    assert_eq!(paths(&broad), ["/a", "/c/0", "/e"]);

    let narrowed = doc
        .find_children(&[predicate("/b", json!(1)), predicate("/d", json!(2))])
        .unwrap();
    assert_eq!(paths(&narrowed), ["/c/0"]);

    let swapped = doc
        .find_children(&[predicate("/d", json!(2)), predicate("/b", json!(1))])
        .unwrap();
    assert_eq!(swapped, narrowed);

    let none = doc
        .find_children(&[predicate("/b", json!(1)), predicate("/d", json!(9))])
        .unwrap();
    assert!(none.is_empty());
}

#[rstest]
fn test_find_children_root_candidate_has_empty_path(doc: Node) {
    let hits = doc
        .find_children(&[predicate("/a", json!({"b": 1}))])
        .unwrap();
    assert_eq!(paths(&hits), [""]);
    assert_eq!(hits[0].value.get(), std::str::from_utf8(DOC).unwrap());
}

#[rstest]
fn test_find_children_empty_predicates(doc: Node) {
    assert!(doc.find_children(&[]).unwrap().is_empty());
}

#[rstest]
fn test_absent_entry_satisfies_null_predicate(doc: Node) {
    let hits = doc
        .find_children(&[predicate("/missing", json!(null))])
        .unwrap();
    assert_eq!(paths(&hits), ["", "/a", "/c/0", "/c/1"]);
}

#[rstest]
fn test_absence_rule_is_terminal_only() {
    let doc: Node = r#"{"x":{"missing":{}},"y":{}}"#.parse().unwrap();
    let hits = doc
        .find_children(&[predicate("/missing/key", json!(null))])
        .unwrap();
    assert_eq!(paths(&hits), ["/x"]);
}

#[rstest]
fn test_predicate_numbers_compare_semantically(doc: Node) {
    let hits = doc.find_children(&[predicate("/b", json!(1.0))]).unwrap();
    assert_eq!(paths(&hits), ["/a", "/c/0"]);
}

#[rstest]
fn test_results_arrive_in_pre_order() {
    let doc: Node = r#"{"z":{"m":{"k":1}},"a":[{"k":1},{"x":{"k":1}}],"k":1}"#
        .parse()
        .unwrap();
    let hits = doc.find_children(&[predicate("/k", json!(1))]).unwrap();
    assert_eq!(paths(&hits), ["", "/z/m", "/a/0", "/a/1/x"]);
}

#[rstest]
fn test_escaped_segments_address_literal_keys() {
    let doc: Node = r#"{"a/b":{"~":1}}"#.parse().unwrap();
    assert_eq!(doc.get_value("/a~1b/~0").unwrap().get(), "1");

    let hits = doc.find_children(&[predicate("/~0", json!(1))]).unwrap();
    assert_eq!(paths(&hits), ["/a~1b"]);
}

#[rstest]
fn test_negative_indices_behind_option() {
    let doc: Node = r#"{"c":[{"b":1},{"b":2}]}"#.parse().unwrap();
    let options = Options {
        support_negative_indices: true,
        ..Options::new()
    };
    assert_eq!(
        doc.get_value_with_options("/c/-1/b", &options).unwrap().get(),
        "2"
    );
    assert_eq!(
        get_value_by_path_with_options(br#"{"c":[{"b":1},{"b":2}]}"#, "/c/-1/b", &options)
            .unwrap()
            .get(),
        "2"
    );
    assert!(matches!(
        doc.get_value("/c/-1/b"),
        Err(Error::InvalidIndex(_))
    ));
}

#[rstest]
fn test_case_insensitive_keys_behind_option() {
    let doc: Node = r#"{"User":{"Name":"amy"}}"#.parse().unwrap();
    let options = Options {
        case_insensitive_keys: true,
        ..Options::new()
    };
    assert_eq!(
        doc.get_value_with_options("/user/name", &options)
            .unwrap()
            .get(),
        r#""amy""#
    );
    assert_eq!(
        doc.get_value("/user/name").unwrap_err(),
        Error::Missing("/user/name".to_string())
    );
}

#[rstest]
fn test_find_children_with_options_matches_case_insensitively() {
    let doc: Node = r#"{"a":{"Name":"amy"},"b":{"name":"amy"},"c":{"name":"bob"}}"#
        .parse()
        .unwrap();
    let options = Options {
        case_insensitive_keys: true,
        ..Options::new()
    };

    let hits = doc
        .find_children_with_options(&[predicate("/name", json!("amy"))], &options)
        .unwrap();
    assert_eq!(paths(&hits), ["/a", "/b"]);

    let exact = doc
        .find_children(&[predicate("/name", json!("amy"))])
        .unwrap();
    assert_eq!(paths(&exact), ["/b"]);
}

#[rstest]
fn test_find_children_with_options_accepts_negative_index_predicates() {
    let doc: Node = r#"{"lists":{"a":[1,2,3],"b":[3,1]}}"#.parse().unwrap();
    let options = Options {
        support_negative_indices: true,
        ..Options::new()
    };

    let hits = doc
        .find_children_with_options(&[predicate("/-1", json!(3))], &options)
        .unwrap();
    assert_eq!(paths(&hits), ["/lists/a"]);

    let without = doc.find_children(&[predicate("/-1", json!(3))]).unwrap();
    assert!(without.is_empty());
}

#[rstest]
fn test_predicates_deserialize_from_wire_shape(doc: Node) {
    let predicates: Vec<PathValue> =
        serde_json::from_str(r#"[{"path":"/b","value":1}]"#).unwrap();
    let hits = doc.find_children(&predicates).unwrap();
    assert_eq!(paths(&hits), ["/a", "/c/0"]);
    assert_eq!(
        serde_json::to_string(&hits[0]).unwrap(),
        r#"{"path":"/a","value":{"b":1}}"#
    );
}

#[rstest]
fn test_scalar_document() {
    let scalar: Node = "5".parse().unwrap();
    assert!(
        scalar
            .find_children(&[predicate("/a", json!(null))])
            .unwrap()
            .is_empty()
    );
    assert!(matches!(
        scalar.get_child("/a"),
        Err(Error::NotAContainer(_))
    ));
}
