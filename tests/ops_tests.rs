//! Integration tests for sequencing ops and labelling failures.

use yamlpatch::document::node::Node;
use yamlpatch::document::parser::parse_yaml;
use yamlpatch::patch::{
    DescriptiveOp, ErrOp, FindOp, Op, Ops, PatchError, RemoveOp, ReplaceOp, TestOp,
};
use yamlpatch::pointer::Pointer;

fn yaml(text: &str) -> Node {
    parse_yaml(text).unwrap()
}

fn path(text: &str) -> Pointer {
    Pointer::parse(text).unwrap()
}

#[test]
fn test_ops_fold_over_document() {
    let ops: Ops = vec![
        Op::from(ReplaceOp::new(path("/jobs?/-"), "web")),
        Op::from(ReplaceOp::new(path("/jobs/-"), "db")),
        Op::from(ReplaceOp::new(path("/jobs/0:before"), "proxy")),
        Op::from(RemoveOp::new(path("/jobs/-1"))),
        Op::from(TestOp::absent(path("/jobs/2"))),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        ops.apply(&Node::empty_mapping()),
        Ok(yaml("jobs: [proxy, web]"))
    );
}

#[test]
fn test_ops_first_error_wins() {
    let doc = yaml("a: 1");
    let ops: Ops = vec![
        Op::from(ReplaceOp::new(path("/a"), 2)),
        Op::from(RemoveOp::new(path("/missing"))),
        Op::from(ErrOp::new(PatchError::RemoveRoot)),
    ]
    .into();

    let err = ops.apply(&doc).unwrap_err();
    assert!(matches!(err, PatchError::MissingMapKey { ref key, .. } if key == "missing"));
    assert_eq!(doc, yaml("a: 1"));
}

#[test]
fn test_find_as_op_returns_the_found_value() {
    let op = Op::from(FindOp::new(path("/a/0")));
    assert_eq!(op.apply(&yaml("a: [x]")), Ok(Node::from("x")));
}

#[test]
fn test_descriptive_label_is_prefixed() {
    let op = DescriptiveOp::new(
        RemoveOp::new(path("/abc")).into(),
        "operation [3] in ops.yml failed",
    );
    let err = Op::from(op).apply(&Node::empty_mapping()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error 'operation [3] in ops.yml failed': Expected to find a map key 'abc' for path '/abc' (found no other map keys)"
    );
}

#[test]
fn test_err_op_always_fails() {
    let op = ErrOp::new(PatchError::RemoveRoot);
    assert_eq!(op.apply(&Node::null()), Err(PatchError::RemoveRoot));
    assert_eq!(op.apply(&yaml("a: 1")), Err(PatchError::RemoveRoot));
}

#[test]
fn test_ops_extend_and_iterate() {
    let mut ops = Ops::new();
    ops.push(RemoveOp::new(path("/a")));
    ops.extend(vec![Op::from(RemoveOp::new(path("/b")))]);

    let names: Vec<_> = ops.iter().map(Op::name).collect();
    assert_eq!(names, vec!["remove", "remove"]);
    assert_eq!(ops.apply(&yaml("a: 1\nb: 2\nc: 3")), Ok(yaml("c: 3")));
}
