//! Unit tests for tree folding and output shapes

use super::*;
use crate::group::path::flatten;
use crate::model::Scalar;
use serde_json::json;

fn seg<S: Into<Segment>>(s: S) -> Segment {
    s.into()
}

fn category_items() -> Vec<TaggedItem> {
    [(1, 1, 5), (2, 1, 5), (3, 1, 4), (4, 2, 3), (5, 2, 3), (6, 3, 2), (7, 3, 1)]
        .into_iter()
        .map(|(id, category, sub)| {
            TaggedItem::new(id)
                .with_tag("category", category)
                .with_tag("sub-category", sub)
        })
        .collect()
}

fn fold_categories() -> GroupTree {
    let items = category_items();
    let paths = flatten(&items, &["category", "sub-category"]);
    GroupTree::fold(items, paths)
}

#[test]
fn test_sibling_order_is_first_occurrence() {
    let tree = fold_categories();
    let root = tree.root();

    assert_eq!(tree.child_keys(root), vec![seg(1), seg(2), seg(3)]);

    let one = tree.child(root, &seg(1)).unwrap();
    let two = tree.child(root, &seg(2)).unwrap();
    let three = tree.child(root, &seg(3)).unwrap();
    assert_eq!(tree.child_keys(one), vec![seg(5), seg(4)]);
    assert_eq!(tree.child_keys(two), vec![seg(3)]);
    assert_eq!(tree.child_keys(three), vec![seg(2), seg(1)]);
}

#[test]
fn test_leaves_accumulate_in_order() {
    let tree = fold_categories();
    let node = tree.find(&[seg(1), seg(5)]).unwrap();

    let ids: Vec<&Scalar> = tree.leaves(node).into_iter().map(|item| &item.id).collect();
    assert_eq!(ids, vec![&Scalar::from(1), &Scalar::from(2)]);

    let first_leaf = tree.children(node)[0];
    assert_eq!(tree.item(first_leaf).map(|item| &item.id), Some(&Scalar::from(1)));
    assert!(tree.child_keys(node).is_empty());
}

#[test]
fn test_node_data() {
    let tree = fold_categories();
    assert_eq!(tree.data(tree.root()), &NodeData::Root);

    let one = tree.child(tree.root(), &seg(1)).unwrap();
    assert_eq!(tree.data(one), &NodeData::Branch(seg(1)));
    assert_eq!(tree.segment(one), Some(&seg(1)));
    assert!(tree.item(one).is_none());
}

#[test]
fn test_find_unknown_path() {
    let tree = fold_categories();
    assert!(tree.find(&[seg(9)]).is_none());
    assert!(tree.find(&[seg(1), seg(3)]).is_none());
    assert_eq!(tree.find(&[]), Some(tree.root()));
}

#[test]
fn test_leaf_count() {
    let tree = fold_categories();
    assert_eq!(tree.leaf_count(), 7);
    assert_eq!(tree.items().len(), 7);
}

#[test]
fn test_same_item_under_several_branches() {
    let items = vec![
        TaggedItem::new("Titicaca Lake")
            .with_added("category", "Lakes of Peru")
            .with_added("category", "Lakes of Bolivia"),
    ];
    let paths = flatten(&items, &["category"]);
    let tree = GroupTree::fold(items, paths);

    assert_eq!(
        tree.child_keys(tree.root()),
        vec![seg("Lakes of Peru"), seg("Lakes of Bolivia")]
    );
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.items().len(), 1);
}

#[test]
fn test_empty_tree() {
    let tree = GroupTree::fold(Vec::new(), Vec::new());
    assert!(tree.is_empty());
    assert!(tree.child_keys(tree.root()).is_empty());
    assert_eq!(tree.leaf_count(), 0);
}

#[test]
fn test_into_compact() {
    let compact = fold_categories().into_compact();

    assert_eq!(compact.keys(), vec![seg(1), seg(2), seg(3)]);
    assert_eq!(compact.get(&seg(1)).unwrap().keys(), vec![seg(5), seg(4)]);
    assert_eq!(compact.get(&seg(2)).unwrap().keys(), vec![seg(3)]);
    assert_eq!(compact.get(&seg(3)).unwrap().keys(), vec![seg(2), seg(1)]);

    let leaves = compact.get(&seg(1)).unwrap().get(&seg(5)).unwrap();
    assert_eq!(leaves.items().len(), 2);
    assert_eq!(leaves.items()[1].id, Scalar::from(2));
    assert_eq!(compact.leaf_count(), 7);
}

#[test]
fn test_compact_without_tag_order_holds_items_at_root() {
    let items = category_items();
    let order: [&str; 0] = [];
    let paths = flatten(&items, &order);
    let compact = GroupTree::fold(items, paths).into_compact();

    assert!(compact.keys().is_empty());
    assert_eq!(compact.items().len(), 7);
}

#[test]
fn test_serialize_node_shape() {
    let items = vec![TaggedItem::new(1).with_tag("category", 1)];
    let paths = flatten(&items, &["category"]);
    let tree = GroupTree::fold(items, paths);

    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "data": null,
            "children": {
                "1": {
                    "data": {"id": 1},
                    "children": [
                        {"data": {"id": 1, "tags": {"category": 1}}, "children": {}}
                    ]
                }
            }
        })
    );
}

#[test]
fn test_serialize_compact_shape() {
    let items = vec![
        TaggedItem::new("a").with_tag("color", "red"),
        TaggedItem::new("b"),
    ];
    let paths = flatten(&items, &["color"]);
    let compact = GroupTree::fold(items, paths).into_compact();

    assert_eq!(
        serde_json::to_value(&compact).unwrap(),
        json!({
            "red": [{"id": "a", "tags": {"color": "red"}}],
            "null": [{"id": "b", "tags": {}}]
        })
    );
}

#[test]
fn test_depth_follows_tag_order() {
    assert_eq!(fold_categories().depth(), 2);
    assert_eq!(GroupTree::fold(Vec::new(), Vec::new()).depth(), 0);

    let items = vec![TaggedItem::new(1)];
    let paths = flatten(&items, &[] as &[&str]);
    assert_eq!(GroupTree::fold(items, paths).depth(), 0);
}

#[test]
fn test_number_and_numeric_text_share_a_branch() {
    let items = vec![
        TaggedItem::new(1).with_tag("category", 1),
        TaggedItem::new(2).with_tag("category", "1"),
        TaggedItem::new(3).with_tag("category", "null"),
        TaggedItem::new(4),
    ];
    let paths = flatten(&items, &["category"]);
    let tree = GroupTree::fold(items, paths);

    assert_eq!(tree.child_keys(tree.root()), vec![seg(1), seg("null")]);
    let branch = tree.find(&[seg("1")]).unwrap();
    assert_eq!(tree.leaves(branch).len(), 2);
    assert_eq!(tree.find(&[Segment::Missing]), tree.find(&[seg("null")]));

    let nodes = serde_json::to_value(&tree).unwrap();
    assert_eq!(nodes["children"]["1"]["children"].as_array().unwrap().len(), 2);

    let compact = tree.into_compact();
    assert_eq!(compact.leaf_count(), 4);
    let value = serde_json::to_value(&compact).unwrap();
    assert_eq!(value["1"].as_array().unwrap().len(), 2);
    assert_eq!(value["null"].as_array().unwrap().len(), 2);
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn test_tree_config_from_json() {
    assert_eq!(TreeConfig::from_json(&json!(null)).unwrap(), TreeConfig::default());
    assert_eq!(
        TreeConfig::from_json(&json!({"storeNodeValuesAsArrayKeys": true})).unwrap(),
        TreeConfig::compact()
    );
    assert_eq!(
        TreeConfig::from_json(&json!({"somethingNew": 1, "storeNodeValuesAsArrayKeys": "yes"})).unwrap(),
        TreeConfig::default()
    );
    assert!(matches!(
        TreeConfig::from_json(&json!([true])),
        Err(GroupError::InvalidArgument(_))
    ));
}

#[test]
fn test_tree_config_inputs() {
    assert!(None::<TreeConfig>.into_tree_config().unwrap() == TreeConfig::default());
    assert!(
        r#"{"storeNodeValuesAsArrayKeys": true}"#
            .into_tree_config()
            .unwrap()
            .store_node_values_as_array_keys
    );
    assert!("not json".into_tree_config().is_err());
}

#[test]
fn test_tree_config_deserialize_camel_case() {
    let config: TreeConfig = serde_json::from_str(r#"{"storeNodeValuesAsArrayKeys": true, "other": 3}"#).unwrap();
    assert_eq!(config, TreeConfig::compact());
}

#[test]
fn test_tree_output_shape() {
    let output = TreeOutput::shaped(fold_categories(), TreeConfig::compact());
    assert!(output.as_compact().is_some());
    assert!(output.as_nodes().is_none());
    assert_eq!(output.leaf_count(), 7);

    let output = TreeOutput::shaped(fold_categories(), TreeConfig::default());
    assert!(output.as_nodes().is_some());
}
