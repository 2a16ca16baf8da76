//! Output formatting for CLI display
//!
//! This module provides utilities for formatting output in the CLI:
//! item lines, option values and indented group trees.

use crate::group::{CompactTree, GroupTree, NodeData, NodeId, Segment, TreeOutput};
use crate::model::{Scalar, TaggedItem};
use colored::Colorize;

const INDENT: &str = "  ";

/// Format an item with its tags for display
#[must_use]
pub fn item_line(item: &TaggedItem, quiet: bool) -> String {
    let id = item.id.to_string();

    if quiet {
        id
    } else if item.tags.is_empty() {
        format!("  {id} (no tags)")
    } else {
        let tags: Vec<String> = item
            .tags
            .iter()
            .map(|(tag, value)| format!("{}={value}", tag.cyan()))
            .collect();
        format!("  {} [{}]", id.bold(), tags.join(", "))
    }
}

/// Format an option value for display
#[must_use]
pub fn option_line(value: &Scalar, quiet: bool) -> String {
    if quiet {
        value.to_string()
    } else {
        format!("  {}", value.to_string().green())
    }
}

/// Format a branch label, dimming the missing-value placeholder
#[must_use]
pub fn branch_label(segment: &Segment, leaves: usize, quiet: bool) -> String {
    let label = match segment {
        Segment::Value(value) => value.to_string().bold().to_string(),
        Segment::Missing => segment.to_string().dimmed().to_string(),
    };

    if quiet {
        label
    } else {
        format!("{label} ({leaves})")
    }
}

/// Render a group tree as indented lines, one per branch and leaf
#[must_use]
pub fn tree_lines(output: &TreeOutput, quiet: bool) -> Vec<String> {
    let mut lines = Vec::new();
    match output {
        TreeOutput::Nodes(tree) => {
            for child in tree.children(tree.root()) {
                node_lines(tree, *child, 0, quiet, &mut lines);
            }
        }
        TreeOutput::Compact(tree) => compact_lines(tree, 0, quiet, &mut lines),
    }
    lines
}

fn node_lines(tree: &GroupTree, id: NodeId, depth: usize, quiet: bool, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    match tree.data(id) {
        NodeData::Root => {}
        NodeData::Branch(segment) => {
            let leaves = subtree_leaves(tree, id);
            lines.push(format!("{indent}{}", branch_label(segment, leaves, quiet)));
            for child in tree.children(id) {
                node_lines(tree, *child, depth + 1, quiet, lines);
            }
        }
        NodeData::Leaf(_) => {
            if let Some(item) = tree.item(id) {
                lines.push(format!("{indent}{}", leaf_label(item, quiet)));
            }
        }
    }
}

fn subtree_leaves(tree: &GroupTree, id: NodeId) -> usize {
    tree.children(id)
        .iter()
        .map(|child| match tree.data(*child) {
            NodeData::Leaf(_) => 1,
            _ => subtree_leaves(tree, *child),
        })
        .sum()
}

fn compact_lines(tree: &CompactTree, depth: usize, quiet: bool, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    match tree {
        CompactTree::Branches(branches) => {
            for (segment, subtree) in branches {
                lines.push(format!("{indent}{}", branch_label(segment, subtree.leaf_count(), quiet)));
                compact_lines(subtree, depth + 1, quiet, lines);
            }
        }
        CompactTree::Leaves(items) => {
            for item in items {
                lines.push(format!("{indent}{}", leaf_label(item, quiet)));
            }
        }
    }
}

fn leaf_label(item: &TaggedItem, quiet: bool) -> String {
    if quiet {
        item.id.to_string()
    } else {
        format!("- {}", item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{GroupEngine, TreeConfig};
    use crate::model::Filter;
    use crate::testing::category_items;

    #[test]
    fn test_item_line_quiet() {
        let item = TaggedItem::new(3).with_tag("category", 1);
        assert_eq!(item_line(&item, true), "3");
    }

    #[test]
    fn test_item_line_without_tags() {
        colored::control::set_override(false);
        assert_eq!(item_line(&TaggedItem::new("a"), false), "  a (no tags)");
    }

    #[test]
    fn test_option_line_quiet() {
        assert_eq!(option_line(&Scalar::from("Peru"), true), "Peru");
    }

    #[test]
    fn test_tree_lines_quiet_compact() {
        colored::control::set_override(false);
        let engine = GroupEngine::new(category_items());
        let output = engine
            .build_group_tree(&["category"], Filter::any().with_tag("category", 2), TreeConfig::compact())
            .unwrap();

        assert_eq!(tree_lines(&output, true), vec!["2", "  4", "  5"]);
    }

    #[test]
    fn test_tree_lines_both_shapes_agree() {
        colored::control::set_override(false);
        let engine = GroupEngine::new(category_items());
        let order = ["category", "sub-category"];

        let nodes = engine.build_group_tree(&order, None::<Filter>, TreeConfig::default()).unwrap();
        let compact = engine.build_group_tree(&order, None::<Filter>, TreeConfig::compact()).unwrap();

        let lines = tree_lines(&nodes, false);
        assert_eq!(lines, tree_lines(&compact, false));
        assert_eq!(lines[0], "1 (3)");
        assert_eq!(lines[1], "  5 (2)");
        assert_eq!(lines[2], "    - 1");
    }
}
