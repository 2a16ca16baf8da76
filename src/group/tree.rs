//! Group trees
//!
//! Folding the flat paths of every matching item produces a tree whose depth
//! is the length of the tag order plus one leaf level. Branch nodes are keyed
//! by path segment; leaves hold the originating items.
//!
//! # Layout
//!
//! [`GroupTree`] is an arena: nodes live in one vector and refer to their
//! children by [`NodeId`]. Folding a path walks from the root, looking up or
//! creating one branch per segment, then appends a leaf at the terminal node.
//! Children keep their insertion order, which is the order of first
//! occurrence across the item scan. Siblings are keyed by their rendered
//! segment, so `1` and `"1"` share one branch and the serialized objects
//! never repeat a key.
//!
//! Two output shapes exist, chosen by [`TreeConfig`]:
//!
//! - [`GroupTree`]: nodes with `data` and ordered `children`
//! - [`CompactTree`]: plain key → child mappings, leaves appended
//!   positionally under their parent

use super::error::GroupError;
use super::path::{Segment, TagPath};
use crate::model::TaggedItem;
use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Tree configuration
///
/// Serialized keys are camelCase; unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeConfig {
    /// Produce a [`CompactTree`] instead of a [`GroupTree`]
    pub store_node_values_as_array_keys: bool,
}

impl TreeConfig {
    /// Compact output shape
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            store_node_values_as_array_keys: true,
        }
    }

    /// Normalize a JSON document into a configuration
    ///
    /// `null` gives the defaults. A `storeNodeValuesAsArrayKeys` entry that is
    /// not a boolean counts as `false`, like any unknown key it does not abort
    /// the call.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` if the document is neither `null`
    /// nor an object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, GroupError> {
        match value {
            serde_json::Value::Null => Ok(Self::default()),
            serde_json::Value::Object(object) => Ok(Self {
                store_node_values_as_array_keys: object
                    .get("storeNodeValuesAsArrayKeys")
                    .and_then(serde_json::Value::as_bool)
                    .unwrap_or(false),
            }),
            other => Err(GroupError::InvalidArgument(format!(
                "tree configuration must be an object or null, found {other}"
            ))),
        }
    }
}

/// Conversion of accepted tree configuration shapes into [`TreeConfig`]
pub trait IntoTreeConfig {
    /// Normalize into a configuration
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` when the input has the wrong shape.
    fn into_tree_config(self) -> Result<TreeConfig, GroupError>;
}

impl IntoTreeConfig for TreeConfig {
    fn into_tree_config(self) -> Result<TreeConfig, GroupError> {
        Ok(self)
    }
}

impl IntoTreeConfig for Option<TreeConfig> {
    fn into_tree_config(self) -> Result<TreeConfig, GroupError> {
        Ok(self.unwrap_or_default())
    }
}

impl IntoTreeConfig for &serde_json::Value {
    fn into_tree_config(self) -> Result<TreeConfig, GroupError> {
        TreeConfig::from_json(self)
    }
}

impl IntoTreeConfig for serde_json::Value {
    fn into_tree_config(self) -> Result<TreeConfig, GroupError> {
        TreeConfig::from_json(&self)
    }
}

/// JSON text
impl IntoTreeConfig for &str {
    fn into_tree_config(self) -> Result<TreeConfig, GroupError> {
        let value: serde_json::Value = serde_json::from_str(self).map_err(|e| {
            GroupError::InvalidArgument(format!("tree configuration is not valid JSON: {e}"))
        })?;
        TreeConfig::from_json(&value)
    }
}

/// Index of a node in a [`GroupTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The root carries nothing
    Root,
    /// Inner node reached through this segment
    Branch(Segment),
    /// Leaf holding the item at this index of [`GroupTree::items`]
    Leaf(usize),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    children: Vec<NodeId>,
    branches: HashMap<String, NodeId>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            children: Vec::new(),
            branches: HashMap::new(),
        }
    }
}

/// Tree of `{ data, children }` nodes
#[derive(Debug, Clone)]
pub struct GroupTree {
    nodes: Vec<Node>,
    items: Vec<TaggedItem>,
}

impl GroupTree {
    /// Fold `(item index, path)` pairs over `items` into a tree
    ///
    /// Pairs are folded in order, so sibling order is the order in which each
    /// key first appears, and leaves under one node keep the order of their
    /// pairs. Pairs referring to an index outside `items` are skipped.
    #[must_use]
    pub(crate) fn fold(items: Vec<TaggedItem>, paths: Vec<(usize, TagPath)>) -> Self {
        let mut tree = Self {
            nodes: vec![Node::new(NodeData::Root)],
            items,
        };

        for (index, path) in paths {
            if index >= tree.items.len() {
                continue;
            }
            let mut current = tree.root();
            for segment in path {
                current = tree.branch_or_insert(current, segment);
            }
            tree.push_node(current, NodeData::Leaf(index));
        }

        tree
    }

    fn push_node(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        self.nodes[parent.0].children.push(id);
        id
    }

    fn branch_or_insert(&mut self, parent: NodeId, segment: Segment) -> NodeId {
        let key = segment.key();
        if let Some(&existing) = self.nodes[parent.0].branches.get(&key) {
            return existing;
        }
        let id = self.push_node(parent, NodeData::Branch(segment));
        self.nodes[parent.0].branches.insert(key, id);
        id
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Payload of a node
    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Item held by a leaf, `None` for root and branches
    #[must_use]
    pub fn item(&self, id: NodeId) -> Option<&TaggedItem> {
        match self.data(id) {
            NodeData::Leaf(index) => self.items.get(*index),
            _ => None,
        }
    }

    /// Segment of a branch node
    #[must_use]
    pub fn segment(&self, id: NodeId) -> Option<&Segment> {
        match self.data(id) {
            NodeData::Branch(segment) => Some(segment),
            _ => None,
        }
    }

    /// Children in insertion order
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Branch child reached through `segment`, or any segment rendering alike
    #[must_use]
    pub fn child(&self, id: NodeId, segment: &Segment) -> Option<NodeId> {
        self.nodes[id.0].branches.get(&segment.key()).copied()
    }

    /// Segments of the branch children, in insertion order
    #[must_use]
    pub fn child_keys(&self, id: NodeId) -> Vec<Segment> {
        self.children(id)
            .iter()
            .filter_map(|child| self.segment(*child).cloned())
            .collect()
    }

    /// Follow a path of segments from the root
    #[must_use]
    pub fn find(&self, path: &[Segment]) -> Option<NodeId> {
        path.iter()
            .try_fold(self.root(), |node, segment| self.child(node, segment))
    }

    /// Items of the leaf children of a node, in insertion order
    #[must_use]
    pub fn leaves(&self, id: NodeId) -> Vec<&TaggedItem> {
        self.children(id)
            .iter()
            .filter_map(|child| self.item(*child))
            .collect()
    }

    /// Total number of leaves
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node.data, NodeData::Leaf(_)))
            .count()
    }

    /// Number of branch levels above the leaves
    #[must_use]
    pub fn depth(&self) -> usize {
        self.branch_depth(self.root())
    }

    fn branch_depth(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .filter(|child| self.segment(**child).is_some())
            .map(|child| 1 + self.branch_depth(*child))
            .max()
            .unwrap_or(0)
    }

    /// Whether the root has no children
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// The matching items the leaves refer to
    #[must_use]
    pub fn items(&self) -> &[TaggedItem] {
        &self.items
    }

    /// Convert into the compact shape
    #[must_use]
    pub fn into_compact(self) -> CompactTree {
        self.compact_node(self.root())
    }

    fn compact_node(&self, id: NodeId) -> CompactTree {
        let children = self.children(id);
        let has_leaves = children
            .iter()
            .any(|child| matches!(self.data(*child), NodeData::Leaf(_)));

        if has_leaves {
            return CompactTree::Leaves(self.leaves(id).into_iter().cloned().collect());
        }

        CompactTree::Branches(
            children
                .iter()
                .filter_map(|child| {
                    self.segment(*child)
                        .map(|segment| (segment.clone(), self.compact_node(*child)))
                })
                .collect(),
        )
    }

    fn serialize_node<S: Serializer>(&self, id: NodeId, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Node", 2)?;
        match self.data(id) {
            NodeData::Root => node.serialize_field("data", &None::<()>)?,
            NodeData::Branch(segment) => node.serialize_field("data", &BranchData { id: segment })?,
            NodeData::Leaf(index) => node.serialize_field("data", &self.items[*index])?,
        }
        node.serialize_field("children", &ChildrenView { tree: self, id })?;
        node.end()
    }
}

#[derive(Serialize)]
struct BranchData<'a> {
    id: &'a Segment,
}

struct NodeView<'a> {
    tree: &'a GroupTree,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tree.serialize_node(self.id, serializer)
    }
}

/// Branch children as an object keyed by segment, leaves as an array
struct ChildrenView<'a> {
    tree: &'a GroupTree,
    id: NodeId,
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = self.tree.children(self.id);
        let leaf_level = children.iter().any(|child| self.tree.item(*child).is_some());

        if leaf_level {
            let mut seq = serializer.serialize_seq(Some(children.len()))?;
            for child in children {
                seq.serialize_element(&NodeView { tree: self.tree, id: *child })?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(children.len()))?;
            for child in children {
                if let Some(segment) = self.tree.segment(*child) {
                    map.serialize_entry(&segment.key(), &NodeView { tree: self.tree, id: *child })?;
                }
            }
            map.end()
        }
    }
}

impl Serialize for GroupTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize_node(self.root(), serializer)
    }
}

/// Tree of plain mappings
///
/// Inner levels map segments to subtrees; the last level holds the items
/// themselves, appended in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompactTree {
    /// Subtrees keyed by segment, in insertion order
    Branches(Vec<(Segment, CompactTree)>),
    /// Items appended positionally
    Leaves(Vec<TaggedItem>),
}

impl CompactTree {
    /// Keys of this level, in insertion order (empty at the leaf level)
    #[must_use]
    pub fn keys(&self) -> Vec<Segment> {
        match self {
            Self::Branches(branches) => branches.iter().map(|(key, _)| key.clone()).collect(),
            Self::Leaves(_) => Vec::new(),
        }
    }

    /// Subtree under `key`, matched on the rendered key
    #[must_use]
    pub fn get(&self, key: &Segment) -> Option<&Self> {
        let key = key.key();
        match self {
            Self::Branches(branches) => branches.iter().find(|(k, _)| k.key() == key).map(|(_, v)| v),
            Self::Leaves(_) => None,
        }
    }

    /// Items of this level (empty above the leaf level)
    #[must_use]
    pub fn items(&self) -> &[TaggedItem] {
        match self {
            Self::Branches(_) => &[],
            Self::Leaves(items) => items,
        }
    }

    /// Total number of leaves below this level
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Branches(branches) => branches.iter().map(|(_, sub)| sub.leaf_count()).sum(),
            Self::Leaves(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Branches(branches) => branches.is_empty(),
            Self::Leaves(items) => items.is_empty(),
        }
    }
}

impl Serialize for CompactTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Branches(branches) => {
                let mut map = serializer.serialize_map(Some(branches.len()))?;
                for (key, sub) in branches {
                    map.serialize_entry(&key.key(), sub)?;
                }
                map.end()
            }
            Self::Leaves(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Result of building a group tree, in the configured shape
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TreeOutput {
    Nodes(GroupTree),
    Compact(CompactTree),
}

impl TreeOutput {
    /// Shape the folded tree according to `config`
    #[must_use]
    pub fn shaped(tree: GroupTree, config: TreeConfig) -> Self {
        if config.store_node_values_as_array_keys {
            Self::Compact(tree.into_compact())
        } else {
            Self::Nodes(tree)
        }
    }

    /// The node-shaped tree, if this output has that shape
    #[must_use]
    pub const fn as_nodes(&self) -> Option<&GroupTree> {
        match self {
            Self::Nodes(tree) => Some(tree),
            Self::Compact(_) => None,
        }
    }

    /// The compact tree, if this output has that shape
    #[must_use]
    pub const fn as_compact(&self) -> Option<&CompactTree> {
        match self {
            Self::Compact(tree) => Some(tree),
            Self::Nodes(_) => None,
        }
    }

    /// Total number of leaves
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Nodes(tree) => tree.leaf_count(),
            Self::Compact(tree) => tree.leaf_count(),
        }
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
