//! Conversion between schema types and runtime types.

use crate::error::MalformedModelError;
use crate::repr::{ForestModel, Node, NodeId, Tree, TreeValidationError};

use super::schema::{
    ModelSchema, NodeSchema, NodeValueSchema, LEAF_FEATURE_INDEX, LEAF_THRESHOLD, NO_CHILD,
};

impl TryFrom<ModelSchema> for ForestModel {
    type Error = MalformedModelError;

    /// Convert and fully validate a parsed model file.
    fn try_from(schema: ModelSchema) -> Result<Self, Self::Error> {
        if let Some(n_classes) = schema.n_classes {
            if n_classes != schema.target_names.len() {
                return Err(MalformedModelError::ClassCountMismatch {
                    n_classes,
                    n_target_names: schema.target_names.len(),
                });
            }
        }

        let trees = schema
            .forest
            .into_iter()
            .enumerate()
            .map(|(i, nodes)| {
                convert_tree(nodes).map_err(|error| MalformedModelError::InvalidTree { tree: i, error })
            })
            .collect::<Result<Vec<_>, _>>()?;

        ForestModel::new(schema.feature_names, schema.target_names, trees)
    }
}

impl From<&ForestModel> for ModelSchema {
    fn from(model: &ForestModel) -> Self {
        let forest = model
            .trees()
            .iter()
            .map(|tree| tree.nodes().iter().map(node_to_schema).collect())
            .collect();

        ModelSchema {
            feature_names: model.feature_names().to_vec(),
            target_names: model.target_names().to_vec(),
            n_classes: Some(model.n_classes()),
            forest,
        }
    }
}

fn convert_tree(nodes: Vec<NodeSchema>) -> Result<Tree, TreeValidationError> {
    let n_nodes = nodes.len();
    let nodes = nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| convert_node(i as NodeId, node, n_nodes))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Tree::new(nodes))
}

fn convert_node(id: NodeId, node: NodeSchema, n_nodes: usize) -> Result<Node, TreeValidationError> {
    match node.feature_index {
        LEAF_FEATURE_INDEX => {
            let value = match node.value {
                NodeValueSchema::Flat(value) => value,
                NodeValueSchema::Nested(mut rows) => {
                    if rows.len() != 1 {
                        return Err(TreeValidationError::MultiOutputLeaf {
                            node: id,
                            rows: rows.len(),
                        });
                    }
                    rows.swap_remove(0)
                }
            };
            Ok(Node::leaf(value))
        }
        feature => {
            let feature = u32::try_from(feature)
                .map_err(|_| TreeValidationError::InvalidFeatureIndex { node: id, feature })?;
            let left = child_id(id, "left", node.children_left, n_nodes)?;
            let right = child_id(id, "right", node.children_right, n_nodes)?;
            Ok(Node::split(feature, node.threshold, left, right))
        }
    }
}

fn child_id(node: NodeId, side: &'static str, child: i64, n_nodes: usize) -> Result<NodeId, TreeValidationError> {
    match usize::try_from(child) {
        Ok(c) if c < n_nodes => Ok(c as NodeId),
        _ => Err(TreeValidationError::ChildOutOfBounds {
            node,
            side,
            child,
            n_nodes,
        }),
    }
}

fn node_to_schema(node: &Node) -> NodeSchema {
    match node {
        Node::Split {
            feature,
            threshold,
            left,
            right,
        } => NodeSchema {
            feature_index: i64::from(*feature),
            threshold: *threshold,
            children_left: i64::from(*left),
            children_right: i64::from(*right),
            value: NodeValueSchema::default(),
        },
        Node::Leaf { value } => NodeSchema {
            feature_index: LEAF_FEATURE_INDEX,
            threshold: LEAF_THRESHOLD,
            children_left: NO_CHILD,
            children_right: NO_CHILD,
            value: NodeValueSchema::Flat(value.to_vec()),
        },
    }
}
