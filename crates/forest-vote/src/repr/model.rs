//! Forest model: feature names, class names and trees.

use crate::error::MalformedModelError;

use super::tree::Tree;

/// A decision-forest classifier.
///
/// Immutable once built. [`ForestModel::new`] validates every tree against the
/// feature and class counts, so predictions on a model built that way can
/// only fail on bad input.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestModel {
    feature_names: Vec<String>,
    target_names: Vec<String>,
    trees: Vec<Tree>,
}

impl ForestModel {
    /// Build and validate a model.
    pub fn new(
        feature_names: Vec<String>,
        target_names: Vec<String>,
        trees: Vec<Tree>,
    ) -> Result<Self, MalformedModelError> {
        let model = Self::from_parts_unchecked(feature_names, target_names, trees);
        model.validate()?;
        Ok(model)
    }

    /// Build a model without validation.
    ///
    /// Predictions still guard against broken trees (out-of-range children,
    /// cycles, wrong leaf widths) and report them as
    /// [`PredictError::MalformedModel`](crate::PredictError::MalformedModel).
    pub fn from_parts_unchecked(
        feature_names: Vec<String>,
        target_names: Vec<String>,
        trees: Vec<Tree>,
    ) -> Self {
        Self {
            feature_names,
            target_names,
            trees,
        }
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.target_names.len()
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    #[inline]
    pub fn target_names(&self) -> &[String] {
        &self.target_names
    }

    /// Class name for an index.
    #[inline]
    pub fn target_name(&self, class: usize) -> Option<&str> {
        self.target_names.get(class).map(String::as_str)
    }

    #[inline]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Validate class count, forest size and every tree.
    pub fn validate(&self) -> Result<(), MalformedModelError> {
        if self.target_names.is_empty() {
            return Err(MalformedModelError::NoClasses);
        }
        if self.trees.is_empty() {
            return Err(MalformedModelError::EmptyForest);
        }

        let n_features = self.n_features();
        let n_classes = self.n_classes();
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features, n_classes)
                .map_err(|error| MalformedModelError::InvalidTree { tree: i, error })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::TreeValidationError;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accessors() {
        let model = crate::testing::iris_model();
        assert_eq!(model.n_features(), 4);
        assert_eq!(model.n_classes(), 3);
        assert_eq!(model.n_trees(), 3);
        assert_eq!(model.target_name(2), Some("virginica"));
        assert_eq!(model.target_name(3), None);
    }

    #[test]
    fn rejects_empty_forest() {
        let err = ForestModel::new(names(&["x"]), names(&["a"]), Vec::new()).unwrap_err();
        assert_eq!(err, MalformedModelError::EmptyForest);
    }

    #[test]
    fn rejects_no_classes() {
        let tree = crate::forest_tree! { 0 => leaf[] };
        let err = ForestModel::new(names(&["x"]), Vec::new(), vec![tree]).unwrap_err();
        assert_eq!(err, MalformedModelError::NoClasses);
    }

    #[test]
    fn reports_tree_index() {
        let good = crate::forest_tree! { 0 => leaf[1.0, 0.0] };
        let bad = crate::forest_tree! { 0 => leaf[1.0] };
        let err = ForestModel::new(names(&["x"]), names(&["a", "b"]), vec![good, bad]).unwrap_err();
        assert_eq!(
            err,
            MalformedModelError::InvalidTree {
                tree: 1,
                error: TreeValidationError::LeafWidthMismatch {
                    node: 0,
                    len: 1,
                    n_classes: 2,
                },
            }
        );
    }
}
