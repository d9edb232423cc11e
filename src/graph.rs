//! Step graph definition
//!
//! A graph is an ordered list of steps. Each item of step `n` may name the
//! items of step `n + 1` it unlocks through `valid_next_steps`. The graph is
//! validated once on construction and never mutated afterwards.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A selectable choice within a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StepItem {
    /// Identifier, unique within its step only
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque presentation handle (icon name); the engine never reads it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Image URL for card renderers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Ids of items in the next step unlocked by picking this item.
    ///
    /// `None` and `Some(vec![])` are different: an absent list is read
    /// according to the resolver's `AdjacencyPolicy`, an empty one always
    /// unlocks nothing.
    #[serde(
        default,
        alias = "validNextSteps",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_next_steps: Option<Vec<String>>,
}

impl StepItem {
    /// Create an item with only an id and a title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            icon: None,
            image: None,
            valid_next_steps: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare the next-step items this item unlocks
    pub fn unlocks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_next_steps = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `id` is listed in this item's adjacency
    pub fn unlocks_id(&self, id: &str) -> bool {
        self.valid_next_steps
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|next| next == id))
    }
}

/// One screen of the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Step {
    /// 1-based ordinal, informational only. Zero means unset and is
    /// replaced by the step's position when the graph is built.
    #[serde(default)]
    pub level: u32,
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<StepItem>,
}

impl Step {
    pub fn new(id: impl Into<String>, title: impl Into<String>, items: Vec<StepItem>) -> Self {
        Self {
            level: 0,
            id: id.into(),
            title: title.into(),
            description: None,
            items,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Find an item of this step by id
    pub fn item(&self, id: &str) -> Option<&StepItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Structural errors rejected by [`StepGraph::new`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("step graph has no steps")]
    Empty,

    #[error("duplicate step id '{0}'")]
    DuplicateStepId(String),

    #[error("step '{0}' has no items")]
    EmptyStep(String),

    #[error("duplicate item id '{item}' in step '{step}'")]
    DuplicateItemId { step: String, item: String },
}

/// Non-fatal findings reported by [`StepGraph::lint`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphWarning {
    /// An adjacency entry names an id that the next step does not contain
    UnknownNextItem {
        step: String,
        item: String,
        next: String,
    },
    /// An item of the last step declares adjacency that can never be used
    AdjacencyOnLastStep { step: String, item: String },
    /// No item of the previous step unlocks this item
    Unreachable { step: String, item: String },
}

impl std::fmt::Display for GraphWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphWarning::UnknownNextItem { step, item, next } => write!(
                f,
                "{step}/{item}: unlocks '{next}' which is not an item of the next step"
            ),
            GraphWarning::AdjacencyOnLastStep { step, item } => write!(
                f,
                "{step}/{item}: declares valid_next_steps on the last step"
            ),
            GraphWarning::Unreachable { step, item } => {
                write!(f, "{step}/{item}: not unlocked by any item of the previous step")
            }
        }
    }
}

/// Immutable, validated sequence of steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepGraph {
    steps: Vec<Step>,
}

impl StepGraph {
    /// Validate and wrap a list of steps
    pub fn new(mut steps: Vec<Step>) -> Result<Self, GraphError> {
        if steps.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut step_ids = HashSet::new();
        for step in &steps {
            if !step_ids.insert(step.id.as_str()) {
                return Err(GraphError::DuplicateStepId(step.id.clone()));
            }
            if step.items.is_empty() {
                return Err(GraphError::EmptyStep(step.id.clone()));
            }

            let mut item_ids = HashSet::new();
            for item in &step.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(GraphError::DuplicateItemId {
                        step: step.id.clone(),
                        item: item.id.clone(),
                    });
                }
            }
        }

        for (index, step) in steps.iter_mut().enumerate() {
            if step.level == 0 {
                step.level = u32::try_from(index + 1).unwrap_or(u32::MAX);
            }
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Step at a 0-based index
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of steps (never zero)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a graph is rejected without steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the last step
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Item `id` at step `index`
    pub fn item(&self, index: usize, id: &str) -> Option<&StepItem> {
        self.step(index)?.item(id)
    }

    /// Index of the step with the given id
    pub fn position(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == step_id)
    }

    /// Report adjacency problems that do not prevent the wizard from running
    pub fn lint(&self) -> Vec<GraphWarning> {
        let mut warnings = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            let next = self.steps.get(index + 1);

            for item in &step.items {
                let Some(ids) = &item.valid_next_steps else {
                    continue;
                };
                match next {
                    Some(next_step) => {
                        for id in ids {
                            if next_step.item(id).is_none() {
                                warnings.push(GraphWarning::UnknownNextItem {
                                    step: step.id.clone(),
                                    item: item.id.clone(),
                                    next: id.clone(),
                                });
                            }
                        }
                    }
                    None if !ids.is_empty() => {
                        warnings.push(GraphWarning::AdjacencyOnLastStep {
                            step: step.id.clone(),
                            item: item.id.clone(),
                        });
                    }
                    None => {}
                }
            }

            if index == 0 {
                continue;
            }
            let previous = &self.steps[index - 1];
            for item in &step.items {
                if !previous.items.iter().any(|p| p.unlocks_id(&item.id)) {
                    warnings.push(GraphWarning::Unreachable {
                        step: step.id.clone(),
                        item: item.id.clone(),
                    });
                }
            }
        }

        warnings
    }
}

impl TryFrom<Vec<Step>> for StepGraph {
    type Error = GraphError;

    fn try_from(steps: Vec<Step>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step_graph() -> Vec<Step> {
        vec![
            Step::new(
                "first",
                "First",
                vec![
                    StepItem::new("a", "A").unlocks(["b", "c"]),
                    StepItem::new("d", "D").unlocks(["c"]),
                ],
            ),
            Step::new(
                "second",
                "Second",
                vec![StepItem::new("b", "B"), StepItem::new("c", "C")],
            ),
        ]
    }

    #[test]
    fn test_graph_accepts_valid_steps() {
        let graph = StepGraph::new(two_step_graph()).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.last_index(), 1);
        assert_eq!(graph.position("second"), Some(1));
        assert_eq!(graph.item(0, "d").map(|i| i.title.as_str()), Some("D"));
        assert!(graph.item(1, "a").is_none());
    }

    #[test]
    fn test_unset_levels_follow_position() {
        let graph = StepGraph::new(two_step_graph()).unwrap();
        let levels: Vec<u32> = graph.steps().iter().map(|step| step.level).collect();
        assert_eq!(levels, vec![1, 2]);
    }

    #[test]
    fn test_explicit_level_is_kept() {
        let mut steps = two_step_graph();
        steps[1].level = 7;
        let graph = StepGraph::new(steps).unwrap();
        assert_eq!(graph.step(0).map(|step| step.level), Some(1));
        assert_eq!(graph.step(1).map(|step| step.level), Some(7));
    }

    #[test]
    fn test_graph_rejects_empty() {
        assert_eq!(StepGraph::new(vec![]), Err(GraphError::Empty));
    }

    #[test]
    fn test_graph_rejects_duplicate_step_id() {
        let mut steps = two_step_graph();
        steps[1].id = "first".to_string();
        assert_eq!(
            StepGraph::new(steps),
            Err(GraphError::DuplicateStepId("first".to_string()))
        );
    }

    #[test]
    fn test_graph_rejects_step_without_items() {
        let mut steps = two_step_graph();
        steps[1].items.clear();
        assert_eq!(
            StepGraph::new(steps),
            Err(GraphError::EmptyStep("second".to_string()))
        );
    }

    #[test]
    fn test_graph_rejects_duplicate_item_in_step() {
        let mut steps = two_step_graph();
        steps[1].items.push(StepItem::new("b", "B again"));
        assert_eq!(
            StepGraph::new(steps),
            Err(GraphError::DuplicateItemId {
                step: "second".to_string(),
                item: "b".to_string(),
            })
        );
    }

    #[test]
    fn test_same_item_id_allowed_across_steps() {
        let steps = vec![
            Step::new("one", "One", vec![StepItem::new("vercel", "V").unlocks(["vercel"])]),
            Step::new("two", "Two", vec![StepItem::new("vercel", "V")]),
        ];
        assert!(StepGraph::new(steps).is_ok());
    }

    #[test]
    fn test_lint_clean_graph() {
        let graph = StepGraph::new(two_step_graph()).unwrap();
        assert!(graph.lint().is_empty());
    }

    #[test]
    fn test_lint_reports_unknown_and_unreachable() {
        let mut steps = two_step_graph();
        steps[0].items[1] = StepItem::new("d", "D").unlocks(["zzz"]);
        steps[1].items.push(StepItem::new("e", "E").unlocks(["x"]));
        let graph = StepGraph::new(steps).unwrap();

        let warnings = graph.lint();
        assert!(warnings.contains(&GraphWarning::UnknownNextItem {
            step: "first".to_string(),
            item: "d".to_string(),
            next: "zzz".to_string(),
        }));
        assert!(warnings.contains(&GraphWarning::AdjacencyOnLastStep {
            step: "second".to_string(),
            item: "e".to_string(),
        }));
        assert!(warnings.contains(&GraphWarning::Unreachable {
            step: "second".to_string(),
            item: "e".to_string(),
        }));
    }

    #[test]
    fn test_camel_case_adjacency_alias() {
        let item: StepItem =
            serde_json::from_str(r#"{"id":"a","title":"A","validNextSteps":["b"]}"#).unwrap();
        assert_eq!(item.valid_next_steps, Some(vec!["b".to_string()]));
        assert!(item.unlocks_id("b"));
        assert!(!item.unlocks_id("c"));
    }

    #[test]
    fn test_absent_adjacency_unlocks_nothing() {
        let item = StepItem::new("a", "A");
        assert!(item.valid_next_steps.is_none());
        assert!(!item.unlocks_id("b"));
    }
}
