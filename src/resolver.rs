//! Option resolver
//!
//! Computes the options selectable at a step from the graph and the current
//! selections. Resolution is recomputed on every request so it always agrees
//! with the selections, whatever branch the user went back and changed.

use crate::graph::{Step, StepGraph, StepItem};
use crate::options::AdjacencyPolicy;
use crate::store::Selections;

/// Why a step cannot be shown yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// The index is not a step of the graph (including the terminal index)
    OutOfRange { step: usize },
    /// Nothing has been picked at the previous step
    MissingPrerequisite { step: usize },
    /// The previous step's selection names an item the graph does not have
    DanglingSelection { step: usize, id: String },
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unavailable::OutOfRange { step } => write!(f, "step {step} does not exist"),
            Unavailable::MissingPrerequisite { step } => {
                write!(f, "no selection at step {step}")
            }
            Unavailable::DanglingSelection { step, id } => {
                write!(f, "selection '{id}' at step {step} is not in the graph")
            }
        }
    }
}

/// Options available at one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOptions<'g> {
    pub index: usize,
    pub step: &'g Step,
    /// Filtered items, in the step's declaration order
    pub options: Vec<&'g StepItem>,
}

impl StepOptions<'_> {
    pub fn title(&self) -> &str {
        &self.step.title
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.options.iter().any(|item| item.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.options.iter().map(|item| item.id.as_str()).collect()
    }
}

/// Result of resolving a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'g> {
    Available(StepOptions<'g>),
    Unavailable(Unavailable),
}

impl<'g> Resolution<'g> {
    pub fn is_available(&self) -> bool {
        matches!(self, Resolution::Available(_))
    }

    pub fn options(&self) -> Option<&StepOptions<'g>> {
        match self {
            Resolution::Available(options) => Some(options),
            Resolution::Unavailable(_) => None,
        }
    }

    pub fn into_options(self) -> Option<StepOptions<'g>> {
        match self {
            Resolution::Available(options) => Some(options),
            Resolution::Unavailable(_) => None,
        }
    }
}

/// Resolve the options legally selectable at step `index`
pub fn resolve<'g>(
    graph: &'g StepGraph,
    selections: &Selections,
    index: usize,
    policy: AdjacencyPolicy,
) -> Resolution<'g> {
    let Some(step) = graph.step(index) else {
        return Resolution::Unavailable(Unavailable::OutOfRange { step: index });
    };

    // The first step is always fully open
    if index == 0 {
        return Resolution::Available(StepOptions {
            index,
            step,
            options: step.items.iter().collect(),
        });
    }

    let previous = index - 1;
    let Some(selected) = selections.get(previous) else {
        return Resolution::Unavailable(Unavailable::MissingPrerequisite { step: previous });
    };

    let Some(previous_item) = graph.item(previous, selected) else {
        tracing::trace!(step = previous, id = selected, "dangling selection");
        return Resolution::Unavailable(Unavailable::DanglingSelection {
            step: previous,
            id: selected.to_string(),
        });
    };

    let options = match (&previous_item.valid_next_steps, policy) {
        (Some(ids), _) => step
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .collect(),
        (None, AdjacencyPolicy::Unconstrained) => step.items.iter().collect(),
        (None, AdjacencyPolicy::Restrict) => Vec::new(),
    };

    Resolution::Available(StepOptions {
        index,
        step,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Step, StepItem};

    fn graph() -> StepGraph {
        StepGraph::new(vec![
            Step::new(
                "first",
                "First",
                vec![
                    StepItem::new("A", "A").unlocks(["B", "C"]),
                    StepItem::new("D", "D").unlocks(["C"]),
                    StepItem::new("E", "E"),
                    StepItem::new("F", "F").unlocks(Vec::<String>::new()),
                ],
            ),
            Step::new(
                "second",
                "Second",
                vec![StepItem::new("B", "B"), StepItem::new("C", "C")],
            ),
        ])
        .unwrap()
    }

    fn ids(resolution: &Resolution<'_>) -> Vec<String> {
        resolution
            .options()
            .map(|o| o.ids().into_iter().map(String::from).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_first_step_ignores_selections() {
        let graph = graph();
        let selections: Selections = [(0, "D"), (1, "C"), (5, "junk")].into_iter().collect();

        for sel in [Selections::new(), selections] {
            let resolution = resolve(&graph, &sel, 0, AdjacencyPolicy::Restrict);
            assert_eq!(ids(&resolution), vec!["A", "D", "E", "F"]);
            assert_eq!(resolution.options().unwrap().title(), "First");
        }
    }

    #[test]
    fn test_missing_prerequisite_is_unavailable() {
        let graph = graph();
        let resolution = resolve(&graph, &Selections::new(), 1, AdjacencyPolicy::Restrict);
        assert_eq!(
            resolution,
            Resolution::Unavailable(Unavailable::MissingPrerequisite { step: 0 })
        );
    }

    #[test]
    fn test_dangling_selection_is_unavailable() {
        let graph = graph();
        let selections: Selections = [(0, "gone")].into_iter().collect();
        let resolution = resolve(&graph, &selections, 1, AdjacencyPolicy::Restrict);
        assert_eq!(
            resolution,
            Resolution::Unavailable(Unavailable::DanglingSelection {
                step: 0,
                id: "gone".to_string(),
            })
        );
    }

    #[test]
    fn test_out_of_range_is_unavailable() {
        let graph = graph();
        let resolution = resolve(&graph, &Selections::new(), 2, AdjacencyPolicy::Restrict);
        assert_eq!(
            resolution,
            Resolution::Unavailable(Unavailable::OutOfRange { step: 2 })
        );
    }

    #[test]
    fn test_adjacency_filters_next_step() {
        let graph = graph();

        let a: Selections = [(0, "A")].into_iter().collect();
        assert_eq!(ids(&resolve(&graph, &a, 1, AdjacencyPolicy::Restrict)), vec!["B", "C"]);

        let d: Selections = [(0, "D")].into_iter().collect();
        assert_eq!(ids(&resolve(&graph, &d, 1, AdjacencyPolicy::Restrict)), vec!["C"]);
    }

    #[test]
    fn test_adjacency_order_follows_declaration() {
        let graph = StepGraph::new(vec![
            Step::new("s1", "S1", vec![StepItem::new("x", "X").unlocks(["c", "a"])]),
            Step::new(
                "s2",
                "S2",
                vec![
                    StepItem::new("a", "A"),
                    StepItem::new("b", "B"),
                    StepItem::new("c", "C"),
                ],
            ),
        ])
        .unwrap();
        let selections: Selections = [(0, "x")].into_iter().collect();
        let resolution = resolve(&graph, &selections, 1, AdjacencyPolicy::Restrict);
        assert_eq!(ids(&resolution), vec!["a", "c"]);
    }

    #[test]
    fn test_absent_adjacency_depends_on_policy() {
        let graph = graph();
        let selections: Selections = [(0, "E")].into_iter().collect();

        let restricted = resolve(&graph, &selections, 1, AdjacencyPolicy::Restrict);
        assert!(restricted.is_available());
        assert!(restricted.options().unwrap().is_empty());

        let open = resolve(&graph, &selections, 1, AdjacencyPolicy::Unconstrained);
        assert_eq!(ids(&open), vec!["B", "C"]);
    }

    #[test]
    fn test_explicit_empty_adjacency_is_empty_under_any_policy() {
        let graph = graph();
        let selections: Selections = [(0, "F")].into_iter().collect();
        for policy in [AdjacencyPolicy::Restrict, AdjacencyPolicy::Unconstrained] {
            let resolution = resolve(&graph, &selections, 1, policy);
            assert!(resolution.is_available());
            assert!(resolution.options().unwrap().is_empty());
        }
    }

    #[test]
    fn test_resolution_is_a_subset_of_step_items() {
        let graph = graph();
        for first in ["A", "D", "E", "F"] {
            let selections: Selections = [(0, first)].into_iter().collect();
            let resolution = resolve(&graph, &selections, 1, AdjacencyPolicy::Unconstrained);
            let step = graph.step(1).unwrap();
            for item in &resolution.options().unwrap().options {
                assert!(step.items.contains(*item));
            }
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let graph = graph();
        let selections: Selections = [(0, "A")].into_iter().collect();
        let first = resolve(&graph, &selections, 1, AdjacencyPolicy::Restrict);
        let second = resolve(&graph, &selections, 1, AdjacencyPolicy::Restrict);
        assert_eq!(first, second);
    }
}
