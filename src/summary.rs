//! Completion summary
//!
//! Turns index-keyed selections into a report keyed by step id, the shape
//! hosts usually want to hand on after the wizard finishes.

use serde::{Deserialize, Serialize};

use crate::graph::StepGraph;
use crate::store::Selections;

/// One step's outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub step_id: String,
    pub step_title: String,
    /// `None` when the step has no selection or it no longer matches an item
    pub item_id: Option<String>,
    pub item_title: Option<String>,
}

/// Outcome of every step, in step order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub entries: Vec<SummaryEntry>,
    /// Free text entered in the custom form phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Summary {
    pub fn from_selections(graph: &StepGraph, selections: &Selections) -> Self {
        let entries = graph
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let item = selections.get(index).and_then(|id| step.item(id));
                SummaryEntry {
                    step_id: step.id.clone(),
                    step_title: step.title.clone(),
                    item_id: item.map(|i| i.id.clone()),
                    item_title: item.map(|i| i.title.clone()),
                }
            })
            .collect();

        Self {
            entries,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Whether every step has a valid selection
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|entry| entry.item_id.is_some())
    }

    /// `{ "selections": { step id: item id }, "notes": ... }`.
    ///
    /// Steps without a choice map to `null`; `notes` is only present when set.
    pub fn to_json(&self) -> serde_json::Value {
        let mut selections = serde_json::Map::new();
        for entry in &self.entries {
            let value = entry
                .item_id
                .clone()
                .map_or(serde_json::Value::Null, serde_json::Value::String);
            selections.insert(entry.step_id.clone(), value);
        }

        let mut output = serde_json::Map::new();
        output.insert(
            "selections".to_string(),
            serde_json::Value::Object(selections),
        );
        if let Some(notes) = &self.notes {
            output.insert("notes".to_string(), serde_json::Value::String(notes.clone()));
        }
        serde_json::Value::Object(output)
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            let choice = entry.item_title.as_deref().unwrap_or("(none)");
            writeln!(f, "{:<24} {}", entry.step_title, choice)?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "{:<24} {}", "Notes", notes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Step, StepItem};
    use serde_json::json;

    fn graph() -> StepGraph {
        StepGraph::new(vec![
            Step::new(
                "project-type",
                "Project",
                vec![StepItem::new("blog", "Blog").unlocks(["astro"])],
            ),
            Step::new("framework", "Framework", vec![StepItem::new("astro", "Astro")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_maps_step_ids() {
        let selections: Selections = [(0, "blog"), (1, "astro")].into_iter().collect();
        let summary = Summary::from_selections(&graph(), &selections);

        assert!(summary.is_complete());
        assert_eq!(
            summary.to_json(),
            json!({ "selections": { "project-type": "blog", "framework": "astro" } })
        );
    }

    #[test]
    fn test_summary_missing_and_dangling_are_null() {
        let selections: Selections = [(0, "removed")].into_iter().collect();
        let summary = Summary::from_selections(&graph(), &selections);

        assert!(!summary.is_complete());
        assert_eq!(
            summary.to_json(),
            json!({ "selections": { "project-type": null, "framework": null } })
        );
    }

    #[test]
    fn test_summary_notes() {
        let summary = Summary::from_selections(&graph(), &Selections::new()).with_notes("  ");
        assert!(summary.notes.is_none());

        let summary = summary.with_notes("ship friday");
        assert_eq!(summary.to_json()["notes"], json!("ship friday"));
        assert!(summary.to_string().contains("ship friday"));
    }

    #[test]
    fn test_summary_display_lists_titles() {
        let selections: Selections = [(0, "blog")].into_iter().collect();
        let text = Summary::from_selections(&graph(), &selections).to_string();
        assert!(text.contains("Blog"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn test_step_named_notes_keeps_its_choice() {
        let graph = StepGraph::new(vec![Step::new(
            "notes",
            "Release notes",
            vec![StepItem::new("short", "Short")],
        )])
        .unwrap();
        let selections: Selections = [(0, "short")].into_iter().collect();
        let summary = Summary::from_selections(&graph, &selections).with_notes("ship friday");

        assert_eq!(
            summary.to_json(),
            json!({ "selections": { "notes": "short" }, "notes": "ship friday" })
        );
    }
}
