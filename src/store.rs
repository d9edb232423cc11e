//! Selection store
//!
//! Holds the mutable state of one wizard: the current step pointer, the
//! chosen item per step and the auto-progress flag. Every operation is total
//! and updates all affected fields inside a single call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::options::DownstreamPolicy;

/// Chosen item id per 0-based step index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selections(BTreeMap<usize, String>);

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, step: usize) -> Option<&str> {
        self.0.get(&step).map(String::as_str)
    }

    pub fn contains(&self, step: usize) -> bool {
        self.0.contains_key(&step)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selections in step order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(step, id)| (*step, id.as_str()))
    }

    /// Record a choice, returning the previous one for that step
    pub fn insert(&mut self, step: usize, id: impl Into<String>) -> Option<String> {
        self.0.insert(step, id.into())
    }

    /// Remove every selection with an index greater than `step`
    pub fn clear_after(&mut self, step: usize) -> usize {
        match step.checked_add(1) {
            Some(first_cleared) => self.0.split_off(&first_cleared).len(),
            None => 0,
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for Selections {
    fn from_iter<T: IntoIterator<Item = (usize, S)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(step, id)| (step, id.into())).collect())
    }
}

/// Mutable wizard state
#[derive(Debug, Clone)]
pub struct SelectionStore {
    current_step: usize,
    selections: Selections,
    auto_progress: bool,
    /// Index of the last step of the graph this store serves
    last_index: usize,
    downstream: DownstreamPolicy,
}

impl SelectionStore {
    /// Create an empty store for a graph with `step_count` steps
    pub fn new(step_count: usize, auto_progress: bool, downstream: DownstreamPolicy) -> Self {
        Self {
            current_step: 0,
            selections: Selections::new(),
            auto_progress,
            last_index: step_count.saturating_sub(1),
            downstream,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn auto_progress(&self) -> bool {
        self.auto_progress
    }

    /// Move the pointer; bounds are the caller's responsibility
    pub fn set_step(&mut self, step: usize) {
        self.current_step = step;
    }

    /// Record `option_id` for `step`.
    ///
    /// With auto-progress on and `step` before the last step, the pointer
    /// moves to `step + 1` in the same update. Returns the number of later
    /// selections removed by the downstream policy.
    pub fn set_selection(&mut self, step: usize, option_id: impl Into<String>) -> usize {
        let option_id = option_id.into();
        let previous = self.selections.insert(step, option_id.clone());

        let changed = previous.is_some_and(|prev| prev != option_id);
        let cleared = if changed && self.downstream == DownstreamPolicy::Clear {
            self.selections.clear_after(step)
        } else {
            0
        };

        if self.auto_progress && step < self.last_index {
            self.current_step = step + 1;
        }

        cleared
    }

    /// Affects later `set_selection` calls only
    pub fn set_auto_progress(&mut self, enabled: bool) {
        self.auto_progress = enabled;
    }

    /// Back to step 0 with no selections; the auto-progress flag is kept
    pub fn reset(&mut self) {
        self.current_step = 0;
        self.selections.clear();
    }
}
