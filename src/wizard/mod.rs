//! Navigation controller
//!
//! A [`Wizard`] owns one step graph together with its selection state and
//! drives pointer movement: selecting, next, back, finish and reset. Several
//! wizards can coexist in one process; nothing is global.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::graph::{StepGraph, StepItem};
use crate::options::{TrailingPhase, WizardOptions};
use crate::resolver::{self, Resolution};
use crate::store::{SelectionStore, Selections};

pub mod types;

pub use types::*;


/// A wizard shared between threads; every mutation goes through the lock
pub type SharedWizard = Arc<Mutex<Wizard>>;

/// Builder for [`Wizard`]
pub struct WizardBuilder {
    graph: StepGraph,
    options: WizardOptions,
    on_complete: Option<Box<dyn CompletionHandler>>,
}

impl WizardBuilder {
    pub fn options(mut self, options: WizardOptions) -> Self {
        self.options = options;
        self
    }

    pub fn auto_progress(mut self, enabled: bool) -> Self {
        self.options.auto_progress = enabled;
        self
    }

    pub fn trailing_phase(mut self, phase: TrailingPhase) -> Self {
        self.options.trailing_phase = phase;
        self
    }

    /// Handler invoked once per successful finish
    pub fn on_complete(mut self, handler: impl CompletionHandler + 'static) -> Self {
        self.on_complete = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Wizard {
        let store = SelectionStore::new(
            self.graph.len(),
            self.options.auto_progress,
            self.options.downstream,
        );
        let wizard = Wizard {
            id: Uuid::new_v4(),
            graph: self.graph,
            options: self.options,
            store,
            on_complete: self.on_complete,
        };
        tracing::debug!(
            wizard = %wizard.id,
            steps = wizard.graph.len(),
            trailing = wizard.options.trailing_phase.label(),
            "wizard created"
        );
        wizard
    }
}

/// Step-selection engine instance
pub struct Wizard {
    id: Uuid,
    graph: StepGraph,
    options: WizardOptions,
    store: SelectionStore,
    on_complete: Option<Box<dyn CompletionHandler>>,
}

impl std::fmt::Debug for Wizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("id", &self.id)
            .field("steps", &self.graph.len())
            .field("options", &self.options)
            .field("store", &self.store)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Wizard {
    /// Start building a wizard over `graph`
    pub fn builder(graph: StepGraph) -> WizardBuilder {
        WizardBuilder {
            graph,
            options: WizardOptions::default(),
            on_complete: None,
        }
    }

    /// Create a wizard without a completion handler
    pub fn new(graph: StepGraph, options: WizardOptions) -> Self {
        Self::builder(graph).options(options).build()
    }

    pub fn into_shared(self) -> SharedWizard {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    pub fn options(&self) -> &WizardOptions {
        &self.options
    }

    pub fn current_step(&self) -> usize {
        self.store.current_step()
    }

    pub fn selections(&self) -> &Selections {
        self.store.selections()
    }

    pub fn auto_progress(&self) -> bool {
        self.store.auto_progress()
    }

    pub fn phase(&self) -> Phase {
        let current = self.store.current_step();
        if current >= self.graph.len() {
            Phase::Terminal
        } else {
            Phase::Active(current)
        }
    }

    pub fn is_last_step(&self) -> bool {
        self.phase() == Phase::Active(self.graph.last_index())
    }

    /// Fraction of the wizard reached, for progress bars
    pub fn progress(&self) -> f64 {
        let reached = (self.store.current_step() + 1).min(self.graph.len());
        reached as f64 / self.graph.len() as f64
    }

    /// Options selectable at `step` given the current selections
    pub fn step_options(&self, step: usize) -> Resolution<'_> {
        resolver::resolve(
            &self.graph,
            self.store.selections(),
            step,
            self.options.adjacency,
        )
    }

    pub fn current_options(&self) -> Resolution<'_> {
        self.step_options(self.store.current_step())
    }

    /// The item chosen at `step`, if it still exists in the graph
    pub fn selected_item(&self, step: usize) -> Option<&StepItem> {
        let id = self.store.selections().get(step)?;
        self.graph.item(step, id)
    }

    pub fn is_selected(&self, step: usize, id: &str) -> bool {
        self.store.selections().get(step) == Some(id)
    }

    /// Whether the current step is resolvable and has a selection
    pub fn can_proceed(&self) -> bool {
        match self.phase() {
            Phase::Active(step) => {
                self.store.selections().contains(step) && self.step_options(step).is_available()
            }
            Phase::Terminal => false,
        }
    }

    /// Record `id` as the choice for `step`
    pub fn select_option(&mut self, step: usize, id: &str) -> Transition {
        if self.phase() == Phase::Terminal {
            return Transition::Blocked(Blocked::AlreadyTerminal);
        }

        match self.step_options(step) {
            Resolution::Unavailable(reason) => {
                tracing::debug!(wizard = %self.id, step, %reason, "selection on unavailable step");
                return Transition::Blocked(Blocked::StepUnavailable(reason));
            }
            Resolution::Available(options) if !options.contains(id) => {
                tracing::debug!(wizard = %self.id, step, id, "selection not among options");
                return Transition::Blocked(Blocked::UnknownOption {
                    step,
                    id: id.to_string(),
                });
            }
            Resolution::Available(_) => {}
        }

        let before = self.store.current_step();
        let cleared = self.store.set_selection(step, id);
        let after = self.store.current_step();
        let advanced_to = (after != before).then_some(after);

        tracing::debug!(
            wizard = %self.id,
            step,
            id,
            cleared,
            current = after,
            "option selected"
        );

        Transition::Selected {
            step,
            advanced_to,
            cleared,
        }
    }

    /// Move to the next step; on the last step this finishes the wizard
    pub fn go_next(&mut self) -> Transition {
        let step = match self.phase() {
            Phase::Terminal => return Transition::Blocked(Blocked::AlreadyTerminal),
            Phase::Active(step) => step,
        };

        if !self.can_proceed() {
            return Transition::Blocked(Blocked::CannotProceed);
        }

        if step < self.graph.last_index() {
            self.store.set_step(step + 1);
            tracing::debug!(wizard = %self.id, from = step, to = step + 1, "next");
            Transition::Moved {
                from: step,
                to: step + 1,
            }
        } else {
            self.finish()
        }
    }

    /// Move back one step, or out of the terminal phase to the last step
    pub fn go_back(&mut self) -> Transition {
        let (from, to) = match self.phase() {
            Phase::Terminal => (self.store.current_step(), self.graph.last_index()),
            Phase::Active(0) => return Transition::Blocked(Blocked::AtFirstStep),
            Phase::Active(step) => (step, step - 1),
        };

        self.store.set_step(to);
        tracing::debug!(wizard = %self.id, from, to, "back");
        Transition::Moved { from, to }
    }

    /// Hand the selections to the completion handler.
    ///
    /// Only valid on the last step once it has a selection. An accepted
    /// completion enters the terminal phase when one is configured.
    pub fn finish(&mut self) -> Transition {
        let last = self.graph.last_index();
        match self.phase() {
            Phase::Terminal => return Transition::Blocked(Blocked::AlreadyTerminal),
            Phase::Active(step) if step != last => {
                return Transition::Blocked(Blocked::NotOnLastStep)
            }
            Phase::Active(_) => {}
        }

        if !self.store.selections().contains(last) {
            return Transition::Blocked(Blocked::CannotProceed);
        }

        let completion = match self.on_complete.as_mut() {
            Some(handler) => handler.complete(self.store.selections()),
            None => Completion::Accepted,
        };

        if completion.is_accepted() && self.options.trailing_phase.is_configured() {
            self.store.set_step(self.graph.len());
        }

        tracing::info!(
            wizard = %self.id,
            accepted = completion.is_accepted(),
            selections = self.store.selections().len(),
            "wizard finished"
        );
        Transition::Completed(completion)
    }

    pub fn set_auto_progress(&mut self, enabled: bool) {
        self.store.set_auto_progress(enabled);
        self.options.auto_progress = enabled;
        tracing::debug!(wizard = %self.id, enabled, "auto-progress");
    }

    /// Back to the first step with every selection cleared
    pub fn reset(&mut self) {
        self.store.reset();
        tracing::debug!(wizard = %self.id, "reset");
    }
}
