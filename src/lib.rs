//! Wayfinder - step-by-step selection wizard over a branching option graph
//!
//! The engine is split into a validated [`graph::StepGraph`], the
//! [`store::SelectionStore`] of picks, the pure [`resolver::resolve`]
//! function and the [`wizard::Wizard`] navigation controller. The binary
//! adds a terminal front end on top.

pub mod config;
pub mod graph;
pub mod loader;
pub mod logging;
pub mod options;
pub mod resolver;
pub mod store;
pub mod summary;
pub mod wizard;

pub use graph::{Step, StepGraph, StepItem};
pub use options::WizardOptions;
pub use resolver::{resolve, Resolution};
pub use store::Selections;
pub use wizard::{Completion, SharedWizard, Transition, Wizard};
