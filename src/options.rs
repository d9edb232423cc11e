//! Wizard behaviour options
//!
//! One configuration object covers every supported variant of the wizard
//! instead of separate near-duplicate implementations.

use serde::{Deserialize, Serialize};

/// Optional phase entered after the last step has been accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TrailingPhase {
    /// Finishing stays on the last step
    #[default]
    None,
    /// A success screen
    Success,
    /// A free-form final form
    CustomForm,
}

impl TrailingPhase {
    pub fn all() -> &'static [TrailingPhase] {
        &[
            TrailingPhase::None,
            TrailingPhase::Success,
            TrailingPhase::CustomForm,
        ]
    }

    /// Whether finishing moves the wizard into the terminal phase
    pub fn is_configured(&self) -> bool {
        !matches!(self, TrailingPhase::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrailingPhase::None => "none",
            TrailingPhase::Success => "success",
            TrailingPhase::CustomForm => "custom-form",
        }
    }
}

/// Card layout used by renderers; the engine ignores it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CardVariant {
    #[default]
    Default,
    Compact,
}

/// What happens to later selections when an earlier one changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DownstreamPolicy {
    /// Remove every selection after the changed step
    #[default]
    Clear,
    /// Leave later selections untouched, even if they are no longer reachable
    Keep,
}

/// How an item without `valid_next_steps` is read by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AdjacencyPolicy {
    /// Absent adjacency unlocks nothing
    #[default]
    Restrict,
    /// Absent adjacency unlocks every item of the next step
    Unconstrained,
}

/// Unified wizard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardOptions {
    /// Picking an option immediately moves to the next step
    #[serde(default = "default_auto_progress")]
    pub auto_progress: bool,
    #[serde(default)]
    pub trailing_phase: TrailingPhase,
    #[serde(default)]
    pub card_variant: CardVariant,
    #[serde(default)]
    pub downstream: DownstreamPolicy,
    #[serde(default)]
    pub adjacency: AdjacencyPolicy,
}

fn default_auto_progress() -> bool {
    true
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            auto_progress: default_auto_progress(),
            trailing_phase: TrailingPhase::default(),
            card_variant: CardVariant::default(),
            downstream: DownstreamPolicy::default(),
            adjacency: AdjacencyPolicy::default(),
        }
    }
}
