//! Type definitions for the navigation controller

use crate::resolver::Unavailable;
use crate::store::Selections;

/// Where the step pointer currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing the step at this index
    Active(usize),
    /// Past the last step (success screen or custom form)
    Terminal,
}

/// Answer of a completion handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Accepted,
    Rejected,
}

impl Completion {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Completion::Accepted)
    }
}

impl From<bool> for Completion {
    fn from(accepted: bool) -> Self {
        if accepted {
            Completion::Accepted
        } else {
            Completion::Rejected
        }
    }
}

/// Handlers without an answer count as accepting
impl From<()> for Completion {
    fn from((): ()) -> Self {
        Completion::Accepted
    }
}

/// Receives the full selection map when the user finishes the wizard
pub trait CompletionHandler: Send {
    fn complete(&mut self, selections: &Selections) -> Completion;
}

/// Closures may answer with a `Completion`, a `bool` or nothing
impl<F, R> CompletionHandler for F
where
    F: FnMut(&Selections) -> R + Send,
    R: Into<Completion>,
{
    fn complete(&mut self, selections: &Selections) -> Completion {
        self(selections).into()
    }
}

/// Reason a command left the wizard unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blocked {
    /// `go_back` on the first step
    AtFirstStep,
    /// The current step is unavailable or has no selection
    CannotProceed,
    /// `finish` away from the last step
    NotOnLastStep,
    /// Already past the last step
    AlreadyTerminal,
    /// The step of a selection cannot be resolved
    StepUnavailable(Unavailable),
    /// The id is not among the step's resolved options
    UnknownOption { step: usize, id: String },
}

impl std::fmt::Display for Blocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Blocked::AtFirstStep => write!(f, "already at the first step"),
            Blocked::CannotProceed => write!(f, "make a selection first"),
            Blocked::NotOnLastStep => write!(f, "not on the last step"),
            Blocked::AlreadyTerminal => write!(f, "wizard already finished"),
            Blocked::StepUnavailable(reason) => write!(f, "{reason}"),
            Blocked::UnknownOption { step, id } => {
                write!(f, "'{id}' is not an option of step {step}")
            }
        }
    }
}

/// Outcome of a wizard command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A choice was recorded
    Selected {
        step: usize,
        /// New pointer when auto-progress moved it
        advanced_to: Option<usize>,
        /// Later selections removed by the downstream policy
        cleared: usize,
    },
    /// The pointer moved
    Moved { from: usize, to: usize },
    /// The completion handler ran
    Completed(Completion),
    /// Nothing changed
    Blocked(Blocked),
}

impl Transition {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Transition::Blocked(_))
    }
}
