use crate::orchestrator::Phase;
use skigraph_common::StoreError;

/// An error raised while driving a single rule to its fixed point.
#[derive(Debug, thiserror::Error)]
pub enum ClosureError {
    /// The gateway failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The rule still derived new facts after the maximum number of applications.
    #[error("{rule} did not reach a fixed point within {iterations} applications")]
    NotReached {
        /// The name of the rule.
        rule: String,
        /// The number of applications performed.
        iterations: usize,
    },
}

impl ClosureError {
    /// Attaches the phase in which the error happened.
    pub fn in_phase(self, phase: Phase) -> InferenceError {
        match self {
            ClosureError::Store(source) => InferenceError::StoreUnavailable { phase, source },
            ClosureError::NotReached { rule, iterations } => InferenceError::ClosureNotReached {
                phase,
                rule,
                iterations,
            },
        }
    }
}

/// An error that aborted an inference branch.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The triple store failed during `phase`.
    #[error("The triple store failed during {phase}")]
    StoreUnavailable {
        phase: Phase,
        #[source]
        source: StoreError,
    },
    /// A rule of `phase` kept deriving new facts, which only happens on cyclic route graphs.
    #[error("{rule} did not reach a fixed point within {iterations} applications during {phase}")]
    ClosureNotReached {
        phase: Phase,
        rule: String,
        iterations: usize,
    },
}

impl InferenceError {
    /// Returns the phase that failed.
    pub fn phase(&self) -> Phase {
        match self {
            InferenceError::StoreUnavailable { phase, .. }
            | InferenceError::ClosureNotReached { phase, .. } => *phase,
        }
    }
}
