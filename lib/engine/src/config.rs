/// The number of applications after which a rule that still derives new facts is given up on.
pub const DEFAULT_MAX_ITERATIONS: usize = 1024;

/// Holds the configuration of an inference run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceConfig {
    /// The maximum number of applications of a single rule before its closure is considered
    /// unreachable. Only cyclic route graphs should ever hit this limit. Values below one count as
    /// one.
    pub max_iterations: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl InferenceConfig {
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
