/// Configuration for the predictive parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Steps allowed per input token (plus one for the end of input) before
    /// a translation is reported as a grammar cycle
    pub max_steps_per_token: usize,
}

impl ParserConfig {
    pub fn step_limit(&self, tokens: usize) -> usize {
        self.max_steps_per_token.saturating_mul(tokens + 1)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_steps_per_token: 1024,
        }
    }
}
