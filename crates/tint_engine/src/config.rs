//! Engine configuration.

/// Settings for an [`Engine`](crate::Engine).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// How far past an edit a re-lex may scan before leaving the rest of
    /// the buffer stale. `None` scans as far as needed.
    pub max_relex_bytes: Option<usize>,
}

impl EngineConfig {
    #[must_use]
    pub fn with_max_relex_bytes(mut self, bytes: usize) -> Self {
        self.max_relex_bytes = Some(bytes);
        self
    }
}
