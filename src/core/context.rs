//! Shared context passed to modules

/// Shared context available to all modules
#[derive(Debug, Default)]
pub struct Context {
    /// Path currently shown
    pub current_path: String,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}
