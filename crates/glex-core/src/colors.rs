//! ANSI color codes for terminal output.
//!
//! - Blue: state and tag names
//! - Green: matched input text
//! - Red: hard failures
//! - Dim: positions, structure, trace markers

/// ANSI color palette for CLI and trace output.
///
/// Uses only standard 16-color ANSI codes so both light and dark themes work.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        red: "\x1b[31m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        red: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// Wrap a name in blue.
    pub fn name(&self, s: &str) -> String {
        format!("{}{}{}", self.blue, s, self.reset)
    }

    /// Wrap input text in dim green.
    pub fn text(&self, s: &str) -> String {
        format!("{}{}{}{}", self.dim, self.green, s, self.reset)
    }
}
