/// Settings of a [`crate::Writer`] listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    /// Write the raw bytes of every instruction and token values in comments
    pub show_bytes: bool,

    /// One level of indentation
    pub indent: String,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            show_bytes: false,
            indent: "  ".to_string(),
        }
    }
}

impl DumpOptions {
    /// The listing `ildasm` writes by default
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// The listing `ildasm /bytes` writes
    #[must_use]
    pub fn with_bytes() -> Self {
        Self {
            show_bytes: true,
            ..Self::default()
        }
    }

    /// Enable or disable byte comments
    #[must_use]
    pub fn show_bytes(mut self, show_bytes: bool) -> Self {
        self.show_bytes = show_bytes;
        self
    }

    /// Use `indent` for each nesting level
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}
