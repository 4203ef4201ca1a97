//! Report configuration.
//!
//! Options that decide which sections are produced and in what form they are
//! written to standard output.

/// Configuration for report rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Emit a single JSON document instead of the text report
    pub json: bool,

    /// Skip the host sections and only report file categories
    pub categories_only: bool,
}

impl ReportOptions {
    /// Whether the system, CPU, memory and disk sections should be collected.
    #[must_use]
    pub const fn include_host(&self) -> bool {
        !self.categories_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_includes_host_sections() {
        let opts = ReportOptions::default();

        assert!(!opts.json);
        assert!(opts.include_host());
    }

    #[test]
    fn test_categories_only_excludes_host_sections() {
        let opts = ReportOptions {
            json: false,
            categories_only: true,
        };

        assert!(!opts.include_host());
    }
}
