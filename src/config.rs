//! Options for loading structure trees.

/// Options controlling how a structure tree is read from the object graph.
///
/// # Example
///
/// ```
/// use tagged_pdf::config::StructureOptions;
///
/// // Lenient mode - skip malformed elements and continue (default)
/// let lenient = StructureOptions::lenient();
///
/// // Strict mode - fail on the first malformed element
/// let strict = StructureOptions::strict();
///
/// // Custom configuration
/// let custom = StructureOptions::default()
///     .with_max_depth(64)
///     .with_role_map(false);
/// assert_eq!(custom.max_depth, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureOptions {
    /// Fail on the first malformed element (true) or skip it (false)
    pub strict: bool,

    /// Maximum structure nesting depth
    ///
    /// Protects against stack exhaustion from pathologically deep or
    /// self-referencing structure trees.
    pub max_depth: u32,

    /// Maximum number of skipped elements before giving up (0 = unlimited)
    pub max_errors: usize,

    /// Resolve custom structure types through the /RoleMap
    pub apply_role_map: bool,

    /// Maximum length of a RoleMap chain (Heading1 -> Head -> H1)
    pub max_role_map_chain: usize,
}

impl Default for StructureOptions {
    /// Default configuration: lenient mode
    fn default() -> Self {
        Self::lenient()
    }
}

impl StructureOptions {
    /// Strict mode: any malformed element aborts loading
    pub fn strict() -> Self {
        Self {
            strict: true,
            max_depth: 256,
            max_errors: 1,
            apply_role_map: true,
            max_role_map_chain: 16,
        }
    }

    /// Lenient mode: malformed elements are skipped with a warning
    pub fn lenient() -> Self {
        Self {
            strict: false,
            max_depth: 256,
            max_errors: 1000,
            apply_role_map: true,
            max_role_map_chain: 16,
        }
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable RoleMap resolution.
    pub fn with_role_map(mut self, enable: bool) -> Self {
        self.apply_role_map = enable;
        self
    }

    /// Set the skipped-element budget for lenient mode.
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Check if loading should continue after `error_count` skipped elements
    pub(crate) fn should_continue(&self, error_count: usize) -> bool {
        if self.strict {
            return false;
        }

        if self.max_errors == 0 {
            return true;
        }

        error_count < self.max_errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_mode() {
        let opts = StructureOptions::strict();
        assert!(opts.strict);
        assert!(opts.apply_role_map);
    }

    #[test]
    fn test_default_is_lenient() {
        assert_eq!(StructureOptions::default(), StructureOptions::lenient());
        assert!(!StructureOptions::default().strict);
    }

    #[test]
    fn test_should_continue() {
        let strict = StructureOptions::strict();
        assert!(!strict.should_continue(0));

        let lenient = StructureOptions::lenient();
        assert!(lenient.should_continue(0));
        assert!(lenient.should_continue(999));
        assert!(!lenient.should_continue(1000));

        let unlimited = StructureOptions::lenient().with_max_errors(0);
        assert!(unlimited.should_continue(usize::MAX - 1));
    }
}
