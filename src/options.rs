//! Extraction options and configuration.

use crate::layout::GroupingOptions;
use crate::outline::AnchorPatterns;

/// Options for extracting an outline and its section text.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Anchor detection patterns
    pub patterns: AnchorPatterns,

    /// Word grouping configuration
    pub grouping: GroupingOptions,

    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Which pages a section region covers
    pub region_mode: RegionMode,

    /// Whether to cluster regions on the rayon pool
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set anchor patterns.
    pub fn with_patterns(mut self, patterns: AnchorPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Set grouping options.
    pub fn with_grouping(mut self, grouping: GroupingOptions) -> Self {
        self.grouping = grouping;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip misplaced anchors).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set region mode.
    pub fn with_region_mode(mut self, mode: RegionMode) -> Self {
        self.region_mode = mode;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Error handling mode during outline construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first misplaced or ambiguous anchor
    #[default]
    Strict,
    /// Skip misplaced anchors and continue
    Lenient,
}

/// Which pages the region of an outline node spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionMode {
    /// Every page from the node's anchor to the next node's anchor
    #[default]
    Continuous,
    /// Only the page holding the node's anchor
    AnchorPage,
}
