//! Application constants for the table converter
//!
//! Default configuration values, keyed-record column names and output
//! formatting settings used throughout the crate.

// =============================================================================
// Table Layout Defaults
// =============================================================================

/// Column separator used by markdown tables
pub const DEFAULT_DELIMITER: char = '|';

/// Character used in separator rules and placeholder identifiers
pub const SEPARATOR_CHAR: char = '-';

/// Sentinel header used by the marker locator and as the keyed-output key
pub const DEFAULT_MARKER_COLUMN: &str = "CRID";

/// Lines between a header and its first data row under the fixed-offset locator
pub const FIXED_OFFSET_DATA_GAP: usize = 2;

// =============================================================================
// File Handling
// =============================================================================

/// Directory keyed results are written into when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "jsonoutput";

/// Suffix stripped from input stems when deriving output names
pub const DEFAULT_STRIP_SUFFIX: &str = "_cr";

/// Extension of documents picked up by batch discovery
pub const DEFAULT_MARKDOWN_EXTENSION: &str = "md";

/// Extension appended to derived output names
pub const OUTPUT_EXTENSION: &str = "json";

/// Application directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "crtable";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Indentation used for pretty-printed JSON output
pub const JSON_INDENT: &[u8] = b"    ";

// =============================================================================
// Keyed Record Columns
// =============================================================================

/// Source column names read by the keyed mapper
pub mod columns {
    pub const FUNCTION: &str = "Function";
    pub const REFERENCE: &str = "Reference";
    pub const APPLICABILITY_CRITERIA: &str = "ApplicabilityCriteria";
    pub const TYPE: &str = "Type";
    pub const MUST_SATISFY: &str = "MustSatisfy";
    pub const KEYWORD: &str = "Keyword";
    pub const REQUIREMENT: &str = "Requirement";
    pub const CONDITION: &str = "Condition";
    pub const DEPENDENCIES: &str = "Dependencies";
    pub const CR_VERSION_INTRODUCED: &str = "CRVersionIntroduced";
    pub const STATUS: &str = "Status";
    pub const NOTES: &str = "Notes";
}

/// Constant `EntityType` written into every keyed record
pub const ENTITY_TYPE_COLUMN: &str = "Column";

/// Separator between entries of the `Dependencies` column
pub const DEPENDENCY_SEPARATOR: char = ',';
