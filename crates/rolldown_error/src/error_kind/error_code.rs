// --- Aligned with rollup
pub const UNRESOLVED_ENTRY: &str = "UNRESOLVED_ENTRY";
pub const UNRESOLVED_IMPORT: &str = "UNRESOLVED_IMPORT";
pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
pub const FILE_NAME_NOT_GENERATED: &str = "FILE_NAME_NOT_GENERATED";
pub const SOURCEMAP_BROKEN: &str = "SOURCEMAP_BROKEN";

// --- Rolldown specific
pub const UNRESOLVED_PLACEHOLDER: &str = "UNRESOLVED_PLACEHOLDER";
pub const PANIC: &str = "PANIC";
pub const IO_ERROR: &str = "IO_ERROR";
