/// Error code registry for tutorial-forge
///
/// Error codes are organized by category:
/// - 1000-1999: Intake errors (archive discovery and extraction)
/// - 2000-2999: Structure errors (project root resolution)
/// - 3000-3999: Storage errors
/// - 4000-4999: External operation errors (clone, build)
/// - 5000-5999: Configuration errors
/// - 7000-7999: Validation errors (manifest, descriptor)
pub struct ErrorCode;

impl ErrorCode {
    // Intake errors (1000-1999)
    pub const INTAKE_INVALID_ARCHIVE_NAME: u16 = 1001;
    pub const INTAKE_EXTRACTION_FAILED: u16 = 1002;

    // Structure errors (2000-2999)
    pub const STRUCTURE_AMBIGUOUS_ROOT: u16 = 2001;

    // Storage errors (3000-3999)
    pub const STORAGE_GENERIC: u16 = 3000;
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_PERMISSION_DENIED: u16 = 3002;
    pub const STORAGE_NOT_FOUND: u16 = 3004;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3011;

    // External operation errors (4000-4999)
    pub const EXTERNAL_CLONE_FAILED: u16 = 4001;
    pub const EXTERNAL_MERGE_FAILED: u16 = 4002;
    pub const EXTERNAL_BUILD_FAILED: u16 = 4003;

    // Configuration errors (5000-5999)
    pub const CONFIG_NOT_READABLE: u16 = 5001;
    pub const CONFIG_INVALID_TOML: u16 = 5002;

    // Validation errors (7000-7999)
    pub const VALIDATION_MISSING_MANIFEST: u16 = 7001;
    pub const VALIDATION_INVALID_MANIFEST: u16 = 7002;
    pub const VALIDATION_MISSING_DESCRIPTOR: u16 = 7003;
    pub const VALIDATION_INVALID_DESCRIPTOR: u16 = 7004;
}
