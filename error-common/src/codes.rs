// Violation codes
// Stable identifiers for each class of parameter violation, used by
// machine-readable reports.

pub mod violation {
    pub const TYPE_MISMATCH: &str = "PARAM_1001";
    pub const RANGE_VIOLATION: &str = "PARAM_1002";
    pub const SHAPE_VIOLATION: &str = "PARAM_1003";
    pub const DOMAIN_VIOLATION: &str = "PARAM_1004";
    pub const REFERENTIAL_VIOLATION: &str = "PARAM_1005";
    pub const MISSING_REQUIRED: &str = "PARAM_1006";
}

pub mod build {
    pub const INVALID_PARAMETERS: &str = "BUILD_2001";
    pub const SERIALIZATION_FAILED: &str = "BUILD_2002";
}
