/// Top-level `error` value for every validation failure
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Fallback `error` value when a failure carries no message of its own
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// Body of the 404 returned for unmatched routes
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Message returned by the liveness endpoint
pub const LIVENESS_MESSAGE: &str = "School API is running";

// =============================================================================
// SCHOOL FIELD LIMITS
// =============================================================================

pub const MAX_NAME_LENGTH: u64 = 255;

pub const MAX_ADDRESS_LENGTH: u64 = 500;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
