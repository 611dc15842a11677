//! API-level constants.

/// Current API version, used in the route prefix and the served OpenAPI spec.
pub const API_VERSION: &str = "v0";

/// Route prefix for all versioned endpoints.
pub const API_PREFIX: &str = "/api/v0";
