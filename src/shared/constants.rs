/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can moderate reports, profiles and the violation type
/// catalogue. Carried as a verified claim in the access token, never
/// derived from the user's email.
pub const ROLE_ADMIN: &str = "admin";
