// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Catalog administrator - can create categories
pub const ROLE_ADMIN: &str = "ADMIN";

/// Regular user - can create and edit own products
#[allow(dead_code)]
pub const ROLE_USER: &str = "USER";
