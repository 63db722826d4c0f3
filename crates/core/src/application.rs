//! Rental application status values.

use crate::error::CoreError;

/// Status assigned when a tenant submits an application.
pub const STATUS_PENDING: &str = "Pending";
/// The manager turned the application down.
pub const STATUS_DENIED: &str = "Denied";
/// The manager accepted the application.
pub const STATUS_APPROVED: &str = "Approved";

/// All valid application statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_DENIED, STATUS_APPROVED];

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid application status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}
