//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod manager_repo;
pub mod property_repo;
pub mod tenant_repo;

pub use application_repo::ApplicationRepo;
pub use manager_repo::ManagerRepo;
pub use property_repo::PropertyRepo;
pub use tenant_repo::TenantRepo;
