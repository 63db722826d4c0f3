//! Identity-provider token verification.
//!
//! Sign-in, sign-up and token issuance happen at the hosted identity
//! provider; this module only verifies the ID tokens it hands out.

pub mod jwt;
