//! # Netpost Common
//!
//! Domain models shared by the post-processing engine and the CLI.
//!
//! * **[`network`]**: discovery records, the [`network::host::Host`] entity and the
//!   named network ranges used to classify it.
//! * **[`vendors`]**: sysobjid normalization and the vendor lookup port.
//! * **[`config`]**: run settings (ranges, credential groups, report policy).
//! * **[`error`]**: error types raised while building the above.

pub mod config;
pub mod error;
pub mod network;
pub mod vendors;
