//! # Netpost Core
//!
//! The classification and merge engine behind `netpost`.
//!
//! * **[`discovery`]**: builds hosts from discovery records and upserts duplicates.
//! * **[`classifier`]**: function/service derivation, conflict rules, management ip.
//! * **[`collection`]**: the ordered, deduplicating host container.
//! * **[`merge`]**: strategy picking which existing host absorbs an incoming one.
//! * **[`report`]**: CSV, automation-inventory and DNS views.
//! * **[`sources`]** / **[`writers`]**: file input and output.
//! * **[`pipeline`]**: one complete batch run.

pub mod classifier;
pub mod collection;
pub mod discovery;
pub mod merge;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod writers;
