//! # Network Models
//!
//! * [`record::DiscoveryRecord`]: one raw line of the discovery file.
//! * [`host::Host`]: one physical device, possibly built from several records.
//! * [`ip_set::IpSet`]: insertion-ordered set of addresses owned by a host.
//! * [`range::RangeRegistry`]: named CIDR sets tagged with function and service labels.

pub mod host;
pub mod ip_set;
pub mod range;
pub mod record;
