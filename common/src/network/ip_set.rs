use std::net::IpAddr;

use serde::Serialize;

/// Insertion-ordered set of addresses.
///
/// Order matters: the management ip falls back to the first member, and the
/// classifier may reorder the set when it prefers a loopback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IpSet(Vec<IpAddr>);

impl IpSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `ip` unless it is already a member. Returns `true` if it was added.
    pub fn insert(&mut self, ip: IpAddr) -> bool {
        if self.0.contains(&ip) {
            return false;
        }
        self.0.push(ip);
        true
    }

    /// Appends the members of `other` that are not yet present, keeping their order.
    pub fn union(&mut self, other: &IpSet) {
        for ip in other.iter() {
            self.insert(*ip);
        }
    }

    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.0.contains(ip)
    }

    pub fn intersects(&self, other: &IpSet) -> bool {
        self.0.iter().any(|ip| other.contains(ip))
    }

    /// Splits the set into `(matching, rest)`, each keeping the current order.
    pub fn partition<F>(&self, predicate: F) -> (IpSet, IpSet)
    where
        F: Fn(&IpAddr) -> bool,
    {
        let (matching, rest): (Vec<IpAddr>, Vec<IpAddr>) =
            self.0.iter().partition(|ip| predicate(ip));
        (Self(matching), Self(rest))
    }

    /// Sorts the members ascending.
    pub fn sort(&mut self) {
        self.0.sort();
    }

    /// Consumes `other`, appending it after the current members.
    pub fn chain(mut self, other: IpSet) -> IpSet {
        self.union(&other);
        self
    }

    pub fn first(&self) -> Option<IpAddr> {
        self.0.first().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IpAddr> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(IpAddr::to_string).collect()
    }
}

impl FromIterator<IpAddr> for IpSet {
    fn from_iter<T: IntoIterator<Item = IpAddr>>(iter: T) -> Self {
        let mut set = IpSet::new();
        for ip in iter {
            set.insert(ip);
        }
        set
    }
}

impl<'a> IntoIterator for &'a IpSet {
    type Item = &'a IpAddr;
    type IntoIter = std::slice::Iter<'a, IpAddr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
