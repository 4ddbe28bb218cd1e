use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Last date mail was sent to each address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correspondence {
    last_sent: HashMap<String, NaiveDate>,
}

impl Correspondence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a send, keeping the later of the new and any known date.
    pub fn record(&mut self, address: String, date: NaiveDate) {
        self.last_sent
            .entry(address)
            .and_modify(|last| *last = (*last).max(date))
            .or_insert(date);
    }

    pub fn get(&self, address: &str) -> Option<NaiveDate> {
        self.last_sent.get(address).copied()
    }

    pub fn len(&self) -> usize {
        self.last_sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_sent.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NaiveDate)> {
        self.last_sent.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Extend<(String, NaiveDate)> for Correspondence {
    fn extend<I: IntoIterator<Item = (String, NaiveDate)>>(&mut self, iter: I) {
        for (address, date) in iter {
            self.record(address, date);
        }
    }
}

impl FromIterator<(String, NaiveDate)> for Correspondence {
    fn from_iter<I: IntoIterator<Item = (String, NaiveDate)>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

/// Restricts extraction to a set of addresses. An empty set accepts all.
#[derive(Debug, Clone, Default)]
pub struct AddressFilter {
    wanted: HashSet<String>,
}

impl AddressFilter {
    pub fn new<S: AsRef<str>>(addresses: &[S]) -> Self {
        AddressFilter {
            wanted: addresses
                .iter()
                .map(|address| address.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn accepts(&self, address: &str) -> bool {
        self.wanted.is_empty() || self.wanted.contains(address)
    }
}
