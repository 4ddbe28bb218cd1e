use crate::correspondence::Correspondence;
use crate::duration::parse_duration;
use crate::config::{property, read_ini};
use crate::error::{Error, Result};
use chrono::{Days, NaiveDate};
use ini::{Ini, Properties};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Somebody to keep in touch with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    /// Lower-cased, in address book order.
    pub addresses: Vec<String>,
    /// Days allowed between mails.
    pub frequency: u32,
}

impl Contact {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, addresses: &[S], frequency: u32) -> Self {
        Contact {
            name: name.into(),
            addresses: addresses
                .iter()
                .map(|address| address.as_ref().to_lowercase())
                .collect(),
            frequency,
        }
    }

    /// Latest date mail was sent to any of the contact's addresses.
    pub fn last_sent(&self, sent: &Correspondence) -> Option<NaiveDate> {
        self.addresses
            .iter()
            .filter_map(|address| sent.get(address))
            .max()
    }

    /// Date after which a reminder is due, or `None` without any record.
    pub fn trigger(&self, sent: &Correspondence) -> Option<NaiveDate> {
        self.last_sent(sent).map(|last| {
            last.checked_add_days(Days::new(u64::from(self.frequency)))
                .unwrap_or(NaiveDate::MAX)
        })
    }

    /// Builds a contact from the address book record `[name]` if it holds
    /// `field`.
    fn from_section(name: &str, section: &Properties, field: &str) -> Result<Option<Self>> {
        let frequency = match property(section, field) {
            Some(frequency) => parse_duration(frequency)?,
            None => return Ok(None),
        };
        let addresses: Vec<_> = property(section, "email")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .collect();
        let first = match addresses.first() {
            Some(first) => *first,
            None => return Err(Error::MissingAddress(name.to_string())),
        };
        let name = match property(section, "name") {
            Some(name) if !name.is_empty() => name,
            _ => first,
        };
        Ok(Some(Contact::new(name, &addresses, frequency)))
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} <{}> ({} days)",
            self.name,
            self.addresses.join(", "),
            self.frequency
        )
    }
}

/// Contacts with a reminder frequency, in address book order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    contacts: Vec<Contact>,
}

impl Roster {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Roster { contacts }
    }

    /// Loads every address book record holding the `field` frequency.
    pub fn load(addressbook: &Path, field: &str) -> Result<Self> {
        if !addressbook.is_file() {
            return Err(Error::AddressbookNotFound(addressbook.to_owned()));
        }
        let ini = read_ini(addressbook).map_err(|source| Error::Addressbook {
            path: addressbook.to_owned(),
            source,
        })?;
        let roster = Self::from_ini(&ini, field)?;
        debug!(
            contacts = roster.len(),
            path = %addressbook.display(),
            field,
            "loaded address book"
        );
        Ok(roster)
    }

    pub fn from_ini(ini: &Ini, field: &str) -> Result<Self> {
        let mut contacts = vec![];
        // Records are numbered sections, entries outside any section are not
        // contacts.
        for (name, section) in ini.iter() {
            let name = match name {
                Some(name) => name,
                None => continue,
            };
            if let Some(contact) = Contact::from_section(name, section, field)? {
                contacts.push(contact);
            }
        }
        Ok(Roster { contacts })
    }

    /// Every address of every contact, in order.
    pub fn addresses(&self) -> Vec<&str> {
        self.contacts
            .iter()
            .flat_map(|contact| contact.addresses.iter().map(String::as_str))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.iter()
    }
}
