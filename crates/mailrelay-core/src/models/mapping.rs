/// Forwarding mapping models
use crate::constants::CATCH_ALL_KEY;
use crate::error::RelayError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// One or more forwarding destinations for a mapping key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Destinations {
    One(String),
    Many(Vec<String>),
}

impl Destinations {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(address) => std::slice::from_ref(address),
            Self::Many(addresses) => addresses,
        }
    }
}

/// Recipient to destination translation table
///
/// Keys take one of four forms, tried in this order when resolving:
/// a full address (`info@acme.com`), a domain (`@acme.com`), a local part
/// (`info`) and the catch-all (`@`). Keys are lower-cased when parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Destinations>")]
pub struct ForwardMapping(BTreeMap<String, Destinations>);

impl From<BTreeMap<String, Destinations>> for ForwardMapping {
    fn from(entries: BTreeMap<String, Destinations>) -> Self {
        let mut mapping = BTreeMap::new();
        for (key, destinations) in entries {
            match mapping.entry(key.to_lowercase()) {
                Entry::Vacant(slot) => {
                    slot.insert(destinations);
                }
                // Keys differing only in case share one entry
                Entry::Occupied(mut slot) => {
                    tracing::warn!(key = %slot.key(), "Merging mapping keys that differ only in case");
                    let merged = slot
                        .get()
                        .as_slice()
                        .iter()
                        .chain(destinations.as_slice())
                        .cloned()
                        .collect();
                    slot.insert(Destinations::Many(merged));
                }
            }
        }
        Self(mapping)
    }
}

impl ForwardMapping {
    /// Parses the JSON value stored in the parameter store
    pub fn parse(raw: &str) -> Result<Self, RelayError> {
        serde_json::from_str(raw).map_err(|e| RelayError::Mapping(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Destinations::as_slice)
    }

    /// Finds the destinations for an original recipient
    ///
    /// With `allow_plus_sign`, a `+tag` suffix on the local part is ignored,
    /// so `info+news@acme.com` resolves like `info@acme.com`.
    pub fn resolve(&self, recipient: &str, allow_plus_sign: bool) -> Option<&[String]> {
        let mut key = recipient.trim().to_lowercase();
        if allow_plus_sign {
            key = strip_plus_tag(&key);
        }

        if let Some(destinations) = self.get(&key) {
            return Some(destinations);
        }

        let (user, domain) = match key.rfind('@') {
            Some(pos) => (&key[..pos], Some(&key[pos..])),
            None => (key.as_str(), None),
        };

        domain
            .and_then(|domain| self.get(domain))
            .or_else(|| {
                if user.is_empty() {
                    None
                } else {
                    self.get(user)
                }
            })
            .or_else(|| self.get(CATCH_ALL_KEY))
    }
}

fn strip_plus_tag(address: &str) -> String {
    match address.find('+') {
        Some(plus) => match address[plus..].find('@') {
            Some(at) => format!("{}{}", &address[..plus], &address[plus + at..]),
            None => address.to_string(),
        },
        None => address.to_string(),
    }
}
