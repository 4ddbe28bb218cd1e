//! Bare addresses out of `To`, `Cc` and `Bcc` header values.

use mailparse::{addrparse, MailAddr};
use tracing::warn;

/// Extracts the addresses of an address list, lower-cased. Display names are
/// dropped and groups are flattened.
pub fn extract_addresses(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return vec![];
    }
    let list = match addrparse(value) {
        Ok(list) => list,
        Err(err) => {
            warn!(value, %err, "skipping unparsable address list");
            return vec![];
        }
    };
    list.iter()
        .flat_map(|addr| match addr {
            MailAddr::Single(info) => std::slice::from_ref(info),
            MailAddr::Group(group) => group.addrs.as_slice(),
        })
        .map(|info| info.addr.trim().to_lowercase())
        .filter(|address| !address.is_empty())
        .collect()
}
