//! Paginated record collection.

use crate::error::FatalError;
use crate::gateway::TerminologyApi;
use glossa_models::Bundle;
use serde_json::Value;

/// A discovered server resource reference.
///
/// Immutable once collected; at least one of `id`/`url` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Everything discovered across a paged listing.
#[derive(Debug, Default)]
pub struct Listing {
    /// Records passing the minimal validity check, in discovery order
    pub records: Vec<Record>,
    /// Every entry observed, including ones that failed validity
    pub raw_entries: usize,
}

/// Walk a paged listing starting at `first_url`, following `next` links
/// verbatim until the server stops supplying one.
///
/// Entries that do not declare the expected resource type, or carry neither
/// id nor url, count toward `raw_entries` but emit no record. A failed page
/// fetch is fatal for the run; so is a `next` link equal to the page it came
/// from, which would otherwise loop forever.
pub fn collect(
    api: &dyn TerminologyApi,
    resource_type: &str,
    first_url: &str,
) -> Result<Listing, FatalError> {
    let mut listing = Listing::default();
    let mut next_url = first_url.to_string();

    loop {
        let page = api.page(&next_url).map_err(|source| FatalError::Listing {
            resource_type: resource_type.to_string(),
            source,
        })?;
        let bundle = Bundle::from_value(&page).map_err(|err| FatalError::ListingShape {
            resource_type: resource_type.to_string(),
            message: err.to_string(),
        })?;

        listing.raw_entries += bundle.entry_count();
        for resource in bundle.resources_of_type(resource_type) {
            let id = string_field(resource, "id");
            let url = string_field(resource, "url");
            if id.is_none() && url.is_none() {
                tracing::debug!(resource_type, "listing entry without id or url skipped");
                continue;
            }
            listing.records.push(Record {
                id,
                name: string_field(resource, "name"),
                url,
            });
        }

        match bundle.next_link() {
            None => break,
            Some(link) if link == next_url => {
                return Err(FatalError::RepeatedPageLink { url: next_url });
            }
            Some(link) => next_url = link.to_string(),
        }
    }

    Ok(listing)
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
