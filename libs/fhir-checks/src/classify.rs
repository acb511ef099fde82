//! Record selection policies.

use crate::collector::{Listing, Record};
use crate::error::FatalError;
use crate::gateway::TerminologyApi;
use serde_json::Value;

/// Whether a record proceeds to verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected(Record),
    Skipped,
}

/// Case-sensitive prefix test, insensitive to leading whitespace.
pub fn prefix_matches(name: &str, prefix: &str) -> bool {
    name.trim_start().starts_with(prefix)
}

/// Select records whose name starts with a fixed prefix.
///
/// A record the listing returned without a name gets one detail fetch to
/// obtain it. If that fetch fails, returns the wrong type, or yields a
/// non-matching name, the record is skipped - never failed. Only selected
/// records can produce FAIL outcomes downstream.
pub struct PrefixPolicy<'a> {
    pub resource_type: &'a str,
    pub prefix: &'a str,
}

impl PrefixPolicy<'_> {
    pub fn select(&self, api: &dyn TerminologyApi, record: &Record) -> Selection {
        // Verification reads the detail by id, so an id-less record can
        // never be a candidate.
        let Some(id) = record.id.as_deref() else {
            tracing::debug!(resource_type = self.resource_type, "record without id skipped");
            return Selection::Skipped;
        };

        if let Some(name) = record.name.as_deref() {
            return if prefix_matches(name, self.prefix) {
                Selection::Selected(record.clone())
            } else {
                tracing::debug!(id, name, prefix = self.prefix, "name prefix mismatch, skipped");
                Selection::Skipped
            };
        }

        match api.read(self.resource_type, id) {
            Ok(detail) if glossa_models::resource_type(&detail) == Some(self.resource_type) => {
                let name = detail.get("name").and_then(Value::as_str).unwrap_or("");
                if prefix_matches(name, self.prefix) {
                    let mut enriched = record.clone();
                    enriched.name = Some(name.trim().to_string());
                    Selection::Selected(enriched)
                } else {
                    tracing::debug!(id, name, prefix = self.prefix, "name prefix mismatch, skipped");
                    Selection::Skipped
                }
            }
            Ok(_) => {
                tracing::debug!(id, "detail had unexpected resource type, skipped");
                Selection::Skipped
            }
            Err(err) => {
                // Intentional asymmetry: an unreachable detail excludes the
                // record instead of failing it.
                tracing::debug!(id, error = %err, "detail fetch failed, record skipped");
                Selection::Skipped
            }
        }
    }
}

/// Count policy: every record proceeds, but the raw listing total must equal
/// `expected` exactly; any mismatch aborts the run before verification.
pub fn require_exact_total(
    listing: &Listing,
    resource_type: &str,
    expected: usize,
) -> Result<(), FatalError> {
    if listing.raw_entries != expected {
        return Err(FatalError::UnexpectedTotal {
            resource_type: resource_type.to_string(),
            found: listing.raw_entries,
            expected,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_ignores_leading_whitespace_only() {
        assert!(prefix_matches("VSColor", "VS"));
        assert!(prefix_matches("  VSColor", "VS"));
        assert!(prefix_matches("\tVSColor", "VS"));
        assert!(!prefix_matches("xVS", "VS"));
        assert!(!prefix_matches("vsColor", "VS"));
        assert!(!prefix_matches("", "VS"));
    }

    #[test]
    fn exact_total_accepts_only_the_expected_count() {
        let listing = |raw_entries| Listing {
            records: Vec::new(),
            raw_entries,
        };
        assert!(require_exact_total(&listing(24), "ValueSet", 24).is_ok());

        for found in [23, 25] {
            match require_exact_total(&listing(found), "ValueSet", 24) {
                Err(FatalError::UnexpectedTotal {
                    found: f,
                    expected,
                    ..
                }) => {
                    assert_eq!(f, found);
                    assert_eq!(expected, 24);
                }
                other => panic!("expected UnexpectedTotal, got {other:?}"),
            }
        }
    }
}
