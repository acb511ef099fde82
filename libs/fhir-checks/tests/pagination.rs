//! Collector behavior against synthetic paged listings.

mod support;

use glossa_checks::{collect, FatalError};
use serde_json::json;
use support::*;

fn value_set(id: &str) -> serde_json::Value {
    json!({"resourceType": "ValueSet", "id": id})
}

#[test]
fn emits_all_records_in_order_across_page_splits() {
    let first = format!("{BASE}/ConceptMap");
    let page2 = format!("{BASE}/ConceptMap?page=2");
    let page3 = format!("{BASE}/ConceptMap?page=3");

    let mut fake = FakeTerminology::default();
    fake.pages.insert(
        first.clone(),
        searchset(
            vec![concept_map("cm-1", "VSa"), concept_map("cm-2", "VSb")],
            Some(&page2),
        ),
    );
    fake.pages.insert(
        page2,
        searchset(
            vec![concept_map("cm-3", "VSc"), concept_map("cm-4", "VSd")],
            Some(&page3),
        ),
    );
    fake.pages
        .insert(page3, searchset(vec![concept_map("cm-5", "VSe")], None));

    let listing = collect(&fake, "ConceptMap", &first).unwrap();
    let ids: Vec<&str> = listing
        .records
        .iter()
        .map(|r| r.id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, ["cm-1", "cm-2", "cm-3", "cm-4", "cm-5"]);
    assert_eq!(listing.raw_entries, 5);
}

#[test]
fn page_boundaries_do_not_change_the_result() {
    // Same five resources, split 1/4 instead of 2/2/1.
    let first = format!("{BASE}/ConceptMap");
    let page2 = format!("{BASE}/ConceptMap?page=2");

    let mut fake = FakeTerminology::default();
    fake.pages.insert(
        first.clone(),
        searchset(vec![concept_map("cm-1", "VSa")], Some(&page2)),
    );
    fake.pages.insert(
        page2,
        searchset(
            vec![
                concept_map("cm-2", "VSb"),
                concept_map("cm-3", "VSc"),
                concept_map("cm-4", "VSd"),
                concept_map("cm-5", "VSe"),
            ],
            None,
        ),
    );

    let listing = collect(&fake, "ConceptMap", &first).unwrap();
    let ids: Vec<&str> = listing
        .records
        .iter()
        .map(|r| r.id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, ["cm-1", "cm-2", "cm-3", "cm-4", "cm-5"]);
}

#[test]
fn repeated_next_link_aborts_instead_of_looping() {
    let first = format!("{BASE}/ValueSet");
    let mut fake = FakeTerminology::default();
    fake.pages
        .insert(first.clone(), searchset(vec![value_set("vs-1")], Some(&first)));

    match collect(&fake, "ValueSet", &first) {
        Err(FatalError::RepeatedPageLink { url }) => assert_eq!(url, first),
        other => panic!("expected RepeatedPageLink, got {other:?}"),
    }
}

#[test]
fn failed_page_fetch_is_fatal() {
    let first = format!("{BASE}/ValueSet");
    let page2 = format!("{BASE}/ValueSet?page=2");
    let mut fake = FakeTerminology::default();
    // Second page intentionally unrouted.
    fake.pages
        .insert(first.clone(), searchset(vec![value_set("vs-1")], Some(&page2)));

    match collect(&fake, "ValueSet", &first) {
        Err(FatalError::Listing { resource_type, .. }) => assert_eq!(resource_type, "ValueSet"),
        other => panic!("expected Listing error, got {other:?}"),
    }
}

#[test]
fn invalid_entries_count_raw_but_emit_no_record() {
    let first = format!("{BASE}/ValueSet");
    let mut fake = FakeTerminology::default();
    fake.pages.insert(
        first.clone(),
        searchset(
            vec![
                value_set("vs-1"),
                json!({"resourceType": "OperationOutcome", "id": "oo-1"}),
                json!({"resourceType": "ValueSet", "name": "no id or url"}),
            ],
            None,
        ),
    );

    let listing = collect(&fake, "ValueSet", &first).unwrap();
    assert_eq!(listing.raw_entries, 3);
    assert_eq!(listing.records.len(), 1);
    assert_eq!(listing.records[0].id.as_deref(), Some("vs-1"));
}

#[test]
fn listing_records_keep_name_and_url_when_present() {
    let first = format!("{BASE}/ValueSet");
    let mut fake = FakeTerminology::default();
    fake.pages.insert(
        first.clone(),
        searchset(
            vec![json!({
                "resourceType": "ValueSet",
                "id": "vs-1",
                "name": "  VSColors ",
                "url": " http://example.org/vs/colors "
            })],
            None,
        ),
    );

    let listing = collect(&fake, "ValueSet", &first).unwrap();
    let record = &listing.records[0];
    assert_eq!(record.name.as_deref(), Some("VSColors"));
    assert_eq!(record.url.as_deref(), Some("http://example.org/vs/colors"));
}
