//! Translation of [`ReminderQuery`] into a Firestore structured query.

use serde_json::{Value, json};

use super::document::string_value;
use crate::store::{DateFilter, ReminderQuery};

fn field_filter(field: &str, op: &str, value: &str) -> Value {
    json!({
        "fieldFilter": {
            "field": { "fieldPath": field },
            "op": op,
            "value": string_value(value),
        }
    })
}

/// Request body for `documents:runQuery`.
///
/// ISO dates order lexicographically, so the date range is a plain string
/// range on the `date` field. The time is not filtered here: stored times may
/// be spelled `09:30 AM` or `9:30 AM`, so it is compared after decoding.
pub fn run_query_body(collection: &str, query: &ReminderQuery) -> Value {
    let mut filters = vec![field_filter("username", "EQUAL", &query.username)];

    match query.date {
        DateFilter::Any => {}
        DateFilter::On(date) => filters.push(field_filter("date", "EQUAL", &date.to_string())),
        DateFilter::Between(from, to) => {
            filters.push(field_filter("date", "GREATER_THAN_OR_EQUAL", &from.to_string()));
            filters.push(field_filter("date", "LESS_THAN_OR_EQUAL", &to.to_string()));
        }
        DateFilter::Since(from) => {
            filters.push(field_filter("date", "GREATER_THAN_OR_EQUAL", &from.to_string()))
        }
    }
    if let Some(title) = &query.title {
        filters.push(field_filter("title", "EQUAL", title));
    }

    let filter = if filters.len() == 1 {
        filters.remove(0)
    } else {
        json!({ "compositeFilter": { "op": "AND", "filters": filters } })
    };

    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": filter,
        }
    })
}
