//! Fuzz target for structured criteria.
//!
//! Generates arbitrary contact criteria and rows, then checks that
//! evaluation agrees with the documented filter semantics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_criteria_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yocoma_query::{Contact, ContactCriteria, LongFilter, PredicateBuilder, StringFilter, TextMatch};

#[derive(Debug, Arbitrary)]
struct FuzzLongFilter {
    equals: Option<i64>,
    r#in: Option<Vec<i64>>,
    specified: Option<bool>,
    greater_than: Option<i64>,
    less_than_or_equal: Option<i64>,
}

impl From<FuzzLongFilter> for LongFilter {
    fn from(f: FuzzLongFilter) -> Self {
        let mut filter = LongFilter::new();
        if let Some(v) = f.equals {
            filter = filter.equals(v);
        }
        if let Some(values) = f.r#in {
            filter = filter.r#in(values);
        }
        if let Some(s) = f.specified {
            filter = filter.specified(s);
        }
        if let Some(v) = f.greater_than {
            filter = filter.greater_than(v);
        }
        if let Some(v) = f.less_than_or_equal {
            filter = filter.less_than_or_equal(v);
        }
        filter
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzStringFilter {
    equals: Option<String>,
    not_in: Option<Vec<String>>,
    specified: Option<bool>,
    contains: Option<String>,
    does_not_contain: Option<String>,
}

impl From<FuzzStringFilter> for StringFilter {
    fn from(f: FuzzStringFilter) -> Self {
        let mut filter = StringFilter::new();
        if let Some(v) = f.equals {
            filter = filter.equals(v);
        }
        if let Some(values) = f.not_in {
            filter = filter.not_in(values);
        }
        if let Some(s) = f.specified {
            filter = filter.specified(s);
        }
        if let Some(v) = f.contains {
            filter = filter.contains(v);
        }
        if let Some(v) = f.does_not_contain {
            filter = filter.does_not_contain(v);
        }
        filter
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzRow {
    id: i64,
    firstname: String,
    lastname: String,
    remark: Option<String>,
    team_contact_ids: Vec<i64>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    id: Option<FuzzLongFilter>,
    firstname: Option<FuzzStringFilter>,
    remark: Option<FuzzStringFilter>,
    team_contact_id: Option<FuzzLongFilter>,
    search: Option<String>,
    ignore_case: bool,
    row: FuzzRow,
}

fuzz_target!(|input: Input| {
    let mut criteria = ContactCriteria::new();
    criteria.id = input.id.map(Into::into);
    criteria.firstname = input.firstname.map(Into::into);
    criteria.remark = input.remark.map(Into::into);
    criteria.team_contact_id = input.team_contact_id.map(Into::into);
    criteria.search = input.search.map(|text| StringFilter::new().contains(text));

    let mut contact = Contact::new(input.row.id, input.row.firstname, input.row.lastname);
    if let Some(remark) = input.row.remark {
        contact = contact.remark(remark);
    }
    for id in input.row.team_contact_ids {
        contact = contact.team_contact(id);
    }

    let text_match = if input.ignore_case { TextMatch::IgnoreCase } else { TextMatch::CaseSensitive };
    let builder = PredicateBuilder::new(text_match);
    let spec = builder.build(Some(&criteria));
    let matched = spec.matches(&contact);

    // Dropping a filter can only widen the result.
    let mut wider = criteria.clone();
    wider.search = None;
    if matched {
        assert!(builder.build(Some(&wider)).matches(&contact));
    }

    // An empty membership set never matches.
    let mut empty = criteria;
    empty.id = Some(LongFilter::new().r#in(Vec::<i64>::new()));
    assert!(!builder.build(Some(&empty)).matches(&contact));
});
