//! Fuzz target for query-string decoding.
//!
//! Arbitrary query strings are decoded for every criteria type. Whatever
//! decodes must translate into a specification without panicking.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_query_params
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use yocoma_query::{
    Contact, ContactCriteria, Criteria, PredicateBuilder, QueryParams, Team, TeamContact, TeamContactCriteria,
    TeamCriteria, TextMatch,
};

fn exercise<C: Criteria>(query: &str, sample: &C::Model) {
    let Ok(params) = QueryParams::<C>::parse(query) else {
        return;
    };
    for text_match in [TextMatch::CaseSensitive, TextMatch::IgnoreCase] {
        let spec = PredicateBuilder::new(text_match).build(Some(&params.criteria));
        let _ = spec.matches(sample);
        let _ = spec.to_string();
    }
    let _ = params.criteria.to_string();
    let _ = params.page.offset();
}

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };
    exercise::<ContactCriteria>(query, &Contact::new(1, "Ann", "Lee").remark("Ünïcode").team_contact(7));
    exercise::<TeamCriteria>(query, &Team::new(1, "Core").motto("Ship it"));
    exercise::<TeamContactCriteria>(query, &TeamContact::new(1).role("Lead").contact(1));
});
