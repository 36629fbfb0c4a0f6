//! Integration tests for criteria-driven querying.
//!
//! These tests drive the query services end to end:
//! - Per-field filters against stored contacts, teams and memberships
//! - Cross-entity filters and free-text search
//! - Query-string decoding into criteria and page requests

use pretty_assertions::assert_eq;
use yocoma::prelude::*;
use yocoma::query::{BooleanFilter, ErrorCode, QueryConfig, TextMatch, criteria_from_json};
use yocoma::{ContactQueryService, TeamContactQueryService, TeamQueryService};

fn contacts() -> MemoryRepository<Contact> {
    MemoryRepository::with_entities([
        Contact::new(3, "Ann", "Lee").remark("likes rust").team_contact(7),
        Contact::new(5, "Bob", "Ray").email("bob@example.com"),
        Contact::new(7, "Cleo", "Annan").team_contact(8).team_contact(9),
        Contact::new(10, "Dan", "Moss").remark("on holiday"),
        Contact::new(12, "Eve", "Stone").phone("555-0100"),
    ])
    .unwrap()
}

fn teams() -> MemoryRepository<Team> {
    MemoryRepository::with_entities([
        Team::new(1, "Core").motto("Ship it").team_contact(7),
        Team::new(2, "Ops").description("Keeps the lights on").team_contact(8),
        Team::new(3, "Design"),
    ])
    .unwrap()
}

fn team_contacts() -> MemoryRepository<TeamContact> {
    MemoryRepository::with_entities([
        TeamContact::new(7).role_type(RoleType::SeniorMember).role("Lead").contact(3).team(1),
        TeamContact::new(8).role_type(RoleType::ProductOwner).contact(7).team(2),
        TeamContact::new(9).role_type(RoleType::ScrumMaster).description("facilitates").contact(7),
    ])
    .unwrap()
}

async fn contact_ids(criteria: &ContactCriteria) -> Vec<i64> {
    let service = ContactQueryService::new(contacts());
    let found = service.find_by_criteria(Some(criteria)).await.unwrap();
    let count = service.count_by_criteria(Some(criteria)).await.unwrap();
    assert_eq!(count, found.len() as u64, "count disagrees with listing for {}", criteria);
    found.into_iter().map(|c| c.id).collect()
}

async fn team_contact_ids(criteria: &TeamContactCriteria) -> Vec<i64> {
    let service = TeamContactQueryService::new(team_contacts());
    let found = service.find_by_criteria(Some(criteria)).await.unwrap();
    found.into_iter().map(|tc| tc.id).collect()
}

/// An absent criteria and an empty one select every row
#[tokio::test]
async fn test_empty_criteria_selects_everything() {
    let service = ContactQueryService::new(contacts());
    assert_eq!(service.count_by_criteria(None).await.unwrap(), 5);
    assert_eq!(contact_ids(&ContactCriteria::new()).await, vec![3, 5, 7, 10, 12]);
}

#[tokio::test]
async fn test_firstname_equals() {
    let criteria = ContactCriteria::new().with_firstname(StringFilter::new().equals("Ann"));
    assert_eq!(contact_ids(&criteria).await, vec![3]);

    let criteria = ContactCriteria::new().with_firstname(StringFilter::new().equals("Zed"));
    assert!(contact_ids(&criteria).await.is_empty());
}

#[tokio::test]
async fn test_firstname_not_equals() {
    let criteria = ContactCriteria::new().with_firstname(StringFilter::new().not_equals("Ann"));
    assert_eq!(contact_ids(&criteria).await, vec![5, 7, 10, 12]);
}

#[tokio::test]
async fn test_lastname_in() {
    let criteria = ContactCriteria::new().with_lastname(StringFilter::new().r#in(["Lee", "Stone"]));
    assert_eq!(contact_ids(&criteria).await, vec![3, 12]);

    let criteria = ContactCriteria::new().with_lastname(StringFilter::new().r#in(["Nobody"]));
    assert!(contact_ids(&criteria).await.is_empty());
}

#[tokio::test]
async fn test_empty_in_matches_nothing() {
    let criteria = ContactCriteria::new().with_id(LongFilter::new().r#in(Vec::<i64>::new()));
    assert!(contact_ids(&criteria).await.is_empty());
}

#[tokio::test]
async fn test_empty_not_in_matches_everything() {
    let criteria = ContactCriteria::new().with_id(LongFilter::new().not_in(Vec::<i64>::new()));
    assert_eq!(contact_ids(&criteria).await.len(), 5);
}

#[tokio::test]
async fn test_specified_partitions_rows() {
    let present = ContactCriteria::new().with_remark(StringFilter::new().specified(true));
    let absent = ContactCriteria::new().with_remark(StringFilter::new().specified(false));

    assert_eq!(contact_ids(&present).await, vec![3, 10]);
    assert_eq!(contact_ids(&absent).await, vec![5, 7, 12]);
}

/// contains and doesNotContain split the rows that have a value
#[tokio::test]
async fn test_contains_and_does_not_contain() {
    let contains = ContactCriteria::new().with_remark(StringFilter::new().contains("rust"));
    let excludes = ContactCriteria::new().with_remark(StringFilter::new().does_not_contain("rust"));

    assert_eq!(contact_ids(&contains).await, vec![3]);
    assert_eq!(contact_ids(&excludes).await, vec![10]);
}

#[tokio::test]
async fn test_contains_is_case_sensitive_by_default() {
    let criteria = ContactCriteria::new().with_lastname(StringFilter::new().contains("nan"));
    assert_eq!(contact_ids(&criteria).await, vec![7]);

    let criteria = ContactCriteria::new().with_lastname(StringFilter::new().contains("ANN"));
    assert!(contact_ids(&criteria).await.is_empty());
}

#[tokio::test]
async fn test_ignore_case_policy() {
    let config = QueryConfig {
        text_match: TextMatch::IgnoreCase,
        ..QueryConfig::default()
    };
    let service = ContactQueryService::from_config(contacts(), &config);
    let criteria = ContactCriteria::new().with_lastname(StringFilter::new().contains("ANN"));
    assert_eq!(service.count_by_criteria(Some(&criteria)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_id_range() {
    let criteria = ContactCriteria::new().with_id(LongFilter::new().greater_than(5).less_than_or_equal(10));
    assert_eq!(contact_ids(&criteria).await, vec![7, 10]);

    let criteria = ContactCriteria::new().with_id(LongFilter::new().greater_than_or_equal(5).less_than(7));
    assert_eq!(contact_ids(&criteria).await, vec![5]);
}

#[tokio::test]
async fn test_contradictory_range_matches_nothing() {
    let criteria = ContactCriteria::new().with_id(LongFilter::new().greater_than(5).less_than(3));
    assert!(contact_ids(&criteria).await.is_empty());
}

#[tokio::test]
async fn test_operations_are_conjoined() {
    let criteria = ContactCriteria::new().with_id(LongFilter::new().equals(3).r#in([5i64, 7]));
    assert!(contact_ids(&criteria).await.is_empty());
}

#[tokio::test]
async fn test_team_contact_id_equals() {
    let criteria = ContactCriteria::new().with_team_contact_id(LongFilter::new().equals(7));
    assert_eq!(contact_ids(&criteria).await, vec![3]);

    let criteria = ContactCriteria::new().with_team_contact_id(LongFilter::new().equals(9));
    assert_eq!(contact_ids(&criteria).await, vec![7]);
}

#[tokio::test]
async fn test_team_contact_id_specified() {
    let members = ContactCriteria::new().with_team_contact_id(LongFilter::new().specified(true));
    let loners = ContactCriteria::new().with_team_contact_id(LongFilter::new().specified(false));

    assert_eq!(contact_ids(&members).await, vec![3, 7]);
    assert_eq!(contact_ids(&loners).await, vec![5, 10, 12]);
}

#[tokio::test]
async fn test_contact_search() {
    let criteria = ContactCriteria::new().with_search(StringFilter::new().contains("Ann"));
    assert_eq!(contact_ids(&criteria).await, vec![3, 7]);

    let criteria = ContactCriteria::new().with_search(StringFilter::new().contains("holiday"));
    assert_eq!(contact_ids(&criteria).await, vec![10]);
}

#[tokio::test]
async fn test_search_does_not_look_at_email() {
    let criteria = ContactCriteria::new().with_search(StringFilter::new().contains("example"));
    assert!(contact_ids(&criteria).await.is_empty());
}

#[tokio::test]
async fn test_search_combines_with_filters() {
    let criteria = ContactCriteria::new()
        .with_search(StringFilter::new().contains("Ann"))
        .with_id(LongFilter::new().greater_than(3));
    assert_eq!(contact_ids(&criteria).await, vec![7]);
}

#[tokio::test]
async fn test_team_filters() {
    let service = TeamQueryService::new(teams());

    let criteria = TeamCriteria::new().with_search(StringFilter::new().contains("lights"));
    let found = service.find_by_criteria(Some(&criteria)).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ops");

    let criteria = TeamCriteria::new().with_team_contact_id(LongFilter::new().r#in([7i64, 8]));
    assert_eq!(service.count_by_criteria(Some(&criteria)).await.unwrap(), 2);

    let criteria = TeamCriteria::new().with_motto(StringFilter::new().specified(false));
    assert_eq!(service.count_by_criteria(Some(&criteria)).await.unwrap(), 2);
}

#[tokio::test]
async fn test_role_type_in() {
    let criteria = TeamContactCriteria::new()
        .with_role_type(RoleTypeFilter::new().r#in([RoleType::SeniorMember, RoleType::ScrumMaster]));
    assert_eq!(team_contact_ids(&criteria).await, vec![7, 9]);

    let criteria = TeamContactCriteria::new().with_role_type(RoleTypeFilter::new().not_equals(RoleType::ProductOwner));
    assert_eq!(team_contact_ids(&criteria).await, vec![7, 9]);
}

#[tokio::test]
async fn test_team_contact_references() {
    let criteria = TeamContactCriteria::new().with_contact_id(LongFilter::new().equals(7));
    assert_eq!(team_contact_ids(&criteria).await, vec![8, 9]);

    let criteria = TeamContactCriteria::new().with_team_id(LongFilter::new().specified(false));
    assert_eq!(team_contact_ids(&criteria).await, vec![9]);
}

#[tokio::test]
async fn test_team_contact_search() {
    let criteria = TeamContactCriteria::new().with_search(StringFilter::new().contains("facil"));
    assert_eq!(team_contact_ids(&criteria).await, vec![9]);
}

#[tokio::test]
async fn test_paging_with_sort() {
    let service = ContactQueryService::new(contacts());
    let request = PageRequest::new(1, 2).sort_by(OrderByField::desc("id"));

    let page = service.find_page_by_criteria(None, &request).await.unwrap();
    let ids: Vec<i64> = page.content.iter().map(|c| c.id).collect();

    assert_eq!(ids, vec![7, 5]);
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages(), 3);
    assert!(page.has_next());
    assert!(page.has_previous());
}

#[tokio::test]
async fn test_sort_by_unknown_column_is_rejected() {
    let service = ContactQueryService::new(contacts());
    let request = PageRequest::first(10).sort_by(OrderByField::asc("shoeSize"));
    let err = service.find_page_by_criteria(None, &request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidSort);
}

/// Query-string driven lookups
#[tokio::test]
async fn test_query_string_lookup() {
    let service = ContactQueryService::new(contacts());

    let params: QueryParams<ContactCriteria> =
        QueryParams::parse("?id.greaterThan=5&id.lessThanOrEqual=10&sort=id,desc&size=1").unwrap();
    let page = service
        .find_page_by_criteria(Some(&params.criteria), &params.page)
        .await
        .unwrap();

    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].id, 10);
}

#[tokio::test]
async fn test_query_string_search_and_distinct() {
    let params: QueryParams<ContactCriteria> = QueryParams::parse("search=Ann&distinct=true").unwrap();
    assert_eq!(params.criteria.distinct, Some(true));
    assert_eq!(contact_ids(&params.criteria).await, vec![3, 7]);
}

#[tokio::test]
async fn test_query_string_role_type() {
    let params: QueryParams<TeamContactCriteria> =
        QueryParams::parse("roleType.in=PRODUCT_OWNER,SCRUM_MASTER&contactId.equals=7").unwrap();
    assert_eq!(team_contact_ids(&params.criteria).await, vec![8, 9]);
}

#[tokio::test]
async fn test_query_string_empty_in() {
    for query in ["id.in=", "firstname.in=", "teamContactId.in="] {
        let params: QueryParams<ContactCriteria> = QueryParams::parse(query).unwrap();
        assert!(contact_ids(&params.criteria).await.is_empty(), "{} matched rows", query);
    }

    let params: QueryParams<TeamContactCriteria> = QueryParams::parse("roleType.in=").unwrap();
    assert!(team_contact_ids(&params.criteria).await.is_empty());

    let params: QueryParams<TeamCriteria> = QueryParams::parse("teamContactId.in=").unwrap();
    let service = TeamQueryService::new(teams());
    assert_eq!(service.count_by_criteria(Some(&params.criteria)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_page_number_past_the_end() {
    let service = ContactQueryService::new(contacts());
    let params: QueryParams<ContactCriteria> = QueryParams::parse("page=18446744073709551615&size=1").unwrap();
    let page = service
        .find_page_by_criteria(Some(&params.criteria), &params.page)
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_elements, 5);
    assert!(!page.has_next());
    assert!(page.has_previous());
}

#[test]
fn test_json_criteria_reject_unknown_operations() {
    for json in [
        r#"{"firstname":{"equal":"Zed"}}"#,
        r#"{"firstname":{"greaterThan":"A"}}"#,
        r#"{"teamContactId":{"contains":"7"}}"#,
    ] {
        let err = criteria_from_json::<ContactCriteria>(json).unwrap_err();
        assert!(err.is_client_error(), "{} was accepted", json);
    }

    let err = criteria_from_json::<TeamContactCriteria>(r#"{"roleType":{"lessThan":"STAKEHOLDER"}}"#).unwrap_err();
    assert!(err.is_client_error());
}

#[test]
fn test_query_string_errors() {
    let err = QueryParams::<ContactCriteria>::parse("shoeSize.equals=42").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownField);

    let err = QueryParams::<ContactCriteria>::parse("firstname.greaterThan=A").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFilter);

    let err = QueryParams::<TeamContactCriteria>::parse("roleType.equals=CAPTAIN").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParameter);
}

#[test]
fn test_boolean_filter_is_exported() {
    let filter = BooleanFilter::new().equals(true);
    assert!(!filter.is_empty());
}
