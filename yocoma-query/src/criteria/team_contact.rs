//! Criteria over [`TeamContact`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Criteria, Target, TargetOf, entry, shown, write_criteria};
use crate::domain::{RoleTypeFilter, TeamContact, TeamContactField, TeamContactRelation};
use crate::filter::{FieldFilter, LongFilter, StringFilter};

/// Filters selecting team memberships.
///
/// `contact_id` and `team_id` constrain the referenced contact and team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TeamContactCriteria {
    /// `id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<LongFilter>,
    /// `roleType`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_type: Option<RoleTypeFilter>,
    /// `role`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<StringFilter>,
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<StringFilter>,
    /// Identifier of the member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<LongFilter>,
    /// Identifier of the team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<LongFilter>,
    /// Free text matched against role and description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<StringFilter>,
    /// Deduplicate result rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,
}

impl TeamContactCriteria {
    /// Criteria without any filter.
    pub fn new() -> Self {
        Self::default()
    }

    filter_accessors! {
        id, id_mut, with_id: LongFilter;
        role_type, role_type_mut, with_role_type: RoleTypeFilter;
        role, role_mut, with_role: StringFilter;
        description, description_mut, with_description: StringFilter;
        contact_id, contact_id_mut, with_contact_id: LongFilter;
        team_id, team_id_mut, with_team_id: LongFilter;
        search, search_mut, with_search: StringFilter;
    }

    /// Set the distinct directive.
    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = Some(distinct);
        self
    }
}

impl Criteria for TeamContactCriteria {
    type Model = TeamContact;

    const SEARCH_FIELDS: &'static [TeamContactField] =
        &[TeamContactField::Role, TeamContactField::Description];

    fn filters(&self) -> Vec<(TargetOf<TeamContact>, &dyn FieldFilter)> {
        [
            entry(Target::Field(TeamContactField::Id), &self.id),
            entry(Target::Field(TeamContactField::RoleType), &self.role_type),
            entry(Target::Field(TeamContactField::Role), &self.role),
            entry(Target::Field(TeamContactField::Description), &self.description),
            entry(Target::Related(TeamContactRelation::Contact), &self.contact_id),
            entry(Target::Related(TeamContactRelation::Team), &self.team_id),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn search(&self) -> Option<&StringFilter> {
        self.search.as_ref()
    }

    fn distinct(&self) -> Option<bool> {
        self.distinct
    }

    fn set_distinct(&mut self, distinct: Option<bool>) {
        self.distinct = distinct;
    }

    fn filter_mut(&mut self, name: &str) -> Option<&mut dyn FieldFilter> {
        let filter: &mut dyn FieldFilter = match name {
            "id" => self.id_mut(),
            "roleType" => self.role_type_mut(),
            "role" => self.role_mut(),
            "description" => self.description_mut(),
            "contactId" => self.contact_id_mut(),
            "teamId" => self.team_id_mut(),
            "search" => self.search_mut(),
            _ => return None,
        };
        Some(filter)
    }
}

impl fmt::Display for TeamContactCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_criteria(
            f,
            "TeamContactCriteria",
            &[
                ("id", shown(&self.id)),
                ("roleType", shown(&self.role_type)),
                ("role", shown(&self.role)),
                ("description", shown(&self.description)),
                ("contactId", shown(&self.contact_id)),
                ("teamId", shown(&self.team_id)),
                ("search", shown(&self.search)),
            ],
            self.distinct,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleType;
    use crate::error::ErrorCode;
    use crate::filter::Operation;

    #[test]
    fn test_role_type_filter() {
        let criteria = TeamContactCriteria::new()
            .with_role_type(RoleTypeFilter::new().r#in([RoleType::SeniorMember, RoleType::ProductOwner]));
        assert_eq!(
            criteria.to_string(),
            "TeamContactCriteria{roleType=Filter[in=[SENIOR_MEMBER, PRODUCT_OWNER]]}"
        );
    }

    #[test]
    fn test_role_type_rejects_ranges_and_unknown_names() {
        let mut criteria = TeamContactCriteria::new();
        let err = criteria
            .apply_param("roleType", Operation::GreaterThan, "SCRUM_MASTER")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFilter);

        let err = criteria.apply_param("roleType", Operation::Equals, "CAPTAIN").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
    }

    #[test]
    fn test_deserialize_role_type() {
        let criteria: TeamContactCriteria =
            serde_json::from_str(r#"{"roleType":{"equals":"SCRUM_MASTER"},"teamId":{"specified":false}}"#)
                .unwrap();
        assert_eq!(
            criteria.role_type,
            Some(RoleTypeFilter::new().equals(RoleType::ScrumMaster))
        );
        assert_eq!(criteria.team_id, Some(LongFilter::new().specified(false)));
    }
}
