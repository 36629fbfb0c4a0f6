//! Criteria over [`Team`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Criteria, Target, TargetOf, entry, shown, write_criteria};
use crate::domain::{Team, TeamField, TeamRelation};
use crate::filter::{FieldFilter, LongFilter, StringFilter};

/// Filters selecting teams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TeamCriteria {
    /// `id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<LongFilter>,
    /// `name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<StringFilter>,
    /// `motto`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motto: Option<StringFilter>,
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<StringFilter>,
    /// Identifier of a membership of the team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_contact_id: Option<LongFilter>,
    /// Free text matched against name, motto and description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<StringFilter>,
    /// Deduplicate result rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,
}

impl TeamCriteria {
    /// Criteria without any filter.
    pub fn new() -> Self {
        Self::default()
    }

    filter_accessors! {
        id, id_mut, with_id: LongFilter;
        name, name_mut, with_name: StringFilter;
        motto, motto_mut, with_motto: StringFilter;
        description, description_mut, with_description: StringFilter;
        team_contact_id, team_contact_id_mut, with_team_contact_id: LongFilter;
        search, search_mut, with_search: StringFilter;
    }

    /// Set the distinct directive.
    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = Some(distinct);
        self
    }
}

impl Criteria for TeamCriteria {
    type Model = Team;

    const SEARCH_FIELDS: &'static [TeamField] = &[TeamField::Name, TeamField::Motto, TeamField::Description];

    fn filters(&self) -> Vec<(TargetOf<Team>, &dyn FieldFilter)> {
        [
            entry(Target::Field(TeamField::Id), &self.id),
            entry(Target::Field(TeamField::Name), &self.name),
            entry(Target::Field(TeamField::Motto), &self.motto),
            entry(Target::Field(TeamField::Description), &self.description),
            entry(Target::Related(TeamRelation::TeamContacts), &self.team_contact_id),
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
            "name" => self.name_mut(),
            "motto" => self.motto_mut(),
            "description" => self.description_mut(),
            "teamContactId" => self.team_contact_id_mut(),
            "search" => self.search_mut(),
            _ => return None,
        };
        Some(filter)
    }
}

impl fmt::Display for TeamCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_criteria(
            f,
            "TeamCriteria",
            &[
                ("id", shown(&self.id)),
                ("name", shown(&self.name)),
                ("motto", shown(&self.motto)),
                ("description", shown(&self.description)),
                ("teamContactId", shown(&self.team_contact_id)),
                ("search", shown(&self.search)),
            ],
            self.distinct,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_present_filters() {
        let criteria = TeamCriteria::new()
            .with_motto(StringFilter::new().does_not_contain("lazy"))
            .with_search(StringFilter::new().contains("ops"));
        assert_eq!(
            criteria.to_string(),
            "TeamCriteria{motto=StringFilter[doesNotContain=lazy], search=StringFilter[contains=ops]}"
        );
    }

    #[test]
    fn test_search_is_not_in_filter_table() {
        let criteria = TeamCriteria::new().with_search(StringFilter::new().contains("ops"));
        assert!(criteria.filters().is_empty());
        assert!(criteria.search().is_some());
    }
}
