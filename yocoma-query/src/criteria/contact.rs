//! Criteria over [`Contact`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Criteria, Target, TargetOf, entry, shown, write_criteria};
use crate::domain::{Contact, ContactField, ContactRelation};
use crate::filter::{FieldFilter, LongFilter, StringFilter};

/// Filters selecting contacts.
///
/// `team_contact_id` is a cross-entity filter: a contact matches when at least
/// one of its memberships has a matching identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ContactCriteria {
    /// `id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<LongFilter>,
    /// `firstname`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<StringFilter>,
    /// `lastname`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<StringFilter>,
    /// `email`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<StringFilter>,
    /// `phone`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<StringFilter>,
    /// `remark`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<StringFilter>,
    /// Identifier of a membership of the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_contact_id: Option<LongFilter>,
    /// Free text matched against firstname, lastname and remark.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<StringFilter>,
    /// Deduplicate result rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,
}

impl ContactCriteria {
    /// Criteria without any filter.
    pub fn new() -> Self {
        Self::default()
    }

    filter_accessors! {
        id, id_mut, with_id: LongFilter;
        firstname, firstname_mut, with_firstname: StringFilter;
        lastname, lastname_mut, with_lastname: StringFilter;
        email, email_mut, with_email: StringFilter;
        phone, phone_mut, with_phone: StringFilter;
        remark, remark_mut, with_remark: StringFilter;
        team_contact_id, team_contact_id_mut, with_team_contact_id: LongFilter;
        search, search_mut, with_search: StringFilter;
    }

    /// Set the distinct directive.
    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = Some(distinct);
        self
    }
}

impl Criteria for ContactCriteria {
    type Model = Contact;

    const SEARCH_FIELDS: &'static [ContactField] =
        &[ContactField::Firstname, ContactField::Lastname, ContactField::Remark];

    fn filters(&self) -> Vec<(TargetOf<Contact>, &dyn FieldFilter)> {
        [
            entry(Target::Field(ContactField::Id), &self.id),
            entry(Target::Field(ContactField::Firstname), &self.firstname),
            entry(Target::Field(ContactField::Lastname), &self.lastname),
            entry(Target::Field(ContactField::Email), &self.email),
            entry(Target::Field(ContactField::Phone), &self.phone),
            entry(Target::Field(ContactField::Remark), &self.remark),
            entry(Target::Related(ContactRelation::TeamContacts), &self.team_contact_id),
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
            "firstname" => self.firstname_mut(),
            "lastname" => self.lastname_mut(),
            "email" => self.email_mut(),
            "phone" => self.phone_mut(),
            "remark" => self.remark_mut(),
            "teamContactId" => self.team_contact_id_mut(),
            "search" => self.search_mut(),
            _ => return None,
        };
        Some(filter)
    }
}

impl fmt::Display for ContactCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_criteria(
            f,
            "ContactCriteria",
            &[
                ("id", shown(&self.id)),
                ("firstname", shown(&self.firstname)),
                ("lastname", shown(&self.lastname)),
                ("email", shown(&self.email)),
                ("phone", shown(&self.phone)),
                ("remark", shown(&self.remark)),
                ("teamContactId", shown(&self.team_contact_id)),
                ("search", shown(&self.search)),
            ],
            self.distinct,
        )
    }
}
