//! Contacts, teams and the memberships linking them.
//!
//! `Contact 1 - * TeamContact * - 1 Team`. A `TeamContact` carries the role a
//! contact plays in a team and references exactly one of each.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::filter::{EnumFilter, FilterValue, Value};
use crate::model::{Field, Model, Relation, RelationKind};

/// Declares a field enumeration together with its wire names.
macro_rules! model_fields {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl Field for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// The role a contact takes within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleType {
    /// Junior team member.
    JuniorMember,
    /// Senior team member.
    SeniorMember,
    /// Product owner.
    ProductOwner,
    /// Scrum master.
    ScrumMaster,
    /// Stakeholder outside the team.
    Stakeholder,
}

impl RoleType {
    /// Every role, in declaration order.
    pub const ALL: [RoleType; 5] = [
        Self::JuniorMember,
        Self::SeniorMember,
        Self::ProductOwner,
        Self::ScrumMaster,
        Self::Stakeholder,
    ];

    /// The stored name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JuniorMember => "JUNIOR_MEMBER",
            Self::SeniorMember => "SENIOR_MEMBER",
            Self::ProductOwner => "PRODUCT_OWNER",
            Self::ScrumMaster => "SCRUM_MASTER",
            Self::Stakeholder => "STAKEHOLDER",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role type '{}'", s))
    }
}

impl FilterValue for RoleType {
    const EXPECTED: &'static str =
        "one of JUNIOR_MEMBER, SENIOR_MEMBER, PRODUCT_OWNER, SCRUM_MASTER, STAKEHOLDER";

    fn to_value(&self) -> Value {
        Value::Enum(self.as_str())
    }

    fn parse_wire(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

/// Filter over a [`RoleType`] field.
pub type RoleTypeFilter = EnumFilter<RoleType>;

impl From<RoleType> for Value {
    fn from(role: RoleType) -> Self {
        Value::Enum(role.as_str())
    }
}

// ==================== Contact ====================

/// A person that can be a member of teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Identifier.
    pub id: i64,
    /// First name, required.
    pub firstname: String,
    /// Last name, required.
    pub lastname: String,
    /// E-mail address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-text remark.
    pub remark: Option<String>,
    /// Identifiers of the contact's team memberships.
    #[serde(default)]
    pub team_contact_ids: Vec<i64>,
}

impl Contact {
    /// Create a contact with only the required fields.
    pub fn new(id: i64, firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            id,
            firstname: firstname.into(),
            lastname: lastname.into(),
            email: None,
            phone: None,
            remark: None,
            team_contact_ids: Vec::new(),
        }
    }

    /// Set the e-mail address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the phone number.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the remark.
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Link a team membership.
    pub fn team_contact(mut self, team_contact_id: i64) -> Self {
        self.team_contact_ids.push(team_contact_id);
        self
    }
}

model_fields! {
    /// Filterable fields of [`Contact`].
    ContactField {
        /// `id`
        Id => "id",
        /// `firstname`
        Firstname => "firstname",
        /// `lastname`
        Lastname => "lastname",
        /// `email`
        Email => "email",
        /// `phone`
        Phone => "phone",
        /// `remark`
        Remark => "remark",
    }
}

/// Relations of [`Contact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactRelation {
    /// The contact's memberships.
    TeamContacts,
}

impl Relation for ContactRelation {
    fn name(self) -> &'static str {
        "teamContacts"
    }

    fn kind(self) -> RelationKind {
        RelationKind::OneToMany
    }

    fn related_model(self) -> &'static str {
        TeamContact::MODEL_NAME
    }
}

impl Model for Contact {
    const MODEL_NAME: &'static str = "Contact";

    type Field = ContactField;
    type Relation = ContactRelation;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }

    fn value(&self, field: ContactField) -> Value {
        match field {
            ContactField::Id => self.id.into(),
            ContactField::Firstname => self.firstname.as_str().into(),
            ContactField::Lastname => self.lastname.as_str().into(),
            ContactField::Email => self.email.as_deref().into(),
            ContactField::Phone => self.phone.as_deref().into(),
            ContactField::Remark => self.remark.as_deref().into(),
        }
    }

    fn related_ids(&self, relation: ContactRelation) -> Vec<i64> {
        match relation {
            ContactRelation::TeamContacts => self.team_contact_ids.clone(),
        }
    }
}

// ==================== Team ====================

/// A team of contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Identifier.
    pub id: i64,
    /// Team name, required.
    pub name: String,
    /// Team motto.
    pub motto: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Identifiers of the team's memberships.
    #[serde(default)]
    pub team_contact_ids: Vec<i64>,
}

impl Team {
    /// Create a team with only the required fields.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            motto: None,
            description: None,
            team_contact_ids: Vec::new(),
        }
    }

    /// Set the motto.
    pub fn motto(mut self, motto: impl Into<String>) -> Self {
        self.motto = Some(motto.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Link a team membership.
    pub fn team_contact(mut self, team_contact_id: i64) -> Self {
        self.team_contact_ids.push(team_contact_id);
        self
    }
}

model_fields! {
    /// Filterable fields of [`Team`].
    TeamField {
        /// `id`
        Id => "id",
        /// `name`
        Name => "name",
        /// `motto`
        Motto => "motto",
        /// `description`
        Description => "description",
    }
}

/// Relations of [`Team`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamRelation {
    /// The team's memberships.
    TeamContacts,
}

impl Relation for TeamRelation {
    fn name(self) -> &'static str {
        "teamContacts"
    }

    fn kind(self) -> RelationKind {
        RelationKind::OneToMany
    }

    fn related_model(self) -> &'static str {
        TeamContact::MODEL_NAME
    }
}

impl Model for Team {
    const MODEL_NAME: &'static str = "Team";

    type Field = TeamField;
    type Relation = TeamRelation;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }

    fn value(&self, field: TeamField) -> Value {
        match field {
            TeamField::Id => self.id.into(),
            TeamField::Name => self.name.as_str().into(),
            TeamField::Motto => self.motto.as_deref().into(),
            TeamField::Description => self.description.as_deref().into(),
        }
    }

    fn related_ids(&self, relation: TeamRelation) -> Vec<i64> {
        match relation {
            TeamRelation::TeamContacts => self.team_contact_ids.clone(),
        }
    }
}

// ==================== TeamContact ====================

/// Membership of a contact in a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamContact {
    /// Identifier.
    pub id: i64,
    /// Kind of role.
    pub role_type: Option<RoleType>,
    /// Free-text role title.
    pub role: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// The member.
    pub contact_id: Option<i64>,
    /// The team.
    pub team_id: Option<i64>,
}

impl TeamContact {
    /// Create an unlinked membership.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            role_type: None,
            role: None,
            description: None,
            contact_id: None,
            team_id: None,
        }
    }

    /// Set the role type.
    pub fn role_type(mut self, role_type: RoleType) -> Self {
        self.role_type = Some(role_type);
        self
    }

    /// Set the role title.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Link the member.
    pub fn contact(mut self, contact_id: i64) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    /// Link the team.
    pub fn team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

model_fields! {
    /// Filterable fields of [`TeamContact`].
    TeamContactField {
        /// `id`
        Id => "id",
        /// `roleType`
        RoleType => "roleType",
        /// `role`
        Role => "role",
        /// `description`
        Description => "description",
    }
}

/// Relations of [`TeamContact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamContactRelation {
    /// The member.
    Contact,
    /// The team.
    Team,
}

impl Relation for TeamContactRelation {
    fn name(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Team => "team",
        }
    }

    fn kind(self) -> RelationKind {
        RelationKind::ManyToOne
    }

    fn related_model(self) -> &'static str {
        match self {
            Self::Contact => Contact::MODEL_NAME,
            Self::Team => Team::MODEL_NAME,
        }
    }
}

impl Model for TeamContact {
    const MODEL_NAME: &'static str = "TeamContact";

    type Field = TeamContactField;
    type Relation = TeamContactRelation;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }

    fn value(&self, field: TeamContactField) -> Value {
        match field {
            TeamContactField::Id => self.id.into(),
            TeamContactField::RoleType => self.role_type.into(),
            TeamContactField::Role => self.role.as_deref().into(),
            TeamContactField::Description => self.description.as_deref().into(),
        }
    }

    fn related_ids(&self, relation: TeamContactRelation) -> Vec<i64> {
        let id = match relation {
            TeamContactRelation::Contact => self.contact_id,
            TeamContactRelation::Team => self.team_id,
        };
        id.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_type_names() {
        assert_eq!(RoleType::ScrumMaster.to_string(), "SCRUM_MASTER");
        assert_eq!("PRODUCT_OWNER".parse::<RoleType>(), Ok(RoleType::ProductOwner));
        assert!("product_owner".parse::<RoleType>().is_err());
        assert_eq!(
            serde_json::to_string(&RoleType::JuniorMember).unwrap(),
            "\"JUNIOR_MEMBER\""
        );
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in ContactField::ALL {
            assert_eq!(ContactField::from_name(field.name()), Some(*field));
        }
        assert_eq!(TeamContactField::from_name("roleType"), Some(TeamContactField::RoleType));
        assert_eq!(TeamField::from_name("teamContactId"), None);
    }

    #[test]
    fn test_contact_values() {
        let contact = Contact::new(1, "Ann", "Lee").email("ann@example.com");
        assert_eq!(contact.value(ContactField::Firstname), Value::from("Ann"));
        assert_eq!(contact.value(ContactField::Phone), Value::Null);
        assert_eq!(contact.value(ContactField::Id), Value::Int(1));
    }

    #[test]
    fn test_team_contact_relations() {
        let tc = TeamContact::new(3).role_type(RoleType::Stakeholder).team(9);
        assert_eq!(tc.related_ids(TeamContactRelation::Team), vec![9]);
        assert!(tc.related_ids(TeamContactRelation::Contact).is_empty());
        assert_eq!(tc.value(TeamContactField::RoleType), Value::Enum("STAKEHOLDER"));
        assert_eq!(TeamContactRelation::Contact.kind(), RelationKind::ManyToOne);
    }
}
