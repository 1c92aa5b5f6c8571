//! App users managed from the admin dashboard.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::types::{RowId, Timestamp};
use crate::validation::RuleSet;

define_status_enum! {
    /// What kind of account the user holds.
    UserRole {
        #[default]
        Fan = "fan",
        Business = "business",
        Admin = "admin",
    }
}

define_status_enum! {
    /// Whether the account may sign in.
    UserStatus {
        #[default]
        Active = "active",
        Suspended = "suspended",
    }
}

/// Name stored when a user is created without one.
pub const UNNAMED_USER: &str = "Unnamed";

/// Language assumed when none is given.
pub const DEFAULT_LANGUAGE: &str = "en";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: RowId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub premium: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub premium: bool,
    pub language: String,
    pub notes: String,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: UserRole::default(),
            status: UserStatus::default(),
            premium: false,
            language: default_language(),
            notes: String::new(),
        }
    }
}

pub struct Users;

impl Resource for Users {
    type Row = User;
    type Draft = UserDraft;

    const ENTITY: &'static str = "User";
    const PATH: &'static str = "users";
    const FILTERS: &'static [&'static str] = &["role", "status"];

    fn id(row: &User) -> &str {
        &row.id
    }

    fn created_at(row: &User) -> Timestamp {
        row.created_at
    }

    fn search_fields(row: &User) -> Vec<&str> {
        vec![row.name.as_str(), row.email.as_str()]
    }

    fn filter_value<'a>(row: &'a User, filter: &str) -> Option<&'a str> {
        match filter {
            "role" => Some(row.role.as_str()),
            "status" => Some(row.status.as_str()),
            _ => None,
        }
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .required("name", "Name is required")
            .required("email", "Email is required")
            .email("email", "Invalid email")
    }

    fn to_draft(row: &User) -> UserDraft {
        UserDraft {
            name: row.name.clone(),
            email: row.email.clone(),
            role: row.role,
            status: row.status,
            premium: row.premium,
            language: row.language.clone(),
            notes: row.notes.clone(),
        }
    }

    fn build(id: RowId, draft: &UserDraft, now: Timestamp) -> User {
        let mut user = User {
            id,
            name: String::new(),
            email: String::new(),
            role: UserRole::default(),
            status: UserStatus::default(),
            premium: false,
            language: default_language(),
            notes: String::new(),
            created_at: now,
        };
        Self::apply(&mut user, draft, now);
        user
    }

    fn apply(row: &mut User, draft: &UserDraft, _now: Timestamp) {
        let name = draft.name.trim();
        row.name = if name.is_empty() {
            UNNAMED_USER.to_string()
        } else {
            name.to_string()
        };
        row.email = draft.email.trim().to_string();
        row.role = draft.role;
        row.status = draft.status;
        row.premium = draft.premium;
        row.language = if draft.language.trim().is_empty() {
            default_language()
        } else {
            draft.language.trim().to_string()
        };
        row.notes = draft.notes.clone();
    }
}
