//! Admin roles and their permission flags.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::types::{RowId, Timestamp};
use crate::validation::RuleSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolePermissions {
    pub users_read: bool,
    pub users_write: bool,
    pub posts_write: bool,
    pub billing_manage: bool,
    pub venues_verify: bool,
}

impl RolePermissions {
    pub fn all() -> Self {
        Self {
            users_read: true,
            users_write: true,
            posts_write: true,
            billing_manage: true,
            venues_verify: true,
        }
    }

    pub fn granted(&self) -> usize {
        [
            self.users_read,
            self.users_write,
            self.posts_write,
            self.billing_manage,
            self.venues_verify,
        ]
        .iter()
        .filter(|flag| **flag)
        .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(rename = "_id", alias = "id")]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub perms: RolePermissions,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleDraft {
    pub name: String,
    pub description: String,
    pub perms: RolePermissions,
}

pub struct Roles;

impl Resource for Roles {
    type Row = Role;
    type Draft = RoleDraft;

    const ENTITY: &'static str = "Role";
    const PATH: &'static str = "settings/roles";

    fn id(row: &Role) -> &str {
        &row.id
    }

    fn created_at(row: &Role) -> Timestamp {
        row.created_at
    }

    fn search_fields(row: &Role) -> Vec<&str> {
        vec![row.name.as_str(), row.description.as_str()]
    }

    fn rules() -> RuleSet {
        RuleSet::new().required("name", "Name is required")
    }

    fn to_draft(row: &Role) -> RoleDraft {
        RoleDraft {
            name: row.name.clone(),
            description: row.description.clone(),
            perms: row.perms,
        }
    }

    fn build(id: RowId, draft: &RoleDraft, now: Timestamp) -> Role {
        let mut role = Role {
            id,
            name: String::new(),
            description: String::new(),
            perms: RolePermissions::default(),
            created_at: now,
        };
        Self::apply(&mut role, draft, now);
        role
    }

    fn apply(row: &mut Role, draft: &RoleDraft, _now: Timestamp) {
        row.name = draft.name.trim().to_string();
        row.description = draft.description.trim().to_string();
        row.perms = draft.perms;
    }
}
