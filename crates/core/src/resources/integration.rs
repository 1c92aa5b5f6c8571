//! Third-party integrations configured under settings.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::types::{RowId, Timestamp};
use crate::validation::RuleSet;

define_status_enum! {
    Provider {
        #[default]
        Stripe = "stripe",
        Paypal = "paypal",
        Firebase = "firebase",
        Custom = "custom",
    }
}

define_status_enum! {
    IntegrationStatus {
        #[default]
        Active = "active",
        Disabled = "disabled",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    #[serde(rename = "_id", alias = "id")]
    pub id: RowId,
    #[serde(default)]
    pub provider: Provider,
    pub name: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub status: IntegrationStatus,
    #[serde(default)]
    pub last_sync_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationDraft {
    pub provider: Provider,
    pub name: String,
    pub api_key: String,
    pub status: IntegrationStatus,
}

pub struct Integrations;

impl Resource for Integrations {
    type Row = Integration;
    type Draft = IntegrationDraft;

    const ENTITY: &'static str = "Integration";
    const PATH: &'static str = "settings/integrations";
    const FILTERS: &'static [&'static str] = &["provider", "status"];

    fn id(row: &Integration) -> &str {
        &row.id
    }

    fn created_at(row: &Integration) -> Timestamp {
        row.created_at
    }

    fn search_fields(row: &Integration) -> Vec<&str> {
        vec![row.name.as_str()]
    }

    fn filter_value<'a>(row: &'a Integration, filter: &str) -> Option<&'a str> {
        match filter {
            "provider" => Some(row.provider.as_str()),
            "status" => Some(row.status.as_str()),
            _ => None,
        }
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .required("name", "Name is required")
            .required("apiKey", "API key is required")
    }

    fn to_draft(row: &Integration) -> IntegrationDraft {
        IntegrationDraft {
            provider: row.provider,
            name: row.name.clone(),
            api_key: row.api_key.clone(),
            status: row.status,
        }
    }

    fn build(id: RowId, draft: &IntegrationDraft, now: Timestamp) -> Integration {
        let mut integration = Integration {
            id,
            provider: Provider::default(),
            name: String::new(),
            api_key: String::new(),
            status: IntegrationStatus::default(),
            last_sync_at: None,
            created_at: now,
        };
        Self::apply(&mut integration, draft, now);
        integration
    }

    fn apply(row: &mut Integration, draft: &IntegrationDraft, _now: Timestamp) {
        row.provider = draft.provider;
        row.name = draft.name.trim().to_string();
        row.api_key = draft.api_key.trim().to_string();
        row.status = draft.status;
    }
}
