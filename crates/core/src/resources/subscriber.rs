//! Newsletter subscribers.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::types::{RowId, Timestamp};
use crate::validation::RuleSet;

define_status_enum! {
    SubscriberPlan {
        #[default]
        Free = "free",
        Premium = "premium",
        Pro = "pro",
    }
}

define_status_enum! {
    /// Deliverability state of the subscription.
    SubscriberStatus {
        #[default]
        Active = "active",
        Unsubscribed = "unsubscribed",
        Bounced = "bounced",
    }
}

fn default_locale() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[serde(rename = "_id", alias = "id")]
    pub id: RowId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub plan: SubscriberPlan,
    #[serde(default)]
    pub status: SubscriberStatus,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub subscribed_at: Timestamp,
    #[serde(default)]
    pub last_email_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriberDraft {
    pub name: String,
    pub email: String,
    pub plan: SubscriberPlan,
    pub status: SubscriberStatus,
    pub locale: String,
    pub tags: Vec<String>,
}

impl Default for SubscriberDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            plan: SubscriberPlan::default(),
            status: SubscriberStatus::default(),
            locale: default_locale(),
            tags: Vec::new(),
        }
    }
}

pub struct Subscribers;

impl Resource for Subscribers {
    type Row = Subscriber;
    type Draft = SubscriberDraft;

    const ENTITY: &'static str = "Subscriber";
    const PATH: &'static str = "subscribers";
    const FILTERS: &'static [&'static str] = &["plan", "status"];

    fn id(row: &Subscriber) -> &str {
        &row.id
    }

    fn created_at(row: &Subscriber) -> Timestamp {
        row.subscribed_at
    }

    fn search_fields(row: &Subscriber) -> Vec<&str> {
        vec![row.name.as_str(), row.email.as_str()]
    }

    fn filter_value<'a>(row: &'a Subscriber, filter: &str) -> Option<&'a str> {
        match filter {
            "plan" => Some(row.plan.as_str()),
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

    fn to_draft(row: &Subscriber) -> SubscriberDraft {
        SubscriberDraft {
            name: row.name.clone(),
            email: row.email.clone(),
            plan: row.plan,
            status: row.status,
            locale: row.locale.clone(),
            tags: row.tags.clone(),
        }
    }

    fn build(id: RowId, draft: &SubscriberDraft, now: Timestamp) -> Subscriber {
        let mut subscriber = Subscriber {
            id,
            name: String::new(),
            email: String::new(),
            plan: SubscriberPlan::default(),
            status: SubscriberStatus::default(),
            locale: default_locale(),
            tags: Vec::new(),
            subscribed_at: now,
            last_email_at: None,
        };
        Self::apply(&mut subscriber, draft, now);
        subscriber
    }

    fn apply(row: &mut Subscriber, draft: &SubscriberDraft, _now: Timestamp) {
        row.name = draft.name.trim().to_string();
        row.email = draft.email.trim().to_string();
        row.plan = draft.plan;
        row.status = draft.status;
        row.locale = if draft.locale.trim().is_empty() {
            default_locale()
        } else {
            draft.locale.trim().to_string()
        };
        row.tags = draft
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
}
