//! Watch-party plans created by fans and venues.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::types::{RowId, Timestamp};
use crate::validation::RuleSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(rename = "_id", alias = "id")]
    pub id: RowId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub plan_photo: String,
    #[serde(default, rename = "planCreatorID", alias = "planCreatorId")]
    pub plan_creator_id: String,
    #[serde(default)]
    pub max_members: Option<i64>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub age: String,
    pub status: String,
    pub location: String,
    pub plan_photo: String,
    #[serde(rename = "planCreatorID", alias = "planCreatorId")]
    pub plan_creator_id: String,
    pub max_members: Option<i64>,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
}

pub struct Plans;

impl Resource for Plans {
    type Row = Plan;
    type Draft = PlanDraft;

    const ENTITY: &'static str = "Plan";
    const PATH: &'static str = "plans";
    const FILTERS: &'static [&'static str] = &["category", "status"];

    fn id(row: &Plan) -> &str {
        &row.id
    }

    fn created_at(row: &Plan) -> Timestamp {
        row.created_at
    }

    fn search_fields(row: &Plan) -> Vec<&str> {
        vec![
            row.title.as_str(),
            row.category.as_str(),
            row.location.as_str(),
            row.description.as_str(),
        ]
    }

    fn filter_value<'a>(row: &'a Plan, filter: &str) -> Option<&'a str> {
        match filter {
            "category" => Some(row.category.as_str()),
            "status" => Some(row.status.as_str()),
            _ => None,
        }
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .required("title", "Title is required")
            .non_negative_integer("maxMembers", "Max members must be a whole number ≥ 0")
    }

    fn to_draft(row: &Plan) -> PlanDraft {
        PlanDraft {
            title: row.title.clone(),
            description: row.description.clone(),
            category: row.category.clone(),
            age: row.age.clone(),
            status: row.status.clone(),
            location: row.location.clone(),
            plan_photo: row.plan_photo.clone(),
            plan_creator_id: row.plan_creator_id.clone(),
            max_members: row.max_members,
            start_date: row.start_date.clone(),
            end_date: row.end_date.clone(),
            start_time: row.start_time.clone(),
            end_time: row.end_time.clone(),
        }
    }

    fn build(id: RowId, draft: &PlanDraft, now: Timestamp) -> Plan {
        let mut plan = Plan {
            id,
            title: String::new(),
            description: String::new(),
            category: String::new(),
            age: String::new(),
            status: String::new(),
            location: String::new(),
            plan_photo: String::new(),
            plan_creator_id: String::new(),
            max_members: None,
            start_date: String::new(),
            end_date: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            created_at: now,
        };
        Self::apply(&mut plan, draft, now);
        plan
    }

    fn apply(row: &mut Plan, draft: &PlanDraft, _now: Timestamp) {
        row.title = draft.title.trim().to_string();
        row.description = draft.description.clone();
        row.category = draft.category.trim().to_string();
        row.age = draft.age.trim().to_string();
        row.status = draft.status.trim().to_string();
        row.location = draft.location.trim().to_string();
        row.plan_photo = draft.plan_photo.trim().to_string();
        row.plan_creator_id = draft.plan_creator_id.trim().to_string();
        row.max_members = draft.max_members;
        row.start_date = draft.start_date.clone();
        row.end_date = draft.end_date.clone();
        row.start_time = draft.start_time.clone();
        row.end_time = draft.end_time.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn title_is_required() {
        let errors = Plans::validate(&PlanDraft::default());
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn negative_member_cap_is_rejected() {
        let errors = Plans::validate(&PlanDraft {
            title: "Derby night".into(),
            max_members: Some(-2),
            ..PlanDraft::default()
        });
        assert!(errors.contains("maxMembers"));
    }

    #[test]
    fn creator_id_uses_legacy_wire_name() {
        let plan = Plans::build(
            "pl1".into(),
            &PlanDraft {
                title: "Derby night".into(),
                plan_creator_id: "U001".into(),
                ..PlanDraft::default()
            },
            Utc::now(),
        );
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["planCreatorID"], "U001");

        let draft: PlanDraft =
            serde_json::from_value(json!({"title": "x", "planCreatorId": "U002"})).unwrap();
        assert_eq!(draft.plan_creator_id, "U002");
    }

    #[test]
    fn search_covers_location() {
        let plan = Plans::build(
            "pl1".into(),
            &PlanDraft {
                title: "Derby night".into(),
                location: "Amsterdam".into(),
                ..PlanDraft::default()
            },
            Utc::now(),
        );
        assert!(Plans::search_fields(&plan).contains(&"Amsterdam"));
    }
}
