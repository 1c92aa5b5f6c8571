//! Blog posts.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::resource::Resource;
use crate::types::{RowId, Timestamp};
use crate::validation::RuleSet;

define_status_enum! {
    PostStatus {
        #[default]
        Draft = "draft",
        Published = "published",
        Archived = "archived",
    }
}

pub const DEFAULT_AUTHOR: &str = "Unknown";
pub const DEFAULT_POST_CATEGORY: &str = "General";

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

fn default_category() -> String {
    DEFAULT_POST_CATEGORY.to_string()
}

fn or_default(value: &str, fallback: fn() -> String) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", alias = "id")]
    pub id: RowId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub cover_image: String,
    pub excerpt: String,
    pub content: String,
    pub published_at: Option<Timestamp>,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            status: PostStatus::default(),
            author: default_author(),
            category: default_category(),
            tags: Vec::new(),
            cover_image: String::new(),
            excerpt: String::new(),
            content: String::new(),
            published_at: None,
        }
    }
}

pub struct Posts;

impl Resource for Posts {
    type Row = Post;
    type Draft = PostDraft;

    const ENTITY: &'static str = "Post";
    const PATH: &'static str = "blog/posts";
    const FILTERS: &'static [&'static str] = &["status", "author", "category"];

    fn id(row: &Post) -> &str {
        &row.id
    }

    fn created_at(row: &Post) -> Timestamp {
        row.created_at
    }

    fn search_fields(row: &Post) -> Vec<&str> {
        vec![
            row.title.as_str(),
            row.slug.as_str(),
            row.excerpt.as_str(),
            row.content.as_str(),
        ]
    }

    fn filter_value<'a>(row: &'a Post, filter: &str) -> Option<&'a str> {
        match filter {
            "status" => Some(row.status.as_str()),
            "author" => Some(row.author.as_str()),
            "category" => Some(row.category.as_str()),
            _ => None,
        }
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .required("title", "Title is required")
            .required("slug", "Slug is required")
            .slug("slug", "Slug must be lowercase and use hyphens")
            .required_when(
                "publishedAt",
                "status",
                json!(PostStatus::Published.as_str()),
                "Published date is required for published posts",
            )
    }

    fn to_draft(row: &Post) -> PostDraft {
        PostDraft {
            title: row.title.clone(),
            slug: row.slug.clone(),
            status: row.status,
            author: row.author.clone(),
            category: row.category.clone(),
            tags: row.tags.clone(),
            cover_image: row.cover_image.clone(),
            excerpt: row.excerpt.clone(),
            content: row.content.clone(),
            published_at: row.published_at,
        }
    }

    fn build(id: RowId, draft: &PostDraft, now: Timestamp) -> Post {
        let mut post = Post {
            id,
            title: String::new(),
            slug: String::new(),
            status: PostStatus::default(),
            author: default_author(),
            category: default_category(),
            tags: Vec::new(),
            cover_image: String::new(),
            excerpt: String::new(),
            content: String::new(),
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        Self::apply(&mut post, draft, now);
        post
    }

    fn apply(row: &mut Post, draft: &PostDraft, now: Timestamp) {
        row.title = draft.title.trim().to_string();
        row.slug = draft.slug.trim().to_lowercase();
        row.status = draft.status;
        row.author = or_default(&draft.author, default_author);
        row.category = or_default(&draft.category, default_category);
        row.tags = draft.tags.clone();
        row.cover_image = draft.cover_image.trim().to_string();
        row.excerpt = draft.excerpt.clone();
        row.content = draft.content.clone();
        row.published_at = draft.published_at;
        row.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn draft(title: &str, slug: &str) -> PostDraft {
        PostDraft {
            title: title.into(),
            slug: slug.into(),
            ..PostDraft::default()
        }
    }

    #[test]
    fn slug_with_spaces_and_capitals_is_rejected() {
        let errors = Posts::validate(&draft("Hello", "Hello World"));
        assert_eq!(
            errors.get("slug"),
            Some("Slug must be lowercase and use hyphens")
        );
    }

    #[test]
    fn hyphenated_slug_is_accepted() {
        assert!(Posts::validate(&draft("Hello", "hello-world")).is_empty());
    }

    #[test]
    fn empty_slug_reports_required_not_shape() {
        let errors = Posts::validate(&draft("Hello", ""));
        assert_eq!(errors.get("slug"), Some("Slug is required"));
    }

    #[test]
    fn published_post_needs_a_publish_date() {
        let mut post = draft("Hello", "hello");
        post.status = PostStatus::Published;
        assert_eq!(
            Posts::validate(&post).get("publishedAt"),
            Some("Published date is required for published posts")
        );

        post.published_at = Some(Utc::now());
        assert!(Posts::validate(&post).is_empty());
    }

    #[test]
    fn draft_post_without_publish_date_is_fine() {
        assert!(!Posts::validate(&draft("Hello", "hello")).contains("publishedAt"));
    }

    #[test]
    fn build_lowercases_slug_and_fills_defaults() {
        let post = Posts::build(
            "b9".into(),
            &PostDraft {
                author: "  ".into(),
                category: String::new(),
                ..draft("Hello", "Hello-World")
            },
            Utc::now(),
        );
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.author, "Unknown");
        assert_eq!(post.category, "General");
    }

    #[test]
    fn author_and_category_are_filterable() {
        let post = Posts::build("b1".into(), &draft("Hi", "hi"), Utc::now());
        assert_eq!(Posts::filter_value(&post, "author"), Some("Unknown"));
        assert_eq!(Posts::filter_value(&post, "status"), Some("draft"));
    }
}
