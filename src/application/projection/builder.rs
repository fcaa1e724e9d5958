//! Projection Builder - 按字段选择构造响应
//!
//! 未选中的字段不会出现在序列化结果中（不是 null）。未知字段名被忽略。

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::selection::{FieldSelector, Selection};
use crate::domain::{Author, Story};

/// 故事投影
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryProjection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorProjection>,
}

/// 作者投影
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProjection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// "名 姓"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// 按选择投影故事
///
/// 作者缺失（部分成功）时 `author` 字段不出现；
/// `"author": true` 得到空对象。
pub fn project(story: &Story, author: Option<&Author>, selection: &Selection) -> StoryProjection {
    let pick = |key: &str| selection.includes(key);

    StoryProjection {
        id: pick("id").then(|| story.id().value()),
        title: pick("title").then(|| story.title().to_string()),
        content: pick("content").then(|| story.content().to_string()),
        author_id: pick("authorId").then(|| story.author_id().value()),
        created_at: pick("createdAt").then(|| story.created_at()),
        updated_at: pick("updatedAt").then(|| story.updated_at()),
        published_at: if pick("publishedAt") {
            story.published_at()
        } else {
            None
        },
        author: match (selection.get("author"), author) {
            (Some(FieldSelector::Nested(inner)), Some(author)) => {
                Some(project_author(author, inner))
            }
            (Some(FieldSelector::Leaf), Some(_)) => Some(AuthorProjection::default()),
            _ => None,
        },
    }
}

/// 按选择投影作者
pub fn project_author(author: &Author, selection: &Selection) -> AuthorProjection {
    let pick = |key: &str| selection.includes(key);

    AuthorProjection {
        id: pick("id").then(|| author.id().value()),
        name: pick("name").then(|| author.full_name()),
        first_name: pick("firstName").then(|| author.first_name().to_string()),
        last_name: pick("lastName").then(|| author.last_name().to_string()),
        profile_image_url: pick("profileImageUrl").then(|| author.profile_image_url().to_string()),
        slug: pick("slug").then(|| author.slug().to_string()),
    }
}

/// 全部字段
pub fn full_selection() -> Selection {
    Selection::new()
        .leaf("id")
        .leaf("title")
        .leaf("content")
        .leaf("authorId")
        .leaf("createdAt")
        .leaf("updatedAt")
        .leaf("publishedAt")
        .nested(
            "author",
            Selection::new()
                .leaf("id")
                .leaf("name")
                .leaf("firstName")
                .leaf("lastName")
                .leaf("profileImageUrl")
                .leaf("slug"),
        )
}

/// 旧版客户端使用的固定选择
pub fn legacy_selection() -> Selection {
    Selection::new().leaf("id").leaf("title").nested(
        "author",
        Selection::new().leaf("name").leaf("profileImageUrl"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorId, StoryId};
    use serde_json::json;

    const CONTENT: &str = "Once upon a time, far away.";

    fn story() -> Story {
        Story::new("A Tale", CONTENT, "3").unwrap().with_id(StoryId::new(7))
    }

    fn author() -> Author {
        Author::new("Ann", "Lee", "https://cdn.example.com/ann.png", "ann-lee-01")
            .unwrap()
            .with_id(AuthorId::new(3))
    }

    #[test]
    fn test_projects_only_selected_fields() {
        let selection = Selection::from_json(&json!({"id": true, "author": {"name": true}}));
        let projected = project(&story(), Some(&author()), &selection);

        assert_eq!(
            serde_json::to_string(&projected).unwrap(),
            r#"{"id":7,"author":{"name":"Ann Lee"}}"#
        );
    }

    #[test]
    fn test_missing_author_omits_field() {
        let selection = Selection::from_json(&json!({"title": true, "author": {"name": true}}));
        let projected = project(&story(), None, &selection);

        assert_eq!(
            serde_json::to_value(&projected).unwrap(),
            json!({"title": "A Tale"})
        );
    }

    #[test]
    fn test_leaf_on_author_gives_empty_object() {
        let selection = Selection::from_json(&json!({"author": true}));
        let projected = project(&story(), Some(&author()), &selection);

        assert_eq!(serde_json::to_value(&projected).unwrap(), json!({"author": {}}));
    }

    #[test]
    fn test_nested_selector_on_scalar_is_included() {
        let selection = Selection::from_json(&json!({"title": {"x": true}}));
        let projected = project(&story(), Some(&author()), &selection);
        assert_eq!(projected.title.as_deref(), Some("A Tale"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let selection = Selection::from_json(&json!({"likes": true, "author": {"age": 1}}));
        let projected = project(&story(), Some(&author()), &selection);

        assert_eq!(serde_json::to_value(&projected).unwrap(), json!({"author": {}}));
    }

    #[test]
    fn test_unpublished_story_omits_published_at() {
        let projected = project(&story(), Some(&author()), &full_selection());
        let value = serde_json::to_value(&projected).unwrap();

        assert!(value.get("publishedAt").is_none());
        assert_eq!(value["authorId"], json!(3));
        assert_eq!(value["author"]["profileImageUrl"], json!("https://cdn.example.com/ann.png"));
    }

    #[test]
    fn test_legacy_selection() {
        let projected = project(&story(), Some(&author()), &legacy_selection());

        assert_eq!(
            serde_json::to_value(&projected).unwrap(),
            json!({
                "id": 7,
                "title": "A Tale",
                "author": {"name": "Ann Lee", "profileImageUrl": "https://cdn.example.com/ann.png"}
            })
        );
    }
}
