//! Domain DTOs for the posts/comments/users API.
//!
//! # Design
//! Field names follow the backend's camelCase JSON. Optional server fields
//! are `Option` with `#[serde(default)]` so partial projections (for example
//! `select=username,image` on users) still deserialize. Unknown fields are
//! ignored.

use serde::{Deserialize, Serialize};

/// Like/dislike counters attached to a post.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reactions {
    pub likes: u32,
    pub dislikes: u32,
}

/// Display metadata joined onto a post client-side. Never sent to the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: u64,
    pub username: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorSummary>,
}

/// Request payload for `POST /api/posts/add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

impl Default for NewPost {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            user_id: 1,
        }
    }
}

/// Request payload for `PUT /api/posts/{id}`. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Tag descriptor returned by `GET /api/posts/tags`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Author summary embedded in a comment by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: u64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub post_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CommentAuthor>,
}

/// Request payload for `POST /api/comments/add`.
///
/// `post_id` is `None` until the add dialog is opened for a specific post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub body: String,
    pub post_id: Option<u64>,
    pub user_id: u64,
}

impl Default for NewComment {
    fn default() -> Self {
        Self {
            body: String::new(),
            post_id: None,
            user_id: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentEdit {
    pub body: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentLikes {
    pub likes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentsPage {
    pub comments: Vec<Comment>,
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub title: String,
}

/// A user profile. Read-only from this client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_without_optional_fields_deserializes() {
        let post: Post =
            serde_json::from_str(r#"{"id":1,"title":"t","body":"b","userId":7,"views":12}"#).unwrap();
        assert_eq!(post.user_id, 7);
        assert!(post.tags.is_none());
        assert!(post.author.is_none());
    }

    #[test]
    fn author_is_not_serialized_when_absent() {
        let post = Post {
            id: 1,
            title: "t".to_string(),
            body: "b".to_string(),
            user_id: 7,
            tags: None,
            reactions: None,
            author: None,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("author").is_none());
        assert_eq!(json["userId"], 7);
    }

    #[test]
    fn projected_user_deserializes() {
        let user: User = serde_json::from_str(r#"{"id":3,"username":"ana","image":"a.png"}"#).unwrap();
        assert_eq!(user.image.as_deref(), Some("a.png"));
        assert!(user.email.is_none());
    }

    #[test]
    fn new_comment_defaults_to_no_post() {
        let draft = NewComment::default();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["postId"], serde_json::Value::Null);
        assert_eq!(json["userId"], 1);
    }

    #[test]
    fn post_patch_skips_missing_fields() {
        let patch = PostPatch {
            title: Some("New".to_string()),
            ..PostPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"title": "New"}));
    }
}
