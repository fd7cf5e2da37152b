//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint has a `build_*` method that produces an `HttpRequest`;
//! responses are decoded by a `parse_*` method per response shape. The caller
//! (a `Transport`) executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{is_tag_filter, PageRequest};
use crate::types::{
    Comment, CommentEdit, CommentLikes, CommentsPage, NewComment, NewPost, Post, PostPatch,
    PostsPage, Tag, User, UsersPage,
};

/// Projection used by the author directory fetch.
pub const DIRECTORY_SELECT: &str = "username,image";

/// Query for `GET /api/users`. `limit == 0` asks for every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersRequest {
    pub limit: u32,
    pub skip: u32,
    pub select: Option<String>,
}

impl UsersRequest {
    /// The full user directory projected to what author enrichment needs.
    pub fn directory() -> Self {
        Self {
            limit: 0,
            skip: 0,
            select: Some(DIRECTORY_SELECT.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    // -- posts --

    pub fn build_list_posts(&self, page: &PageRequest) -> HttpRequest {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("limit", &page.limit.to_string());
        query.append_pair("skip", &page.skip.to_string());
        if !page.sort_by.is_empty() {
            query.append_pair("sortBy", &page.sort_by);
            query.append_pair("order", page.order.as_str());
        }
        HttpRequest::without_body(
            HttpMethod::Get,
            self.url(&format!("/posts?{}", query.finish())),
        )
    }

    pub fn build_search_posts(&self, term: &str) -> Result<HttpRequest, ApiError> {
        if term.trim().is_empty() {
            return Err(ApiError::InvalidInput("search term is empty".to_string()));
        }
        Ok(HttpRequest::without_body(
            HttpMethod::Get,
            self.url(&format!("/posts/search?q={}", urlencoding::encode(term))),
        ))
    }

    pub fn build_posts_by_tag(&self, tag: &str) -> Result<HttpRequest, ApiError> {
        if !is_tag_filter(tag) {
            return Err(ApiError::InvalidInput(format!("{tag:?} is not a tag filter")));
        }
        Ok(HttpRequest::without_body(
            HttpMethod::Get,
            self.url(&format!("/posts/tag/{}", urlencoding::encode(tag))),
        ))
    }

    pub fn build_list_tags(&self) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url("/posts/tags"))
    }

    pub fn build_create_post(&self, input: &NewPost) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Post,
            self.url("/posts/add"),
            to_body(input)?,
        ))
    }

    pub fn build_update_post(&self, id: u64, input: &PostPatch) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Put,
            self.url(&format!("/posts/{id}")),
            to_body(input)?,
        ))
    }

    pub fn build_delete_post(&self, id: u64) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Delete, self.url(&format!("/posts/{id}")))
    }

    // -- comments --

    pub fn build_list_comments(&self, post_id: u64) -> HttpRequest {
        HttpRequest::without_body(
            HttpMethod::Get,
            self.url(&format!("/comments/post/{post_id}")),
        )
    }

    pub fn build_create_comment(&self, input: &NewComment) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Post,
            self.url("/comments/add"),
            to_body(input)?,
        ))
    }

    pub fn build_update_comment(&self, id: u64, input: &CommentEdit) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Put,
            self.url(&format!("/comments/{id}")),
            to_body(input)?,
        ))
    }

    pub fn build_delete_comment(&self, id: u64) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Delete, self.url(&format!("/comments/{id}")))
    }

    /// Sends the new absolute like count, not an increment.
    pub fn build_like_comment(&self, id: u64, likes: u32) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Patch,
            self.url(&format!("/comments/{id}")),
            to_body(&CommentLikes { likes })?,
        ))
    }

    // -- users --

    pub fn build_get_user(&self, id: u64) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url(&format!("/users/{id}")))
    }

    pub fn build_list_users(&self, params: &UsersRequest) -> HttpRequest {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("limit", &params.limit.to_string());
        if params.skip != 0 {
            query.append_pair("skip", &params.skip.to_string());
        }
        if let Some(select) = &params.select {
            query.append_pair("select", select);
        }
        HttpRequest::without_body(
            HttpMethod::Get,
            self.url(&format!("/users?{}", query.finish())),
        )
    }

    // -- responses --

    pub fn parse_posts_page(&self, response: HttpResponse) -> Result<PostsPage, ApiError> {
        parse_json(response)
    }

    pub fn parse_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response)
    }

    pub fn parse_tags(&self, response: HttpResponse) -> Result<Vec<Tag>, ApiError> {
        parse_json(response)
    }

    pub fn parse_comments_page(&self, response: HttpResponse) -> Result<CommentsPage, ApiError> {
        parse_json(response)
    }

    pub fn parse_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_json(response)
    }

    pub fn parse_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response)
    }

    pub fn parse_users_page(&self, response: HttpResponse) -> Result<UsersPage, ApiError> {
        parse_json(response)
    }

    /// Deletes only need a 2xx status; any body is ignored.
    pub fn parse_deleted(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn to_body<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
