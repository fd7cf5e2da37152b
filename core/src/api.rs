//! One async function per REST endpoint.
//!
//! `Api` pairs the stateless `ApiClient` with a shared `Transport`. Every call
//! is build, execute, parse. It is cheap to clone so each state controller
//! can hold its own handle.

use std::sync::Arc;

use tracing::debug;

use crate::client::{ApiClient, UsersRequest};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::PageRequest;
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    Comment, CommentEdit, CommentsPage, NewComment, NewPost, Post, PostPatch, PostsPage, Tag,
    User, UsersPage,
};

type Parser<R> = fn(&ApiClient, HttpResponse) -> Result<R, ApiError>;

pub struct Api<T> {
    client: ApiClient,
    transport: Arc<T>,
}

impl<T> Clone for Api<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Api<UreqTransport> {
    /// Talk to `config.base_url` over a fresh `UreqTransport`.
    pub fn connect(config: &ClientConfig) -> Self {
        Self::new(ApiClient::new(&config.base_url), UreqTransport::new())
    }
}

impl<T: Transport> Api<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self {
            client,
            transport: Arc::new(transport),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send<R>(&self, request: HttpRequest, parse: Parser<R>) -> Result<R, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        parse(&self.client, response)
    }

    pub async fn list_posts(&self, page: &PageRequest) -> Result<PostsPage, ApiError> {
        self.send(self.client.build_list_posts(page), ApiClient::parse_posts_page)
            .await
    }

    pub async fn search_posts(&self, term: &str) -> Result<PostsPage, ApiError> {
        self.send(self.client.build_search_posts(term)?, ApiClient::parse_posts_page)
            .await
    }

    pub async fn posts_by_tag(&self, tag: &str) -> Result<PostsPage, ApiError> {
        self.send(self.client.build_posts_by_tag(tag)?, ApiClient::parse_posts_page)
            .await
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.send(self.client.build_list_tags(), ApiClient::parse_tags).await
    }

    pub async fn create_post(&self, input: &NewPost) -> Result<Post, ApiError> {
        self.send(self.client.build_create_post(input)?, ApiClient::parse_post)
            .await
    }

    pub async fn update_post(&self, id: u64, input: &PostPatch) -> Result<Post, ApiError> {
        self.send(self.client.build_update_post(id, input)?, ApiClient::parse_post)
            .await
    }

    pub async fn delete_post(&self, id: u64) -> Result<(), ApiError> {
        self.send(self.client.build_delete_post(id), ApiClient::parse_deleted)
            .await
    }

    pub async fn list_comments(&self, post_id: u64) -> Result<CommentsPage, ApiError> {
        self.send(
            self.client.build_list_comments(post_id),
            ApiClient::parse_comments_page,
        )
        .await
    }

    pub async fn create_comment(&self, input: &NewComment) -> Result<Comment, ApiError> {
        self.send(self.client.build_create_comment(input)?, ApiClient::parse_comment)
            .await
    }

    pub async fn update_comment(&self, id: u64, input: &CommentEdit) -> Result<Comment, ApiError> {
        self.send(
            self.client.build_update_comment(id, input)?,
            ApiClient::parse_comment,
        )
        .await
    }

    pub async fn delete_comment(&self, id: u64) -> Result<(), ApiError> {
        self.send(self.client.build_delete_comment(id), ApiClient::parse_deleted)
            .await
    }

    pub async fn like_comment(&self, id: u64, likes: u32) -> Result<Comment, ApiError> {
        self.send(self.client.build_like_comment(id, likes)?, ApiClient::parse_comment)
            .await
    }

    pub async fn get_user(&self, id: u64) -> Result<User, ApiError> {
        self.send(self.client.build_get_user(id), ApiClient::parse_user)
            .await
    }

    pub async fn list_users(&self, params: &UsersRequest) -> Result<UsersPage, ApiError> {
        self.send(self.client.build_list_users(params), ApiClient::parse_users_page)
            .await
    }
}
