//! The admin panel's single state container.
//!
//! # Design
//! One `AdminStore` exists per mounted view: `new` builds it from the current
//! location, `mount` performs the initial load and `unmount` tears it down.
//! Location changes arrive through `navigate`; every query-changing action
//! goes through `sync_location`, which is the only place a new location is
//! produced. The host drains it with `take_navigation`.

use tracing::info;

use crate::api::Api;
use crate::comments::CommentsController;
use crate::config::ClientConfig;
use crate::dialogs::{CommentDialogs, PostDialogs};
use crate::error::ApiError;
use crate::posts::PostsController;
use crate::query::{ListQuery, SortOrder};
use crate::sync::UrlSync;
use crate::transport::Transport;
use crate::types::{Comment, Post};
use crate::users::UserProfile;

pub struct AdminStore<T> {
    pub posts: PostsController<T>,
    pub comments: CommentsController<T>,
    pub user: UserProfile<T>,
    pub post_dialogs: PostDialogs,
    pub comment_dialogs: CommentDialogs,
    sync: UrlSync,
    pending_navigation: Option<String>,
}

impl<T: Transport> AdminStore<T> {
    /// Build the store for `location` (the query string, `?` optional).
    /// Nothing is fetched until `mount`.
    pub fn new(api: Api<T>, config: &ClientConfig, location: &str) -> Self {
        let sync = UrlSync::new(location);
        let mut posts = PostsController::new(api.clone());
        posts.replace_query(ListQuery::from_query_string(sync.location()));
        Self {
            posts,
            comments: CommentsController::new(api.clone()),
            user: UserProfile::new(api),
            post_dialogs: PostDialogs::new(config.user_id),
            comment_dialogs: CommentDialogs::new(config.user_id),
            sync,
            pending_navigation: None,
        }
    }

    /// Load tags and the first view of posts.
    pub async fn mount(&mut self) -> Result<(), ApiError> {
        info!(location = self.sync.location(), "mounting posts admin");
        let query = self.posts.query().clone();
        self.posts.initialize(query).await
    }

    pub fn unmount(self) {
        info!(location = self.sync.location(), "unmounting posts admin");
    }

    /// Current location query string, without `?`.
    pub fn location(&self) -> &str {
        self.sync.location()
    }

    /// The location the host should navigate to, if the state moved away from
    /// it since the last call.
    pub fn take_navigation(&mut self) -> Option<String> {
        self.pending_navigation.take()
    }

    /// Handle an external location change. A page size change with a
    /// non-zero skip is corrected to the first page and queued as a
    /// navigation.
    pub async fn navigate(&mut self, location: &str) -> Result<(), ApiError> {
        let reconciled = self.sync.on_url_change(location, self.posts.query());
        if reconciled.url.is_some() {
            self.pending_navigation = reconciled.url;
        }
        self.posts.replace_query(reconciled.store);
        match reconciled.refetch {
            Some(strategy) => self.posts.fetch(strategy).await,
            None => Ok(()),
        }
    }

    /// Render the current query into the location if it changed.
    pub fn sync_location(&mut self) {
        if let Some(url) = self.sync.on_state_change(self.posts.query()) {
            self.pending_navigation = Some(url);
        }
    }

    pub async fn set_skip(&mut self, skip: u32) -> Result<(), ApiError> {
        let result = self.posts.set_skip(skip).await;
        self.sync_location();
        result
    }

    pub async fn set_limit(&mut self, limit: u32) -> Result<(), ApiError> {
        let result = self.posts.set_limit(limit).await;
        self.sync_location();
        result
    }

    pub async fn previous_page(&mut self) -> Result<(), ApiError> {
        let result = self.posts.go_to_previous_page().await;
        self.sync_location();
        result
    }

    pub async fn next_page(&mut self) -> Result<(), ApiError> {
        let result = self.posts.go_to_next_page().await;
        self.sync_location();
        result
    }

    pub async fn select_tag(&mut self, tag: &str) -> Result<(), ApiError> {
        let result = self.posts.select_tag(tag).await;
        self.sync_location();
        result
    }

    pub async fn set_sort_by(&mut self, sort_by: &str) -> Result<(), ApiError> {
        let result = self.posts.set_sort_by(sort_by).await;
        self.sync_location();
        result
    }

    pub async fn set_sort_order(&mut self, order: SortOrder) -> Result<(), ApiError> {
        let result = self.posts.set_sort_order(order).await;
        self.sync_location();
        result
    }

    pub fn set_search(&mut self, text: &str) {
        self.posts.set_search(text);
        self.sync_location();
    }

    pub async fn submit_search(&mut self) -> Result<(), ApiError> {
        let result = self.posts.search().await;
        self.sync_location();
        result
    }

    // -- dialogs --

    pub async fn add_post(&mut self) -> Result<Post, ApiError> {
        self.post_dialogs.submit_add(&mut self.posts).await
    }

    pub async fn save_post(&mut self) -> Result<Post, ApiError> {
        self.post_dialogs.submit_edit(&mut self.posts).await
    }

    pub async fn delete_post(&mut self, id: u64) -> Result<(), ApiError> {
        self.posts.remove(id).await
    }

    /// Show a post with its comments.
    pub async fn open_post_detail(&mut self, post: Post) -> Result<(), ApiError> {
        let post_id = post.id;
        self.post_dialogs.open_detail(post);
        self.comments.load(post_id).await
    }

    pub async fn add_comment(&mut self) -> Result<Comment, ApiError> {
        self.comment_dialogs.submit_add(&mut self.comments).await
    }

    pub async fn save_comment(&mut self) -> Result<Comment, ApiError> {
        self.comment_dialogs.submit_edit(&mut self.comments).await
    }

    pub async fn delete_comment(&mut self, id: u64, post_id: u64) -> Result<(), ApiError> {
        self.comments.remove(id, post_id).await
    }

    pub async fn like_comment(&mut self, id: u64, post_id: u64) -> Result<Comment, ApiError> {
        self.comments.like(id, post_id).await
    }

    pub async fn open_user(&mut self, user_id: u64) -> Result<(), ApiError> {
        self.user.open(user_id).await
    }

    pub fn close_user(&mut self) {
        self.user.close();
    }
}
