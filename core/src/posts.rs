//! List state for posts.
//!
//! # Design
//! `PostsController` exclusively owns the displayed posts, the server's
//! `total`, the tag list and the `ListQuery`. Mutations patch the local list
//! from the server's response instead of reloading it, so `total` only
//! changes on a list load.
//!
//! Failures are logged and returned; the list is left as it was.

use tracing::{debug, warn};

use crate::api::Api;
use crate::client::UsersRequest;
use crate::enrich::enrich_posts;
use crate::error::ApiError;
use crate::pagination::Pagination;
use crate::query::{FetchStrategy, ListQuery, SortOrder};
use crate::transport::Transport;
use crate::types::{NewPost, Post, PostPatch, PostsPage, Tag};

pub struct PostsController<T> {
    api: Api<T>,
    posts: Vec<Post>,
    total: u64,
    tags: Vec<Tag>,
    loading: bool,
    query: ListQuery,
}

impl<T: Transport> PostsController<T> {
    pub fn new(api: Api<T>) -> Self {
        Self {
            api,
            posts: Vec::new(),
            total: 0,
            tags: Vec::new(),
            loading: false,
            query: ListQuery::default(),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.query.skip, self.query.limit, self.total)
    }

    /// Swap the query without loading anything.
    pub fn replace_query(&mut self, query: ListQuery) {
        self.query = query;
    }

    /// Adopt `query` and load through whichever endpoint it selects.
    pub async fn load(&mut self, query: ListQuery) -> Result<(), ApiError> {
        self.query = query;
        let strategy = self.query.strategy();
        self.fetch(strategy).await
    }

    /// Tags first, then the posts for `query`. A tag failure is logged and
    /// does not stop the post load.
    pub async fn initialize(&mut self, query: ListQuery) -> Result<(), ApiError> {
        if self.fetch_tags().await.is_err() {
            debug!("continuing without tags");
        }
        self.load(query).await
    }

    /// Load one page through `strategy`, joined with the user directory.
    ///
    /// Both requests are in flight together. On success the posts and total
    /// are replaced; on failure they are left untouched.
    pub async fn fetch(&mut self, strategy: FetchStrategy) -> Result<(), ApiError> {
        self.loading = true;
        let result = self.fetch_enriched(&strategy).await;
        self.loading = false;

        match result {
            Ok(page) => {
                debug!(count = page.posts.len(), total = page.total, "loaded posts");
                self.posts = page.posts;
                self.total = page.total;
                Ok(())
            }
            Err(err) => {
                warn!(?strategy, error = %err, "failed to load posts");
                Err(err)
            }
        }
    }

    async fn fetch_enriched(&self, strategy: &FetchStrategy) -> Result<PostsPage, ApiError> {
        let primary = async {
            match strategy {
                FetchStrategy::ByTag(tag) => self.api.posts_by_tag(tag).await,
                FetchStrategy::Search(term) => self.api.search_posts(term).await,
                FetchStrategy::Page(page) => self.api.list_posts(page).await,
            }
        };
        let directory = UsersRequest::directory();
        let (page, users) = tokio::join!(primary, self.api.list_users(&directory));

        let mut page = page?;
        let users = users?;
        page.posts = enrich_posts(page.posts, &users.users);
        Ok(page)
    }

    pub async fn fetch_tags(&mut self) -> Result<(), ApiError> {
        match self.api.list_tags().await {
            Ok(tags) => {
                self.tags = tags;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load tags");
                Err(err)
            }
        }
    }

    /// Update the search text. Nothing is loaded until `search` runs.
    pub fn set_search(&mut self, text: &str) {
        self.query.search = text.to_string();
    }

    /// Run the current search. Blank text loads the plain page instead.
    pub async fn search(&mut self) -> Result<(), ApiError> {
        let strategy = if self.query.search.trim().is_empty() {
            FetchStrategy::Page(self.query.page_request())
        } else {
            FetchStrategy::Search(self.query.search.clone())
        };
        self.fetch(strategy).await
    }

    /// Select a tag and reload. `""` and `"all"` clear the tag filter.
    pub async fn select_tag(&mut self, tag: &str) -> Result<(), ApiError> {
        self.query.tag = tag.to_string();
        let strategy = self.query.paging_strategy();
        self.fetch(strategy).await
    }

    pub async fn set_skip(&mut self, skip: u32) -> Result<(), ApiError> {
        self.query.skip = skip;
        let strategy = self.query.paging_strategy();
        self.fetch(strategy).await
    }

    /// Change the page size and return to the first page.
    pub async fn set_limit(&mut self, limit: u32) -> Result<(), ApiError> {
        if limit == 0 {
            return Err(ApiError::InvalidInput("page size must be positive".to_string()));
        }
        self.query.limit = limit;
        self.query.skip = 0;
        let strategy = self.query.paging_strategy();
        self.fetch(strategy).await
    }

    pub async fn set_sort_by(&mut self, sort_by: &str) -> Result<(), ApiError> {
        self.query.sort_by = sort_by.to_string();
        let strategy = self.query.paging_strategy();
        self.fetch(strategy).await
    }

    pub async fn set_sort_order(&mut self, order: SortOrder) -> Result<(), ApiError> {
        self.query.sort_order = order;
        let strategy = self.query.paging_strategy();
        self.fetch(strategy).await
    }

    pub async fn go_to_previous_page(&mut self) -> Result<(), ApiError> {
        let skip = self.pagination().previous();
        self.set_skip(skip).await
    }

    /// Advances unconditionally; check `pagination().can_go_next()` first.
    pub async fn go_to_next_page(&mut self) -> Result<(), ApiError> {
        let skip = self.pagination().next();
        self.set_skip(skip).await
    }

    /// Create a post and put it at the top of the list. `total` is unchanged.
    pub async fn create(&mut self, draft: &NewPost) -> Result<Post, ApiError> {
        let post = self.api.create_post(draft).await.inspect_err(|err| {
            warn!(error = %err, "failed to create post");
        })?;
        self.posts.insert(0, post.clone());
        Ok(post)
    }

    /// Replace the matching post in place. The client-side author survives
    /// when the response carries none.
    pub async fn update(&mut self, id: u64, patch: &PostPatch) -> Result<Post, ApiError> {
        let post = self.api.update_post(id, patch).await.inspect_err(|err| {
            warn!(id, error = %err, "failed to update post");
        })?;
        if let Some(existing) = self.posts.iter_mut().find(|p| p.id == post.id) {
            let author = existing.author.take();
            *existing = post.clone();
            if existing.author.is_none() {
                existing.author = author;
            }
        }
        Ok(post)
    }

    /// Delete a post and drop it from the list. `total` is unchanged.
    pub async fn remove(&mut self, id: u64) -> Result<(), ApiError> {
        self.api.delete_post(id).await.inspect_err(|err| {
            warn!(id, error = %err, "failed to delete post");
        })?;
        self.posts.retain(|p| p.id != id);
        Ok(())
    }
}
