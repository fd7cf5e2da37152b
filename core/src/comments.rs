//! Per-post comment state.
//!
//! # Design
//! Comments are cached per post id and fetched at most once: a key that is
//! present, even with an empty list, is never reloaded. Comments added by
//! other clients after the first load are not seen.
//!
//! Likes are read-modify-write. `like` sends the locally known count plus
//! one as an absolute value, so two likes racing from stale state can
//! collapse into one. Last write wins.

use std::collections::BTreeMap;

use tracing::warn;

use crate::api::Api;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Comment, CommentEdit, NewComment};

pub struct CommentsController<T> {
    api: Api<T>,
    comments: BTreeMap<u64, Vec<Comment>>,
}

impl<T: Transport> CommentsController<T> {
    pub fn new(api: Api<T>) -> Self {
        Self {
            api,
            comments: BTreeMap::new(),
        }
    }

    /// Comments known for `post_id`; empty when not loaded.
    pub fn comments(&self, post_id: u64) -> &[Comment] {
        self.comments.get(&post_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loaded(&self, post_id: u64) -> bool {
        self.comments.contains_key(&post_id)
    }

    pub async fn load(&mut self, post_id: u64) -> Result<(), ApiError> {
        if self.comments.contains_key(&post_id) {
            return Ok(());
        }
        let page = self.api.list_comments(post_id).await.inspect_err(|err| {
            warn!(post_id, error = %err, "failed to load comments");
        })?;
        self.comments.insert(post_id, page.comments);
        Ok(())
    }

    /// Append the created comment to its post's list.
    pub async fn create(&mut self, draft: &NewComment) -> Result<Comment, ApiError> {
        if draft.post_id.is_none() {
            return Err(ApiError::InvalidInput("comment draft has no post".to_string()));
        }
        let comment = self.api.create_comment(draft).await.inspect_err(|err| {
            warn!(error = %err, "failed to create comment");
        })?;
        self.comments
            .entry(comment.post_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    pub async fn update(&mut self, id: u64, body: &str) -> Result<Comment, ApiError> {
        let edit = CommentEdit {
            body: body.to_string(),
        };
        let comment = self.api.update_comment(id, &edit).await.inspect_err(|err| {
            warn!(id, error = %err, "failed to update comment");
        })?;
        self.replace(&comment);
        Ok(comment)
    }

    pub async fn remove(&mut self, id: u64, post_id: u64) -> Result<(), ApiError> {
        self.api.delete_comment(id).await.inspect_err(|err| {
            warn!(id, error = %err, "failed to delete comment");
        })?;
        if let Some(list) = self.comments.get_mut(&post_id) {
            list.retain(|c| c.id != id);
        }
        Ok(())
    }

    /// Send `likes + 1` for a loaded comment and patch the response back in.
    pub async fn like(&mut self, id: u64, post_id: u64) -> Result<Comment, ApiError> {
        let Some(current) = self.comments(post_id).iter().find(|c| c.id == id) else {
            return Err(ApiError::InvalidInput(format!(
                "comment {id} is not loaded for post {post_id}"
            )));
        };
        let likes = current.likes.saturating_add(1);
        let comment = self.api.like_comment(id, likes).await.inspect_err(|err| {
            warn!(id, error = %err, "failed to like comment");
        })?;
        if let Some(list) = self.comments.get_mut(&post_id) {
            if let Some(slot) = list.iter_mut().find(|c| c.id == comment.id) {
                *slot = comment.clone();
            }
        }
        Ok(comment)
    }

    fn replace(&mut self, comment: &Comment) {
        if let Some(slot) = self
            .comments
            .get_mut(&comment.post_id)
            .and_then(|list| list.iter_mut().find(|c| c.id == comment.id))
        {
            *slot = comment.clone();
        }
    }
}
