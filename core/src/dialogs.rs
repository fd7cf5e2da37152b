//! Add/edit/detail dialog state.
//!
//! The coordinators only track what is selected and which dialog is open.
//! Persistence goes through the list controllers; a failed submit leaves the
//! dialog open and returns the error.

use crate::comments::CommentsController;
use crate::error::ApiError;
use crate::posts::PostsController;
use crate::transport::Transport;
use crate::types::{Comment, NewComment, NewPost, Post, PostPatch};

#[derive(Debug, Clone)]
pub struct PostDialogs {
    pub selected: Option<Post>,
    pub draft: NewPost,
    pub show_add: bool,
    pub show_edit: bool,
    pub show_detail: bool,
    user_id: u64,
}

impl PostDialogs {
    /// `user_id` is written into every fresh draft.
    pub fn new(user_id: u64) -> Self {
        Self {
            selected: None,
            draft: blank_post(user_id),
            show_add: false,
            show_edit: false,
            show_detail: false,
            user_id,
        }
    }

    pub fn open_add(&mut self) {
        self.show_add = true;
    }

    pub fn close_add(&mut self) {
        self.show_add = false;
    }

    pub fn open_edit(&mut self, post: Post) {
        self.selected = Some(post);
        self.show_edit = true;
    }

    pub fn close_edit(&mut self) {
        self.show_edit = false;
    }

    pub fn open_detail(&mut self, post: Post) {
        self.selected = Some(post);
        self.show_detail = true;
    }

    pub fn close_detail(&mut self) {
        self.show_detail = false;
    }

    pub async fn submit_add<T: Transport>(
        &mut self,
        posts: &mut PostsController<T>,
    ) -> Result<Post, ApiError> {
        let post = posts.create(&self.draft).await?;
        self.show_add = false;
        self.draft = blank_post(self.user_id);
        Ok(post)
    }

    /// Send the selected post's title, body and owner.
    pub async fn submit_edit<T: Transport>(
        &mut self,
        posts: &mut PostsController<T>,
    ) -> Result<Post, ApiError> {
        let Some(selected) = &self.selected else {
            return Err(ApiError::InvalidInput("no post selected".to_string()));
        };
        let patch = PostPatch {
            title: Some(selected.title.clone()),
            body: Some(selected.body.clone()),
            user_id: Some(selected.user_id),
        };
        let post = posts.update(selected.id, &patch).await?;
        self.show_edit = false;
        Ok(post)
    }
}

fn blank_post(user_id: u64) -> NewPost {
    NewPost {
        user_id,
        ..NewPost::default()
    }
}

#[derive(Debug, Clone)]
pub struct CommentDialogs {
    pub selected: Option<Comment>,
    pub draft: NewComment,
    pub show_add: bool,
    pub show_edit: bool,
    user_id: u64,
}

impl CommentDialogs {
    pub fn new(user_id: u64) -> Self {
        Self {
            selected: None,
            draft: blank_comment(None, user_id),
            show_add: false,
            show_edit: false,
            user_id,
        }
    }

    /// Start a fresh draft for `post_id`.
    pub fn open_add(&mut self, post_id: u64) {
        self.draft = blank_comment(Some(post_id), self.user_id);
        self.show_add = true;
    }

    pub fn close_add(&mut self) {
        self.show_add = false;
    }

    pub fn open_edit(&mut self, comment: Comment) {
        self.selected = Some(comment);
        self.show_edit = true;
    }

    pub fn close_edit(&mut self) {
        self.show_edit = false;
    }

    pub async fn submit_add<T: Transport>(
        &mut self,
        comments: &mut CommentsController<T>,
    ) -> Result<Comment, ApiError> {
        let comment = comments.create(&self.draft).await?;
        self.show_add = false;
        self.draft = blank_comment(None, self.user_id);
        Ok(comment)
    }

    pub async fn submit_edit<T: Transport>(
        &mut self,
        comments: &mut CommentsController<T>,
    ) -> Result<Comment, ApiError> {
        let Some(selected) = &self.selected else {
            return Err(ApiError::InvalidInput("no comment selected".to_string()));
        };
        let comment = comments.update(selected.id, &selected.body).await?;
        self.show_edit = false;
        Ok(comment)
    }
}

fn blank_comment(post_id: Option<u64>, user_id: u64) -> NewComment {
    NewComment {
        body: String::new(),
        post_id,
        user_id,
    }
}
