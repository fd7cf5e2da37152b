//! Client-side core of a posts/comments/users admin panel.
//!
//! # Overview
//! Holds the state a posts admin view needs (the current page of posts, per
//! post comments, the selected user profile, dialog state) and keeps it in
//! step with a REST backend and with the location's query string.
//!
//! # Design
//! - `ApiClient` builds `HttpRequest`s and parses `HttpResponse`s without
//!   touching the network; a `Transport` executes them. `Api` pairs the two
//!   into one async function per endpoint.
//! - `PostsController` and `CommentsController` patch local state from
//!   server responses; nothing is reloaded after a mutation.
//! - `reconcile` is the single writer between `ListQuery` and the location.
//! - `AdminStore` is the one container a view mounts and unmounts.
//! - Failures are logged with `tracing` and returned as `ApiError`; state is
//!   left as it was.

pub mod api;
pub mod client;
pub mod comments;
pub mod config;
pub mod dialogs;
pub mod enrich;
pub mod error;
pub mod highlight;
pub mod http;
pub mod pagination;
pub mod posts;
pub mod query;
pub mod store;
pub mod sync;
pub mod transport;
pub mod types;
pub mod users;

pub use api::Api;
pub use client::{ApiClient, UsersRequest};
pub use comments::CommentsController;
pub use config::ClientConfig;
pub use dialogs::{CommentDialogs, PostDialogs};
pub use enrich::enrich_posts;
pub use error::{ApiError, FailureKind};
pub use highlight::{highlight, Segment};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pagination::Pagination;
pub use posts::PostsController;
pub use query::{FetchStrategy, ListQuery, PageRequest, SortOrder};
pub use store::AdminStore;
pub use sync::{reconcile, ChangeOrigin, Reconciled, UrlSync};
pub use transport::{Transport, UreqTransport};
pub use types::{
    AuthorSummary, Comment, CommentAuthor, NewComment, NewPost, Post, PostPatch, PostsPage,
    Reactions, Tag, User, UsersPage,
};
pub use users::UserProfile;
