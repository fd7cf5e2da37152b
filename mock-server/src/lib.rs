//! In-memory stand-in for the posts/comments/users REST backend.
//!
//! Serves every route under `/api` from a small deterministic dataset so the
//! client core can be exercised over real HTTP.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

const DEFAULT_LIMIT: usize = 30;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reactions {
    pub likes: u32,
    pub dislikes: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: u64,
    pub tags: Vec<String>,
    pub reactions: Reactions,
    pub views: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUser {
    pub id: u64,
    pub username: String,
    pub full_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub post_id: u64,
    pub likes: u32,
    pub user: CommentUser,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub phone: String,
    pub image: String,
    pub address: Address,
    pub company: Company,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub slug: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentsPage {
    pub comments: Vec<Comment>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

/// Delete responses echo the removed record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted<T> {
    #[serde(flatten)]
    pub record: T,
    pub is_deleted: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub user_id: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub body: String,
    pub post_id: u64,
    pub user_id: u64,
}

/// Body for both `PUT` (edit text) and `PATCH` (set likes).
#[derive(Deserialize)]
pub struct UpdateComment {
    pub body: Option<String>,
    pub likes: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub limit: Option<usize>,
    pub skip: Option<usize>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub select: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Default)]
pub struct Data {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub users: Vec<User>,
}

pub type Db = Arc<RwLock<Data>>;

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(data: Data) -> Router {
    let db: Db = Arc::new(RwLock::new(data));
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/search", get(search_posts))
        .route("/api/posts/tags", get(list_tags))
        .route("/api/posts/tag/{tag}", get(posts_by_tag))
        .route("/api/posts/add", axum::routing::post(create_post))
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/comments/post/{id}", get(comments_for_post))
        .route("/api/comments/add", axum::routing::post(create_comment))
        .route(
            "/api/comments/{id}",
            axum::routing::put(update_comment)
                .patch(update_comment)
                .delete(delete_comment),
        )
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// `limit == 0` means everything after `skip`.
fn paginate<T: Clone>(items: &[T], skip: usize, limit: usize) -> Vec<T> {
    let rest = items.iter().skip(skip).cloned();
    if limit == 0 {
        rest.collect()
    } else {
        rest.take(limit).collect()
    }
}

fn whole_page(posts: Vec<Post>) -> PostsPage {
    let total = posts.len();
    PostsPage {
        posts,
        total,
        skip: 0,
        limit: total,
    }
}

async fn list_posts(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<PostsPage> {
    let data = db.read().await;
    let mut posts = data.posts.clone();
    if let Some(sort_by) = params.sort_by.as_deref() {
        match sort_by {
            "id" => posts.sort_by_key(|p| p.id),
            "title" => posts.sort_by(|a, b| a.title.cmp(&b.title)),
            "userId" => posts.sort_by_key(|p| p.user_id),
            "views" => posts.sort_by_key(|p| p.views),
            _ => {}
        }
        if params.order.as_deref() == Some("desc") {
            posts.reverse();
        }
    }
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    Json(PostsPage {
        total: posts.len(),
        posts: paginate(&posts, skip, limit),
        skip,
        limit,
    })
}

async fn search_posts(State(db): State<Db>, Query(params): Query<SearchParams>) -> Json<PostsPage> {
    let needle = params.q.to_lowercase();
    let data = db.read().await;
    let posts = data
        .posts
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle) || p.body.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    Json(whole_page(posts))
}

async fn list_tags(State(db): State<Db>) -> Json<Vec<Tag>> {
    let data = db.read().await;
    let slugs: BTreeSet<&str> = data
        .posts
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .collect();
    Json(
        slugs
            .into_iter()
            .map(|slug| Tag {
                slug: slug.to_string(),
                name: capitalize(slug),
                url: format!("/api/posts/tag/{slug}"),
            })
            .collect(),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

async fn posts_by_tag(State(db): State<Db>, Path(tag): Path<String>) -> Json<PostsPage> {
    let data = db.read().await;
    let posts = data
        .posts
        .iter()
        .filter(|p| p.tags.iter().any(|t| *t == tag))
        .cloned()
        .collect();
    Json(whole_page(posts))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    let data = db.read().await;
    data.posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<CreatePost>,
) -> (StatusCode, Json<Post>) {
    let mut data = db.write().await;
    let id = data.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let post = Post {
        id,
        title: input.title,
        body: input.body,
        user_id: input.user_id,
        tags: Vec::new(),
        reactions: Reactions {
            likes: 0,
            dislikes: 0,
        },
        views: 0,
    };
    data.posts.push(post.clone());
    (StatusCode::CREATED, Json(post))
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdatePost>,
) -> Result<Json<Post>, StatusCode> {
    let mut data = db.write().await;
    let post = data
        .posts
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(body) = input.body {
        post.body = body;
    }
    if let Some(user_id) = input.user_id {
        post.user_id = user_id;
    }
    Ok(Json(post.clone()))
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Deleted<Post>>, StatusCode> {
    let mut data = db.write().await;
    let index = data
        .posts
        .iter()
        .position(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let record = data.posts.remove(index);
    Ok(Json(Deleted {
        record,
        is_deleted: true,
    }))
}

async fn comments_for_post(State(db): State<Db>, Path(post_id): Path<u64>) -> Json<CommentsPage> {
    let data = db.read().await;
    let comments: Vec<Comment> = data
        .comments
        .iter()
        .filter(|c| c.post_id == post_id)
        .cloned()
        .collect();
    let total = comments.len();
    Json(CommentsPage {
        comments,
        total,
        skip: 0,
        limit: total,
    })
}

async fn create_comment(
    State(db): State<Db>,
    Json(input): Json<CreateComment>,
) -> Result<(StatusCode, Json<Comment>), StatusCode> {
    let mut data = db.write().await;
    let user = data
        .users
        .iter()
        .find(|u| u.id == input.user_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let user = CommentUser {
        id: user.id,
        username: user.username.clone(),
        full_name: format!("{} {}", user.first_name, user.last_name),
    };
    let id = data.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    let comment = Comment {
        id,
        body: input.body,
        post_id: input.post_id,
        likes: 0,
        user,
    };
    data.comments.push(comment.clone());
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn update_comment(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateComment>,
) -> Result<Json<Comment>, StatusCode> {
    let mut data = db.write().await;
    let comment = data
        .comments
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(body) = input.body {
        comment.body = body;
    }
    if let Some(likes) = input.likes {
        comment.likes = likes;
    }
    Ok(Json(comment.clone()))
}

async fn delete_comment(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Deleted<Comment>>, StatusCode> {
    let mut data = db.write().await;
    let index = data
        .comments
        .iter()
        .position(|c| c.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let record = data.comments.remove(index);
    Ok(Json(Deleted {
        record,
        is_deleted: true,
    }))
}

async fn list_users(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, StatusCode> {
    let data = db.read().await;
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let fields: Option<Vec<&str>> = params
        .select
        .as_deref()
        .map(|s| s.split(',').map(str::trim).filter(|f| !f.is_empty()).collect());

    let mut users = Vec::new();
    for user in paginate(&data.users, skip, limit) {
        let value = serde_json::to_value(&user).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        users.push(match &fields {
            Some(fields) => project(value, fields),
            None => value,
        });
    }
    Ok(Json(json!({
        "users": users,
        "total": data.users.len(),
        "skip": skip,
        "limit": limit,
    })))
}

/// Keep `id` plus the selected keys.
fn project(value: Value, fields: &[&str]) -> Value {
    let Value::Object(object) = value else {
        return value;
    };
    let kept: Map<String, Value> = object
        .into_iter()
        .filter(|(key, _)| key == "id" || fields.contains(&key.as_str()))
        .collect();
    Value::Object(kept)
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    let data = db.read().await;
    data.users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn user(id: u64, username: &str, first: &str, last: &str, city: &str, company: &str) -> User {
    User {
        id,
        username: username.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{username}@example.com"),
        age: 25 + id as u32,
        phone: format!("+1 555-010-{id:04}"),
        image: format!("https://img.example.com/{username}.png"),
        address: Address {
            address: format!("{id} Main Street"),
            city: city.to_string(),
            state: "CA".to_string(),
        },
        company: Company {
            name: company.to_string(),
            title: "Engineer".to_string(),
        },
    }
}

fn post(id: u64, user_id: u64, title: &str, body: &str, tags: &[&str], likes: u32) -> Post {
    Post {
        id,
        title: title.to_string(),
        body: body.to_string(),
        user_id,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        reactions: Reactions { likes, dislikes: 1 },
        views: likes * 10,
    }
}

fn comment(id: u64, post_id: u64, body: &str, likes: u32, author: &User) -> Comment {
    Comment {
        id,
        body: body.to_string(),
        post_id,
        likes,
        user: CommentUser {
            id: author.id,
            username: author.username.clone(),
            full_name: format!("{} {}", author.first_name, author.last_name),
        },
    }
}

/// Deterministic dataset. Post 6 belongs to user 99, who is not in the
/// directory.
pub fn seed() -> Data {
    let users = vec![
        user(1, "emilys", "Emily", "Johnson", "Phoenix", "Dooley"),
        user(2, "michaelw", "Michael", "Williams", "Houston", "Spinka"),
        user(3, "sophiab", "Sophia", "Brown", "Washington", "Schiller"),
    ];
    let posts = vec![
        post(1, 1, "His mother had always taught him", "Not to think of himself as better.", &["history", "american", "crime"], 192),
        post(2, 2, "He was an expert but not in a discipline", "He was an expert in waiting.", &["french", "fiction", "english"], 859),
        post(3, 3, "Dave watched as the forest burned up on the hill", "Only a few miles from his house.", &["magical", "history", "french"], 1448),
        post(4, 1, "All he wanted was a candy bar", "It didn't seem like a difficult request.", &["mystery", "english", "american"], 359),
        post(5, 2, "Hopes and dreams were dashed that day", "It should have been expected.", &["crime", "mystery", "love"], 119),
        post(6, 99, "Orphaned ideas", "Written by someone the directory forgot.", &["love"], 7),
    ];
    let comments = vec![
        comment(1, 1, "This is some awesome thinking!", 3, &users[1]),
        comment(2, 1, "What terrific math skills you're showing!", 1, &users[2]),
        comment(3, 2, "You are an amazing writer!", 7, &users[0]),
        comment(4, 3, "Wow! You have improved so much!", 0, &users[1]),
    ];
    Data {
        posts,
        comments,
        users,
    }
}
