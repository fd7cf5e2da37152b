//! Author enrichment: a client-side left join of posts against the user
//! directory on `userId`.

use std::collections::HashMap;

use crate::types::{AuthorSummary, Post, User};

/// Attach `author` to every post whose `user_id` appears in `users`.
///
/// Posts without a matching user keep `author == None`; renderers treat that
/// as an unknown author.
pub fn enrich_posts(posts: Vec<Post>, users: &[User]) -> Vec<Post> {
    let directory: HashMap<u64, &User> = users.iter().map(|user| (user.id, user)).collect();

    posts
        .into_iter()
        .map(|mut post| {
            post.author = directory.get(&post.user_id).map(|user| AuthorSummary {
                id: user.id,
                username: user.username.clone(),
                image: user.image.clone().unwrap_or_default(),
            });
            post
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, user_id: u64) -> Post {
        Post {
            id,
            title: format!("post {id}"),
            body: String::new(),
            user_id,
            tags: None,
            reactions: None,
            author: None,
        }
    }

    fn user(id: u64, username: &str, image: Option<&str>) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "username": username,
            "image": image,
        }))
        .unwrap()
    }

    #[test]
    fn matching_user_becomes_author() {
        let posts = enrich_posts(vec![post(1, 7)], &[user(7, "ana", Some("a.png"))]);
        assert_eq!(
            posts[0].author,
            Some(AuthorSummary {
                id: 7,
                username: "ana".to_string(),
                image: "a.png".to_string(),
            })
        );
    }

    #[test]
    fn unmatched_post_keeps_no_author() {
        let posts = enrich_posts(vec![post(1, 7), post(2, 8)], &[user(8, "bo", None)]);
        assert!(posts[0].author.is_none());
        let author = posts[1].author.as_ref().unwrap();
        assert_eq!(author.username, "bo");
        assert_eq!(author.image, "");
    }

    #[test]
    fn order_is_preserved() {
        let posts = enrich_posts(vec![post(3, 1), post(1, 1), post(2, 1)], &[]);
        let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, [3, 1, 2]);
    }
}
