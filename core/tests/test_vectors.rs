//! Verify build/parse methods and query-string handling against the JSON
//! vectors in `test-vectors/`.
//!
//! Request bodies and parse results are compared as parsed JSON, not raw
//! strings, so field order does not matter.

use posts_admin_core::{
    ApiClient, ApiError, Comment, HttpMethod, HttpRequest, HttpResponse, ListQuery, NewPost,
    PageRequest, Post, SortOrder,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ApiClient {
    ApiClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Check method, URL, headers and (if present) body of a built request.
fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (
                pair[0].as_str().unwrap().to_string(),
                pair[1].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: unexpected body"),
    }
}

// ---------------------------------------------------------------------------
// List posts
// ---------------------------------------------------------------------------

#[test]
fn list_posts_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list_posts.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let page = PageRequest {
            limit: input["limit"].as_u64().unwrap() as u32,
            skip: input["skip"].as_u64().unwrap() as u32,
            sort_by: input["sortBy"].as_str().unwrap().to_string(),
            order: SortOrder::parse(input["order"].as_str().unwrap()),
        };

        let req = c.build_list_posts(&page);
        assert_request(name, &req, &case["expected_request"]);

        let parsed = c.parse_posts_page(simulated(&case)).unwrap();
        let ids: Vec<u64> = parsed.posts.iter().map(|p| p.id).collect();
        let expected_ids: Vec<u64> = serde_json::from_value(case["expected_result"]["ids"].clone()).unwrap();
        assert_eq!(ids, expected_ids, "{name}: ids");
        assert_eq!(
            parsed.total,
            case["expected_result"]["total"].as_u64().unwrap(),
            "{name}: total"
        );
    }
}

// ---------------------------------------------------------------------------
// Create post
// ---------------------------------------------------------------------------

#[test]
fn create_post_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create_post.json")) {
        let name = case["name"].as_str().unwrap();
        let input: NewPost = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_post(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let post = c.parse_post(simulated(&case)).unwrap();
        let expected: Post = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(post, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Like comment
// ---------------------------------------------------------------------------

#[test]
fn like_comment_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/like_comment.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input"]["id"].as_u64().unwrap();
        let likes = case["input"]["likes"].as_u64().unwrap() as u32;

        let req = c.build_like_comment(id, likes).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let comment = c.parse_comment(simulated(&case)).unwrap();
        let expected: Comment = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(comment, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// URL query
// ---------------------------------------------------------------------------

#[test]
fn url_query_test_vectors() {
    for case in load(include_str!("../../test-vectors/url_query.json")) {
        let name = case["name"].as_str().unwrap();
        let query = ListQuery::from_query_string(case["query"].as_str().unwrap());
        let expected = &case["expected"];

        assert_eq!(query.skip as u64, expected["skip"].as_u64().unwrap(), "{name}: skip");
        assert_eq!(query.limit as u64, expected["limit"].as_u64().unwrap(), "{name}: limit");
        assert_eq!(query.search, expected["search"].as_str().unwrap(), "{name}: search");
        assert_eq!(query.sort_by, expected["sortBy"].as_str().unwrap(), "{name}: sortBy");
        assert_eq!(
            query.sort_order.as_str(),
            expected["sortOrder"].as_str().unwrap(),
            "{name}: sortOrder"
        );
        assert_eq!(query.tag, expected["tag"].as_str().unwrap(), "{name}: tag");

        let canonical = query.to_query_string();
        assert_eq!(canonical, case["canonical"].as_str().unwrap(), "{name}: canonical");
        assert_eq!(
            ListQuery::from_query_string(&canonical),
            query,
            "{name}: canonical form parses back"
        );
    }
}

// ---------------------------------------------------------------------------
// Status mapping
// ---------------------------------------------------------------------------

#[test]
fn status_codes_map_to_errors() {
    let c = client();
    let respond = |status: u16, body: &str| HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    };

    assert!(matches!(c.parse_post(respond(404, "")), Err(ApiError::NotFound)));
    match c.parse_post(respond(400, r#"{"message":"title required"}"#)) {
        Err(ApiError::HttpError { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("title required"));
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
    assert!(matches!(
        c.parse_post(respond(200, "not json")),
        Err(ApiError::DeserializationError(_))
    ));
    assert!(c.parse_deleted(respond(200, "")).is_ok());
    assert!(c.parse_deleted(respond(204, "")).is_ok());
    assert!(matches!(
        c.parse_deleted(respond(500, "boom")),
        Err(ApiError::HttpError { status: 500, .. })
    ));
}
