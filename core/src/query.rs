//! The list query and its URL query-string form.
//!
//! `ListQuery` is the single description of which page of which filtered,
//! sorted view is showing. It maps to and from the six URL parameters
//! `skip, limit, search, sortBy, sortOrder, tag`. Only non-default values are
//! written, so an explicit default (`skip=0`) comes back as an absent
//! parameter that parses to the same value.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const DEFAULT_LIMIT: u32 = 10;

/// Tag value meaning "no tag filter".
pub const ALL_TAGS: &str = "all";

/// Returns true when `tag` selects the tag-filter endpoint.
pub fn is_tag_filter(tag: &str) -> bool {
    !tag.is_empty() && tag != ALL_TAGS
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Unknown values fall back to `Asc`.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offset pagination plus optional server-side sort for the plain list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub skip: u32,
    pub sort_by: String,
    pub order: SortOrder,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
            sort_by: String::new(),
            order: SortOrder::Asc,
        }
    }
}

/// Which backend endpoint a list load goes through. The three are mutually
/// exclusive; whichever ran last owns the displayed posts and total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStrategy {
    ByTag(String),
    Search(String),
    Page(PageRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: u32,
    pub limit: u32,
    pub search: String,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub tag: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            sort_by: String::new(),
            sort_order: SortOrder::Asc,
            tag: String::new(),
        }
    }
}

impl ListQuery {
    /// Parse a URL query string, with or without the leading `?`.
    ///
    /// Missing or empty parameters take their defaults and the first
    /// occurrence of a repeated key wins. Numbers are read leniently: leading
    /// digits count, anything unparsable is 0. A negative `skip` becomes 0 and
    /// a non-positive `limit` becomes the default page size.
    pub fn from_query_string(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Self::default();
        let mut seen = HashSet::new();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            if !seen.insert(key.clone()) || value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "skip" => query.skip = clamp_u32(parse_int_lenient(&value)),
                "limit" => {
                    let limit = clamp_u32(parse_int_lenient(&value));
                    query.limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
                }
                "search" => query.search = value.into_owned(),
                "sortBy" => query.sort_by = value.into_owned(),
                "sortOrder" => query.sort_order = SortOrder::parse(&value),
                "tag" => query.tag = value.into_owned(),
                _ => {}
            }
        }
        query
    }

    /// Render the non-default fields as a query string without the `?`.
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if self.skip != 0 {
            out.append_pair("skip", &self.skip.to_string());
        }
        if self.limit != DEFAULT_LIMIT {
            out.append_pair("limit", &self.limit.to_string());
        }
        if !self.search.is_empty() {
            out.append_pair("search", &self.search);
        }
        if !self.sort_by.is_empty() {
            out.append_pair("sortBy", &self.sort_by);
        }
        if self.sort_order != SortOrder::Asc {
            out.append_pair("sortOrder", self.sort_order.as_str());
        }
        if !self.tag.is_empty() {
            out.append_pair("tag", &self.tag);
        }
        out.finish()
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            limit: self.limit,
            skip: self.skip,
            sort_by: self.sort_by.clone(),
            order: self.sort_order,
        }
    }

    /// Strategy for a full load: tag filter, then search, then plain page.
    pub fn strategy(&self) -> FetchStrategy {
        if is_tag_filter(&self.tag) {
            FetchStrategy::ByTag(self.tag.clone())
        } else if !self.search.trim().is_empty() {
            FetchStrategy::Search(self.search.clone())
        } else {
            FetchStrategy::Page(self.page_request())
        }
    }

    /// Strategy after a skip, limit or sort change: the tag filter if one is
    /// active, otherwise the plain page. Search results are not paged.
    pub fn paging_strategy(&self) -> FetchStrategy {
        if is_tag_filter(&self.tag) {
            FetchStrategy::ByTag(self.tag.clone())
        } else {
            FetchStrategy::Page(self.page_request())
        }
    }
}

fn parse_int_lenient(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

fn clamp_u32(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        assert_eq!(ListQuery::from_query_string(""), ListQuery::default());
        assert_eq!(ListQuery::from_query_string("?"), ListQuery::default());
    }

    #[test]
    fn parses_all_six_parameters() {
        let q = ListQuery::from_query_string(
            "?skip=20&limit=5&search=hello+world&sortBy=title&sortOrder=desc&tag=history",
        );
        assert_eq!(q.skip, 20);
        assert_eq!(q.limit, 5);
        assert_eq!(q.search, "hello world");
        assert_eq!(q.sort_by, "title");
        assert_eq!(q.sort_order, SortOrder::Desc);
        assert_eq!(q.tag, "history");
    }

    #[test]
    fn invalid_numbers_parse_as_zero() {
        let q = ListQuery::from_query_string("skip=abc");
        assert_eq!(q.skip, 0);
        let q = ListQuery::from_query_string("skip=30items");
        assert_eq!(q.skip, 30);
        let q = ListQuery::from_query_string("skip=-10");
        assert_eq!(q.skip, 0);
    }

    #[test]
    fn non_positive_limit_keeps_default() {
        assert_eq!(ListQuery::from_query_string("limit=0").limit, DEFAULT_LIMIT);
        assert_eq!(ListQuery::from_query_string("limit=nope").limit, DEFAULT_LIMIT);
        assert_eq!(ListQuery::from_query_string("limit=").limit, DEFAULT_LIMIT);
    }

    #[test]
    fn first_occurrence_wins() {
        let q = ListQuery::from_query_string("tag=a&tag=b");
        assert_eq!(q.tag, "a");
    }

    #[test]
    fn defaults_are_omitted_when_serializing() {
        let q = ListQuery {
            skip: 0,
            limit: 10,
            sort_order: SortOrder::Asc,
            ..ListQuery::default()
        };
        assert_eq!(q.to_query_string(), "");
    }

    #[test]
    fn non_default_values_survive_a_round_trip() {
        for (skip, limit) in [(10, 10), (0, 20), (30, 30), (7, 1)] {
            let q = ListQuery {
                skip,
                limit,
                search: "a&b".to_string(),
                sort_by: "id".to_string(),
                sort_order: SortOrder::Desc,
                tag: "love".to_string(),
            };
            assert_eq!(ListQuery::from_query_string(&q.to_query_string()), q);
        }
    }

    #[test]
    fn serializes_in_fixed_order() {
        let q = ListQuery {
            skip: 10,
            limit: 20,
            search: "x".to_string(),
            sort_by: "id".to_string(),
            sort_order: SortOrder::Desc,
            tag: "t".to_string(),
        };
        assert_eq!(
            q.to_query_string(),
            "skip=10&limit=20&search=x&sortBy=id&sortOrder=desc&tag=t"
        );
    }

    #[test]
    fn tag_wins_over_search() {
        let q = ListQuery {
            search: "fox".to_string(),
            tag: "tech".to_string(),
            ..ListQuery::default()
        };
        assert_eq!(q.strategy(), FetchStrategy::ByTag("tech".to_string()));
    }

    #[test]
    fn all_tag_is_not_a_filter() {
        let q = ListQuery {
            tag: ALL_TAGS.to_string(),
            ..ListQuery::default()
        };
        assert_eq!(q.strategy(), FetchStrategy::Page(PageRequest::default()));
        assert!(!is_tag_filter(""));
        assert!(is_tag_filter("tech"));
    }

    #[test]
    fn blank_search_uses_the_plain_page() {
        let q = ListQuery {
            search: "   ".to_string(),
            ..ListQuery::default()
        };
        assert!(matches!(q.strategy(), FetchStrategy::Page(_)));
    }

    #[test]
    fn paging_ignores_search() {
        let q = ListQuery {
            search: "fox".to_string(),
            skip: 10,
            ..ListQuery::default()
        };
        let FetchStrategy::Page(page) = q.paging_strategy() else {
            panic!("expected page strategy");
        };
        assert_eq!(page.skip, 10);
    }
}
