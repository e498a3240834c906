//! Integration tests for request resolution against registered resources

use pretty_assertions::assert_eq;
use restful_routing::*;
use rstest::rstest;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

fn blogs_with_comments() -> SharedRouteTable {
    let mut table = RouteTable::new();
    ResourcesMapper::new(&mut table, Arc::new(EnglishInflector::new()))
        .map_nested("blogs", |blogs| blogs.map("comments"));
    table.freeze()
}

fn get(table: &RouteTable, path: &str) -> Result<RouteMatch, RoutingError> {
    table.resolve(&RouteRequest::new(HttpMethod::Get, path))
}

#[rstest]
#[case(HttpMethod::Get, "/blogs", "index", None)]
#[case(HttpMethod::Post, "/blogs", "create", None)]
#[case(HttpMethod::Get, "/blogs/new", "new", None)]
#[case(HttpMethod::Post, "/blogs/new", "new", None)]
#[case(HttpMethod::Get, "/blogs/5", "show", Some("5"))]
#[case(HttpMethod::Get, "/blogs/5/show", "show", Some("5"))]
#[case(HttpMethod::Get, "/blogs/5/edit", "edit", Some("5"))]
#[case(HttpMethod::Get, "/blogs/5/delete", "delete", Some("5"))]
#[case(HttpMethod::Put, "/blogs/5", "update", Some("5"))]
#[case(HttpMethod::Delete, "/blogs/5", "destroy", Some("5"))]
fn test_conventional_routes(
    #[case] method: HttpMethod,
    #[case] path: &str,
    #[case] action: &str,
    #[case] id: Option<&str>,
) {
    let table = blogs_with_comments();
    let matched = table.resolve(&RouteRequest::new(method, path)).unwrap();
    assert_eq!(matched.controller, "blogs");
    assert_eq!(matched.action, action);
    assert_eq!(matched.id(), id);
}

#[test]
fn test_new_wins_over_member_route() {
    let table = blogs_with_comments();
    let matched = get(&table, "/blogs/new").unwrap();
    assert_eq!(matched.entry_index, 2);
    assert_eq!(matched.id(), None);
}

#[test]
fn test_member_route_rejects_unlisted_action() {
    let table = blogs_with_comments();
    assert_eq!(
        get(&table, "/blogs/5/destroy").unwrap_err(),
        RoutingError::NoRouteMatched {
            method: HttpMethod::Get,
            path: "/blogs/5/destroy".to_string(),
        }
    );
}

#[test]
fn test_member_action_ignores_case() {
    let table = blogs_with_comments();
    let matched = get(&table, "/Blogs/5/EDIT").unwrap();
    assert_eq!(matched.action, "EDIT");
    assert_eq!(matched.entry_index, 3);
}

#[rstest]
#[case("DELETE", "destroy")]
#[case("delete", "destroy")]
#[case("PUT", "update")]
fn test_post_with_override(#[case] verb: &str, #[case] action: &str) {
    let table = blogs_with_comments();
    let matched = table
        .resolve(&RouteRequest::new(HttpMethod::Post, "/blogs/5").with_override(Some(verb)))
        .unwrap();
    assert_eq!(matched.entry_index, 6);
    assert_eq!(matched.controller, "blogs");
    assert_eq!(matched.action, action);
    assert_eq!(matched.id(), Some("5"));
}

#[rstest]
#[case(Some("PATCH"))]
#[case(Some("GET"))]
#[case(None)]
fn test_post_with_bad_override(#[case] verb: Option<&str>) {
    let table = blogs_with_comments();
    let err = table
        .resolve(&RouteRequest::new(HttpMethod::Post, "/blogs/5").with_override(verb))
        .unwrap_err();
    assert_eq!(
        err,
        RoutingError::UnrecognizedOverride(verb.map(str::to_string))
    );
    assert!(err.is_method_mismatch());
}

#[test]
fn test_nested_member_route() {
    let table = blogs_with_comments();
    let matched = get(&table, "/blogs/5/comments/7/edit").unwrap();
    assert_eq!(matched.controller, "comments");
    assert_eq!(matched.action, "edit");
    assert_eq!(matched.get("blogId"), Some("5"));
    assert_eq!(matched.id(), Some("7"));
}

#[test]
fn test_nested_collection_and_override() {
    let table = blogs_with_comments();

    let index = get(&table, "/blogs/5/comments").unwrap();
    assert_eq!(index.controller, "comments");
    assert_eq!(index.action, "index");
    assert_eq!(index.get("blogId"), Some("5"));

    let destroy = table
        .resolve(
            &RouteRequest::new(HttpMethod::Post, "/blogs/5/comments/9")
                .with_override(Some("DELETE")),
        )
        .unwrap();
    assert_eq!(destroy.controller, "comments");
    assert_eq!(destroy.action, "destroy");
    assert_eq!(destroy.get("blogId"), Some("5"));
    assert_eq!(destroy.id(), Some("9"));
}

#[test]
fn test_unknown_resource() {
    let table = blogs_with_comments();
    assert!(matches!(
        get(&table, "/posts"),
        Err(RoutingError::NoRouteMatched { .. })
    ));
}

#[test]
fn test_url_generation() {
    let table = blogs_with_comments();
    let values = BTreeMap::from([
        ("blogId".to_string(), "5".to_string()),
        ("id".to_string(), "7".to_string()),
    ]);

    assert_eq!(
        table.url_for("comments", "edit", &values).as_deref(),
        Some("/blogs/5/comments/7/edit")
    );
    assert_eq!(
        table.url_for("comments", "show", &values).as_deref(),
        Some("/blogs/5/comments/7")
    );
    assert_eq!(
        table.url_for("comments", "new", &values).as_deref(),
        Some("/blogs/5/comments/new")
    );
}

#[test]
fn test_url_generation_ignores_action_case() {
    let mut table = RouteTable::new();
    ResourcesMapper::new(&mut table, Arc::new(EnglishInflector::new())).map("people");
    let id = BTreeMap::from([("id".to_string(), "5".to_string())]);

    assert_eq!(table.url_for("people", "SHOW", &id).as_deref(), Some("/people/5"));
    assert_eq!(
        table.url_for("people", "Edit", &id).as_deref(),
        Some("/people/5/Edit")
    );
}

#[test]
fn test_concurrent_resolution() {
    let table = blogs_with_comments();

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                let path = format!("/blogs/{}/comments/{}/edit", n, n * 10);
                let matched = table
                    .resolve(&RouteRequest::new(HttpMethod::Get, &path))
                    .unwrap();
                (matched.get("blogId").map(str::to_string), matched.id().map(str::to_string))
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let (blog, comment) = handle.join().unwrap();
        assert_eq!(blog, Some(n.to_string()));
        assert_eq!(comment, Some((n * 10).to_string()));
    }
}

#[test]
fn test_route_listing() {
    let listing = blogs_with_comments().to_string();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 14);
    assert_eq!(
        lines[3],
        "GET     blogs/{id}/{action} -> blogs#show [action=show|edit|delete]"
    );
    assert_eq!(
        lines[13],
        "POST    blogs/{blogId}/comments/{id} -> comments#(method override)"
    );
}
