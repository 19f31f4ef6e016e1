//! Resolution properties of the portal route table.

use std::collections::HashSet;

use proptest::prelude::*;

use portal_router::routing::table::PORTAL_ROUTES;
use portal_router::routing::{
    MatchOptions, NavigationTarget, ParamValue, RouteTable, Router, RouterOptions, View,
};

fn router() -> Router {
    Router::portal(RouterOptions::default()).unwrap()
}

#[test]
fn test_every_literal_path_resolves_to_its_name() {
    let router = router();
    for route in router.table().iter().filter(|r| r.path.param_names().next().is_none()) {
        let resolved = router.resolve_path(route.path.as_str()).unwrap();
        assert_eq!(resolved.name, route.name);
    }
}

#[test]
fn test_login_tag() {
    let router = router();

    let resolved = router.resolve_path("/login/promo123").unwrap();
    assert_eq!(resolved.name, "logintag");
    assert_eq!(resolved.params["tag"], ParamValue::Single("promo123".into()));

    assert_eq!(router.resolve_path("/login").unwrap().name, "login");
    assert_eq!(router.resolve_path("/login/xyz").unwrap().name, "logintag");
}

#[test]
fn test_unmatched_paths_resolve_to_not_found() {
    let router = router();
    for path in ["/nonexistent/page", "/a/b/c", "/login/a/b", "/courses/101"] {
        let resolved = router.resolve_path(path).unwrap();
        assert_eq!(resolved.name, "NotFound", "path {}", path);
        assert_eq!(resolved.view, View::NotFound);
    }
}

#[test]
fn test_route_names_are_distinct() {
    let table = RouteTable::portal().unwrap();
    let names: HashSet<&str> = table.names().collect();
    assert_eq!(names.len(), table.len());
}

#[test]
fn test_catch_all_never_shadows_earlier_routes() {
    let router = router();
    assert_eq!(router.resolve_path("/signup").unwrap().name, "signup");
    assert_eq!(router.resolve_path("/Signup/").unwrap().name, "signup");
    assert_eq!(router.table().iter().last().map(|r| r.is_catch_all()), Some(true));
}

#[test]
fn test_strict_sensitive_router() {
    let router = Router::portal(RouterOptions {
        matching: MatchOptions {
            strict: true,
            sensitive: true,
        },
        ..RouterOptions::default()
    })
    .unwrap();

    assert_eq!(router.resolve_path("/about").unwrap().name, "about");
    assert_eq!(router.resolve_path("/About").unwrap().name, "NotFound");
    assert_eq!(router.resolve_path("/about/").unwrap().name, "NotFound");
}

#[test]
fn test_named_routes_round_trip() {
    let router = router();
    for (_, name, _) in PORTAL_ROUTES {
        let target = match *name {
            "logintag" => NavigationTarget::named(*name).with_param("tag", "t1"),
            "NotFound" => NavigationTarget::named(*name).with_param("catchAll", "missing/page"),
            _ => NavigationTarget::named(*name),
        };
        let resolved = router.resolve(&target).unwrap();
        let again = router.resolve_path(&resolved.full_path).unwrap();
        assert_eq!(again.name, *name);
        assert_eq!(again.params, resolved.params);
    }
}

proptest! {
    #[test]
    fn prop_unknown_first_segment_is_not_found(
        first in "[a-z]{1,12}",
        rest in prop::collection::vec("[a-z0-9]{1,8}", 0..4),
    ) {
        let router = router();
        let literal_names: HashSet<String> = router
            .table()
            .iter()
            .filter_map(|r| r.path.as_str().strip_prefix('/').map(str::to_string))
            .collect();
        prop_assume!(!literal_names.contains(&first) && first != "login");

        let path = std::iter::once(first.clone())
            .chain(rest.iter().cloned())
            .fold(String::new(), |acc, s| format!("{}/{}", acc, s));
        let resolved = router.resolve_path(&path).unwrap();

        prop_assert_eq!(resolved.name.as_str(), "NotFound");
        let expected: Vec<String> = std::iter::once(first).chain(rest).collect();
        prop_assert_eq!(&resolved.params["catchAll"], &ParamValue::Repeated(expected));
    }

    #[test]
    fn prop_login_tag_captures_any_segment(tag in "[A-Za-z0-9_-]{1,24}") {
        let resolved = router().resolve_path(&format!("/login/{}", tag)).unwrap();
        prop_assert_eq!(resolved.name.as_str(), "logintag");
        prop_assert_eq!(&resolved.params["tag"], &ParamValue::Single(tag));
    }
}
