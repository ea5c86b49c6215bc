use std::collections::HashMap;

use mazurka_core::{Method, PathParams, Router, RouterError, parse_params};
use serde::Deserialize;

type Handler = fn() -> &'static str;

fn run(chain: &[Handler]) -> Vec<&'static str> {
    chain.iter().map(|h| h()).collect()
}

fn sample_router() -> Router<Handler> {
    let mut r: Router<Handler> = Router::new();

    r.get("/", || "root").unwrap();
    r.get("/about", || "about page").unwrap();
    r.get("/user/profile", || "static profile").unwrap();
    r.get("/user/:id", || "dynamic user").unwrap();
    r.get("/files/*", || "catch all").unwrap();

    r.get("/api/data", || "GET handler").unwrap();
    r.post("/api/data", || "POST handler").unwrap();

    r.get("/a/:b/c/:d/e", || "nested").unwrap();
    r.get("/orgs/:orgId/teams/:teamId", || "team").unwrap();
    r
}

#[test]
fn root_route() {
    let r = sample_router();
    let m = r.match_route(Method::Get, "/");
    assert_eq!(run(&m.chain), ["root"]);
}

#[test]
fn static_route() {
    let r = sample_router();
    let m = r.match_route(Method::Get, "/about");
    assert_eq!(run(&m.chain), ["about page"]);
}

#[test]
fn dynamic_route() {
    let r = sample_router();
    let m = r.match_route(Method::Get, "/user/123");
    assert_eq!(run(&m.chain), ["dynamic user"]);
    assert_eq!(m.params.unwrap().get("id").unwrap(), "123");
}

#[test]
fn wildcard_route() {
    let r = sample_router();
    let m = r.match_route(Method::Get, "/files/images/photo.png");
    assert_eq!(run(&m.chain), ["catch all"]);
    assert!(m.params.is_none());
}

#[test]
fn multiple_methods() {
    let r = sample_router();
    let get = r.match_route(Method::Get, "/api/data");
    let post = r.match_route(Method::Post, "/api/data");
    assert_eq!(run(&get.chain), ["GET handler"]);
    assert_eq!(run(&post.chain), ["POST handler"]);
}

#[test]
fn method_not_found() {
    let r = sample_router();
    let m = r.match_route(Method::Put, "/api/data");
    assert!(!m.routed);
    assert!(m.chain.is_empty());
}

#[test]
fn deep_dynamic_route() {
    let r = sample_router();
    let m = r.match_route(Method::Get, "/a/123/c/456/e");
    assert_eq!(run(&m.chain), ["nested"]);
    let params = m.params.unwrap();
    assert_eq!(params.get("b").unwrap(), "123");
    assert_eq!(params.get("d").unwrap(), "456");
}

#[test]
fn prefer_exact_over_dynamic() {
    let r = sample_router();
    let m = r.match_route(Method::Get, "/user/profile");
    assert_eq!(run(&m.chain), ["static profile"]);
}

#[test]
fn non_existent_route() {
    let r = sample_router();
    let m = r.match_route(Method::Get, "/non-existent");
    assert!(!m.routed);
    assert!(m.chain.is_empty());
}

#[test]
fn middleware_order() {
    let mut r: Router<Handler> = Router::new();
    r.add_middleware("/", [(|| "mw1") as Handler]).unwrap();
    r.add_middleware("/", [(|| "mw2") as Handler]).unwrap();
    r.get("/", || "handler").unwrap();

    let m = r.find(Method::Get, "/");
    assert_eq!(run(m.chain), ["mw1", "mw2", "handler"]);
}

fn scoped_router() -> Router<Handler> {
    let mut r: Router<Handler> = Router::new();
    r.add_middleware("/", [(|| "global") as Handler]).unwrap();
    r.add_middleware("/users", [(|| "users level") as Handler])
        .unwrap();
    r.add_middleware("/user/**", [(|| "user tree") as Handler])
        .unwrap();
    r.add_middleware("/user/name", [(|| "user name") as Handler])
        .unwrap();
    r.get("/user/name", || "handler").unwrap();
    r
}

#[test]
fn collects_all_matching_middleware() {
    let r = scoped_router();
    let m = r.match_route(Method::Get, "/user/name");
    assert_eq!(run(&m.chain), ["global", "user tree", "user name", "handler"]);
    assert!(m.routed);
}

#[test]
fn method_mismatch_keeps_path_middleware() {
    let r = scoped_router();
    let m = r.match_route(Method::Post, "/user/name");
    assert_eq!(run(&m.chain), ["global", "user tree", "user name"]);
    assert!(!m.routed);
}

#[test]
fn miss_keeps_middleware_to_deepest_node() {
    let r = scoped_router();
    // `name` does not resolve under /users, but /users itself was entered
    let m = r.match_route(Method::Get, "/users/name");
    assert_eq!(run(&m.chain), ["global", "users level"]);
    assert!(!m.routed);
}

#[test]
fn middleware_only_path_has_no_handler() {
    let r = scoped_router();
    let m = r.match_route(Method::Get, "/users");
    assert_eq!(run(&m.chain), ["global", "users level"]);
    assert!(!m.routed);
}

#[test]
fn wildcard_middleware_applies_under_its_own_subtree() {
    let r = scoped_router();
    // resolves through the `**` child itself
    let m = r.match_route(Method::Get, "/user/someone/else");
    assert_eq!(run(&m.chain), ["global", "user tree", "user tree"]);
    assert!(!m.routed);
}

fn edge_router() -> Router<Handler> {
    let mut r: Router<Handler> = Router::new();
    r.add_middleware("/", [(|| "global") as Handler]).unwrap();
    r.add_middleware("/*", [(|| "edge") as Handler]).unwrap();
    r.get("/a", || "h").unwrap();
    r
}

#[test]
fn wildcard_first_middleware_runs_in_direct_mode() {
    let r = edge_router();

    // routed hit through a static sibling of the wildcard
    let m = r.match_route(Method::Get, "/a");
    assert_eq!(run(&m.chain), ["global", "edge", "h"]);
    assert!(m.routed);

    // miss swallowed by the wildcard child: pre-descent append at the root
    // plus the append at the wildcard node itself
    let m = r.match_route(Method::Get, "/zzz");
    assert_eq!(run(&m.chain), ["global", "edge", "edge"]);
    assert!(!m.routed);
}

const PROBES: &[(Method, &str)] = &[
    (Method::Get, "/"),
    (Method::Get, "/about"),
    (Method::Get, "/user/profile"),
    (Method::Get, "/user/123"),
    (Method::Post, "/user/123"),
    (Method::Get, "/files/a/b/c.png"),
    (Method::Get, "/api/data"),
    (Method::Post, "/api/data"),
    (Method::Put, "/api/data"),
    (Method::Get, "/a/1/c/2/e"),
    (Method::Get, "/orgs/acme/teams/core"),
    (Method::Get, "/non-existent"),
    (Method::Get, "/user"),
    (Method::Get, "/users/name"),
    (Method::Get, "/user/name"),
];

#[test]
fn compiled_matches_direct() {
    let mut routers = [sample_router(), scoped_router(), edge_router()];
    for r in &mut routers {
        let direct: Vec<_> = PROBES
            .iter()
            .map(|&(method, path)| {
                let m = r.match_route(method, path);
                (run(&m.chain), m.params, m.routed)
            })
            .collect();

        r.compile();
        for (&(method, path), want) in PROBES.iter().zip(&direct) {
            let m = r.compiled_match(method, path);
            assert_eq!(
                (run(m.chain), m.params, m.routed),
                want.clone(),
                "diverged on {} {}",
                method.as_str(),
                path
            );
        }
    }
}

#[test]
fn compile_is_idempotent() {
    let mut r = scoped_router();
    r.compile();
    let once: Vec<_> = PROBES
        .iter()
        .map(|&(method, path)| {
            let m = r.compiled_match(method, path);
            (run(m.chain), m.params, m.routed)
        })
        .collect();

    r.compile();
    for (&(method, path), want) in PROBES.iter().zip(&once) {
        let m = r.compiled_match(method, path);
        assert_eq!((run(m.chain), m.params, m.routed), want.clone());
    }
}

#[test]
fn registration_is_rejected_after_compile() {
    let mut r = sample_router();
    let _ = r.find(Method::Get, "/");
    assert!(matches!(
        r.get("/late", || "late"),
        Err(RouterError::Sealed)
    ));
}

#[test]
fn positional_params_reconstruction() {
    let mut r: Router<Handler> = Router::new();
    r.get("/hello/:id", || "ok").unwrap();

    let m = r.find(Method::Get, "/hello/123");
    assert_eq!(run(m.chain), ["ok"]);

    // the same capture, reconstructed from a recorded position scheme
    let positions = HashMap::from([("id".to_string(), 1usize)]);
    let params = parse_params(Some("/hello/123?verbose=1"), Some(&positions));
    assert_eq!(params.get("id").unwrap(), "123");
}

#[derive(Deserialize)]
struct TeamPath {
    #[serde(rename = "orgId")]
    org_id: String,
    #[serde(rename = "teamId")]
    team_id: String,
}

#[test]
fn typed_param_extraction() {
    let r = sample_router();
    let m = r.match_route(Method::Get, "/orgs/acme/teams/core");
    let params = m.params.unwrap();

    let PathParams(team) = PathParams::<TeamPath>::from_params(&params).unwrap();
    assert_eq!(team.org_id, "acme");
    assert_eq!(team.team_id, "core");
}
