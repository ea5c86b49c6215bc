use mazurka_core::{Method, Router};

type Handler = fn() -> &'static str;

fn main() {
    let mut router: Router<Handler> = Router::new();

    // Global middleware runs ahead of every chain; scoped middleware only
    // for requests that traverse its prefix.
    router.add_middleware("/", [(|| "auth") as Handler]).unwrap();
    router
        .add_middleware("/admin", [(|| "audit") as Handler])
        .unwrap();

    router.get("/", || "home").unwrap();
    router.get("/admin/users/:id", || "admin user").unwrap();
    router.get("/static/*", || "asset").unwrap();

    // First find() compiles the chains; later calls are pure tree walks.
    for (method, path) in [
        (Method::Get, "/"),
        (Method::Get, "/admin/users/42"),
        (Method::Get, "/static/css/site.css"),
        (Method::Post, "/admin/users/42"),
        (Method::Get, "/missing"),
    ] {
        let m = router.find(method, path);
        let outputs: Vec<_> = m.chain.iter().map(|h| h()).collect();
        println!(
            "{:7} {:22} routed={:5} chain={:?} params={:?}",
            method.as_str(),
            path,
            m.routed,
            outputs,
            m.params
        );
    }
}
