//! App Router

use salvo::Router;

use crate::{auth, carts, categories, products};

/// Every JSON route, mounted under `/api`.
///
/// Catalog reads are public. Everything else runs behind the bearer token middleware, and
/// catalog writes additionally check for the admin role inside the handler.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::handlers::register::handler))
                .push(Router::with_path("login").post(auth::handlers::login::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(Router::with_path("{category}").get(categories::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("auth")
                        .push(Router::with_path("me").get(auth::handlers::me::handler))
                        .push(Router::with_path("logout").post(auth::handlers::logout::handler)),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .post(carts::add::handler)
                        .put(carts::update::handler)
                        .push(Router::with_path("{product}").delete(carts::remove::handler)),
                )
                .push(
                    Router::with_path("products")
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("categories")
                        .post(categories::create::handler)
                        .push(
                            Router::with_path("{category}")
                                .put(categories::update::handler)
                                .delete(categories::delete::handler),
                        ),
                ),
        )
}
