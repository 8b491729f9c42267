//! Cross-origin access

use std::time::Duration;

use salvo::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Cors, CorsHandler, ExposeHeaders},
    http::{
        HeaderName, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// How long browsers may cache a preflight answer.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// CORS policy for every route: any origin, the API's methods, and bearer auth headers.
///
/// Mounted on the `Service` rather than a router so preflight requests are answered even
/// though no route declares `OPTIONS`.
pub(crate) fn handler() -> CorsHandler {
    Cors::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            AUTHORIZATION,
            CONTENT_TYPE,
            REQUEST_ID_HEADER,
        ]))
        .expose_headers(ExposeHeaders::list([REQUEST_ID_HEADER]))
        .max_age(PREFLIGHT_MAX_AGE)
        .into_handler()
}
