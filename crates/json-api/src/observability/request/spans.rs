//! Route normalisation for span fields and metric labels.

use uuid::Uuid;

/// Replace UUID path segments with `{uuid}` so labels stay low-cardinality.
pub(super) fn normalise_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::normalise_route;

    #[test]
    fn uuid_segments_are_replaced() {
        assert_eq!(
            normalise_route("/api/cart/0190a9c4-7c1e-7a3b-9d2f-1a2b3c4d5e6f"),
            "/api/cart/{uuid}"
        );
    }

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(normalise_route("/api/products"), "/api/products");
        assert_eq!(normalise_route("/"), "/");
    }
}
