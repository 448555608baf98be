//! HTTP span helpers.

use uuid::Uuid;

/// Collapse identifier segments so routes group under one metric label.
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
    fn uuid_segments_are_collapsed() {
        assert_eq!(
            normalise_route("/restaurants/0195f4a2-7c1e-7b3a-9d4e-2f6a8b0c1d2e/staff"),
            "/restaurants/{uuid}/staff"
        );
        assert_eq!(normalise_route("/gate"), "/gate");
        assert_eq!(normalise_route("/"), "/");
    }
}
