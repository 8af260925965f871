//! Conversion between the comma-separated tag field of the item form and the
//! tag list sent to the server.
//!
//! The conversion is lossy: whitespace around each tag is trimmed and empty
//! segments are dropped, so `"a, ,b,"` and `"a, b"` yield the same list.

pub const TAG_SEPARATOR: &str = ", ";

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn split_drops_empty_segments_and_trims() {
        assert_eq!(
            split_tags(" sale, new ,, ,summer,"),
            tags(&["sale", "new", "summer"])
        );
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , ,").is_empty());
    }

    #[test]
    fn join_then_split_reproduces_tags() {
        for case in [
            tags(&[]),
            tags(&["one"]),
            tags(&["red", "green", "blue"]),
            tags(&["multi word", "x"]),
        ] {
            assert_eq!(split_tags(&join_tags(&case)), case);
        }
    }

    #[test]
    fn round_trip_removes_empty_tags() {
        let original = tags(&["a", "", "b", "  "]);
        assert_eq!(split_tags(&join_tags(&original)), tags(&["a", "b"]));
    }
}
