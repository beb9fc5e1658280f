//! Extraction of video identifiers from pasted YouTube URLs.

/// URL forms that carry a video identifier, tried in priority order.
const ID_MARKERS: [&str; 4] = [
    "youtube.com/watch?v=",
    "youtu.be/",
    "youtube.com/embed/",
    "youtube.com/v/",
];

/// Characters that terminate an identifier token.
const ID_DELIMITERS: [char; 4] = ['&', '\n', '?', '#'];

/// Extract the video identifier from an arbitrary text string.
///
/// Tries the `watch?v=` query form, the `youtu.be` short-link form, the
/// `/embed/` form and the `/v/` form in that order, returning the first
/// non-empty token found. `None` means no identifier was present, which
/// is an expected outcome for empty input or non-YouTube text, not a
/// fault.
pub fn extract_video_id(input: &str) -> Option<&str> {
    for marker in ID_MARKERS {
        if let Some(pos) = input.find(marker) {
            let rest = &input[pos + marker.len()..];
            let end = rest.find(&ID_DELIMITERS[..]).unwrap_or(rest.len());
            if end > 0 {
                return Some(&rest[..end]);
            }
        }
    }

    None
}

/// Whether the given text contains a loadable video reference.
pub fn is_video_url(input: &str) -> bool {
    extract_video_id(input).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123"),
            Some("abc123")
        );
    }

    #[test]
    fn watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn short_url_stops_at_query() {
        assert_eq!(
            extract_video_id("https://youtu.be/abc123?t=5"),
            Some("abc123")
        );
    }

    #[test]
    fn embed_url() {
        assert_eq!(extract_video_id("https://youtube.com/embed/xyz"), Some("xyz"));
    }

    #[test]
    fn legacy_v_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/v/abc123#top"),
            Some("abc123")
        );
    }

    #[test]
    fn token_stops_at_fragment() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123#t=1"),
            Some("abc123")
        );
    }

    #[test]
    fn token_stops_at_newline() {
        assert_eq!(
            extract_video_id("https://youtu.be/abc123\nsecond line"),
            Some("abc123")
        );
    }

    #[test]
    fn no_identifier_in_plain_text() {
        assert_eq!(extract_video_id("not a url"), None);
    }

    #[test]
    fn empty_input() {
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn empty_capture_falls_through() {
        // The watch form matches but carries no token; the short form
        // later in the string still yields one.
        assert_eq!(
            extract_video_id("youtube.com/watch?v=&more https://youtu.be/abc"),
            Some("abc")
        );
    }

    #[test]
    fn extracted_ids_never_contain_delimiters() {
        let inputs = [
            "https://www.youtube.com/watch?v=a_b-c12&list=PL1",
            "https://youtu.be/a_b-c12?si=xyz",
            "https://youtube.com/embed/a_b-c12#start",
        ];
        for input in inputs {
            let id = extract_video_id(input).unwrap();
            assert!(!id.contains(['&', '?', '#', '\n']), "bad token {id:?}");
        }
    }

    #[test]
    fn predicate_delegates_to_extraction() {
        assert!(is_video_url("https://www.youtube.com/watch?v=abc123"));
        assert!(!is_video_url("https://example.com/watch"));
        assert!(!is_video_url(""));
    }
}
