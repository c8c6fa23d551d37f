use super::hosts::ServiceClassifier;
use super::types::{MusicService, NormalizedUrl};

const LEADING_WRAPPERS: &[char] = &['<', '(', '{', '[', '\'', '"', '`'];
const TRAILING_PUNCTUATION: &[char] = &['>', ')', '}', ']', '\'', '"', '.', ',', '!', '?', ';', ':'];

/// Find the first token in `text` that classifies to a supported service.
///
/// Tokens are whitespace-separated; wrappers and trailing punctuation are
/// stripped and a missing scheme becomes `https://`.
pub fn extract_music_url(text: &str, classifier: &ServiceClassifier) -> Option<NormalizedUrl> {
    detect_music_url(text, classifier).map(|(url, _)| url)
}

/// Like [`extract_music_url`] but also returns the service that matched.
pub fn detect_music_url(
    text: &str,
    classifier: &ServiceClassifier,
) -> Option<(NormalizedUrl, MusicService)> {
    text.split_whitespace().find_map(|token| {
        let candidate = sanitize_candidate(token);
        if candidate.is_empty() {
            return None;
        }
        let normalized = NormalizedUrl::parse(&ensure_http_scheme(candidate))?;
        let service = classifier.classify_normalized(&normalized)?;
        Some((normalized, service))
    })
}

fn sanitize_candidate(token: &str) -> &str {
    token
        .trim_start_matches(LEADING_WRAPPERS)
        .trim_end_matches(TRAILING_PUNCTUATION)
}

fn has_http_scheme(candidate: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        candidate
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

fn ensure_http_scheme(candidate: &str) -> String {
    if has_http_scheme(candidate) {
        candidate.to_string()
    } else {
        format!("https://{candidate}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        extract_music_url(text, &ServiceClassifier::default()).map(NormalizedUrl::into_string)
    }

    #[test]
    fn schemed_url_is_returned_unchanged() {
        let url = "https://open.spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp";
        let classifier = ServiceClassifier::default();
        let (found, service) = detect_music_url(url, &classifier).unwrap();
        assert_eq!(found.as_str(), url);
        assert_eq!(service, MusicService::Spotify);
    }

    #[test]
    fn bare_host_gets_https_scheme() {
        assert_eq!(
            extract("music.apple.com/us/album/x/123?i=456").as_deref(),
            Some("https://music.apple.com/us/album/x/123?i=456")
        );
        assert_eq!(
            extract("spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp").as_deref(),
            Some("https://spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp")
        );
    }

    #[test]
    fn angle_brackets_are_stripped() {
        assert_eq!(
            extract("<https://open.spotify.com/track/abc>").as_deref(),
            Some("https://open.spotify.com/track/abc")
        );
    }

    #[test]
    fn surrounding_punctuation_is_stripped() {
        let message = "Check this track (https://open.spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp)!";
        assert_eq!(
            extract(message).as_deref(),
            Some("https://open.spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp")
        );
        assert_eq!(
            extract("\"https://music.youtube.com/watch?v=abc\",").as_deref(),
            Some("https://music.youtube.com/watch?v=abc")
        );
    }

    #[test]
    fn url_inside_sentence() {
        let message = "Hey everyone! Check out this amazing song: https://open.spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp it's so good!";
        assert_eq!(
            extract(message).as_deref(),
            Some("https://open.spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp")
        );
    }

    #[test]
    fn leftmost_supported_url_wins() {
        let message = "first https://example.com then music.apple.com/us/album/a/1 and https://open.spotify.com/track/b";
        assert_eq!(
            extract(message).as_deref(),
            Some("https://music.apple.com/us/album/a/1")
        );
    }

    #[test]
    fn uppercase_scheme_is_kept() {
        assert_eq!(
            extract("HTTPS://open.spotify.com/track/abc").as_deref(),
            Some("HTTPS://open.spotify.com/track/abc")
        );
        assert_eq!(
            extract("http://open.spotify.com/track/abc").as_deref(),
            Some("http://open.spotify.com/track/abc")
        );
    }

    #[test]
    fn text_without_links_yields_none() {
        for text in [
            "",
            "   ",
            "Just some random text",
            "Check out my website: example.com",
            "https://www.google.com",
            "https://twitter.com/user/status/123",
            "<<<>>> ... !!!",
        ] {
            assert_eq!(extract(text), None, "{text:?}");
        }
    }

    #[test]
    fn generic_youtube_follows_switch() {
        let classifier = ServiceClassifier::default();
        let url = "https://www.youtube.com/watch?v=abc";
        assert!(extract_music_url(url, &classifier).is_none());
        assert!(extract_music_url("youtu.be/abc123xyz", &classifier).is_none());

        classifier.set_generic_video_hosts(true);
        let (found, service) = detect_music_url(url, &classifier).unwrap();
        assert_eq!(found.as_str(), url);
        assert_eq!(service, MusicService::YtMusic);
        assert_eq!(
            extract_music_url("youtu.be/abc123xyz", &classifier).map(NormalizedUrl::into_string),
            Some("https://youtu.be/abc123xyz".to_string())
        );
    }

    #[test]
    fn stacked_wrappers_are_stripped() {
        assert_eq!(
            extract("([https://open.spotify.com/track/abc]).").as_deref(),
            Some("https://open.spotify.com/track/abc")
        );
        assert_eq!(
            extract("'<music.apple.com/us/album/x/1>'").as_deref(),
            Some("https://music.apple.com/us/album/x/1")
        );
    }
}
