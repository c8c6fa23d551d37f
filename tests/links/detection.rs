use syncfm_discord::links::{MusicService, ServiceClassifier, detect_music_url, extract_music_url};

fn extract(text: &str, classifier: &ServiceClassifier) -> Option<String> {
    extract_music_url(text, classifier).map(|url| url.as_str().to_string())
}

#[test]
fn first_supported_link_wins_in_chat_text() {
    let classifier = ServiceClassifier::default();
    let text = "see https://example.com/page then (https://music.apple.com/us/album/x/1) \
                and https://open.spotify.com/track/abc";

    let (url, service) = detect_music_url(text, &classifier).unwrap();
    assert_eq!(url.as_str(), "https://music.apple.com/us/album/x/1");
    assert_eq!(service, MusicService::AppleMusic);
}

#[test]
fn scheme_is_added_and_punctuation_removed() {
    let classifier = ServiceClassifier::default();
    assert_eq!(
        extract("try open.spotify.com/album/xyz!!", &classifier).as_deref(),
        Some("https://open.spotify.com/album/xyz")
    );
    assert_eq!(
        extract("\"https://music.youtube.com/watch?v=abc\".", &classifier).as_deref(),
        Some("https://music.youtube.com/watch?v=abc")
    );
}

#[test]
fn plain_youtube_follows_the_shared_toggle() {
    let classifier = ServiceClassifier::default();
    let handle = classifier.clone();
    let text = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    assert_eq!(extract(text, &classifier), None);

    handle.set_generic_video_hosts(true);
    let (_, service) = detect_music_url(text, &classifier).unwrap();
    assert_eq!(service, MusicService::YtMusic);

    handle.set_generic_video_hosts(false);
    assert_eq!(extract("https://youtu.be/dQw4w9WgXcQ", &classifier), None);
}

#[test]
fn lookalike_hosts_do_not_match() {
    let classifier = ServiceClassifier::with_generic_video_hosts(true);
    assert_eq!(extract("https://notspotify.com/track/1", &classifier), None);
    assert_eq!(extract("https://apple.com/music/1", &classifier), None);
    assert_eq!(extract("ftp://open.spotify.com/track/1", &classifier), None);
    assert_eq!(extract("", &classifier), None);
}
