use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use syncfm_discord::config::SyncFmConfig;
use syncfm_discord::links::{
    CallOptions, ConversionPipeline, EntityKind, LinkOrigin, MusicService, ServiceClassifier,
    SyncFmClient,
};
use syncfm_discord::runtime::observability::{ObserverEvent, ObserverMetric};
use syncfm_discord::ConversionFailure;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::recording::RecordingObserver;

fn pipeline(server: &MockServer, observer: &Arc<RecordingObserver>) -> ConversionPipeline {
    let config = SyncFmConfig {
        api_base: server.uri(),
        share_base: "https://share.test".into(),
        ..SyncFmConfig::default()
    };
    let client = SyncFmClient::new(&config, observer.clone());
    ConversionPipeline::new(ServiceClassifier::default(), client, observer.clone())
}

#[tokio::test]
async fn spotify_track_converts_to_every_known_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/handle/syncfm"))
        .and(query_param("url", "https://open.spotify.com/track/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "syncId": "sync-42",
            "shortcode": "q1w2",
            "title": "Song",
            "artists": ["Artist"],
            "externalIds": {
                "Spotify": "sp",
                "AppleMusic": "am",
                "YouTube": "yt"
            },
            "duration": 201
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/createUrl"))
        .and(body_partial_json(json!({"service": "applemusic", "type": "song"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"url": "https://music.apple.com/s"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/createUrl"))
        .and(body_partial_json(json!({"service": "spotify"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"url": "https://open.spotify.com/s"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/createUrl"))
        .and(body_partial_json(json!({"service": "ytmusic"})))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let observer = Arc::new(RecordingObserver::default());
    let outcome = pipeline(&server, &observer)
        .run("yo <https://open.spotify.com/track/abc>", &CallOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.source_service, MusicService::Spotify);
    assert_eq!(outcome.conversion.kind, EntityKind::Song);
    assert_eq!(outcome.conversion.link, "https://share.test/s/q1w2");

    let origins: Vec<LinkOrigin> = outcome.links.iter().map(|l| l.origin).collect();
    assert_eq!(
        origins,
        vec![
            LinkOrigin::SyncFm,
            LinkOrigin::Service(MusicService::Spotify),
            LinkOrigin::Service(MusicService::AppleMusic),
        ]
    );

    let names = observer.event_names();
    assert_eq!(names.first(), Some(&"conversion_start"));
    assert!(names.contains(&"conversion_success"));
    assert!(observer.events().iter().any(|event| matches!(
        event,
        ObserverEvent::Error { component, .. } if component.contains("ytmusic")
    )));
    assert!(observer.metrics().iter().any(|metric| matches!(
        metric,
        ObserverMetric::ServiceLinksBuilt { attempted: 3, built: 2 }
    )));

    let received = server.received_requests().await.unwrap();
    let create = received
        .iter()
        .find(|r| r.url.path() == "/api/createUrl")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(body["input"]["duration"], 201);
    assert_eq!(body["input"]["syncId"], "sync-42");
}

#[tokio::test]
async fn missing_shortcode_falls_back_to_long_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/handle/syncfm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "syncId": "abc 123",
            "name": "Some Artist"
        })))
        .mount(&server)
        .await;

    let observer = Arc::new(RecordingObserver::default());
    let outcome = pipeline(&server, &observer)
        .run("https://music.apple.com/us/artist/x/9", &CallOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.conversion.kind, EntityKind::Artist);
    assert_eq!(
        outcome.conversion.link,
        format!(
            "{}/api/handle/syncfm?syncId=abc+123&service=syncfm",
            server.uri()
        )
    );
    assert!(outcome.is_canonical_only());
}

#[tokio::test]
async fn slow_lookup_times_out_as_resolution_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"syncId": "late"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let observer = Arc::new(RecordingObserver::default());
    let failure = pipeline(&server, &observer)
        .run(
            "https://open.spotify.com/track/slow",
            &CallOptions::with_timeout(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();

    assert!(matches!(failure, ConversionFailure::ResolutionFailed { .. }));
    assert_eq!(
        observer.event_names(),
        vec!["conversion_start", "error", "conversion_failed"]
    );
}

#[tokio::test]
async fn cancelled_run_stops_promptly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"syncId": "late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();

    let observer = Arc::new(RecordingObserver::default());
    let failure = pipeline(&server, &observer)
        .run(
            "https://open.spotify.com/track/x",
            &CallOptions::default().cancelled_by(token),
        )
        .await
        .unwrap_err();

    assert!(matches!(failure, ConversionFailure::ResolutionFailed { .. }));
}

#[tokio::test]
async fn concurrent_runs_share_one_pipeline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/handle/syncfm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "syncId": "s",
            "shortcode": "c",
            "title": "T"
        })))
        .expect(3)
        .mount(&server)
        .await;

    let observer = Arc::new(RecordingObserver::default());
    let pipeline = Arc::new(pipeline(&server, &observer));

    let runs = [
        "https://open.spotify.com/track/1",
        "https://music.apple.com/us/song/2",
        "https://music.youtube.com/watch?v=3",
    ]
    .into_iter()
    .map(|text| {
        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move { pipeline.run(text, &CallOptions::default()).await })
    })
    .collect::<Vec<_>>();

    for run in runs {
        assert!(run.await.unwrap().is_ok());
    }
}
