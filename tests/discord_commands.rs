use serde_json::json;
use syncfm_discord::config::DiscordConfig;
use syncfm_discord::transport::channels::discord::{
    build_default_commands, clear_commands, client_from_config, extract_share_command_url,
    is_convert_context_command, list_commands, register_commands,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> DiscordConfig {
    DiscordConfig {
        bot_token: Some("bot-secret".into()),
        client_id: Some("555".into()),
        api_base: server.uri(),
        enable_youtube: false,
    }
}

#[tokio::test]
async fn register_list_clear_round() {
    let server = MockServer::start().await;
    let registered = json!([
        {"id": "10", "name": "Convert to SyncFM", "type": 3, "description": ""},
        {"id": "11", "name": "share", "type": 1,
         "description": "Convert a music link to SyncFM and share it with the channel"}
    ]);
    Mock::given(method("PUT"))
        .and(path("/applications/555/commands"))
        .and(header("Authorization", "Bot bot-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(registered.clone()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/applications/555/commands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(registered))
        .mount(&server)
        .await;

    let (http, client_id) = client_from_config(&config(&server)).unwrap();

    let created = register_commands(&http, &client_id).await.unwrap();
    assert_eq!(created.len(), 2);

    let listed = list_commands(&http, &client_id).await.unwrap();
    let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Convert to SyncFM", "share"]);

    clear_commands(&http, &client_id).await.unwrap();

    let puts: Vec<serde_json::Value> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "PUT")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[0], json!(build_default_commands()));
    assert_eq!(puts[1], json!([]));
}

#[tokio::test]
async fn rate_limited_request_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"retry_after": 1.5})))
        .expect(1)
        .mount(&server)
        .await;

    let (http, client_id) = client_from_config(&config(&server)).unwrap();
    let err = list_commands(&http, &client_id).await.unwrap_err();
    assert!(format!("{err:#}").contains("429"));
}

#[test]
fn interaction_helpers_read_payloads() {
    let share = json!({
        "name": "share",
        "type": 1,
        "options": [{"name": "url", "type": 3, "value": "music.apple.com/us/album/x/1"}]
    });
    assert_eq!(
        extract_share_command_url(&share).as_deref(),
        Some("music.apple.com/us/album/x/1")
    );
    assert!(!is_convert_context_command(&share));

    let context = json!({"name": "Convert to SyncFM", "type": 3, "target_id": "99"});
    assert!(is_convert_context_command(&context));
    assert_eq!(extract_share_command_url(&context), None);
}
