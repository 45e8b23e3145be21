use super::*;
use github_client::GitHubClient;
use label_roller_core::LabelSyncError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_manager(mock_server: &MockServer) -> LabelManager<GitHubClient> {
    let client =
        GitHubClient::from_token("ghp_test_token", &mock_server.uri(), Duration::from_secs(5))
            .expect("Failed to build test client");
    LabelManager::new(client)
}

#[tokio::test]
async fn test_pull_writes_labels_as_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "bug", "color": "d73a4a", "description": "Something isn't working", "default": true },
            { "name": "team: infra", "color": "0e8a16", "description": null, "default": false }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let manager = create_test_manager(&mock_server);
    let args = PullArgs {
        target: "octo/widgets".to_string(),
    };
    let mut output = Vec::new();

    execute(&manager, &args, &mut output)
        .await
        .expect("pull failed");

    let expected = r#"[
    {
        "name": "bug",
        "description": "Something isn't working",
        "color": "d73a4a"
    },
    {
        "name": "team: infra",
        "description": "",
        "color": "0e8a16"
    }
]
"#;
    assert_eq!(String::from_utf8(output).unwrap(), expected);
}

#[tokio::test]
async fn test_pull_requires_single_repository() {
    let mock_server = MockServer::start().await;
    let manager = create_test_manager(&mock_server);
    let args = PullArgs {
        target: "octo".to_string(),
    };

    let result = execute(&manager, &args, Vec::new()).await;

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}

#[tokio::test]
async fn test_pull_missing_repository() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/missing/labels"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let manager = create_test_manager(&mock_server);
    let args = PullArgs {
        target: "octo/missing".to_string(),
    };

    let result = execute(&manager, &args, Vec::new()).await;

    match result {
        Err(Error::Sync(LabelSyncError::Remote { source, .. })) => {
            assert!(matches!(source, github_client::Error::NotFound))
        }
        other => panic!("Expected a remote error, got {:?}", other),
    }
}
