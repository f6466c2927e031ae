//! Integration tests for the Jenkins client over HTTP.
//!
//! These tests use wiremock to play the Jenkins server and drive the client
//! through the reqwest transport.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rustline_jenkins::{BuildOptions, Config, ErrorKind, GetOptions, Jenkins, NodeCreateOptions};

fn client(server: &MockServer) -> Jenkins {
    Jenkins::new(&server.uri()).unwrap()
}

#[tokio::test]
async fn test_job_exists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/job/present/api/json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/job/broken/api/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let jenkins = client(&mock_server);
    assert!(jenkins.job().exists("present").await.unwrap());
    assert!(!jenkins.job().exists("absent").await.unwrap());

    let err = jenkins.job().exists("broken").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(err.scope().to_string(), "job.exists");
}

#[tokio::test]
async fn test_job_build_returns_queue_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/job/deploy/build"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", format!("{}/queue/item/42/", mock_server.uri())),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let id = client(&mock_server)
        .job()
        .build("deploy", &BuildOptions::new())
        .await
        .unwrap();
    assert_eq!(id, 42);
}

#[tokio::test]
async fn test_job_build_with_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/job/team/job/app/buildWithParameters"))
        .and(query_param("env", "staging"))
        .and(query_param("token", "trigger"))
        .respond_with(ResponseTemplate::new(201).insert_header("Location", "/queue/item/7"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = BuildOptions::new()
        .parameter("env", "staging")
        .token("trigger");
    let id = client(&mock_server)
        .job()
        .build("team/app", &options)
        .await
        .unwrap();
    assert_eq!(id, 7);
}

#[tokio::test]
async fn test_job_build_without_location() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/job/deploy/build"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .job()
        .build("deploy", &BuildOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_job_create_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/createItem"))
        .and(query_param("name", "deploy"))
        .and(header("content-type", "text/xml"))
        .respond_with(
            ResponseTemplate::new(400).insert_header("X-Error", "A job already exists with the name 'deploy'"),
        )
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .job()
        .create("deploy", "<project/>")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        err.to_string(),
        "job.create: A job already exists with the name 'deploy'"
    );
}

#[tokio::test]
async fn test_job_list_corrupted_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/json"))
        .and(query_param("depth", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .job()
        .list(&GetOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadData);
    assert_eq!(err.to_string(), "job.list: returned bad data");
}

#[tokio::test]
async fn test_job_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/json"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [
                {"name": "deploy", "color": "blue"},
                {"name": "test", "color": "red"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let jobs = client(&mock_server)
        .job()
        .list(&GetOptions::depth(1))
        .await
        .unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[1]["name"], "test");
}

#[tokio::test]
async fn test_job_destroy_answering_200() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/job/deploy/doDelete"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).job().destroy("deploy").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    assert_eq!(err.detail(), "failed to delete: deploy");
}

#[tokio::test]
async fn test_redirects_are_not_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/job/deploy/disable"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/job/deploy/", mock_server.uri())),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/job/deploy/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    client(&mock_server).job().disable("deploy").await.unwrap();
}

#[tokio::test]
async fn test_build_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/job/deploy/12/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 12,
            "result": "SUCCESS"
        })))
        .mount(&mock_server)
        .await;

    let jenkins = client(&mock_server);
    let build = jenkins
        .build()
        .get("deploy", 12, &GetOptions::default())
        .await
        .unwrap();
    assert_eq!(build["result"], "SUCCESS");

    let err = jenkins
        .build()
        .get("deploy", 13, &GetOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "build.get: deploy 13 not found");
}

#[tokio::test]
async fn test_build_log() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/job/deploy/3/consoleText"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Finished: FAILURE\n"))
        .mount(&mock_server)
        .await;

    let log = client(&mock_server).build().log("deploy", 3).await.unwrap();
    assert_eq!(log, "Finished: FAILURE\n");
}

#[tokio::test]
async fn test_master_config_never_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .node()
        .set_config("master", "<slave/>")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert_eq!(err.to_string(), "node.config: master not supported");
}

#[tokio::test]
async fn test_master_alias_on_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/computer/(master)/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"displayName": "master"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let node = client(&mock_server)
        .node()
        .get("master", &GetOptions::default())
        .await
        .unwrap();
    assert_eq!(node["displayName"], "master");
}

#[tokio::test]
async fn test_node_disable_online() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/computer/agent-1/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "temporarilyOffline": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/computer/agent-1/toggleOffline"))
        .and(query_param("offlineMessage", "disk replacement"))
        .respond_with(ResponseTemplate::new(302))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .node()
        .disable("agent-1", "disk replacement")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_node_disable_offline_updates_cause() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/computer/agent-1/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "temporarilyOffline": true,
            "offlineCauseReason": "old reason"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/computer/agent-1/changeOfflineCause"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("offlineMessage=new+reason"))
        .respond_with(ResponseTemplate::new(302))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/computer/agent-1/toggleOffline"))
        .respond_with(ResponseTemplate::new(302))
        .expect(0)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .node()
        .disable("agent-1", "new reason")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_node_enable_missing() {
    let mock_server = MockServer::start().await;

    let err = client(&mock_server).node().enable("ghost").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "node.enable: ghost not found");
}

#[tokio::test]
async fn test_node_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/computer/doCreateItem"))
        .and(body_string_contains("name=agent-2"))
        .and(body_string_contains("type=hudson.slaves.DumbSlave"))
        .respond_with(ResponseTemplate::new(302))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = NodeCreateOptions {
        labels: vec!["linux".to_string()],
        ..NodeCreateOptions::default()
    };
    client(&mock_server)
        .node()
        .create("agent-2", &options)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_queue_list_and_cancel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/queue/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 5, "why": "Waiting for next available executor"}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/queue/cancelItem"))
        .and(query_param("id", "5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let jenkins = client(&mock_server);
    let items = jenkins.queue().list(&GetOptions::default()).await.unwrap();
    assert_eq!(items[0]["id"], 5);

    jenkins.queue().cancel(5).await.unwrap();
}

#[tokio::test]
async fn test_basic_auth_from_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/json"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"mode": "NORMAL"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config {
        base_url: mock_server.uri(),
        username: Some("admin".to_string()),
        api_token: Some("secret".to_string()),
        ..Config::default()
    };
    let info = Jenkins::from_config(&config)
        .unwrap()
        .info(&GetOptions::default())
        .await
        .unwrap();
    assert_eq!(info["mode"], "NORMAL");
}

#[tokio::test]
async fn test_context_path_is_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/jenkins/computer/agent-1/api/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let jenkins = Jenkins::new(&format!("{}/jenkins/", mock_server.uri())).unwrap();
    assert!(jenkins.node().exists("agent-1").await.unwrap());
}

#[tokio::test]
async fn test_connection_refused() {
    let jenkins = Jenkins::new("http://127.0.0.1:1").unwrap();

    let err = jenkins.queue().cancel(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.scope().to_string(), "queue.cancel");
}
