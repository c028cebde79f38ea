//! Client tests.
//!
//! These use a scripted transport that records every request and replies with
//! canned responses, so no server is needed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use accountsapi::{
    API_CONTENT_TYPE, Client, Config, Error, Request, Resource, Response, Transport,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE, DATE};
use reqwest::{Method, StatusCode};

const PAYLOAD_JSON: &str = r#"{"data":{"id":"a6c1a721-bb1b-41ef-bd11-800a1309ff9b","organisation_id":"7442ea6b-164a-4818-b470-d98abfbc24ae","type":"accounts","version":0,"created_on":"2020-05-06T09:28:13.843Z","modified_on":"2020-05-06T09:28:13.843Z","attributes":{"country":"GB","base_currency":"GBP","bank_id":"400302","bank_id_code":"GBDSC","account_number":"10000004","bic":"NWBKGB42","name":["line1","line2","line3","line4"],"status":"confirmed"}},"links":{"self":"/v1/organisation/accounts/a6c1a721-bb1b-41ef-bd11-800a1309ff9b"}}"#;

const MULTI_PAYLOAD_JSON: &str = r#"{"data":[{"id":"a","organisation_id":"org","type":"accounts","version":0,"attributes":{"country":"GB","bank_id":"400302","name":["one","","",""]}},{"id":"b","organisation_id":"org","type":"accounts","version":2,"attributes":{"country":"DE","bank_id":"12345678","name":["two","","",""]}}],"links":{"self":"/v1/organisation/accounts?page[number]=1&page[size]=2","first":"/v1/organisation/accounts?page[number]=first&page[size]=2","next":"/v1/organisation/accounts?page[number]=2&page[size]=2","last":"/v1/organisation/accounts?page[number]=last&page[size]=2"}}"#;

/// Transport that replays scripted responses and records what was sent.
#[derive(Clone, Default)]
struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Response>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl ScriptedTransport {
    fn replying(status: StatusCode, body: &str) -> Self {
        let transport = Self::default();
        transport
            .responses
            .lock()
            .unwrap()
            .push_back(Response::new(status, body));
        transport
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: Request) -> accountsapi::Result<Response> {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left");
        Ok(response)
    }
}

fn client(transport: ScriptedTransport) -> Client<ScriptedTransport> {
    let config = Config::new("http://accountapi:8080", "orgid").unwrap();
    Client::with_transport(config, transport)
}

fn gb_account() -> Resource {
    Resource {
        bank_id: "123456".to_string(),
        bank_id_code: "GBDSC".to_string(),
        bic: "BARCGB22XXX".to_string(),
        ..Resource::new("GB")
    }
}

#[tokio::test]
async fn test_create_sends_envelope() {
    let transport = ScriptedTransport::replying(StatusCode::CREATED, PAYLOAD_JSON);
    let client = client(transport.clone());

    let created = client.create(gb_account()).await.unwrap();
    assert_eq!(created.data.id, "a6c1a721-bb1b-41ef-bd11-800a1309ff9b");
    assert_eq!(created.data.attributes.bank_id, "400302");
    assert_eq!(
        created.links.self_link,
        "/v1/organisation/accounts/a6c1a721-bb1b-41ef-bd11-800a1309ff9b"
    );

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.url.as_str(),
        "http://accountapi:8080/v1/organisation/accounts"
    );
    assert_eq!(request.headers[ACCEPT], API_CONTENT_TYPE);
    assert_eq!(request.headers[CONTENT_TYPE], API_CONTENT_TYPE);

    let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(sent["data"]["type"], "accounts");
    assert_eq!(sent["data"]["version"], 0);
    assert_eq!(sent["data"]["organisation_id"], "orgid");
    assert_eq!(sent["data"]["attributes"]["bank_id"], "123456");
    let id = uuid::Uuid::parse_str(sent["data"]["id"].as_str().unwrap()).unwrap();
    assert_eq!(id.get_version_num(), 4);
}

#[tokio::test]
async fn test_create_generates_fresh_ids() {
    let transport = ScriptedTransport::replying(StatusCode::CREATED, PAYLOAD_JSON);
    transport
        .responses
        .lock()
        .unwrap()
        .push_back(Response::new(StatusCode::CREATED, PAYLOAD_JSON));
    let client = client(transport.clone());

    client.create(gb_account()).await.unwrap();
    client.create(gb_account()).await.unwrap();

    let ids: Vec<String> = transport
        .requests()
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["data"]["id"].as_str().unwrap().to_string()
        })
        .collect();
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_create_invalid_account_sends_nothing() {
    let transport = ScriptedTransport::default();
    let client = client(transport.clone());

    let mut account = gb_account();
    account.bic.clear();
    account.bank_id = "1234".to_string();

    let err = client.create(account).await.unwrap_err();
    assert!(err.is_validation());
    let Error::Validation(validation) = &err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(validation.concerns("bic"));
    assert!(validation.concerns("bank_id"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_create_unexpected_status() {
    let transport = ScriptedTransport::replying(StatusCode::NOT_FOUND, "");
    let err = client(transport).create(gb_account()).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_create_non_json_body() {
    let transport = ScriptedTransport::replying(StatusCode::CREATED, "not a json");
    let err = client(transport).create(gb_account()).await.unwrap_err();
    assert!(matches!(err, Error::Codec(ref e) if e.is_malformed()));
}

#[tokio::test]
async fn test_create_incomplete_bodies() {
    for body in [
        r#"{"error":"a string, but not something that can become a Payload"}"#,
        r#"{"data":{"id": "a string, but not something that can become a Payload"}}"#,
    ] {
        let transport = ScriptedTransport::replying(StatusCode::CREATED, body);
        let err = client(transport).create(gb_account()).await.unwrap_err();
        assert!(matches!(err, Error::Codec(ref e) if e.is_incomplete()), "{body}");
    }
}

#[tokio::test]
async fn test_fetch() {
    let transport = ScriptedTransport::replying(StatusCode::OK, PAYLOAD_JSON);
    let client = client(transport.clone());

    let payload = client
        .fetch("a6c1a721-bb1b-41ef-bd11-800a1309ff9b")
        .await
        .unwrap();
    assert_eq!(payload.data.organisation_id, "7442ea6b-164a-4818-b470-d98abfbc24ae");
    assert_eq!(payload.data.attributes.name[3], "line4");

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(
        request.url.path(),
        "/v1/organisation/accounts/a6c1a721-bb1b-41ef-bd11-800a1309ff9b"
    );
    assert!(request.body.is_empty());
    assert!(request.headers.get(CONTENT_TYPE).is_none());
    assert!(request.headers[DATE].to_str().unwrap().ends_with("GMT"));
}

#[tokio::test]
async fn test_fetch_errors() {
    let cases = [
        (StatusCode::TOO_MANY_REQUESTS, PAYLOAD_JSON),
        (StatusCode::OK, "not a json"),
        (StatusCode::OK, r#"{"error":"not payload"}"#),
        (StatusCode::OK, r#"{"data":{"id":"no attributes yet"}}"#),
    ];

    for (status, body) in cases {
        let transport = ScriptedTransport::replying(status, body);
        let result = client(transport).fetch("uuidv4accountid").await;
        assert!(result.is_err(), "{status} {body}");
    }
}

#[tokio::test]
async fn test_list() {
    let transport = ScriptedTransport::replying(StatusCode::OK, MULTI_PAYLOAD_JSON);
    let client = client(transport.clone());

    let page = client.list(1, 2).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[1].version, 2);
    assert_eq!(page.data[1].attributes.country, "DE");
    assert_eq!(
        page.links.next,
        "/v1/organisation/accounts?page[number]=2&page[size]=2"
    );

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url.path(), "/v1/organisation/accounts");
    let query: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
    assert_eq!(
        query,
        vec![
            ("page[number]".to_string(), "1".to_string()),
            ("page[size]".to_string(), "2".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_list_empty_page() {
    let transport = ScriptedTransport::replying(
        StatusCode::OK,
        r#"{"data":[],"links":{"self":"/v1/organisation/accounts"}}"#,
    );
    let page = client(transport).list(0, 100).await.unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_list_errors() {
    let cases = [
        (StatusCode::NOT_FOUND, ""),
        (StatusCode::OK, "not a json"),
        (StatusCode::OK, r#"{"error":"not payload"}"#),
        (StatusCode::OK, r#"{"data":"not a json array"}"#),
        (StatusCode::OK, r#"{"data":["not an object"]}"#),
        (StatusCode::OK, r#"{"data":[{"randomkey":"notdata"}]}"#),
        (StatusCode::OK, r#"{"data":[{"id":"no attributes yet"}]}"#),
    ];

    for (status, body) in cases {
        let transport = ScriptedTransport::replying(status, body);
        let result = client(transport).list(1, 2).await;
        assert!(result.is_err(), "{status} {body}");
    }
}

#[tokio::test]
async fn test_delete() {
    let transport = ScriptedTransport::replying(StatusCode::NO_CONTENT, "");
    let client = client(transport.clone());

    client.delete("uuidv4accountid", 3).await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url.path(), "/v1/organisation/accounts/uuidv4accountid");
    assert_eq!(request.url.query(), Some("version=3"));
}

#[tokio::test]
async fn test_delete_conflict() {
    let transport = ScriptedTransport::replying(StatusCode::CONFLICT, "");
    let err = client(transport).delete("uuidv4accountid", 3).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));
}
