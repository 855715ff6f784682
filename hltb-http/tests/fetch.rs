use hltb_http::{HttpClient, HttpError, RequestOpts, header_map};
use reqwest::{StatusCode, Url};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn url(server: &MockServer, p: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
}

#[tokio::test]
async fn fetches_html_with_default_and_request_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/10270"))
        .and(header("user-agent", "hltb-test/1.0"))
        .and(header("x-extra", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<main>ok</main>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(header_map([("User-Agent", "hltb-test/1.0")]).unwrap()).unwrap();
    let opts = RequestOpts {
        headers: Some(header_map([("X-Extra", "yes")]).unwrap()),
        ..Default::default()
    };
    let body = client
        .get_text(&url(&server, "/game/10270"), opts)
        .await
        .unwrap();
    assert_eq!(body, "<main>ok</main>");
}

#[tokio::test]
async fn sends_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", "hollow knight"))
        .respond_with(ResponseTemplate::new(200).set_body_string("results"))
        .mount(&server)
        .await;

    let client = HttpClient::new(Default::default()).unwrap();
    let opts = RequestOpts {
        query: Some(vec![("q".into(), "hollow knight".into())]),
        ..Default::default()
    };
    let body = client.get_text(&url(&server, "/"), opts).await.unwrap();
    assert_eq!(body, "results");
}

#[tokio::test]
async fn non_success_status_is_an_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(Default::default()).unwrap();
    let err = client
        .get_text(&url(&server, "/game/1"), RequestOpts::default())
        .await
        .unwrap_err();
    match err {
        HttpError::Api { status, snippet, .. } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(snippet, "busy");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn rejects_non_http_urls() {
    let client = HttpClient::new(Default::default()).unwrap();
    let err = client
        .get_text(&Url::parse("file:///etc/hosts").unwrap(), RequestOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Url(_)));
}
