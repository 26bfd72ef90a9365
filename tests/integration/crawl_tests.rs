//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small speaker site and run the full
//! harvest over real HTTP.

use speaker_harvest::config::Config;
use speaker_harvest::crawler::{Harvester, HttpFetcher, NoProgress};
use speaker_harvest::output::{JsonFileSink, OutputSink};
use speaker_harvest::{LoopState, ScrapeError, SpeakerId};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server's listing page
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.site.base_url = Some(format!("{}/speakers", server.uri()));
    config.crawler.max_iterations = 20;
    config.crawler.request_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

fn harvester(config: &Config) -> Harvester<HttpFetcher> {
    let fetcher = HttpFetcher::new(&config.user_agent, &config.crawler).expect("client");
    Harvester::new(config, fetcher).expect("harvester")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn listing_page(total: usize, payloads: &[&str]) -> String {
    let nodes: String = payloads
        .iter()
        .enumerate()
        .map(|(i, payload)| {
            format!(
                r#"<div class="space-y-6" speaker="{}">
                    <div><img src="/storage/avatars/{}.jpg" alt=""></div>
                    <h3>Speaker</h3>
                </div>"#,
                escape_attr(payload),
                i
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html><html><head><title>Speakers</title></head><body>
        <main>{}</main>
        <nav><p class="text-sm text-gray-700 leading-5 dark:text-gray-400">
            Showing <span class="font-medium">1</span> to <span class="font-medium">{}</span>
            of <span class="font-medium">{}</span> results
        </p></nav>
        </body></html>"#,
        nodes,
        payloads.len(),
        total
    )
}

fn profile_page(hrefs: &[&str]) -> String {
    let cards: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<a class="flex flex-col rounded-lg hover:shadow-lg overflow-hidden" href="{}">
                    <div class="flex-1">Talk card</div>
                </a>"#,
                href
            )
        })
        .collect();

    format!("<!DOCTYPE html><html><body><section>{}</section></body></html>", cards)
}

fn talk_page(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><body>
        <h1><span class="mt-2 block text-3xl font-bold leading-8 tracking-tight text-gray-900 sm:text-4xl">
            {}
        </span></h1>
        <span class="mt-3 block text-sm tracking-tight text-gray-700"><svg></svg> 45 min </span>
        <a class="block" href="https://slides.example.com/deck">Slides</a>
        <div class="prose prose-sm md:prose-base prose-indigo mx-auto bg-gray-100 text-gray-700 mt-12 px-4 pb-1 pt-5 shadow rounded-lg">
            <div><p>Who should attend.</p></div>
        </div>
        <div class="relative group prose prose-lg prose-indigo mx-auto mt-6 text-gray-500">
            <div><p>What the talk covers.</p></div>
        </div>
        </body></html>"#,
        title
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

const ADA: &str = r#"{"id":1,"username":"ada","name":"Ada &amp; Co","location":"London","company":null,"job_title":"Engineer","twitter":"ada","website":null,"youtube":"","email":null,"bio":"First line\nSecond line"}"#;
const GRACE: &str = r#"{"id":2,"username":"grace","name":"Grace","twitter":null,"bio":"Compilers"}"#;
const LIN: &str = r#"{"id":"s-3","username":"lin","name":"Lin","bio":""}"#;

#[tokio::test]
async fn test_full_harvest_single_listing() {
    let server = MockServer::start().await;

    mount_page(&server, "/speakers/", listing_page(2, &[ADA, GRACE])).await;
    mount_page(&server, "/speakers/ada", profile_page(&["/talks/intro", "/talks/deep-dive"])).await;
    mount_page(&server, "/speakers/grace", profile_page(&[])).await;
    mount_page(&server, "/talks/intro", talk_page("Intro &amp;amp; Basics")).await;
    mount_page(&server, "/talks/deep-dive", talk_page("Deep Dive")).await;

    let config = create_test_config(&server);
    let mut harvester = harvester(&config);
    harvester.run(&NoProgress).await.expect("harvest should succeed");

    assert_eq!(harvester.state(), LoopState::Done);
    let speakers = harvester.speakers();
    assert_eq!(speakers.len(), 2);

    let ada = &speakers[0];
    assert_eq!(ada.id, SpeakerId::Numeric(1));
    assert_eq!(ada.name, "Ada & Co");
    assert_eq!(ada.bio, "First line Second line");
    assert_eq!(ada.twitter.as_deref(), Some("https://x.com/ada"));
    assert_eq!(ada.youtube, None);
    assert_eq!(
        ada.image,
        Some(format!("{}/storage/avatars/0.jpg", server.uri()))
    );

    let titles: Vec<_> = ada.talks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Intro & Basics", "Deep Dive"]);

    let intro = &ada.talks[0];
    assert_eq!(intro.talk_url, format!("{}/talks/intro", server.uri()));
    assert_eq!(intro.duration.as_deref(), Some("45 min"));
    assert_eq!(intro.slider_url.as_deref(), Some("https://slides.example.com/deck"));
    assert_eq!(intro.about_this_talk.as_deref(), Some("Who should attend."));
    assert_eq!(intro.description.as_deref(), Some("What the talk covers."));

    assert!(speakers[1].talks.is_empty());
    assert_eq!(harvester.stats().iterations, 1);
}

#[tokio::test]
async fn test_rotating_listing_is_deduplicated() {
    let server = MockServer::start().await;

    // Each request sees a partial, overlapping sample
    Mock::given(method("GET"))
        .and(path("/speakers/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(3, &[ADA, GRACE])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/speakers/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(3, &[GRACE, ADA])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, "/speakers/", listing_page(3, &[LIN, GRACE])).await;

    for username in ["ada", "grace", "lin"] {
        mount_page(&server, &format!("/speakers/{}", username), profile_page(&[])).await;
    }

    let config = create_test_config(&server);
    let mut harvester = harvester(&config);
    harvester.run(&NoProgress).await.expect("harvest should succeed");

    let ids: Vec<_> = harvester.speakers().iter().map(|s| s.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            SpeakerId::Numeric(1),
            SpeakerId::Numeric(2),
            SpeakerId::Text("s-3".to_string())
        ]
    );
    // The third page's trailing duplicate is never examined
    assert_eq!(harvester.stats().iterations, 3);
    assert_eq!(harvester.stats().duplicates_skipped, 2);
}

#[tokio::test]
async fn test_failing_talk_is_isolated() {
    let server = MockServer::start().await;

    mount_page(&server, "/speakers/", listing_page(1, &[GRACE])).await;
    mount_page(
        &server,
        "/speakers/grace",
        profile_page(&["/talks/a", "/talks/broken", "/talks/c"]),
    )
    .await;
    mount_page(&server, "/talks/a", talk_page("A")).await;
    mount_page(&server, "/talks/c", talk_page("C")).await;
    Mock::given(method("GET"))
        .and(path("/talks/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let mut harvester = harvester(&config);
    harvester.run(&NoProgress).await.expect("harvest should succeed");

    let titles: Vec<_> = harvester.speakers()[0]
        .talks
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["A", "C"]);
    assert_eq!(harvester.stats().talks_dropped, 1);
}

#[tokio::test]
async fn test_concurrent_talks_keep_profile_order() {
    let server = MockServer::start().await;

    mount_page(&server, "/speakers/", listing_page(1, &[GRACE])).await;
    mount_page(
        &server,
        "/speakers/grace",
        profile_page(&["/talks/slow", "/talks/medium", "/talks/fast"]),
    )
    .await;
    for (route, title, delay_ms) in [
        ("/talks/slow", "Slow", 300),
        ("/talks/medium", "Medium", 150),
        ("/talks/fast", "Fast", 0),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(talk_page(title))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&server)
            .await;
    }

    let mut config = create_test_config(&server);
    config.crawler.talk_concurrency = 3;
    let mut harvester = harvester(&config);
    harvester.run(&NoProgress).await.expect("harvest should succeed");

    let titles: Vec<_> = harvester.speakers()[0]
        .talks
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Slow", "Medium", "Fast"]);
}

#[tokio::test]
async fn test_malformed_listing_node_is_skipped() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/speakers/",
        listing_page(1, &[r#"{"id": 9, "username": "#, GRACE]),
    )
    .await;
    mount_page(&server, "/speakers/grace", profile_page(&[])).await;

    let config = create_test_config(&server);
    let mut harvester = harvester(&config);
    harvester.run(&NoProgress).await.expect("harvest should succeed");

    assert_eq!(harvester.speakers().len(), 1);
    assert_eq!(harvester.stats().malformed_payloads, 1);
}

#[tokio::test]
async fn test_missing_result_count_is_fatal() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/speakers/",
        "<html><body><p>Maintenance</p></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&server);
    let mut harvester = harvester(&config);
    let err = harvester.run(&NoProgress).await.unwrap_err();

    assert!(matches!(err, ScrapeError::TargetCount { .. }));
    assert!(harvester.speakers().is_empty());
}

#[tokio::test]
async fn test_listing_server_error_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/speakers/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let mut harvester = harvester(&config);
    let err = harvester.run(&NoProgress).await.unwrap_err();

    assert!(matches!(err, ScrapeError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_harvest_written_to_json_file() {
    let server = MockServer::start().await;

    mount_page(&server, "/speakers/", listing_page(1, &[ADA])).await;
    mount_page(&server, "/speakers/ada", profile_page(&["/talks/intro"])).await;
    mount_page(&server, "/talks/intro", talk_page("Intro")).await;

    let config = create_test_config(&server);
    let mut harvester = harvester(&config);
    harvester.run(&NoProgress).await.expect("harvest should succeed");

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("speakers.json");
    JsonFileSink::new(&out).write(harvester.speakers()).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    let speakers = value.as_array().unwrap();

    assert_eq!(speakers.len(), 1);
    assert_eq!(speakers[0]["id"], 1);
    assert_eq!(speakers[0]["company"], serde_json::Value::Null);
    assert_eq!(speakers[0]["talks"][0]["title"], "Intro");
    assert_eq!(speakers[0]["talks"][0]["duration"], "45 min");
    assert!(written.starts_with("[\n    {\n        \"id\": 1,"));
}
