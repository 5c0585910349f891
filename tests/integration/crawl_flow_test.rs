// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers;
use qualrs::domain::models::company::CompanyRequest;
use qualrs::domain::models::evidence::{Confidence, EvidenceKind};
use qualrs::domain::models::verdict::{FetchStrategy, VerdictStatus};
use qualrs::utils::errors::CrawlErrorKind;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn https_uri(server: &MockServer) -> String {
    server.uri().replacen("http://", "https://", 1)
}

#[tokio::test]
async fn test_native_tel_on_homepage_short_circuits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::TEL_HTML))
        .expect(1)
        .mount(&server)
        .await;
    // Candidate subpages must never be requested once the homepage qualifies
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::TEL_HTML))
        .expect(0)
        .mount(&server)
        .await;

    let service = helpers::loopback_service(helpers::test_settings());
    let request = CompanyRequest::new("Acme Insurance", server.uri());
    let verdict = service.crawl(&request).await;

    assert_eq!(verdict.status, VerdictStatus::Completed);
    assert!(verdict.is_qualified());
    assert_eq!(verdict.website, https_uri(&server));
    assert_eq!(verdict.pages_fetched, 1);
    assert_eq!(verdict.evidence.len(), 1);
    assert_eq!(verdict.evidence[0].kind, EvidenceKind::NativeTelInput);
    assert_eq!(verdict.strategy, FetchStrategy::PlainHttp);
}

#[tokio::test]
async fn test_label_evidence_found_on_contact_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::CLEAN_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::LABEL_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quote"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = helpers::loopback_service(helpers::test_settings());
    let request = CompanyRequest::new("Quiet Startup", server.uri());
    let verdict = service.crawl(&request).await;

    assert!(verdict.is_qualified());
    assert_eq!(verdict.evidence.len(), 1);
    assert_eq!(verdict.evidence[0].kind, EvidenceKind::LabelMatch);
    assert!(verdict.evidence[0].reason.contains("Best callback number"));
    // The 404 quote page does not count as fetched
    assert_eq!(verdict.pages_fetched, 2);
    assert_eq!(
        verdict.description.as_deref(),
        Some("Plain marketing copy for a plain company")
    );
}

#[tokio::test]
async fn test_unreachable_when_no_page_responds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // /contact and /quote fall through to the mock server's default 404

    let service = helpers::loopback_service(helpers::test_settings());
    let request = CompanyRequest::new("Dead Site", server.uri());
    let verdict = service.crawl(&request).await;

    assert_eq!(verdict.status, VerdictStatus::Failed);
    assert_eq!(verdict.error, Some(CrawlErrorKind::Unreachable));
    assert_eq!(verdict.pages_fetched, 0);
    assert!(!verdict.has_phone_field);
    assert!(verdict.evidence.is_empty());
}

#[tokio::test]
async fn test_early_stop_skips_remaining_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::TWO_FIELDS_HTML))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::CLEAN_HTML))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::CLEAN_HTML))
        .expect(0)
        .mount(&server)
        .await;

    let service = helpers::loopback_service(helpers::test_settings());
    let request = CompanyRequest::new("Two Fields", server.uri());
    let verdict = service.crawl(&request).await;

    assert!(verdict.is_qualified());
    assert_eq!(verdict.evidence.len(), 2);
    assert_eq!(verdict.pages_fetched, 1);
}

#[tokio::test]
async fn test_provider_embed_counts_as_evidence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::PROVIDER_HTML))
        .mount(&server)
        .await;

    let service = helpers::loopback_service(helpers::test_settings());
    let request = CompanyRequest::new("Embed Co", server.uri());
    let verdict = service.crawl(&request).await;

    assert!(verdict.is_qualified());
    assert_eq!(verdict.evidence.len(), 1);
    assert_eq!(verdict.evidence[0].kind, EvidenceKind::ProviderSignature);
    assert_eq!(verdict.evidence[0].confidence, Confidence::Low);
    assert!(verdict.evidence[0].reason.contains("hubspot"));
}

#[tokio::test]
async fn test_candidate_pages_visited_in_configured_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::CLEAN_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::CLEAN_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::TEL_HTML))
        .mount(&server)
        .await;

    let service = helpers::loopback_service(helpers::test_settings());
    let request = CompanyRequest::new("Late Bloomer", server.uri());
    let verdict = service.crawl(&request).await;

    assert!(verdict.is_qualified());
    assert_eq!(verdict.pages_fetched, 3);

    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled by default");
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths, vec!["/", "/contact", "/quote"]);
}
