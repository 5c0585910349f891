// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers;
use qualrs::application::ingest;
use qualrs::application::report::{self, BatchSummary};
use qualrs::domain::models::company::CompanyRequest;
use qualrs::domain::models::verdict::VerdictStatus;
use qualrs::utils::errors::CrawlErrorKind;
use qualrs::workers::CrawlPool;
use std::collections::HashSet;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn tel_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::TEL_HTML))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_batch_isolates_failing_companies() {
    let ok_server = tel_server().await;
    // Nothing mounted: every candidate page answers 404
    let dead_server = MockServer::start().await;

    let companies = vec![
        CompanyRequest::new("Acme", ok_server.uri()),
        CompanyRequest::new("Blank", "   "),
        CompanyRequest::new("Dead", dead_server.uri()),
    ];

    let service = Arc::new(helpers::loopback_service(helpers::test_settings()));
    let pool = CrawlPool::with_service(service, 2);
    let verdicts = pool.run(companies).await;
    assert_eq!(verdicts.len(), 3);

    let acme = verdicts.iter().find(|v| v.company_name == "Acme").unwrap();
    assert!(acme.is_qualified());

    let blank = verdicts.iter().find(|v| v.company_name == "Blank").unwrap();
    assert_eq!(blank.status, VerdictStatus::Failed);
    assert_eq!(blank.error, Some(CrawlErrorKind::InvalidUrl));
    assert_eq!(blank.website, "   ");

    let dead = verdicts.iter().find(|v| v.company_name == "Dead").unwrap();
    assert_eq!(dead.status, VerdictStatus::Failed);
    assert_eq!(dead.error, Some(CrawlErrorKind::Unreachable));
}

#[tokio::test]
async fn test_one_verdict_per_company() {
    let server = tel_server().await;
    let companies: Vec<CompanyRequest> = (1..=6)
        .map(|i| CompanyRequest::new(format!("Company {}", i), server.uri()))
        .collect();

    let service = Arc::new(helpers::loopback_service(helpers::test_settings()));
    let pool = CrawlPool::with_service(service, 3);
    let verdicts = pool.run(companies).await;

    assert_eq!(verdicts.len(), 6);
    let names: HashSet<&str> = verdicts.iter().map(|v| v.company_name.as_str()).collect();
    assert_eq!(names.len(), 6);
    assert!(verdicts.iter().all(|v| v.is_qualified()));
}

#[tokio::test]
async fn test_ingest_crawl_export_flow() {
    let tel = tel_server().await;
    let clean = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(helpers::CLEAN_HTML))
        .mount(&clean)
        .await;

    // 1. Ingest a CSV whose columns are inferred from the header
    let dir = tempfile::tempdir().expect("tempdir");
    let input_path = dir.path().join("companies.csv");
    let csv = format!(
        "Company Name,Website,Industry\nAcme Insurance,{},Insurance\nPlain Co,{},Retail\n",
        tel.uri(),
        clean.uri()
    );
    std::fs::write(&input_path, csv).expect("write input");
    let companies = ingest::load_companies(&input_path).expect("load companies");
    assert_eq!(companies.len(), 2);

    // 2. Crawl the batch
    let service = Arc::new(helpers::loopback_service(helpers::test_settings()));
    let pool = CrawlPool::with_service(service, 2);
    let mut verdicts = pool.run(companies).await;
    verdicts.sort_by(|a, b| a.company_name.cmp(&b.company_name));

    // 3. Summarize
    let summary = BatchSummary::from_verdicts(&verdicts);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.qualified, 1);
    assert_eq!(summary.not_qualified, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.qualification_rate, 50.0);

    // 4. Export and read back
    let output_path = dir.path().join("leads.csv");
    report::export_csv(&verdicts, &output_path).expect("export");
    let content = std::fs::read_to_string(&output_path).expect("read export");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("Acme Insurance"));
    assert!(lines[1].contains(",yes,"));
    assert!(lines[1].contains("quote completion rates"));
    assert!(lines[2].contains("Plain Co"));
    assert!(lines[2].contains(",no,"));
}
