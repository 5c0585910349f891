// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{ArgGroup, Parser};
use qualrs::application::report::BatchSummary;
use qualrs::application::{ingest, pitch, report};
use qualrs::config::settings::Settings;
use qualrs::domain::models::company::CompanyRequest;
use qualrs::domain::services::crawl_service::CrawlService;
use qualrs::utils::telemetry;
use qualrs::workers::CrawlPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// 命令行参数
///
/// 两种运行模式：`--input`批量处理公司CSV，`--url`检查单个网站
#[derive(Parser, Debug)]
#[command(name = "qualrs")]
#[command(about = "Qualifies sales leads by detecting phone-capture fields on company websites")]
#[command(version)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "url"])))]
struct Cli {
    /// CSV file of companies to crawl (columns inferred from the header)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Check a single website instead of a CSV batch
    #[arg(short, long, value_name = "WEBSITE")]
    url: Option<String>,

    /// Company name to report in single-site mode (defaults to the website)
    #[arg(long, requires = "url")]
    company: Option<String>,

    /// Industry hint for pitch matching in single-site mode
    #[arg(long, requires = "url")]
    industry: Option<String>,

    /// Write results to this file; a `.json` extension exports JSON, anything else CSV
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Override the configured worker count
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Disable the browser-rendering fallback
    #[arg(long)]
    no_render: bool,
}

/// 主函数
///
/// 应用程序入口点，加载配置并按参数选择运行模式
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();
    let cli = Cli::parse();

    let mut settings = Settings::new()?;
    if let Some(workers) = cli.workers {
        settings.crawler.worker_count = workers;
    }
    if cli.no_render {
        settings.crawler.render_enabled = false;
    }
    let settings = Arc::new(settings);
    info!(
        workers = settings.crawler.worker_count,
        render_enabled = settings.crawler.render_enabled,
        "Starting qualrs"
    );

    match (cli.url, cli.input) {
        (Some(website), _) => run_single(settings, website, cli.company, cli.industry).await,
        (None, Some(input)) => run_batch(settings, &input, cli.output.as_deref()).await,
        (None, None) => anyhow::bail!("either --input or --url is required"),
    }
}

/// 单网站模式
///
/// 爬取一个网站并把判定细节打印到标准输出
async fn run_single(
    settings: Arc<Settings>,
    website: String,
    company: Option<String>,
    industry: Option<String>,
) -> anyhow::Result<()> {
    let name = company.unwrap_or_else(|| website.clone());
    let mut request = CompanyRequest::new(name, website);
    if let Some(industry) = industry {
        request = request.with_industry(industry);
    }

    let service = CrawlService::new(settings);
    let verdict = service.crawl(&request).await;

    println!("{} [{}]", verdict.company_name, verdict.website);
    println!(
        "  qualified: {}  pages: {}  strategy: {}  status: {}",
        verdict.is_qualified(),
        verdict.pages_fetched,
        verdict.strategy,
        verdict.status
    );
    if let Some(reason) = verdict.error_reason() {
        println!("  error: {}", reason);
    }
    for item in &verdict.evidence {
        println!("  - [{}/{}] {}", item.kind, item.confidence, item.reason);
    }
    if verdict.is_qualified() {
        let lines = pitch::pitch_lines(
            verdict.industry_hint.as_deref(),
            verdict.description.as_deref(),
        );
        for line in lines {
            println!("  * {}", line);
        }
    }
    Ok(())
}

/// 批量模式
///
/// 导入公司CSV，经工作池并发爬取，打印汇总并按需导出
async fn run_batch(
    settings: Arc<Settings>,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let companies = ingest::load_companies(input)?;
    info!(companies = companies.len(), "Input file loaded");

    let pool = CrawlPool::new(settings);
    let mut verdicts = pool.run(companies).await;
    verdicts.sort_by(|a, b| a.company_name.cmp(&b.company_name));

    let summary = BatchSummary::from_verdicts(&verdicts);
    println!("{}", summary.render_text());

    if let Some(path) = output {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => report::export_json(&verdicts, path)?,
            _ => report::export_csv(&verdicts, path)?,
        }
    }
    Ok(())
}
