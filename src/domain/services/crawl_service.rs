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

use crate::config::settings::Settings;
use crate::detection::extractor::{PageInspection, PhoneFieldExtractor};
use crate::domain::models::company::CompanyRequest;
use crate::domain::models::evidence::{EvidenceIdentity, EvidenceKind, PhoneFieldEvidence};
use crate::domain::models::page::PageFetchResult;
use crate::domain::models::verdict::{CrawlVerdict, FetchStrategy};
use crate::engines::browser_engine::BrowserEngine;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{FetchEngine, PageRequest};
use crate::utils::errors::CrawlErrorKind;
use crate::utils::url_utils::{candidate_url, normalize_website};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// 单次策略遍历的汇总
///
/// `evidence` 只含本次遍历新增的证据；会话级失败时
/// `session_failed` 置位，已产出的数据仍然有效。
struct PassOutcome {
    evidence: Vec<PhoneFieldEvidence>,
    pages_fetched: usize,
    description: Option<String>,
    failures: Vec<CrawlErrorKind>,
    session_failed: bool,
}

/// 爬取判定服务
///
/// 单个公司的完整爬取流程：规范化网址、按候选页面顺序抓取、
/// 提取电话字段证据并组装判定。第一遍始终使用纯HTTP策略；
/// 一无所获且渲染可用时，以渲染策略（含显形点击）重爬一遍。
/// 渲染会话建立失败时回退到已完成的纯HTTP结果。
pub struct CrawlService {
    settings: Arc<Settings>,
    extractor: PhoneFieldExtractor,
    plain_engine: Arc<dyn FetchEngine>,
    render_engine: Option<Arc<dyn FetchEngine>>,
}

impl CrawlService {
    /// 创建爬取判定服务
    ///
    /// # 参数
    ///
    /// * `settings` - 应用配置；渲染策略按 `crawler.render_enabled` 装配
    pub fn new(settings: Arc<Settings>) -> Self {
        let render_engine: Option<Arc<dyn FetchEngine>> = if settings.crawler.render_enabled {
            Some(Arc::new(BrowserEngine))
        } else {
            None
        };
        Self {
            extractor: PhoneFieldExtractor::new(settings.detection.keywords.clone()),
            plain_engine: Arc::new(ReqwestEngine),
            render_engine,
            settings,
        }
    }

    /// 以指定引擎创建服务
    ///
    /// 引擎通过特质对象注入，测试时可脚本化。
    pub fn with_engines(
        settings: Arc<Settings>,
        plain_engine: Arc<dyn FetchEngine>,
        render_engine: Option<Arc<dyn FetchEngine>>,
    ) -> Self {
        Self {
            extractor: PhoneFieldExtractor::new(settings.detection.keywords.clone()),
            plain_engine,
            render_engine,
            settings,
        }
    }

    /// 爬取一家公司并给出判定
    ///
    /// 本方法不返回错误：任何失败都折叠进判定的状态与错误分类，
    /// 单个公司的失败不得影响批次中的其他公司。
    ///
    /// # 参数
    ///
    /// * `request` - 公司爬取请求
    ///
    /// # 返回值
    ///
    /// 结构化的爬取判定
    #[instrument(skip(self, request), fields(company = %request.company_name, website = %request.website))]
    pub async fn crawl(&self, request: &CompanyRequest) -> CrawlVerdict {
        info!("Crawling company website");

        let base = match normalize_website(&request.website) {
            Ok(url) => url,
            Err(kind) => {
                warn!("Rejected website input: {}", kind);
                return CrawlVerdict::failed(
                    &request.company_name,
                    &request.website,
                    FetchStrategy::PlainHttp,
                    kind,
                )
                .with_industry_hint(request.industry_hint.clone());
            }
        };

        let plain = self.run_pass(&base, &self.plain_engine, Vec::new()).await;
        let mut evidence = plain.evidence;
        let mut pages_fetched = plain.pages_fetched;
        let mut description = plain.description;
        let mut failures = plain.failures;
        let mut strategy = FetchStrategy::PlainHttp;

        if evidence.is_empty() {
            if let Some(render_engine) = &self.render_engine {
                if render_engine.available().await {
                    info!("No evidence over plain HTTP, escalating to rendering");
                    let rendered = self.run_pass(&base, render_engine, evidence.clone()).await;
                    if rendered.session_failed && rendered.pages_fetched == 0 {
                        // Browser died before producing anything; the
                        // completed plain pass stands as the result.
                        warn!("Render pass unusable, keeping plain-HTTP result");
                    } else {
                        evidence.extend(rendered.evidence);
                        pages_fetched += rendered.pages_fetched;
                        if description.is_none() {
                            description = rendered.description;
                        }
                        failures.extend(rendered.failures);
                        if rendered.pages_fetched > 0 {
                            strategy = FetchStrategy::Rendering;
                        }
                    }
                }
            }
        }

        if pages_fetched == 0 {
            let kind = Self::classify_total_failure(&failures);
            warn!("No candidate page reachable: {}", kind);
            return CrawlVerdict::failed(&request.company_name, base, strategy, kind)
                .with_industry_hint(request.industry_hint.clone());
        }

        let verdict = CrawlVerdict::completed(
            &request.company_name,
            base,
            evidence,
            pages_fetched,
            strategy,
            description,
        )
        .with_industry_hint(request.industry_hint.clone());
        info!(
            qualified = verdict.is_qualified(),
            evidence_count = verdict.evidence.len(),
            pages_fetched = verdict.pages_fetched,
            strategy = %verdict.strategy,
            "Crawl finished"
        );
        verdict
    }

    /// 以单一策略遍历候选页面
    ///
    /// 主页最先访问并使用主页超时；随后按配置顺序访问候选路径，
    /// 相邻请求之间加入带抖动的礼貌延迟。页面级失败跳过该候选页，
    /// 会话级失败中止整个遍历。
    async fn run_pass(
        &self,
        base: &str,
        engine: &Arc<dyn FetchEngine>,
        prior: Vec<PhoneFieldEvidence>,
    ) -> PassOutcome {
        let crawler = &self.settings.crawler;
        let prior_len = prior.len();
        let mut known = prior;
        let mut pages_fetched = 0usize;
        let mut description: Option<String> = None;
        let mut failures: Vec<CrawlErrorKind> = Vec::new();
        let mut session_failed = false;

        let mut candidates = vec![base.to_string()];
        candidates.extend(
            crawler
                .candidate_paths
                .iter()
                .map(|path| candidate_url(base, path)),
        );

        for (index, url) in candidates.iter().enumerate() {
            if index > 0 && crawler.inter_page_delay_ms > 0 {
                let delay_ms = crawler.inter_page_delay_ms
                    + rand::random_range(0..=crawler.inter_page_delay_ms / 2);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }

            let timeout = if index == 0 {
                crawler.homepage_timeout()
            } else {
                crawler.subpage_timeout()
            };
            let mut page_request = PageRequest::new(url.clone(), timeout);
            if engine.strategy() == FetchStrategy::Rendering {
                page_request =
                    page_request.with_rendering(crawler.render_settle_ms, crawler.max_reveal_clicks);
            }

            let page = match engine.fetch(&page_request).await {
                Ok(response) if response.is_success_status() => {
                    let mut page = PageFetchResult::success(
                        url.clone(),
                        response.html,
                        response.status_code,
                        engine.strategy(),
                    );
                    page.pre_click_html = response.pre_click_html;
                    page.clicked_control = response.clicked_control;
                    page
                }
                Ok(response) => {
                    debug!(url = %url, status = response.status_code, "Candidate page returned non-success status");
                    failures.push(CrawlErrorKind::Unreachable);
                    continue;
                }
                Err(e) => {
                    failures.push(e.crawl_kind());
                    if e.is_session_fatal() {
                        warn!(engine = engine.name(), "Session-level engine failure: {}", e);
                        session_failed = true;
                        break;
                    }
                    debug!(url = %url, "Candidate page fetch failed: {}", e);
                    continue;
                }
            };

            pages_fetched += 1;
            let capture_description = index == 0;
            let inspection = self.inspect_page(&page, &known, capture_description);
            if description.is_none() {
                description = inspection.description;
            }
            known.extend(inspection.evidence);

            if self.reached_early_stop(&known) {
                debug!(url = %url, evidence_count = known.len(), "Early stop, skipping remaining candidates");
                break;
            }
        }

        PassOutcome {
            evidence: known.split_off(prior_len),
            pages_fetched,
            description,
            failures,
            session_failed,
        }
    }

    /// 检查单个页面并标注点击显形的证据
    ///
    /// 页面发生过显形点击时，对点击前快照再跑一次检测；
    /// 只在点击后出现的证据会在原因中注明触发控件。
    fn inspect_page(
        &self,
        page: &PageFetchResult,
        prior: &[PhoneFieldEvidence],
        capture_description: bool,
    ) -> PageInspection {
        let Some(html) = page.html.as_deref() else {
            return PageInspection::default();
        };
        let mut inspection = self.extractor.inspect(html, prior, capture_description);

        if let (Some(pre), Some(control)) =
            (page.pre_click_html.as_deref(), page.clicked_control.as_deref())
        {
            let pre_identities: HashSet<EvidenceIdentity> = self
                .extractor
                .inspect(pre, prior, false)
                .evidence
                .into_iter()
                .map(|e| e.identity())
                .collect();
            for item in &mut inspection.evidence {
                if !pre_identities.contains(&item.identity()) {
                    item.reason =
                        format!("{} (revealed after clicking \"{}\")", item.reason, control);
                }
            }
        }

        inspection
    }

    /// 是否达到提前停止条件
    fn reached_early_stop(&self, evidence: &[PhoneFieldEvidence]) -> bool {
        let detection = &self.settings.detection;
        if detection.native_tel_stops
            && evidence.iter().any(|e| e.kind == EvidenceKind::NativeTelInput)
        {
            return true;
        }
        !evidence.is_empty() && evidence.len() >= detection.early_stop_threshold
    }

    /// 汇总零页可达时的错误分类
    ///
    /// 所有候选页以同一种方式失败时报告该种类（如全部超时），
    /// 混合失败归为不可达。
    fn classify_total_failure(failures: &[CrawlErrorKind]) -> CrawlErrorKind {
        match failures.first() {
            Some(first) if failures.iter().all(|kind| kind == first) => *first,
            _ => CrawlErrorKind::Unreachable,
        }
    }
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
