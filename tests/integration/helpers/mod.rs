// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use qualrs::config::settings::{CrawlerSettings, DetectionSettings, Settings};
use qualrs::domain::models::verdict::FetchStrategy;
use qualrs::domain::services::crawl_service::CrawlService;
use qualrs::engines::reqwest_engine::ReqwestEngine;
use qualrs::engines::traits::{EngineError, FetchEngine, PageRequest, PageResponse};
use std::sync::Arc;

/// 回环测试引擎
///
/// 规范化总是给网站加上https前缀，而本地模拟服务器只讲明文HTTP；
/// 该引擎把协议改写回http后交给真实的reqwest引擎执行。
pub struct LoopbackHttpEngine {
    inner: ReqwestEngine,
}

impl LoopbackHttpEngine {
    pub fn new() -> Self {
        Self {
            inner: ReqwestEngine,
        }
    }
}

#[async_trait]
impl FetchEngine for LoopbackHttpEngine {
    async fn fetch(&self, request: &PageRequest) -> Result<PageResponse, EngineError> {
        let mut rewritten = request.clone();
        rewritten.url = request.url.replacen("https://", "http://", 1);
        self.inner.fetch(&rewritten).await
    }

    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::PlainHttp
    }

    fn name(&self) -> &'static str {
        "loopback-http"
    }
}

/// 集成测试配置：两个候选子页面，禁用渲染回退与页面间延迟
pub fn test_settings() -> Arc<Settings> {
    Arc::new(Settings {
        crawler: CrawlerSettings {
            worker_count: 4,
            homepage_timeout_secs: 5,
            subpage_timeout_secs: 3,
            inter_page_delay_ms: 0,
            render_enabled: false,
            render_settle_ms: 0,
            max_reveal_clicks: 0,
            candidate_paths: vec!["/contact".to_string(), "/quote".to_string()],
        },
        detection: DetectionSettings {
            keywords: vec![
                "phone".to_string(),
                "mobile".to_string(),
                "cell".to_string(),
                "tel".to_string(),
                "telephone".to_string(),
                "callback".to_string(),
            ],
            early_stop_threshold: 2,
            native_tel_stops: true,
        },
    })
}

/// 以回环引擎装配爬取服务
pub fn loopback_service(settings: Arc<Settings>) -> CrawlService {
    CrawlService::with_engines(settings, Arc::new(LoopbackHttpEngine::new()), None)
}

pub const CLEAN_HTML: &str = r#"<html><head>
<meta name="description" content="Plain marketing copy for a plain company">
</head><body>
<form><input type="text" name="email" placeholder="Work email"></form>
</body></html>"#;

pub const TEL_HTML: &str = r#"<html><body>
<form><input type="tel" name="phone" id="phone"></form>
</body></html>"#;

pub const LABEL_HTML: &str = r#"<html><body>
<form>
  <label for="cb">Best callback number</label>
  <input type="text" id="cb" name="cb_number">
</form>
</body></html>"#;

pub const TWO_FIELDS_HTML: &str = r#"<html><body>
<form>
  <input type="text" name="phone" id="main-phone">
  <input type="text" name="mobile_2" id="secondary">
</form>
</body></html>"#;

pub const PROVIDER_HTML: &str = r#"<html><body>
<script src="https://js.hsforms.net/forms/v2.js"></script>
<div>Talk to our team</div>
</body></html>"#;
