// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::verdict::FetchStrategy;
use crate::engines::traits::{EngineError, FetchEngine, PageRequest, PageResponse};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// 显形点击的行动号召短语表
///
/// 渲染策略在页面上寻找可见文本命中这些短语的可点击控件，
/// 点击后隐藏的表单（弹窗、折叠区）才会进入DOM。
const CTA_PHRASES: &[&str] = &[
    "get a quote",
    "request a quote",
    "free quote",
    "get quote",
    "contact us",
    "get started",
    "book a demo",
    "book demo",
    "request callback",
    "call me back",
    "talk to us",
    "sign up",
];

// Global browser instance to avoid re-launching Chrome on every request.
// This significantly improves performance for browser-based fetching.
static BROWSER_INSTANCE: OnceCell<Browser> = OnceCell::const_new();

// Cached result of the one-shot capability probe. Once the probe fails the
// process stays in plain-HTTP-only mode; there is no re-probing.
static RENDER_AVAILABLE: OnceCell<bool> = OnceCell::const_new();

// Asynchronously gets or initializes the shared browser instance.
// This function ensures that the browser is launched only once.
async fn get_browser() -> Result<&'static Browser, EngineError> {
    BROWSER_INSTANCE
        .get_or_try_init(|| async {
            let remote_debugging_url = std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok();

            let (browser, mut handler) = if let Some(ref url) = remote_debugging_url {
                info!("Connecting to remote Chrome instance at: {}", url);
                Browser::connect(url).await.map_err(|e| {
                    EngineError::BrowserUnavailable(format!(
                        "failed to connect to remote Chrome: {}",
                        e
                    ))
                })?
            } else {
                let builder = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(Duration::from_secs(30))
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage");

                Browser::launch(
                    builder
                        .build()
                        .map_err(EngineError::BrowserUnavailable)?,
                )
                .await
                .map_err(|e| EngineError::BrowserUnavailable(e.to_string()))?
            };

            // Spawn a handler to process browser events
            tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(browser)
        })
        .await
}

/// 渲染引擎是否可用
///
/// 进程级一次性能力探测：首次调用尝试启动（或连接）浏览器，
/// 结果缓存后不再重试。探测失败则整个进程固定为纯HTTP模式。
pub async fn render_available() -> bool {
    *RENDER_AVAILABLE
        .get_or_init(|| async {
            match get_browser().await {
                Ok(_) => true,
                Err(e) => {
                    warn!(
                        "Rendering engine unavailable, operating in plain-HTTP-only mode: {}",
                        e
                    );
                    false
                }
            }
        })
        .await
}

/// 构造显形点击脚本
///
/// 在页面内查找第一个可见且文本命中短语表的可点击控件并点击，
/// 返回被点击控件的文本；找不到则返回null。
fn build_reveal_script(phrases: &[&str]) -> String {
    let phrase_json = serde_json::to_string(phrases).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"(() => {{
    const phrases = {phrase_json};
    const nodes = document.querySelectorAll('a, button, [role="button"], input[type="submit"]');
    for (const n of nodes) {{
        const t = ((n.innerText || n.value || '') + '').trim().toLowerCase();
        if (!t) continue;
        for (const p of phrases) {{
            if (t.includes(p)) {{
                const r = n.getBoundingClientRect();
                if (r.width > 0 && r.height > 0) {{
                    n.click();
                    return t.slice(0, 80);
                }}
            }}
        }}
    }}
    return null;
}})()"#
    )
}

/// 浏览器渲染引擎
///
/// 基于chromiumoxide实现的回退抓取策略：执行页面脚本，
/// 等待DOM填充，并可点击行动号召控件让隐藏表单显形。
/// 每次获取使用一个新页面，上下文不跨爬取共享。
pub struct BrowserEngine;

impl BrowserEngine {
    /// 在既有页面上完成导航、静置与显形点击
    async fn render_page(
        page: &Page,
        request: &PageRequest,
    ) -> Result<(String, Option<String>, Option<String>), EngineError> {
        page.goto(request.url.as_str())
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))?;

        // goto waits for the load event; the settle delay lets client-side
        // scripts finish populating the DOM before the first snapshot.
        if request.settle_ms > 0 {
            tokio::time::sleep(Duration::from_millis(request.settle_ms)).await;
        }

        let mut html = page
            .content()
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))?;

        let mut pre_click_html = None;
        let mut clicked_control = None;

        // 显形点击：每次点击后重新静置并截取快照。
        // 交互失败一律吞掉，绝不升级为获取错误。
        for _ in 0..request.max_reveal_clicks {
            let script = build_reveal_script(CTA_PHRASES);
            let clicked: Option<String> = match page.evaluate(script.as_str()).await {
                Ok(result) => result.into_value::<Option<String>>().ok().flatten(),
                Err(e) => {
                    debug!("Reveal click evaluation failed: {}", e);
                    None
                }
            };

            let Some(control) = clicked else {
                break;
            };
            debug!("Clicked reveal control: {}", control);

            if request.settle_ms > 0 {
                tokio::time::sleep(Duration::from_millis(request.settle_ms)).await;
            }

            match page.content().await {
                Ok(after) => {
                    if pre_click_html.is_none() {
                        pre_click_html = Some(html.clone());
                    }
                    html = after;
                    clicked_control = Some(control);
                }
                Err(e) => {
                    debug!("Snapshot after reveal click failed: {}", e);
                    break;
                }
            }
        }

        Ok((html, pre_click_html, clicked_control))
    }
}

#[async_trait]
impl FetchEngine for BrowserEngine {
    /// 执行浏览器渲染抓取
    ///
    /// # 参数
    ///
    /// * `request` - 页面获取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(PageResponse)` - 渲染后的页面响应
    /// * `Err(EngineError)` - 会话级失败、页面级失败或超时
    async fn fetch(&self, request: &PageRequest) -> Result<PageResponse, EngineError> {
        let start = Instant::now();

        // Wrap the entire operation in a timeout
        tokio::time::timeout(request.timeout, async {
            let browser = get_browser().await?;

            // A fresh page per fetch keeps cookie/session state isolated
            // between concurrent crawls.
            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| EngineError::BrowserUnavailable(e.to_string()))?;

            let rendered = Self::render_page(&page, request).await;

            if let Err(e) = page.close().await {
                debug!("Failed to close page: {}", e);
            }

            let (html, pre_click_html, clicked_control) = rendered?;

            // CDP does not surface the HTTP status on the page handle;
            // a page that navigated and produced content is treated as 200.
            Ok(PageResponse {
                status_code: 200,
                html,
                elapsed_ms: start.elapsed().as_millis() as u64,
                pre_click_html,
                clicked_control,
            })
        })
        .await
        .map_err(|_| EngineError::Timeout)?
    }

    /// 渲染能力是否可用（每进程探测一次）
    async fn available(&self) -> bool {
        render_available().await
    }

    /// 引擎对应的抓取策略
    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::Rendering
    }

    /// 获取引擎名称
    ///
    /// # 返回值
    ///
    /// 引擎名称
    fn name(&self) -> &'static str {
        "browser"
    }
}
