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

use crate::domain::models::verdict::FetchStrategy;
use crate::engines::traits::{EngineError, FetchEngine, PageRequest, PageResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Instant;

/// 浏览器样式的User-Agent，部分站点会拒绝默认的程序化UA
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// 纯HTTP抓取引擎
///
/// 基于reqwest实现的快速抓取策略，带浏览器样式请求头，
/// 跟随重定向，不执行页面脚本。
pub struct ReqwestEngine;

#[async_trait]
impl FetchEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// 非2xx状态不视为错误，原样返回状态码由编排器决定跳过；
    /// 只有传输层失败（DNS/连接/TLS/超时）才返回 `EngineError`。
    ///
    /// # 参数
    ///
    /// * `request` - 页面获取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(PageResponse)` - 页面响应
    /// * `Err(EngineError)` - 传输层失败
    async fn fetch(&self, request: &PageRequest) -> Result<PageResponse, EngineError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );

        // Each request gets a fresh client for cookie isolation
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(request.timeout)
            .cookie_store(true)
            .build()?;

        let start = Instant::now();
        let response = client.get(&request.url).headers(headers).send().await?;

        let status_code = response.status().as_u16();
        let html = response.text().await?;

        Ok(PageResponse {
            status_code,
            html,
            elapsed_ms: start.elapsed().as_millis() as u64,
            pre_click_html: None,
            clicked_control: None,
        })
    }

    /// 引擎对应的抓取策略
    fn strategy(&self) -> FetchStrategy {
        FetchStrategy::PlainHttp
    }

    /// 获取引擎名称
    ///
    /// # 返回值
    ///
    /// 引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
