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
use crate::utils::errors::CrawlErrorKind;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 浏览器会话无法建立
    #[error("Browser unavailable: {0}")]
    BrowserUnavailable(String),
    /// 页面级浏览器错误
    #[error("Browser error: {0}")]
    Browser(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 判断错误是否为会话级致命错误
    ///
    /// 会话级错误意味着当前策略整体不可用，需要切换策略重来；
    /// 其余错误只影响单个页面，跳过该候选页即可。
    ///
    /// # 返回值
    ///
    /// 如果错误是会话级致命错误则返回true，否则返回false
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, EngineError::BrowserUnavailable(_))
    }

    /// 映射为领域错误分类
    pub fn crawl_kind(&self) -> CrawlErrorKind {
        match self {
            EngineError::RequestFailed(e) if e.is_timeout() => CrawlErrorKind::Timeout,
            EngineError::RequestFailed(_) => CrawlErrorKind::NetworkError,
            EngineError::Timeout => CrawlErrorKind::Timeout,
            EngineError::BrowserUnavailable(_) => CrawlErrorKind::RenderEngineFailure,
            EngineError::Browser(_) => CrawlErrorKind::NetworkError,
            EngineError::Other(_) => CrawlErrorKind::NetworkError,
        }
    }
}

/// 页面获取请求
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// 目标URL
    pub url: String,
    /// 超时时间
    pub timeout: Duration,
    /// 渲染后的静置等待（毫秒），纯HTTP策略忽略
    pub settle_ms: u64,
    /// 允许的"显形"点击次数，纯HTTP策略忽略
    pub max_reveal_clicks: u8,
}

impl PageRequest {
    /// 创建新的页面获取请求
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            settle_ms: 0,
            max_reveal_clicks: 0,
        }
    }

    /// 配置渲染参数
    pub fn with_rendering(mut self, settle_ms: u64, max_reveal_clicks: u8) -> Self {
        self.settle_ms = settle_ms;
        self.max_reveal_clicks = max_reveal_clicks;
        self
    }
}

/// 页面获取响应
#[derive(Debug)]
pub struct PageResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 页面HTML（渲染策略下为点击后的最终快照）
    pub html: String,
    /// 响应时间（毫秒）
    pub elapsed_ms: u64,
    /// 点击显形前的页面快照，仅发生过点击时存在
    pub pre_click_html: Option<String>,
    /// 被点击控件的可见文本
    pub clicked_control: Option<String>,
}

impl PageResponse {
    /// 状态码是否属于2xx
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// 页面获取引擎特质
///
/// 每种抓取策略实现一个引擎；编排器通过该特质与具体策略解耦。
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 获取单个页面
    async fn fetch(&self, request: &PageRequest) -> Result<PageResponse, EngineError>;

    /// 引擎当前是否可用
    ///
    /// 默认总是可用；渲染引擎用每进程一次的浏览器探测结果应答。
    async fn available(&self) -> bool {
        true
    }

    /// 引擎对应的抓取策略
    fn strategy(&self) -> FetchStrategy;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
