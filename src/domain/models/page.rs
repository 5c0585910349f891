// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::verdict::FetchStrategy;
use crate::utils::errors::CrawlErrorKind;

/// 单个候选页面的获取结果
///
/// 每次获取尝试创建一个实例，证据提取后即丢弃；
/// 只有主页的meta描述会被保留到最终判定中。
#[derive(Debug)]
pub struct PageFetchResult {
    /// 请求的URL
    pub url: String,
    /// 页面HTML，失败时为None
    pub html: Option<String>,
    /// HTTP状态码，传输层失败时为None
    pub status: Option<u16>,
    /// 本次获取使用的策略
    pub strategy: FetchStrategy,
    /// 失败时的错误分类
    pub error: Option<CrawlErrorKind>,
    /// 点击显形前的页面HTML（仅渲染策略且发生过点击时存在）
    pub pre_click_html: Option<String>,
    /// 被点击控件的可见文本
    pub clicked_control: Option<String>,
}

impl PageFetchResult {
    /// 成功的获取结果
    pub fn success(url: impl Into<String>, html: String, status: u16, strategy: FetchStrategy) -> Self {
        Self {
            url: url.into(),
            html: Some(html),
            status: Some(status),
            strategy,
            error: None,
            pre_click_html: None,
            clicked_control: None,
        }
    }

    /// 失败的获取结果
    pub fn failure(
        url: impl Into<String>,
        status: Option<u16>,
        strategy: FetchStrategy,
        error: CrawlErrorKind,
    ) -> Self {
        Self {
            url: url.into(),
            html: None,
            status,
            strategy,
            error: Some(error),
            pre_click_html: None,
            clicked_control: None,
        }
    }

    /// 本页是否成功获取到HTML
    pub fn is_success(&self) -> bool {
        self.html.is_some()
    }
}
