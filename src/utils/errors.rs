// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 爬取错误类型
///
/// 每个公司的爬取结果中携带的错误分类，同时用于结果导出
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlErrorKind {
    /// 网址无效，规范化失败
    #[error("Invalid URL")]
    InvalidUrl,

    /// 单页请求超时
    #[error("Request timed out")]
    Timeout,

    /// 网络错误（DNS/连接/TLS）
    #[error("Network error")]
    NetworkError,

    /// 所有候选页面均无法访问
    #[error("Website unreachable")]
    Unreachable,

    /// 渲染引擎无法启动或崩溃
    #[error("Render engine failure")]
    RenderEngineFailure,
}

/// 数据导入错误类型
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No website column found in header: {0}")]
    MissingWebsiteColumn(String),

    #[error("Input file contains no usable rows")]
    EmptyInput,
}
