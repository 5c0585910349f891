// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::evidence::PhoneFieldEvidence;
use crate::utils::errors::CrawlErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 抓取策略枚举
///
/// 页面获取机制：纯HTTP请求或浏览器渲染。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// 纯HTTP策略，快速且资源占用低
    PlainHttp,
    /// 浏览器渲染策略，可执行页面脚本与交互
    Rendering,
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchStrategy::PlainHttp => write!(f, "plain_http"),
            FetchStrategy::Rendering => write!(f, "rendering"),
        }
    }
}

/// 判定状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    /// 爬取完成，证据列表即最终结论
    Completed,
    /// 爬取失败（网址无效或所有候选页面不可达）
    Failed,
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VerdictStatus::Completed => write!(f, "completed"),
            VerdictStatus::Failed => write!(f, "failed"),
        }
    }
}

/// 爬取判定实体
///
/// 一家公司的最终结构化结果，组装后不再修改。
///
/// 不变量：证据列表中不存在去重身份相同的两项；
/// `has_phone_field` 为真当且仅当证据列表非空。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlVerdict {
    /// 公司名称，回显自请求
    pub company_name: String,
    /// 判定所用的网站URL；规范化失败时回显原始输入
    pub website: String,
    /// 是否存在电话采集字段
    pub has_phone_field: bool,
    /// 去重后的证据列表
    pub evidence: Vec<PhoneFieldEvidence>,
    /// 成功获取的页面数量
    pub pages_fetched: usize,
    /// 最终使用的抓取策略
    pub strategy: FetchStrategy,
    /// 判定状态
    pub status: VerdictStatus,
    /// 失败时的错误分类
    pub error: Option<CrawlErrorKind>,
    /// 主页meta描述，截断至300字符
    pub description: Option<String>,
    /// 行业提示，回显自请求，供报告层匹配文案
    pub industry_hint: Option<String>,
}

impl CrawlVerdict {
    /// 组装一次完成的判定
    ///
    /// `has_phone_field` 由证据列表推导，调用方无法构造违反不变量的实例。
    pub fn completed(
        company_name: impl Into<String>,
        website: impl Into<String>,
        evidence: Vec<PhoneFieldEvidence>,
        pages_fetched: usize,
        strategy: FetchStrategy,
        description: Option<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            website: website.into(),
            has_phone_field: !evidence.is_empty(),
            evidence,
            pages_fetched,
            strategy,
            status: VerdictStatus::Completed,
            error: None,
            description,
            industry_hint: None,
        }
    }

    /// 组装一次失败的判定
    pub fn failed(
        company_name: impl Into<String>,
        website: impl Into<String>,
        strategy: FetchStrategy,
        error: CrawlErrorKind,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            website: website.into(),
            has_phone_field: false,
            evidence: Vec::new(),
            pages_fetched: 0,
            strategy,
            status: VerdictStatus::Failed,
            error: Some(error),
            description: None,
            industry_hint: None,
        }
    }

    /// 附加行业提示
    pub fn with_industry_hint(mut self, industry_hint: Option<String>) -> Self {
        self.industry_hint = industry_hint;
        self
    }

    /// 是否为合格线索（爬取完成且存在电话字段）
    pub fn is_qualified(&self) -> bool {
        self.status == VerdictStatus::Completed && self.has_phone_field
    }

    /// 失败原因的简短描述
    pub fn error_reason(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}
