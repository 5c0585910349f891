// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 公司请求实体
///
/// 表示一家待判定的公司。由调用方（CSV导入等）构造，
/// 核心引擎只读，不做任何修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRequest {
    /// 公司名称，仅用于展示和日志
    pub company_name: String,
    /// 原始网站字符串，可能缺少协议、带www或大小写混杂
    pub website: String,
    /// 行业/类别提示，用于报告层的营销文案匹配（可选）
    pub industry_hint: Option<String>,
}

impl CompanyRequest {
    /// 创建新的公司请求
    pub fn new(company_name: impl Into<String>, website: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            website: website.into(),
            industry_hint: None,
        }
    }

    /// 附加行业提示
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry_hint = Some(industry.into());
        self
    }
}
