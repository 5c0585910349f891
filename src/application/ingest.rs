// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::company::CompanyRequest;
use crate::utils::errors::IngestError;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// 公司名称列的可辨识表头
const COMPANY_COLUMNS: &[&str] = &[
    "company_name",
    "company",
    "company name",
    "name",
    "organization name",
    "account name",
];

/// 网站列的可辨识表头
const WEBSITE_COLUMNS: &[&str] = &["website", "company website", "url", "domain", "website url"];

/// 行业列的可辨识表头
const INDUSTRY_COLUMNS: &[&str] = &["industry", "category", "type", "sector"];

/// 从CSV文件加载公司列表
///
/// # 参数
///
/// * `path` - CSV文件路径
///
/// # 返回值
///
/// * `Ok(Vec<CompanyRequest>)` - 解析出的公司列表
/// * `Err(IngestError)` - 读取或解析失败
pub fn load_companies(path: &Path) -> Result<Vec<CompanyRequest>, IngestError> {
    let content = std::fs::read_to_string(path)?;
    parse_companies(&content)
}

/// 解析CSV文本为公司列表
///
/// 表头按同义词表匹配，大小写不敏感，兼容常见的
/// Apollo/LinkedIn导出格式。网站列必须存在；公司名列缺失时
/// 以网站字符串充当名称。没有网站值的行跳过并告警，
/// 网站重复的行只保留第一条。
pub fn parse_companies(content: &str) -> Result<Vec<CompanyRequest>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let website_idx = find_column(&headers, WEBSITE_COLUMNS).ok_or_else(|| {
        IngestError::MissingWebsiteColumn(headers.iter().collect::<Vec<_>>().join(", "))
    })?;
    let company_idx = find_column(&headers, COMPANY_COLUMNS);
    let industry_idx = find_column(&headers, INDUSTRY_COLUMNS);

    let mut seen_websites: HashSet<String> = HashSet::new();
    let mut companies = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let website = record.get(website_idx).map(str::trim).unwrap_or("");
        if website.is_empty() {
            // Row numbers are 1-based and the header occupies the first row.
            warn!(row = index + 2, "Skipping row without website value");
            continue;
        }
        if !seen_websites.insert(website.to_lowercase()) {
            debug!(row = index + 2, website, "Skipping duplicate website row");
            continue;
        }
        let company_name = company_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(website);

        let mut request = CompanyRequest::new(company_name, website);
        if let Some(industry) = industry_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            request = request.with_industry(industry);
        }
        companies.push(request);
    }

    if companies.is_empty() {
        return Err(IngestError::EmptyInput);
    }
    debug!(count = companies.len(), "Parsed company list");
    Ok(companies)
}

/// 在表头中定位同义词列
fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let normalized = header.trim().to_lowercase();
        names.contains(&normalized.as_str())
    })
}
