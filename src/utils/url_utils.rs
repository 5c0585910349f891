// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::CrawlErrorKind;
use url::Url;

/// 将用户填写的网站字符串规范化为带协议的绝对URL
///
/// 规则：去除首尾空白，整体小写，去掉开头的 `http://`/`https://` 和 `www.`，
/// 去掉末尾的斜杠，统一加上 `https://` 前缀，最后整体解析一次确认
/// 结果是合法URL。该函数是幂等的。
///
/// # 参数
///
/// * `raw` - 原始网站字符串，可能为空、带协议或大小写混杂
///
/// # 返回值
///
/// * `Ok(String)` - 规范化后的绝对URL
/// * `Err(CrawlErrorKind::InvalidUrl)` - 去除装饰后内容为空或无法解析
pub fn normalize_website(raw: &str) -> Result<String, CrawlErrorKind> {
    let mut rest = raw.trim().to_lowercase();

    if let Some(stripped) = rest
        .strip_prefix("https://")
        .or_else(|| rest.strip_prefix("http://"))
    {
        rest = stripped.to_string();
    }
    if let Some(stripped) = rest.strip_prefix("www.") {
        rest = stripped.to_string();
    }
    let rest = rest.trim_end_matches('/');

    if rest.is_empty() {
        return Err(CrawlErrorKind::InvalidUrl);
    }

    // Url::parse normalizes (adds a trailing slash to bare domains), so
    // it is used for validation only and the assembled string is returned.
    let candidate = format!("https://{}", rest);
    Url::parse(&candidate).map_err(|_| CrawlErrorKind::InvalidUrl)?;
    Ok(candidate)
}

/// 拼接候选页面URL
///
/// 规范化后的基础URL不带末尾斜杠，路径段以 `/` 开头；空路径表示主页本身。
pub fn candidate_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}{}", base, path)
    }
}
