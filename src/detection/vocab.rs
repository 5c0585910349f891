// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

/// 永远不承载自由文本的输入框类型
///
/// 词汇检测会跳过这些结构性类型，它们的属性里出现
/// "contact"之类的词不构成电话字段证据。
pub const STRUCTURAL_INPUT_TYPES: &[&str] = &[
    "hidden", "submit", "button", "checkbox", "radio", "file", "image",
];

/// 第三方表单服务商签名
///
/// `markers` 与小写化的原始HTML做子串匹配（部分信号只出现在
/// 注释或脚本里，不进入解析树）；`container_selector` 指向该服务商
/// 渲染进DOM的表单容器，为None表示字段无法在HTML侧检查。
pub struct ProviderSignature {
    /// 服务商名称
    pub name: &'static str,
    /// 标记子串，全部小写
    pub markers: &'static [&'static str],
    /// 表单容器选择器
    pub container_selector: Option<&'static str>,
}

/// 已知表单服务商签名表
pub const PROVIDER_SIGNATURES: &[ProviderSignature] = &[
    ProviderSignature {
        name: "hubspot",
        markers: &["js.hsforms.net", "hbspt.forms", "hs-form"],
        container_selector: Some("form.hs-form, .hbspt-form"),
    },
    ProviderSignature {
        name: "typeform",
        markers: &["typeform.com/to/", "data-tf-widget", "tf-v1"],
        container_selector: None,
    },
    ProviderSignature {
        name: "marketo",
        markers: &["mktoform", "marketo.com/js/forms2"],
        container_selector: Some("form.mktoForm"),
    },
    ProviderSignature {
        name: "pardot",
        markers: &["go.pardot.com", "pardot.com/l/"],
        container_selector: None,
    },
    ProviderSignature {
        name: "jotform",
        markers: &["jotform.com/jsform", "jotfor.ms"],
        container_selector: None,
    },
    ProviderSignature {
        name: "gravity_forms",
        markers: &["gform_wrapper", "gravityforms"],
        container_selector: Some(".gform_wrapper"),
    },
    ProviderSignature {
        name: "calendly",
        markers: &["calendly.com/assets/external/widget", "calendly-inline-widget"],
        container_selector: None,
    },
    ProviderSignature {
        name: "wufoo",
        markers: &["wufoo.com/forms", "wufoo.com/embed"],
        container_selector: None,
    },
    ProviderSignature {
        name: "formstack",
        markers: &["formstack.com/forms", "fsform"],
        container_selector: Some("form.fsForm"),
    },
];

/// 脚本模式
pub struct ScriptPattern {
    /// 编译后的正则
    pub regex: Regex,
    /// 证据原因中展示的标签
    pub label: &'static str,
}

/// 电话采集代码的脚本模式表
///
/// 仅在其他策略一无所获时使用，任意一条命中即产生一条泛化证据。
pub static SCRIPT_PATTERNS: Lazy<Vec<ScriptPattern>> = Lazy::new(|| {
    [
        (r#"(?i)["']phone_?number["']\s*:"#, "phoneNumber key"),
        (r"(?i)intl-?tel-?input", "intl-tel-input library"),
        (r"(?i)libphonenumber", "libphonenumber library"),
        (r#"(?i)type=\\?["']tel"#, "tel input in script"),
        (r"(?i)phone.{0,12}(required|validation|validate)", "phone validation code"),
    ]
    .into_iter()
    .map(|(pattern, label)| ScriptPattern {
        regex: Regex::new(pattern).unwrap(),
        label,
    })
    .collect()
});
