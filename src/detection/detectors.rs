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

use crate::detection::vocab::{PROVIDER_SIGNATURES, SCRIPT_PATTERNS, STRUCTURAL_INPUT_TYPES};
use crate::domain::models::evidence::{Confidence, EvidenceKind, PhoneFieldEvidence};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// 检测上下文
///
/// 一个页面的只读视图，五个检测器共享。`raw_html_lower` 预先
/// 小写化一次，供签名与模式扫描使用；`seen_fields` 是此前检测器
/// 已经取证的 (name, id) 字段集合。
pub struct DocumentContext<'a> {
    /// 解析后的文档
    pub document: &'a Html,
    /// 原始HTML
    pub raw_html: &'a str,
    /// 小写化的原始HTML
    pub raw_html_lower: &'a str,
    /// 电话词汇表
    pub keywords: &'a [String],
    /// 已取证字段的 (name, id) 集合
    pub seen_fields: &'a HashSet<(String, String)>,
}

/// 检测器特质
///
/// 每种检测策略实现一个检测器，检查文档并产出证据列表。
/// 新增检测器不影响既有检测器的行为。
pub trait Detector: Send + Sync {
    /// 检测器名称
    fn name(&self) -> &'static str;

    /// 已有证据时是否仍然运行
    ///
    /// 绝大多数检测器总是运行；脚本模式检测是兜底手段，
    /// 只在前面的策略一无所获时运行。
    fn runs_with_existing_evidence(&self) -> bool {
        true
    }

    /// 检查文档并产出证据
    fn inspect(&self, ctx: &DocumentContext) -> Vec<PhoneFieldEvidence>;
}

/// 输入框的 (name, id) 标识
fn input_identity(el: &ElementRef) -> (String, String) {
    (
        el.value().attr("name").unwrap_or("").to_string(),
        el.value().attr("id").unwrap_or("").to_string(),
    )
}

/// 输入框type属性，缺省视为text
fn input_type(el: &ElementRef) -> String {
    el.value().attr("type").unwrap_or("text").to_lowercase()
}

/// 拼接输入框的可检属性文本
///
/// 按name、id、placeholder、aria-label、class、data-*的顺序
/// 拼接并小写化，供词汇匹配使用。
fn attr_haystack(el: &ElementRef) -> String {
    let mut haystack = String::new();
    for attr in ["name", "id", "placeholder", "aria-label"] {
        if let Some(value) = el.value().attr(attr) {
            haystack.push_str(value);
            haystack.push(' ');
        }
    }
    for class in el.value().classes() {
        haystack.push_str(class);
        haystack.push(' ');
    }
    for (name, value) in el.value().attrs() {
        if name.starts_with("data-") {
            haystack.push_str(value);
            haystack.push(' ');
        }
    }
    haystack.to_lowercase()
}

/// 输入框是否呈现电话特征（原生tel或属性命中词汇）
fn input_matches_phone(el: &ElementRef, keywords: &[String]) -> Option<String> {
    if input_type(el) == "tel" {
        return Some("tel".to_string());
    }
    let haystack = attr_haystack(el);
    keywords
        .iter()
        .find(|kw| haystack.contains(kw.as_str()))
        .cloned()
}

/// 原生电话输入框检测器
///
/// `input[type=tel]` 是最强的结构性信号，直接产出高置信度证据。
pub struct NativeTelDetector;

impl Detector for NativeTelDetector {
    fn name(&self) -> &'static str {
        "native_tel"
    }

    fn inspect(&self, ctx: &DocumentContext) -> Vec<PhoneFieldEvidence> {
        let input_selector = Selector::parse("input").unwrap();
        let mut evidence = Vec::new();
        for el in ctx.document.select(&input_selector) {
            let is_tel = el
                .value()
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("tel"));
            if !is_tel {
                continue;
            }
            let (name, id) = input_identity(&el);
            evidence.push(PhoneFieldEvidence::new(
                EvidenceKind::NativeTelInput,
                name,
                id,
                "input[type=tel] present",
                Confidence::High,
            ));
        }
        evidence
    }
}

/// 属性词汇检测器
///
/// 对每个可承载自由文本的输入框，拼接其属性文本并测试
/// 电话词汇的包含关系；第一个命中的词生效，该输入框即停止扫描。
pub struct KeywordAttrDetector;

impl Detector for KeywordAttrDetector {
    fn name(&self) -> &'static str {
        "keyword_attr"
    }

    fn inspect(&self, ctx: &DocumentContext) -> Vec<PhoneFieldEvidence> {
        let input_selector = Selector::parse("input").unwrap();
        let mut evidence = Vec::new();
        for el in ctx.document.select(&input_selector) {
            let ty = input_type(&el);
            // tel inputs belong to the native detector
            if ty == "tel" || STRUCTURAL_INPUT_TYPES.contains(&ty.as_str()) {
                continue;
            }
            let haystack = attr_haystack(&el);
            if let Some(keyword) = ctx.keywords.iter().find(|kw| haystack.contains(kw.as_str())) {
                let (name, id) = input_identity(&el);
                evidence.push(PhoneFieldEvidence::new(
                    EvidenceKind::KeywordMatch,
                    name,
                    id,
                    format!("attribute text contains \"{}\"", keyword),
                    Confidence::Medium,
                ));
            }
        }
        evidence
    }
}

/// 标签关联检测器
///
/// 标签文本命中词汇时，通过 `for`/id 关联或嵌套关系找到
/// 对应的输入框；此前已取证的字段不再重复产出。
pub struct LabelDetector;

impl LabelDetector {
    /// 解析标签对应的输入框
    fn resolve_target<'a>(ctx: &'a DocumentContext, label: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        let input_selector = Selector::parse("input").unwrap();
        if let Some(target_id) = label.value().attr("for") {
            return ctx
                .document
                .select(&input_selector)
                .find(|el| el.value().attr("id") == Some(target_id));
        }
        label.select(&input_selector).next()
    }
}

impl Detector for LabelDetector {
    fn name(&self) -> &'static str {
        "label_assoc"
    }

    fn inspect(&self, ctx: &DocumentContext) -> Vec<PhoneFieldEvidence> {
        let label_selector = Selector::parse("label").unwrap();
        let mut evidence = Vec::new();
        for label in ctx.document.select(&label_selector) {
            let text = label.text().collect::<String>();
            let text_lower = text.to_lowercase();
            if !ctx.keywords.iter().any(|kw| text_lower.contains(kw.as_str())) {
                continue;
            }
            let Some(target) = Self::resolve_target(ctx, &label) else {
                continue;
            };
            let (name, id) = input_identity(&target);
            if ctx.seen_fields.contains(&(name.clone(), id.clone())) {
                continue;
            }
            let label_text: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
            let label_text: String = label_text.chars().take(60).collect();
            evidence.push(PhoneFieldEvidence::new(
                EvidenceKind::LabelMatch,
                name,
                id,
                format!("label \"{}\" references field", label_text),
                Confidence::Medium,
            ));
        }
        evidence
    }
}

/// 表单服务商签名检测器
///
/// 在原始HTML中扫描已知第三方表单服务商的标记子串。标记命中后：
/// 若服务商的表单字段渲染进了DOM，只有其中存在电话特征字段才产出证据；
/// 若字段无法检查（脚本异步注入），产出一条"该服务商通常采集电话"的
/// 低置信度证据。每个服务商至多一条。
pub struct ProviderSignatureDetector;

impl Detector for ProviderSignatureDetector {
    fn name(&self) -> &'static str {
        "provider_signature"
    }

    fn inspect(&self, ctx: &DocumentContext) -> Vec<PhoneFieldEvidence> {
        let mut evidence = Vec::new();
        for sig in PROVIDER_SIGNATURES {
            let Some(marker) = sig
                .markers
                .iter()
                .find(|m| ctx.raw_html_lower.contains(**m))
            else {
                continue;
            };

            let inspectable_phone_match = sig.container_selector.and_then(|selector_str| {
                let container_selector = Selector::parse(selector_str).unwrap();
                let input_selector = Selector::parse("input").unwrap();
                let mut containers = ctx.document.select(&container_selector).peekable();
                containers.peek()?;
                let matched = containers.any(|container| {
                    container
                        .select(&input_selector)
                        .any(|input| input_matches_phone(&input, ctx.keywords).is_some())
                });
                Some(matched)
            });

            match inspectable_phone_match {
                // Fields are in the DOM and one of them looks like a phone field
                Some(true) => evidence.push(PhoneFieldEvidence::new(
                    EvidenceKind::ProviderSignature,
                    sig.name,
                    "",
                    format!("{} form with phone-like field (marker \"{}\")", sig.name, marker),
                    Confidence::Low,
                )),
                // Fields are in the DOM but none of them is phone-like
                Some(false) => {}
                // Marker present but the form is injected client-side
                None => evidence.push(PhoneFieldEvidence::new(
                    EvidenceKind::ProviderSignature,
                    sig.name,
                    "",
                    format!(
                        "{} embed detected (marker \"{}\"), provider forms commonly request phone",
                        sig.name, marker
                    ),
                    Confidence::Low,
                )),
            }
        }
        evidence
    }
}

/// 脚本模式检测器
///
/// 兜底策略：对原始HTML跑固定的正则表，第一条命中即产出
/// 一条泛化的代码模式证据。仅在其他检测器一无所获时运行。
pub struct ScriptPatternDetector;

impl Detector for ScriptPatternDetector {
    fn name(&self) -> &'static str {
        "script_pattern"
    }

    fn runs_with_existing_evidence(&self) -> bool {
        false
    }

    fn inspect(&self, ctx: &DocumentContext) -> Vec<PhoneFieldEvidence> {
        for pattern in SCRIPT_PATTERNS.iter() {
            if pattern.regex.is_match(ctx.raw_html) {
                return vec![PhoneFieldEvidence::new(
                    EvidenceKind::ScriptPattern,
                    "",
                    "",
                    format!("code pattern: {}", pattern.label),
                    Confidence::Low,
                )];
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
#[path = "detectors_test.rs"]
mod tests;
