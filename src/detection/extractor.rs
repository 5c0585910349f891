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

use crate::detection::detectors::{
    Detector, DocumentContext, KeywordAttrDetector, LabelDetector, NativeTelDetector,
    ProviderSignatureDetector, ScriptPatternDetector,
};
use crate::domain::models::evidence::{EvidenceIdentity, PhoneFieldEvidence};
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;

/// 描述截断长度（字符数）
const DESCRIPTION_MAX_CHARS: usize = 300;

/// 单页检查结果
///
/// 只含可跨线程传递的数据；解析出的文档不离开检查过程。
#[derive(Debug, Default)]
pub struct PageInspection {
    /// 本页新产出的证据（已对页内与既有证据去重）
    pub evidence: Vec<PhoneFieldEvidence>,
    /// 页面描述（仅在要求捕获且页面存在时）
    pub description: Option<String>,
}

/// 电话字段提取器
///
/// 按固定顺序运行五个检测器并汇总证据。检测顺序即证据的
/// 优先顺序：结构性信号在前，间接信号在后。提取器无状态，
/// 可在多个工作者间共享。
pub struct PhoneFieldExtractor {
    keywords: Vec<String>,
    detectors: Vec<Box<dyn Detector>>,
}

impl PhoneFieldExtractor {
    /// 创建提取器
    ///
    /// # 参数
    ///
    /// * `keywords` - 电话词汇表，已小写化的子串集合
    pub fn new(keywords: Vec<String>) -> Self {
        let detectors: Vec<Box<dyn Detector>> = vec![
            Box::new(NativeTelDetector),
            Box::new(KeywordAttrDetector),
            Box::new(LabelDetector),
            Box::new(ProviderSignatureDetector),
            Box::new(ScriptPatternDetector),
        ];
        Self { keywords, detectors }
    }

    /// 检查一个页面
    ///
    /// 同步执行：解析HTML、依次运行检测器、对证据去重。
    /// `prior` 是本次爬取此前累计的证据，用于跨页去重、
    /// 跨检测器字段抑制以及兜底检测器的触发判断。
    ///
    /// # 参数
    ///
    /// * `raw_html` - 页面原始HTML
    /// * `prior` - 此前累计的证据
    /// * `capture_description` - 是否捕获页面描述（仅首页）
    ///
    /// # 返回值
    ///
    /// 本页新证据与可选的页面描述
    pub fn inspect(
        &self,
        raw_html: &str,
        prior: &[PhoneFieldEvidence],
        capture_description: bool,
    ) -> PageInspection {
        let document = Html::parse_document(raw_html);
        let raw_html_lower = raw_html.to_lowercase();

        let mut identities: HashSet<EvidenceIdentity> =
            prior.iter().map(|e| e.identity()).collect();
        let mut seen_fields: HashSet<(String, String)> = prior
            .iter()
            .map(|e| (e.field_name.clone(), e.field_id.clone()))
            .collect();

        let mut evidence: Vec<PhoneFieldEvidence> = Vec::new();
        for detector in &self.detectors {
            let have_any = !prior.is_empty() || !evidence.is_empty();
            if have_any && !detector.runs_with_existing_evidence() {
                continue;
            }
            let ctx = DocumentContext {
                document: &document,
                raw_html,
                raw_html_lower: &raw_html_lower,
                keywords: &self.keywords,
                seen_fields: &seen_fields,
            };
            let found = detector.inspect(&ctx);
            if !found.is_empty() {
                debug!(detector = detector.name(), count = found.len(), "detector produced evidence");
            }
            for item in found {
                if !identities.insert(item.identity()) {
                    continue;
                }
                seen_fields.insert((item.field_name.clone(), item.field_id.clone()));
                evidence.push(item);
            }
        }

        let description = if capture_description {
            meta_description(&document)
        } else {
            None
        };

        PageInspection { evidence, description }
    }
}

/// 提取页面描述
///
/// 优先取 `meta[name=description]`，缺失时回退到
/// `og:description`；结果去除首尾空白并截断到300字符。
pub fn meta_description(document: &Html) -> Option<String> {
    let meta_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let og_selector = Selector::parse(r#"meta[property="og:description"]"#).unwrap();

    let from = |selector: &Selector| {
        document
            .select(selector)
            .filter_map(|el| el.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(str::to_string)
    };

    from(&meta_selector)
        .or_else(|| from(&og_selector))
        .map(|content| content.chars().take(DESCRIPTION_MAX_CHARS).collect())
}
