// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 证据类型枚举
///
/// 每一项证据来自五种相互独立的检测策略之一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// 原生电话输入框（`input[type=tel]`）
    NativeTelInput,
    /// 输入框属性命中电话词汇
    KeywordMatch,
    /// 标签文本命中并关联到输入框
    LabelMatch,
    /// 已知第三方表单服务商的嵌入签名
    ProviderSignature,
    /// 脚本代码中的电话采集模式
    ScriptPattern,
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvidenceKind::NativeTelInput => write!(f, "native_tel_input"),
            EvidenceKind::KeywordMatch => write!(f, "keyword_match"),
            EvidenceKind::LabelMatch => write!(f, "label_match"),
            EvidenceKind::ProviderSignature => write!(f, "provider_signature"),
            EvidenceKind::ScriptPattern => write!(f, "script_pattern"),
        }
    }
}

/// 证据置信度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// 高置信度，结构性信号
    High,
    /// 中置信度，词汇性信号
    Medium,
    /// 低置信度，间接信号
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// 电话字段证据
///
/// 一条表明页面存在电话采集字段的离散信号。
/// 去重身份为 (kind, field_name, field_id) 三元组。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneFieldEvidence {
    /// 证据类型
    pub kind: EvidenceKind,
    /// 命中字段的name属性，无法定位字段时为空串
    pub field_name: String,
    /// 命中字段的id属性，无法定位字段时为空串
    pub field_id: String,
    /// 人类可读的检测原因
    pub reason: String,
    /// 置信度
    pub confidence: Confidence,
}

/// 证据去重键
pub type EvidenceIdentity = (EvidenceKind, String, String);

impl PhoneFieldEvidence {
    /// 创建新的证据项
    pub fn new(
        kind: EvidenceKind,
        field_name: impl Into<String>,
        field_id: impl Into<String>,
        reason: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            kind,
            field_name: field_name.into(),
            field_id: field_id.into(),
            reason: reason.into(),
            confidence,
        }
    }

    /// 去重身份
    ///
    /// # 返回值
    ///
    /// (证据类型, 字段name, 字段id) 三元组
    pub fn identity(&self) -> EvidenceIdentity {
        (self.kind, self.field_name.clone(), self.field_id.clone())
    }
}
