// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::pitch;
use crate::domain::models::verdict::{CrawlVerdict, VerdictStatus};
use anyhow::Result;
use chrono::Utc;
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// 批次结果汇总
///
/// 一次批量爬取的统计指标，随导出文件一并生成。
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// 处理的公司总数
    pub total: usize,
    /// 合格线索数（爬取完成且存在电话字段）
    pub qualified: usize,
    /// 不合格数（爬取完成但无电话字段）
    pub not_qualified: usize,
    /// 爬取失败数
    pub failed: usize,
    /// 合格率（百分比，保留一位小数）
    pub qualification_rate: f64,
    /// 汇总生成时间（RFC3339）
    pub generated_at: String,
}

impl BatchSummary {
    /// 从判定列表汇总
    pub fn from_verdicts(verdicts: &[CrawlVerdict]) -> Self {
        let total = verdicts.len();
        let qualified = verdicts.iter().filter(|v| v.is_qualified()).count();
        let failed = verdicts
            .iter()
            .filter(|v| v.status == VerdictStatus::Failed)
            .count();
        let not_qualified = total - qualified - failed;
        let qualification_rate = if total > 0 {
            (qualified as f64 / total as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };
        Self {
            total,
            qualified,
            not_qualified,
            failed,
            qualification_rate,
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    /// 渲染为终端可读的文本块
    pub fn render_text(&self) -> String {
        format!(
            "Total companies:    {}\nQualified:          {}\nNot qualified:      {}\nFailed:             {}\nQualification rate: {:.1}%",
            self.total, self.qualified, self.not_qualified, self.failed, self.qualification_rate
        )
    }
}

/// 导出判定列表为CSV
///
/// 每家公司一行；证据列拼为可读文本，推介文案按行业匹配。
///
/// # 参数
///
/// * `verdicts` - 判定列表
/// * `output_path` - 输出文件路径
pub fn export_csv(verdicts: &[CrawlVerdict], output_path: &Path) -> Result<()> {
    debug!(
        "Exporting {} verdicts to CSV: {}",
        verdicts.len(),
        output_path.display()
    );

    let file = File::create(output_path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record([
        "company_name",
        "website",
        "industry",
        "has_phone_field",
        "evidence",
        "pages_fetched",
        "strategy",
        "status",
        "error",
        "description",
        "pitch",
    ])?;

    for verdict in verdicts {
        let evidence = verdict
            .evidence
            .iter()
            .map(|e| format!("{}: {}", e.kind, e.reason))
            .collect::<Vec<_>>()
            .join(" | ");
        let pitch_cell = pitch::render_pitch(&pitch::pitch_lines(
            verdict.industry_hint.as_deref(),
            verdict.description.as_deref(),
        ));

        wtr.write_record([
            verdict.company_name.clone(),
            verdict.website.clone(),
            verdict.industry_hint.clone().unwrap_or_default(),
            (if verdict.has_phone_field { "yes" } else { "no" }).to_string(),
            evidence,
            verdict.pages_fetched.to_string(),
            verdict.strategy.to_string(),
            verdict.status.to_string(),
            verdict.error_reason().unwrap_or_default(),
            verdict.description.clone().unwrap_or_default(),
            pitch_cell,
        ])?;
    }

    wtr.flush()?;
    info!(
        "Exported {} verdicts to {}",
        verdicts.len(),
        output_path.display()
    );
    Ok(())
}

/// 导出判定列表为JSON
///
/// 输出对象包含汇总统计与完整判定列表。
pub fn export_json(verdicts: &[CrawlVerdict], output_path: &Path) -> Result<()> {
    #[derive(Serialize)]
    struct JsonExport<'a> {
        summary: BatchSummary,
        verdicts: &'a [CrawlVerdict],
    }

    let export = JsonExport {
        summary: BatchSummary::from_verdicts(verdicts),
        verdicts,
    };
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(output_path, json)?;
    info!(
        "Exported {} verdicts to {}",
        verdicts.len(),
        output_path.display()
    );
    Ok(())
}
