// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 推介文案模块
//!
//! 按行业提示与页面描述为每家公司挑选即时回呼产品的卖点文案。

/// 通用文案，行业无法识别时使用
const DEFAULT_LINES: &[&str] = &[
    "Convert more website visitors into customers with instant callbacks",
    "Reduce lead response time from hours to seconds",
    "Engage prospects at their moment of highest intent",
    "Outperform competitors who rely on slow follow-up",
];

const FINANCE_LINES: &[&str] = &[
    "Capture leads while they're actively researching",
    "Provide instant answers to complex financial questions",
    "Build trust with immediate callback",
];

const AUTO_HOME_LINES: &[&str] = &[
    "Capture comparison shoppers before they leave for competitors",
    "Increase bind rates with instant quote assistance",
    "Reduce shopping abandonment with immediate callback",
];

/// (匹配子串, 文案行) 表
///
/// 靠前的条目更具体，自上而下第一个命中生效；
/// 泛化的行业词必须排在其细分行业之后。
const PITCH_TABLE: &[(&str, &[&str])] = &[
    (
        "pet insurance",
        &[
            "Connect with pet owners the moment they're comparing plans",
            "Increase quote-to-policy conversion with instant phone engagement",
            "Build trust with pet parents through immediate personal contact",
        ],
    ),
    (
        "health insurance",
        &[
            "Guide prospects through complex plan options via instant callback",
            "Capture leads during open enrollment with real-time engagement",
            "Reduce drop-off rates on quote forms with immediate phone follow-up",
        ],
    ),
    (
        "life insurance",
        &[
            "Build trust and rapport through immediate personal connection",
            "Answer complex coverage questions in real-time",
            "Convert hesitant prospects with timely phone engagement",
        ],
    ),
    ("auto insurance", AUTO_HOME_LINES),
    ("home insurance", AUTO_HOME_LINES),
    (
        "insurtech",
        &[
            "Differentiate from traditional insurers with instant engagement",
            "Combine digital efficiency with personal touch",
            "Increase conversion rates on your modern platform",
        ],
    ),
    (
        "comparison",
        &[
            "Engage high-intent shoppers at peak interest moment",
            "Convert comparison traffic into qualified leads",
            "Stand out by offering instant human connection",
        ],
    ),
    (
        "insurance",
        &[
            "Increase quote completion rates by calling leads while they're still on the website",
            "Reduce lead response time from hours to seconds",
            "Convert more website visitors into policy holders with instant callbacks",
            "Outperform competitors who rely on slow form submissions",
        ],
    ),
    (
        "fintech",
        &[
            "Reduce application abandonment with instant support",
            "Build trust through immediate personal contact",
            "Convert website visitors at the moment of highest intent",
        ],
    ),
    ("finance", FINANCE_LINES),
    ("financial", FINANCE_LINES),
    (
        "education",
        &[
            "Engage prospective students at their moment of interest",
            "Answer enrollment questions instantly",
            "Increase application completion rates",
        ],
    ),
];

/// 为一家公司挑选推介文案
///
/// 行业提示与页面描述拼接后小写化，与文案表做子串匹配；
/// 返回最多三行，没有命中时使用通用文案。
///
/// # 参数
///
/// * `industry_hint` - 行业/类别提示
/// * `description` - 抓取到的页面描述
///
/// # 返回值
///
/// 最多三行卖点文案
pub fn pitch_lines(industry_hint: Option<&str>, description: Option<&str>) -> Vec<&'static str> {
    let text = format!(
        "{} {}",
        industry_hint.unwrap_or(""),
        description.unwrap_or("")
    )
    .to_lowercase();

    for (needle, lines) in PITCH_TABLE {
        if text.contains(needle) {
            return lines.iter().take(3).copied().collect();
        }
    }
    DEFAULT_LINES.iter().take(3).copied().collect()
}

/// 文案行拼接为导出用的单元格文本
pub fn render_pitch(lines: &[&'static str]) -> String {
    lines.join(" | ")
}
