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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含爬取策略、候选页面与电话字段检测的所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 爬取配置
    pub crawler: CrawlerSettings,
    /// 检测配置
    pub detection: DetectionSettings,
}

/// 爬取配置设置
///
/// 渲染策略开启时，每个工作器在整个公司爬取期间持有一个浏览器上下文，
/// 工作器数量应保守设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 并发工作器数量
    pub worker_count: usize,
    /// 主页请求超时（秒）
    pub homepage_timeout_secs: u64,
    /// 子页面请求超时（秒）
    pub subpage_timeout_secs: u64,
    /// 同一公司相邻页面请求之间的礼貌延迟（毫秒）
    pub inter_page_delay_ms: u64,
    /// 是否启用渲染回退策略
    pub render_enabled: bool,
    /// 渲染后等待页面脚本填充DOM的时间（毫秒）
    pub render_settle_ms: u64,
    /// 渲染策略下尝试点击"显形"控件的最大次数
    pub max_reveal_clicks: u8,
    /// 候选子页面路径，按优先级排列；主页始终最先访问
    pub candidate_paths: Vec<String>,
}

/// 检测配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionSettings {
    /// 电话字段词汇表
    pub keywords: Vec<String>,
    /// 提前停止的去重证据数量阈值
    pub early_stop_threshold: usize,
    /// 发现原生tel输入框后是否立即停止
    pub native_tel_stops: bool,
}

impl CrawlerSettings {
    pub fn homepage_timeout(&self) -> Duration {
        Duration::from_secs(self.homepage_timeout_secs)
    }

    pub fn subpage_timeout(&self) -> Duration {
        Duration::from_secs(self.subpage_timeout_secs)
    }
}

impl Settings {
    /// 加载配置
    ///
    /// 按优先级合并：内置默认值 < 配置文件 < `QUALRS_` 前缀环境变量
    ///
    /// # 返回值
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default crawler settings
            .set_default("crawler.worker_count", 10)?
            .set_default("crawler.homepage_timeout_secs", 15)?
            .set_default("crawler.subpage_timeout_secs", 10)?
            .set_default("crawler.inter_page_delay_ms", 500)?
            .set_default("crawler.render_enabled", true)?
            .set_default("crawler.render_settle_ms", 1500)?
            .set_default("crawler.max_reveal_clicks", 1)?
            .set_default(
                "crawler.candidate_paths",
                vec![
                    "/contact",
                    "/get-quote",
                    "/quote",
                    "/get-started",
                    "/signup",
                    "/sign-up",
                ],
            )?
            // Default detection settings
            .set_default(
                "detection.keywords",
                vec![
                    "phone",
                    "mobile",
                    "cell",
                    "tel",
                    "telephone",
                    "contact",
                    "callback",
                    "whatsapp",
                ],
            )?
            .set_default("detection.early_stop_threshold", 2)?
            .set_default("detection.native_tel_stops", true)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("QUALRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
