// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供批量爬取的并发执行能力
/// 包括工作池、工作器生命周期与进度统计
pub mod manager;
pub mod worker;

pub use manager::CrawlPool;
