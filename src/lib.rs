// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 批处理外壳：数据导入、结果导出与推介文案
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 检测模块
///
/// 电话字段检测器与页面检查器
pub mod detection;

/// 领域模块
///
/// 包含核心业务实体和爬取服务
pub mod domain;

/// 引擎模块
///
/// 实现各种网页抓取引擎
pub mod engines;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现并发爬取工作池
pub mod workers;
