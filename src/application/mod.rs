// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 核心引擎之上的批处理外壳：CSV导入、结果汇总与导出、
/// 以及按行业匹配的营销文案
pub mod ingest;
pub mod pitch;
pub mod report;
