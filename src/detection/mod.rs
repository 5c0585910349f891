// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 电话字段检测模块
//!
//! 五个相互独立的检测器加一个汇总提取器。每个检测器实现
//! 一种启发式策略，提取器负责顺序调度与证据去重。

pub mod detectors;
pub mod extractor;
pub mod vocab;
