// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 公司请求（company）：一家待判定公司的只读输入
/// - 证据（evidence）：表明电话字段存在的离散信号
/// - 页面结果（page）：单个候选页面的获取结果
/// - 判定（verdict）：一家公司的最终结构化结论
///
/// 这些模型构成了系统的数据基础，定义了业务概念的
/// 结构和行为，是领域驱动设计的核心组成部分。
pub mod company;
pub mod evidence;
pub mod page;
pub mod verdict;
