// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::company::CompanyRequest;
use crate::domain::models::verdict::{CrawlVerdict, VerdictStatus};
use crate::domain::services::crawl_service::CrawlService;
use crate::workers::worker::CrawlWorker;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// 批次进度快照
#[derive(Debug, Default, Clone)]
pub struct ProgressSnapshot {
    /// 已完成的公司数
    pub completed: usize,
    /// 其中判定合格的数量
    pub qualified: usize,
    /// 其中爬取失败的数量
    pub failed: usize,
}

/// 批次进度统计
///
/// 工作器每完成一家公司更新一次；读侧拿到的是一致的快照。
pub struct PoolProgress {
    total: usize,
    stats: parking_lot::RwLock<ProgressSnapshot>,
}

impl PoolProgress {
    /// 创建进度统计
    pub fn new(total: usize) -> Self {
        Self {
            total,
            stats: parking_lot::RwLock::new(ProgressSnapshot::default()),
        }
    }

    /// 记录一个完成的判定
    pub fn record(&self, verdict: &CrawlVerdict) {
        let completed = {
            let mut stats = self.stats.write();
            stats.completed += 1;
            if verdict.is_qualified() {
                stats.qualified += 1;
            }
            if verdict.status == VerdictStatus::Failed {
                stats.failed += 1;
            }
            stats.completed
        };
        info!(
            company = %verdict.company_name,
            qualified = verdict.is_qualified(),
            progress = format!("{}/{}", completed, self.total),
            "Company crawl completed"
        );
    }

    /// 当前进度快照
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.stats.read().clone()
    }

    /// 批次总数
    pub fn total(&self) -> usize {
        self.total
    }
}

/// 爬取工作池
///
/// 以固定数量的工作器并发处理一批公司。任一时刻在途的爬取
/// 不超过工作器数量；完成顺序与提交顺序无关。
pub struct CrawlPool {
    service: Arc<CrawlService>,
    worker_count: usize,
}

impl CrawlPool {
    /// 按配置创建工作池
    pub fn new(settings: Arc<Settings>) -> Self {
        let worker_count = settings.crawler.worker_count.max(1);
        Self {
            service: Arc::new(CrawlService::new(settings)),
            worker_count,
        }
    }

    /// 以既有服务创建工作池
    pub fn with_service(service: Arc<CrawlService>, worker_count: usize) -> Self {
        Self {
            service,
            worker_count: worker_count.max(1),
        }
    }

    /// 并发爬取一批公司
    ///
    /// 每家公司恰好产出一个判定；单个公司的失败折叠进其自身的
    /// 判定，不影响批次中的其他公司。工作器数量超出批次大小时
    /// 只启动需要的数量。
    ///
    /// # 参数
    ///
    /// * `companies` - 公司请求列表
    ///
    /// # 返回值
    ///
    /// 全部判定，按完成顺序排列
    pub async fn run(&self, companies: Vec<CompanyRequest>) -> Vec<CrawlVerdict> {
        let total = companies.len();
        if total == 0 {
            return Vec::new();
        }
        let worker_count = self.worker_count.min(total);
        info!(total = total, workers = worker_count, "Starting batch crawl");

        let (request_tx, request_rx) = mpsc::channel::<CompanyRequest>(total);
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<CrawlVerdict>();
        let progress = Arc::new(PoolProgress::new(total));

        // Channel capacity equals the batch size, so queueing never blocks.
        for request in companies {
            if request_tx.send(request).await.is_err() {
                break;
            }
        }
        drop(request_tx);

        let queue = Arc::new(Mutex::new(request_rx));
        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let worker = CrawlWorker::new(self.service.clone());
            let queue = queue.clone();
            let results = result_tx.clone();
            let progress = progress.clone();
            handles.push(tokio::spawn(async move {
                worker.run(queue, results, progress).await;
            }));
        }
        drop(result_tx);

        let mut verdicts = Vec::with_capacity(total);
        while let Some(verdict) = result_rx.recv().await {
            verdicts.push(verdict);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Crawl worker terminated abnormally: {}", e);
            }
        }

        let snapshot = progress.snapshot();
        info!(
            total = total,
            completed = snapshot.completed,
            qualified = snapshot.qualified,
            failed = snapshot.failed,
            "Batch crawl finished"
        );
        verdicts
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
