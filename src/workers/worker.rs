// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::company::CompanyRequest;
use crate::domain::models::verdict::CrawlVerdict;
use crate::domain::services::crawl_service::CrawlService;
use crate::workers::manager::PoolProgress;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// 爬取工作器
///
/// 从共享队列领取公司请求，完成爬取后把判定发回收集通道。
/// 每个工作器一次只处理一家公司；渲染策略下这意味着同一时刻
/// 至多持有一个浏览器页面。
pub struct CrawlWorker {
    /// 工作器唯一标识
    id: Uuid,
    /// 爬取判定服务
    service: Arc<CrawlService>,
}

impl CrawlWorker {
    /// 创建新的爬取工作器
    pub fn new(service: Arc<CrawlService>) -> Self {
        Self {
            id: Uuid::new_v4(),
            service,
        }
    }

    /// 运行工作循环
    ///
    /// 队列关闭且取空后退出。判定发送失败说明收集端已经放弃，
    /// 工作器随之结束。
    ///
    /// # 参数
    ///
    /// * `queue` - 共享的公司请求队列
    /// * `results` - 判定收集通道
    /// * `progress` - 批次进度统计
    pub async fn run(
        self,
        queue: Arc<Mutex<mpsc::Receiver<CompanyRequest>>>,
        results: mpsc::UnboundedSender<CrawlVerdict>,
        progress: Arc<PoolProgress>,
    ) {
        debug!(worker_id = %self.id, "Crawl worker started");

        loop {
            // Hold the lock only while receiving so other workers can
            // pick up requests concurrently.
            let request = {
                let mut receiver = queue.lock().await;
                receiver.recv().await
            };
            let Some(request) = request else {
                break;
            };

            let verdict = self.service.crawl(&request).await;
            progress.record(&verdict);

            if results.send(verdict).is_err() {
                break;
            }
        }

        debug!(worker_id = %self.id, "Crawl worker finished");
    }
}

impl std::fmt::Debug for CrawlWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlWorker").field("id", &self.id).finish()
    }
}
