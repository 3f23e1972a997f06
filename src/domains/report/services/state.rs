// Report domain state
// 리포트 도메인 상태
use std::sync::Arc;
use crate::domains::report::services::ReportService;
use crate::shared::store::DispatchStore;

#[derive(Clone)]
pub struct ReportState {
    pub report_service: ReportService,
}

impl ReportState {
    pub fn new(store: Arc<dyn DispatchStore>) -> Self {
        Self {
            report_service: ReportService::new(store),
        }
    }
}
