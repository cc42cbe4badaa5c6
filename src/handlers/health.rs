use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::models::ApiResponse;
use crate::services::store::SINA_MARKET_FILE;
use crate::services::MarketService;

/// 健康状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// 数据目录
    pub data_dir: String,
    /// 是否已有新浪市场快照
    pub snapshot_ready: bool,
}

pub async fn health_check(service: web::Data<MarketService>) -> Result<HttpResponse> {
    let store = service.store();
    let status = HealthStatus {
        status: "ok",
        data_dir: store.dir().display().to_string(),
        snapshot_ready: store.path(SINA_MARKET_FILE).exists(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
