//! 渲染层接口
//!
//! 每个接口都返回 `Feed`，上游失败时仍为 200，由 `source` 字段标记兜底数据

use actix_web::{web, HttpResponse, Result};

use crate::models::{ApiResponse, StockFilter};
use crate::services::MarketService;

pub async fn market_overview(service: web::Data<MarketService>) -> Result<HttpResponse> {
    let feed = service.market_overview().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(feed)))
}

pub async fn sector_ranks(service: web::Data<MarketService>) -> Result<HttpResponse> {
    let feed = service.sector_ranks().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(feed)))
}

pub async fn stock_snapshots(service: web::Data<MarketService>) -> Result<HttpResponse> {
    let feed = service.stock_snapshots().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(feed)))
}

pub async fn forecast_stocks(service: web::Data<MarketService>) -> Result<HttpResponse> {
    let feed = service.forecast_stocks().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(feed)))
}

pub async fn list_stocks(
    service: web::Data<MarketService>,
    query: web::Query<StockFilter>,
) -> Result<HttpResponse> {
    let feed = service.stocks(&query).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(feed)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/market")
            .route("/overview", web::get().to(market_overview))
            .route("/sectors", web::get().to(sector_ranks))
            .route("/snapshots", web::get().to(stock_snapshots))
            .route("/forecasts", web::get().to(forecast_stocks)),
    )
    .route("/stocks", web::get().to(list_stocks));
}
