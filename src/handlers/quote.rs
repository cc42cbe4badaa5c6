//! 实时行情接口
//!
//! 直接透传新浪解码结果，不做兜底

use actix_web::{web, HttpResponse, Result};

use crate::models::{ApiResponse, IndexQuote, QuoteQuery, QuoteRecord};
use crate::services::sina::QuoteDecodeError;
use crate::services::MarketService;

/// 无数据为 404，其余上游错误为 502
fn upstream_error<T: serde::Serialize>(e: anyhow::Error) -> HttpResponse {
    let response = ApiResponse::<T>::error(format!("{:#}", e));
    match e.downcast_ref::<QuoteDecodeError>() {
        Some(QuoteDecodeError::NoData) => HttpResponse::NotFound().json(response),
        _ => HttpResponse::BadGateway().json(response),
    }
}

pub async fn get_quotes(
    service: web::Data<MarketService>,
    query: web::Query<QuoteQuery>,
) -> Result<HttpResponse> {
    let keys = query.keys();
    if keys.is_empty() {
        let response = ApiResponse::<Vec<QuoteRecord>>::error("list 参数不能为空".to_string());
        return Ok(HttpResponse::BadRequest().json(response));
    }

    match service.quotes(&keys).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(records))),
        Err(e) => Ok(upstream_error::<Vec<QuoteRecord>>(e)),
    }
}

pub async fn get_index(
    service: web::Data<MarketService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let key = path.into_inner();

    match service.index_quote(&key).await {
        Ok(quote) => Ok(HttpResponse::Ok().json(ApiResponse::success(quote))),
        Err(e) => Ok(upstream_error::<IndexQuote>(e)),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/quotes", web::get().to(get_quotes))
        .route("/indices/{key}", web::get().to(get_index));
}
