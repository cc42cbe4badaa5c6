//! API Key 认证中间件
//!
//! 通过 Header 中的 `Authorization: Bearer <token>` 进行认证。
//! 未配置 API Key 时放行所有请求；健康检查始终放行。

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::models::ApiResponse;

/// API Key 中间件
pub struct ApiKeyMiddleware {
    api_key: Option<Rc<str>>,
}

impl ApiKeyMiddleware {
    /// 空字符串表示不启用认证
    pub fn new(api_key: &str) -> Self {
        let api_key = api_key.trim();
        Self {
            api_key: (!api_key.is_empty()).then(|| Rc::from(api_key)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ApiKeyMiddlewareService {
            service: Rc::new(service),
            api_key: self.api_key.clone(),
        })
    }
}

pub struct ApiKeyMiddlewareService<S> {
    service: Rc<S>,
    api_key: Option<Rc<str>>,
}

/// 健康检查路径，无需认证
const HEALTH_PATH: &str = "/api/v1/health";

/// 只放行完整匹配的健康检查路径，`/indices/{key}` 等参数路由不受影响
fn is_public(path: &str) -> bool {
    path == HEALTH_PATH
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let authorized = match &self.api_key {
            None => true,
            Some(_) if is_public(req.path()) => true,
            Some(expected) => bearer_token(&req) == Some(&**expected),
        };

        Box::pin(async move {
            if authorized {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            log::warn!("拒绝未认证请求: {} {}", req.method(), req.path());
            let response = HttpResponse::Unauthorized()
                .json(ApiResponse::<()>::error("无效的 Bearer Token".to_string()));
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}
