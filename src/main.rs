//! A 股行情看板后端
//!
//! 从新浪财经、Tushare、网易财经获取指数与个股数据，
//! 采集结果写入数据目录，并通过 RESTful API 提供给前端渲染

mod cli;        // 命令行参数
mod config;     // 配置
mod handlers;   // HTTP 请求处理器
mod middleware; // 中间件
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use crate::cli::{Args, Command};
use crate::config::AppConfig;
use crate::middleware::ApiKeyMiddleware;
use crate::services::MarketService;

/// 应用程序入口
#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref());

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    log::info!("数据目录: {}", config.data.dir.display());

    let service = MarketService::from_config(&config)?;

    match args.command() {
        Command::Serve => serve(config, service).await?,
        Command::FetchSina => {
            log::info!("开始更新新浪财经数据...");
            service.collect_sina_market().await?;
            log::info!("新浪财经数据更新成功");
        }
        Command::FetchDaily => {
            log::info!("开始更新每日市场数据...");
            service.collect_daily_market().await?;
            log::info!("每日市场数据更新成功");
        }
        Command::FetchStockBasic => {
            log::info!("开始获取股票基本信息...");
            service.collect_stock_basic().await?;
            log::info!("股票基本信息数据更新成功");
        }
        Command::Probe { key } => {
            let fields = service.probe(key).await?;
            println!("数据项数量: {}", fields.len());
            for (index, item) in fields.iter().enumerate() {
                println!("{}: {}", index, item);
            }
        }
    }

    Ok(())
}

/// 启动 HTTP 服务器
async fn serve(config: AppConfig, service: MarketService) -> std::io::Result<()> {
    if config.api.api_key.is_empty() {
        log::warn!("未设置 API_KEY，接口不启用认证");
    }

    let bind_addr = config.bind_addr();
    let api_key = config.api.api_key.clone();
    let service = web::Data::new(service);

    log::info!("启动行情看板后端服务，监听 {}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 添加请求日志中间件
            .wrap(ApiKeyMiddleware::new(&api_key))  // API Key 认证
            .app_data(service.clone())
            .configure(handlers::config)  // 配置路由
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await
}
