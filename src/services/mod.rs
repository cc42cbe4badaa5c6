//! 业务逻辑服务模块
//!
//! 封装数据获取、采集落盘和渲染层查询逻辑

pub mod collector;       // 数据采集任务
pub mod common;          // 公共常量和辅助函数
pub mod fallback;        // 兜底数据
pub mod format;          // 数字格式化
pub mod market_service;  // 渲染层查询服务
pub mod netease;         // 网易财经
pub mod sina;            // 新浪财经
pub mod store;           // 数据目录读写
pub mod tushare;         // Tushare Pro

pub use market_service::MarketService;
