//! 命令行参数
//!
//! 默认启动 HTTP 服务；采集类子命令执行一次后退出

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A 股行情看板后端
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// 配置文件路径（默认查找 config.json、config/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// 启动 HTTP 服务
    Serve,
    /// 采集新浪指数和北向资金，写入 sina-market-data.json
    FetchSina,
    /// 采集 Tushare 指数日线和市场统计，写入 market-data.json
    FetchDaily,
    /// 采集上市股票基本信息，写入 stock-basic.json
    FetchStockBasic,
    /// 打印新浪单个代码的原始字段
    Probe {
        /// 新浪代码
        #[arg(default_value = "gb_0")]
        key: String,
    },
}

impl Args {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}
