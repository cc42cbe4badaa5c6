//! 数据采集任务
//!
//! 依次请求各数据源并把结果写入数据目录，由命令行子命令触发。
//! 请求逐个等待完成，不做并发和重试。

use anyhow::{anyhow, Result};

use crate::models::{DailyMarketData, Feed, NorthCapital, SinaMarketData, StockFilter};
use crate::services::common::{beijing_date, beijing_datetime, beijing_trade_date};
use crate::services::format::format_volume;
use crate::services::market_service::MarketService;
use crate::services::store::{DAILY_MARKET_FILE, SINA_MARKET_FILE, STOCK_BASIC_FILE};
use crate::services::tushare::{NorthMoney, TushareTable};

/// 上证指数、深证成指、创业板指（新浪代码）
pub const SINA_INDEX_KEYS: [&str; 3] = ["s_sh000001", "s_sz399001", "s_sz399006"];
/// 上证指数、深证成指、创业板指（Tushare 代码）
pub const TUSHARE_INDEX_CODES: [&str; 3] = ["000001.SH", "399001.SZ", "399006.SZ"];
/// 股票基本信息采集数量
pub const STOCK_BASIC_LIMIT: usize = 10;
const YUAN_PER_YI: f64 = 100_000_000.0;

impl MarketService {
    /// 采集新浪指数和北向资金，保存为 `sina-market-data.json`
    ///
    /// 任一指数失败则整体失败；北向资金失败时写入带说明的零值
    pub async fn collect_sina_market(&self) -> Result<SinaMarketData> {
        let [sh, sz, gem] = SINA_INDEX_KEYS;

        let shanghai = self.sina.get_index(sh).await?;
        log::info!("上证指数数据获取成功: {:?}", shanghai);
        let shenzhen = self.sina.get_index(sz).await?;
        log::info!("深证成指数据获取成功: {:?}", shenzhen);
        let gem = self.sina.get_index(gem).await?;
        log::info!("创业板指数据获取成功: {:?}", gem);

        let north = self.north_capital().await;
        if north.is_live() {
            log::info!("北向资金数据获取成功: {:?}", north.data());
        } else if let Some(reason) = north.reason() {
            log::warn!("北向资金使用零值: {}", reason);
        }

        let data = SinaMarketData {
            date: beijing_date(),
            shanghai,
            shenzhen,
            gem,
            north_capital: north.into_data(),
        };
        self.store.write_json(SINA_MARKET_FILE, &data).await?;
        Ok(data)
    }

    /// 当日北向资金；无 Token、接口失败或当日无数据时为兜底零值
    pub async fn north_capital(&self) -> Feed<NorthCapital> {
        let now = beijing_datetime();
        if !self.tushare.has_token() {
            return Feed::fallback(
                NorthCapital::zeroed(now, "未配置Tushare Token"),
                "未配置Tushare Token",
            );
        }

        match self.tushare.north_money(&beijing_trade_date()).await {
            Ok(Some(money)) => Feed::live(north_capital_from(&money, now)),
            Ok(None) => Feed::fallback(NorthCapital::zeroed(now, "今日无数据"), "今日无数据"),
            Err(e) => {
                let note = format!("获取数据失败: {:#}", e);
                Feed::fallback(NorthCapital::zeroed(now, note.clone()), note)
            }
        }
    }

    /// 采集 Tushare 指数日线和市场统计，保存为 `market-data.json`
    pub async fn collect_daily_market(&self) -> Result<DailyMarketData> {
        if !self.tushare.has_token() {
            return Err(anyhow!("TUSHARE_API_KEY 环境变量未设置"));
        }

        let [sh, sz, gem] = TUSHARE_INDEX_CODES;
        let shanghai = self.tushare.index_daily(sh).await?;
        let shenzhen = self.tushare.index_daily(sz).await?;
        let gem = self.tushare.index_daily(gem).await?;
        let trade_date = shanghai.trade_date.clone();

        // 涨跌停和成交额接口需要更高积分，失败时不影响指数数据
        let up_limit = self
            .tushare
            .limit_count(&trade_date, "U")
            .await
            .unwrap_or_else(|e| {
                log::warn!("获取涨停家数失败: {:#}", e);
                0
            });
        let down_limit = self
            .tushare
            .limit_count(&trade_date, "D")
            .await
            .unwrap_or_else(|e| {
                log::warn!("获取跌停家数失败: {:#}", e);
                0
            });
        let turnover = self
            .tushare
            .market_turnover(&trade_date)
            .await
            .unwrap_or_else(|e| {
                log::warn!("获取成交额失败: {:#}", e);
                None
            });

        let data = DailyMarketData {
            date: trade_date,
            shanghai_index: format!("{:.2}", shanghai.close),
            shanghai_change: format!("{:.2}%", shanghai.pct_chg),
            shenzhen_index: format!("{:.2}", shenzhen.close),
            shenzhen_change: format!("{:.2}%", shenzhen.pct_chg),
            gem_index: format!("{:.2}", gem.close),
            gem_change: format!("{:.2}%", gem.pct_chg),
            up_limit,
            down_limit,
            total_volume: total_volume(turnover),
        };
        self.store.write_json(DAILY_MARKET_FILE, &data).await?;
        Ok(data)
    }

    /// 采集上市股票基本信息，原样保存为 `stock-basic.json`
    pub async fn collect_stock_basic(&self) -> Result<TushareTable> {
        let filter = StockFilter {
            limit: Some(STOCK_BASIC_LIMIT),
            exchange: None,
            list_status: Some("L".to_string()),
        };
        let table = self.tushare.stock_basic_table(&filter).await?;
        if table.is_empty() {
            log::warn!("股票基本信息接口未返回数据");
        } else {
            log::info!("股票基本信息获取成功: {} 条", table.len());
        }
        self.store.write_json(STOCK_BASIC_FILE, &table).await?;
        Ok(table)
    }

    /// 获取单个新浪代码的原始字段，用于核对字段下标
    pub async fn probe(&self, key: &str) -> Result<Vec<String>> {
        self.sina.probe(key).await
    }
}

/// `daily_info` 成交额单位为亿元，缺失时为 `N/A`
pub fn total_volume(amount: Option<f64>) -> String {
    match amount {
        Some(yi) => format_volume(yi * YUAN_PER_YI),
        None => "N/A".to_string(),
    }
}

pub fn north_capital_from(money: &NorthMoney, update_time: String) -> NorthCapital {
    NorthCapital {
        net_inflow: format!("{:.2}", money.north),
        net_inflow_ratio: money
            .ratio
            .map(|r| format!("{:.2}", r))
            .unwrap_or_else(|| "0".to_string()),
        sh_net_inflow: format!("{:.2}", money.sh),
        sz_net_inflow: format!("{:.2}", money.sz),
        update_time,
        note: "数据来源于Tushare".to_string(),
    }
}
