//! 市场数据服务
//!
//! 面向渲染层的查询入口。上游失败时由这里统一决定兜底策略，
//! 结果以 [`Feed`] 标记实时或兜底，调用方不需要再猜测数据来源。

use anyhow::Result;

use crate::config::AppConfig;
use crate::models::{
    DailyMarketData, Feed, ForecastStock, IndexQuote, MarketOverview, QuoteRecord, SectorRank,
    SinaMarketData, StockBasic, StockFilter, StockSnapshot,
};
use crate::services::common::build_client;
use crate::services::fallback;
use crate::services::format::{format_change, format_number};
use crate::services::netease::NeteaseClient;
use crate::services::sina::SinaClient;
use crate::services::store::{DataStore, DAILY_MARKET_FILE, SINA_MARKET_FILE};
use crate::services::tushare::TushareClient;

/// 个股快照默认代码
pub const SNAPSHOT_KEYS: [&str; 3] = ["sh600000", "sz000001", "sz300001"];
/// 业绩预告类型
pub const FORECAST_TYPE: &str = "预增";
pub const FORECAST_LIMIT: usize = 20;

pub struct MarketService {
    pub(crate) sina: SinaClient,
    pub(crate) tushare: TushareClient,
    pub(crate) netease: NeteaseClient,
    pub(crate) store: DataStore,
}

impl MarketService {
    pub fn new(
        sina: SinaClient,
        tushare: TushareClient,
        netease: NeteaseClient,
        store: DataStore,
    ) -> Self {
        Self {
            sina,
            tushare,
            netease,
            store,
        }
    }

    /// 按配置构建全部数据源，共用一个 HTTP 客户端
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = build_client(&config.api)?;
        Ok(Self::new(
            SinaClient::new(&config.sina, client.clone()),
            TushareClient::new(config.tushare.clone(), client.clone()),
            NeteaseClient::new(&config.netease, client),
            DataStore::new(&config.data.dir),
        ))
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// 大盘概览，来自已采集的新浪快照；每日汇总存在时补充涨跌停和成交额
    pub async fn market_overview(&self) -> Feed<MarketOverview> {
        let result = self.store.read_json::<SinaMarketData>(SINA_MARKET_FILE).await;
        let daily = self.store.read_json::<DailyMarketData>(DAILY_MARKET_FILE).await.ok();
        settle(
            "大盘指数",
            result.map(|sina| overview_from(&sina, daily.as_ref())),
            fallback::market_overview,
        )
    }

    /// 板块涨幅榜
    pub async fn sector_ranks(&self) -> Feed<Vec<SectorRank>> {
        settle(
            "板块涨幅榜",
            non_empty(self.netease.sector_ranks().await),
            fallback::sector_ranks,
        )
    }

    /// 个股快照
    pub async fn stock_snapshots(&self) -> Feed<Vec<StockSnapshot>> {
        let keys: Vec<String> = SNAPSHOT_KEYS.iter().map(|k| k.to_string()).collect();
        settle(
            "个股快照",
            non_empty(self.sina.get_snapshots(&keys).await),
            fallback::stock_snapshots,
        )
    }

    /// 业绩预增股票
    pub async fn forecast_stocks(&self) -> Feed<Vec<ForecastStock>> {
        settle(
            "业绩预增股票",
            non_empty(self.tushare.forecasts(FORECAST_TYPE, FORECAST_LIMIT).await),
            fallback::forecast_stocks,
        )
    }

    /// 股票列表
    pub async fn stocks(&self, filter: &StockFilter) -> Feed<Vec<StockBasic>> {
        settle(
            "股票列表",
            non_empty(self.tushare.stock_basic(filter).await),
            fallback::stocks,
        )
    }

    /// 实时行情原始记录，不做兜底
    pub async fn quotes(&self, keys: &[String]) -> Result<Vec<QuoteRecord>> {
        self.sina.get_quotes(keys).await
    }

    /// 单个指数实时行情，不做兜底
    pub async fn index_quote(&self, key: &str) -> Result<IndexQuote> {
        self.sina.get_index(key).await
    }
}

/// 成功则为实时数据，失败记录日志并换成兜底数据
fn settle<T>(what: &str, result: Result<T>, fallback: impl FnOnce() -> T) -> Feed<T> {
    match result {
        Ok(data) => Feed::live(data),
        Err(e) => {
            log::warn!("获取{}失败，使用兜底数据: {:#}", what, e);
            Feed::fallback(fallback(), format!("{:#}", e))
        }
    }
}

/// 空列表视为无数据
fn non_empty<T>(result: Result<Vec<T>>) -> Result<Vec<T>> {
    match result {
        Ok(items) if items.is_empty() => Err(anyhow::anyhow!("接口未返回数据")),
        other => other,
    }
}

/// 快照 → 渲染层概览
pub fn overview_from(sina: &SinaMarketData, daily: Option<&DailyMarketData>) -> MarketOverview {
    let north = &sina.north_capital;
    MarketOverview {
        shanghai_index: format_number(&sina.shanghai.point, 2),
        shanghai_change: format_change(&sina.shanghai.change_rate),
        shenzhen_index: format_number(&sina.shenzhen.point, 2),
        shenzhen_change: format_change(&sina.shenzhen.change_rate),
        gem_index: format_number(&sina.gem.point, 2),
        gem_change: format_change(&sina.gem.change_rate),
        up_limit: daily.map(|d| d.up_limit).unwrap_or(0),
        down_limit: daily.map(|d| d.down_limit).unwrap_or(0),
        total_volume: daily
            .map(|d| d.total_volume.clone())
            .unwrap_or_else(|| "N/A".to_string()),
        north_inflow: format_number(&north.net_inflow, 2),
        north_inflow_ratio: format!("{}%", north.net_inflow_ratio),
        north_update_time: north.update_time.clone(),
        north_note: north.note.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IndexQuote, NorthCapital};
    use crate::services::test_support::offline_service;
    use tempfile::tempdir;

    fn index(name: &str, point: &str, rate: &str) -> IndexQuote {
        IndexQuote {
            name: name.to_string(),
            point: point.to_string(),
            change: "0".to_string(),
            change_rate: rate.to_string(),
        }
    }

    fn sample_sina() -> SinaMarketData {
        SinaMarketData {
            date: "2024-05-06".to_string(),
            shanghai: index("上证指数", "3370.13", "0.32"),
            shenzhen: index("深证成指", "10234.5", "-0.12"),
            gem: index("创业板指", "2034.111", "0"),
            north_capital: NorthCapital {
                net_inflow: "52.3".to_string(),
                net_inflow_ratio: "1.20".to_string(),
                sh_net_inflow: "30.00".to_string(),
                sz_net_inflow: "22.30".to_string(),
                update_time: "2024-05-06 15:00:00".to_string(),
                note: "数据来源于Tushare".to_string(),
            },
        }
    }

    #[test]
    fn test_overview_from_snapshot() {
        let overview = overview_from(&sample_sina(), None);
        assert_eq!(overview.shanghai_index, "3,370.13");
        assert_eq!(overview.shanghai_change, "+0.32%");
        assert_eq!(overview.shenzhen_index, "10,234.50");
        assert_eq!(overview.shenzhen_change, "-0.12%");
        assert_eq!(overview.gem_index, "2,034.11");
        assert_eq!(overview.gem_change, "0.00%");
        assert_eq!(overview.total_volume, "N/A");
        assert_eq!(overview.north_inflow, "52.30");
        assert_eq!(overview.north_inflow_ratio, "1.20%");
        assert_eq!(overview.north_note, "数据来源于Tushare");
    }

    #[test]
    fn test_overview_uses_daily_summary() {
        let daily = DailyMarketData {
            date: "20240506".to_string(),
            shanghai_index: "3140.72".to_string(),
            shanghai_change: "1.17%".to_string(),
            shenzhen_index: "9500.00".to_string(),
            shenzhen_change: "0.50%".to_string(),
            gem_index: "1850.00".to_string(),
            gem_change: "0.80%".to_string(),
            up_limit: 56,
            down_limit: 7,
            total_volume: "4185.52亿".to_string(),
        };
        let overview = overview_from(&sample_sina(), Some(&daily));
        assert_eq!(overview.up_limit, 56);
        assert_eq!(overview.down_limit, 7);
        assert_eq!(overview.total_volume, "4185.52亿");
    }

    #[actix_web::test]
    async fn test_overview_live_from_store() {
        let dir = tempdir().unwrap();
        let service = offline_service(dir.path(), "");
        service.store().write_json(SINA_MARKET_FILE, &sample_sina()).await.unwrap();

        let feed = service.market_overview().await;
        assert!(feed.is_live());
        assert_eq!(feed.data().shanghai_index, "3,370.13");
    }

    #[actix_web::test]
    async fn test_overview_falls_back_without_snapshot() {
        let dir = tempdir().unwrap();
        let service = offline_service(dir.path(), "");

        let feed = service.market_overview().await;
        assert!(!feed.is_live());
        assert_eq!(feed.data().north_note, "数据加载失败");
        assert!(feed.reason().unwrap().contains(SINA_MARKET_FILE));
    }

    #[actix_web::test]
    async fn test_upstream_failures_fall_back() {
        let dir = tempdir().unwrap();
        let service = offline_service(dir.path(), "token");

        let sectors = service.sector_ranks().await;
        assert!(!sectors.is_live());
        assert_eq!(sectors.data().len(), 5);

        let snapshots = service.stock_snapshots().await;
        assert!(!snapshots.is_live());
        assert_eq!(snapshots.data()[0].code, "sh600000");

        let forecasts = service.forecast_stocks().await;
        assert!(!forecasts.is_live());

        let stocks = service.stocks(&StockFilter::default()).await;
        assert!(!stocks.is_live());
        assert_eq!(stocks.data().len(), 5);
    }

    #[actix_web::test]
    async fn test_live_quote_errors_propagate() {
        let dir = tempdir().unwrap();
        let service = offline_service(dir.path(), "");
        assert!(service.quotes(&["sh600000".to_string()]).await.is_err());
        assert!(service.index_quote("s_sh000001").await.is_err());
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty::<i32>(Ok(vec![])).is_err());
        assert_eq!(non_empty(Ok(vec![1])).unwrap(), vec![1]);
    }
}
