//! 兜底数据
//!
//! 上游不可用时返回的占位内容，服务层总是以 `Feed::Fallback` 包装后返回

use crate::models::{ForecastStock, MarketOverview, SectorRank, StockBasic, StockSnapshot};
use crate::services::common::beijing_datetime;

pub fn market_overview() -> MarketOverview {
    MarketOverview {
        shanghai_index: "3,231.41".to_string(),
        shanghai_change: "+0.53%".to_string(),
        shenzhen_index: "2,143.18".to_string(),
        shenzhen_change: "+0.87%".to_string(),
        gem_index: "1,987.25".to_string(),
        gem_change: "+1.23%".to_string(),
        up_limit: 0,
        down_limit: 0,
        total_volume: "N/A".to_string(),
        north_inflow: "0.00".to_string(),
        north_inflow_ratio: "0.00%".to_string(),
        north_update_time: beijing_datetime(),
        north_note: "数据加载失败".to_string(),
    }
}

pub fn sector_ranks() -> Vec<SectorRank> {
    [("半导体", 3.25), ("新能源", 2.87), ("医药", 1.98), ("金融", 1.56), ("消费", 1.23)]
        .into_iter()
        .map(|(name, rise)| SectorRank {
            name: name.to_string(),
            rise,
        })
        .collect()
}

pub fn stock_snapshots() -> Vec<StockSnapshot> {
    [
        ("sh600000", "浦发银行", "8.56", "0.12", "1.42"),
        ("sz000001", "平安银行", "12.34", "0.23", "1.90"),
        ("sz300001", "特锐德", "25.67", "-0.34", "-1.31"),
    ]
    .into_iter()
    .map(|(code, name, price, change, change_rate)| StockSnapshot {
        code: code.to_string(),
        name: name.to_string(),
        price: price.to_string(),
        change: change.to_string(),
        change_rate: change_rate.to_string(),
    })
    .collect()
}

pub fn forecast_stocks() -> Vec<ForecastStock> {
    [
        ("000001", "平安银行", "50%-80%", "2023-04-10"),
        ("000002", "万科A", "30%-50%", "2023-04-12"),
        ("000063", "中兴通讯", "100%-150%", "2023-04-15"),
    ]
    .into_iter()
    .map(|(code, name, range, date)| ForecastStock {
        code: code.to_string(),
        name: name.to_string(),
        forecast_range: range.to_string(),
        publish_date: date.to_string(),
    })
    .collect()
}

pub fn stocks() -> Vec<StockBasic> {
    [
        ("000001", "平安银行", "银行", "深圳"),
        ("000002", "万科A", "全国地产", "深圳"),
        ("000063", "中兴通讯", "通信设备", "深圳"),
        ("000100", "TCL科技", "元器件", "广东"),
        ("000538", "云南白药", "中成药", "云南"),
    ]
    .into_iter()
    .map(|(code, name, industry, area)| StockBasic {
        code: code.to_string(),
        name: name.to_string(),
        industry: industry.to_string(),
        area: area.to_string(),
    })
    .collect()
}
