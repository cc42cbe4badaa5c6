//! 市场数据模型
//!
//! 定义持久化到数据目录的 JSON 结构，以及返回给前端渲染层的投影。
//! 字段名沿用前端约定的 camelCase。

use serde::{Deserialize, Serialize};

/// 指数简要行情（新浪 `s_` 前缀接口）
///
/// 数值保持接口原始文本，格式化由渲染层完成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuote {
    /// 指数名称
    pub name: String,
    /// 最新点位
    pub point: String,
    /// 涨跌额
    pub change: String,
    /// 涨跌幅(%)
    pub change_rate: String,
}

/// 北向资金
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NorthCapital {
    /// 净流入（亿元）
    pub net_inflow: String,
    /// 净流入占比
    pub net_inflow_ratio: String,
    /// 沪股通净流入（亿元）
    pub sh_net_inflow: String,
    /// 深股通净流入（亿元）
    pub sz_net_inflow: String,
    /// 更新时间
    pub update_time: String,
    /// 数据说明
    pub note: String,
}

impl NorthCapital {
    /// 全零占位数据，附带说明
    pub fn zeroed(update_time: String, note: impl Into<String>) -> Self {
        Self {
            net_inflow: "0".to_string(),
            net_inflow_ratio: "0".to_string(),
            sh_net_inflow: "0".to_string(),
            sz_net_inflow: "0".to_string(),
            update_time,
            note: note.into(),
        }
    }
}

/// 新浪市场快照，持久化为 `sina-market-data.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinaMarketData {
    pub date: String,
    /// 上证指数
    pub shanghai: IndexQuote,
    /// 深证成指
    pub shenzhen: IndexQuote,
    /// 创业板指
    pub gem: IndexQuote,
    pub north_capital: NorthCapital,
}

/// 每日大盘汇总，持久化为 `market-data.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMarketData {
    /// 交易日期（YYYYMMDD）
    pub date: String,
    pub shanghai_index: String,
    pub shanghai_change: String,
    pub shenzhen_index: String,
    pub shenzhen_change: String,
    pub gem_index: String,
    pub gem_change: String,
    /// 涨停家数
    pub up_limit: usize,
    /// 跌停家数
    pub down_limit: usize,
    /// 沪市成交额
    pub total_volume: String,
}

/// 大盘概览（渲染层使用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub shanghai_index: String,
    pub shanghai_change: String,
    pub shenzhen_index: String,
    pub shenzhen_change: String,
    pub gem_index: String,
    pub gem_change: String,
    pub up_limit: usize,
    pub down_limit: usize,
    pub total_volume: String,
    pub north_inflow: String,
    pub north_inflow_ratio: String,
    pub north_update_time: String,
    pub north_note: String,
}

/// 板块涨幅
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRank {
    /// 板块名称
    pub name: String,
    /// 涨幅(%)
    pub rise: f64,
}

/// 个股快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub code: String,
    pub name: String,
    pub price: String,
    pub change: String,
    pub change_rate: String,
}

/// 业绩预告股票
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastStock {
    pub code: String,
    pub name: String,
    /// 预告变动幅度
    pub forecast_range: String,
    /// 公告日期
    pub publish_date: String,
}

/// 股票基本信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBasic {
    pub code: String,
    pub name: String,
    /// 所属行业
    pub industry: String,
    /// 地域
    pub area: String,
}

/// 股票列表筛选条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockFilter {
    /// 返回数量限制
    pub limit: Option<usize>,
    /// 交易所（SSE / SZSE / BSE）
    pub exchange: Option<String>,
    /// 上市状态（L 上市 / D 退市 / P 暂停）
    pub list_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sina_market_data_uses_camel_case() {
        let quote = IndexQuote {
            name: "上证指数".to_string(),
            point: "3370.13".to_string(),
            change: "10.88".to_string(),
            change_rate: "0.32".to_string(),
        };
        let data = SinaMarketData {
            date: "2024-05-06".to_string(),
            shanghai: quote.clone(),
            shenzhen: quote.clone(),
            gem: quote,
            north_capital: NorthCapital::zeroed("2024-05-06 15:00:00".to_string(), "今日无数据"),
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["shanghai"]["changeRate"], "0.32");
        assert_eq!(json["northCapital"]["netInflow"], "0");
        assert_eq!(json["northCapital"]["note"], "今日无数据");

        let back: SinaMarketData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }
}
