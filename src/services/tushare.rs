//! Tushare Pro 接口
//!
//! 所有接口共用一个 POST 入口：
//! 请求 `{api_name, token, params, fields}`，
//! 响应 `{code, msg, data: {fields: [...], items: [[...], ...]}}`，`code != 0` 为失败。

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::TushareConfig;
use crate::models::{ForecastStock, StockBasic, StockFilter};

/// 接口原始响应
#[derive(Debug, Deserialize)]
pub struct TushareResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<TushareTable>,
}

/// 表格数据：列名与按行排列的值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TushareTable {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub items: Vec<Vec<Value>>,
}

/// 表格中的一行，按列名取值
#[derive(Debug, Clone, Copy)]
pub struct TushareRow<'a> {
    fields: &'a [String],
    values: &'a [Value],
}

impl TushareTable {
    pub fn rows(&self) -> impl Iterator<Item = TushareRow<'_>> {
        self.items.iter().map(move |values| TushareRow {
            fields: &self.fields,
            values,
        })
    }

    pub fn first(&self) -> Option<TushareRow<'_>> {
        self.rows().next()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> TushareRow<'a> {
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        let index = self.fields.iter().position(|f| f == name)?;
        self.values.get(index).filter(|v| !v.is_null())
    }

    /// 文本列，缺失为空串；数值列转为文本
    pub fn text(&self, name: &str) -> String {
        match self.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// 数值列，兼容以字符串返回的数字
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// 指数日线
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDaily {
    /// 交易日期（YYYYMMDD）
    pub trade_date: String,
    /// 收盘点位
    pub close: f64,
    /// 涨跌幅(%)
    pub pct_chg: f64,
}

/// 沪深港通北向资金（亿元）
#[derive(Debug, Clone, PartialEq)]
pub struct NorthMoney {
    pub trade_date: String,
    pub north: f64,
    pub sh: f64,
    pub sz: f64,
    /// 部分账号权限下不返回该列
    pub ratio: Option<f64>,
}

/// `moneyflow_hsgt` 金额单位为百万元
const MILLION_PER_YI: f64 = 100.0;

/// Tushare 客户端
pub struct TushareClient {
    client: Client,
    config: TushareConfig,
}

impl TushareClient {
    pub fn new(config: TushareConfig, client: Client) -> Self {
        Self { client, config }
    }

    pub fn has_token(&self) -> bool {
        self.config.has_token()
    }

    /// 调用任意接口
    pub async fn call(&self, api_name: &str, params: Value, fields: &str) -> Result<TushareTable> {
        if !self.has_token() {
            return Err(anyhow!("未配置 Tushare Token"));
        }

        let body = json!({
            "api_name": api_name,
            "token": self.config.api_key,
            "params": params,
            "fields": fields,
        });
        log::debug!("调用 Tushare 接口 {} 参数: {}", api_name, body["params"]);

        let response = self
            .client
            .post(&self.config.base_url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("调用 Tushare 接口 {} 失败", api_name))?;

        if !response.status().is_success() {
            return Err(anyhow!("Tushare 接口 {} 返回 {}", api_name, response.status()));
        }

        let parsed: TushareResponse = response.json().await?;
        into_table(api_name, parsed)
    }

    /// 股票基本信息原始表
    pub async fn stock_basic_table(&self, filter: &StockFilter) -> Result<TushareTable> {
        let params = json!({
            "exchange": filter.exchange.clone().unwrap_or_default(),
            "list_status": filter.list_status.clone().unwrap_or_else(|| "L".to_string()),
            "limit": filter.limit.unwrap_or(100),
        });
        self.call("stock_basic", params, "ts_code,symbol,name,area,industry,list_date")
            .await
    }

    /// 股票列表
    pub async fn stock_basic(&self, filter: &StockFilter) -> Result<Vec<StockBasic>> {
        let table = self.stock_basic_table(filter).await?;
        Ok(stock_basics_from(&table))
    }

    /// 指数最新日线，如 `000001.SH`
    pub async fn index_daily(&self, ts_code: &str) -> Result<IndexDaily> {
        let table = self
            .call("index_daily", json!({ "ts_code": ts_code, "limit": 1 }), "")
            .await?;
        index_daily_from(&table).ok_or_else(|| anyhow!("指数 {} 无日线数据", ts_code))
    }

    /// 涨停（`U`）或跌停（`D`）家数
    pub async fn limit_count(&self, trade_date: &str, limit_type: &str) -> Result<usize> {
        let table = self
            .call(
                "limit_list_d",
                json!({ "trade_date": trade_date, "limit_type": limit_type }),
                "ts_code",
            )
            .await?;
        Ok(table.len())
    }

    /// 上交所当日成交金额（亿元）
    pub async fn market_turnover(&self, trade_date: &str) -> Result<Option<f64>> {
        let table = self
            .call(
                "daily_info",
                json!({ "trade_date": trade_date, "exchange": "SH" }),
                "trade_date,ts_code,amount",
            )
            .await?;
        Ok(table.first().and_then(|row| row.number("amount")))
    }

    /// 北向资金，当日无数据返回 `None`
    pub async fn north_money(&self, trade_date: &str) -> Result<Option<NorthMoney>> {
        let table = self
            .call(
                "moneyflow_hsgt",
                json!({ "trade_date": trade_date }),
                "trade_date,hgt,sgt,north_money,north_rate",
            )
            .await?;
        Ok(north_money_from(&table))
    }

    /// 业绩预告
    pub async fn forecasts(&self, forecast_type: &str, limit: usize) -> Result<Vec<ForecastStock>> {
        let table = self
            .call(
                "forecast",
                json!({ "type": forecast_type, "limit": limit }),
                "ts_code,ann_date,end_date,type,p_change_min,p_change_max",
            )
            .await?;
        Ok(forecasts_from(&table))
    }
}

/// 检查返回码并取出表格
pub fn into_table(api_name: &str, response: TushareResponse) -> Result<TushareTable> {
    if response.code != 0 {
        return Err(anyhow!(
            "Tushare 接口 {} 调用失败: {}",
            api_name,
            response.msg.unwrap_or_default()
        ));
    }
    Ok(response.data.unwrap_or_default())
}

pub fn stock_basics_from(table: &TushareTable) -> Vec<StockBasic> {
    table
        .rows()
        .map(|row| StockBasic {
            code: row.text("symbol"),
            name: row.text("name"),
            industry: row.text("industry"),
            area: row.text("area"),
        })
        .collect()
}

pub fn index_daily_from(table: &TushareTable) -> Option<IndexDaily> {
    let row = table.first()?;
    Some(IndexDaily {
        trade_date: row.text("trade_date"),
        close: row.number("close")?,
        pct_chg: row.number("pct_chg").unwrap_or(0.0),
    })
}

pub fn north_money_from(table: &TushareTable) -> Option<NorthMoney> {
    let row = table.first()?;
    Some(NorthMoney {
        trade_date: row.text("trade_date"),
        north: row.number("north_money").unwrap_or(0.0) / MILLION_PER_YI,
        sh: row.number("hgt").unwrap_or(0.0) / MILLION_PER_YI,
        sz: row.number("sgt").unwrap_or(0.0) / MILLION_PER_YI,
        ratio: row.number("north_rate"),
    })
}

pub fn forecasts_from(table: &TushareTable) -> Vec<ForecastStock> {
    table
        .rows()
        .map(|row| {
            let range = match (row.number("p_change_min"), row.number("p_change_max")) {
                (Some(min), Some(max)) => format!("{}%-{}%", min, max),
                (Some(v), None) | (None, Some(v)) => format!("{}%", v),
                (None, None) => String::new(),
            };
            let code = row.text("ts_code");
            let name = match row.text("name") {
                n if n.is_empty() => code.clone(),
                n => n,
            };
            ForecastStock {
                code,
                name,
                forecast_range: range,
                publish_date: row.text("ann_date"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(value: Value) -> TushareTable {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_into_table_rejects_error_code() {
        let response: TushareResponse = serde_json::from_value(json!({
            "code": 40101,
            "msg": "抱歉，您没有访问该接口的权限",
            "data": null
        }))
        .unwrap();

        let err = into_table("moneyflow_hsgt", response).unwrap_err();
        assert!(err.to_string().contains("40101") || err.to_string().contains("没有访问"));
    }

    #[test]
    fn test_into_table_success() {
        let response: TushareResponse = serde_json::from_value(json!({
            "code": 0,
            "msg": "",
            "data": {"fields": ["ts_code"], "items": [["000001.SZ"]]}
        }))
        .unwrap();

        let table = into_table("stock_basic", response).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.first().unwrap().text("ts_code"), "000001.SZ");
    }

    #[test]
    fn test_row_access_by_name() {
        let t = table(json!({
            "fields": ["trade_date", "close", "pct_chg", "note"],
            "items": [["20240506", 3140.72, "1.17", null]]
        }));
        let row = t.first().unwrap();
        assert_eq!(row.text("trade_date"), "20240506");
        assert_eq!(row.number("close"), Some(3140.72));
        assert_eq!(row.number("pct_chg"), Some(1.17));
        assert_eq!(row.text("note"), "");
        assert_eq!(row.number("missing"), None);
    }

    #[test]
    fn test_index_daily_from() {
        let t = table(json!({
            "fields": ["ts_code", "trade_date", "close", "pct_chg"],
            "items": [["000001.SH", "20240506", 3140.72, 1.17]]
        }));
        let daily = index_daily_from(&t).unwrap();
        assert_eq!(daily.trade_date, "20240506");
        assert_eq!(daily.close, 3140.72);
        assert_eq!(daily.pct_chg, 1.17);

        assert!(index_daily_from(&TushareTable::default()).is_none());
    }

    #[test]
    fn test_north_money_converts_to_yi() {
        let t = table(json!({
            "fields": ["trade_date", "hgt", "sgt", "north_money"],
            "items": [["20240506", 2500.0, 1500.0, 4000.0]]
        }));
        let north = north_money_from(&t).unwrap();
        assert_eq!(north.north, 40.0);
        assert_eq!(north.sh, 25.0);
        assert_eq!(north.sz, 15.0);
        assert_eq!(north.ratio, None);

        assert!(north_money_from(&TushareTable::default()).is_none());
    }

    #[test]
    fn test_stock_basics_and_forecasts() {
        let basics = stock_basics_from(&table(json!({
            "fields": ["ts_code", "symbol", "name", "area", "industry", "list_date"],
            "items": [["000001.SZ", "000001", "平安银行", "深圳", "银行", "19910403"]]
        })));
        assert_eq!(
            basics,
            vec![StockBasic {
                code: "000001".to_string(),
                name: "平安银行".to_string(),
                industry: "银行".to_string(),
                area: "深圳".to_string(),
            }]
        );

        let forecasts = forecasts_from(&table(json!({
            "fields": ["ts_code", "ann_date", "type", "p_change_min", "p_change_max"],
            "items": [["000063.SZ", "20240415", "预增", 100.0, 150.5]]
        })));
        assert_eq!(forecasts[0].code, "000063.SZ");
        assert_eq!(forecasts[0].name, "000063.SZ");
        assert_eq!(forecasts[0].forecast_range, "100%-150.5%");
        assert_eq!(forecasts[0].publish_date, "20240415");
    }

    #[actix_web::test]
    async fn test_call_without_token_fails_fast() {
        let client = TushareClient::new(TushareConfig::default(), Client::new());
        let err = client.call("stock_basic", json!({}), "").await.unwrap_err();
        assert!(err.to_string().contains("Token"));
    }
}
