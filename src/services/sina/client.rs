//! 新浪财经实时行情接口
//!
//! 对接 https://hq.sinajs.cn/list=<codes>，响应为 GBK 编码文本

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use url::Url;

use super::decoder::{decode_all, decode_available, decode_single};
use crate::config::SinaConfig;
use crate::models::{find_record, IndexQuote, QuoteRecord, StockSnapshot};
use crate::services::common::{BROWSER_USER_AGENT, SINA_REFERER};

/// 新浪行情客户端
pub struct SinaClient {
    client: Client,
    base_url: String,
}

impl SinaClient {
    pub fn new(config: &SinaConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 构造批量行情请求地址
    pub fn list_url(&self, keys: &[String]) -> Result<Url> {
        if keys.is_empty() {
            return Err(anyhow!("未指定行情代码"));
        }
        let raw = format!("{}/list={}", self.base_url, keys.join(","));
        Url::parse(&raw).with_context(|| format!("无效的行情地址: {}", raw))
    }

    /// 获取原始行情文本（已从 GBK 转为 UTF-8）
    pub async fn fetch_blob(&self, keys: &[String]) -> Result<String> {
        let url = self.list_url(keys)?;
        log::debug!("请求新浪行情 URL: {}", url);

        let response = self
            .client
            .get(url)
            .header("Referer", SINA_REFERER)
            .header("User-Agent", BROWSER_USER_AGENT)
            .send()
            .await
            .with_context(|| format!("请求新浪行情 {} 失败", keys.join(",")))?;

        if !response.status().is_success() {
            return Err(anyhow!("获取新浪行情失败: {}", response.status()));
        }

        let bytes = response.bytes().await?;
        Ok(encoding_rs::GBK.decode(&bytes).0.into_owned())
    }

    /// 获取多个代码的行情记录，没有任何可用记录时报错
    pub async fn get_quotes(&self, keys: &[String]) -> Result<Vec<QuoteRecord>> {
        let blob = self.fetch_blob(keys).await?;
        let records = decode_available(&blob)?;
        for key in keys {
            if find_record(&records, key).is_none() {
                log::warn!("代码 {} 无行情数据", key);
            }
        }
        Ok(records)
    }

    /// 获取指数简要行情，如 `s_sh000001`
    pub async fn get_index(&self, key: &str) -> Result<IndexQuote> {
        let blob = self.fetch_blob(&[key.to_string()]).await?;
        let record = decode_single(&blob).with_context(|| format!("无法解析指数 {} 数据", key))?;
        Ok(index_quote_from(&record))
    }

    /// 获取个股快照，字段不足的记录被跳过
    pub async fn get_snapshots(&self, keys: &[String]) -> Result<Vec<StockSnapshot>> {
        let blob = self.fetch_blob(keys).await?;
        Ok(decode_all(&blob).iter().filter_map(snapshot_from).collect())
    }

    /// 获取单个代码的原始字段，用于核对接口字段含义
    pub async fn probe(&self, key: &str) -> Result<Vec<String>> {
        let blob = self.fetch_blob(&[key.to_string()]).await?;
        log::info!("新浪接口响应: {}", blob.trim());
        let record = decode_single(&blob).with_context(|| format!("代码 {} 无数据", key))?;
        Ok(record.fields)
    }
}

/// 指数简要行情字段：名称、最新点位、涨跌额、涨跌幅
pub fn index_quote_from(record: &QuoteRecord) -> IndexQuote {
    let text = |i: usize| record.field(i).unwrap_or_default().to_string();
    IndexQuote {
        name: text(0),
        point: text(1),
        change: text(2),
        change_rate: text(3),
    }
}

/// 个股完整行情：字段 2 为昨收，字段 3 为当前价
pub fn snapshot_from(record: &QuoteRecord) -> Option<StockSnapshot> {
    if record.fields.len() < 4 {
        log::debug!("{} 行情字段不足: {}", record.key, record.fields.len());
        return None;
    }

    let price = record.number(3).unwrap_or(0.0);
    let prev_close = record.number(2).unwrap_or(0.0);
    let change = if prev_close > 0.0 { price - prev_close } else { 0.0 };
    let change_rate = if prev_close > 0.0 { change / prev_close * 100.0 } else { 0.0 };

    Some(StockSnapshot {
        code: record.key.clone(),
        name: record.fields[0].clone(),
        price: format!("{:.2}", price),
        change: format!("{:.2}", change),
        change_rate: format!("{:.2}", change_rate),
    })
}
