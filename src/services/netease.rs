//! 网易财经板块排行
//!
//! 对接 https://quotes.money.163.com/hs/service/diyrank.php

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;

use crate::config::NeteaseConfig;
use crate::models::SectorRank;

/// 板块排行取前几名
pub const SECTOR_TOP_N: usize = 5;

pub struct NeteaseClient {
    client: Client,
    base_url: String,
}

impl NeteaseClient {
    pub fn new(config: &NeteaseConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 行业板块涨幅榜
    pub async fn sector_ranks(&self) -> Result<Vec<SectorRank>> {
        let url = format!("{}/hs/service/diyrank.php", self.base_url);
        log::debug!("请求板块排行 URL: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("query", "PLATE_ID:1")])
            .send()
            .await
            .context("请求网易板块排行失败")?;

        if !response.status().is_success() {
            return Err(anyhow!("获取板块排行失败: {}", response.status()));
        }

        let json_data: Value = response.json().await?;
        parse_sector_ranks(&json_data)
    }
}

/// 解析 `{list: [{SNAME, CHANGEPERCENT}, ...]}`，保留前 [`SECTOR_TOP_N`] 个
pub fn parse_sector_ranks(json_data: &Value) -> Result<Vec<SectorRank>> {
    let list = json_data["list"]
        .as_array()
        .ok_or_else(|| anyhow!("板块排行缺少 list 字段"))?;

    Ok(list
        .iter()
        .take(SECTOR_TOP_N)
        .map(|item| SectorRank {
            name: item["SNAME"].as_str().unwrap_or("").to_string(),
            rise: match &item["CHANGEPERCENT"] {
                Value::Number(n) => n.as_f64().unwrap_or(0.0),
                Value::String(s) => s.parse().unwrap_or(0.0),
                _ => 0.0,
            },
        })
        .collect())
}
