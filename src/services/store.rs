//! 数据目录读写
//!
//! 采集结果以带缩进的 JSON 文件保存在数据目录下，渲染层再读取

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 新浪市场快照文件
pub const SINA_MARKET_FILE: &str = "sina-market-data.json";
/// 每日大盘汇总文件
pub const DAILY_MARKET_FILE: &str = "market-data.json";
/// 股票基本信息文件
pub const STOCK_BASIC_FILE: &str = "stock-basic.json";

#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// 写入 JSON 文件，目录不存在时自动创建；返回文件路径
    pub async fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("创建数据目录 {} 失败", self.dir.display()))?;

        let path = self.path(name);
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("写入 {} 失败", path.display()))?;

        log::info!("数据已保存到 {}", path.display());
        Ok(path)
    }

    pub async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.path(name);
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("读取 {} 失败", path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("解析 {} 失败", path.display()))?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[actix_web::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let store = DataStore::new(dir.path().join("nested").join("data"));

        let value = json!({"index": 3370.13, "change": 10.88});
        let path = store.write_json("quote.json", &value).await.unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"change\""), "应为缩进格式: {}", content);

        let back: serde_json::Value = store.read_json("quote.json").await.unwrap();
        assert_eq!(back, value);
    }

    #[actix_web::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let store = DataStore::new(dir.path());
        let result: Result<serde_json::Value> = store.read_json(SINA_MARKET_FILE).await;
        assert!(result.is_err());
    }
}
