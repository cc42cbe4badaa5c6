//! 行情记录模型
//!
//! 新浪实时行情接口每条 `var hq_str_<key>="...";` 语句解码后的结构

use serde::{Deserialize, Serialize};

/// 单条行情记录
///
/// 字段保持接口返回的原始文本和顺序，不做数值转换；
/// 各偏移量的含义由调用方按品种类型（指数 / 个股）解释。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// 品种代码，如 `s_sh000001`
    pub key: String,
    /// 按原始顺序排列的字段
    pub fields: Vec<String>,
}

impl QuoteRecord {
    pub fn new(key: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    /// 按下标取字段
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// 按下标取字段并解析为浮点数，缺失或非数字时返回 `None`
    pub fn number(&self, index: usize) -> Option<f64> {
        self.field(index).and_then(|v| v.trim().parse::<f64>().ok())
    }
}

/// 在解码结果中查找指定代码的第一条记录
///
/// 接口返回顺序不一定与请求顺序一致，调用方应始终按代码查找。
pub fn find_record<'a>(records: &'a [QuoteRecord], key: &str) -> Option<&'a QuoteRecord> {
    records.iter().find(|r| r.key == key)
}

/// 实时行情查询参数
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    /// 逗号分隔的品种代码列表
    pub list: String,
}

impl QuoteQuery {
    /// 拆分出非空的品种代码
    pub fn keys(&self) -> Vec<String> {
        self.list
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}
