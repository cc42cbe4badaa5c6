//! 新浪实时行情文本解码
//!
//! 接口返回形如
//! `var hq_str_s_sh000001="上证指数,3370.13,10.88,0.32,356153,4185516";`
//! 的语句，每个请求代码一条。解码只负责拆出代码和字段，
//! 字段保持原始文本，数值转换由调用方按品种类型完成。

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::models::QuoteRecord;

/// 解码错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteDecodeError {
    /// 语句中找不到代码或引号内容，批量解码时跳过
    #[error("无法解析的行情语句: {0}")]
    MalformedSegment(String),

    /// 整段文本没有任何可用记录（代码无效、已退市或接口无数据）
    #[error("行情数据为空")]
    NoData,
}

fn statement_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"hq_str_([^=\s"]+)\s*=\s*"([^"]*)""#).expect("行情语句正则无效")
    })
}

/// 按换行和引号外的分号拆分语句，丢弃空白段
fn split_statements(blob: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, ch) in blob.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            // 引号不会跨行，未闭合的引号在行尾结束
            '\n' | '\r' => {
                segments.push(&blob[start..i]);
                start = i + 1;
                in_quotes = false;
            }
            ';' if !in_quotes => {
                segments.push(&blob[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&blob[start..]);

    segments.retain(|s| !s.trim().is_empty());
    segments
}

/// 解码单条语句
///
/// 引号内容为空（`=""`）表示该代码无数据，返回 `Ok(None)`
fn decode_statement(segment: &str) -> Result<Option<QuoteRecord>, QuoteDecodeError> {
    let caps = statement_regex()
        .captures(segment)
        .ok_or_else(|| QuoteDecodeError::MalformedSegment(segment.trim().to_string()))?;

    let key = &caps[1];
    let payload = &caps[2];
    if payload.is_empty() {
        return Ok(None);
    }

    let fields = payload.split(',').map(str::to_string).collect();
    Ok(Some(QuoteRecord::new(key, fields)))
}

/// 解码全部语句
///
/// 按输入顺序逐条返回，同一代码出现多次也不合并。
/// 无法解析或无数据的语句被跳过，调用方需容忍部分结果。
pub fn decode_all(blob: &str) -> Vec<QuoteRecord> {
    let mut records = Vec::new();

    for segment in split_statements(blob) {
        match decode_statement(segment) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => log::debug!("行情语句无数据: {}", segment.trim()),
            Err(e) => log::debug!("跳过行情语句: {}", e),
        }
    }

    records
}

/// 解码全部语句，非空输入却没有任何记录时返回 `NoData`
///
/// 用于区分"接口没有返回可解析内容"与"部分代码失败"
pub fn decode_available(blob: &str) -> Result<Vec<QuoteRecord>, QuoteDecodeError> {
    let records = decode_all(blob);
    if records.is_empty() && !blob.trim().is_empty() {
        return Err(QuoteDecodeError::NoData);
    }
    Ok(records)
}

/// 解码单个代码的响应，返回第一条成功解码的记录
pub fn decode_single(blob: &str) -> Result<QuoteRecord, QuoteDecodeError> {
    split_statements(blob)
        .into_iter()
        .find_map(|segment| decode_statement(segment).ok().flatten())
        .ok_or(QuoteDecodeError::NoData)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SH_INDEX: &str =
        r#"var hq_str_s_sh000001="上证指数,3370.13,10.88,0.32,356153,4185516";"#;

    #[test]
    fn test_decode_index_statement() {
        let records = decode_all(SH_INDEX);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "s_sh000001");
        assert_eq!(
            records[0].fields,
            vec!["上证指数", "3370.13", "10.88", "0.32", "356153", "4185516"]
        );
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode_all("").is_empty());
        assert_eq!(decode_available(""), Ok(vec![]));
        assert_eq!(decode_available("  \n"), Ok(vec![]));
    }

    #[test]
    fn test_decode_keeps_order_and_field_counts() {
        let blob = concat!(
            "var hq_str_sh600000=\"浦发银行,8.50,8.44,8.56,8.60,8.40\";\n",
            "var hq_str_sz000001=\"平安银行,12.10,12.11,12.34\";\n",
            "var hq_str_sz300001=\"特锐德,26.00,26.01,25.67,26.10,25.50,,\";\n",
        );
        let records = decode_all(blob);

        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["sh600000", "sz000001", "sz300001"]);
        assert_eq!(records[0].fields.len(), 6);
        assert_eq!(records[1].fields.len(), 4);
        // 末尾空字段同样计数
        assert_eq!(records[2].fields.len(), 8);
    }

    #[test]
    fn test_decode_two_keys_without_cross_contamination() {
        let blob = concat!(
            "var hq_str_s_sz399001=\"深证成指,10234.50,-12.30,-0.12\";",
            "var hq_str_s_sz399006=\"创业板指,2034.11,5.20,0.26\";"
        );
        let records = decode_all(blob);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "s_sz399001");
        assert_eq!(records[0].fields, vec!["深证成指", "10234.50", "-12.30", "-0.12"]);
        assert_eq!(records[1].key, "s_sz399006");
        assert_eq!(records[1].fields, vec!["创业板指", "2034.11", "5.20", "0.26"]);
    }

    #[test]
    fn test_decode_skips_empty_payload() {
        let blob = format!("{}\nvar hq_str_sh999999=\"\";\n", SH_INDEX);
        let records = decode_all(&blob);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "s_sh000001");
    }

    #[test]
    fn test_decode_skips_malformed_segments() {
        let blob = concat!(
            "var hq_str_sh600000=\"浦发银行,8.50\n",
            "garbage without quotes;\n",
            "var hq_str_gb_0=\"a,b\"\r\n",
        );
        let records = decode_all(blob);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "gb_0");
        assert_eq!(records[0].fields, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_tolerates_missing_semicolon() {
        let records = decode_all("var hq_str_hf_XAU=\"2300.1,2290.5\"");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "hf_XAU");
    }

    #[test]
    fn test_semicolon_inside_quotes_is_not_a_separator() {
        let records = decode_all("var hq_str_x=\"a;b,c\";var hq_str_y=\"d\";");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields, vec!["a;b", "c"]);
        assert_eq!(records[1].fields, vec!["d"]);
    }

    #[test]
    fn test_duplicate_keys_are_not_merged() {
        let records = decode_all("var hq_str_a=\"1\";var hq_str_a=\"2\";");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields, vec!["1"]);
        assert_eq!(records[1].fields, vec!["2"]);
    }

    #[test]
    fn test_decode_available_reports_no_data() {
        assert_eq!(
            decode_available("var hq_str_sh999999=\"\";"),
            Err(QuoteDecodeError::NoData)
        );
        assert_eq!(decode_available(SH_INDEX).unwrap().len(), 1);
    }

    #[test]
    fn test_decode_single() {
        let record = decode_single(SH_INDEX).unwrap();
        assert_eq!(record.key, "s_sh000001");

        let blob = format!("var hq_str_sh999999=\"\";\n{}", SH_INDEX);
        assert_eq!(decode_single(&blob).unwrap().key, "s_sh000001");

        assert_eq!(decode_single(""), Err(QuoteDecodeError::NoData));
        assert_eq!(
            decode_single("var hq_str_sh999999=;"),
            Err(QuoteDecodeError::NoData)
        );
    }

    #[test]
    fn test_decode_is_idempotent() {
        let blob = format!("{}\nvar hq_str_sh600000=\"浦发银行,8.50\";", SH_INDEX);
        assert_eq!(decode_all(&blob), decode_all(&blob));
    }
}
