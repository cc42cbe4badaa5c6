//! 公共常量和辅助函数

use anyhow::Result;
use reqwest::Client;

use crate::config::ApiConfig;
use crate::models::get_beijing_time;

/// 模拟浏览器的 User-Agent，新浪接口会拒绝缺少该头的请求
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
/// 新浪接口要求的 Referer
pub const SINA_REFERER: &str = "https://finance.sina.com.cn/";

/// 按配置的超时时间构建 HTTP 客户端
pub fn build_client(api: &ApiConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(api.timeout())
        .connect_timeout(api.connect_timeout())
        .build()?;
    Ok(client)
}

/// 北京时间日期，如 `2024-05-06`
pub fn beijing_date() -> String {
    get_beijing_time().format("%Y-%m-%d").to_string()
}

/// 北京时间紧凑日期，Tushare 参数格式 `20240506`
pub fn beijing_trade_date() -> String {
    get_beijing_time().format("%Y%m%d").to_string()
}

/// 北京时间，如 `2024-05-06 15:00:00`
pub fn beijing_datetime() -> String {
    get_beijing_time().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formats() {
        let date = beijing_date();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");

        let trade_date = beijing_trade_date();
        assert_eq!(trade_date.len(), 8);
        assert!(trade_date.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(beijing_datetime().len(), 19);
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(&ApiConfig::default()).is_ok());
    }
}
