//! 新浪财经数据源
//!
//! - decoder: 实时行情文本解码
//! - client: 行情请求及字段映射

pub mod client;
pub mod decoder;

pub use client::SinaClient;
pub use decoder::QuoteDecodeError;
