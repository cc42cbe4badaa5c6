//! 渲染层数字格式化

/// 千位分隔并保留固定小数位，无法解析时返回 `"0"`
///
/// `format_number("3231.414", 2)` → `"3,231.41"`
pub fn format_number(value: &str, decimals: usize) -> String {
    let Ok(number) = value.trim().parse::<f64>() else {
        return "0".to_string();
    };
    if !number.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.*}", decimals, number.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = number < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// 涨跌幅：正数带 `+`，保留两位小数
pub fn format_change(value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(v) if v > 0.0 => format!("+{:.2}%", v),
        Ok(v) if v.is_finite() => format!("{:.2}%", v),
        _ => "0%".to_string(),
    }
}

/// 成交量 / 成交额：亿、万两级单位
pub fn format_volume(value: f64) -> String {
    if value >= 100_000_000.0 {
        format!("{:.2}亿", value / 100_000_000.0)
    } else if value >= 10_000.0 {
        format!("{:.2}万", value / 10_000.0)
    } else {
        value.to_string()
    }
}
