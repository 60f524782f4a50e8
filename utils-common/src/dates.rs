use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// 前 6 位连续数字为年月，紧随其后 (可隔一个 `/`) 的 2 位数字为日
static PERMALINK_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})(\d{2})(?:/?(\d{2}))?").expect("permalink 日期正则无效"));

/// 页面语言，只支持英文和日文两种
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Ja,
}

impl Locale {
    /// 根据页面语言属性或 URL 路径判断语言
    pub fn detect(lang: Option<&str>, pathname: &str) -> Self {
        if lang == Some("en") || pathname.contains("/en/") {
            Locale::En
        } else {
            Locale::Ja
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ja" => Ok(Locale::Ja),
            other => Err(format!("不支持的语言: {}", other)),
        }
    }
}

/// 从永久链接中解析出的发布日期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermalinkDate {
    pub year: i32,
    pub month: u32,
    /// 只有链接中编码了日期时才存在
    pub day: Option<u32>,
}

impl PermalinkDate {
    pub fn parse(permalink: &str) -> Option<Self> {
        let caps = PERMALINK_DATE.captures(permalink)?;
        let year = caps.get(1)?.as_str().parse().ok()?;
        let month = caps.get(2)?.as_str().parse().ok()?;
        let day = caps.get(3).and_then(|m| m.as_str().parse().ok());
        Some(Self { year, month, day })
    }

    /// 年月键，格式为 `YYYY-MM`
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day.unwrap_or(1))
    }
}

/// 提取永久链接中的年月 (`YYYY-MM`)
///
/// 只做字符串解析，不校验月份范围；链接中没有日期时返回 `None`。
pub fn extract_month(permalink: &str) -> Option<String> {
    PermalinkDate::parse(permalink).map(|date| date.month_key())
}

/// 按语言格式化永久链接中的日期
///
/// 英文: 有日期时 `Mar 15, 2024`，否则 `March 2024`。
/// 日文: `2024年3月15日` 或 `2024年3月`。
/// 链接中没有日期或日期不合法时返回空字符串。
pub fn format_date(permalink: &str, locale: Locale) -> String {
    let Some(date) = PermalinkDate::parse(permalink) else {
        return String::new();
    };
    let Some(naive) = date.to_naive() else {
        log::debug!("永久链接中的日期不合法: {}", permalink);
        return String::new();
    };

    match (locale, date.day) {
        (Locale::En, Some(_)) => naive.format("%b %-d, %Y").to_string(),
        (Locale::En, None) => naive.format("%B %Y").to_string(),
        (Locale::Ja, Some(day)) => format!("{}年{}月{}日", date.year, date.month, day),
        (Locale::Ja, None) => format!("{}年{}月", date.year, date.month),
    }
}

/// 格式化月份筛选项的标签，输入为 `YYYY-MM`
///
/// 无法解析时原样返回。
pub fn format_month(month: &str, locale: Locale) -> String {
    let parsed = month.split_once('-').and_then(|(year, month)| {
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, 1).map(|date| (year, month, date))
    });

    match (parsed, locale) {
        (Some((_, _, date)), Locale::En) => date.format("%B %Y").to_string(),
        (Some((year, month, _)), Locale::Ja) => format!("{}年{}月", year, month),
        (None, _) => month.to_string(),
    }
}
