use serde::Serialize;
use utils_common::{extract_tags, format_date, Locale};

use crate::engine::{RankedResult, SearchQuery};
use crate::excerpt::ExcerptFormatter;

/// 结果卡片中最多展示的标签数量
pub const BADGE_TAG_LIMIT: usize = 2;

/// 渲染用的结果条目，HTML 组装由宿主页面完成
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResultView {
    /// 高亮后的标题
    pub title_html: String,
    pub permalink: String,
    /// 永久链接的路径部分
    pub path: String,
    /// 高亮后的摘要
    pub excerpt_html: String,
    /// 按语言格式化的发布日期，链接中没有日期时为空
    pub date_label: String,
    pub tags: Vec<String>,
    pub score: Option<f64>,
}

impl ResultView {
    pub fn new(result: &RankedResult<'_>, query: &SearchQuery, excerpts: &ExcerptFormatter, locale: Locale) -> Self {
        let document = result.document;
        Self {
            title_html: excerpts.highlighter().highlight(&document.title, query.as_str()),
            permalink: document.permalink.clone(),
            path: permalink_path(&document.permalink).to_string(),
            excerpt_html: excerpts.format(&document.content, query.as_str()),
            date_label: format_date(&document.permalink, locale),
            tags: extract_tags(document).iter().take(BADGE_TAG_LIMIT).cloned().collect(),
            score: result.score,
        }
    }
}

/// 提取链接的路径部分，去掉协议、主机、查询串和片段
pub fn permalink_path(permalink: &str) -> &str {
    let without_suffix = permalink
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    match without_suffix.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |slash| &rest[slash..]),
        None => without_suffix,
    }
}
