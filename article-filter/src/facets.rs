use utils_common::{extract_month, extract_tags, Document};

use crate::state::FilterState;

/// 文档是否带有指定标签 (区分大小写的精确匹配)
pub fn has_tag(document: &Document, tag: &str) -> bool {
    extract_tags(document).iter().any(|t| t == tag)
}

/// 文档是否发布于指定月份，永久链接中没有日期的文档不属于任何月份
pub fn in_month(document: &Document, month: &str) -> bool {
    extract_month(&document.permalink).as_deref() == Some(month)
}

/// 文档是否满足当前所有筛选条件
pub fn matches_facets(document: &Document, filters: &FilterState) -> bool {
    filters.selected_tag().map_or(true, |tag| has_tag(document, tag))
        && filters.selected_month().map_or(true, |month| in_month(document, month))
}

/// 按筛选条件过滤候选结果，先按标签再按月份，保持原有顺序
pub fn filter_by_facets<T, F>(mut items: Vec<T>, filters: &FilterState, document: F) -> Vec<T>
where
    F: Fn(&T) -> &Document,
{
    if let Some(tag) = filters.selected_tag() {
        items.retain(|item| has_tag(document(item), tag));
    }

    if let Some(month) = filters.selected_month() {
        items.retain(|item| in_month(document(item), month));
    }

    items
}
