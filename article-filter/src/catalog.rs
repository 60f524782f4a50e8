use serde::Serialize;
use std::collections::HashMap;
use utils_common::{extract_month, extract_tags, DocumentIndex};

/// 筛选项及其文章数量
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// 筛选项目录 - 索引中出现过的全部标签和月份
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetCatalog {
    /// 按文章数量降序，数量相同时按名称排序
    pub tags: Vec<FacetCount>,
    /// 按月份从新到旧排序
    pub months: Vec<FacetCount>,
}

impl FacetCatalog {
    /// 从文档索引构建筛选项目录
    pub fn build(index: &DocumentIndex) -> Self {
        let mut tag_counts: HashMap<&str, usize> = HashMap::new();
        let mut month_counts: HashMap<String, usize> = HashMap::new();
        let mut undated = 0;

        for document in index {
            for tag in extract_tags(document) {
                *tag_counts.entry(tag.as_str()).or_insert(0) += 1;
            }

            match extract_month(&document.permalink) {
                Some(month) => *month_counts.entry(month).or_insert(0) += 1,
                None => undated += 1,
            }
        }

        if undated > 0 {
            log::debug!("{} 篇文章的链接中没有日期，不参与月份筛选", undated);
        }

        let mut tags: Vec<FacetCount> = tag_counts
            .into_iter()
            .map(|(value, count)| FacetCount { value: value.to_string(), count })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

        let mut months: Vec<FacetCount> = month_counts
            .into_iter()
            .map(|(value, count)| FacetCount { value, count })
            .collect();
        months.sort_by(|a, b| b.value.cmp(&a.value));

        log::debug!("筛选项目录构建完成，标签数量: {}, 月份数量: {}", tags.len(), months.len());

        Self { tags, months }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.months.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use utils_common::Document;

    fn count(value: &str, count: usize) -> FacetCount {
        FacetCount { value: value.to_string(), count }
    }

    #[test]
    fn counts_tags_and_months() {
        let index = DocumentIndex::new(vec![
            Document::new("a", "/posts/202403/15/a/").with_tags(["go", "web"]),
            Document::new("b", "/posts/202402/b/").with_tags(["go"]),
            Document::new("c", "/about/").with_tags(["rust"]),
            Document::new("d", "/posts/202403/d/"),
        ]);

        let catalog = FacetCatalog::build(&index);
        assert_eq!(catalog.tags, vec![count("go", 2), count("rust", 1), count("web", 1)]);
        assert_eq!(catalog.months, vec![count("2024-03", 2), count("2024-02", 1)]);
    }

    #[test]
    fn empty_index_has_empty_catalog() {
        let catalog = FacetCatalog::build(&DocumentIndex::default());
        assert!(catalog.is_empty());
    }
}
