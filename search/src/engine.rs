use article_filter::{filter_by_facets, FilterState};
use utils_common::{Document, DocumentIndex};

use crate::config::SearchConfig;
use crate::fuzzy::{FuzzyMatcher, WeightedFuzzyMatcher};

/// 搜索查询 - 去除首尾空白后的输入文本，空字符串表示没有文本查询
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// 一次查询得到的结果条目，不会被缓存
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedResult<'a> {
    pub document: &'a Document,
    /// 只有文本匹配得到的结果才有得分
    pub score: Option<f64>,
}

/// 查询引擎 - 组合模糊匹配和筛选条件，得到有序且限长的结果
pub struct QueryEngine {
    matcher: Box<dyn FuzzyMatcher>,
    max_results: usize,
}

impl QueryEngine {
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_matcher(Box::new(WeightedFuzzyMatcher::from_config(config)), config.max_results)
    }

    pub fn with_matcher(matcher: Box<dyn FuzzyMatcher>, max_results: usize) -> Self {
        Self { matcher, max_results }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// 执行查询
    ///
    /// - 有查询文本时按模糊匹配的相关度排序
    /// - 没有查询文本但有筛选条件时按索引顺序返回全部文档
    /// - 两者都没有时返回空结果
    ///
    /// 之后依次应用标签和月份筛选，最后截断到 `max_results` 条。
    /// 索引尚未加载时返回空结果。
    pub fn evaluate<'a>(
        &self,
        query: &SearchQuery,
        filters: &FilterState,
        index: Option<&'a DocumentIndex>,
    ) -> Vec<RankedResult<'a>> {
        let Some(index) = index else {
            log::trace!("索引尚未就绪，返回空结果");
            return Vec::new();
        };

        let candidates: Vec<RankedResult<'a>> = if !query.is_empty() {
            self.matcher
                .search(query.as_str(), index.documents())
                .into_iter()
                .filter_map(|m| {
                    index.get(m.position).map(|document| RankedResult {
                        document,
                        score: Some(m.score),
                    })
                })
                .collect()
        } else if filters.has_filters() {
            index
                .iter()
                .map(|document| RankedResult { document, score: None })
                .collect()
        } else {
            return Vec::new();
        };

        let mut results = filter_by_facets(candidates, filters, |result| result.document);
        results.truncate(self.max_results);
        results
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::FuzzyMatch;

    fn titles(results: &[RankedResult<'_>]) -> Vec<String> {
        results.iter().map(|r| r.document.title.clone()).collect()
    }

    /// 按固定顺序返回指定位置的匹配器，用于验证引擎保留匹配器的顺序
    struct Fixed(Vec<usize>);

    impl FuzzyMatcher for Fixed {
        fn search(&self, _query: &str, documents: &[Document]) -> Vec<FuzzyMatch> {
            self.0
                .iter()
                .filter(|&&position| position < documents.len())
                .enumerate()
                .map(|(rank, &position)| FuzzyMatch { position, score: rank as f64 / 10.0 })
                .collect()
        }
    }

    fn index() -> DocumentIndex {
        DocumentIndex::new(vec![
            Document::new("Hello World", "https://blog.example/posts/202403/15/post/")
                .with_content("<p>the quick brown fox</p>")
                .with_tags(["go"]),
            Document::new("Rust ownership", "https://blog.example/posts/202402/rust/").with_tags(["rust"]),
            Document::new("About", "https://blog.example/about/").with_tags(["go"]),
        ])
    }

    #[test]
    fn not_loaded_index_yields_empty() {
        let engine = QueryEngine::default();
        let filters = FilterState::new().toggle_tag("go");
        assert!(engine.evaluate(&"fox".into(), &filters, None).is_empty());
        assert!(engine.evaluate(&"".into(), &filters, None).is_empty());
    }

    #[test]
    fn empty_query_without_filters_shows_nothing() {
        let engine = QueryEngine::default();
        let index = index();
        assert!(engine.evaluate(&"   ".into(), &FilterState::new(), Some(&index)).is_empty());
    }

    #[test]
    fn empty_query_with_filter_uses_index_order() {
        let engine = QueryEngine::default();
        let index = index();
        let results = engine.evaluate(&"".into(), &FilterState::new().toggle_tag("go"), Some(&index));
        assert_eq!(titles(&results), ["Hello World", "About"]);
        assert!(results.iter().all(|r| r.score.is_none()));
    }

    #[test]
    fn month_filter_applies_after_text_match() {
        let engine = QueryEngine::default();
        let index = index();
        let query = SearchQuery::new("fox");

        let all = engine.evaluate(&query, &FilterState::new(), Some(&index));
        assert_eq!(titles(&all), ["Hello World"]);
        assert!(all[0].score.is_some());

        let february = FilterState::new().toggle_month("2024-02");
        assert!(engine.evaluate(&query, &february, Some(&index)).is_empty());

        let march = FilterState::new().toggle_month("2024-03");
        assert_eq!(titles(&engine.evaluate(&query, &march, Some(&index))), ["Hello World"]);
    }

    #[test]
    fn matcher_order_is_preserved() {
        let engine = QueryEngine::with_matcher(Box::new(Fixed(vec![2, 0, 1])), 20);
        let index = index();
        let results = engine.evaluate(&"anything".into(), &FilterState::new(), Some(&index));
        assert_eq!(titles(&results), ["About", "Hello World", "Rust ownership"]);

        let go = FilterState::new().toggle_tag("go");
        let results = engine.evaluate(&"anything".into(), &go, Some(&index));
        assert_eq!(titles(&results), ["About", "Hello World"]);
    }

    #[test]
    fn results_are_capped() {
        let documents = (0..45)
            .map(|i| Document::new(format!("rust post {i}"), format!("/posts/2024{:02}/p{i}/", i % 12 + 1)).with_tags(["rust"]))
            .collect();
        let index = DocumentIndex::new(documents);
        let engine = QueryEngine::default();

        assert_eq!(engine.evaluate(&"rust".into(), &FilterState::new(), Some(&index)).len(), 20);
        let tagged = FilterState::new().toggle_tag("rust");
        assert_eq!(engine.evaluate(&"".into(), &tagged, Some(&index)).len(), 20);
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(SearchQuery::new("  fox \n").as_str(), "fox");
        assert!(SearchQuery::new(" \t ").is_empty());
    }
}
