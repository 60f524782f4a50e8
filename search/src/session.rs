use article_filter::{FacetCatalog, FilterState};
use utils_common::{DocumentIndex, IndexError, Locale};

use crate::config::SearchConfig;
use crate::engine::{QueryEngine, RankedResult, SearchQuery};
use crate::excerpt::ExcerptFormatter;
use crate::present::ResultView;

/// 索引加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum IndexState {
    /// 尚未加载完成
    Pending,
    Ready(DocumentIndex),
    /// 加载失败，本次页面生命周期内不再重试
    Failed(String),
}

/// 搜索会话 - 页面生命周期内的全部搜索状态
///
/// 查询文本和筛选条件都保存在这里，通过 [`SearchSession::results`] 统一求值。
pub struct SearchSession {
    config: SearchConfig,
    engine: QueryEngine,
    excerpts: ExcerptFormatter,
    index: IndexState,
    filters: FilterState,
    query: SearchQuery,
}

impl SearchSession {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            engine: QueryEngine::new(&config),
            excerpts: ExcerptFormatter::from_config(&config),
            config,
            index: IndexState::Pending,
            filters: FilterState::new(),
            query: SearchQuery::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 解析索引 JSON；失败时记录错误并进入失败状态
    pub fn load_index_json(&mut self, json: &str) -> Result<usize, IndexError> {
        match DocumentIndex::from_json(json) {
            Ok(index) => Ok(self.set_index(index)),
            Err(e) => {
                self.mark_index_failed(&e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_index(&mut self, index: DocumentIndex) -> usize {
        let count = index.len();
        log::info!("搜索索引已加载，文档数量: {}", count);
        self.index = IndexState::Ready(index);
        count
    }

    /// 标记索引加载失败，同一失败只记录一次
    pub fn mark_index_failed(&mut self, reason: &str) {
        if !matches!(self.index, IndexState::Failed(_)) {
            log::error!("加载搜索索引失败: {}", reason);
        }
        self.index = IndexState::Failed(reason.to_string());
    }

    pub fn index_state(&self) -> &IndexState {
        &self.index
    }

    pub fn index(&self) -> Option<&DocumentIndex> {
        match &self.index {
            IndexState::Ready(index) => Some(index),
            IndexState::Pending | IndexState::Failed(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.index().is_some()
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = SearchQuery::new(raw);
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.filters = self.filters.toggle_tag(tag);
    }

    pub fn toggle_month(&mut self, month: &str) {
        self.filters = self.filters.toggle_month(month);
    }

    pub fn clear_filters(&mut self) {
        self.filters = self.filters.clear_all();
    }

    /// 按当前查询和筛选条件求值
    pub fn results(&self) -> Vec<RankedResult<'_>> {
        self.engine.evaluate(&self.query, &self.filters, self.index())
    }

    /// 求值并生成渲染用的结果条目
    pub fn views(&self, locale: Locale) -> Vec<ResultView> {
        self.results()
            .iter()
            .map(|result| ResultView::new(result, &self.query, &self.excerpts, locale))
            .collect()
    }

    /// 索引中的全部筛选项，索引未就绪时为 `None`
    pub fn facets(&self) -> Option<FacetCatalog> {
        self.index().map(FacetCatalog::build)
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"[
        {"title":"Hello World","content":"<p>the quick brown fox</p>","summary":"","permalink":"https://blog.example/posts/202403/15/post/","tags":["go"]},
        {"title":"Second post","content":"nothing to see","permalink":"https://blog.example/posts/202402/second/","tags":["rust"]}
    ]"#;

    #[test]
    fn pending_session_returns_empty_results() {
        let mut session = SearchSession::default();
        session.set_query("fox");
        session.toggle_tag("go");
        assert!(!session.is_ready());
        assert!(session.results().is_empty());
        assert!(session.facets().is_none());
    }

    #[test]
    fn failed_load_keeps_empty_state() {
        let mut session = SearchSession::default();
        assert!(session.load_index_json("not json").is_err());
        assert!(matches!(session.index_state(), IndexState::Failed(_)));
        session.set_query("fox");
        assert!(session.results().is_empty());
    }

    #[test]
    fn facet_clicks_and_query_drive_results() {
        let mut session = SearchSession::default();
        assert_eq!(session.load_index_json(INDEX).unwrap(), 2);
        assert!(session.results().is_empty());

        session.toggle_tag("go");
        assert_eq!(session.results().len(), 1);

        session.toggle_tag("go");
        session.set_query("fox");
        let views = session.views(Locale::En);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].date_label, "Mar 15, 2024");
        assert!(views[0].excerpt_html.contains("<mark"));

        session.toggle_month("2024-02");
        assert!(session.results().is_empty());
        session.clear_filters();
        assert!(!session.filters().has_filters());
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn facets_available_once_loaded() {
        let mut session = SearchSession::default();
        session.load_index_json(INDEX).unwrap();
        let facets = session.facets().unwrap();
        assert_eq!(facets.tags.len(), 2);
        assert_eq!(facets.months.len(), 2);
    }
}
