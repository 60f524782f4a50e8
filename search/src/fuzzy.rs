use utils_common::{folded_chars, normalize_text, Document};

use crate::config::{FieldWeights, SearchConfig};

/// 完全匹配时使用的得分，避免加权时出现 0
const EXACT_SCORE: f64 = f64::EPSILON;

/// 一条模糊匹配结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    /// 文档在索引中的位置
    pub position: usize,
    /// 匹配得分，0 表示完全匹配，越小越相关
    pub score: f64,
}

/// 模糊匹配能力
///
/// 返回的结果必须按相关度从高到低排列，相关度相同时保持索引顺序。
pub trait FuzzyMatcher {
    fn search(&self, query: &str, documents: &[Document]) -> Vec<FuzzyMatch>;
}

/// 默认的加权模糊匹配
///
/// 每个字段计算查询与字段中任意子串的最小编辑距离，除以查询长度得到字段得分；
/// 字段得分不超过阈值即视为命中。文档得分为命中字段得分按权重加权的乘积。
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedFuzzyMatcher {
    threshold: f64,
    weights: FieldWeights,
}

impl WeightedFuzzyMatcher {
    pub fn new(threshold: f64, weights: FieldWeights) -> Self {
        Self { threshold, weights }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.threshold, config.weights)
    }

    fn score_document(&self, pattern: &[char], document: &Document) -> Option<f64> {
        let total = self.weights.total();
        // 只有正文带 HTML 标记，标题和摘要按原文匹配
        let content = normalize_text(&document.content);
        let fields = [
            (document.title.as_str(), self.weights.title),
            (content.as_str(), self.weights.content),
            (document.summary.as_str(), self.weights.summary),
        ];

        let mut score = 1.0;
        let mut matched = false;

        for (field, weight) in fields {
            if field.is_empty() {
                continue;
            }
            let text = folded_chars(field);
            let field_score = min_substring_distance(pattern, &text) as f64 / pattern.len() as f64;
            if field_score <= self.threshold {
                matched = true;
                score *= field_score.max(EXACT_SCORE).powf(weight / total);
            }
        }

        matched.then_some(score)
    }
}

impl Default for WeightedFuzzyMatcher {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl FuzzyMatcher for WeightedFuzzyMatcher {
    fn search(&self, query: &str, documents: &[Document]) -> Vec<FuzzyMatch> {
        let pattern = folded_chars(query);
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<FuzzyMatch> = documents
            .iter()
            .enumerate()
            .filter_map(|(position, document)| {
                self.score_document(&pattern, document)
                    .map(|score| FuzzyMatch { position, score })
            })
            .collect();

        // 稳定排序，得分相同的保持索引顺序
        matches.sort_by(|a, b| a.score.total_cmp(&b.score));

        log::debug!("模糊匹配 \"{}\": 命中 {} / {} 篇", query, matches.len(), documents.len());
        matches
    }
}

/// 计算模式与文本任意子串之间的最小编辑距离
fn min_substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    // column[i] 为模式前 i 个字符与以当前位置结尾的某个子串之间的最小编辑距离
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = m;

    for &c in text {
        let mut diagonal = column[0];
        for i in 1..=m {
            let above = column[i];
            let cost = if pattern[i - 1] == c { 0 } else { 1 };
            column[i] = (diagonal + cost).min(above + 1).min(column[i - 1] + 1);
            diagonal = above;
        }
        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }

    best
}
