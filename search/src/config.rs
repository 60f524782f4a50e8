use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("解析搜索配置失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("搜索配置无效: {0}")]
    Invalid(String),
}

/// 字段权重，标题最高，正文和摘要相同
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FieldWeights {
    pub title: f64,
    pub content: f64,
    pub summary: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 2.0,
            content: 1.0,
            summary: 1.0,
        }
    }
}

impl FieldWeights {
    pub fn total(&self) -> f64 {
        self.title + self.content + self.summary
    }
}

/// 搜索配置，所有字段都有默认值
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// 模糊匹配阈值，0 表示精确匹配，1 表示匹配任何内容
    pub threshold: f64,
    pub weights: FieldWeights,
    /// 最多返回的结果数
    pub max_results: usize,
    /// 摘要长度 (字符数)
    pub excerpt_length: usize,
    /// 摘要边界对齐到单词边界时允许移动的最大字符数
    pub word_snap_tolerance: usize,
    /// 输入防抖时间 (毫秒)
    pub debounce_ms: u64,
    pub highlight_open: String,
    pub highlight_close: String,
    pub ellipsis: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            weights: FieldWeights::default(),
            max_results: 20,
            excerpt_length: 120,
            word_snap_tolerance: 20,
            debounce_ms: 600,
            highlight_open: r#"<mark class="bg-yellow-200 px-1">"#.to_string(),
            highlight_close: "</mark>".to_string(),
            ellipsis: "...".to_string(),
        }
    }
}

impl SearchConfig {
    /// 从 JSON 解析配置，缺失字段使用默认值
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Invalid(format!(
                "threshold 必须在 0 到 1 之间，当前为 {}",
                self.threshold
            )));
        }

        let weights = [self.weights.title, self.weights.content, self.weights.summary];
        if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(ConfigError::Invalid("字段权重必须为正数".to_string()));
        }

        if self.max_results == 0 {
            return Err(ConfigError::Invalid("max_results 不能为 0".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_behaviour() {
        let config = SearchConfig::default();
        assert_eq!(config.threshold, 0.4);
        assert_eq!(config.max_results, 20);
        assert_eq!(config.excerpt_length, 120);
        assert_eq!(config.debounce_ms, 600);
        assert!(config.weights.title > config.weights.content);
        assert_eq!(config.weights.content, config.weights.summary);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SearchConfig::from_json(r#"{"threshold":0.2,"weights":{"title":3.0}}"#).unwrap();
        assert_eq!(config.threshold, 0.2);
        assert_eq!(config.weights.title, 3.0);
        assert_eq!(config.weights.content, 1.0);
        assert_eq!(config.max_results, 20);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = SearchConfig::from_json(r#"{"threshold":1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_weights() {
        let err = SearchConfig::from_json(r#"{"weights":{"summary":0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SearchConfig::from_json("{threshold").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
