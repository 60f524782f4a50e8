use regex::{Captures, Regex, RegexBuilder};
use utils_common::normalize_text;

use crate::config::SearchConfig;

/// 高亮标记
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Highlighter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// 用高亮标记包裹文本中所有与查询匹配的部分 (不区分大小写)
    ///
    /// 查询中的正则元字符按普通字符处理。
    pub fn highlight(&self, text: &str, query: &str) -> String {
        if text.is_empty() || query.is_empty() {
            return text.to_string();
        }

        let Some(pattern) = literal_pattern(query) else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures| {
                format!("{}{}{}", self.open, &caps[0], self.close)
            })
            .into_owned()
    }
}

/// 摘要生成器 - 截取以首个匹配为中心的定长摘要并高亮
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcerptFormatter {
    max_length: usize,
    snap_tolerance: usize,
    ellipsis: String,
    highlighter: Highlighter,
}

impl ExcerptFormatter {
    pub fn new(max_length: usize, snap_tolerance: usize, ellipsis: impl Into<String>, highlighter: Highlighter) -> Self {
        Self {
            max_length,
            snap_tolerance,
            ellipsis: ellipsis.into(),
            highlighter,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            config.excerpt_length,
            config.word_snap_tolerance,
            config.ellipsis.clone(),
            Highlighter::new(config.highlight_open.clone(), config.highlight_close.clone()),
        )
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// 生成摘要
    pub fn format(&self, content: &str, query: &str) -> String {
        let normalized = normalize_text(content);
        let text: Vec<char> = normalized.chars().collect();

        if query.is_empty() {
            return self.lead(&text, None);
        }

        // 定位与高亮使用同一个模式，保证窗口中心的匹配一定会被标记
        let Some((position, match_len)) = first_match(&normalized, query) else {
            return self.lead(&text, Some(query));
        };

        let (start, end) = self.window(position, match_len, text.len());
        let (start, end) = self.snap_to_words(&text, start, end);

        let body: String = text[start..end].iter().collect();
        let mut excerpt = String::with_capacity(body.len() + self.ellipsis.len() * 2);
        if start > 0 {
            excerpt.push_str(&self.ellipsis);
        }
        excerpt.push_str(&self.highlighter.highlight(&body, query));
        if end < text.len() {
            excerpt.push_str(&self.ellipsis);
        }
        excerpt
    }

    // 开头的 max_length 个字符
    fn lead(&self, text: &[char], query: Option<&str>) -> String {
        let end = self.max_length.min(text.len());
        let body: String = text[..end].iter().collect();
        let mut excerpt = match query {
            Some(query) => self.highlighter.highlight(&body, query),
            None => body,
        };
        if text.len() > self.max_length {
            excerpt.push_str(&self.ellipsis);
        }
        excerpt
    }

    // 以匹配为中心的窗口；碰到文本边界时整体平移，保持总长度
    fn window(&self, position: usize, query_len: usize, len: usize) -> (usize, usize) {
        let half = self.max_length.saturating_sub(query_len) / 2;
        let mut start = position.saturating_sub(half);
        let mut end = (position + query_len + half).min(len);

        if start == 0 {
            end = self.max_length.min(len);
        } else if end == len {
            start = len.saturating_sub(self.max_length);
        }

        (start, end)
    }

    // 边界向外扩展到最近的空格，超出容差时保持原位置
    fn snap_to_words(&self, text: &[char], start: usize, end: usize) -> (usize, usize) {
        let mut start = start;
        let mut end = end;

        if start > 0 && text[start - 1] != ' ' {
            if let Some(space) = text[..start].iter().rposition(|&c| c == ' ') {
                if start - (space + 1) <= self.snap_tolerance {
                    start = space + 1;
                }
            }
        }

        if end < text.len() && text[end] != ' ' {
            if let Some(offset) = text[end..].iter().position(|&c| c == ' ') {
                if offset <= self.snap_tolerance {
                    end += offset;
                }
            }
        }

        // 不以空格开头或结尾
        if start < end && text[start] == ' ' {
            start += 1;
        }
        if start < end && text[end - 1] == ' ' {
            end -= 1;
        }

        (start, end)
    }
}

impl Default for ExcerptFormatter {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

// 转义后的不区分大小写模式
fn literal_pattern(query: &str) -> Option<Regex> {
    match RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            log::debug!("无法构建匹配模式，保留原文: {}", e);
            None
        }
    }
}

// 首个匹配的字符位置和字符长度
fn first_match(text: &str, query: &str) -> Option<(usize, usize)> {
    let found = literal_pattern(query)?.find(text)?;
    let position = text[..found.start()].chars().count();
    Some((position, found.as_str().chars().count()))
}
