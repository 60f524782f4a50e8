use serde::{Deserialize, Deserializer, Serialize};

/// 文档 - 站点生成器输出的索引条目，加载后只读
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// 文章标题
    pub title: String,
    /// 文章正文，可能包含 HTML 标记
    #[serde(default)]
    pub content: String,
    /// 文章摘要
    #[serde(default)]
    pub summary: String,
    /// 永久链接，路径中编码了发布日期 (YYYYMM 或 YYYYMMDD)
    #[serde(default)]
    pub permalink: String,
    /// 文章标签列表，保持原始顺序
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Document {
    /// 创建只有标题和链接的文档，其余字段留空
    pub fn new(title: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            permalink: permalink.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// 返回文档的标签列表，原样返回，不做大小写或空白处理
pub fn extract_tags(document: &Document) -> &[String] {
    &document.tags
}

// Hugo 在没有标签时会输出 null
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
