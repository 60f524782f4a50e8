use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Document;

/// 索引加载错误
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("解析索引 JSON 失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("读取索引失败: {0}")]
    Io(#[from] io::Error),
}

/// 文档索引 - 页面生命周期内只加载一次，之后不再修改
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct DocumentIndex {
    documents: Vec<Document>,
}

impl DocumentIndex {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// 从站点生成器输出的 JSON 数组解析索引
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        let index: Self = serde_json::from_str(json)?;
        log::debug!("索引解析完成，文档数量: {}", index.len());
        Ok(index)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IndexError> {
        let index: Self = serde_json::from_reader(reader)?;
        log::debug!("索引读取完成，文档数量: {}", index.len());
        Ok(index)
    }

    /// 从本地文件加载索引
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl From<Vec<Document>> for DocumentIndex {
    fn from(documents: Vec<Document>) -> Self {
        Self::new(documents)
    }
}

impl<'a> IntoIterator for &'a DocumentIndex {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 搜索页相对站点语言根目录的索引地址
const RELATIVE_INDEX_PATH: &str = "../index.json";

/// 根据当前页面路径确定索引文件位置
///
/// 搜索页位于各语言根目录下一层，返回的相对地址由浏览器按当前页面解析：
/// `/en/search/` 得到 `/en/index.json`，`/search/` 得到 `/index.json`，
/// 站点部署在子路径下 (`/blog/en/search/`) 时同样指向该语言自己的索引。
pub fn resolve_index_path(pathname: &str) -> &'static str {
    let locale = crate::dates::Locale::detect(None, pathname);
    log::debug!("索引地址: {} (页面 {}, 语言 {})", RELATIVE_INDEX_PATH, pathname, locale);
    RELATIVE_INDEX_PATH
}
