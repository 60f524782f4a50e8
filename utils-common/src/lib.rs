pub mod dates;
pub mod index;
pub mod models;
pub mod text;

// 重新导出常用类型和函数，方便直接使用
pub use dates::{extract_month, format_date, format_month, Locale, PermalinkDate};
pub use index::{resolve_index_path, DocumentIndex, IndexError};
pub use models::{extract_tags, Document};
pub use text::{folded_chars, normalize_text};
