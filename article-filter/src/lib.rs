//! 文章筛选 - 标签和月份两个维度的单选筛选

pub mod catalog;
pub mod facets;
pub mod state;

pub use catalog::{FacetCatalog, FacetCount};
pub use facets::{filter_by_facets, has_tag, in_month, matches_facets};
pub use state::FilterState;
