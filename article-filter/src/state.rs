use serde::{Deserialize, Serialize};

/// 筛选状态 - 当前选中的标签和月份
///
/// 每个维度最多选中一个值，两个维度互相独立。所有变更都返回新的状态。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    /// 选中的标签
    #[serde(default)]
    selected_tag: Option<String>,
    /// 选中的月份 (格式：yyyy-mm)
    #[serde(default)]
    selected_month: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    pub fn selected_month(&self) -> Option<&str> {
        self.selected_month.as_deref()
    }

    /// 切换标签：再次点击同一标签取消选择，点击其他标签替换选择
    #[must_use]
    pub fn toggle_tag(&self, tag: &str) -> Self {
        Self {
            selected_tag: toggled(&self.selected_tag, tag),
            selected_month: self.selected_month.clone(),
        }
    }

    /// 切换月份，规则与标签相同
    #[must_use]
    pub fn toggle_month(&self, month: &str) -> Self {
        Self {
            selected_tag: self.selected_tag.clone(),
            selected_month: toggled(&self.selected_month, month),
        }
    }

    /// 清除全部筛选条件
    #[must_use]
    pub fn clear_all(&self) -> Self {
        Self::default()
    }

    /// 是否有任何筛选条件生效，用于控制"清除筛选"按钮的显示
    pub fn has_filters(&self) -> bool {
        self.selected_tag.is_some() || self.selected_month.is_some()
    }

    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.selected_tag() == Some(tag)
    }

    pub fn is_month_selected(&self, month: &str) -> bool {
        self.selected_month() == Some(month)
    }
}

fn toggled(current: &Option<String>, value: &str) -> Option<String> {
    match current {
        Some(selected) if selected == value => None,
        _ => Some(value.to_string()),
    }
}
