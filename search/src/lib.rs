use wasm_bindgen::prelude::*;
use web_sys::console;

use utils_common::{format_month, resolve_index_path, Locale};

pub mod config;
pub mod debounce;
pub mod engine;
pub mod excerpt;
pub mod fuzzy;
pub mod present;
pub mod session;

pub use config::{ConfigError, FieldWeights, SearchConfig};
pub use debounce::Debouncer;
pub use engine::{QueryEngine, RankedResult, SearchQuery};
pub use excerpt::{ExcerptFormatter, Highlighter};
pub use fuzzy::{FuzzyMatch, FuzzyMatcher, WeightedFuzzyMatcher};
pub use present::{permalink_path, ResultView};
pub use session::{IndexState, SearchSession};

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 搜索组件 JS 接口 - 页面持有一个实例，所有状态都保存在实例中
#[wasm_bindgen]
pub struct SearchWidget {
    session: SearchSession,
    debouncer: Debouncer,
}

#[wasm_bindgen]
impl SearchWidget {
    /// 创建搜索组件，可传入 JSON 格式的配置覆盖默认值
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<SearchWidget, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => SearchConfig::from_json(json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            _ => SearchConfig::default(),
        };

        Ok(SearchWidget {
            debouncer: Debouncer::new(config.debounce_ms),
            session: SearchSession::new(config),
        })
    }

    /// 根据当前页面路径返回索引文件地址
    pub fn index_path(pathname: &str) -> String {
        resolve_index_path(pathname).to_string()
    }

    /// 加载索引 JSON，返回文档数量
    pub fn load_index(&mut self, json: &str) -> Result<u32, JsValue> {
        self.session
            .load_index_json(json)
            .map(|count| count as u32)
            .map_err(|e| {
                console::error_1(&JsValue::from_str(&format!("加载搜索索引失败: {}", e)));
                JsValue::from_str(&e.to_string())
            })
    }

    /// 索引请求失败 (非 200 或网络错误) 时调用
    pub fn index_failed(&mut self, reason: &str) {
        if !matches!(self.session.index_state(), IndexState::Failed(_)) {
            console::error_1(&JsValue::from_str(&format!("加载搜索索引失败: {}", reason)));
        }
        self.session.mark_index_failed(reason);
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    pub fn set_query(&mut self, raw: &str) {
        self.session.set_query(raw);
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.session.toggle_tag(tag);
    }

    pub fn toggle_month(&mut self, month: &str) {
        self.session.toggle_month(month);
    }

    pub fn clear_filters(&mut self) {
        self.session.clear_filters();
    }

    pub fn has_filters(&self) -> bool {
        self.session.filters().has_filters()
    }

    pub fn selected_tag(&self) -> Option<String> {
        self.session.filters().selected_tag().map(str::to_string)
    }

    pub fn selected_month(&self) -> Option<String> {
        self.session.filters().selected_month().map(str::to_string)
    }

    /// 当前查询的结果，序列化为 JSON 数组
    pub fn results(&self, lang: Option<String>, pathname: &str) -> Result<String, JsValue> {
        let locale = Locale::detect(lang.as_deref(), pathname);
        serde_json::to_string(&self.session.views(locale))
            .map_err(|e| JsValue::from_str(&format!("序列化搜索结果失败: {}", e)))
    }

    /// 全部筛选项及数量，索引未就绪时返回 `null`
    pub fn facets(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.facets())
            .map_err(|e| JsValue::from_str(&format!("序列化筛选项失败: {}", e)))
    }

    /// 月份筛选项的显示文本
    pub fn month_label(month: &str, lang: Option<String>, pathname: &str) -> String {
        format_month(month, Locale::detect(lang.as_deref(), pathname))
    }

    /// 记录一次输入，返回防抖票据
    pub fn schedule_input(&mut self, now_ms: f64) -> u32 {
        self.debouncer.schedule(now_ms.max(0.0) as u64)
    }

    /// 票据对应的输入是否应该触发搜索
    pub fn should_run(&mut self, ticket: u32, now_ms: f64) -> bool {
        self.debouncer.should_fire(ticket, now_ms.max(0.0) as u64)
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debouncer.window_ms().min(u32::MAX as u64) as u32
    }
}
