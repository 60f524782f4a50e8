use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use article_filter::FacetCatalog;
use search_wasm::{ResultView, SearchConfig, SearchSession};
use utils_common::{format_month, DocumentIndex, Locale};

// 终端高亮
const ANSI_HIGHLIGHT: &str = "\x1b[1;33m";
const ANSI_RESET: &str = "\x1b[0m";

fn cli() -> Command {
    Command::new("search-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("查询博客搜索索引，支持标签和月份筛选")
        .arg(Arg::new("index")
            .short('i')
            .long("index")
            .value_name("INDEX_JSON")
            .help("站点生成的 index.json 路径")
            .required(true))
        .arg(Arg::new("query")
            .short('q')
            .long("query")
            .value_name("QUERY")
            .help("搜索文本"))
        .arg(Arg::new("tag")
            .short('t')
            .long("tag")
            .value_name("TAG")
            .help("按标签筛选 (区分大小写)"))
        .arg(Arg::new("month")
            .short('m')
            .long("month")
            .value_name("YYYY-MM")
            .help("按发布月份筛选"))
        .arg(Arg::new("locale")
            .short('l')
            .long("locale")
            .value_name("LOCALE")
            .help("日期显示语言: en 或 ja")
            .value_parser(clap::builder::ValueParser::new(|s: &str| s.parse::<Locale>()))
            .default_value("ja"))
        .arg(Arg::new("config")
            .short('c')
            .long("config")
            .value_name("CONFIG_TOML")
            .help("搜索配置文件 (TOML)"))
        .arg(Arg::new("facets")
            .long("facets")
            .help("列出索引中的全部标签和月份")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("json")
            .long("json")
            .help("以 JSON 输出结果")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("plain")
            .long("plain")
            .help("不使用终端颜色高亮")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示详细日志")
            .action(ArgAction::SetTrue))
}

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&matches) {
        eprintln!("错误: {:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let index_path = matches
        .get_one::<String>("index")
        .context("缺少 --index 参数")?;
    let locale = matches.get_one::<Locale>("locale").copied().unwrap_or_default();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => load_config(Path::new(path))?,
        None => SearchConfig::default(),
    };
    if !matches.get_flag("json") {
        let (open, close) = if matches.get_flag("plain") {
            ("[", "]")
        } else {
            (ANSI_HIGHLIGHT, ANSI_RESET)
        };
        config.highlight_open = open.to_string();
        config.highlight_close = close.to_string();
    }

    let index = DocumentIndex::from_path(index_path)
        .with_context(|| format!("无法加载索引 {}", index_path))?;
    log::info!("已加载索引 {}，文档数量: {}", index_path, index.len());

    let mut session = SearchSession::new(config);
    session.set_index(index);

    if matches.get_flag("facets") {
        let catalog = session.facets().unwrap_or_default();
        if matches.get_flag("json") {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        } else {
            print!("{}", render_facets(&catalog, locale));
        }
        return Ok(());
    }

    if let Some(query) = matches.get_one::<String>("query") {
        session.set_query(query);
    }
    if let Some(tag) = matches.get_one::<String>("tag") {
        session.toggle_tag(tag);
    }
    if let Some(month) = matches.get_one::<String>("month") {
        session.toggle_month(month);
    }

    log::debug!(
        "查询 {:?}，标签 {:?}，月份 {:?}",
        session.query().as_str(),
        session.filters().selected_tag(),
        session.filters().selected_month()
    );

    let views = session.views(locale);
    log::info!("搜索结果: {} 条", views.len());
    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else if views.is_empty() {
        println!("没有找到结果");
    } else {
        print!("{}", render_results(&views));
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SearchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
    let config: SearchConfig = toml::from_str(&text)
        .with_context(|| format!("无法解析配置文件 {}", path.display()))?;
    config.validate()?;
    log::debug!("已读取配置文件 {}", path.display());
    Ok(config)
}

fn render_results(views: &[ResultView]) -> String {
    let mut out = String::new();
    for (i, view) in views.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, view.title_html));

        let mut meta = vec![view.path.clone()];
        if !view.date_label.is_empty() {
            meta.push(view.date_label.clone());
        }
        if !view.tags.is_empty() {
            meta.push(view.tags.join(", "));
        }
        out.push_str(&format!("   {}\n", meta.join(" · ")));

        if !view.excerpt_html.is_empty() {
            out.push_str(&format!("   {}\n", view.excerpt_html));
        }
    }
    out
}

fn render_facets(catalog: &FacetCatalog, locale: Locale) -> String {
    let mut out = String::from("标签:\n");
    for tag in &catalog.tags {
        out.push_str(&format!("  {} ({})\n", tag.value, tag.count));
    }
    out.push_str("月份:\n");
    for month in &catalog.months {
        out.push_str(&format!(
            "  {} {} ({})\n",
            month.value,
            format_month(&month.value, locale),
            month.count
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use article_filter::FacetCount;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn parses_locale_and_filters() {
        let matches = cli()
            .try_get_matches_from(["search-cli", "-i", "index.json", "-q", "fox", "-t", "go", "-l", "en"])
            .unwrap();
        assert_eq!(matches.get_one::<Locale>("locale"), Some(&Locale::En));
        assert_eq!(matches.get_one::<String>("tag").map(String::as_str), Some("go"));
        assert!(cli().try_get_matches_from(["search-cli", "-i", "x", "-l", "fr"]).is_err());
    }

    #[test]
    fn loads_toml_config_and_rejects_invalid_values() {
        let _ = env_logger::builder().is_test(true).filter_level(log::LevelFilter::Debug).try_init();
        let dir = std::env::temp_dir().join(format!("search-cli-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let good = dir.join("search.toml");
        fs::write(&good, "threshold = 0.2\nmax_results = 5\n").unwrap();
        let config = load_config(&good).unwrap();
        assert_eq!(config.max_results, 5);
        assert_eq!(config.excerpt_length, 120);

        let bad = dir.join("bad.toml");
        fs::write(&bad, "max_results = 0\n").unwrap();
        assert!(load_config(&bad).is_err());
        assert!(load_config(&dir.join("missing.toml")).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn renders_result_lines() {
        let views = vec![ResultView {
            title_html: "Hello [World]".to_string(),
            permalink: "https://blog.example/posts/202403/15/post/".to_string(),
            path: "/posts/202403/15/post/".to_string(),
            excerpt_html: "the quick brown fox".to_string(),
            date_label: "Mar 15, 2024".to_string(),
            tags: vec!["go".to_string(), "web".to_string()],
            score: Some(0.0),
        }];
        assert_eq!(
            render_results(&views),
            "1. Hello [World]\n   /posts/202403/15/post/ · Mar 15, 2024 · go, web\n   the quick brown fox\n"
        );
    }

    #[test]
    fn renders_facet_labels() {
        let catalog = FacetCatalog {
            tags: vec![FacetCount { value: "go".to_string(), count: 2 }],
            months: vec![FacetCount { value: "2024-03".to_string(), count: 1 }],
        };
        assert_eq!(
            render_facets(&catalog, Locale::En),
            "标签:\n  go (2)\n月份:\n  2024-03 March 2024 (1)\n"
        );
    }
}
