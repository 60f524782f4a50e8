use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("标记正则无效"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("空白正则无效"));

/// 去除 HTML 标记并把连续空白压缩为单个空格，首尾去空白
pub fn normalize_text(content: &str) -> String {
    let stripped = MARKUP.replace_all(content, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// 大小写折叠，保证折叠前后字符一一对应
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// 按字符折叠大小写后的字符序列
pub fn folded_chars(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_and_collapses_whitespace() {
        let html = "  <p>Hello\n\n  <b>World</b></p>\t<br/>again ";
        assert_eq!(normalize_text(html), "Hello World again");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(normalize_text("a b c"), "a b c");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn folding_keeps_length() {
        let text = "Straße İstanbul ÅB";
        assert_eq!(folded_chars(text).len(), text.chars().count());
        assert_eq!(folded_chars("HeLLo"), vec!['h', 'e', 'l', 'l', 'o']);
    }
}
