//! 目标站点的 CSS 选择器与文本提取工具
//!
//! 选择器绑定站点当前的页面结构，改版时只需要改这里。

use scraper::{ElementRef, Selector};

use crate::error::{Result, ScrapeError};

pub const CATEGORY_LINK: &str = "a.tappable.pp-page-section__course.no-highlight";
pub const CATEGORY_TITLE: &str = "div.course-track-card__title";

pub const LEVEL_SECTION: &str = ".ib-tracks-layout__card-associations-section";
pub const LEVEL_NAME: &str = ".ib-tracks-layout__level-name";
pub const TOPIC_CARD: &str = "a.ib-tracks-layout__card";
pub const TOPIC_HEADING: &str = ".ib-tracks-layout__card-heading-text";

pub const PROBLEM_TILE: &str = "a.ib-topic-section__problems-bucket-tile";

pub const QUESTION_TITLE: &str = "h1";
pub const QUESTION_DESCRIPTION: &str = ".question-description";
/// 站点生成的工具类，部分题目页没有 `.question-description` 时用它
pub const QUESTION_DESCRIPTION_FALLBACK: &str = ".css-1jjp8jh";

/// 其中的文本节点不属于页面可见文本
const NON_TEXT_ELEMENTS: [&str; 3] = ["script", "style", "template"];

pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::Config(format!("无效的选择器 {}: {}", css, e)))
}

/// 元素下的可见文本节点，跳过 script / style / template 的内容
pub fn visible_text<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| NON_TEXT_ELEMENTS.contains(&e.name()))
        });
        (!hidden).then_some(&**text)
    })
}

/// 每个文本节点去掉首尾空白后直接拼接
pub fn stripped_text(element: ElementRef<'_>) -> String {
    visible_text(element).map(str::trim).collect()
}

/// 拼接全部文本后只去掉整体首尾空白
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    visible_text(element).collect::<String>().trim().to_string()
}

/// 非空的 href 属性
pub fn href(element: ElementRef<'_>) -> Option<&str> {
    element.value().attr("href").filter(|h| !h.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_all_site_selectors_parse() {
        for css in [
            CATEGORY_LINK,
            CATEGORY_TITLE,
            LEVEL_SECTION,
            LEVEL_NAME,
            TOPIC_CARD,
            TOPIC_HEADING,
            PROBLEM_TILE,
            QUESTION_TITLE,
            QUESTION_DESCRIPTION,
            QUESTION_DESCRIPTION_FALLBACK,
        ] {
            assert!(parse_selector(css).is_ok(), "{}", css);
        }
    }

    #[test]
    fn test_text_helpers_differ_on_inner_whitespace() {
        let doc = Html::parse_fragment("<div id=\"x\">  Two <b> Sum </b>\n problem </div>");
        let sel = parse_selector("#x").unwrap();
        let el = doc.select(&sel).next().unwrap();

        assert_eq!(stripped_text(el), "TwoSumproblem");
        assert_eq!(trimmed_text(el), "Two  Sum \n problem");
    }

    #[test]
    fn test_text_helpers_skip_script_style_and_template() {
        let doc = Html::parse_fragment(
            r#"<div id="x"><style data-emotion="css abc">.css-abc{color:red;}</style> Add <script>var x = 1;</script><b>two</b><template>hidden</template> numbers </div>"#,
        );
        let el = doc.select(&parse_selector("#x").unwrap()).next().unwrap();

        assert_eq!(stripped_text(el), "Addtwonumbers");
        assert_eq!(trimmed_text(el), "Add two numbers");
    }

    #[test]
    fn test_empty_href_is_ignored() {
        let doc = Html::parse_fragment(r#"<a id="a" href="">x</a><a id="b" href="/p">y</a>"#);
        let a = doc.select(&parse_selector("#a").unwrap()).next().unwrap();
        let b = doc.select(&parse_selector("#b").unwrap()).next().unwrap();
        assert_eq!(href(a), None);
        assert_eq!(href(b), Some("/p"));
    }
}
