//! Result-page parsers, one per search surface.
//!
//! | Surface | Result container | Link |
//! |---------|------------------|------|
//! | Bing News | `.news-card, .newsitem` | first `a[href^="http"]`, Microsoft links skipped |
//! | Google News | `article` | every `a[href^="./article"]`, made absolute |
//! | DuckDuckGo (html) | `.result` | first `a[href^="http"]` |
//!
//! Markup that doesn't match simply yields no links.

use crate::config::Endpoints;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("surface selector is valid")
}

static BING_CARD: Lazy<Selector> = Lazy::new(|| selector(".news-card, .newsitem"));
static ABSOLUTE_LINK: Lazy<Selector> = Lazy::new(|| selector(r#"a[href^="http"]"#));
static GOOGLE_ARTICLE: Lazy<Selector> = Lazy::new(|| selector("article"));
static GOOGLE_LINK: Lazy<Selector> = Lazy::new(|| selector(r#"a[href^="./article"]"#));
static DDG_RESULT: Lazy<Selector> = Lazy::new(|| selector(".result"));

/// Pulls candidate article links out of one search surface's result page.
pub trait ResultPageParser {
    fn extract_links(&self, document: &Html) -> Vec<String>;
}

/// First absolute link inside each element matched by `container`.
fn first_absolute_links(document: &Html, container: &Selector) -> Vec<String> {
    document
        .select(container)
        .filter_map(|item| item.select(&ABSOLUTE_LINK).next())
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BingParser;

impl ResultPageParser for BingParser {
    fn extract_links(&self, document: &Html) -> Vec<String> {
        first_absolute_links(document, &BING_CARD)
            .into_iter()
            .filter(|href| !href.contains("microsoft"))
            .collect()
    }
}

/// Google News links are relative (`./articles/...`); they are rewritten
/// against the Google News base URL.
#[derive(Debug, Clone)]
pub struct GoogleNewsParser {
    pub base_url: String,
}

impl ResultPageParser for GoogleNewsParser {
    fn extract_links(&self, document: &Html) -> Vec<String> {
        let base = self.base_url.trim_end_matches('/');
        document
            .select(&GOOGLE_ARTICLE)
            .flat_map(|article| article.select(&GOOGLE_LINK))
            .filter_map(|a| a.value().attr("href"))
            .map(|href| format!("{base}{}", &href[1..]))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDuckGoParser;

impl ResultPageParser for DuckDuckGoParser {
    fn extract_links(&self, document: &Html) -> Vec<String> {
        first_absolute_links(document, &DDG_RESULT)
    }
}

/// The search surfaces queried for candidate links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    BingNews,
    GoogleNews,
    DuckDuckGo,
}

impl Surface {
    /// Query URL for `entity` with a `+`-joined phrasing suffix.
    pub fn query_url(self, endpoints: &Endpoints, entity: &str, suffix: &str) -> String {
        let q = urlencoding::encode(entity);
        match self {
            Surface::BingNews => format!(
                "{}/news/search?q={q}+{suffix}",
                endpoints.bing.trim_end_matches('/')
            ),
            Surface::GoogleNews => format!(
                "{}/search?q={q}+{suffix}",
                endpoints.google_news.trim_end_matches('/')
            ),
            Surface::DuckDuckGo => format!(
                "{}/html/?q={q}+{suffix}",
                endpoints.duckduckgo.trim_end_matches('/')
            ),
        }
    }

    /// The parser for this surface's result markup.
    pub fn parser(self, endpoints: &Endpoints) -> Box<dyn ResultPageParser> {
        match self {
            Surface::BingNews => Box::new(BingParser),
            Surface::GoogleNews => Box::new(GoogleNewsParser {
                base_url: endpoints.google_news.clone(),
            }),
            Surface::DuckDuckGo => Box::new(DuckDuckGoParser),
        }
    }
}

/// The fixed battery of (surface, phrasing) pairs, in query order.
pub const QUERY_BATTERY: &[(Surface, &str)] = &[
    (Surface::BingNews, "news"),
    (Surface::BingNews, "latest"),
    (Surface::GoogleNews, "when:7d"),
    (Surface::DuckDuckGo, "news"),
    (Surface::DuckDuckGo, "latest+news"),
    (Surface::BingNews, "business"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_bing_parser() {
        let html = r#"
            <div class="news-card">
              <a href="/relative">skip</a>
              <a href="https://www.reuters.com/acme">Acme</a>
              <a href="https://second.example/ignored">second</a>
            </div>
            <div class="newsitem"><a href="https://go.microsoft.com/x">ms</a></div>
            <div class="newsitem"><a href="http://apnews.com/acme">AP</a></div>
            <div class="other"><a href="https://elsewhere.example">no</a></div>
        "#;
        assert_eq!(
            BingParser.extract_links(&doc(html)),
            vec!["https://www.reuters.com/acme", "http://apnews.com/acme"]
        );
    }

    #[test]
    fn test_google_news_parser_rewrites_relative_links() {
        let parser = GoogleNewsParser {
            base_url: "https://news.google.com".to_string(),
        };
        let html = r#"
            <article>
              <a href="./articles/CBMiabc?hl=en">one</a>
              <a href="./articles/CBMidef">two</a>
              <a href="https://publisher.example/x">absolute</a>
            </article>
            <div><a href="./articles/outside">outside</a></div>
        "#;
        assert_eq!(
            parser.extract_links(&doc(html)),
            vec![
                "https://news.google.com/articles/CBMiabc?hl=en",
                "https://news.google.com/articles/CBMidef",
            ]
        );
    }

    #[test]
    fn test_duckduckgo_parser() {
        let html = r#"
            <div class="result"><a class="result__a" href="https://www.cnbc.com/acme">x</a></div>
            <div class="result"><a href="//duckduckgo.com/l/?uddg=1">redirect</a></div>
        "#;
        assert_eq!(
            DuckDuckGoParser.extract_links(&doc(html)),
            vec!["https://www.cnbc.com/acme"]
        );
    }

    #[test]
    fn test_unexpected_markup_yields_nothing() {
        let html = "<html><body><p>Please enable JavaScript</p></body></html>";
        let endpoints = Endpoints::default();
        for surface in [Surface::BingNews, Surface::GoogleNews, Surface::DuckDuckGo] {
            assert!(surface.parser(&endpoints).extract_links(&doc(html)).is_empty());
        }
    }

    #[test]
    fn test_query_urls_encode_entity() {
        let endpoints = Endpoints::default();
        assert_eq!(
            Surface::BingNews.query_url(&endpoints, "Procter & Gamble", "news"),
            "https://www.bing.com/news/search?q=Procter%20%26%20Gamble+news"
        );
        assert_eq!(
            Surface::GoogleNews.query_url(&endpoints, "Tesla", "when:7d"),
            "https://news.google.com/search?q=Tesla+when:7d"
        );
        assert_eq!(
            Surface::DuckDuckGo.query_url(&endpoints, "Tesla", "latest+news"),
            "https://duckduckgo.com/html/?q=Tesla+latest+news"
        );
    }

    #[test]
    fn test_query_battery_shape() {
        assert_eq!(QUERY_BATTERY.len(), 6);
        assert_eq!(QUERY_BATTERY[2], (Surface::GoogleNews, "when:7d"));
    }
}
