//! Article body and title extraction from arbitrary publisher HTML.
//!
//! # Locating the body
//!
//! 1. the first `<article>` element
//! 2. else the first element with a class matching `article|content|story`
//! 3. else the whole document
//!
//! All `<p>` text inside the chosen container is trimmed, empties dropped, and
//! joined with single spaces. A page with no paragraph text yields an empty
//! string, and [`ContentExtractor::fetch_article`] reports it as `Ok(None)`
//! so the pipeline can skip the article without treating it as a failure.

use crate::error::NewsError;
use crate::scrapers::get_html;
use crate::utils::title_from_url;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};

static ARTICLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article").expect("article selector is valid"));
static WITH_CLASS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[class]").expect("class selector is valid"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("p selector is valid"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("title selector is valid"));
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("h1 selector is valid"));
static CONTENT_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new("article|content|story").expect("class regex is valid"));

/// Body text and title pulled from one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedArticle {
    pub title: String,
    pub content: String,
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn locate_container(document: &Html) -> ElementRef<'_> {
    if let Some(article) = document.select(&ARTICLE).next() {
        return article;
    }
    document
        .select(&WITH_CLASS)
        .find(|el| el.value().classes().any(|class| CONTENT_CLASS.is_match(class)))
        .unwrap_or_else(|| document.root_element())
}

/// Paragraph text of the likely article container, space-joined.
pub fn extract_content(document: &Html) -> String {
    locate_container(document)
        .select(&PARAGRAPH)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<title>`, else the first `<h1>`, else a title derived from the URL.
pub fn extract_title(document: &Html, url: &str) -> String {
    [&*TITLE, &*H1]
        .into_iter()
        .filter_map(|selector| document.select(selector).next().map(element_text))
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| title_from_url(url))
}

/// Parse a page into an article, or `None` when it has no body text.
pub fn parse_article(html: &str, url: &str) -> Option<ExtractedArticle> {
    let document = Html::parse_document(html);
    let content = extract_content(&document);
    if content.is_empty() {
        return None;
    }
    Some(ExtractedArticle {
        title: extract_title(&document, url),
        content,
    })
}

/// Fetches publisher pages with a bounded timeout.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    client: Client,
    timeout: Duration,
}

impl ContentExtractor {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Fetch and parse one article.
    ///
    /// `Ok(None)` means the page loaded but carried no paragraph text.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch_article(&self, url: &str) -> Result<Option<ExtractedArticle>, NewsError> {
        let html = get_html(&self.client, url, self.timeout).await?;
        let article = parse_article(&html, url);
        match &article {
            Some(a) => debug!(bytes = a.content.len(), title = %a.title, "Parsed article"),
            None => debug!("Page has no paragraph text"),
        }
        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::build_client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn content_of(html: &str) -> String {
        extract_content(&Html::parse_document(html))
    }

    #[test]
    fn test_article_element_wins() {
        let html = r#"
            <div class="story"><p>Sidebar story</p></div>
            <article><p> First para. </p><p></p><p>Second para.</p></article>
        "#;
        assert_eq!(content_of(html), "First para. Second para.");
    }

    #[test]
    fn test_content_class_fallback() {
        let html = r#"
            <div class="nav"><p>Menu</p></div>
            <div class="main-content body"><p>Body one.</p><p>Body two.</p></div>
            <footer><p>Footer</p></footer>
        "#;
        assert_eq!(content_of(html), "Body one. Body two.");
    }

    #[test]
    fn test_whole_document_fallback() {
        let html = "<div><p>Alpha.</p></div><section><p>Beta.</p></section>";
        assert_eq!(content_of(html), "Alpha. Beta.");
    }

    #[test]
    fn test_no_paragraphs_is_empty_not_error() {
        assert_eq!(content_of("<html><body><div>Just a div</div></body></html>"), "");
        assert!(parse_article("<div>nothing</div>", "https://x.example/a").is_none());
    }

    #[test]
    fn test_title_priority() {
        let url = "https://example.com/news/acme-wins-award";
        let with_title = Html::parse_document("<title> Acme News </title><h1>Heading</h1>");
        assert_eq!(extract_title(&with_title, url), "Acme News");

        let with_h1 = Html::parse_document("<h1> Heading </h1><p>x</p>");
        assert_eq!(extract_title(&with_h1, url), "Heading");

        let bare = Html::parse_document("<p>x</p>");
        assert_eq!(extract_title(&bare, url), "Acme Wins Award");
    }

    #[tokio::test]
    async fn test_fetch_article_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/story"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Acme soars</title></head>\
                 <body><article><p>Acme grew.</p></article></body></html>",
            ))
            .mount(&server)
            .await;

        let extractor = ContentExtractor::new(build_client().unwrap(), Duration::from_secs(5));
        let article = extractor
            .fetch_article(&format!("{}/story", server.uri()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(article.title, "Acme soars");
        assert_eq!(article.content, "Acme grew.");
    }

    #[tokio::test]
    async fn test_fetch_article_reports_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let extractor = ContentExtractor::new(build_client().unwrap(), Duration::from_secs(5));
        let err = extractor
            .fetch_article(&format!("{}/gone", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::UnexpectedStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_article_without_paragraphs_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<div>menu only</div>"))
            .mount(&server)
            .await;

        let extractor = ContentExtractor::new(build_client().unwrap(), Duration::from_secs(5));
        let article = extractor.fetch_article(&server.uri()).await.unwrap();
        assert!(article.is_none());
    }
}
