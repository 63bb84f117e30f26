//! Search result page parsing.

use std::sync::LazyLock;

use newsdigest_core::Article;
use scraper::{ElementRef, Html, Selector};

// Card and summary divs match on the whole `class` attribute value, so a div
// carrying extra classes is not a result card.

/// One result card on the search page.
static ITEM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[class="sc-c6f6255e-0 eGcloy"]"#).expect("valid item selector")
});

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("valid title selector"));

static SUMMARY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[class="sc-4ea10043-3 kMizuB"]"#).expect("valid summary selector")
});

/// Parse one search result page into unannotated articles.
///
/// Cards without both a title and a summary element are skipped. Document
/// order is preserved. Text is every descendant text node concatenated, with
/// surrounding whitespace kept.
#[must_use]
pub fn parse_search_page(html: &str) -> Vec<Article> {
    let document = Html::parse_document(html);

    document
        .select(&ITEM_SELECTOR)
        .filter_map(|item| {
            let title = first_text(item, &TITLE_SELECTOR)?;
            let summary = first_text(item, &SUMMARY_SELECTOR)?;
            Some(Article::new(title, summary))
        })
        .collect()
}

fn first_text(parent: ElementRef<'_>, selector: &Selector) -> Option<String> {
    parent
        .select(selector)
        .next()
        .map(|el| el.text().collect())
}
