pub mod card;
pub mod price;

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::book::BookRecord;

static PRODUCT_CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article.product-card").unwrap());

/// Parse one catalog page: markup → product cards → records, in page order.
pub fn parse_catalog_page(html: &str) -> Vec<BookRecord> {
    let doc = Html::parse_document(html);
    doc.select(&PRODUCT_CARD)
        .filter_map(card::extract_card)
        .collect()
}
