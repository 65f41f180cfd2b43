use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::price::normalize_price;
use crate::book::{BookRecord, Price};

const TITLE_ATTR: &str = "data-chg-product-name";
const PRICE_ATTR: &str = "data-chg-product-price";
const AUTHOR_PLACEHOLDER: &str = "автор не указан";
const MAX_TOOLTIP_AUTHOR_CHARS: usize = 50;

static TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.product-card__title").unwrap());
static PRICE_TAG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.product-price__price").unwrap());
static SUBTITLE_TAG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.product-card__subtitle").unwrap());
static TRAILING_PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)$").unwrap());

type Strategy<T> = fn(ElementRef<'_>) -> Option<T>;
type AuthorStrategy = fn(ElementRef<'_>, &str) -> Option<String>;

const TITLE_STRATEGIES: &[Strategy<String>] = &[title_from_attr, title_from_link];
const PRICE_STRATEGIES: &[Strategy<Price>] = &[price_from_attr, price_from_tag];
const AUTHOR_STRATEGIES: &[AuthorStrategy] = &[author_from_subtitle, author_from_tooltip];

/// Build a record from one product card. Cards without a title are skipped.
pub fn extract_card(card: ElementRef<'_>) -> Option<BookRecord> {
    let title = TITLE_STRATEGIES.iter().find_map(|f| f(card))?;
    let price = PRICE_STRATEGIES.iter().find_map(|f| f(card));
    let author = AUTHOR_STRATEGIES.iter().find_map(|f| f(card, &title));

    Some(BookRecord {
        title,
        price,
        author,
    })
}

// ── Title ──

fn title_from_attr(card: ElementRef<'_>) -> Option<String> {
    card.value().attr(TITLE_ATTR).and_then(non_empty)
}

fn title_from_link(card: ElementRef<'_>) -> Option<String> {
    first_text(card, &TITLE_LINK)
}

// ── Price ──

fn price_from_attr(card: ElementRef<'_>) -> Option<Price> {
    let raw = card.value().attr(PRICE_ATTR).filter(|s| !s.is_empty())?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(Price::Decimal(v)),
        _ => normalize_price(raw),
    }
}

fn price_from_tag(card: ElementRef<'_>) -> Option<Price> {
    let tag = card.select(&PRICE_TAG).next()?;
    normalize_price(element_text(tag).trim())
}

// ── Author ──

fn author_from_subtitle(card: ElementRef<'_>, _title: &str) -> Option<String> {
    first_text(card, &SUBTITLE_TAG).filter(|a| a.to_lowercase() != AUTHOR_PLACEHOLDER)
}

/// Tooltips often read "Title (Author)". A trailing group that looks like a
/// volume number or repeats the title start is not an author.
fn author_from_tooltip(card: ElementRef<'_>, title: &str) -> Option<String> {
    let link = card.select(&TITLE_LINK).next()?;
    let tooltip = link.value().attr("title")?;
    let caps = TRAILING_PARENS_RE.captures(tooltip)?;
    let candidate = caps[1].trim();

    let short = candidate.chars().count() < MAX_TOOLTIP_AUTHOR_CHARS;
    let numeric = !candidate.is_empty() && candidate.chars().all(char::is_numeric);
    if short && !numeric && !title.starts_with(candidate) {
        Some(candidate.to_string())
    } else {
        None
    }
}

// ── Helpers ──

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .and_then(|el| non_empty(&element_text(el)))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
