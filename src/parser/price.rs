use std::sync::LazyLock;

use regex::Regex;

use crate::book::Price;

static NON_NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d,.]").unwrap());
static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d\s]*").unwrap());

/// Turn price text like `"1 234,50 ₽"` into a number.
///
/// A comma counts as the decimal separator. When the cleaned text does not
/// parse, the first run of digits in the raw text is taken as an integer.
/// Returns `None` when nothing numeric can be recovered.
pub fn normalize_price(raw: &str) -> Option<Price> {
    if raw.is_empty() {
        return None;
    }

    let compact: String = raw.chars().filter(|c| *c != '\u{a0}' && *c != ' ').collect();
    let cleaned = NON_NUMERIC_RE.replace_all(&compact, "").replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }

    let parsed = if cleaned.contains('.') {
        cleaned.parse::<f64>().ok().map(Price::Decimal)
    } else {
        cleaned.parse::<i64>().ok().map(Price::Integer)
    };

    parsed.or_else(|| first_digit_run(raw))
}

fn first_digit_run(raw: &str) -> Option<Price> {
    let run = DIGIT_RUN_RE.find(raw)?;
    let digits: String = run.as_str().chars().filter(|c| !c.is_whitespace()).collect();
    digits.parse::<i64>().ok().map(Price::Integer)
}
