use std::fmt;

/// Rendered in place of a price that could not be determined.
pub const PRICE_NOT_SPECIFIED: &str = "Не указана";
/// Rendered in place of an author that could not be determined.
pub const AUTHOR_NOT_SPECIFIED: &str = "Не указан";

/// Numeric price recovered from a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price {
    Integer(i64),
    Decimal(f64),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Integer(n) => write!(f, "{}", n),
            // Keep a fractional digit so decimals stay distinguishable from integers
            Price::Decimal(x) if x.fract() == 0.0 => write!(f, "{:.1}", x),
            Price::Decimal(x) => write!(f, "{}", x),
        }
    }
}

/// One book card. `None` marks a field that could not be determined.
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub title: String,
    pub price: Option<Price>,
    pub author: Option<String>,
}

impl BookRecord {
    pub fn price_text(&self) -> String {
        self.price
            .map(|p| p.to_string())
            .unwrap_or_else(|| PRICE_NOT_SPECIFIED.to_string())
    }

    pub fn author_text(&self) -> &str {
        self.author.as_deref().unwrap_or(AUTHOR_NOT_SPECIFIED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rendering() {
        assert_eq!(Price::Integer(450).to_string(), "450");
        assert_eq!(Price::Decimal(399.0).to_string(), "399.0");
        assert_eq!(Price::Decimal(1234.5).to_string(), "1234.5");
    }

    #[test]
    fn missing_fields_render_markers() {
        let book = BookRecord {
            title: "Денискины рассказы".into(),
            price: None,
            author: None,
        };
        assert_eq!(book.price_text(), "Не указана");
        assert_eq!(book.author_text(), "Не указан");
    }
}
