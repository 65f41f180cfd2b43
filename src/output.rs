use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::book::BookRecord;

/// One CSV row. Field names double as the header.
#[derive(Serialize)]
struct BookRow<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Author")]
    author: &'a str,
}

impl<'a> From<&'a BookRecord> for BookRow<'a> {
    fn from(book: &'a BookRecord) -> Self {
        BookRow {
            title: &book.title,
            price: book.price_text(),
            author: book.author_text(),
        }
    }
}

/// Write `books` as CSV to a new file at `path`, replacing any existing one.
pub fn write_books(path: &Path, books: &[BookRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    write_books_to(file, books).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn write_books_to<W: Write>(writer: W, books: &[BookRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    for book in books {
        wtr.serialize(BookRow::from(book))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Price;

    fn render(books: &[BookRecord]) -> String {
        let mut buf = Vec::new();
        write_books_to(&mut buf, books).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_rows() {
        let books = vec![
            BookRecord {
                title: "Денискины рассказы".into(),
                price: Some(Price::Decimal(529.0)),
                author: Some("Виктор Драгунский".into()),
            },
            BookRecord {
                title: "Сказки, песни и стихи".into(),
                price: Some(Price::Integer(1299)),
                author: None,
            },
            BookRecord {
                title: "Тимур и его команда".into(),
                price: None,
                author: Some("Аркадий Гайдар".into()),
            },
        ];

        assert_eq!(
            render(&books),
            "Title,Price,Author\r\n\
             Денискины рассказы,529.0,Виктор Драгунский\r\n\
             \"Сказки, песни и стихи\",1299,Не указан\r\n\
             Тимур и его команда,Не указана,Аркадий Гайдар\r\n"
        );
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.csv");
        let books = vec![BookRecord {
            title: "Чук и Гек".into(),
            price: Some(Price::Integer(350)),
            author: Some("Аркадий Гайдар".into()),
        }];

        write_books(&path, &books).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Title,Price,Author\r\nЧук и Гек,350,Аркадий Гайдар\r\n");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/books.csv");
        assert!(write_books(&path, &[]).is_err());
    }
}
