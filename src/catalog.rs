use crate::event::Asin;
use serde::{Deserialize, Serialize};

/// A book known to the catalog.
///
/// `title` and `author` are informational only and never enter identity or
/// transition logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub asin: Asin,
    pub title: String,
    pub author: String,
}

/// Read-only catalog of known books, supplied by the caller.
///
/// The manager consults it to validate asins; display layers consult it for
/// titles. The core never mutates it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Catalog { books }
    }

    pub fn contains(&self, asin: &Asin) -> bool {
        self.books.iter().any(|b| &b.asin == asin)
    }

    pub fn get(&self, asin: &Asin) -> Option<&Book> {
        self.books.iter().find(|b| &b.asin == asin)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
