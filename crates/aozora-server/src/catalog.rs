//! The fixed book catalog: short key to Aozora Bunko archive URL.

use rand::seq::IteratorRandom;
use std::collections::BTreeMap;

/// Immutable mapping from API book key to source archive URL.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: BTreeMap<String, String>,
}

impl Catalog {
    /// The five works the game ships with.
    pub fn aozora() -> Self {
        Self::from_entries([
            (
                "wagahai",
                "https://www.aozora.gr.jp/cards/000148/files/789_ruby_5639.zip",
            ),
            (
                "rashomon",
                "https://www.aozora.gr.jp/cards/000879/files/127_ruby_150.zip",
            ),
            (
                "kokoro",
                "https://www.aozora.gr.jp/cards/000148/files/773_ruby_5968.zip",
            ),
            (
                "botchan",
                "https://www.aozora.gr.jp/cards/000148/files/752_ruby_2438.zip",
            ),
            (
                "run_melos",
                "https://www.aozora.gr.jp/cards/000035/files/1567_ruby_4948.zip",
            ),
        ])
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let books = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { books }
    }

    pub fn url_for(&self, key: &str) -> Option<&str> {
        self.books.get(key).map(String::as_str)
    }

    /// Uniformly chosen key, `None` only for an empty catalog.
    pub fn random_key(&self) -> Option<&str> {
        self.books
            .keys()
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.books.keys().map(String::as_str)
    }
}
