//! Tokenized news documents and their mapping onto embedding rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::samples::NewsId;

/// Source of tokenized documents consumed by [`Sample::to_network_input`](super::Sample::to_network_input).
pub trait NewsCollection {
    fn words_per_news(&self, news_id: NewsId) -> Result<usize>;

    /// Embedding row of each word in `[w_from, w_to)`; unknown words map to
    /// [`oov_index`]`(total_words_count)`.
    fn embedding_indices_in_window(
        &self,
        news_id: NewsId,
        total_words_count: usize,
        w_from: usize,
        w_to: usize,
    ) -> Result<Vec<usize>>;

    fn pos_indices_in_window(&self, news_id: NewsId, w_from: usize, w_to: usize) -> Result<Vec<usize>>;
}

/// Row reserved for out-of-vocabulary words: the one right after the known words.
pub fn oov_index(total_words_count: usize) -> usize {
    total_words_count
}

/// Words of one document with a part-of-speech index per word.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewsWords {
    pub words: Vec<String>,
    pub pos_tags: Vec<usize>,
}

/// In-memory [`NewsCollection`] keyed by news id.
#[derive(Debug, Clone, Default)]
pub struct NewsWordsCollection {
    news: HashMap<NewsId, NewsWords>,
    vocabulary: HashMap<String, usize>,
}

impl NewsWordsCollection {
    /// Vocabulary words receive embedding rows in iteration order.
    pub fn with_vocabulary<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = HashMap::new();
        for word in words {
            let next = vocabulary.len();
            vocabulary.entry(word.into()).or_insert(next);
        }
        Self {
            news: HashMap::new(),
            vocabulary,
        }
    }

    pub fn add_news(&mut self, news_id: NewsId, news: NewsWords) -> Result<()> {
        if news.words.len() != news.pos_tags.len() {
            return Err(Error::shape(
                "part-of-speech tags",
                &[news.words.len()],
                &[news.pos_tags.len()],
            ));
        }
        self.news.insert(news_id, news);
        Ok(())
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.news.len()
    }

    pub fn is_empty(&self) -> bool {
        self.news.is_empty()
    }

    fn news(&self, news_id: NewsId) -> Result<&NewsWords> {
        self.news.get(&news_id).ok_or(Error::UnknownNews(news_id))
    }

    fn window<'a, T>(items: &'a [T], w_from: usize, w_to: usize) -> Result<&'a [T]> {
        items.get(w_from..w_to).ok_or(Error::WindowPastDocumentEnd {
            w_from,
            w_to,
            words: items.len(),
        })
    }
}

impl NewsCollection for NewsWordsCollection {
    fn words_per_news(&self, news_id: NewsId) -> Result<usize> {
        Ok(self.news(news_id)?.words.len())
    }

    fn embedding_indices_in_window(
        &self,
        news_id: NewsId,
        total_words_count: usize,
        w_from: usize,
        w_to: usize,
    ) -> Result<Vec<usize>> {
        let words = Self::window(&self.news(news_id)?.words, w_from, w_to)?;
        Ok(words
            .iter()
            .map(|word| {
                self.vocabulary
                    .get(word)
                    .copied()
                    .filter(|&index| index < total_words_count)
                    .unwrap_or_else(|| oov_index(total_words_count))
            })
            .collect())
    }

    fn pos_indices_in_window(&self, news_id: NewsId, w_from: usize, w_to: usize) -> Result<Vec<usize>> {
        Ok(Self::window(&self.news(news_id)?.pos_tags, w_from, w_to)?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> NewsWordsCollection {
        let mut collection = NewsWordsCollection::with_vocabulary(["the", "court", "sanctions"]);
        collection
            .add_news(
                7,
                NewsWords {
                    words: ["the", "court", "lifted", "sanctions"].map(String::from).to_vec(),
                    pos_tags: vec![0, 1, 2, 1],
                },
            )
            .unwrap();
        collection
    }

    #[test]
    fn unknown_words_map_to_oov_row() {
        let indices = collection().embedding_indices_in_window(7, 3, 0, 4).unwrap();
        assert_eq!(indices, vec![0, 1, 3, 2]);
    }

    #[test]
    fn slices_part_of_speech_window() {
        assert_eq!(collection().pos_indices_in_window(7, 1, 3).unwrap(), vec![1, 2]);
    }

    #[test]
    fn reports_unknown_news_and_short_documents() {
        let collection = collection();
        assert_eq!(collection.words_per_news(8), Err(Error::UnknownNews(8)));
        assert!(matches!(
            collection.pos_indices_in_window(7, 2, 6),
            Err(Error::WindowPastDocumentEnd { .. })
        ));
    }

    #[test]
    fn rejects_misaligned_tags() {
        let mut collection = NewsWordsCollection::default();
        let result = collection.add_news(
            1,
            NewsWords {
                words: vec!["a".into()],
                pos_tags: vec![],
            },
        );
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    }
}
