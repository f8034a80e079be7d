//! TF-IDF vectorizer for headline feature extraction.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// TF-IDF vectorizer for text feature extraction.
///
/// Term frequency is the term count divided by the number of analyzed terms
/// in the document. Inverse document frequency is smoothed:
/// `ln((N + 1) / (df + 1)) + 1`, so a term present in every document still
/// keeps a weight of 1.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each term, by index.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Fit the vectorizer on a corpus.
    ///
    /// Vocabulary indices follow first appearance across the corpus, which
    /// keeps vectors (and the float summation order in similarity) identical
    /// from one run to the next.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let terms = self.analyzer.terms(doc.as_ref())?;
            let mut seen: HashSet<&str> = HashSet::new();

            for term in &terms {
                if !seen.insert(term.as_str()) {
                    continue;
                }
                match vocabulary.get(term) {
                    Some(&idx) => document_frequency[idx] += 1,
                    None => {
                        vocabulary.insert(term.clone(), document_frequency.len());
                        document_frequency.push(1);
                    }
                }
            }
        }

        let n = documents.len() as f64;
        self.idf = document_frequency
            .iter()
            .map(|&df| ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
            .collect();
        self.vocabulary = vocabulary;
        self.n_documents = documents.len();

        Ok(())
    }

    /// Transform a document into a TF-IDF feature vector.
    ///
    /// Terms outside the fitted vocabulary are ignored. A document with no
    /// terms yields the zero vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let terms = self.analyzer.terms(document)?;
        let mut tf = vec![0.0; self.vocabulary.len()];

        for term in &terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                tf[idx] += 1.0;
            }
        }

        let doc_length = terms.len() as f64;
        if doc_length > 0.0 {
            for count in &mut tf {
                *count /= doc_length;
            }
        }

        for (idx, weight) in tf.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        Ok(tf)
    }

    /// Fit on the corpus and return the vector of every document in order.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<Vec<f64>>> {
        self.fit(documents)?;
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Get the number of documents the vectorizer was fitted on.
    pub fn document_count(&self) -> usize {
        self.n_documents
    }

    /// Get the vocabulary index of a term, if it was seen during fitting.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Get the inverse document frequency of a term.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::StandardAnalyzer;

    fn vectorizer() -> TfIdfVectorizer {
        TfIdfVectorizer::new(Arc::new(StandardAnalyzer::new().unwrap()))
    }

    #[test]
    fn test_tfidf_vectorizer() {
        let documents = vec![
            "what is machine learning",
            "how to install python",
            "buy laptop online",
        ];

        let mut vectorizer = vectorizer();
        vectorizer.fit(&documents).unwrap();
        assert_eq!(vectorizer.document_count(), 3);
        // "what", "is", "how", "to" are stop words
        assert_eq!(vectorizer.vocabulary_size(), 7);

        let features = vectorizer.transform("what is python").unwrap();
        assert_eq!(features.len(), vectorizer.vocabulary_size());
    }

    #[test]
    fn test_vocabulary_follows_first_appearance() {
        let mut vectorizer = vectorizer();
        vectorizer
            .fit(&["quantum computing", "computing chip"])
            .unwrap();

        assert_eq!(vectorizer.term_index("quantum"), Some(0));
        assert_eq!(vectorizer.term_index("computing"), Some(1));
        assert_eq!(vectorizer.term_index("chip"), Some(2));
    }

    #[test]
    fn test_smoothed_idf() {
        let mut vectorizer = vectorizer();
        vectorizer.fit(&["quantum chip", "quantum bakery"]).unwrap();

        // Present in every document: ln(3/3) + 1
        assert!((vectorizer.idf("quantum").unwrap() - 1.0).abs() < 1e-12);
        // Present in one of two: ln(3/2) + 1
        let expected = (3.0f64 / 2.0).ln() + 1.0;
        assert!((vectorizer.idf("chip").unwrap() - expected).abs() < 1e-12);
        assert!(vectorizer.idf("missing").is_none());
    }

    #[test]
    fn test_term_frequency_is_length_normalized() {
        let mut vectorizer = vectorizer();
        vectorizer.fit(&["rocket rocket launch"]).unwrap();

        let v = vectorizer.transform("rocket rocket launch").unwrap();
        let rocket = vectorizer.term_index("rocket").unwrap();
        let launch = vectorizer.term_index("launch").unwrap();

        // idf is 1.0 for both (single document), so weights are plain tf
        assert!((v[rocket] - 2.0 / 3.0).abs() < 1e-12);
        assert!((v[launch] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_document_is_zero_vector() {
        let mut vectorizer = vectorizer();
        let vectors = vectorizer.fit_transform(&["quantum chip", "", "the"]).unwrap();

        assert_eq!(vectors.len(), 3);
        assert!(vectors[1].iter().all(|&w| w == 0.0));
        assert!(vectors[2].iter().all(|&w| w == 0.0));
    }
}
