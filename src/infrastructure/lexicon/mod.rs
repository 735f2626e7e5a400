mod datamuse_client;
mod english_number_normalizer;

pub use datamuse_client::{DEFAULT_DATAMUSE_URL, DatamuseClient};
pub use english_number_normalizer::EnglishNumberNormalizer;
