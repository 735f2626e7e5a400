pub mod audio;
pub mod lexicon;
pub mod llm;
pub mod observability;
pub mod phonetics;
