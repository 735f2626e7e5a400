mod http_phonetic_data_source;
mod in_memory_lookup_cache;

pub use http_phonetic_data_source::{HttpPhoneticDataSource, parse_reading_map, parse_shard};
pub use in_memory_lookup_cache::InMemoryLookupCache;
