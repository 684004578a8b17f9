mod neo;

pub use neo::{FetchOutcome, NeoAdapter, DEFAULT_QUOTES_BASE_URL};
