pub mod url;

pub use url::{RecipeScraper, ScrapeResponse};
