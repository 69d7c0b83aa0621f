mod chrome;
mod request;

pub use chrome::{ChromiumRenderer, Renderer};
pub use request::RequestFetcher;
