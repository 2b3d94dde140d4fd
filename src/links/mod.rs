pub mod errors;
pub mod extract;
pub mod marketplace;
pub mod resolver;

pub use errors::ResolveError;
pub use extract::extract_links;
pub use marketplace::{is_ecommerce, is_meesho};
pub use resolver::{ResolvedLink, UrlResolver, clean_url};
