use url::Url;

use crate::config::LinkPolicy;

/// Loose substring match on the host so regional and mobile subdomains
/// (`m.`, `dl.`, `amazon.co.uk`) are all recognised.
pub fn is_ecommerce(policy: &LinkPolicy, url: &Url) -> bool {
    let host = lowercase_host(url);
    policy
        .marketplaces()
        .iter()
        .any(|name| host.contains(name.as_str()))
}

/// Whether replies for `url` carry size and postal-code lines.
pub fn is_meesho(policy: &LinkPolicy, url: &Url) -> bool {
    lowercase_host(url).contains(policy.metadata_marketplace())
}

fn lowercase_host(url: &Url) -> String {
    url.host_str().unwrap_or_default().to_ascii_lowercase()
}
