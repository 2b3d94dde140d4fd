//! Link cleaning and marketplace policy.
//!
//! A `LinkPolicy` is built once at startup and shared read-only by every
//! pipeline component.

use std::collections::{HashMap, HashSet};

/// Query parameters removed from every link unless a domain allowlists them.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "utm_id",
    "fbclid",
    "gclid",
    "dclid",
    "msclkid",
    "igshid",
    "tag",
    "ref",
    "ref_",
    "referrer",
    "affid",
    "affextparam1",
    "affextparam2",
    "aff_id",
    "affiliate",
    "linkcode",
    "linkid",
    "ascsubtag",
    "creative",
    "creativeasin",
    "camp",
    "campaign",
    "cmpid",
    "clickid",
    "click_id",
    "srsltid",
    "smid",
    "lid",
    "sharedby",
    "share_id",
];

/// Per-domain parameters that survive cleaning even when deny-listed.
const PARAM_ALLOWLIST: &[(&str, &[&str])] = &[
    // Seller id pins the offer the sender was looking at.
    ("amazon.in", &["smid"]),
    ("amazon.com", &["smid"]),
    // Listing id selects the seller on a product page.
    ("flipkart.com", &["pid", "lid"]),
];

const MARKETPLACES: &[&str] = &["amazon", "flipkart", "meesho", "myntra", "ajio", "snapdeal"];

/// The one marketplace whose replies carry size and postal-code lines.
const METADATA_MARKETPLACE: &str = "meesho";

#[derive(Debug, Clone)]
pub struct LinkPolicy {
    tracking_params: HashSet<String>,
    param_allowlist: HashMap<String, HashSet<String>>,
    marketplaces: Vec<String>,
    metadata_marketplace: String,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self::new(
            TRACKING_PARAMS.iter().copied(),
            PARAM_ALLOWLIST
                .iter()
                .map(|(domain, params)| (*domain, params.iter().copied())),
            MARKETPLACES.iter().copied(),
            METADATA_MARKETPLACE,
        )
    }
}

impl LinkPolicy {
    /// Build a policy. All names are lowercased so lookups are
    /// case-insensitive.
    pub fn new<'a, P, A, I, M>(
        tracking_params: P,
        param_allowlist: A,
        marketplaces: M,
        metadata_marketplace: &str,
    ) -> Self
    where
        P: IntoIterator<Item = &'a str>,
        A: IntoIterator<Item = (&'a str, I)>,
        I: IntoIterator<Item = &'a str>,
        M: IntoIterator<Item = &'a str>,
    {
        let mut allowlist: HashMap<String, HashSet<String>> = HashMap::new();
        for (domain, params) in param_allowlist {
            allowlist
                .entry(domain.to_ascii_lowercase())
                .or_default()
                .extend(params.into_iter().map(str::to_ascii_lowercase));
        }

        Self {
            tracking_params: tracking_params
                .into_iter()
                .map(str::to_ascii_lowercase)
                .collect(),
            param_allowlist: allowlist,
            marketplaces: marketplaces
                .into_iter()
                .map(str::to_ascii_lowercase)
                .collect(),
            metadata_marketplace: metadata_marketplace.to_ascii_lowercase(),
        }
    }

    /// Whether `param` should stay in a link pointing at `host`.
    pub fn keeps_param(&self, host: &str, param: &str) -> bool {
        let param = param.to_ascii_lowercase();
        if !self.tracking_params.contains(&param) {
            return true;
        }
        self.is_allowlisted(host, &param)
    }

    fn is_allowlisted(&self, host: &str, param: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.param_allowlist.iter().any(|(domain, params)| {
            domain_matches(&host, domain) && params.contains(param)
        })
    }

    /// Marketplace name substrings, lowercase.
    pub fn marketplaces(&self) -> &[String] {
        &self.marketplaces
    }

    pub fn metadata_marketplace(&self) -> &str {
        &self.metadata_marketplace
    }
}

/// `host` is `domain` itself or one of its subdomains.
fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
