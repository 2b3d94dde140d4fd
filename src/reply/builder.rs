use crate::bot::PhotoRef;
use crate::extractor::{ExtractedProduct, MarketplaceMetadata};
use crate::links::ResolvedLink;
use crate::reply::ATTRIBUTION;

/// One outgoing message: plain text, or a photo with the text as caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    text: String,
    photo: Option<PhotoRef>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            photo: None,
        }
    }

    pub fn photo(photo: PhotoRef, caption: impl Into<String>) -> Self {
        Self {
            text: caption.into(),
            photo: Some(photo),
        }
    }

    /// Attach `photo` when there is one.
    pub fn with_optional_photo(text: impl Into<String>, photo: Option<&PhotoRef>) -> Self {
        match photo {
            Some(photo) => Self::photo(photo.clone(), text),
            None => Self::text(text),
        }
    }

    pub fn body(&self) -> &str {
        &self.text
    }

    pub fn attached_photo(&self) -> Option<&PhotoRef> {
        self.photo.as_ref()
    }
}

/// Render the product card.
///
/// ```text
/// <title> @<price> rs
/// <url>
/// Size - <sizes>      (metadata marketplace only)
/// Pin - <pin>         (metadata marketplace only)
///
/// @reviewcheckk
/// ```
pub fn build_response(
    product: &ExtractedProduct,
    link: &ResolvedLink,
    metadata: Option<&MarketplaceMetadata>,
) -> String {
    let price = match &product.price {
        Some(price) => format!("@{price} rs"),
        None => "@ rs".to_string(),
    };

    let mut response = format!("{} {price}\n{link}\n", product.title);
    if let Some(metadata) = metadata {
        response.push_str(&format!(
            "Size - {}\nPin - {}\n",
            metadata.sizes, metadata.pin
        ));
    }
    response.push('\n');
    response.push_str(ATTRIBUTION);
    response
}
