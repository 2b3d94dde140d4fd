/// Transport-level handle of a photo (a Telegram `file_id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef(String);

impl PhotoRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A chat message as delivered by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    pub text: Option<String>,
    pub caption: Option<String>,
    /// Ordered smallest to largest, as Telegram sends them.
    pub photos: Vec<PhotoRef>,
}

impl InboundMessage {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_photo(mut self, photo: PhotoRef) -> Self {
        self.photos.push(photo);
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Text, else caption, else empty.
    pub fn body(&self) -> &str {
        self.text
            .as_deref()
            .or(self.caption.as_deref())
            .unwrap_or_default()
    }

    /// The photo to echo back in replies: the last (largest) one.
    pub fn reply_photo(&self) -> Option<&PhotoRef> {
        self.photos.last()
    }
}
