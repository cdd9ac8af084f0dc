//! Item records supplied by the data provider.

/// An opaque content record shown on the sphere.
///
/// The engine never mutates or persists items; it holds a read-only snapshot
/// for the lifetime of the mount. `image` and `payload` are opaque strings
/// the presentation layer interprets (texture key, deep link, etc.).
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    /// Stable identifier, unique within one snapshot.
    pub id: u64,
    /// Image / content reference.
    pub image: String,
    /// Optional display title.
    pub title: Option<String>,
    /// Optional display description.
    pub description: Option<String>,
    /// Optional payload forwarded untouched on selection.
    pub payload: Option<String>,
}

impl GridItem {
    pub fn new(id: u64, image: impl Into<String>) -> Self {
        Self {
            id,
            image: image.into(),
            title: None,
            description: None,
            payload: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}
