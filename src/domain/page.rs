use serde_json::Value;

/// One backend-specific document (post, comment, user, tag) as returned on
/// the wire. Consumed by the normalizer, never retained.
pub type RawItem = Value;

/// One page of a cursor-paginated endpoint, already unwrapped from the
/// backend's envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<RawItem>,
    pub next_cursor: Option<String>,
}

impl Page {
    pub fn new(items: Vec<RawItem>, next_cursor: Option<String>) -> Self {
        // Backends signal the end with null, "" or a missing key.
        let next_cursor = next_cursor.filter(|c| !c.is_empty());
        Self { items, next_cursor }
    }

    pub fn last(items: Vec<RawItem>) -> Self {
        Self::new(items, None)
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}
