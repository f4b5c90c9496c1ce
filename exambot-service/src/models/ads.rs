//! Advertisement layout model.

use serde::{Deserialize, Serialize};

/// One advertising slot: the image to show and where a click goes.
///
/// Both fields are free strings; URL well-formedness is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdBlock {
    pub image_url: String,
    pub link_url: String,
}

impl AdBlock {
    pub fn is_empty(&self) -> bool {
        self.image_url.is_empty() && self.link_url.is_empty()
    }
}

/// The full layout. All six slots are required on input and always present
/// on output; `Default` is the empty layout served before anything is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdsConfiguration {
    pub left1: AdBlock,
    pub left2: AdBlock,
    pub right1: AdBlock,
    pub right2: AdBlock,
    pub top: AdBlock,
    pub bottom: AdBlock,
}

impl AdsConfiguration {
    pub fn slots(&self) -> [(&'static str, &AdBlock); 6] {
        [
            ("left1", &self.left1),
            ("left2", &self.left2),
            ("right1", &self.right1),
            ("right2", &self.right2),
            ("top", &self.top),
            ("bottom", &self.bottom),
        ]
    }

    /// Number of slots carrying an image or a link.
    pub fn filled_slots(&self) -> usize {
        self.slots().iter().filter(|(_, block)| !block.is_empty()).count()
    }
}
