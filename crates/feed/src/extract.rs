//! Latest-entry extraction
//!
//! Scopes the search to the first item, then takes the first content
//! element inside it. The feed's channel-level description is only used
//! when the feed has no item at all and fallback is enabled.

use dom::{find_first_tag_content, first_element_by_tag, DomArena, DomSerializer};
use serde::{Deserialize, Serialize};

use crate::config::FeedConfig;
use crate::error::{FeedError, Result};

/// Which elements to look for
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub item_tag: String,
    pub content_tag: String,
    pub fallback_to_root: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::from(&FeedConfig::default())
    }
}

impl From<&FeedConfig> for ExtractOptions {
    fn from(config: &FeedConfig) -> Self {
        Self {
            item_tag: config.item_tag.clone(),
            content_tag: config.content_tag.clone(),
            fallback_to_root: config.fallback_to_root,
        }
    }
}

/// The extracted entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestEntry {
    /// Text content of the content element, untrimmed
    pub content: String,
    /// Title of the scoping item, if it has one
    pub title: Option<String>,
    /// Where the content element sits, e.g. `/rss[1]/channel[1]/item[1]/description[1]`
    pub location: String,
}

pub fn latest_entry(arena: &DomArena, options: &ExtractOptions) -> Result<LatestEntry> {
    let root = arena.root()?;

    let item = first_element_by_tag(root, &options.item_tag);
    let scope = match item {
        Some(item) => item,
        None if options.fallback_to_root => {
            tracing::debug!(tag = %options.item_tag, "no item element, searching whole document");
            root
        }
        None => {
            return Err(FeedError::NotFound {
                tag: options.item_tag.clone(),
            })
        }
    };

    let element =
        first_element_by_tag(scope, &options.content_tag).ok_or_else(|| FeedError::NotFound {
            tag: options.content_tag.clone(),
        })?;

    let title = item.and_then(|item| find_first_tag_content(item, "title"));
    let location = DomSerializer::new().generate_xpath(arena, element.id())?;

    Ok(LatestEntry {
        content: element.text_content(),
        title,
        location,
    })
}
