//! Display records for portfolio projects.

use serde::Deserialize;

use crate::tags::Tag;

/// Image source and alt text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

/// One project shown in the projects list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectCard {
    pub name: String,
    pub description: String,
    /// Target of the card's links
    pub link: String,
    pub image: ImageRef,
    /// Tags in display order
    #[serde(default)]
    pub category: Vec<Tag>,
}
