//! Trait definitions for rendering primitives.

use folio_content::Post;

use crate::markup::Markup;
use crate::project::ImageRef;
use crate::tags::Tag;

/// Props of the hero banner primitive.
#[derive(Debug, Clone, Default)]
pub struct HeroAvatar {
    pub title: Markup,
    pub description: Markup,
    pub avatar: Markup,
    pub social_buttons: Markup,
}

/// Props of a project card primitive.
#[derive(Debug, Clone)]
pub struct ProjectProps<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub link: &'a str,
    pub image: &'a ImageRef,
    /// Already-rendered tag list
    pub category: Markup,
}

/// Errors that can occur while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Invalid props for {primitive}: {message}")]
    InvalidProps {
        primitive: &'static str,
        message: String,
    },
}

/// Building blocks the page partials are composed from.
///
/// Implementations decide all structure and styling; partials only decide
/// what goes where.
pub trait Primitives: Send + Sync {
    /// Kit identifier (e.g., "boilerplate")
    fn name(&self) -> &'static str;

    /// A page section with an optional title row.
    fn section(&self, title: Option<Markup>, body: Markup) -> Result<Markup, RenderError>;

    /// Gradient-styled inline text.
    fn gradient_text(&self, content: Markup) -> Result<Markup, RenderError>;

    /// A single colored tag.
    fn tags(&self, tag: &Tag) -> Result<Markup, RenderError>;

    /// A project card.
    fn project(&self, props: ProjectProps<'_>) -> Result<Markup, RenderError>;

    /// A gallery of post cards, one per post, in the given order.
    fn blog_gallery(&self, posts: &[Post]) -> Result<Markup, RenderError>;

    /// Hero banner with title, description, avatar and social buttons.
    fn hero_avatar(&self, hero: HeroAvatar) -> Result<Markup, RenderError>;
}
