//! Page partials composed from [`Primitives`](crate::Primitives).
//!
//! Partials are stateless: each one maps its props to markup in a single pass and
//! leaves all structure and styling to the kit.

mod hero;
mod projects;
mod recent_posts;

pub use hero::Hero;
pub use projects::ProjectList;
pub use recent_posts::RecentPosts;

use crate::markup::Markup;
use crate::primitives::{Primitives, RenderError};

/// A reusable unit of page composition.
pub trait Partial {
    fn render(&self, kit: &dyn Primitives) -> Result<Markup, RenderError>;
}

/// `Recent <gradient>{highlight}</gradient>`
fn recent_title(kit: &dyn Primitives, highlight: &str) -> Result<Markup, RenderError> {
    Ok(Markup::concat([
        Markup::text("Recent "),
        kit.gradient_text(Markup::text(highlight))?,
    ]))
}

/// Title row with a right-aligned navigation link.
fn title_with_link(title: Markup, href: &str, label: &str) -> Markup {
    Markup::wrap(
        "div",
        "flex items-baseline justify-between",
        Markup::concat([
            Markup::raw(format!("<div>{title}</div>")),
            Markup::wrap("div", "text-sm", Markup::link(href, Markup::text(label))),
        ]),
    )
}
