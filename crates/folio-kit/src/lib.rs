//! Rendering primitives and page partials for the portfolio site.
//!
//! The partials ([`Hero`], [`ProjectList`], [`RecentPosts`]) only compose; every
//! structural and styling decision belongs to a [`Primitives`] implementation.
//! [`BoilerplateKit`] is the stock implementation, built on minijinja templates
//! and utility classes.

pub mod boilerplate;
pub mod markup;
pub mod partials;
pub mod primitives;
pub mod project;
pub mod tags;

#[cfg(test)]
mod testing;

pub use boilerplate::BoilerplateKit;
pub use markup::Markup;
pub use partials::{Hero, Partial, ProjectList, RecentPosts};
pub use primitives::{HeroAvatar, Primitives, ProjectProps, RenderError};
pub use project::{ImageRef, ProjectCard};
pub use tags::{ColorTags, Tag};
