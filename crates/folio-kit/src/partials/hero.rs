use serde::Deserialize;

use crate::markup::Markup;
use crate::partials::Partial;
use crate::primitives::{HeroAvatar, Primitives, RenderError};

const TITLE_PREFIX: &str = "Welcome to ";
const SITE_NAME: &str = "Vaughan's Tech";
const DESCRIPTION: &str =
    "This is a portfolio site for Michael Vaughan. Feel free to explore all of my projects and interests";

/// Introductory banner at the top of the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Hero {
    /// When set, the description links to this "about" page.
    #[serde(rename = "about")]
    pub about_link: Option<String>,
}

impl Hero {
    pub fn with_about(href: impl Into<String>) -> Self {
        Self {
            about_link: Some(href.into()),
        }
    }
}

impl Partial for Hero {
    fn render(&self, kit: &dyn Primitives) -> Result<Markup, RenderError> {
        let title = Markup::concat([
            Markup::text(TITLE_PREFIX),
            kit.gradient_text(Markup::text(SITE_NAME))?,
        ]);

        let mut description = Markup::text(DESCRIPTION);
        if let Some(href) = &self.about_link {
            description.push(Markup::text(", or read more "));
            description.push(Markup::link(href, Markup::text("about me")));
        }

        let banner = kit.hero_avatar(HeroAvatar {
            title,
            description,
            avatar: Markup::empty(),
            social_buttons: Markup::empty(),
        })?;

        kit.section(None, banner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boilerplate::BoilerplateKit;

    #[test]
    fn site_name_is_gradient_text() {
        let html = Hero::default().render(&BoilerplateKit::new()).unwrap();

        assert!(html.as_str().contains(
            r#"Welcome to <span class="bg-gradient-to-br from-sky-500 to-cyan-400 bg-clip-text text-transparent">Vaughan&#39;s Tech</span>"#
        ));
    }

    #[test]
    fn plain_description_has_no_link() {
        let html = Hero::default().render(&BoilerplateKit::new()).unwrap();

        assert!(html.as_str().contains(DESCRIPTION));
        assert!(!html.as_str().contains("<a "));
    }

    #[test]
    fn about_link_is_inline() {
        let html = Hero::with_about("/about/")
            .render(&BoilerplateKit::new())
            .unwrap();

        assert!(html
            .as_str()
            .contains(r#"interests, or read more <a href="/about/">about me</a>"#));
    }
}
