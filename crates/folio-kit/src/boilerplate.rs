//! Template-backed primitives styled with utility classes.

use minijinja::{context, Environment};
use serde::Serialize;

use folio_content::Post;

use crate::markup::Markup;
use crate::primitives::{HeroAvatar, Primitives, ProjectProps, RenderError};
use crate::tags::Tag;

/// Data of one gallery card.
#[derive(Debug, Clone, Serialize)]
struct GalleryCard<'a> {
    url: &'a str,
    title: &'a str,
    description: &'a str,
    date: String,
    iso_date: String,
    img_src: &'a str,
    img_alt: &'a str,
}

impl<'a> From<&'a Post> for GalleryCard<'a> {
    fn from(post: &'a Post) -> Self {
        let fm = &post.frontmatter;
        Self {
            url: &post.url,
            title: &fm.title,
            description: &fm.description,
            date: fm.display_date(),
            iso_date: fm.iso_date(),
            img_src: &fm.img_src,
            img_alt: &fm.img_alt,
        }
    }
}

/// Primitives rendered from minijinja templates.
pub struct BoilerplateKit {
    env: Environment<'static>,
}

impl BoilerplateKit {
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("built-in primitive template must parse");
        }

        Self { env }
    }

    fn render<S: Serialize>(&self, template: &str, ctx: S) -> Result<Markup, RenderError> {
        let tmpl = self.env.get_template(template)?;
        Ok(Markup::raw(tmpl.render(ctx)?))
    }
}

impl Default for BoilerplateKit {
    fn default() -> Self {
        Self::new()
    }
}

impl Primitives for BoilerplateKit {
    fn name(&self) -> &'static str {
        "boilerplate"
    }

    fn section(&self, title: Option<Markup>, body: Markup) -> Result<Markup, RenderError> {
        self.render(
            "section.html",
            context! {
                title => title.map(Markup::into_string),
                body => body.as_str(),
            },
        )
    }

    fn gradient_text(&self, content: Markup) -> Result<Markup, RenderError> {
        self.render(
            "gradient_text.html",
            context! { content => content.as_str() },
        )
    }

    fn tags(&self, tag: &Tag) -> Result<Markup, RenderError> {
        self.render(
            "tags.html",
            context! {
                label => &tag.label,
                color_class => tag.color.class(),
            },
        )
    }

    fn project(&self, props: ProjectProps<'_>) -> Result<Markup, RenderError> {
        for (field, value) in [("name", props.name), ("link", props.link)] {
            if value.trim().is_empty() {
                return Err(RenderError::InvalidProps {
                    primitive: "project",
                    message: format!("{field} must not be empty"),
                });
            }
        }

        self.render(
            "project.html",
            context! {
                name => props.name,
                description => props.description,
                link => props.link,
                img_src => &props.image.src,
                img_alt => &props.image.alt,
                category => props.category.as_str(),
            },
        )
    }

    fn blog_gallery(&self, posts: &[Post]) -> Result<Markup, RenderError> {
        let cards: Vec<GalleryCard<'_>> = posts.iter().map(GalleryCard::from).collect();
        self.render("blog_gallery.html", context! { posts => cards })
    }

    fn hero_avatar(&self, hero: HeroAvatar) -> Result<Markup, RenderError> {
        self.render(
            "hero_avatar.html",
            context! {
                title => hero.title.as_str(),
                description => hero.description.as_str(),
                avatar => hero.avatar.as_str(),
                social_buttons => hero.social_buttons.as_str(),
            },
        )
    }
}

const TEMPLATES: [(&str, &str); 6] = [
    ("section.html", SECTION_TEMPLATE),
    ("gradient_text.html", GRADIENT_TEXT_TEMPLATE),
    ("tags.html", TAGS_TEMPLATE),
    ("project.html", PROJECT_TEMPLATE),
    ("blog_gallery.html", BLOG_GALLERY_TEMPLATE),
    ("hero_avatar.html", HERO_AVATAR_TEMPLATE),
];

const SECTION_TEMPLATE: &str = r##"<div class="mx-auto max-w-screen-lg px-3 py-6">
  {% if title %}<div class="mb-6 text-2xl font-bold">{{ title | safe }}</div>
  {% endif %}{{ body | safe }}
</div>"##;

const GRADIENT_TEXT_TEMPLATE: &str = r##"<span class="bg-gradient-to-br from-sky-500 to-cyan-400 bg-clip-text text-transparent">{{ content | safe }}</span>"##;

const TAGS_TEMPLATE: &str = r##"<div class="rounded-md px-2 py-1 text-xs font-semibold {{ color_class }}">{{ label }}</div>"##;

const PROJECT_TEMPLATE: &str = r##"<div class="flex flex-col items-center gap-x-8 rounded-md bg-slate-800 p-3 md:flex-row" data-card="project">
  <div class="shrink-0">
    <a href="{{ link }}">
      <img class="h-36 w-36 hover:translate-y-1" src="{{ img_src }}" alt="{{ img_alt }}" loading="lazy">
    </a>
  </div>
  <div>
    <div class="flex flex-col items-center gap-y-2 md:flex-row">
      <a class="hover:text-cyan-400" href="{{ link }}">
        <div class="text-xl font-semibold">{{ name }}</div>
      </a>
      <div class="ml-3 flex flex-wrap gap-2">{{ category | safe }}</div>
    </div>
    <p class="mt-3 text-gray-400">{{ description }}</p>
  </div>
</div>"##;

const BLOG_GALLERY_TEMPLATE: &str = r##"<div class="grid grid-cols-1 gap-6 md:grid-cols-2 lg:grid-cols-3">
{%- for post in posts %}
  <a class="hover:translate-y-1" href="{{ post.url }}" data-card="post">
    <div class="overflow-hidden rounded-md bg-slate-800">
      <div class="aspect-w-3 aspect-h-2">
        <img class="h-full w-full object-cover object-center" src="{{ post.img_src }}" alt="{{ post.img_alt }}" loading="lazy">
      </div>
      <div class="px-3 pt-4 pb-6 text-center">
        <h2 class="text-xl font-semibold">{{ post.title }}</h2>
        <div class="mt-1 text-xs text-gray-400"><time datetime="{{ post.iso_date }}">{{ post.date }}</time></div>
        <div class="mt-2 text-sm">{{ post.description }}</div>
      </div>
    </div>
  </a>
{%- endfor %}
</div>"##;

const HERO_AVATAR_TEMPLATE: &str = r##"<div class="flex flex-col items-center md:flex-row md:justify-between md:gap-x-24">
  <div>
    <h1 class="text-3xl font-bold">{{ title | safe }}</h1>
    <p class="mt-6 text-xl leading-9">{{ description | safe }}</p>
    <div class="mt-3 flex gap-1">{{ social_buttons | safe }}</div>
  </div>
  <div class="shrink-0">{{ avatar | safe }}</div>
</div>"##;
