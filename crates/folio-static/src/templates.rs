//! Page layouts.

use minijinja::Environment;
use serde::Serialize;

/// A navigation item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Whether this is the active page
    pub active: bool,
}

/// Post metadata shown above an article.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleMeta {
    pub date: String,
    pub iso_date: String,
    pub img_src: String,
    pub img_alt: String,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Meta description
    pub description: String,
    /// Site title
    pub site_title: String,
    pub author: String,
    /// Rendered content HTML
    pub content: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Stylesheet href, when one is generated
    pub stylesheet: Option<String>,
    /// Live reload client script, set by the dev server
    pub live_reload: Option<String>,
    /// Absolute URL of this page
    pub canonical: Option<String>,
    /// Copyright year in the footer
    pub year: Option<i32>,
    pub article: Option<ArticleMeta>,
}

/// Which layout wraps the page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Partials composed full-width
    Home,
    /// A blog post with date and cover image
    Article,
    /// A plain markdown page
    Markdown,
}

impl Layout {
    pub const fn template(self) -> &'static str {
        match self {
            Self::Home => "home.html",
            Self::Article => "article.html",
            Self::Markdown => "markdown.html",
        }
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in layouts.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("built-in layout template must parse");
        }

        Self { env }
    }

    /// Render a page with the given layout.
    pub fn render_page(&self, layout: Layout, context: &Context) -> Result<String, minijinja::Error> {
        self.env.get_template(layout.template())?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", BASE_TEMPLATE),
    ("navbar.html", NAVBAR_TEMPLATE),
    ("footer.html", FOOTER_TEMPLATE),
    ("home.html", HOME_TEMPLATE),
    ("article.html", ARTICLE_TEMPLATE),
    ("markdown.html", MARKDOWN_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if title and title != site_title %}{{ title }} | {% endif %}{{ site_title }}</title>
  <meta name="description" content="{{ description }}">
  {% if author %}<meta name="author" content="{{ author }}">
  {% endif %}{% if canonical %}<link rel="canonical" href="{{ canonical }}">
  {% endif %}{% if stylesheet %}<link rel="stylesheet" href="{{ stylesheet }}">
  {% endif %}</head>
<body class="bg-slate-900 text-gray-100 antialiased">
  {% include "navbar.html" %}
  <main>
    {% block content %}{% endblock %}
  </main>
  {% include "footer.html" %}
  {% if live_reload %}<script src="{{ live_reload }}"></script>
  {% endif %}</body>
</html>"##;

const NAVBAR_TEMPLATE: &str = r##"<div class="mx-auto max-w-screen-lg px-3 py-6">
  <div class="flex flex-col gap-y-3 sm:flex-row sm:items-center sm:justify-between">
    <a href="/">
      <div class="bg-gradient-to-br from-sky-500 to-cyan-400 bg-clip-text text-xl font-bold text-transparent">{{ site_title }}</div>
    </a>
    <nav>
      <ul class="flex gap-x-3 font-medium text-gray-200">
      {%- for item in nav %}
        <li><a class="hover:text-white{% if item.active %} text-cyan-400{% endif %}" href="{{ item.path }}"{% if item.active %} aria-current="page"{% endif %}>{{ item.title }}</a></li>
      {%- endfor %}
      </ul>
    </nav>
  </div>
</div>"##;

const FOOTER_TEMPLATE: &str = r##"<div class="mx-auto max-w-screen-lg px-3 py-6">
  <div class="border-t border-gray-600 pt-5">
    <div class="text-sm text-gray-200">
      &copy; Copyright {% if year %}{{ year }} {% endif %}by {{ author or site_title }}.
    </div>
  </div>
</div>"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}{{ content | safe }}{% endblock %}"##;

const ARTICLE_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<div class="mx-auto max-w-screen-lg px-3 py-6">
  <h1 class="text-center text-3xl font-bold">{{ title }}</h1>
  <div class="mt-2 text-center text-sm text-gray-400">
    <time datetime="{{ article.iso_date }}">{{ article.date }}</time>{% if author %} by {{ author }}{% endif %}
  </div>
  {% if article.img_src %}<div class="mx-auto mt-5 max-w-prose">
    <div class="aspect-w-3 aspect-h-2">
      <img class="h-full w-full rounded-lg object-cover object-center" src="{{ article.img_src }}" alt="{{ article.img_alt }}" loading="lazy">
    </div>
  </div>
  {% endif %}<div class="prose prose-invert mx-auto mt-8">
    {{ content | safe }}
  </div>
</div>
{% endblock %}"##;

const MARKDOWN_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<div class="mx-auto max-w-screen-lg px-3 py-6">
  <div class="prose prose-invert mx-auto">
    <h1>{{ title }}</h1>
    {{ content | safe }}
  </div>
</div>
{% endblock %}"##;
