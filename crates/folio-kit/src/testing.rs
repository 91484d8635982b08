//! Test helpers shared by the partial tests.

use std::sync::Mutex;

use folio_content::{parse_document, Post, PostFrontmatter};

use crate::markup::Markup;
use crate::primitives::{HeroAvatar, Primitives, ProjectProps, RenderError};
use crate::tags::Tag;

pub fn sample_post(slug: &str, title: &str, date: &str) -> Post {
    let source = format!(
        "---\ntitle: {title}\ndescription: About {title}\npubDate: {date}\nimgSrc: /{slug}.png\nimgAlt: {title} cover\n---\n# {title}\n"
    );
    let doc = parse_document::<PostFrontmatter>(&source).unwrap();
    Post {
        slug: slug.to_string(),
        url: format!("/posts/{slug}/"),
        frontmatter: doc.frontmatter.clone().unwrap(),
        doc,
        source_path: format!("{slug}.md").into(),
    }
}

/// Kit that records what it was asked to render.
#[derive(Default)]
pub struct RecordingKit {
    galleries: Mutex<Vec<Vec<String>>>,
}

impl RecordingKit {
    pub fn gallery_slugs(&self) -> Vec<Vec<String>> {
        self.galleries.lock().unwrap().clone()
    }
}

impl Primitives for RecordingKit {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn section(&self, _title: Option<Markup>, body: Markup) -> Result<Markup, RenderError> {
        Ok(body)
    }

    fn gradient_text(&self, content: Markup) -> Result<Markup, RenderError> {
        Ok(content)
    }

    fn tags(&self, tag: &Tag) -> Result<Markup, RenderError> {
        Ok(Markup::text(&tag.label))
    }

    fn project(&self, props: ProjectProps<'_>) -> Result<Markup, RenderError> {
        Ok(Markup::text(props.name))
    }

    fn blog_gallery(&self, posts: &[Post]) -> Result<Markup, RenderError> {
        self.galleries
            .lock()
            .unwrap()
            .push(posts.iter().map(|p| p.slug.clone()).collect());
        Ok(Markup::empty())
    }

    fn hero_avatar(&self, hero: HeroAvatar) -> Result<Markup, RenderError> {
        Ok(hero.title)
    }
}
