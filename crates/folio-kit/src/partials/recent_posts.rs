use folio_content::Post;

use crate::markup::Markup;
use crate::partials::{recent_title, title_with_link, Partial};
use crate::primitives::{Primitives, RenderError};

/// Gallery of posts under a "Recent Posts" heading.
///
/// The list is shown as given; choosing and ordering posts is up to the caller.
#[derive(Debug, Clone, Copy)]
pub struct RecentPosts<'a> {
    pub post_list: &'a [Post],
}

impl<'a> RecentPosts<'a> {
    pub fn new(post_list: &'a [Post]) -> Self {
        Self { post_list }
    }
}

impl Partial for RecentPosts<'_> {
    fn render(&self, kit: &dyn Primitives) -> Result<Markup, RenderError> {
        let title = title_with_link(recent_title(kit, "Posts")?, "/posts", "View all Posts");
        kit.section(Some(title), kit.blog_gallery(self.post_list)?)
    }
}
