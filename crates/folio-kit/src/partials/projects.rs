use crate::markup::Markup;
use crate::partials::{recent_title, title_with_link, Partial};
use crate::primitives::{Primitives, ProjectProps, RenderError};
use crate::project::{ImageRef, ProjectCard};
use crate::tags::{ColorTags, Tag};

/// Titled list of project cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectList {
    /// Cards in display order
    pub projects: Vec<ProjectCard>,

    /// Target of the "View all Projects" link, if shown
    pub view_all: Option<String>,
}

impl ProjectList {
    pub fn new(projects: Vec<ProjectCard>) -> Self {
        Self {
            projects,
            view_all: None,
        }
    }

    pub fn with_view_all(mut self, href: impl Into<String>) -> Self {
        self.view_all = Some(href.into());
        self
    }

    /// The projects shown when none are configured.
    pub fn default_projects() -> Vec<ProjectCard> {
        vec![
            ProjectCard {
                name: "Homemade Radios".to_string(),
                description: "Cheap 2.4GHz links between an Arduino and a Raspberry Pi \
                              using nRF24L01 transceivers"
                    .to_string(),
                link: "/projects/nrf24l01".to_string(),
                image: ImageRef {
                    src: "/images/projects/nrf24l01.png".to_string(),
                    alt: "nRF24L01 radio module".to_string(),
                },
                category: vec![
                    Tag::new("Arduino", ColorTags::Fuchsia),
                    Tag::new("Raspberry Pi", ColorTags::Lime),
                    Tag::new("Python", ColorTags::Sky),
                    Tag::new("C++", ColorTags::Rose),
                ],
            },
            ProjectCard {
                name: "Project 1".to_string(),
                description: "dummy text for description".to_string(),
                link: "/".to_string(),
                image: ImageRef {
                    src: "/".to_string(),
                    alt: "Image related to project".to_string(),
                },
                category: vec![
                    Tag::new("Astro.js", ColorTags::Fuchsia),
                    Tag::new("Web Design", ColorTags::Lime),
                    Tag::new("Tailwind.css", ColorTags::Sky),
                    Tag::new("TypeScript", ColorTags::Rose),
                ],
            },
        ]
    }
}

impl Default for ProjectList {
    fn default() -> Self {
        Self::new(Self::default_projects())
    }
}

impl Partial for ProjectList {
    fn render(&self, kit: &dyn Primitives) -> Result<Markup, RenderError> {
        let heading = recent_title(kit, "Projects")?;
        let title = match &self.view_all {
            Some(href) => title_with_link(heading, href, "View all Projects"),
            None => heading,
        };

        let mut cards = Markup::empty();
        for project in &self.projects {
            let category = project
                .category
                .iter()
                .map(|tag| kit.tags(tag))
                .collect::<Result<Vec<_>, _>>()?;

            cards.push(kit.project(ProjectProps {
                name: &project.name,
                description: &project.description,
                link: &project.link,
                image: &project.image,
                category: Markup::concat(category),
            })?);
        }

        kit.section(Some(title), Markup::wrap("div", "flex flex-col gap-6", cards))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boilerplate::BoilerplateKit;
    use pretty_assertions::assert_eq;
    use regex::Regex;

    fn tag_labels(html: &str) -> Vec<String> {
        let re = Regex::new(r#"text-xs font-semibold bg-[a-z]+-400 text-[a-z]+-900">([^<]*)</div>"#)
            .unwrap();
        re.captures_iter(html).map(|c| c[1].to_string()).collect()
    }

    #[test]
    fn renders_one_card_per_project() {
        let kit = BoilerplateKit::new();

        for n in 0..=2 {
            let list = ProjectList::new(ProjectList::default_projects().into_iter().take(n).collect());
            let html = list.render(&kit).unwrap();
            assert_eq!(html.as_str().matches(r#"data-card="project""#).count(), n);
        }
    }

    #[test]
    fn homemade_radios_tags_keep_order() {
        let radios = ProjectList::default_projects().remove(0);
        assert_eq!(radios.link, "/projects/nrf24l01");

        let html = ProjectList::new(vec![radios]).render(&BoilerplateKit::new()).unwrap();

        assert!(html.as_str().contains("Homemade Radios"));
        assert_eq!(
            tag_labels(html.as_str()),
            vec!["Arduino", "Raspberry Pi", "Python", "C++"]
        );
    }

    #[test]
    fn cards_show_name_and_description() {
        let html = ProjectList::default().render(&BoilerplateKit::new()).unwrap();
        let html = html.as_str();

        for project in ProjectList::default_projects() {
            assert!(html.contains(&project.name));
            assert!(html.contains(&project.description));
        }
        assert!(html.contains("bg-fuchsia-400 text-fuchsia-900"));
    }

    #[test]
    fn view_all_link_is_optional() {
        let kit = BoilerplateKit::new();

        let plain = ProjectList::default().render(&kit).unwrap();
        assert!(!plain.as_str().contains("View all Projects"));

        let linked = ProjectList::default()
            .with_view_all("/projects/")
            .render(&kit)
            .unwrap();
        assert!(linked
            .as_str()
            .contains(r#"<a href="/projects/">View all Projects</a>"#));
    }
}
