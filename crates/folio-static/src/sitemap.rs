//! `sitemap.xml` and `robots.txt`.

use std::borrow::Cow;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: String,
    /// `YYYY-MM-DD`
    pub lastmod: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

impl Sitemap {
    /// Add a site path such as `/posts/hello/` under `site_url`.
    pub fn push(&mut self, site_url: &str, path: &str, lastmod: Option<String>) {
        self.urls.push(UrlEntry {
            loc: absolute_url(site_url, path),
            lastmod,
        });
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 96);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!("<urlset xmlns=\"{SITEMAP_NS}\">\n"));

        for url in &self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&url.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = &url.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&escape_xml(lastmod));
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Join the site origin and a root-relative path with exactly one slash.
pub fn absolute_url(site_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        site_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `robots.txt` allowing everything, pointing at the sitemap when one exists.
pub fn robots_txt(sitemap_url: Option<&str>) -> String {
    let mut robots = String::from("User-agent: *\nAllow: /\n");
    if let Some(url) = sitemap_url {
        robots.push_str(&format!("Sitemap: {url}\n"));
    }
    robots
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_xml() {
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(
            escape_xml("/search?q=a&b='c'"),
            "/search?q=a&amp;b=&apos;c&apos;"
        );
        assert!(matches!(escape_xml("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn writes_entries_in_order() {
        let mut sitemap = Sitemap::default();
        sitemap.push("https://example.com/", "/", None);
        sitemap.push(
            "https://example.com",
            "/posts/hello/",
            Some("2024-03-05".to_string()),
        );

        let xml = sitemap.into_xml();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(&format!("<urlset xmlns=\"{SITEMAP_NS}\">")));
        let home = xml.find("<loc>https://example.com/</loc>").unwrap();
        let post = xml.find("<loc>https://example.com/posts/hello/</loc>").unwrap();
        assert!(home < post);
        assert_eq!(xml.matches("<lastmod>").count(), 1);
        assert!(xml.contains("<lastmod>2024-03-05</lastmod>"));
    }

    #[test]
    fn empty_sitemap_is_valid() {
        let xml = Sitemap::default().into_xml();
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn robots_with_and_without_sitemap() {
        assert_eq!(robots_txt(None), "User-agent: *\nAllow: /\n");
        assert_eq!(
            robots_txt(Some("https://example.com/sitemap.xml")),
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n"
        );
    }
}
