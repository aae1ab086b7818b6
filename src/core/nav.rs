//! Active navigation link.
//!
//! The site has two families of pages: the regular ones and the `-data`
//! variants, each with its own home. A `./` link points at the home of the
//! family the visitor is currently in.

#[cfg(feature = "serde")]
use serde::Serialize;

pub const DEFAULT_PAGE: &str = "index.html";
pub const DATA_HOME: &str = "index-data.html";

/// The page being viewed, derived from the location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPage {
    name: String,
}

impl CurrentPage {
    /// Last path segment, lowercased. `/` and `` map to `index.html`.
    pub fn from_path(path: &str) -> Self {
        let last = path.rsplit('/').next().unwrap_or("");
        let name = if last.is_empty() {
            DEFAULT_PAGE.to_string()
        } else {
            last.to_lowercase()
        };
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_data_page(&self) -> bool {
        self.name.contains("-data")
    }

    pub fn home(&self) -> &'static str {
        if self.is_data_page() {
            DATA_HOME
        } else {
            DEFAULT_PAGE
        }
    }

    pub fn normalize_href(&self, href: &str) -> String {
        let href = href.to_lowercase();
        if href == "./" {
            self.home().to_string()
        } else {
            href
        }
    }

    pub fn is_active(&self, href: &str) -> bool {
        self.normalize_href(href) == self.name
    }
}

/// Attribute state for one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LinkView {
    /// Toggles the `isActive` class.
    pub active: bool,
    /// `Some("page")` sets `aria-current`, `None` removes it.
    pub aria_current: Option<&'static str>,
}

impl LinkView {
    pub fn for_active(active: bool) -> Self {
        Self {
            active,
            aria_current: if active { Some("page") } else { None },
        }
    }
}

/// One view per href, in order.
pub fn highlight<'a, I>(page: &CurrentPage, hrefs: I) -> Vec<LinkView>
where
    I: IntoIterator<Item = &'a str>,
{
    hrefs
        .into_iter()
        .map(|h| LinkView::for_active(page.is_active(h)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_page_from_path() {
        assert_eq!(CurrentPage::from_path("/").name(), "index.html");
        assert_eq!(CurrentPage::from_path("").name(), "index.html");
        assert_eq!(CurrentPage::from_path("/site/Servicios.HTML").name(), "servicios.html");
        assert_eq!(CurrentPage::from_path("contacto.html").name(), "contacto.html");
    }

    #[test]
    fn home_link_follows_page_family() {
        let green = CurrentPage::from_path("/index.html");
        assert!(green.is_active("./"));
        assert!(!green.is_active("index-data.html"));

        let data = CurrentPage::from_path("/index-data.html");
        assert!(data.is_data_page());
        assert!(data.is_active("./"));
        assert!(!data.is_active("index.html"));

        let data_contact = CurrentPage::from_path("/contacto-data.html");
        assert_eq!(data_contact.normalize_href("./"), "index-data.html");
        assert!(!data_contact.is_active("./"));
    }

    #[test]
    fn empty_href_is_never_active() {
        let p = CurrentPage::from_path("/");
        assert!(!p.is_active(""));
    }

    #[test]
    fn highlight_marks_exactly_the_matching_links() {
        let p = CurrentPage::from_path("/servicios.html");
        let views = highlight(&p, ["./", "SERVICIOS.html", "contacto.html"]);
        assert_eq!(
            views,
            vec![
                LinkView::for_active(false),
                LinkView::for_active(true),
                LinkView::for_active(false),
            ]
        );
        assert_eq!(views[1].aria_current, Some("page"));
        assert_eq!(views[0].aria_current, None);
    }
}
