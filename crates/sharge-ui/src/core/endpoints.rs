//! Request contract builders for the file-manager endpoints.
//!
//! Every identifier is percent-encoded individually; the download separator is
//! emitted verbatim between encoded segments.

/// Separator placed between identifiers in the download query.
pub const DOWNLOAD_SEPARATOR: &str = "&f=";

/// Multipart field name carrying each uploaded file.
pub const UPLOAD_FIELD: &str = "files[]";

/// URL builder rooted at the configured base URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Build endpoints under `base_url` (empty for same-origin relative URLs).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// View URL for a single file.
    #[must_use]
    pub fn view_href(&self, id: &str) -> String {
        format!("{}/view/{}", self.base_url, urlencoding::encode(id))
    }

    /// Download URL for one or more identifiers.
    #[must_use]
    pub fn download_href<S: AsRef<str>>(&self, ids: &[S]) -> String {
        let joined = ids
            .iter()
            .map(|id| urlencoding::encode(id.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(DOWNLOAD_SEPARATOR);
        format!("{}/dl?f={joined}", self.base_url)
    }

    /// Create-directory request path.
    #[must_use]
    pub fn mkdir_path(&self, name: &str) -> String {
        format!("{}/mkdir?d={}", self.base_url, urlencoding::encode(name))
    }

    /// Rename request path.
    #[must_use]
    pub fn rename_path(&self, old_path: &str, new_path: &str) -> String {
        format!(
            "{}/re?o={}&n={}",
            self.base_url,
            urlencoding::encode(old_path),
            urlencoding::encode(new_path)
        )
    }

    /// Delete request path for a single identifier.
    #[must_use]
    pub fn delete_path(&self, id: &str) -> String {
        format!("{}/rm?f={}", self.base_url, urlencoding::encode(id))
    }

    /// Multipart upload endpoint.
    #[must_use]
    pub fn upload_path(&self) -> String {
        format!("{}/upload", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_href_encodes_identifier() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.view_href("a.txt"), "/view/a.txt");
        assert_eq!(endpoints.view_href("b/c d.txt"), "/view/b%2Fc%20d.txt");
    }

    #[test]
    fn download_href_joins_encoded_segments() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.download_href(&["a.txt", "b/c.txt"]),
            "/dl?f=a.txt&f=b%2Fc.txt"
        );
    }

    #[test]
    fn download_href_escapes_separator_inside_identifier() {
        let endpoints = Endpoints::default();
        let href = endpoints.download_href(&["x&f=y"]);
        assert_eq!(href, "/dl?f=x%26f%3Dy");
        assert_eq!(href.matches(DOWNLOAD_SEPARATOR).count(), 0);
    }

    #[test]
    fn action_paths_match_contracts() {
        let endpoints = Endpoints::new("http://host:8080/");
        assert_eq!(
            endpoints.mkdir_path("new dir"),
            "http://host:8080/mkdir?d=new%20dir"
        );
        assert_eq!(
            endpoints.rename_path("old.txt", "docs/new.txt"),
            "http://host:8080/re?o=old.txt&n=docs%2Fnew.txt"
        );
        assert_eq!(
            endpoints.delete_path("a b.txt"),
            "http://host:8080/rm?f=a%20b.txt"
        );
        assert_eq!(endpoints.upload_path(), "http://host:8080/upload");
    }
}
