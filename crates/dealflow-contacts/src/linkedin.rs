//! LinkedIn profile URL validation.

const PROFILE_MARKER: &str = "linkedin.com/in/";

const NON_PROFILE_PATHS: [&str; 6] = [
    "linkedin.com/company/",
    "linkedin.com/posts/",
    "linkedin.com/pub/dir/",
    "linkedin.com/feed/",
    "linkedin.com/jobs/",
    "linkedin.com/school/",
];

/// The trimmed URL when it points at a personal LinkedIn profile, otherwise
/// an empty string.
#[must_use]
pub fn validate_linkedin_url(url: &str) -> String {
    let url = url.trim();
    if !url.contains(PROFILE_MARKER) {
        return String::new();
    }
    if NON_PROFILE_PATHS.iter().any(|path| url.contains(path)) {
        return String::new();
    }
    url.to_string()
}
