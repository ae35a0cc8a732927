//! Screening of image URLs returned by the picture search service or typed by hand.

use url::Url;

const YANDEX_IMAGE_HOST: &str = "avatars.mds.yandex.net";
const BING_HOST_SUFFIX: &str = "bing.net";
const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"];
const SUSPICIOUS_QUERY_FRAGMENTS: [&str; 4] = ["javascript:", "data:", "eval(", "alert("];

/// Returns true when `raw` looks like a directly loadable image.
///
/// Yandex and Bing thumbnails carry no file extension, so they are recognised
/// by their path layout instead.
#[must_use]
pub fn is_valid_image_url(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw.trim()) else {
        return false;
    };
    if has_suspicious_query(&url) {
        return false;
    }

    let host = url.host_str().unwrap_or_default();
    let path = url.path();

    if host == YANDEX_IMAGE_HOST {
        return (path == "/i" && has_query_param(&url, "id"))
            || path.starts_with("/get-")
            || path.starts_with("/images/");
    }

    if host.ends_with(BING_HOST_SUFFIX) {
        return path.contains("/th/id/") && has_query_param(&url, "pid");
    }

    let path = path.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Keep only the candidates accepted by [`is_valid_image_url`], preserving order.
#[must_use]
pub fn filter_image_candidates<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    urls.into_iter()
        .map(Into::into)
        .filter(|url| is_valid_image_url(url))
        .collect()
}

fn has_query_param(url: &Url, name: &str) -> bool {
    url.query_pairs().any(|(key, _)| key == name)
}

fn has_suspicious_query(url: &Url) -> bool {
    let query = url.query().unwrap_or_default().to_ascii_lowercase();
    SUSPICIOUS_QUERY_FRAGMENTS
        .iter()
        .any(|fragment| query.contains(fragment))
}
