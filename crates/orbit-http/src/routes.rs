//! URL construction for the backend routes.
//!
//! Pure functions resolving each route against the configured base URL.

use orbit_core::ObserverLocation;
use url::Url;

use crate::error::HttpResult;

const ASK_PATH: &str = "api/ask";
const SATELLITE_PATH: &str = "api/iss-position";
const STATUS_PATH: &str = "test";

/// Parse the configured base URL.
///
/// A trailing slash is added when missing so that routes resolve below any
/// path prefix (`http://host/guide` + `api/ask` → `http://host/guide/api/ask`).
pub fn parse_base_url(base: &str) -> HttpResult<Url> {
    let trimmed = base.trim();
    let mut url = Url::parse(trimmed)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// `POST {base}/api/ask`
pub fn build_ask_url(base: &Url) -> HttpResult<Url> {
    Ok(base.join(ASK_PATH)?)
}

/// `GET {base}/api/iss-position?lat=&lng=`
pub fn build_satellite_url(base: &Url, observer: ObserverLocation) -> HttpResult<Url> {
    let mut url = base.join(SATELLITE_PATH)?;
    url.query_pairs_mut()
        .append_pair("lat", &observer.latitude.to_string())
        .append_pair("lng", &observer.longitude.to_string());
    Ok(url)
}

/// `GET {base}/test`
pub fn build_status_url(base: &Url) -> HttpResult<Url> {
    Ok(base.join(STATUS_PATH)?)
}
