#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use blogfront::application::AppError;
use blogfront::infra::http::Credentials;

/// Resolve session cookies, preferring the file over the env value.
///
/// Neither source given means an anonymous request.
pub fn read_credentials(
    file: Option<PathBuf>,
    env_value: Option<String>,
) -> Result<Credentials, AppError> {
    if let Some(path) = file {
        let raw =
            fs::read_to_string(&path).map_err(|source| AppError::cookie_file(path, source))?;
        return Ok(Credentials::parse_cookie_header(raw.trim()));
    }
    Ok(env_value
        .as_deref()
        .map(Credentials::parse_cookie_header)
        .unwrap_or_default())
}
