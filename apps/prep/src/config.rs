use anyhow::{Context, Result};

/// Fallback backend address when neither the runtime nor the build environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Backend URL baked in at compile time, if `PREP_API_URL` was set during the build.
const BUILD_API_URL: Option<&str> = option_env!("PREP_API_URL");

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = resolve_api_url(std::env::var("PREP_API_URL").ok(), BUILD_API_URL);
        reqwest::Url::parse(&api_url)
            .with_context(|| format!("PREP_API_URL '{api_url}' is not a valid URL"))?;

        Ok(Config {
            api_url,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

/// Runtime value wins over the build-time value, which wins over localhost.
/// Blank values are skipped and a trailing slash is dropped.
fn resolve_api_url(runtime: Option<String>, build_time: Option<&str>) -> String {
    let chosen = runtime
        .filter(|v| !v.trim().is_empty())
        .or_else(|| build_time.filter(|v| !v.trim().is_empty()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    chosen.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_url_takes_precedence() {
        let url = resolve_api_url(Some("https://api.example.com".into()), Some("http://build:1"));
        assert_eq!(url, "https://api.example.com");
    }

    #[test]
    fn test_build_time_url_used_when_runtime_missing() {
        assert_eq!(resolve_api_url(None, Some("http://build:9000")), "http://build:9000");
    }

    #[test]
    fn test_falls_back_to_localhost() {
        assert_eq!(resolve_api_url(None, None), DEFAULT_API_URL);
        assert_eq!(resolve_api_url(Some("   ".into()), None), DEFAULT_API_URL);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(
            resolve_api_url(Some("http://localhost:8000/".into()), None),
            "http://localhost:8000"
        );
    }
}
