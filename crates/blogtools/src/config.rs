use crate::prelude::*;
use blogtools_core::article::Locale;

/// Resolved settings shared by every command
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub locale: Locale,
    pub per_page: usize,
    pub max_visible: usize,
    pub verbose: bool,
}

impl Config {
    /// Validate the global arguments (already merged with their env vars)
    pub fn from_global(global: &crate::Global) -> Result<Self, Error> {
        let locale = global
            .locale
            .parse::<Locale>()
            .map_err(|e| Error::Config(e.to_string()))?;

        if global.per_page == 0 {
            return Err(Error::Config("--per-page must be at least 1".to_string()));
        }

        let api_url = global.api_url.trim().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "--api-url must start with http:// or https://, got {:?}",
                global.api_url
            )));
        }

        Ok(Self {
            api_url,
            locale,
            per_page: global.per_page,
            max_visible: global.max_visible.max(1),
            verbose: global.verbose,
        })
    }

    /// Default list path for the configured locale, e.g. `/en/blog`
    pub fn blog_path(&self) -> String {
        format!("/{}/blog", self.locale)
    }
}

#[cfg(test)]
pub(crate) fn test_global(api_url: &str) -> crate::Global {
    crate::Global {
        api_url: api_url.to_string(),
        locale: "en".to_string(),
        per_page: 9,
        max_visible: 5,
        verbose: false,
    }
}
