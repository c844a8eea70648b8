use crate::pagination::{
    error::ConfigError,
    request::{DEFAULT_PAGE_SIZE, PagingRequest, SortDirection, validate_page_size},
    token::KeySetToken,
};
use serde::{Deserialize, Serialize};

/// User-facing paging configuration, validated before any request is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingSettings {
    pub page_size: usize,
    pub sort_direction: SortDirection,
    pub timeout: Option<u32>,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort_direction: SortDirection::Asc,
            timeout: None,
        }
    }
}

impl PagingSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_page_size(self.page_size)
    }

    /// Validates the settings and builds the first request of a scan.
    pub fn into_request<P>(
        self,
        key_set_token: KeySetToken,
        payload: P,
    ) -> Result<PagingRequest<P>, ConfigError> {
        self.validate()?;

        Ok(PagingRequest::new(key_set_token, payload)
            .with_page_size(self.page_size)
            .with_sort_direction(self.sort_direction)
            .with_timeout(self.timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let settings: PagingSettings = serde_json::from_str(r#"{"sort_direction": "desc"}"#).unwrap();
        assert_eq!(settings.page_size, 1000);
        assert_eq!(settings.sort_direction, SortDirection::Desc);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_page_size() {
        let settings = PagingSettings {
            page_size: 20_000,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::PageSizeOutOfRange { size: 20_000, .. })
        ));
    }
}
