use crate::{
    core::value::Value,
    pagination::{
        error::ConfigError,
        token::{KeySetToken, KeySlot},
    },
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MIN_PAGE_SIZE: usize = 1;
pub const MAX_PAGE_SIZE: usize = 10_000;
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Direction applied uniformly to every field of the active field list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses leniently, falling back to ascending on unknown input.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for SortDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ConfigError::InvalidSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

pub fn validate_page_size(size: usize) -> Result<(), ConfigError> {
    if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
        return Err(ConfigError::PageSizeOutOfRange {
            size,
            min: MIN_PAGE_SIZE,
            max: MAX_PAGE_SIZE,
        });
    }
    Ok(())
}

/// One step of a keyset scan: where to resume, how much to fetch and in which
/// order, plus an opaque caller payload forwarded to the fetch collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct PagingRequest<P = ()> {
    pub key_set_token: KeySetToken,
    pub page_size: usize,
    pub sort_direction: SortDirection,
    /// Forwarded to the fetch collaborator as-is; never enforced by the driver.
    pub timeout: Option<u32>,
    pub payload: P,
}

impl<P> PagingRequest<P> {
    pub fn new(key_set_token: KeySetToken, payload: P) -> Self {
        PagingRequest {
            key_set_token,
            page_size: DEFAULT_PAGE_SIZE,
            sort_direction: SortDirection::default(),
            timeout: None,
            payload,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self {
        self.sort_direction = sort_direction;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<u32>) -> Self {
        self.timeout = timeout;
        self
    }

    /// A copy of this request resuming from `key_set_token`.
    pub fn with_token(&self, key_set_token: KeySetToken) -> Self
    where
        P: Clone,
    {
        PagingRequest {
            key_set_token,
            page_size: self.page_size,
            sort_direction: self.sort_direction,
            timeout: self.timeout,
            payload: self.payload.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_page_size(self.page_size)
    }

    /// Flattens the request into ordered key/value pairs for logging or transport.
    ///
    /// Order: `PageSize`, `SortDirection`, `Timeout`, one
    /// `KeySetToken.<Field>.Value` per set slot, then one
    /// `KeySetToken.DefaultFields` per default field.
    pub fn as_params(&self) -> Vec<(String, Value)> {
        let mut params = vec![
            ("PageSize".to_string(), Value::Int(self.page_size as i64)),
            (
                "SortDirection".to_string(),
                Value::String(self.sort_direction.to_string()),
            ),
            (
                "Timeout".to_string(),
                self.timeout.map(|t| Value::Int(t as i64)).unwrap_or(Value::Null),
            ),
        ];

        for (name, slot) in self.key_set_token.slots() {
            let value = match slot {
                KeySlot::Unset => continue,
                KeySlot::SetNull => Value::Null,
                KeySlot::SetValue(v) => v.clone(),
            };
            params.push((format!("KeySetToken.{name}.Value"), value));
        }

        for field in self.key_set_token.default_fields() {
            params.push((
                "KeySetToken.DefaultFields".to_string(),
                Value::String(field.clone()),
            ));
        }

        params
    }
}
