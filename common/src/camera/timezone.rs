use std::{ collections::HashMap, fmt, num::ParseIntError };

use chrono::FixedOffset;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref OPTION: Regex = Regex::new(
        r#"(?im)<\s*option\s*value\s*=\s*"([0-9]+)"\s*>\s*(UTC([+-])([0-9]+):([0-9]+))\s*</\s*option\s*>"#
    ).expect("timezone option pattern");
}

/// A fixed offset as the camera names it, e.g. `UTC+03:30`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timezone {
    pub label: String,
    pub offset: FixedOffset,
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum TimezoneError {
    #[error("cannot parse timezone id {0:?}. {1}")]
    Id(String, ParseIntError),

    #[error("cannot parse offset hours {0:?}. {1}")]
    Hour(String, ParseIntError),

    #[error("cannot parse offset minutes {0:?}. {1}")]
    Minute(String, ParseIntError),

    #[error("offset of {0} is out of range")]
    Offset(String),
}

/// Camera timezone id to offset, as listed on the camera's time settings page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timezones(HashMap<u32, Timezone>);

impl Timezones {
    /// Collects every `<option value="ID">UTC±HH:MM</option>` in `html`.
    /// A page without any options gives an empty table.
    pub fn from_html(html: &str) -> Result<Self, TimezoneError> {
        let mut table = HashMap::new();

        for c in OPTION.captures_iter(html) {
            let (id, label, sign, hour, minute) = (&c[1], &c[2], &c[3], &c[4], &c[5]);

            let id = id.parse::<u32>().map_err(|e| TimezoneError::Id(id.to_string(), e))?;
            let hour = hour.parse::<i32>().map_err(|e| TimezoneError::Hour(hour.to_string(), e))?;
            let minute = minute.parse::<i32>().map_err(|e| TimezoneError::Minute(minute.to_string(), e))?;

            let seconds = hour.checked_mul(3600)
                .and_then(|h| minute.checked_mul(60).and_then(|m| h.checked_add(m)))
                .map(|s| if sign == "-" { -s } else { s });
            let offset = seconds
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| TimezoneError::Offset(label.to_string()))?;

            table.insert(id, Timezone { label: label.to_string(), offset });
        }

        Ok(Timezones(table))
    }

    pub fn get(&self, id: u32) -> Option<&Timezone> {
        self.0.get(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
