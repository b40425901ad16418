//! Form parsing and validation
//!
//! Submitted bodies are decoded into an ordered list of key/value pairs so
//! that repeated keys (`genres=Jazz&genres=Rock`) survive. Each form kind
//! declares its required, multi-valued and checkbox fields in a
//! [`FormSchema`]; a checkbox field is true iff its key was submitted at all.

use crate::db::{ArtistFields, ShowFields, VenueFields};
use crate::time::parse_start_time;
use crate::{Error, Result};

/// Raw submitted form, keys in submission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl FormData {
    /// First value for `key`, untrimmed
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Every non-blank value for `key`, trimmed, in submission order
    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Trimmed value, or `None` when absent or blank
    pub fn optional(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Trimmed value; absent or blank is a validation error naming `key`
    pub fn required(&self, key: &str) -> Result<String> {
        self.optional(key).ok_or_else(|| Error::missing(key))
    }
}

/// Field layout of one form kind
#[derive(Debug, Clone, Copy)]
pub struct FormSchema {
    pub required: &'static [&'static str],
    pub multi_valued: &'static [&'static str],
    /// Boolean fields derived from key presence
    pub checkboxes: &'static [&'static str],
}

impl FormSchema {
    /// Check required fields in declaration order
    pub fn validate(&self, form: &FormData) -> Result<()> {
        for field in self.required {
            form.required(field)?;
        }
        Ok(())
    }

    pub fn is_checkbox(&self, key: &str) -> bool {
        self.checkboxes.contains(&key)
    }

    pub fn checkbox(&self, form: &FormData, key: &str) -> bool {
        debug_assert!(self.is_checkbox(key), "{} is not a checkbox field", key);
        form.contains(key)
    }

    pub fn multi(&self, form: &FormData, key: &str) -> Vec<String> {
        debug_assert!(self.multi_valued.contains(&key), "{} is not multi-valued", key);
        form.get_all(key)
    }
}

pub const VENUE_FORM: FormSchema = FormSchema {
    required: &["name", "city", "state", "address"],
    multi_valued: &["genres"],
    checkboxes: &["seeking_talent"],
};

pub const ARTIST_FORM: FormSchema = FormSchema {
    required: &["name", "city", "state"],
    multi_valued: &["genres"],
    checkboxes: &["seeking_venue"],
};

pub const SHOW_FORM: FormSchema = FormSchema {
    required: &["venue_id", "artist_id", "start_time"],
    multi_valued: &[],
    checkboxes: &[],
};

pub fn parse_venue(form: &FormData) -> Result<VenueFields> {
    let schema = VENUE_FORM;
    schema.validate(form)?;

    Ok(VenueFields {
        name: form.required("name")?,
        genres: schema.multi(form, "genres"),
        address: form.required("address")?,
        city: form.required("city")?,
        state: form.required("state")?,
        phone: form.optional("phone"),
        website: form.optional("website"),
        facebook_link: form.optional("facebook_link"),
        seeking_talent: schema.checkbox(form, "seeking_talent"),
        seeking_description: form.optional("seeking_description"),
        image_link: form.optional("image_link"),
    })
}

pub fn parse_artist(form: &FormData) -> Result<ArtistFields> {
    let schema = ARTIST_FORM;
    schema.validate(form)?;

    Ok(ArtistFields {
        name: form.required("name")?,
        city: form.required("city")?,
        state: form.required("state")?,
        phone: form.optional("phone"),
        website: form.optional("website"),
        genres: schema.multi(form, "genres"),
        facebook_link: form.optional("facebook_link"),
        seeking_venue: schema.checkbox(form, "seeking_venue"),
        seeking_description: form.optional("seeking_description"),
        image_link: form.optional("image_link"),
    })
}

pub fn parse_show(form: &FormData) -> Result<ShowFields> {
    SHOW_FORM.validate(form)?;

    Ok(ShowFields {
        venue_id: parse_id(form, "venue_id")?,
        artist_id: parse_id(form, "artist_id")?,
        start_time: parse_start_time("start_time", &form.required("start_time")?)?,
    })
}

fn parse_id(form: &FormData, key: &str) -> Result<i64> {
    let raw = form.required(key)?;
    raw.parse()
        .map_err(|_| Error::malformed(key, format!("'{}' is not a valid id", raw)))
}
