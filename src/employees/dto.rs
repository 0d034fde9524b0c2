use serde::{de, Deserialize, Deserializer, Serialize};
use time::{macros::format_description, Date};

use super::repo_types::{Status, StatusFilter};

/// Body of `POST /api/employees`. Required text fields are optional here so a
/// missing field is reported together with empty ones.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    pub emp_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "blank_or_date")]
    pub joining_date: Option<Date>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "blank_or_date")]
    pub left_date: Option<Date>,
}

/// Body of `PUT /api/employees/:id`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    pub emp_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "blank_or_date")]
    pub joining_date: Option<Date>,
    #[serde(default)]
    pub status: Option<Status>,
    /// Distinguishes an explicit `null` (clear) from an absent field (keep).
    #[serde(default, deserialize_with = "present")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "blank_or_date")]
    pub left_date: Option<Date>,
}

fn present<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(d).map(Some)
}

/// `YYYY-MM-DD`; `null` or a blank string counts as not supplied.
fn blank_or_date<'de, D>(d: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(d)? {
        Some(raw) if !raw.trim().is_empty() => {
            Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", raw, e)))
        }
        _ => Ok(None),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub status: StatusFilter,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
