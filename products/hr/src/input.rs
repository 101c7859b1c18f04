//! Request payloads. Required text fields deserialize missing or `null` values as
//! empty strings so that validation, not deserialization, reports them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepartmentInput {
    /// Ignored: ids are assigned on insert and taken from the path on update.
    pub department_id: Option<Uuid>,
    #[serde(deserialize_with = "null_as_empty")]
    pub department_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub department_name: String,
    pub description: Option<String>,
    pub created_date: Option<DateTimeWithTimeZone>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionInput {
    /// Ignored: ids are assigned on insert and taken from the path on update.
    pub position_id: Option<Uuid>,
    #[serde(deserialize_with = "null_as_empty")]
    pub position_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub position_name: String,
    pub description: Option<String>,
    pub created_date: Option<DateTimeWithTimeZone>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeInput {
    /// Ignored: ids are assigned on insert and taken from the path on update.
    pub employee_id: Option<Uuid>,
    #[serde(deserialize_with = "null_as_empty")]
    pub employee_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone_number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub identity_number: String,
    pub position_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    #[serde(deserialize_with = "lenient_date")]
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<i32>,
    pub telephone_number: Option<String>,
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub identity_date: Option<NaiveDate>,
    pub identity_place: Option<String>,
    pub bank_account: Option<String>,
    pub bank_name: Option<String>,
    pub branch: Option<String>,
    pub created_date: Option<DateTimeWithTimeZone>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `2024-01-31`, a local date-time such as `2024-01-31T08:30:00`, or an
/// RFC 3339 timestamp. Only the calendar date as written is kept.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("invalid date `{raw}`")))
}
