use std::{fmt, str::FromStr};

use entity::employee;
use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func, LikeExpr},
};
use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;

pub const DEFAULT_PAGE_NUMBER: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// Largest offset the database drivers bind (a signed 64-bit value).
pub const MAX_OFFSET: u64 = i64::MAX as u64;
const LIKE_ESCAPE: char = '\\';

/// Query string of the filtered employee listing. Blank values count as absent.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeQueryParams {
    #[serde(deserialize_with = "blank_as_none")]
    pub page_size: Option<i64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub page_number: Option<i64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub employee_filter: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub department_id: Option<Uuid>,
    #[serde(deserialize_with = "blank_as_none")]
    pub position_id: Option<Uuid>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub size: u64,
}

impl Page {
    /// Rows to skip, clamped to [`MAX_OFFSET`].
    pub fn offset(&self) -> u64 {
        self.number
            .saturating_sub(1)
            .checked_mul(self.size)
            .map_or(MAX_OFFSET, |offset| offset.min(MAX_OFFSET))
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.size)
    }
}

impl EmployeeQueryParams {
    /// Requested page, falling back to the defaults for absent or non-positive values.
    pub fn page(&self) -> Page {
        let positive = |value: Option<i64>| value.filter(|v| *v > 0).map(|v| v as u64);
        Page {
            number: positive(self.page_number).unwrap_or(DEFAULT_PAGE_NUMBER),
            size: positive(self.page_size).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Conjunction of the supplied filters; matches everything when none are set.
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(needle) = self.employee_filter.as_deref() {
            let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
            let name = Expr::expr(Func::lower(Expr::col(employee::Column::FullName)));
            let code = Expr::expr(Func::lower(Expr::col(employee::Column::EmployeeCode)));
            condition = condition.add(
                Condition::any()
                    .add(name.like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)))
                    .add(code.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))),
            );
        }
        if let Some(department_id) = self.department_id {
            condition = condition.add(employee::Column::DepartmentId.eq(department_id));
        }
        if let Some(position_id) = self.position_id {
            condition = condition.add(employee::Column::PositionId.eq(position_id));
        }
        condition
    }
}

/// Makes `%`, `_` and the escape character match literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// One page of the filtered listing plus the totals of the whole match.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFiltered {
    pub total_records: u64,
    pub total_pages: u64,
    pub current_page_records: u64,
    pub current_page_number: u64,
    pub employees: Vec<employee::Model>,
}

impl EmployeeFiltered {
    pub fn new(total_records: u64, page: Page, employees: Vec<employee::Model>) -> Self {
        Self {
            total_records,
            total_pages: page.total_pages(total_records),
            current_page_records: employees.len() as u64,
            current_page_number: page.number,
            employees,
        }
    }
}
