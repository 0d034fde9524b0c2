use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

use super::iso_date;
use crate::storage::StoreError;

/// Department an employee belongs to. Serialized with the labels the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "HR")]
    Hr,
    Finance,
    Marketing,
    Sales,
    Operations,
    #[serde(rename = "Customer Service")]
    CustomerService,
    #[serde(rename = "R&D")]
    RnD,
    Other,
}

impl Department {
    pub const ALL: [Department; 9] = [
        Department::It,
        Department::Hr,
        Department::Finance,
        Department::Marketing,
        Department::Sales,
        Department::Operations,
        Department::CustomerService,
        Department::RnD,
        Department::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::It => "IT",
            Department::Hr => "HR",
            Department::Finance => "Finance",
            Department::Marketing => "Marketing",
            Department::Sales => "Sales",
            Department::Operations => "Operations",
            Department::CustomerService => "Customer Service",
            Department::RnD => "R&D",
            Department::Other => "Other",
        }
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown department '{}'", s))
    }
}

/// Employment status. `Left` records carry a `left_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Active,
    Left,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Left => "Left",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Status::Active),
            "Left" => Ok(Status::Left),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Status filter accepted by list and report queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Left,
}

impl StatusFilter {
    pub fn status(self) -> Option<Status> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(Status::Active),
            StatusFilter::Left => Some(Status::Left),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Left => "Left",
        }
    }
}

/// Employee record as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: Department,
    pub designation: String,
    #[serde(with = "iso_date")]
    pub joining_date: Date,
    pub status: Status,
    pub address: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub left_date: Option<Date>,
}

/// Raw `employees` row; enum columns are stored as text.
#[derive(Debug, FromRow)]
pub struct EmployeeRow {
    pub id: i32,
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub designation: String,
    pub joining_date: Date,
    pub status: String,
    pub address: Option<String>,
    pub left_date: Option<Date>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = StoreError;

    fn try_from(r: EmployeeRow) -> Result<Self, Self::Error> {
        let department = r.department.parse().map_err(StoreError::CorruptRow)?;
        let status = r.status.parse().map_err(StoreError::CorruptRow)?;
        Ok(Self {
            id: r.id,
            emp_id: r.emp_id,
            name: r.name,
            email: r.email,
            phone: r.phone,
            department,
            designation: r.designation,
            joining_date: r.joining_date,
            status,
            address: r.address,
            left_date: r.left_date,
        })
    }
}

/// Validated, trimmed input for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: Department,
    pub designation: String,
    pub joining_date: Date,
    pub status: Status,
    pub address: Option<String>,
    pub left_date: Option<Date>,
}

/// Validated partial update. `None` leaves the column untouched, except
/// `left_date`, which is always written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<Department>,
    pub designation: Option<String>,
    pub joining_date: Option<Date>,
    pub status: Option<Status>,
    /// `Some(None)` clears the address.
    pub address: Option<Option<String>>,
    pub left_date: Option<Date>,
}
