use lazy_static::lazy_static;
use regex::Regex;
use time::Date;
use tracing::{debug, warn};

use super::dto::{CreateEmployeeRequest, UpdateEmployeeRequest};
use super::repo_types::{Department, Employee, EmployeeChanges, NewEmployee, Status};
use crate::error::ApiError;
use crate::storage::EmployeeStore;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_department(raw: &str) -> Result<Department, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation(format!("Invalid department '{}'", raw)))
}

fn check_email(email: &str) -> Result<(), ApiError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::Validation("Invalid email format".into()))
    }
}

/// `Left` needs a date, `Active` never keeps one.
fn left_date_for(status: Status, left_date: Option<Date>) -> Result<Option<Date>, ApiError> {
    match status {
        Status::Active => Ok(None),
        Status::Left => left_date.map(Some).ok_or_else(|| {
            ApiError::Validation("left_date is required when status is Left".into())
        }),
    }
}

/// Validates and normalizes a create request. `today` fills a missing joining date.
pub fn validate_new(req: CreateEmployeeRequest, today: Date) -> Result<NewEmployee, ApiError> {
    let emp_id = trimmed(req.emp_id);
    let name = trimmed(req.name);
    let email = trimmed(req.email);
    let phone = trimmed(req.phone);
    let department = trimmed(req.department);
    let designation = trimmed(req.designation);

    let missing: Vec<&str> = [
        ("emp_id", emp_id.is_none()),
        ("name", name.is_none()),
        ("email", email.is_none()),
        ("phone", phone.is_none()),
        ("department", department.is_none()),
        ("designation", designation.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();

    let (
        Some(emp_id),
        Some(name),
        Some(email),
        Some(phone),
        Some(department),
        Some(designation),
    ) = (emp_id, name, email, phone, department, designation)
    else {
        warn!(?missing, "create rejected: missing required fields");
        return Err(ApiError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    };

    check_email(&email)?;
    let department = parse_department(&department)?;
    let status = req.status.unwrap_or_default();
    let left_date = left_date_for(status, req.left_date)?;

    Ok(NewEmployee {
        emp_id,
        name,
        email,
        phone,
        department,
        designation,
        joining_date: req.joining_date.unwrap_or(today),
        status,
        address: trimmed(req.address),
        left_date,
    })
}

fn supplied(field: &str, value: Option<String>) -> Result<Option<String>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) => trimmed(Some(v))
            .map(Some)
            .ok_or_else(|| ApiError::Validation(format!("{} must not be empty", field))),
    }
}

/// Validates an update request. Returns the requested `emp_id`, if any, next to
/// the column changes; the caller checks it against the stored record.
pub fn validate_changes(
    req: UpdateEmployeeRequest,
) -> Result<(Option<String>, EmployeeChanges), ApiError> {
    let emp_id = supplied("emp_id", req.emp_id)?;
    let email = supplied("email", req.email)?;
    if let Some(email) = &email {
        check_email(email)?;
    }
    let department = supplied("department", req.department)?
        .map(|d| parse_department(&d))
        .transpose()?;

    let left_date = match req.status {
        Some(status) => left_date_for(status, req.left_date)?,
        None => req.left_date,
    };

    let changes = EmployeeChanges {
        name: supplied("name", req.name)?,
        email,
        phone: supplied("phone", req.phone)?,
        department,
        designation: supplied("designation", req.designation)?,
        joining_date: req.joining_date,
        status: req.status,
        address: req.address.map(trimmed),
        left_date,
    };
    Ok((emp_id, changes))
}

pub async fn create_employee(
    store: &dyn EmployeeStore,
    req: CreateEmployeeRequest,
    today: Date,
) -> Result<Employee, ApiError> {
    let new = validate_new(req, today)?;
    debug!(emp_id = %new.emp_id, "creating employee");
    store
        .create(&new)
        .await
        .map_err(|e| ApiError::from_store("Failed to create employee", e))
}

pub async fn update_employee(
    store: &dyn EmployeeStore,
    id: i32,
    req: UpdateEmployeeRequest,
) -> Result<Employee, ApiError> {
    let (emp_id, changes) = validate_changes(req)?;

    if let Some(emp_id) = emp_id {
        let current = store
            .get(id)
            .await
            .map_err(|e| ApiError::from_store("Failed to update employee", e))?;
        if current.emp_id != emp_id {
            warn!(id, "update rejected: emp_id change");
            return Err(ApiError::Validation("emp_id cannot be changed".into()));
        }
    }

    store
        .update(id, &changes)
        .await
        .map_err(|e| ApiError::from_store("Failed to update employee", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn full_request() -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            emp_id: Some("  E100 ".into()),
            name: Some(" Grace Hopper ".into()),
            email: Some("grace@example.com ".into()),
            phone: Some(" 555-0100".into()),
            department: Some("IT".into()),
            designation: Some("Rear Admiral ".into()),
            ..Default::default()
        }
    }

    #[test]
    fn email_rule() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
    }

    #[test]
    fn new_employee_is_trimmed_and_defaulted() {
        let today = date!(2026 - 10 - 18);
        let new = validate_new(full_request(), today).unwrap();
        assert_eq!(new.emp_id, "E100");
        assert_eq!(new.name, "Grace Hopper");
        assert_eq!(new.email, "grace@example.com");
        assert_eq!(new.phone, "555-0100");
        assert_eq!(new.designation, "Rear Admiral");
        assert_eq!(new.department, Department::It);
        assert_eq!(new.joining_date, today);
        assert_eq!(new.status, Status::Active);
        assert_eq!(new.address, None);
        assert_eq!(new.left_date, None);
    }

    #[test]
    fn missing_and_blank_fields_are_listed() {
        let req = CreateEmployeeRequest {
            name: None,
            phone: Some("   ".into()),
            ..full_request()
        };
        let err = validate_new(req, date!(2026 - 01 - 01)).unwrap_err();
        match err {
            ApiError::Validation(msg) => {
                assert!(msg.contains("name"));
                assert!(msg.contains("phone"));
                assert!(!msg.contains("email"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_department_and_bad_email_are_rejected() {
        let req = CreateEmployeeRequest {
            department: Some("Legal".into()),
            ..full_request()
        };
        assert!(matches!(
            validate_new(req, date!(2026 - 01 - 01)),
            Err(ApiError::Validation(_))
        ));

        let req = CreateEmployeeRequest {
            email: Some("grace-at-example".into()),
            ..full_request()
        };
        assert!(matches!(
            validate_new(req, date!(2026 - 01 - 01)),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn left_requires_date_and_active_drops_it() {
        let req = CreateEmployeeRequest {
            status: Some(Status::Left),
            ..full_request()
        };
        assert!(validate_new(req, date!(2026 - 01 - 01)).is_err());

        let req = CreateEmployeeRequest {
            status: Some(Status::Active),
            left_date: Some(date!(2025 - 06 - 30)),
            ..full_request()
        };
        let new = validate_new(req, date!(2026 - 01 - 01)).unwrap();
        assert_eq!(new.left_date, None);
    }

    #[test]
    fn update_rejects_blank_supplied_fields() {
        let req = UpdateEmployeeRequest {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(
            validate_changes(req),
            Err(ApiError::Validation(msg)) if msg.contains("name")
        ));
    }

    #[test]
    fn update_keeps_absent_fields_and_clears_left_date() {
        let (emp_id, changes) = validate_changes(UpdateEmployeeRequest {
            phone: Some(" 123 ".into()),
            address: Some(Some("   ".into())),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(emp_id, None);
        assert_eq!(changes.phone.as_deref(), Some("123"));
        assert_eq!(changes.name, None);
        assert_eq!(changes.joining_date, None);
        assert_eq!(changes.address, Some(None));
        assert_eq!(changes.left_date, None);
    }

    #[test]
    fn update_to_active_forces_null_left_date() {
        let (_, changes) = validate_changes(UpdateEmployeeRequest {
            status: Some(Status::Active),
            left_date: Some(date!(2025 - 01 - 01)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.status, Some(Status::Active));
        assert_eq!(changes.left_date, None);
    }
}
