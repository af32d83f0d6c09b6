//! Employee model.
//!
//! This module defines the [`Employee`] record that punches and reports
//! refer to.

use serde::{Deserialize, Serialize};

/// Represents an employee registered with the time clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: u64,
    /// Login name; used as the display name when no full name is set.
    pub username: String,
    /// The employee's full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Brazilian taxpayer number (CPF), shown on reports.
    #[serde(default)]
    pub cpf: Option<String>,
    /// Job title, shown on reports.
    #[serde(default)]
    pub role: Option<String>,
}

impl Employee {
    /// Returns the full name, or the username when the full name is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeclock_engine::models::Employee;
    ///
    /// let mut employee = Employee {
    ///     id: 1,
    ///     username: "msilva".to_string(),
    ///     full_name: Some("Maria Silva".to_string()),
    ///     cpf: None,
    ///     role: None,
    /// };
    /// assert_eq!(employee.display_name(), "Maria Silva");
    ///
    /// employee.full_name = None;
    /// assert_eq!(employee.display_name(), "msilva");
    /// ```
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_full_name_falls_back_to_username() {
        let employee = Employee {
            id: 1,
            username: "jsouza".to_string(),
            full_name: Some("   ".to_string()),
            cpf: None,
            role: None,
        };
        assert_eq!(employee.display_name(), "jsouza");
    }

    #[test]
    fn test_deserialize_employee_with_optional_fields_missing() {
        let json = r#"{"id": 12, "username": "acosta"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, 12);
        assert_eq!(employee.username, "acosta");
        assert!(employee.full_name.is_none());
        assert!(employee.cpf.is_none());
        assert!(employee.role.is_none());
    }
}
