//! The add/edit employee form.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::calculation::parse_lenient;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeeDraft, EmployeeRate};

/// Text fields of the add/edit employee dialog.
///
/// A blank form adds a new employee; [`EmployeeForm::for_edit`] pre-fills
/// the fields from an existing one. Nothing is sent anywhere until
/// [`EmployeeForm::validate`] succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    /// Employee name.
    pub name: String,
    /// Daily wage as typed.
    pub daily_wage: String,
    /// Overtime rate per hour as typed.
    pub overtime_rate: String,
    /// Bank limit as typed.
    pub bank_limit: String,
}

impl EmployeeForm {
    /// Creates a form from the four field values.
    pub fn new(
        name: impl Into<String>,
        daily_wage: impl Into<String>,
        overtime_rate: impl Into<String>,
        bank_limit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            daily_wage: daily_wage.into(),
            overtime_rate: overtime_rate.into(),
            bank_limit: bank_limit.into(),
        }
    }

    /// Pre-fills the form with an existing employee's values.
    pub fn for_edit(employee: &EmployeeRate) -> Self {
        Self {
            name: employee.name.clone(),
            daily_wage: employee.daily_wage.normalize().to_string(),
            overtime_rate: employee.overtime_rate.normalize().to_string(),
            bank_limit: employee.bank_limit.normalize().to_string(),
        }
    }

    /// Checks the required fields and produces a draft.
    ///
    /// The name must not be blank and the daily wage must be a non-negative
    /// number. Overtime rate and bank limit fall back to zero when empty or
    /// unparseable.
    ///
    /// # Example
    ///
    /// ```
    /// use paysplit_engine::session::EmployeeForm;
    /// use rust_decimal::Decimal;
    ///
    /// let draft = EmployeeForm::new("Eleni", "60", "", "abc").validate()?;
    /// assert_eq!(draft.daily_wage, Decimal::from(60));
    /// assert_eq!(draft.overtime_rate, Decimal::ZERO);
    /// assert_eq!(draft.bank_limit, Decimal::ZERO);
    /// # Ok::<(), paysplit_engine::error::PayrollError>(())
    /// ```
    pub fn validate(&self) -> PayrollResult<EmployeeDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(invalid("name", "name is required"));
        }

        let wage_text = self.daily_wage.trim();
        if wage_text.is_empty() {
            return Err(invalid("daily_wage", "daily wage is required"));
        }
        let daily_wage = Decimal::from_str(wage_text)
            .map_err(|_| invalid("daily_wage", &format!("'{}' is not a number", wage_text)))?;
        if daily_wage.is_sign_negative() && !daily_wage.is_zero() {
            return Err(invalid("daily_wage", "daily wage must not be negative"));
        }

        Ok(EmployeeDraft {
            name: name.to_string(),
            daily_wage,
            overtime_rate: parse_lenient(&self.overtime_rate),
            bank_limit: parse_lenient(&self.bank_limit),
        })
    }
}

fn invalid(field: &str, message: &str) -> PayrollError {
    PayrollError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn assert_invalid_field(form: EmployeeForm, expected: &str) {
        match form.validate() {
            Err(PayrollError::InvalidEmployee { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected InvalidEmployee({}), got {:?}", expected, other),
        }
    }

    #[test]
    fn test_valid_form_produces_draft() {
        let draft = EmployeeForm::new("  Giorgos ", "50", "10", "600")
            .validate()
            .unwrap();

        assert_eq!(draft.name, "Giorgos");
        assert_eq!(draft.daily_wage, dec("50"));
        assert_eq!(draft.overtime_rate, dec("10"));
        assert_eq!(draft.bank_limit, dec("600"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert_invalid_field(EmployeeForm::new("   ", "50", "10", "600"), "name");
    }

    #[test]
    fn test_empty_wage_is_rejected() {
        assert_invalid_field(EmployeeForm::new("Giorgos", "", "10", "600"), "daily_wage");
    }

    #[test]
    fn test_non_numeric_wage_is_rejected() {
        assert_invalid_field(EmployeeForm::new("Giorgos", "fifty", "10", "600"), "daily_wage");
    }

    #[test]
    fn test_negative_wage_is_rejected() {
        assert_invalid_field(EmployeeForm::new("Giorgos", "-5", "10", "600"), "daily_wage");
    }

    #[test]
    fn test_zero_wage_is_accepted() {
        let draft = EmployeeForm::new("Trainee", "0", "", "").validate().unwrap();
        assert_eq!(draft.daily_wage, Decimal::ZERO);
    }

    #[test]
    fn test_optional_fields_are_lenient() {
        let draft = EmployeeForm::new("Maria", "45.5", "x", "-100")
            .validate()
            .unwrap();

        assert_eq!(draft.overtime_rate, Decimal::ZERO);
        assert_eq!(draft.bank_limit, Decimal::ZERO);
    }

    #[test]
    fn test_for_edit_round_trips_through_validate() {
        let employee = EmployeeRate {
            id: EmployeeId(4),
            name: "Nikos".to_string(),
            daily_wage: dec("55.50"),
            overtime_rate: dec("9"),
            bank_limit: dec("400"),
        };
        let form = EmployeeForm::for_edit(&employee);

        assert_eq!(form.daily_wage, "55.5");
        let updated = employee.with_draft(&form.validate().unwrap());
        assert_eq!(updated, employee);
    }
}
