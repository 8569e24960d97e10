//! Field-level constraint checking run on every candidate seller or
//! transaction before it is written.
//!
//! The gate collects every violated constraint instead of stopping at the
//! first. It holds no state; one instance is built at startup and shared.

use crate::entities::{seller, transaction, PaymentType};
use crate::errors::{EntityKind, FieldViolation, ServiceError};
use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

/// Candidate seller as it would be persisted.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct SellerDraft {
    #[validate(
        required,
        length(
            min = 2,
            max = 255,
            message = "Name must have length at least 2 and at most 255"
        ),
        custom = "name_not_blank"
    )]
    pub name: Option<String>,

    #[validate(
        required,
        length(max = 255, message = "Contact info must have length at most 255"),
        custom = "contact_info_not_blank"
    )]
    pub contact_info: Option<String>,
}

impl From<&seller::Model> for SellerDraft {
    fn from(model: &seller::Model) -> Self {
        Self {
            name: Some(model.name.clone()),
            contact_info: Some(model.contact_info.clone()),
        }
    }
}

/// Candidate transaction as it would be persisted.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TransactionDraft {
    #[validate(required)]
    pub seller_id: Option<i32>,

    #[validate(required, custom = "amount_in_range")]
    pub amount: Option<Decimal>,

    #[validate(required)]
    pub payment_type: Option<PaymentType>,
}

impl From<&transaction::Model> for TransactionDraft {
    fn from(model: &transaction::Model) -> Self {
        Self {
            seller_id: Some(model.seller_id),
            amount: Some(model.amount),
            payment_type: Some(model.payment_type),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationGate;

impl ValidationGate {
    pub fn new() -> Self {
        Self
    }

    /// Checks `draft`, failing with every violation found.
    pub fn check<T: Validate>(&self, entity: EntityKind, draft: &T) -> Result<(), ServiceError> {
        draft
            .validate()
            .map_err(|errors| ServiceError::ValidationFailed {
                entity,
                violations: collect_violations(&errors),
            })
    }

    pub fn check_seller(&self, draft: &SellerDraft) -> Result<(), ServiceError> {
        self.check(EntityKind::Seller, draft)
    }

    pub fn check_transaction(&self, draft: &TransactionDraft) -> Result<(), ServiceError> {
        self.check(EntityKind::Transaction, draft)
    }
}

/// Messages for the bare `required` rule, which carries no message of its own.
const NULL_MESSAGES: &[(&str, &str)] = &[
    ("name", "Name must not be null"),
    ("contact_info", "Contact info must not be null"),
    ("seller_id", "Seller ID must not be null"),
    ("amount", "Amount must not be null"),
    ("payment_type", "Payment type must not be null"),
];

const MAX_FRACTION_DIGITS: u32 = 2;
const MAX_INTEGER_DIGITS: u32 = 17;

/// Flattens validator output into (field, message) pairs ordered by field,
/// then message, so results do not depend on hash map order.
fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |err| FieldViolation::new(field, violation_message(field, err)))
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    violations
}

fn violation_message(field: &str, err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    if err.code == "required" {
        if let Some((_, message)) = NULL_MESSAGES.iter().find(|(name, _)| *name == field) {
            return (*message).to_string();
        }
        return format!("{} must not be null", field);
    }
    err.code.to_string()
}

fn not_blank(value: &str, code: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        return Err(err);
    }
    Ok(())
}

fn name_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "name_blank", "Name must not be blank")
}

fn contact_info_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "contact_info_blank", "Contact info must not be blank")
}

fn amount_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Non-negative and representable as `NUMERIC(19,2)`.
fn amount_in_range(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(amount_error(
            "amount_negative",
            "Amount must be greater or equal 0.0",
        ));
    }
    if value.normalize().scale() > MAX_FRACTION_DIGITS {
        return Err(amount_error(
            "amount_scale",
            "Amount must have at most 2 fractional digits",
        ));
    }
    if value.trunc() >= Decimal::from(10_u64.pow(MAX_INTEGER_DIGITS)) {
        return Err(amount_error(
            "amount_precision",
            "Amount must have at most 17 integer digits",
        ));
    }
    Ok(())
}
