//! Input validation helpers
//!
//! Text length limits and per-payload rules enforced before anything
//! reaches the store. Every failure is a 400 from the validation family:
//! blank required text is `RequiredField`, malformed values are
//! `InvalidFormat`, numbers outside their range are `ValueOutOfRange`.

use chrono::{NaiveDate, NaiveTime};
use shared::AppError;
use shared::models::{
    ContactCreate, MenuItemCreate, MenuItemUpdate, OrderCreate, OrderUpdate, ReservationCreate,
};

// ── Text length limits ──────────────────────────────────────────────

/// Names: menu items, customers
pub const MAX_NAME_LEN: usize = 200;

/// Menu descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, item references
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Contact message body
pub const MAX_MESSAGE_LEN: usize = 2000;

// ── Numeric limits ──────────────────────────────────────────────────

/// Maximum menu price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Order quantity bounds
pub const MIN_QUANTITY: i64 = 1;
pub const MAX_QUANTITY: i64 = 9999;

/// Party size bounds
pub const MIN_GUESTS: i64 = 1;
pub const MAX_GUESTS: i64 = 20;

/// Payload-level validation run at the request boundary
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

// ── Field helpers ───────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    check_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => check_len(v, field, max_len),
        None => Ok(()),
    }
}

fn check_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::invalid_field(
            field,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Required email with a `local@domain.tld` shape
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let value = value.trim();
    let shaped = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !value.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, _)| !host.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !shaped {
        return Err(AppError::invalid_format(
            field,
            format!("{field} must be a valid email address"),
        ));
    }
    Ok(())
}

/// Integer within an inclusive range
pub fn validate_range(value: i64, field: &str, min: i64, max: i64) -> Result<(), AppError> {
    if value < min || value > max {
        return Err(AppError::out_of_range(
            field,
            format!("{field} must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

/// Price must be finite, non-negative and at most [`MAX_PRICE`]
pub fn validate_price(value: f64) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::invalid_format(
            "price",
            format!("price must be a finite number, got {value}"),
        ));
    }
    if value < 0.0 {
        return Err(AppError::out_of_range(
            "price",
            format!("price must be non-negative, got {value}"),
        ));
    }
    if value > MAX_PRICE {
        return Err(AppError::out_of_range(
            "price",
            format!("price exceeds maximum allowed ({MAX_PRICE}), got {value}"),
        ));
    }
    Ok(())
}

/// `YYYY-MM-DD` that is not before `today`
pub fn validate_reservation_date(value: &str, today: NaiveDate) -> Result<NaiveDate, AppError> {
    let date = (value.len() == 10)
        .then(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .flatten()
        .ok_or_else(|| AppError::invalid_format("date", "date must be a YYYY-MM-DD calendar date"))?;
    if date < today {
        return Err(AppError::out_of_range(
            "date",
            format!("date must not be in the past (today is {today})"),
        ));
    }
    Ok(date)
}

/// 24-hour `HH:MM`
pub fn validate_time(value: &str) -> Result<NaiveTime, AppError> {
    (value.len() == 5)
        .then(|| NaiveTime::parse_from_str(value, "%H:%M").ok())
        .flatten()
        .ok_or_else(|| AppError::invalid_format("time", "time must be HH:MM"))
}

// ── Payload rules ───────────────────────────────────────────────────

impl Validate for MenuItemCreate {
    fn validate(&self) -> Result<(), AppError> {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_price(self.price)?;
        validate_optional_text(&self.description, "description", MAX_NOTE_LEN)
    }
}

impl Validate for MenuItemUpdate {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        validate_optional_text(&self.description, "description", MAX_NOTE_LEN)
    }
}

impl Validate for OrderCreate {
    fn validate(&self) -> Result<(), AppError> {
        // itemId is a soft reference; only its presence is checked
        validate_required_text(&self.item_id, "itemId", MAX_SHORT_TEXT_LEN)?;
        validate_range(self.quantity, "quantity", MIN_QUANTITY, MAX_QUANTITY)?;
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_email(&self.email, "email")?;
        validate_required_text(&self.address, "address", MAX_ADDRESS_LEN)?;
        validate_required_text(&self.phone, "phone", MAX_SHORT_TEXT_LEN)
    }
}

impl Validate for OrderUpdate {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(item_id) = &self.item_id {
            validate_required_text(item_id, "itemId", MAX_SHORT_TEXT_LEN)?;
        }
        if let Some(quantity) = self.quantity {
            validate_range(quantity, "quantity", MIN_QUANTITY, MAX_QUANTITY)?;
        }
        if let Some(name) = &self.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(email) = &self.email {
            validate_email(email, "email")?;
        }
        if let Some(address) = &self.address {
            validate_required_text(address, "address", MAX_ADDRESS_LEN)?;
        }
        if let Some(phone) = &self.phone {
            validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
        }
        Ok(())
    }
}

impl Validate for ReservationCreate {
    fn validate(&self) -> Result<(), AppError> {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_email(&self.email, "email")?;
        validate_reservation_date(&self.date, chrono::Utc::now().date_naive())?;
        validate_time(&self.time)?;
        validate_range(self.guests, "guests", MIN_GUESTS, MAX_GUESTS)
    }
}

impl Validate for ContactCreate {
    fn validate(&self) -> Result<(), AppError> {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_email(&self.email, "email")?;
        validate_required_text(&self.message, "message", MAX_MESSAGE_LEN)
    }
}
