//! # Validation Module
//!
//! Pure form validation for the payment engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Presentation (browser form)                               │
//! │  ├── Immediate per-field feedback while typing                      │
//! │  └── Renders the error map this module returns                      │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (pure functions, no rendering)                │
//! │  ├── Field rules: name, email, quantity, method, custom price       │
//! │  └── Produces a typed CheckoutRequest on success                    │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Pricing calculator arithmetic guards                      │
//! │  └── Negative/range re-checks at the create boundary                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The validators return structured errors keyed by form field name,
//! decoupled from any display surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{ProductCatalog, CUSTOM_PRODUCT_ID};
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartSelection, PaymentMethod};
use crate::{MAX_QUANTITY, MIN_CUSTOM_PRICE, MIN_NAME_LEN};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field-keyed error map, one entry per failing form field.
pub type FieldErrors = HashMap<&'static str, ValidationError>;

// =============================================================================
// Form Input / Checkout Request
// =============================================================================

/// Raw payment form snapshot, as submitted by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub customer_name: String,
    pub customer_email: String,
    /// Selected product id, or the `custom` sentinel.
    pub product_id: String,
    pub quantity: i64,
    /// User-entered unit price; only meaningful when `product_id == "custom"`.
    pub custom_price: Option<i64>,
    /// Raw form value for the payment method radio group.
    pub payment_method: String,
    /// Promo code as typed (normalization happens at lookup).
    pub promo_code: Option<String>,
}

/// A fully validated submission, ready for the transaction factory.
///
/// Construction goes through [`validate_payment_form`]; once this type
/// exists, the engine only re-derives arithmetic, never field rules.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub cart: CartSelection,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a customer name: trimmed length of at least 2 characters.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customerName",
        });
    }

    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "customerName",
            min: MIN_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an email address against the `local@domain.tld` shape.
///
/// Same acceptance as the original form's `/^[^\s@]+@[^\s@]+\.[^\s@]+$/`:
/// one `@`, no whitespace, and a dotted domain. Deliberately not a full
/// RFC 5321 parser.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "customerEmail",
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "customerEmail",
        reason: "expected local@domain.tld",
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a quantity: integer in 1..=99.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a custom unit price: at least Rp 1.000.
pub fn validate_custom_price(price: i64) -> ValidationResult<()> {
    if price < MIN_CUSTOM_PRICE {
        return Err(ValidationError::BelowMinimum {
            field: "customPrice",
            min: MIN_CUSTOM_PRICE,
        });
    }
    Ok(())
}

/// Validates a payment method form value against the fixed set.
pub fn validate_payment_method(value: &str) -> ValidationResult<PaymentMethod> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "paymentMethod",
        });
    }

    PaymentMethod::parse(value).ok_or(ValidationError::NotAllowed {
        field: "paymentMethod",
        allowed: "transfer, ewallet, credit, cash",
    })
}

// =============================================================================
// Form Validation
// =============================================================================

/// Validates an entire form submission.
///
/// Returns a typed [`CheckoutRequest`] when every field passes, or the map
/// of per-field errors otherwise. All rules run; the map collects every
/// failing field so the UI can mark them all at once.
pub fn validate_payment_form(
    form: &PaymentForm,
    catalog: &ProductCatalog,
) -> Result<CheckoutRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Err(e) = validate_customer_name(&form.customer_name) {
        errors.insert("customerName", e);
    }
    if let Err(e) = validate_email(&form.customer_email) {
        errors.insert("customerEmail", e);
    }
    if let Err(e) = validate_quantity(form.quantity) {
        errors.insert("quantity", e);
    }

    let payment_method = match validate_payment_method(&form.payment_method) {
        Ok(method) => Some(method),
        Err(e) => {
            errors.insert("paymentMethod", e);
            None
        }
    };

    // Product: must be a catalog entry or the custom sentinel
    let is_custom = form.product_id == CUSTOM_PRODUCT_ID;
    let unit_price = if is_custom {
        let price = form.custom_price.unwrap_or(0);
        if let Err(e) = validate_custom_price(price) {
            errors.insert("customPrice", e);
        }
        Money::new(price)
    } else if form.product_id.trim().is_empty() {
        errors.insert(
            "productSelect",
            ValidationError::Required {
                field: "productSelect",
            },
        );
        Money::zero()
    } else {
        match catalog.lookup(&form.product_id) {
            Some(product) => product.price,
            None => {
                errors.insert(
                    "productSelect",
                    ValidationError::NotAllowed {
                        field: "productSelect",
                        allowed: "a catalog product id or custom",
                    },
                );
                Money::zero()
            }
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // A missing method always left an entry in `errors`, so this branch
    // cannot be taken; the let-else keeps the function panic-free anyway.
    let Some(payment_method) = payment_method else {
        return Err(errors);
    };

    Ok(CheckoutRequest {
        customer_name: form.customer_name.trim().to_string(),
        customer_email: form.customer_email.trim().to_string(),
        cart: CartSelection {
            product_id: form.product_id.clone(),
            unit_price,
            quantity: form.quantity,
            promo_code: form
                .promo_code
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_uppercase),
        },
        payment_method,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
