//! Typed storefront settings
//!
//! Values arrive as raw JSON and are sometimes double-encoded ("\"INR\"");
//! folding strips redundant quoting, parses numerics, ignores unknown keys,
//! and keeps the default for anything malformed.

use freshcart_store::SettingRow;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Storefront configuration with defaults for every field
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings {
    /// Store display name
    pub store_name: String,
    /// Contact email
    pub store_email: String,
    /// Contact phone
    pub store_phone: String,
    /// Physical address
    pub store_address: String,
    /// ISO currency code
    pub currency: String,
    /// Currency symbol used for display
    pub currency_symbol: String,
    /// Tax rate in percent
    pub tax_rate: Decimal,
    /// Subtotal at or above which shipping is free
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee below the threshold
    pub shipping_fee: Decimal,
    /// Minimum subtotal required to place an order
    pub min_order_amount: Decimal,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: "FreshCart".to_string(),
            store_email: "contact@freshcart.com".to_string(),
            store_phone: "+91 1234567890".to_string(),
            store_address: "123 Fresh Street, Mumbai, India".to_string(),
            currency: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            tax_rate: Decimal::new(18, 0),
            free_shipping_threshold: Decimal::new(500, 0),
            shipping_fee: Decimal::new(40, 0),
            min_order_amount: Decimal::new(100, 0),
        }
    }
}

impl StoreSettings {
    /// Fold raw rows over the defaults
    #[must_use]
    pub fn from_rows(rows: &[SettingRow]) -> Self {
        let mut settings = Self::default();
        for row in rows {
            settings.apply(&row.key, &row.value);
        }
        settings
    }

    fn apply(&mut self, key: &str, value: &Value) {
        match key {
            "store_name" => apply_string(&mut self.store_name, value),
            "store_email" => apply_string(&mut self.store_email, value),
            "store_phone" => apply_string(&mut self.store_phone, value),
            "store_address" => apply_string(&mut self.store_address, value),
            "currency" => apply_string(&mut self.currency, value),
            "currency_symbol" => apply_string(&mut self.currency_symbol, value),
            "tax_rate" => apply_decimal(&mut self.tax_rate, value),
            "free_shipping_threshold" => apply_decimal(&mut self.free_shipping_threshold, value),
            "shipping_fee" => apply_decimal(&mut self.shipping_fee, value),
            "min_order_amount" => apply_decimal(&mut self.min_order_amount, value),
            _ => {}
        }
    }

    /// Format an amount with the configured currency symbol, two decimals
    #[must_use]
    pub fn format_price(&self, amount: Decimal) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }

    /// Shipping fee for an order subtotal: free at or above the threshold
    #[must_use]
    pub fn shipping_fee_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.shipping_fee
        }
    }

    /// Order total: subtotal plus shipping
    #[must_use]
    pub fn order_total(&self, subtotal: Decimal) -> Decimal {
        subtotal + self.shipping_fee_for(subtotal)
    }

    /// Whether a subtotal meets the minimum order amount
    #[inline]
    #[must_use]
    pub fn meets_minimum_order(&self, subtotal: Decimal) -> bool {
        subtotal >= self.min_order_amount
    }
}

fn apply_string(field: &mut String, value: &Value) {
    if let Some(text) = value.as_str() {
        *field = text.trim_matches('"').to_string();
    }
}

fn apply_decimal(field: &mut Decimal, value: &Value) {
    let parsed = match value {
        Value::Number(number) => Decimal::from_str(&number.to_string()).ok(),
        Value::String(text) => Decimal::from_str(text.trim_matches('"')).ok(),
        _ => None,
    };
    if let Some(amount) = parsed {
        *field = amount;
    }
}
