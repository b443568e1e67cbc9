//! User-facing notices
//!
//! Mutation outcomes surface to the user as short transient notices (the
//! storefront renders them as toasts). The service pushes them into an
//! injected [`NoticeSink`]; reconciliation failures produce none.

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The action completed
    Success,
    /// The action was rejected or failed
    Error,
}

/// A short human-readable notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub severity: Severity,
    /// Message text
    pub message: &'static str,
}

impl Notice {
    /// Create a success notice
    #[inline]
    #[must_use]
    pub fn success(message: &'static str) -> Self {
        Self {
            severity: Severity::Success,
            message,
        }
    }

    /// Create an error notice
    #[inline]
    #[must_use]
    pub fn error(message: &'static str) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }
}

/// Receiver for user-facing notices
pub trait NoticeSink: Send + Sync {
    /// Deliver one notice
    fn notify(&self, notice: Notice);
}

/// Sink that drops every notice
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardNotices;

impl NoticeSink for DiscardNotices {
    fn notify(&self, _notice: Notice) {}
}

/// The notice texts the storefront shows
pub mod messages {
    /// Mutation attempted while signed out
    pub const SIGN_IN_REQUIRED: &str = "Please sign in to add items to cart";
    /// Fresh add exceeding the product's stock
    pub const NOT_ENOUGH_STOCK: &str = "Not enough stock available";
    /// Merge-add would lift the item past the product's stock
    pub const CANNOT_ADD_MORE: &str = "Cannot add more items than available in stock";
    /// Item added or merged
    pub const ADDED_TO_CART: &str = "Added to cart";
    /// Item removed
    pub const ITEM_REMOVED: &str = "Item removed from cart";
    /// Add failed remotely
    pub const ADD_FAILED: &str = "Failed to add to cart";
    /// Quantity update failed remotely
    pub const UPDATE_FAILED: &str = "Failed to update quantity";
    /// Removal failed remotely
    pub const REMOVE_FAILED: &str = "Failed to remove item";
    /// Clear failed remotely
    pub const CLEAR_FAILED: &str = "Failed to clear cart";
}
