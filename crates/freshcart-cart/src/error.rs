//! Cart service errors
//!
//! The taxonomy every mutation can surface. All variants are caught at the
//! mutation boundary and converted into user notices; the `Result` return is
//! a signal for embedding code, never an escaping crash.

use freshcart_store::StoreError;

/// Failure of a cart mutation
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The operation requires a signed-in identity and none is present
    #[error("sign-in required")]
    NotAuthenticated,

    /// The requested (or merged) quantity exceeds the product's stock
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Total quantity the cart would hold after the operation
        requested: u32,
        /// The product's stock quantity at check time
        available: u32,
        /// Whether the ceiling was hit by merging onto an existing item
        merged: bool,
    },

    /// No cart is resolved for the active session. Defensive: the service
    /// resolves lazily before any operation that needs a cart, so seeing
    /// this signals a caller ordering defect.
    #[error("no cart resolved for the active session")]
    CartNotResolved,

    /// A required remote call failed
    #[error("remote operation failed: {0}")]
    RemoteOperationFailed(#[from] StoreError),
}

impl CartError {
    /// Whether re-issuing the same user action could plausibly succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RemoteOperationFailed(inner) if inner.is_retryable())
    }

    /// Whether this failure was rejected before any remote call was made
    #[inline]
    #[must_use]
    pub fn rejected_locally(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::InsufficientStock { .. } | Self::CartNotResolved
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = CartError::InsufficientStock {
            requested: 5,
            available: 3,
            merged: false,
        };
        assert_eq!(err.to_string(), "insufficient stock: requested 5, available 3");
    }

    #[test]
    fn local_rejections() {
        assert!(CartError::NotAuthenticated.rejected_locally());
        assert!(!CartError::RemoteOperationFailed(StoreError::MissingRow).rejected_locally());
    }

    #[test]
    fn retryability_follows_the_store_error() {
        let transient =
            CartError::RemoteOperationFailed(StoreError::Unavailable("down".to_string()));
        assert!(transient.is_retryable());
        assert!(!CartError::NotAuthenticated.is_retryable());
    }
}
