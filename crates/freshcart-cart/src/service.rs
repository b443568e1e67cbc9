//! The cart synchronization service
//!
//! One instance per identity session, shared read-only by presentation
//! consumers. All reads are snapshots; all mutations go to the remote store
//! and then re-run the full reconciliation, so the visible cart is always a
//! real remote snapshot rather than a local merge.

use crate::error::CartError;
use crate::notice::{messages, Notice, NoticeSink};
use crate::state::CartSnapshot;
use freshcart_domain::{CartId, CartItem, CartItemId, Product, UserId};
use freshcart_store::{CartStore, IdentityProvider};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Server-backed view of the signed-in user's cart
pub struct CartService {
    /// Source of the current identity
    identity: Arc<dyn IdentityProvider>,
    /// Remote cart rows
    store: Arc<dyn CartStore>,
    /// Receiver for user-facing notices
    notices: Arc<dyn NoticeSink>,
    /// The one shared mutable resource; owned exclusively by this service
    state: RwLock<CartSnapshot>,
    /// Serializes mutations so read-then-decide merge adds cannot race into
    /// duplicate rows for one product
    mutations: Mutex<()>,
    /// Bumped on every identity change; reconciliations started under an
    /// older epoch are discarded when they complete
    session_epoch: AtomicU64,
}

impl CartService {
    /// Create a service for the given collaborators
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn CartStore>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            identity,
            store,
            notices,
            state: RwLock::new(CartSnapshot::default()),
            mutations: Mutex::new(()),
            session_epoch: AtomicU64::new(0),
        }
    }

    /// Spawn the identity watcher: refresh now, then bump the session epoch
    /// and refresh again on every sign-in or sign-out
    pub fn spawn_identity_watcher(self: &Arc<Self>) -> JoinHandle<()> {
        let service = Arc::clone(self);
        let mut changes = service.identity.subscribe();
        tokio::spawn(async move {
            service.refresh().await;
            while changes.changed().await.is_ok() {
                service.on_identity_changed().await;
            }
        })
    }

    /// React to an identity change: invalidate in-flight reconciliations,
    /// then reconcile against the new identity
    pub async fn on_identity_changed(&self) {
        self.session_epoch.fetch_add(1, Ordering::AcqRel);
        self.refresh().await;
    }

    /// Reconcile the local view against the remote store
    ///
    /// Signed out: clears the view without any remote call. Signed in:
    /// find-or-create the cart, fetch its items joined with product
    /// snapshots, and replace the view wholesale. A failure is logged and
    /// leaves the previous view untouched; it never reaches the caller.
    pub async fn refresh(&self) {
        let epoch = self.session_epoch.load(Ordering::Acquire);

        let Some(user) = self.identity.current() else {
            let mut state = self.state.write();
            state.items.clear();
            state.cart_id = None;
            state.loading = false;
            return;
        };

        self.state.write().loading = true;
        match self.reconcile(user).await {
            Ok((cart_id, items)) => self.apply_reconciliation(epoch, cart_id, items),
            Err(error) => {
                tracing::warn!(%error, "cart refresh failed; keeping previous state");
            }
        }
        self.state.write().loading = false;
    }

    /// Add `quantity` units of `product`, merging onto an existing item line
    ///
    /// Rejected without a remote call when signed out or when the quantity
    /// (fresh or merged) would exceed the product's stock. A zero quantity
    /// is a silent no-op.
    pub async fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        let _serialized = self.mutations.lock().await;
        let outcome = self.try_add(product, quantity).await;
        match &outcome {
            Ok(()) => self.notices.notify(Notice::success(messages::ADDED_TO_CART)),
            Err(error) => {
                if !error.rejected_locally() {
                    tracing::error!(%error, product = %product.id, "failed to add to cart");
                }
                let message = match error {
                    CartError::NotAuthenticated => messages::SIGN_IN_REQUIRED,
                    CartError::InsufficientStock { merged: false, .. } => {
                        messages::NOT_ENOUGH_STOCK
                    }
                    CartError::InsufficientStock { merged: true, .. } => messages::CANNOT_ADD_MORE,
                    CartError::CartNotResolved | CartError::RemoteOperationFailed(_) => {
                        messages::ADD_FAILED
                    }
                };
                self.notices.notify(Notice::error(message));
            }
        }
        outcome
    }

    /// Set an item's quantity; anything below one removes the item
    pub async fn update_quantity(
        &self,
        item: CartItemId,
        quantity: i32,
    ) -> Result<(), CartError> {
        if quantity < 1 {
            return self.remove_from_cart(item).await;
        }
        let quantity = quantity.unsigned_abs();

        let _serialized = self.mutations.lock().await;
        let outcome = self.try_update(item, quantity).await;
        if let Err(error) = &outcome {
            tracing::error!(%error, %item, "failed to update quantity");
            self.notices.notify(Notice::error(messages::UPDATE_FAILED));
        }
        outcome
    }

    /// Remove one item line
    pub async fn remove_from_cart(&self, item: CartItemId) -> Result<(), CartError> {
        let _serialized = self.mutations.lock().await;
        let outcome = self.try_remove(item).await;
        match &outcome {
            Ok(()) => self.notices.notify(Notice::success(messages::ITEM_REMOVED)),
            Err(error) => {
                tracing::error!(%error, %item, "failed to remove item");
                self.notices.notify(Notice::error(messages::REMOVE_FAILED));
            }
        }
        outcome
    }

    /// Delete every item of the resolved cart
    ///
    /// The one operation that patches local state directly instead of
    /// re-running reconciliation: on success the item list is simply
    /// emptied. With no resolved cart this is a no-op.
    pub async fn clear_cart(&self) -> Result<(), CartError> {
        let Some(cart_id) = self.cart_id() else {
            return Ok(());
        };

        let _serialized = self.mutations.lock().await;
        match self.store.delete_items(cart_id).await {
            Ok(()) => {
                self.state.write().items.clear();
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, %cart_id, "failed to clear cart");
                self.notices.notify(Notice::error(messages::CLEAR_FAILED));
                Err(error.into())
            }
        }
    }

    /// A point-in-time clone of the cart view
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.state.read().clone()
    }

    /// The current item lines
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.state.read().items.clone()
    }

    /// The resolved cart id, if any
    #[inline]
    #[must_use]
    pub fn cart_id(&self) -> Option<CartId> {
        self.state.read().cart_id
    }

    /// Whether a reconciliation fetch is in flight
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Total units across all items
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state.read().item_count()
    }

    /// Sum of line subtotals; an unresolved product contributes zero
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.state.read().subtotal()
    }

    async fn try_add(&self, product: &Product, quantity: u32) -> Result<(), CartError> {
        let user = self.identity.current().ok_or(CartError::NotAuthenticated)?;

        if quantity > product.stock_quantity {
            return Err(CartError::InsufficientStock {
                requested: quantity,
                available: product.stock_quantity,
                merged: false,
            });
        }

        let cart_id = self.resolve_cart(user).await?;

        let existing = self
            .state
            .read()
            .item_for_product(product.id)
            .map(|item| (item.id, item.quantity));

        match existing {
            Some((item_id, current)) => {
                let new_quantity = current + quantity;
                if new_quantity > product.stock_quantity {
                    return Err(CartError::InsufficientStock {
                        requested: new_quantity,
                        available: product.stock_quantity,
                        merged: true,
                    });
                }
                self.store.update_item_quantity(item_id, new_quantity).await?;
            }
            None => {
                self.store.insert_item(cart_id, product.id, quantity).await?;
            }
        }

        self.refresh().await;
        Ok(())
    }

    async fn try_update(&self, item: CartItemId, quantity: u32) -> Result<(), CartError> {
        self.store.update_item_quantity(item, quantity).await?;
        self.refresh().await;
        Ok(())
    }

    async fn try_remove(&self, item: CartItemId) -> Result<(), CartError> {
        self.store.delete_item(item).await?;
        self.refresh().await;
        Ok(())
    }

    /// The resolved cart for `user`, reconciling inline when none is known
    /// yet (the first cart-mutating action creates the cart lazily)
    async fn resolve_cart(&self, user: UserId) -> Result<CartId, CartError> {
        if let Some(cart_id) = self.cart_id() {
            return Ok(cart_id);
        }

        let epoch = self.session_epoch.load(Ordering::Acquire);
        let (cart_id, items) = self.reconcile(user).await?;
        self.apply_reconciliation(epoch, cart_id, items);
        Ok(cart_id)
    }

    async fn reconcile(&self, user: UserId) -> Result<(CartId, Vec<CartItem>), CartError> {
        let cart = match self.store.find_cart(user).await? {
            Some(cart) => cart,
            None => self.store.create_cart(user).await?,
        };
        let items = self.store.list_items(cart.id).await?;
        Ok((cart.id, items))
    }

    fn apply_reconciliation(&self, epoch: u64, cart_id: CartId, items: Vec<CartItem>) {
        if self.session_epoch.load(Ordering::Acquire) != epoch {
            tracing::debug!(%cart_id, "discarding reconciliation result from a stale session");
            return;
        }
        let mut state = self.state.write();
        state.cart_id = Some(cart_id);
        state.items = items;
    }
}

impl std::fmt::Debug for CartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("CartService")
            .field("cart_id", &state.cart_id)
            .field("items", &state.items.len())
            .field("loading", &state.loading)
            .finish_non_exhaustive()
    }
}
