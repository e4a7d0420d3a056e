use detailing_auth::SessionToken;
use detailing_core::model::{Cart, CartItemRequest};
use detailing_core::{CartItemId, DomainError, transitions};

use crate::endpoints::cart::{self as api, CartOwner};
use crate::widgets::WidgetError;
use crate::{ApiClient, ApiError, Reply};

/// Cart summary with add, quantity and remove controls.
#[derive(Debug, Clone)]
pub struct CartWidget {
    client: ApiClient,
    token: Option<SessionToken>,
    cart_session: Option<String>,
    cart: Option<Cart>,
}

impl CartWidget {
    pub fn new(client: ApiClient, token: Option<SessionToken>, cart_session: Option<String>) -> Self {
        Self {
            client,
            token,
            cart_session,
            cart: None,
        }
    }

    /// `None` until something is loaded or added.
    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    /// Cart-session id to persist; updated whenever the backend issues one.
    pub fn cart_session(&self) -> Option<&str> {
        self.cart_session.as_deref()
    }

    pub fn item_count(&self) -> u32 {
        self.cart.as_ref().map_or(0, Cart::item_count)
    }

    fn owner(&self) -> CartOwner<'_> {
        CartOwner {
            token: self.token.as_ref(),
            cart_session: self.cart_session.as_deref(),
        }
    }

    /// Fetch the current cart. A 404 means there is none yet.
    pub async fn load(&mut self) -> Result<Option<&Cart>, ApiError> {
        let loaded = api::get(&self.client, self.owner()).await;
        match loaded {
            Ok(cart) => self.accept(cart),
            Err(err) if err.is_not_found() => self.cart = None,
            Err(err) => return Err(err),
        }
        Ok(self.cart.as_ref())
    }

    pub async fn add(&mut self, req: &CartItemRequest) -> Result<Option<&Cart>, WidgetError> {
        if req.quantity == 0 {
            return Err(DomainError::invalid_value("quantity must be at least 1").into());
        }
        let cart = api::add_item(&self.client, self.owner(), req).await?;
        self.accept(cart);
        Ok(self.cart.as_ref())
    }

    /// Zero removes the line.
    pub async fn set_quantity(&mut self, item: CartItemId, quantity: u32) -> Result<Option<&Cart>, ApiError> {
        if quantity == 0 {
            return self.remove(item).await;
        }
        let reply = api::update_item(&self.client, self.owner(), item, quantity).await?;
        match reply {
            Reply::Content(cart) => self.accept(cart),
            Reply::NoContent => {
                self.cart = self
                    .cart
                    .take()
                    .map(|cart| transitions::cart_quantity_changed(cart, item, quantity));
            }
        }
        Ok(self.cart.as_ref())
    }

    pub async fn remove(&mut self, item: CartItemId) -> Result<Option<&Cart>, ApiError> {
        let reply = api::remove_item(&self.client, self.owner(), item).await?;
        match reply {
            Reply::Content(cart) => self.accept(cart),
            Reply::NoContent => {
                self.cart = self
                    .cart
                    .take()
                    .map(|cart| transitions::cart_item_removed(cart, item));
            }
        }
        Ok(self.cart.as_ref())
    }

    fn accept(&mut self, server: Cart) {
        let cart = transitions::cart_replaced(self.cart.as_ref(), server);
        if let Some(session) = &cart.session_id {
            if self.cart_session.as_deref() != Some(session) {
                tracing::debug!("cart session issued");
                self.cart_session = Some(session.clone());
            }
        }
        self.cart = Some(cart);
    }
}
