use detailing_auth::SessionToken;
use detailing_core::CartItemId;
use detailing_core::model::{Cart, CartItemRequest, CartQuantityRequest};

use crate::{ApiClient, ApiError, CallOptions, Reply};

/// Whoever owns the cart: a signed-in user, an anonymous cart session, or
/// both while an anonymous cart is being claimed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartOwner<'a> {
    pub token: Option<&'a SessionToken>,
    pub cart_session: Option<&'a str>,
}

impl CartOwner<'_> {
    fn apply(self, options: CallOptions) -> CallOptions {
        options.token(self.token).cart_session(self.cart_session)
    }
}

/// Current cart. A 404 means no cart exists yet.
pub async fn get(client: &ApiClient, owner: CartOwner<'_>) -> Result<Cart, ApiError> {
    client.fetch("/cart", owner.apply(CallOptions::get())).await
}

pub async fn add_item(client: &ApiClient, owner: CartOwner<'_>, req: &CartItemRequest) -> Result<Cart, ApiError> {
    client
        .fetch("/cart/items", owner.apply(CallOptions::post()).json(req)?)
        .await
}

pub async fn update_item(
    client: &ApiClient,
    owner: CartOwner<'_>,
    id: CartItemId,
    quantity: u32,
) -> Result<Reply<Cart>, ApiError> {
    client
        .call(
            &format!("/cart/items/{id}"),
            owner.apply(CallOptions::patch()).json(&CartQuantityRequest { quantity })?,
        )
        .await
}

pub async fn remove_item(client: &ApiClient, owner: CartOwner<'_>, id: CartItemId) -> Result<Reply<Cart>, ApiError> {
    client
        .call(&format!("/cart/items/{id}"), owner.apply(CallOptions::delete()))
        .await
}
