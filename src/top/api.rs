use crate::core::errors::Result;
use crate::core::params::Params;
use crate::top::client::TopClient;
use crate::top::methods::{
    ITEM_GET, MESSAGE_SEND, SELECTED_ITEMS_SEARCH, SHOP_GET, TMC_MESSAGES_CONSUME, USERS_GET,
    USER_BUYER_GET, USER_GET, USER_SELLER_GET,
};
use crate::top::types::{SelectedItem, Shop, TmcMessage, User};
use serde_json::Value;

impl TopClient {
    /// Get a user by nick, or the session's user.
    ///
    /// Params: `fields` (required), `nick` or `session`.
    /// Returns `null` when the user does not exist.
    pub async fn user_get(&self, params: Params) -> Result<Value> {
        self.call(&USER_GET, params).await
    }

    /// Get users by a comma separated `nicks` list. Returns `[]` when none exist.
    pub async fn users_get(&self, params: Params) -> Result<Value> {
        self.call(&USERS_GET, params).await
    }

    /// Current buyer. Params: `fields`, `session` or `access_token`.
    pub async fn user_buyer_get(&self, params: Params) -> Result<Value> {
        self.call(&USER_BUYER_GET, params).await
    }

    /// Current seller. Params: `fields`, `session` or `access_token`.
    pub async fn user_seller_get(&self, params: Params) -> Result<Value> {
        self.call(&USER_SELLER_GET, params).await
    }

    /// Shop of `nick`; `null` when the user has no shop.
    pub async fn shop_get(&self, params: Params) -> Result<Value> {
        self.call(&SHOP_GET, params).await
    }

    pub async fn item_get(&self, params: Params) -> Result<Value> {
        self.call(&ITEM_GET, params).await
    }

    /// Curated items of category `cid`.
    pub async fn selected_items_search(&self, params: Params) -> Result<Value> {
        self.call(&SELECTED_ITEMS_SEARCH, params).await
    }

    /// Send a batch of `messages`.
    pub async fn message_send(&self, params: Params) -> Result<Value> {
        self.call(&MESSAGE_SEND, params).await
    }

    pub async fn tmc_messages_consume(&self, params: Params) -> Result<Value> {
        self.call(&TMC_MESSAGES_CONSUME, params).await
    }

    /// [`TopClient::user_get`] decoded into a [`User`]
    pub async fn user(&self, params: Params) -> Result<Option<User>> {
        self.call_as(&USER_GET, params).await
    }

    /// [`TopClient::users_get`] decoded into [`User`]s
    pub async fn users(&self, params: Params) -> Result<Vec<User>> {
        self.call_as(&USERS_GET, params).await
    }

    pub async fn shop(&self, params: Params) -> Result<Option<Shop>> {
        self.call_as(&SHOP_GET, params).await
    }

    pub async fn selected_items(&self, params: Params) -> Result<Vec<SelectedItem>> {
        self.call_as(&SELECTED_ITEMS_SEARCH, params).await
    }

    pub async fn tmc_messages(&self, params: Params) -> Result<Vec<TmcMessage>> {
        self.call_as(&TMC_MESSAGES_CONSUME, params).await
    }
}
