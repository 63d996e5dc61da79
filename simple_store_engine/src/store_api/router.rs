use std::borrow::Cow;

use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    db::traits::StoreBackend,
    db_types::UserId,
    store_api::{errors::StoreError, store::Store},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceStatus {
    Ok,
    NotFound,
}

/// The response to a resource fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub data: Vec<u8>,
    pub status: ResourceStatus,
}

impl Reply {
    pub fn ok(data: Vec<u8>) -> Self {
        Self { data, status: ResourceStatus::Ok }
    }

    pub fn not_found() -> Self {
        Self { data: Vec::new(), status: ResourceStatus::NotFound }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResourceStatus::Ok
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

/// A resource fetch from a remote user. `path` holds the already split path segments.
#[derive(Debug, Clone)]
pub struct Request {
    pub user: UserId,
    pub path: Vec<String>,
}

impl Request {
    pub fn new<I, S>(user: UserId, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { user, path: path.into_iter().map(Into::into).collect() }
    }
}

/// The store resources, as addressed by the first one or two path segments. Trailing segments are ignored and an
/// empty path addresses the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Index,
    Product(String),
    Cart,
    AddToCart(String),
    PlaceOrder,
    Orders,
    NotFound,
}

impl Resource {
    pub fn parse<S: AsRef<str>>(path: &[S]) -> Self {
        let sku = || segment(path, 1).filter(|s| !s.is_empty()).map(String::from);
        match segment(path, 0) {
            None | Some("index") => Self::Index,
            Some("product") => sku().map_or(Self::NotFound, Self::Product),
            Some("addtocart") => sku().map_or(Self::NotFound, Self::AddToCart),
            Some("cart") => Self::Cart,
            Some("placeorder") => Self::PlaceOrder,
            Some("orders") => Self::Orders,
            Some(_) => Self::NotFound,
        }
    }
}

fn segment<S: AsRef<str>>(path: &[S], index: usize) -> Option<&str> {
    path.get(index).map(|s| s.as_ref())
}

impl<B> Store<B>
where B: StoreBackend
{
    /// Routes a request to its handler.
    ///
    /// Unknown paths produce a not-found reply. Errors are reserved for failures inside a handler, such as an unknown
    /// SKU in `addtocart`, storage trouble or a template that cannot be rendered.
    pub async fn fetch_resource(&self, request: &Request) -> Result<Reply, StoreError> {
        let user = &request.user;
        let resource = Resource::parse(&request.path);
        trace!("🧭️ {user} requested {:?} => {resource:?}", request.path);
        match resource {
            Resource::Index => self.handle_index(user).await,
            Resource::Product(sku) => self.handle_product(&sku).await,
            Resource::Cart => self.handle_cart(user).await,
            Resource::AddToCart(sku) => self.handle_add_to_cart(user, &sku).await,
            Resource::PlaceOrder => self.handle_place_order(user).await,
            Resource::Orders => self.handle_orders(user).await,
            Resource::NotFound => Ok(self.handle_not_found()),
        }
    }

    pub fn handle_not_found(&self) -> Reply {
        Reply::not_found()
    }
}
