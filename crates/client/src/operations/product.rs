//! Rakuten Product catalog operations

use super::{AuthMode, Collection, Definition, HttpMethod};
use crate::client::RwsClient;
use crate::error::RwsResult;
use crate::params::Params;
use crate::response::RwsResponse;
use rws_core::version::VersionMap;

/// Catalog product search. The response iterates flattened `Product`
/// entities.
pub static PRODUCT_SEARCH: Definition = Definition {
    name: "ProductSearch",
    service_path: "Product",
    operation_path: "Search",
    versions: VersionMap::new(&[("2014-03-05", "20140305")]),
    auth: AuthMode::ApplicationId,
    method: HttpMethod::Get,
    collection: Some(Collection {
        array: "Products",
        entity: "Product",
    }),
};

/// Product catalog API interface.
#[derive(Clone)]
pub struct ProductApi {
    client: RwsClient,
}

impl ProductApi {
    pub(crate) fn new(client: RwsClient) -> Self {
        Self { client }
    }

    /// Search catalog products.
    ///
    /// GET Product/Search
    pub async fn search(&self, params: Params) -> RwsResult<RwsResponse> {
        self.client.execute(PRODUCT_SEARCH.name, params).await
    }
}
