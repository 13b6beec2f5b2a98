//! Rakuten Auction operations

use super::{AuthMode, Definition, HttpMethod};
use crate::client::RwsClient;
use crate::error::RwsResult;
use crate::params::Params;
use crate::response::RwsResponse;
use rws_core::version::VersionMap;

/// Auction item lookup by item code.
pub static AUCTION_ITEM_CODE_SEARCH: Definition = Definition {
    name: "AuctionItemCodeSearch",
    service_path: "AuctionItemCode",
    operation_path: "Search",
    versions: VersionMap::new(&[("2012-10-10", "20121010")]),
    auth: AuthMode::ApplicationId,
    method: HttpMethod::Get,
    collection: None,
};

/// Rakuten Auction API interface.
#[derive(Clone)]
pub struct AuctionApi {
    client: RwsClient,
}

impl AuctionApi {
    pub(crate) fn new(client: RwsClient) -> Self {
        Self { client }
    }

    /// Look up an auction item by its item code.
    ///
    /// GET AuctionItemCode/Search
    pub async fn item_code_search(&self, params: Params) -> RwsResult<RwsResponse> {
        self.client
            .execute(AUCTION_ITEM_CODE_SEARCH.name, params)
            .await
    }
}
