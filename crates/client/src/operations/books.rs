//! Rakuten Books operations

use super::{AuthMode, Definition, HttpMethod};
use crate::client::RwsClient;
use crate::error::RwsResult;
use crate::params::Params;
use crate::response::RwsResponse;
use rws_core::version::VersionMap;

/// Books genre tree lookup.
pub static BOOKS_GENRE_SEARCH: Definition = Definition {
    name: "BooksGenreSearch",
    service_path: "BooksGenre",
    operation_path: "Search",
    versions: VersionMap::new(&[("2012-11-28", "20121128")]),
    auth: AuthMode::ApplicationId,
    method: HttpMethod::Get,
    collection: None,
};

/// Rakuten Books API interface.
#[derive(Clone)]
pub struct BooksApi {
    client: RwsClient,
}

impl BooksApi {
    pub(crate) fn new(client: RwsClient) -> Self {
        Self { client }
    }

    /// Look up the Books genre tree around a genre id.
    ///
    /// GET BooksGenre/Search
    pub async fn genre_search(&self, params: Params) -> RwsResult<RwsResponse> {
        self.client.execute(BOOKS_GENRE_SEARCH.name, params).await
    }
}
