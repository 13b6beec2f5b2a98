//! Rakuten Kobo operations

use super::{AuthMode, Definition, HttpMethod};
use crate::client::RwsClient;
use crate::error::RwsResult;
use crate::params::Params;
use crate::response::RwsResponse;
use rws_core::version::VersionMap;

/// Kobo ebook genre lookup. Note the inverted path layout: the operation
/// name is `KoboGenreSearch` but the URL nests `GenreSearch` under `Kobo`.
pub static KOBO_GENRE_SEARCH: Definition = Definition {
    name: "KoboGenreSearch",
    service_path: "Kobo",
    operation_path: "GenreSearch",
    versions: VersionMap::new(&[("2013-10-10", "20131010")]),
    auth: AuthMode::ApplicationId,
    method: HttpMethod::Get,
    collection: None,
};

/// Rakuten Kobo API interface.
#[derive(Clone)]
pub struct KoboApi {
    client: RwsClient,
}

impl KoboApi {
    pub(crate) fn new(client: RwsClient) -> Self {
        Self { client }
    }

    /// Look up Kobo ebook genres.
    ///
    /// GET Kobo/GenreSearch
    pub async fn genre_search(&self, params: Params) -> RwsResult<RwsResponse> {
        self.client.execute(KOBO_GENRE_SEARCH.name, params).await
    }
}
