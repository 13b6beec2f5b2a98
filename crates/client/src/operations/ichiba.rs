//! Rakuten Ichiba marketplace operations

use super::{AuthMode, Collection, Definition, HttpMethod};
use crate::client::RwsClient;
use crate::error::RwsResult;
use crate::params::Params;
use crate::response::RwsResponse;
use rws_core::version::VersionMap;

/// Keyword/genre search over Ichiba items.
pub static ICHIBA_ITEM_SEARCH: Definition = Definition {
    name: "IchibaItemSearch",
    service_path: "IchibaItem",
    operation_path: "Search",
    versions: VersionMap::new(&[
        ("2014-02-22", "20140222"),
        ("2013-08-05", "20130805"),
        ("2013-04-24", "20130424"),
        ("2012-07-23", "20120723"),
    ]),
    auth: AuthMode::ApplicationId,
    method: HttpMethod::Get,
    collection: Some(Collection {
        array: "Items",
        entity: "Item",
    }),
};

/// Ichiba genre tree lookup.
pub static ICHIBA_GENRE_SEARCH: Definition = Definition {
    name: "IchibaGenreSearch",
    service_path: "IchibaGenre",
    operation_path: "Search",
    versions: VersionMap::new(&[("2014-02-22", "20140222"), ("2012-07-23", "20120723")]),
    auth: AuthMode::ApplicationId,
    method: HttpMethod::Get,
    collection: None,
};

/// Ichiba tag group lookup.
pub static ICHIBA_TAG_SEARCH: Definition = Definition {
    name: "IchibaTagSearch",
    service_path: "IchibaTag",
    operation_path: "Search",
    versions: VersionMap::new(&[("2014-02-22", "20140222")]),
    auth: AuthMode::ApplicationId,
    method: HttpMethod::Get,
    collection: None,
};

/// Ichiba marketplace API interface.
#[derive(Clone)]
pub struct IchibaApi {
    client: RwsClient,
}

impl IchibaApi {
    pub(crate) fn new(client: RwsClient) -> Self {
        Self { client }
    }

    /// Search Ichiba items. The response iterates flattened `Item` entities.
    ///
    /// GET IchibaItem/Search
    pub async fn item_search(&self, params: Params) -> RwsResult<RwsResponse> {
        self.client.execute(ICHIBA_ITEM_SEARCH.name, params).await
    }

    /// Look up the Ichiba genre tree around a genre id.
    ///
    /// GET IchibaGenre/Search
    pub async fn genre_search(&self, params: Params) -> RwsResult<RwsResponse> {
        self.client.execute(ICHIBA_GENRE_SEARCH.name, params).await
    }

    /// Look up Ichiba tag groups by tag id.
    ///
    /// GET IchibaTag/Search
    pub async fn tag_search(&self, params: Params) -> RwsResult<RwsResponse> {
        self.client.execute(ICHIBA_TAG_SEARCH.name, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_search_defaults_to_newest_version() {
        assert_eq!(
            ICHIBA_ITEM_SEARCH.versions.latest(),
            ("2014-02-22", "20140222")
        );
        assert_eq!(ICHIBA_ITEM_SEARCH.versions.len(), 4);
    }

    #[test]
    fn older_item_search_versions_resolve() {
        assert!(ICHIBA_ITEM_SEARCH.versions.supports("2012-07-23"));
        assert!(ICHIBA_ITEM_SEARCH.versions.supports("20130424"));
        assert!(!ICHIBA_ITEM_SEARCH.versions.supports("2020-01-08"));
    }
}
