//! Operation registry and request definitions
//!
//! Every vendor endpoint the SDK knows is described by a static
//! [`Definition`]: its URL path segments, supported API versions, auth
//! mode, HTTP method, and (for search operations) the nested collection to
//! flatten. [`resolve`] maps a caller-supplied operation name to its
//! definition.
//!
//! ## Operations
//!
//! | Name | Path | Auth |
//! |------|------|------|
//! | `IchibaItemSearch` | IchibaItem/Search | applicationId |
//! | `IchibaGenreSearch` | IchibaGenre/Search | applicationId |
//! | `IchibaTagSearch` | IchibaTag/Search | applicationId |
//! | `BooksGenreSearch` | BooksGenre/Search | applicationId |
//! | `KoboGenreSearch` | Kobo/GenreSearch | applicationId |
//! | `ProductSearch` | Product/Search | applicationId |
//! | `AuctionItemCodeSearch` | AuctionItemCode/Search | applicationId |

use rws_core::version::VersionMap;

pub mod auction;
pub mod books;
pub mod ichiba;
pub mod kobo;
pub mod product;

pub use auction::AuctionApi;
pub use books::BooksApi;
pub use ichiba::IchibaApi;
pub use kobo::KoboApi;
pub use product::ProductApi;

/// How a definition authenticates its requests.
///
/// The vendor accepts exactly one of the two modes per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Send `applicationId=<application id>`.
    ApplicationId,
    /// Send `access_token=<OAuth2 token>`.
    AccessToken,
}

/// HTTP method a definition uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Parameters go in the query string.
    Get,
    /// Parameters go in a form body.
    Post,
}

/// Nested collection layout of a search response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    /// Top-level array field, e.g. `Items`.
    pub array: &'static str,
    /// Entity field inside each array row, e.g. `Item`.
    pub entity: &'static str,
}

/// Static description of one vendor endpoint.
#[derive(Debug)]
pub struct Definition {
    /// Canonical registry name.
    pub name: &'static str,
    /// Service segment of the request URL.
    pub service_path: &'static str,
    /// Operation segment of the request URL.
    pub operation_path: &'static str,
    /// Supported API versions, newest first.
    pub versions: VersionMap,
    /// Auth parameter the endpoint expects.
    pub auth: AuthMode,
    /// GET or POST.
    pub method: HttpMethod,
    /// Collection to flatten into the response's entity list, if any.
    pub collection: Option<Collection>,
}

/// All registered definitions.
pub static ALL: &[&Definition] = &[
    &ichiba::ICHIBA_ITEM_SEARCH,
    &ichiba::ICHIBA_GENRE_SEARCH,
    &ichiba::ICHIBA_TAG_SEARCH,
    &books::BOOKS_GENRE_SEARCH,
    &kobo::KOBO_GENRE_SEARCH,
    &product::PRODUCT_SEARCH,
    &auction::AUCTION_ITEM_CODE_SEARCH,
];

/// Resolve an operation name to its definition.
///
/// Names are matched ignoring ASCII case and any `/` separators, so the
/// aliases `IchibaItemSearch` and `IchibaItem/Search` hit the same
/// definition.
#[must_use]
pub fn resolve(name: &str) -> Option<&'static Definition> {
    let canonical: String = name.chars().filter(|c| *c != '/').collect();
    ALL.iter()
        .copied()
        .find(|d| d.name.eq_ignore_ascii_case(&canonical))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_canonical_names() {
        let def = resolve("IchibaItemSearch").unwrap();
        assert_eq!(def.service_path, "IchibaItem");
        assert_eq!(def.operation_path, "Search");
    }

    #[test]
    fn resolves_slash_aliases() {
        assert!(std::ptr::eq(
            resolve("IchibaItem/Search").unwrap(),
            resolve("IchibaItemSearch").unwrap()
        ));
        assert!(resolve("Kobo/GenreSearch").is_some());
    }

    #[test]
    fn resolution_ignores_case() {
        assert!(resolve("ichibaitemsearch").is_some());
        assert!(resolve("PRODUCTSEARCH").is_some());
    }

    #[test]
    fn unknown_operation_misses() {
        assert!(resolve("WrongOperation").is_none());
        assert!(resolve("").is_none());
    }

    #[test]
    fn registry_names_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert!(!a.name.eq_ignore_ascii_case(b.name), "{} duplicated", a.name);
            }
        }
    }

    #[test]
    fn every_definition_has_versions() {
        for def in ALL {
            assert!(!def.versions.is_empty(), "{} has no versions", def.name);
        }
    }

    #[test]
    fn collection_operations_flatten_expected_fields() {
        let items = resolve("IchibaItemSearch").unwrap().collection.unwrap();
        assert_eq!((items.array, items.entity), ("Items", "Item"));

        let products = resolve("ProductSearch").unwrap().collection.unwrap();
        assert_eq!((products.array, products.entity), ("Products", "Product"));

        assert!(resolve("BooksGenreSearch").unwrap().collection.is_none());
    }
}
