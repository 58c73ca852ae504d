//! A typed request-construction layer for the Xurrent GraphQL API
//! with a pluggable transport.
//!
//! # Getting Started
//!
//! Configure a client, register it, and hand the registry to whatever builds
//! your requests:
//!
//! ```ignore
//! use xurrent_graphql::{Client, ClientRegistry, Query};
//!
//! let client = Client::builder("https://graphql.example.xurrent.com")
//!     .with_account("my-account")
//!     .with_token(std::env::var("XURRENT_TOKEN").unwrap())
//!     .build();
//!
//! let registry = ClientRegistry::new();
//! let handle = registry.register("production", client);
//!
//! let query = Query::new("teams")
//!     .items_per_request(50)?
//!     .select("id")
//!     .select("name");
//! let teams: Vec<serde_json::Value> = registry.resolve(Some(&handle))?.get(&query).await?;
//! ```
//!
//! # Request model
//!
//! Three value types cover everything that goes over the wire:
//!
//! * [`Query`](./query/struct.Query.html) - a read/list request: selected
//!   fields, filters, ordering, page size, nested sub-selections.
//! * Mutation inputs - any type implementing
//!   [`MutationInput`](./input/trait.MutationInput.html). Fields wrap their
//!   values in [`InputField`](./input/enum.InputField.html) so that a field
//!   that was never set stays out of the serialized payload entirely,
//!   which is what gives mutations their partial-update semantics.
//! * [`QueryFilter`](./filter/struct.QueryFilter.html) - a single filter
//!   condition whose value is a tagged union, so a condition can never carry
//!   more than one value kind.
//!
//! # Transport
//!
//! The [`Transport`](./transport/trait.Transport.html) trait is the seam
//! between request construction and I/O. The default
//! [`HttpTransport`](./transport/struct.HttpTransport.html) posts rendered
//! documents with `reqwest`; tests swap in a fake that replays canned
//! responses.
//!
//! # Features
//!
//! * `http` **(default)** - include `HttpTransport` and the `reqwest`
//!   dependency. Disable it if you only need request construction.

#[macro_use]
extern crate serde;
#[macro_use]
extern crate async_trait;

use std::{fmt, fmt::Display};

pub mod client;
mod error;
pub mod filter;
pub mod input;
pub mod query;
mod registry;
pub(crate) mod render;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use error::ClientError;
pub use filter::{CustomFilter, FilterOperator, FilterValues, QueryFilter};
pub use input::{InputField, MutationInput};
pub use query::{Query, QueryField, SortOrder};
pub use registry::{ClientHandle, ClientRegistry};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{HeaderPair, Transport};

/// Identifiers as the API hands them out. Node IDs are opaque strings.
pub type ID = String;

/// The form in which a rendered request document is sent over HTTP.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RequestBody {
    /// The GraphQL document, rendered as a string.
    pub query: String
}

/// The generic shape taken by the responses of the API.
///
/// Either `data` or `errors` is populated; a response carrying errors is
/// turned into [`ClientError::Api`](./enum.ClientError.html) before any
/// payload is deserialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQLResponse {
    /// The absent, partial or complete response data.
    pub data: Option<serde_json::Value>,
    /// The top-level errors returned by the server.
    pub errors: Option<Vec<ErrorEntry>>
}

/// An element in the top-level `errors` array of a response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEntry {
    /// The human-readable error message. This is the only required field.
    pub message: String,
    /// Which locations in the document the error applies to.
    pub locations: Option<Vec<Location>>,
    /// Which path in the document the error applies to, e.g. `["teams", 0, "name"]`.
    pub path: Option<Vec<PathFragment>>
}

impl Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use `/` as a separator like JSON Pointer.
        let path = self
            .path
            .as_ref()
            .map(|fragments| {
                fragments
                    .iter()
                    .fold(String::new(), |mut acc, item| {
                        acc.push_str(&format!("{}/", item));
                        acc
                    })
                    .trim_end_matches('/')
                    .to_string()
            })
            .unwrap_or_else(|| "<document>".to_string());

        let loc = self
            .locations
            .as_ref()
            .and_then(|locations| locations.iter().next())
            .cloned()
            .unwrap_or_else(Location::default);

        write!(f, "{}:{}:{}: {}", path, loc.line, loc.column, self.message)
    }
}

/// Part of a path in a response error. It can be an object key or an array index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PathFragment {
    /// A key inside an object
    Key(String),
    /// An index inside an array
    Index(i32)
}

impl Display for PathFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathFragment::Key(ref key) => write!(f, "{}", key),
            PathFragment::Index(ref idx) => write!(f, "{}", idx)
        }
    }
}

/// Represents a location inside a request document. Used in errors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// The line number in the document where the error originated (starting from 1).
    pub line: i32,
    /// The column number in the document where the error originated (starting from 1).
    pub column: i32
}
