//! Field projections for store requests.

use std::fmt;

/// A projectable field of a remote entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Parents,
    Md5Checksum,
    MimeType,
    Size,
    ModifiedTime,
    AppProperties,
}

impl Field {
    /// The wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Parents => "parents",
            Field::Md5Checksum => "md5Checksum",
            Field::MimeType => "mimeType",
            Field::Size => "size",
            Field::ModifiedTime => "modifiedTime",
            Field::AppProperties => "appProperties",
        }
    }

    /// Joins fields into a comma-separated projection, e.g. `id,name`.
    pub fn join(fields: &[Field]) -> String {
        fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields fetched for root resolution and update confirmation.
pub const ENTITY_FIELDS: &[Field] = &[Field::Id, Field::Name, Field::MimeType, Field::AppProperties];

/// Fields fetched for the full listing.
pub const LISTING_FIELDS: &[Field] = &[
    Field::Id,
    Field::Name,
    Field::Parents,
    Field::Md5Checksum,
    Field::MimeType,
    Field::Size,
    Field::ModifiedTime,
    Field::AppProperties,
];

/// Listing filter: everything the acting user owns that is not trashed.
pub const OWNED_NOT_TRASHED_QUERY: &str = "trashed = false and 'me' in owners";
