// Re-export proc macros when their features are enabled
#[cfg(feature = "api_resource")]
pub use api_resource::ApiResource;

/// Trait for REST API resource metadata.
///
/// Provides constants for the resource's base URL, its MongoDB collection,
/// the tag used to group it in API docs, and the human-readable name used in
/// response messages. It is typically derived using the `ApiResource` macro.
///
/// # Examples
///
/// ```ignore
/// use core_proc_macros::ApiResource;
///
/// #[derive(ApiResource)]
/// pub struct Venue {
///     name: String,
///     capacity: i32,
/// }
///
/// assert_eq!(Venue::URL, "/venues");
/// assert_eq!(Venue::COLLECTION, "venues");
/// assert_eq!(Venue::NAME, "Venue");
/// ```
pub trait ApiResource {
    /// The base URL path for this resource (e.g., "/venues")
    const URL: &'static str;
    /// The database collection name (e.g., "venues")
    const COLLECTION: &'static str;
    /// The API documentation tag (e.g., "Venues")
    const TAG: &'static str;
    /// Display name used in messages (e.g., "Venue")
    const NAME: &'static str;
}
