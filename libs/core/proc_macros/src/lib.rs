// Re-export proc macros when their features are enabled
#[cfg(feature = "api_resource")]
pub use api_resource::ApiResource;

/// Naming metadata for a REST resource backed by a document collection.
///
/// Usually derived with the `ApiResource` macro.
///
/// ```ignore
/// use core_proc_macros::ApiResource;
///
/// #[derive(ApiResource)]
/// pub struct Seller {
///     id: String,
/// }
///
/// assert_eq!(Seller::COLLECTION, "sellers");
/// assert_eq!(Seller::URL, "/sellers");
/// assert_eq!(Seller::LABEL, "Seller");
/// assert_eq!(Seller::TAG, "Sellers");
/// ```
pub trait ApiResource {
    /// Collection name in the document store (e.g. "sellers")
    const COLLECTION: &'static str;
    /// Mount path below `/api` (e.g. "/sellers")
    const URL: &'static str;
    /// Singular name used in messages (e.g. "Seller with id ... not found")
    const LABEL: &'static str;
    /// OpenAPI tag (e.g. "Sellers")
    const TAG: &'static str;
}
