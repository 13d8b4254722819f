use mongodb::{
    Collection, IndexModel,
    bson::doc,
    error::{Error, ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::debug;

/// Server error code for a unique index violation
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Create a unique ascending index on `field` if it does not exist yet.
pub async fn ensure_unique_index<T>(collection: &Collection<T>, field: &str) -> Result<(), Error>
where
    T: Send + Sync,
{
    let model = IndexModel::builder()
        .keys(doc! { field: 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();

    collection.create_index(model).await?;
    debug!(collection = collection.name(), field, "Unique index ensured");
    Ok(())
}

/// Whether a write failed because of a unique index.
pub fn is_duplicate_key(error: &Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
