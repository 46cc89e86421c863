use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Opaque per-node annotations. Carried across rebuilds, never interpreted by
/// the rewriter and never serialized.
pub type Metadata = HashMap<String, Arc<dyn Any + Send + Sync>>;

fn entry<T: Any + Send + Sync>(value: T) -> Arc<dyn Any + Send + Sync> {
    Arc::new(value)
}

/// A map holding only `key`.
pub fn metadata_with<T: Any + Send + Sync>(key: &str, value: T) -> Metadata {
    Metadata::from([(key.to_string(), entry(value))])
}

/// The value under `key`, if present and of type `T`.
pub fn get_metadata<'a, T: Any + Send + Sync>(metadata: &'a Metadata, key: &str) -> Option<&'a T> {
    metadata.get(key)?.downcast_ref::<T>()
}

pub fn insert_metadata<T: Any + Send + Sync>(metadata: &mut Metadata, key: &str, value: T) {
    metadata.insert(key.to_string(), entry(value));
}

/// Returns a copy of `metadata` (or a fresh map) with `key` set to `value`.
pub fn extend_metadata<T: Any + Send + Sync>(
    metadata: Option<&Arc<Metadata>>,
    key: &str,
    value: T,
) -> Arc<Metadata> {
    let mut map = metadata.map(|m| (**m).clone()).unwrap_or_default();
    insert_metadata(&mut map, key, value);
    Arc::new(map)
}
