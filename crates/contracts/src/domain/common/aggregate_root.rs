/// Trait for aggregate roots received from the API
///
/// Gives list stores and pages a uniform way to address records by id and
/// to label them in the UI.
pub trait AggregateRoot {
    /// Record id (`_id` on the wire)
    fn id(&self) -> &str;

    /// REST collection path relative to the API base (e.g. "ordenes-trabajo")
    fn collection_name() -> &'static str;

    /// Element name for the UI (singular)
    fn element_name() -> &'static str;

    /// List name for the UI (plural)
    fn list_name() -> &'static str;

    /// Endpoint of a single record
    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::collection_name(), id)
    }
}
