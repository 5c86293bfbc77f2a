use crate::generator::aggregate::Aggregate;

/// Serialize the classified aggregate as pretty-printed JSON.
///
/// Relations carry their kind as a `"kind"` tag, e.g.
/// `{"kind": "one_to_many_inverse", "mapped_by": "order"}`.
pub fn render_model(aggregate: &Aggregate) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(aggregate)
}

/// Read back a model produced by [`render_model`].
pub fn parse_model(json: &str) -> Result<Aggregate, serde_json::Error> {
    serde_json::from_str(json)
}
