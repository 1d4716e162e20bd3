//! Typed records a model can be asked to produce.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record type that stages request from a model as JSON.
///
/// `shape_hint` is an example document embedded in the output instructions so the
/// model knows which keys to emit; it is never validated against.
pub trait StructuredOutput: Serialize + DeserializeOwned + Send {
    /// Human-readable name used in logs and error messages.
    const NAME: &'static str;

    /// Example JSON document showing every field of the record.
    fn shape_hint() -> serde_json::Value;
}
