//! The page payload that carries breakpoints from the server to the tracker.
//!
//! The payload is a JSON array of definitions in declaration order, stored as
//! a JSON-encoded *string* under a key of the page-settings object:
//!
//! ```json
//! { "theme_breakpoints": "[{\"id\":\"mobile\",\"mediaQuery\":\"\"}]" }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::{Map, Value};

use crate::{
    breakpoint::{BreakpointDefinition, BreakpointSet},
    error::{Error, Result},
};

impl BreakpointSet {
    /// Decodes a payload string.
    ///
    /// Valid JSON that is not an array decodes to an empty set.
    pub fn from_payload(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_array() {
            tracing::warn!(payload = json, "breakpoint payload is not an array; ignoring it");
            return Ok(Self::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads the payload stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    pub fn from_settings(settings: &Map<String, Value>, key: &str) -> Result<Option<Self>> {
        match settings.get(key) {
            None => Ok(None),
            Some(Value::String(payload)) => Self::from_payload(payload).map(Some),
            Some(_) => Err(Error::PayloadNotString {
                key: key.to_string(),
            }),
        }
    }

    /// Stores this set's payload under `key`, replacing any previous value.
    pub fn attach_to_settings(&self, settings: &mut Map<String, Value>, key: &str) -> Result<()> {
        settings.insert(key.to_string(), Value::String(self.to_payload()?));
        Ok(())
    }
}

impl Serialize for BreakpointSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|definition| &**definition))
    }
}

impl<'de> Deserialize<'de> for BreakpointSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let definitions = Vec::<BreakpointDefinition>::deserialize(deserializer)?;
        BreakpointSet::try_from_definitions(definitions).map_err(D::Error::custom)
    }
}
