use serde_json::Value;

/// Location and weather snapshot supplied by the host.
///
/// Owned by a single service instance and mutated only by `set_weather`;
/// each update replaces both fields wholesale.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionState {
    location: Option<String>,
    weather: Option<Value>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_weather(&mut self, location: String, weather: Value) {
        self.location = Some(location);
        self.weather = Some(weather);
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// The stored snapshot, or `None` when nothing usable has been set.
    ///
    /// Empty or falsy documents (`null`, `{}`, `[]`, `""`, `false`, `0`)
    /// count as unset.
    pub fn weather(&self) -> Option<&Value> {
        self.weather.as_ref().filter(|value| !is_empty_document(value))
    }
}

fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}
