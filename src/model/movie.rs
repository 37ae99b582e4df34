use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Full movie resource from `GET /api/v3/movie/{id}`.
///
/// Kept as raw JSON so a PUT sends back every field Radarr returned, not just
/// the ones this tool understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Movie(Value);

impl From<Value> for Movie {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Movie {
    pub fn monitored(&self) -> Option<bool> {
        self.0.get("monitored").and_then(Value::as_bool)
    }

    /// Returns false when the resource is not a JSON object.
    pub fn set_monitored(&mut self, monitored: bool) -> bool {
        match self.0.as_object_mut() {
            Some(obj) => {
                obj.insert("monitored".into(), Value::Bool(monitored));
                true
            }
            None => false,
        }
    }

    /// Id of the attached file. Radarr reports `0` for a placeholder, which counts as no file.
    pub fn movie_file_id(&self) -> Option<i64> {
        self.0
            .get("movieFile")
            .and_then(|f| f.get("id"))
            .and_then(Value::as_i64)
            .filter(|&id| id > 0)
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
