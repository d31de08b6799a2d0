use serde::Deserialize;

/// The query string accepted when retrieving a recording.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RecordingQuery {
    pub download: Option<String>,
}
