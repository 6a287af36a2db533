use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSchedule {
    pub path: PathBuf,
    /// Bearer token forwarded to the report service.
    pub credential: String,
}
