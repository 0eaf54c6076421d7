use std::fmt;

use super::{DocumentRole, JobId};
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn upload(job_id: JobId, role: DocumentRole) -> Self {
        Self(format!("uploads/{}_{}.pdf", job_id, role.as_str()))
    }

    pub fn workbook(job_id: JobId) -> Self {
        Self(format!("generated/{}.xlsx", job_id))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
