use serde::{Deserialize, Serialize};

use crate::api::AnnotationId;
use crate::models::{TimeInterval, Timestamp};

/// Analyst comment attached to a time range of one dataset.
///
/// Annotations live in session memory only; they disappear with the
/// session, like everything else in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub range: TimeInterval,
    pub text: String,
    pub created_at: Timestamp,
}
