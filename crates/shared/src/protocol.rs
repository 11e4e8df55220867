use serde::{Deserialize, Serialize};

use crate::domain::{ConnectionName, ContainerId, RecordContext};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierRequest {
    pub identifier: String,
    pub object_type: String,
    pub record_id: String,
}

impl From<&RecordContext> for IdentifierRequest {
    fn from(context: &RecordContext) -> Self {
        Self {
            identifier: context.identifier_field.clone(),
            object_type: context.object_type.clone(),
            record_id: context.record_id.0.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFilesRequest {
    pub connection: ConnectionName,
    pub identifier: ContainerId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignUploadRequest {
    pub connection: ConnectionName,
    pub identifier: ContainerId,
    pub name: String,
}
