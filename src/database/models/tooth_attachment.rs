use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{missing_fields, non_empty, MissingFields};

/// A bonding fixture (bracket, button, ...) placed on the tooth identified by
/// `transform_id`, positioned relative to that tooth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ToothAttachment {
    pub id: Uuid,
    pub transform_id: String,
    #[serde(rename = "type")]
    pub attachment_type: String,
    pub attachment_code: String,
    pub material: Option<String>,
    pub color: Option<String>,
    pub archwire_slot: Option<String>,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /attachments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateToothAttachment {
    pub transform_id: Option<String>,
    #[serde(rename = "type")]
    pub attachment_type: Option<String>,
    pub attachment_code: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub archwire_slot: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub position_z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewToothAttachment {
    pub transform_id: String,
    pub attachment_type: String,
    pub attachment_code: String,
    pub material: Option<String>,
    pub color: Option<String>,
    pub archwire_slot: Option<String>,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    pub is_active: bool,
}

impl CreateToothAttachment {
    pub const REQUIRED: &'static [&'static str] = &["transformId", "type", "attachmentCode"];

    pub fn validate(self) -> Result<NewToothAttachment, MissingFields> {
        let transform_id = non_empty(self.transform_id);
        let attachment_type = non_empty(self.attachment_type);
        let attachment_code = non_empty(self.attachment_code);

        match (transform_id, attachment_type, attachment_code) {
            (Some(transform_id), Some(attachment_type), Some(attachment_code)) => {
                Ok(NewToothAttachment {
                    transform_id,
                    attachment_type,
                    attachment_code,
                    material: self.material,
                    color: self.color,
                    archwire_slot: self.archwire_slot,
                    position_x: self.position_x.unwrap_or(0.0),
                    position_y: self.position_y.unwrap_or(0.0),
                    position_z: self.position_z.unwrap_or(0.0),
                    is_active: true,
                })
            }
            (transform_id, attachment_type, attachment_code) => Err(missing_fields(
                Self::REQUIRED,
                &[
                    transform_id.is_some(),
                    attachment_type.is_some(),
                    attachment_code.is_some(),
                ],
            )),
        }
    }
}
