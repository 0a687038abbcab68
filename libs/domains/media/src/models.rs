//! Asset documents and their API representations

use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use database::DatabaseError;
use database::mongodb::bson::{self, Binary, Bson, Document, spec::BinarySubtype};
use serde::ser::{Serialize, SerializeMap, Serializer};
use utoipa::ToSchema;

use crate::kind::AssetKind;

/// A file read from a multipart upload
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl Upload {
    /// Build the stored document, filling in the kind's defaults
    pub fn into_document(self, kind: AssetKind, owner_id: &str) -> Document {
        let mut document = Document::new();
        document.insert(kind.owner_field(), owner_id);
        document.insert(
            "filename",
            self.filename
                .unwrap_or_else(|| kind.default_filename().to_string()),
        );
        document.insert(
            "content_type",
            self.content_type
                .unwrap_or_else(|| kind.default_content_type().to_string()),
        );
        document.insert(
            "content",
            Binary {
                subtype: BinarySubtype::Generic,
                bytes: self.content,
            },
        );
        document.insert("uploaded_at", bson::DateTime::now());
        document
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Hex ObjectId of the stored asset
    pub id: String,
}

/// Everything about an asset except its bytes
///
/// Serialized as `{"id", "<owner field>", "filename", "content_type",
/// "uploaded_at"}` where the owner field is `event_id` or `venue_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetMetadata {
    pub kind: AssetKind,
    pub id: String,
    pub owner_id: String,
    pub filename: String,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}

fn malformed(field: &str) -> DatabaseError {
    DatabaseError::Serialization(format!("asset document has no usable {field}"))
}

fn string_or(document: &Document, field: &str, default: &str) -> String {
    document
        .get_str(field)
        .map(str::to_owned)
        .unwrap_or_else(|_| default.to_owned())
}

impl AssetMetadata {
    pub fn from_document(kind: AssetKind, document: &Document) -> Result<Self, DatabaseError> {
        let id = document.get_object_id("_id").map_err(|_| malformed("_id"))?;
        let owner_id = document
            .get_str(kind.owner_field())
            .map_err(|_| malformed(kind.owner_field()))?;
        let uploaded_at = document
            .get_datetime("uploaded_at")
            .map_err(|_| malformed("uploaded_at"))?;
        let uploaded_at = DateTime::<Utc>::from_timestamp_millis(uploaded_at.timestamp_millis())
            .ok_or_else(|| malformed("uploaded_at"))?;

        Ok(Self {
            kind,
            id: id.to_hex(),
            owner_id: owner_id.to_owned(),
            filename: string_or(document, "filename", kind.default_filename()),
            content_type: string_or(document, "content_type", kind.default_content_type()),
            uploaded_at,
        })
    }
}

impl Serialize for AssetMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry(self.kind.owner_field(), &self.owner_id)?;
        map.serialize_entry("filename", &self.filename)?;
        map.serialize_entry("content_type", &self.content_type)?;
        map.serialize_entry("uploaded_at", &self.uploaded_at.to_rfc3339())?;
        map.end()
    }
}

/// Stored bytes plus the headers they are served with
#[derive(Debug, Clone, PartialEq)]
pub struct AssetFile {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl AssetFile {
    pub fn from_document(kind: AssetKind, mut document: Document) -> Result<Self, DatabaseError> {
        let content = match document.remove("content") {
            Some(Bson::Binary(binary)) => binary.bytes,
            _ => return Err(malformed("content")),
        };

        Ok(Self {
            filename: string_or(&document, "filename", kind.default_filename()),
            content_type: string_or(&document, "content_type", kind.default_content_type()),
            content,
        })
    }

    pub fn content_disposition(&self) -> String {
        format!(r#"inline; filename="{}""#, self.filename.replace('"', ""))
    }
}

impl IntoResponse for AssetFile {
    fn into_response(self) -> Response {
        let disposition = self.content_disposition();
        (
            [
                (header::CONTENT_TYPE, self.content_type),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.content,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    fn upload() -> Upload {
        Upload {
            filename: Some("launch.png".into()),
            content_type: Some("image/png".into()),
            content: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_upload_document_fields() {
        let document = upload().into_document(AssetKind::Poster, "e1");

        assert_eq!(document.get_str("event_id").unwrap(), "e1");
        assert_eq!(document.get_str("filename").unwrap(), "launch.png");
        assert_eq!(document.get_str("content_type").unwrap(), "image/png");
        assert_eq!(document.get_binary_generic("content").unwrap(), &vec![1, 2, 3]);
        assert!(document.get_datetime("uploaded_at").is_ok());
    }

    #[test]
    fn test_upload_defaults() {
        let bare = Upload {
            filename: None,
            content_type: None,
            content: Vec::new(),
        };
        let document = bare.into_document(AssetKind::Video, "e1");

        assert_eq!(document.get_str("filename").unwrap(), "video");
        assert_eq!(document.get_str("content_type").unwrap(), "video/mp4");
    }

    #[test]
    fn test_metadata_serializes_owner_field() {
        let oid = ObjectId::new();
        let document = doc! {
            "_id": oid,
            "venue_id": "v1",
            "filename": "front.jpg",
            "content_type": "image/jpeg",
            "uploaded_at": bson::DateTime::from_millis(1_700_000_000_000),
        };

        let metadata = AssetMetadata::from_document(AssetKind::Photo, &document).unwrap();
        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            json!({
                "id": oid.to_hex(),
                "venue_id": "v1",
                "filename": "front.jpg",
                "content_type": "image/jpeg",
                "uploaded_at": "2023-11-14T22:13:20+00:00"
            })
        );
    }

    #[test]
    fn test_metadata_requires_timestamp() {
        let document = doc! { "_id": ObjectId::new(), "event_id": "e1" };
        assert!(AssetMetadata::from_document(AssetKind::Poster, &document).is_err());
    }

    #[test]
    fn test_file_from_document() {
        let document = upload().into_document(AssetKind::Poster, "e1");
        let file = AssetFile::from_document(AssetKind::Poster, document).unwrap();

        assert_eq!(file.content, vec![1, 2, 3]);
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.content_disposition(), r#"inline; filename="launch.png""#);
    }

    #[test]
    fn test_file_response_headers() {
        let file = AssetFile {
            filename: "clip.mp4".into(),
            content_type: "video/mp4".into(),
            content: vec![0; 4],
        };
        let response = file.into_response();

        assert_eq!(response.headers()[header::CONTENT_TYPE], "video/mp4");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            r#"inline; filename="clip.mp4""#
        );
    }
}
