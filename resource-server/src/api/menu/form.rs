//! Menu request body: multipart form or JSON

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use http::{StatusCode, header};
use serde::{Deserialize, Deserializer};
use shared::AppError;
use shared::models::{MenuItemCreate, MenuItemUpdate};

use crate::core::ServerState;
use crate::utils::extract::json_rejection;

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "image";

/// Text fields of a menu write, all optional at this stage
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MenuFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "price_from_number_or_text")]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl MenuFields {
    /// Create payload; `name` and `price` are required
    pub fn into_create(self) -> Result<MenuItemCreate, AppError> {
        Ok(MenuItemCreate {
            name: self.name.ok_or_else(|| AppError::required("name"))?,
            price: self.price.ok_or_else(|| AppError::required("price"))?,
            description: self.description,
            image: None,
        })
    }

    pub fn into_update(self) -> MenuItemUpdate {
        MenuItemUpdate {
            name: self.name,
            price: self.price,
            description: self.description,
            image: None,
        }
    }
}

/// An uploaded file as received
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub file_name: String,
    pub data: Bytes,
}

/// Decoded menu write: text fields plus an optional image
#[derive(Debug, Clone)]
pub struct MenuForm {
    pub fields: MenuFields,
    pub image: Option<ImagePart>,
}

impl FromRequest<ServerState> for MenuForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &ServerState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            read_multipart(multipart).await
        } else if is_json(&content_type) {
            let Json(fields) = Json::<MenuFields>::from_request(req, state)
                .await
                .map_err(json_rejection)?;
            Ok(Self {
                fields,
                image: None,
            })
        } else {
            Err(AppError::validation(
                "Expected a multipart/form-data or application/json body",
            ))
        }
    }
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

async fn read_multipart(mut multipart: Multipart) -> Result<MenuForm, AppError> {
    let mut fields = MenuFields::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            IMAGE_FIELD => {
                // Only file parts count; a text `image` value is not an upload
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    tracing::debug!("Ignoring non-file image field");
                    continue;
                };
                let data = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty, unnamed part when no file was picked
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                image = Some(ImagePart { file_name, data });
            }
            "name" => fields.name = Some(field.text().await.map_err(multipart_error)?),
            "price" => {
                let raw = field.text().await.map_err(multipart_error)?;
                fields.price = Some(parse_price(&raw)?);
            }
            "description" => {
                fields.description = Some(field.text().await.map_err(multipart_error)?)
            }
            other => tracing::debug!(field = other, "Ignoring unknown menu form field"),
        }
    }

    Ok(MenuForm { fields, image })
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::new(shared::ErrorCode::PayloadTooLarge);
    }
    AppError::validation(format!("Invalid multipart request: {}", err.body_text()))
}

fn parse_price(raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::invalid_format("price", "price must be a number"))
}

fn price_from_number_or_text<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("price must be a number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_json_price_accepts_number_or_text() {
        let fields: MenuFields = serde_json::from_str(r#"{"name":"Pizza","price":"12.50"}"#).unwrap();
        assert_eq!(fields.price, Some(12.5));

        let fields: MenuFields = serde_json::from_str(r#"{"price":9}"#).unwrap();
        assert_eq!(fields.price, Some(9.0));

        let fields: MenuFields = serde_json::from_str(r#"{"name":"Pizza"}"#).unwrap();
        assert_eq!(fields.price, None);

        assert!(serde_json::from_str::<MenuFields>(r#"{"price":"cheap"}"#).is_err());
    }

    #[test]
    fn test_into_create_requires_name_and_price() {
        let err = MenuFields {
            price: Some(1.0),
            ..Default::default()
        }
        .into_create()
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = MenuFields {
            name: Some("Pizza".into()),
            ..Default::default()
        }
        .into_create()
        .unwrap_err();
        assert_eq!(err.message, "price is required");
    }

    #[test]
    fn test_is_json() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("application/merge-patch+json"));
        assert!(!is_json("text/plain"));
        assert!(!is_json(""));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 12.99 ").unwrap(), 12.99);
        assert_eq!(parse_price("abc").unwrap_err().code, ErrorCode::InvalidFormat);
    }
}
