use utoipa::{Modify, OpenApi};

use crate::core::config::ApiDocsConfig;
use crate::features::schools::{dtos as schools_dtos, handlers as schools_handlers};
use crate::shared::types::{ErrorResponse, FieldError, StatusResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        schools_handlers::add_school,
        schools_handlers::list_schools,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            FieldError,
            StatusResponse,
            // Schools
            schools_dtos::CreateSchoolDto,
            schools_dtos::SchoolResponseDto,
            schools_dtos::SchoolDistanceDto,
            schools_dtos::ListSchoolsResponseDto,
        )
    ),
    tags(
        (name = "schools", description = "Record schools and list them by distance"),
    ),
    info(
        title = "School API",
        version = "0.1.0",
        description = "Record schools and list them by distance from a point",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct ApiInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl From<&ApiDocsConfig> for ApiInfoModifier {
    fn from(config: &ApiDocsConfig) -> Self {
        Self {
            title: config.title.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
        }
    }
}

impl Modify for ApiInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

/// The OpenAPI document with info taken from config
pub fn api_doc(config: &ApiDocsConfig) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    ApiInfoModifier::from(config).modify(&mut openapi);
    openapi
}
