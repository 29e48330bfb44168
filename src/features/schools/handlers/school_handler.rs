use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::schools::dtos::{
    CreateSchoolDto, ListSchoolsQuery, ListSchoolsResponseDto, SchoolResponseDto,
};
use crate::features::schools::services::SchoolService;
use crate::shared::types::ErrorResponse;

/// Add a school
#[utoipa::path(
    post,
    path = "/api/addSchool",
    request_body = CreateSchoolDto,
    responses(
        (status = 201, description = "School created", body = SchoolResponseDto),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "schools"
)]
pub async fn add_school(
    State(service): State<Arc<SchoolService>>,
    AppJson(dto): AppJson<CreateSchoolDto>,
) -> Result<(StatusCode, Json<SchoolResponseDto>)> {
    let school = dto.validate()?;

    let created = service.create(school).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List every school ordered by distance from a reference point
#[utoipa::path(
    get,
    path = "/api/listSchools",
    params(ListSchoolsQuery),
    responses(
        (status = 200, description = "Schools nearest first", body = ListSchoolsResponseDto),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "schools"
)]
pub async fn list_schools(
    State(service): State<Arc<SchoolService>>,
    AppQuery(query): AppQuery<ListSchoolsQuery>,
) -> Result<Json<ListSchoolsResponseDto>> {
    let origin = query.validate()?;

    let ranked = service.list_by_distance(origin).await?;
    Ok(Json(ranked.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use fake::faker::address::en::StreetName;
    use fake::faker::company::en::CompanyName;
    use fake::Fake;
    use serde_json::{json, Value};

    use crate::features::schools::SchoolRepository;
    use crate::shared::test_helpers::{
        school_at, test_server, FailingSchoolRepository, InMemorySchoolRepository,
    };

    #[tokio::test]
    async fn test_add_school_returns_created_record() {
        let server = test_server(Arc::new(InMemorySchoolRepository::default()));

        let response = server
            .post("/api/addSchool")
            .json(&json!({
                "name": "  Lincoln High ",
                "address": "1 Main St",
                "latitude": 40.0,
                "longitude": -75.0
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "id": 1,
                "name": "Lincoln High",
                "address": "1 Main St",
                "latitude": 40.0,
                "longitude": -75.0
            })
        );
    }

    #[tokio::test]
    async fn test_add_school_assigns_fresh_positive_ids() {
        let server = test_server(Arc::new(InMemorySchoolRepository::default()));
        let mut seen = Vec::new();

        for _ in 0..10 {
            let name: String = CompanyName().fake();
            let street: String = StreetName().fake();
            let response = server
                .post("/api/addSchool")
                .json(&json!({
                    "name": name,
                    "address": format!("12 {}", street),
                    "latitude": (-90.0..90.0).fake::<f64>(),
                    "longitude": (-180.0..180.0).fake::<f64>()
                }))
                .await;

            response.assert_status(StatusCode::CREATED);
            let id = response.json::<Value>()["id"].as_i64().unwrap();
            assert!(id > 0);
            assert!(!seen.contains(&id));
            seen.push(id);
        }
    }

    #[tokio::test]
    async fn test_add_school_rejects_invalid_fields() {
        let server = test_server(Arc::new(InMemorySchoolRepository::default()));

        let cases = [
            (json!({"name": "", "address": "1 Main St", "latitude": 0, "longitude": 0}), "name"),
            (json!({"name": "A", "address": "  ", "latitude": 0, "longitude": 0}), "address"),
            (json!({"name": "A", "address": "B", "latitude": 91, "longitude": 0}), "latitude"),
            (json!({"name": "A", "address": "B", "latitude": 0, "longitude": -180.5}), "longitude"),
            (json!({"name": "A", "address": "B", "latitude": "north", "longitude": 0}), "latitude"),
        ];

        for (body, field) in cases {
            let response = server.post("/api/addSchool").json(&body).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            let body: Value = response.json();
            assert_eq!(body["error"], "Validation failed");
            let details = body["details"].as_array().unwrap();
            assert!(
                details.iter().any(|d| d["field"] == field),
                "expected {} in {:?}",
                field,
                details
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let repository = Arc::new(InMemorySchoolRepository::default());
        let server = test_server(repository.clone());

        server
            .post("/api/addSchool")
            .json(&json!({"name": "A", "address": "B", "latitude": 100, "longitude": 0}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let listing = server
            .get("/api/listSchools")
            .add_query_param("latitude", 0)
            .add_query_param("longitude", 0)
            .await;
        assert_eq!(listing.json::<Value>()["count"], 0);
    }

    #[tokio::test]
    async fn test_add_school_rejects_overlong_address() {
        let repository = Arc::new(InMemorySchoolRepository::default());
        let server = test_server(repository.clone());

        let response = server
            .post("/api/addSchool")
            .json(&json!({
                "name": "Long Address High",
                "address": "a".repeat(501),
                "latitude": 10,
                "longitude": 20
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(
            body["details"],
            json!([{"field": "address", "msg": "address must be at most 500 characters"}])
        );
        assert!(repository.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_school_accepts_address_at_limit() {
        let server = test_server(Arc::new(InMemorySchoolRepository::default()));

        server
            .post("/api/addSchool")
            .json(&json!({
                "name": "Long Address High",
                "address": "a".repeat(500),
                "latitude": 10,
                "longitude": 20
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_add_school_rejects_whitespace_only_name() {
        let repository = Arc::new(InMemorySchoolRepository::default());
        let server = test_server(repository.clone());

        let response = server
            .post("/api/addSchool")
            .json(&json!({"name": "   ", "address": "1 Main St", "latitude": 10, "longitude": 20}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["details"],
            json!([{"field": "name", "msg": "name is required"}])
        );
        assert!(repository.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_school_malformed_json() {
        let server = test_server(Arc::new(InMemorySchoolRepository::default()));

        let response = server
            .post("/api/addSchool")
            .content_type("application/json")
            .text("{not json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn test_add_school_store_failure_is_500() {
        let server = test_server(Arc::new(FailingSchoolRepository));

        let response = server
            .post("/api/addSchool")
            .json(&json!({"name": "A", "address": "B", "latitude": 1, "longitude": 2}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>()["error"],
            sqlx::Error::PoolTimedOut.to_string()
        );
    }

    #[tokio::test]
    async fn test_round_trip_through_listing() {
        let server = test_server(Arc::new(InMemorySchoolRepository::default()));

        server
            .post("/api/addSchool")
            .json(&json!({
                "name": "Lincoln High",
                "address": "1 Main St",
                "latitude": 40.0,
                "longitude": -75.0
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get("/api/listSchools")
            .add_query_param("latitude", 40.0)
            .add_query_param("longitude", -75.0)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["count"], 1);
        let school = &body["schools"][0];
        assert_eq!(school["name"], "Lincoln High");
        assert_eq!(school["address"], "1 Main St");
        assert_eq!(school["latitude"], 40.0);
        assert_eq!(school["longitude"], -75.0);
        assert_eq!(school["distance_km"], 0.0);
    }

    #[tokio::test]
    async fn test_list_schools_orders_by_distance() {
        let server = test_server(Arc::new(InMemorySchoolRepository::with_schools(vec![
            school_at(1, 0.0, 1.0),
            school_at(2, 0.0, 0.0),
        ])));

        let response = server
            .get("/api/listSchools")
            .add_query_param("latitude", 0)
            .add_query_param("longitude", 0)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["count"], 2);
        assert_eq!(body["schools"][0]["id"], 2);
        assert_eq!(body["schools"][0]["distance_km"], 0.0);
        assert_eq!(body["schools"][1]["id"], 1);
        assert_eq!(body["schools"][1]["distance_km"], 111.195);
    }

    #[tokio::test]
    async fn test_list_schools_is_idempotent() {
        let schools = (1..=15)
            .map(|id| school_at(id, (-90.0..90.0).fake(), (-180.0..180.0).fake()))
            .collect();
        let server = test_server(Arc::new(InMemorySchoolRepository::with_schools(schools)));

        let first: Value = server
            .get("/api/listSchools?latitude=12.5&longitude=-40")
            .await
            .json();
        let second: Value = server
            .get("/api/listSchools?latitude=12.5&longitude=-40")
            .await
            .json();

        assert_eq!(first, second);
        let distances: Vec<f64> = first["schools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["distance_km"].as_f64().unwrap())
            .collect();
        assert_eq!(distances.len(), 15);
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert!(distances.iter().all(|d| *d >= 0.0));
    }

    #[tokio::test]
    async fn test_list_schools_empty_store() {
        let server = test_server(Arc::new(InMemorySchoolRepository::default()));

        let response = server.get("/api/listSchools?latitude=0&longitude=0").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"count": 0, "schools": []}));
    }

    #[tokio::test]
    async fn test_list_schools_missing_latitude() {
        let server = test_server(Arc::new(InMemorySchoolRepository::default()));

        let response = server.get("/api/listSchools?longitude=10").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Validation failed");
        let details = body["details"].as_array().unwrap();
        assert!(details.iter().any(|d| d["field"] == "latitude"));
        assert!(details.iter().all(|d| d["field"] != "longitude"));
    }

    #[tokio::test]
    async fn test_list_schools_out_of_range_longitude() {
        let server = test_server(Arc::new(InMemorySchoolRepository::default()));

        let response = server
            .get("/api/listSchools?latitude=0&longitude=200")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["details"],
            json!([{"field": "longitude", "msg": "longitude must be between -180 and 180"}])
        );
    }

    #[tokio::test]
    async fn test_list_schools_store_failure_is_500() {
        let server = test_server(Arc::new(FailingSchoolRepository));

        let response = server.get("/api/listSchools?latitude=0&longitude=0").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.json::<Value>()["error"].is_string());
    }
}
