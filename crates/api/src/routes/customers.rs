//! Customer route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use clientele_core::CustomerId;

use crate::db::{ListParams, Page};
use crate::error::ApiError;
use crate::middleware::RequireAuth;
use crate::models::{Customer, CustomerPatch, NewCustomer};
use crate::response::ApiResponse;
use crate::routes::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Pagination and search query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// Create request body. Field presence is checked here; field constraints
/// are the service's job.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Update request body: any subset of the four fields.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<UpdateCustomerRequest> for CustomerPatch {
    fn from(body: UpdateCustomerRequest) -> Self {
        Self {
            name: body.name,
            email: body.email,
            phone: body.phone,
            address: body.address,
        }
    }
}

/// `GET /api/customers` - paginated listing with optional search.
pub async fn index(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<ApiResponse<Page<Customer>>>, ApiError> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    if page < 1 || limit < 1 {
        return Err(ApiError::BadRequest(
            "Page and limit must be positive integers".to_string(),
        ));
    }

    let result = state
        .customers()
        .list(&ListParams {
            page,
            limit,
            search: query.search,
        })
        .await?;

    Ok(Json(ApiResponse::with_data(result)))
}

/// `GET /api/customers/{id}` - fetch a single customer.
pub async fn show(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    let customer = state.customers().get(CustomerId::new(id)).await?;
    Ok(Json(ApiResponse::with_data(customer)))
}

/// `POST /api/customers` - create a customer.
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Customer>>), ApiError> {
    let (Some(name), Some(email), Some(phone), Some(address)) = (
        body.name.filter(|s| !s.is_empty()),
        body.email.filter(|s| !s.is_empty()),
        body.phone.filter(|s| !s.is_empty()),
        body.address.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(
            "All fields are required: name, email, phone, address".to_string(),
        ));
    };

    let customer = state
        .customers()
        .create(NewCustomer {
            name,
            email,
            phone,
            address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::with_data(customer))))
}

/// `PUT /api/customers/{id}` - partial update of a customer.
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    let customer = state
        .customers()
        .update(CustomerId::new(id), body.into())
        .await?;

    Ok(Json(ApiResponse::with_data(customer)))
}

/// `DELETE /api/customers/{id}` - delete a customer.
pub async fn remove(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.customers().delete(CustomerId::new(id)).await?;
    Ok(Json(ApiResponse::with_message(
        "Customer deleted successfully",
    )))
}
