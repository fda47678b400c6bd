//! Documentation-only schemas. Decimals travel as strings, timestamps as RFC 3339.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub description: String,
    pub quantity: i32,
    #[schema(example = "45.50")]
    pub unit_price: String,
    #[schema(example = "91.00")]
    pub total_price: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInputDoc {
    pub make: String,
    pub model: String,
    pub description: Option<String>,
    pub quantity: i32,
    /// Also accepted as `quotedUnitPrice`.
    #[schema(example = "45.50")]
    pub unit_price: String,
    pub country: Option<String>,
    pub gas: Option<String>,
    pub scope: Option<String>,
    pub ex_work_cost: Option<String>,
    /// Also accepted as `uaeVat`.
    pub vat: Option<String>,
    pub fitting: Option<String>,
    /// Also accepted as `trp`.
    pub transport: Option<String>,
    pub cd_vat: Option<String>,
    /// Also accepted as `uC`.
    pub unit_cost: Option<String>,
    /// Also accepted as `tC`.
    pub total_cost: Option<String>,
    /// Also accepted as `levie`.
    pub levy: Option<String>,
    pub sub_total: Option<String>,
    pub difference: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub id: i64,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct NewUserDoc { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct UserUpdateDoc { pub username: String, pub password: Option<String> }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse { pub authenticated: bool, pub user_id: i64, pub username: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::search,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::users::list,
        crate::routes::users::get,
        crate::routes::users::create,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::auth::login,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            ProductInputDoc,
            UserDoc,
            NewUserDoc,
            UserUpdateDoc,
            LoginRequest,
            LoginResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "users"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
