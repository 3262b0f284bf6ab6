use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use serde::Serialize;
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub id_number: String,
    pub phone: String,
    pub dl_number: String,
    /// `YYYY-MM-DD` or RFC 3339
    pub dl_expire_date: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest { pub id_number: String, pub password: String }

#[derive(ToSchema)]
pub struct DisputeRequestDoc {
    /// Must be `Disputed` when present
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayFineRequestDoc {
    /// One of `Credit Card`, `Debit Card`, `Bank Transfer`, `Cash`, `Mobile Money`
    pub payment_method: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::fines::list,
        crate::routes::fines::outstanding,
        crate::routes::fines::get,
        crate::routes::fines::dispute,
        crate::routes::licenses::get,
        crate::routes::licenses::status,
        crate::routes::licenses::renewal_request,
        crate::routes::payments::history,
        crate::routes::payments::pay_fine,
        crate::routes::payments::receipt,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            DisputeRequestDoc,
            PayFineRequestDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "fines"),
        (name = "licenses"),
        (name = "payments")
    )
)]
pub struct ApiDoc;
