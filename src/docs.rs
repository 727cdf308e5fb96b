//! OpenAPI document served at `/api-docs/openapi.json` and rendered at `/docs`.

use crate::handlers;
use crate::models::{
    AssessmentResult, BankTransaction, CreditRequest, FeatureVector, TransactionType, UtilityBill,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(title = "Credit Risk Assessment API"),
    paths(handlers::credit_score, handlers::health),
    components(schemas(
        CreditRequest,
        UtilityBill,
        BankTransaction,
        TransactionType,
        FeatureVector,
        AssessmentResult
    )),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the `X-API-Key` header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes_and_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/credit-score"));
        assert!(doc.paths.paths.contains_key("/health"));

        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("CreditRequest"));
        assert!(components.security_schemes.contains_key("api_key"));
    }
}
