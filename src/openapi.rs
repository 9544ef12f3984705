use crate::models::{Card, List, NewCard, NewList};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::list_cards,
        crate::routes::get_card,
        crate::routes::create_card,
        crate::routes::delete_card,
        crate::routes::list_lists,
        crate::routes::get_list,
        crate::routes::create_list,
        crate::routes::delete_list,
    ),
    components(schemas(Card, NewCard, List, NewList)),
    modifiers(&BearerScheme),
    tags(
        (name = "cards", description = "Card operations"),
        (name = "lists", description = "List operations"),
    )
)]
pub struct ApiDoc;

struct BearerScheme;

impl Modify for BearerScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
