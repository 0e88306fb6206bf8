use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use kernel::Listing;
use utoipa::{
    openapi::{self, ContentBuilder, Ref, RefOr, ResponseBuilder},
    ToResponse,
};

/// Successful listing. Never cacheable: the folder content changes upstream
/// independently of this service.
pub struct ListingReply {
    listing: Listing,
}

impl ListingReply {
    #[must_use]
    pub fn new(listing: Listing) -> Self {
        Self { listing }
    }
}

impl IntoResponse for ListingReply {
    fn into_response(self) -> Response {
        let mut res = Json(self.listing).into_response();
        res.headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        res
    }
}

impl ToResponse<'static> for ListingReply {
    fn response() -> (&'static str, RefOr<openapi::Response>) {
        let content = ContentBuilder::new()
            .schema(Some(Ref::from_schema_name("Listing")))
            .build();
        (
            "ListingReply",
            ResponseBuilder::new()
                .description("Folder asset URLs ordered by public id")
                .content("application/json", content)
                .build()
                .into(),
        )
    }
}
