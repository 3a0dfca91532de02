use crate::templates::IndexTemplate;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page HTML", body = String, content_type = "text/html")
    ),
    tag = "Pages"
)]
pub async fn root() -> IndexTemplate {
    IndexTemplate
}
