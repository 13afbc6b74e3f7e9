use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct PhotoUploadResponse {
    /// Public URLs, in upload order.
    #[schema(example = json!(["http://127.0.0.1:3000/api/photos/1718000000000_front.jpg"]))]
    pub urls: Vec<String>,
}
