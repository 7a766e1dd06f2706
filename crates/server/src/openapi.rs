use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct VersionResponse { pub version: String }

#[derive(ToSchema)]
pub struct FabricInputDoc {
    pub name: String,
    pub origin: Option<String>,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub on_clearance: Option<bool>,
    pub clearance_price: Option<f64>,
}

/// Absent `images_urls`/`works_urls` leave the list alone; `[]` clears it.
#[derive(ToSchema)]
pub struct FabricUpdateDoc {
    pub name: String,
    pub origin: Option<String>,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub on_clearance: Option<bool>,
    pub clearance_price: Option<f64>,
    pub images_urls: Option<Vec<String>>,
    pub works_urls: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: String,
    pub category_id: i32,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub promo_price: Option<f64>,
}

#[derive(ToSchema)]
pub struct ProductUpdateDoc {
    pub name: String,
    pub category_id: i32,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub promo_price: Option<f64>,
    pub images_urls: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct CategoryInputDoc { pub name: String }

#[derive(ToSchema)]
pub struct OrderItemInputDoc {
    pub product_id: i32,
    pub fabric_id: Option<i32>,
    pub state: Option<String>,
    pub adjustment: Option<f64>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct NewOrderDoc {
    pub customer_name: String,
    pub description: Option<String>,
    pub order_status: Option<String>,
    pub payment_status: Option<String>,
    pub items: Vec<OrderItemInputDoc>,
}

#[derive(ToSchema)]
pub struct OrderUpdateDoc {
    pub customer_name: String,
    pub description: Option<String>,
    pub order_status: Option<String>,
    pub payment_status: Option<String>,
}

/// Either field may carry the URLs; full URLs and bare paths both match.
#[derive(ToSchema)]
pub struct DeleteTargetDoc {
    pub url: Option<String>,
    pub urls: Option<Vec<String>>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Wanshop API"),
    paths(
        crate::routes::health,
        crate::routes::version,
        crate::routes::fabrics::list,
        crate::routes::fabrics::create,
        crate::routes::fabrics::get,
        crate::routes::fabrics::update,
        crate::routes::fabrics::delete,
        crate::routes::fabrics::append_images,
        crate::routes::fabrics::replace_images,
        crate::routes::fabrics::delete_images,
        crate::routes::fabrics::append_works,
        crate::routes::fabrics::replace_works,
        crate::routes::fabrics::delete_works,
        crate::routes::products::list,
        crate::routes::products::create,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::products::append_images,
        crate::routes::products::replace_images,
        crate::routes::products::delete_images,
        crate::routes::categories::list,
        crate::routes::categories::create,
        crate::routes::categories::get,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::orders::list,
        crate::routes::orders::create,
        crate::routes::orders::get,
        crate::routes::orders::update,
        crate::routes::orders::update_item,
        crate::routes::orders::delete,
        crate::routes::public::fabrics,
        crate::routes::public::clearance_fabrics,
        crate::routes::public::categories,
        crate::routes::public::products_by_category,
        crate::routes::uploads::fabric,
        crate::routes::uploads::product,
    ),
    components(
        schemas(
            HealthResponse,
            VersionResponse,
            FabricInputDoc,
            FabricUpdateDoc,
            ProductInputDoc,
            ProductUpdateDoc,
            CategoryInputDoc,
            OrderItemInputDoc,
            NewOrderDoc,
            OrderUpdateDoc,
            DeleteTargetDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "fabrics"),
        (name = "products"),
        (name = "categories"),
        (name = "orders"),
        (name = "public"),
        (name = "uploads")
    )
)]
pub struct ApiDoc;
