use actix_web::{error::QueryPayloadError, web, HttpRequest, HttpResponse};
use foodie_finds::{
    data::{Dish, Restaurant},
    db as db_api,
    db::{DishFilter, DishSearchProps, RestaurantFilter, RestaurantSearchProps},
    error::ApiError,
};

pub(super) struct ApiState {
    db_pool: sqlx::SqlitePool,
}

impl ApiState {
    pub(super) async fn new(addr: &str, max_connections: u32) -> anyhow::Result<Self> {
        let db_pool = db_api::connect(addr, max_connections).await?;
        Ok(Self { db_pool })
    }
}

#[derive(serde::Serialize)]
struct RestaurantsJsonResp {
    restaurants: Vec<Restaurant>,
}

#[derive(serde::Serialize)]
struct DishesJsonResp {
    dishes: Vec<Dish>,
}

type ApiResult = Result<HttpResponse, ApiError>;

async fn search_restaurants(data: &ApiState, props: RestaurantSearchProps) -> ApiResult {
    let rows = db_api::get_restaurant(&data.db_pool, &props).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(props.not_found_message()));
    }
    Ok(HttpResponse::Ok().json(RestaurantsJsonResp { restaurants: rows }))
}

async fn search_dishes(data: &ApiState, props: DishSearchProps) -> ApiResult {
    let rows = db_api::get_dish(&data.db_pool, &props).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(props.not_found_message()));
    }
    Ok(HttpResponse::Ok().json(DishesJsonResp { dishes: rows }))
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidQuery(err.to_string()).into()
}

pub(super) fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .service(restaurants)
        .service(restaurant_by_id)
        .service(restaurants_by_cuisine)
        .service(restaurants_by_filter)
        .service(restaurants_by_rating)
        .service(dishes)
        .service(dish_by_id)
        .service(dishes_by_flag)
        .service(dishes_by_price);
}

#[actix_web::get("/restaurants")]
async fn restaurants(data: web::Data<ApiState>) -> ApiResult {
    search_restaurants(&data, RestaurantSearchProps::All).await
}

#[actix_web::get("/restaurants/details/{id}")]
async fn restaurant_by_id(data: web::Data<ApiState>, path: web::Path<String>) -> ApiResult {
    let id = db_api::parse_id(&path);
    search_restaurants(&data, RestaurantSearchProps::Id(id)).await
}

#[actix_web::get("/restaurants/cuisine/{cuisine}")]
async fn restaurants_by_cuisine(data: web::Data<ApiState>, path: web::Path<String>) -> ApiResult {
    search_restaurants(&data, RestaurantSearchProps::Cuisine(path.into_inner())).await
}

#[actix_web::get("/restaurants/filter")]
async fn restaurants_by_filter(
    data: web::Data<ApiState>,
    query: web::Query<RestaurantFilter>,
) -> ApiResult {
    search_restaurants(&data, RestaurantSearchProps::Filter(query.into_inner())).await
}

#[actix_web::get("/restaurants/sort-by-rating")]
async fn restaurants_by_rating(data: web::Data<ApiState>) -> ApiResult {
    search_restaurants(&data, RestaurantSearchProps::SortByRating).await
}

#[actix_web::get("/dishes")]
async fn dishes(data: web::Data<ApiState>) -> ApiResult {
    search_dishes(&data, DishSearchProps::All).await
}

#[actix_web::get("/dishes/details/{id}")]
async fn dish_by_id(data: web::Data<ApiState>, path: web::Path<String>) -> ApiResult {
    let id = db_api::parse_id(&path);
    search_dishes(&data, DishSearchProps::Id(id)).await
}

#[actix_web::get("/dishes/filter")]
async fn dishes_by_flag(data: web::Data<ApiState>, query: web::Query<DishFilter>) -> ApiResult {
    search_dishes(&data, DishSearchProps::VegFlag(query.into_inner().is_veg)).await
}

#[actix_web::get("/dishes/sort-by-price")]
async fn dishes_by_price(data: web::Data<ApiState>) -> ApiResult {
    search_dishes(&data, DishSearchProps::SortByPrice).await
}
