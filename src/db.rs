use std::str::FromStr;

use anyhow::Context;
use derive_builder::Builder;
use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::data::{Dish, Restaurant};

/// Open the shared storage handle. The database is opened read-only and is
/// never created, so a wrong path fails here instead of on the first request.
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("invalid database url {url}"))?
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("fail to open database {url}"))?;
    Ok(pool)
}

/// Read an id the way a lenient integer parser does: skip leading
/// whitespace, accept a sign and a `0x` prefix, then take the leading digits
/// (`"12abc"` is 12, `"0x1A"` is 26).
///
/// `None` binds as `NULL`, which never matches a row. A digit run that does
/// not fit in an `i64` is also `None`, since no row id can be that large.
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    i64::from_str_radix(&digits[..end], radix)
        .ok()
        .map(|n| sign * n)
}

fn display_id(id: Option<i64>) -> String {
    id.map_or_else(|| "NaN".to_string(), |id| id.to_string())
}

fn display_flag(flag: &Option<String>) -> &str {
    flag.as_deref().unwrap_or("")
}

/// Flag values for the restaurant filter. Each value is compared verbatim
/// against the stored column; a missing value matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantFilter {
    #[builder(setter(into, strip_option), default)]
    pub is_veg: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub has_outdoor_seating: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub is_luxury: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DishFilter {
    #[serde(rename = "isVeg")]
    pub is_veg: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantSearchProps {
    All,
    Id(Option<i64>),
    Cuisine(String),
    Filter(RestaurantFilter),
    SortByRating,
}

impl RestaurantSearchProps {
    /// Message returned to the client when the search matched no row.
    pub fn not_found_message(&self) -> String {
        match self {
            Self::All | Self::SortByRating => "No restaurants found in DB".to_string(),
            Self::Id(id) => format!("No restaurants found in DB by id: {}", display_id(*id)),
            Self::Cuisine(cuisine) => format!("No restaurants found in DB by cuisine: {cuisine}"),
            Self::Filter(filter) => format!(
                "No restaurants found in DB for Filter: isVeg={}, hasOutdoorSeating={}, isLuxury={}",
                display_flag(&filter.is_veg),
                display_flag(&filter.has_outdoor_seating),
                display_flag(&filter.is_luxury),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DishSearchProps {
    All,
    Id(Option<i64>),
    VegFlag(Option<String>),
    SortByPrice,
}

impl DishSearchProps {
    pub fn not_found_message(&self) -> String {
        match self {
            Self::All | Self::SortByPrice => "No dishes found in DB".to_string(),
            Self::Id(id) => format!("No dishes found in DB by id: {}", display_id(*id)),
            Self::VegFlag(flag) => format!("No dishes found in DB by isVeg: {}", display_flag(flag)),
        }
    }
}

pub async fn get_restaurant(
    db_conn: &SqlitePool,
    props: &RestaurantSearchProps,
) -> sqlx::Result<Vec<Restaurant>> {
    tracing::debug!(?props, "searching restaurants");

    let query = match props {
        RestaurantSearchProps::All => {
            sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants")
        }
        RestaurantSearchProps::Id(id) => {
            sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = ?").bind(*id)
        }
        RestaurantSearchProps::Cuisine(cuisine) => {
            sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE cuisine = ?")
                .bind(cuisine.as_str())
        }
        RestaurantSearchProps::Filter(filter) => sqlx::query_as::<_, Restaurant>(
            r#"
SELECT * FROM restaurants
WHERE isVeg = ? AND hasOutdoorSeating = ? AND isLuxury = ?"#,
        )
        .bind(filter.is_veg.as_deref())
        .bind(filter.has_outdoor_seating.as_deref())
        .bind(filter.is_luxury.as_deref()),
        RestaurantSearchProps::SortByRating => {
            sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants ORDER BY rating DESC")
        }
    };

    query.fetch_all(db_conn).await
}

pub async fn get_dish(db_conn: &SqlitePool, props: &DishSearchProps) -> sqlx::Result<Vec<Dish>> {
    tracing::debug!(?props, "searching dishes");

    let query = match props {
        DishSearchProps::All => sqlx::query_as::<_, Dish>("SELECT * FROM dishes"),
        DishSearchProps::Id(id) => {
            sqlx::query_as::<_, Dish>("SELECT * FROM dishes WHERE id = ?").bind(*id)
        }
        DishSearchProps::VegFlag(flag) => {
            sqlx::query_as::<_, Dish>("SELECT * FROM dishes WHERE isVeg = ?").bind(flag.as_deref())
        }
        DishSearchProps::SortByPrice => {
            sqlx::query_as::<_, Dish>("SELECT * FROM dishes ORDER BY price")
        }
    };

    query.fetch_all(db_conn).await
}
