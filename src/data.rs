use serde::Serialize;
use sqlx::{
    error::BoxDynError,
    sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef},
    Decode, Type, ValueRef,
};

/// A veg/seating/luxury flag, kept exactly as the table stores it: either
/// text (`"true"`) or an integer (`1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Flag {
    Integer(i64),
    Text(String),
}

impl PartialEq<&str> for Flag {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::Text(text) if text == other)
    }
}

impl PartialEq<i64> for Flag {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Self::Integer(n) if n == other)
    }
}

impl Type<Sqlite> for Flag {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <String as Type<Sqlite>>::compatible(ty) || <i64 as Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for Flag {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let is_integer = <i64 as Type<Sqlite>>::compatible(&value.type_info());
        if is_integer {
            Ok(Self::Integer(<i64 as Decode<Sqlite>>::decode(value)?))
        } else {
            Ok(Self::Text(<String as Decode<Sqlite>>::decode(value)?))
        }
    }
}

/// A rating or price. Integers stay integers in the JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    Integer(i64),
    Real(f64),
}

impl Numeric {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Real(x) => x,
        }
    }
}

impl Type<Sqlite> for Numeric {
    fn type_info() -> SqliteTypeInfo {
        <f64 as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <f64 as Type<Sqlite>>::compatible(ty) || <i64 as Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for Numeric {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let is_integer = <i64 as Type<Sqlite>>::compatible(&value.type_info());
        if is_integer {
            Ok(Self::Integer(<i64 as Decode<Sqlite>>::decode(value)?))
        } else {
            Ok(Self::Real(<f64 as Decode<Sqlite>>::decode(value)?))
        }
    }
}

/// A row of the `restaurants` table, serialized with its column names.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    #[sqlx(rename = "isVeg")]
    #[serde(rename = "isVeg")]
    pub is_veg: Flag,
    #[sqlx(rename = "hasOutdoorSeating")]
    #[serde(rename = "hasOutdoorSeating")]
    pub has_outdoor_seating: Flag,
    #[sqlx(rename = "isLuxury")]
    #[serde(rename = "isLuxury")]
    pub is_luxury: Flag,
    pub rating: Numeric,
}

/// A row of the `dishes` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub price: Numeric,
    #[sqlx(rename = "isVeg")]
    #[serde(rename = "isVeg")]
    pub is_veg: Flag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{sqlite::SqlitePoolOptions, Executor};

    #[tokio::test]
    async fn test_decode_integer_storage() {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db.execute(
            r#"
CREATE TABLE dishes (id INTEGER PRIMARY KEY, name TEXT, price INTEGER, isVeg INTEGER);
INSERT INTO dishes (id, name, price, isVeg) VALUES (1, 'Idli', 60, 1), (2, 'Dosa', 75.5, 'false');"#,
        )
        .await
        .unwrap();

        let dishes = sqlx::query_as::<_, Dish>("SELECT * FROM dishes ORDER BY id")
            .fetch_all(&db)
            .await
            .unwrap();
        assert_eq!(dishes[0].price, Numeric::Integer(60));
        assert_eq!(dishes[0].is_veg, 1_i64);
        assert_eq!(dishes[1].price, Numeric::Real(75.5));
        assert_eq!(dishes[1].is_veg, "false");
    }

    #[test]
    fn test_serialize_as_stored() {
        let dish = Dish {
            id: 1,
            name: "Idli".to_string(),
            price: Numeric::Integer(60),
            is_veg: Flag::Integer(1),
        };
        assert_eq!(
            serde_json::to_value(&dish).unwrap(),
            serde_json::json!({ "id": 1, "name": "Idli", "price": 60, "isVeg": 1 })
        );

        let flag = serde_json::to_value(Flag::Text("true".to_string())).unwrap();
        assert_eq!(flag, serde_json::json!("true"));
        assert_eq!(Numeric::Integer(4).as_f64(), 4.0);
    }
}
