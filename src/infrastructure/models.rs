use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::orders;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg, diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: String,
    pub product_id: String,
    pub quantity: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: String,
    pub product_id: String,
    pub quantity: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
}
