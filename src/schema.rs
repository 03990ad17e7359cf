diesel::table! {
    orders (id) {
        id -> Text,
        product_id -> Text,
        quantity -> Int4,
        status -> Text,
        created_at -> Timestamp,
    }
}
