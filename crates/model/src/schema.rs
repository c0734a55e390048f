diesel::table! {
    profile (id) {
        id -> BigInt,
        handle -> Text,
        description -> Text,
        image_url -> Text,
    }
}

diesel::table! {
    profile_link (id) {
        id -> BigInt,
        profile_id -> BigInt,
        display_order -> BigInt,
        title -> Text,
        url -> Text,
    }
}

diesel::joinable!(profile_link -> profile (profile_id));

diesel::allow_tables_to_appear_in_same_query!(profile, profile_link);
