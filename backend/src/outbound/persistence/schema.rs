//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Named collections of users.
    groups (id) {
        id -> Int4,
        /// Unique (`groups_name_key`).
        name -> Varchar,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        /// Unique (`users_name_key`).
        name -> Varchar,
        /// Unique (`users_email_key`).
        email -> Varchar,
        password -> Varchar,
        /// References `groups.id`, `ON DELETE RESTRICT` (`users_group_id_fkey`).
        group_id -> Int4,
    }
}

diesel::joinable!(users -> groups (group_id));
diesel::allow_tables_to_appear_in_same_query!(groups, users);
