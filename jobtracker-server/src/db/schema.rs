diesel::table! {
    job_application (id) {
        id -> Int8,
        company_name -> Text,
        role_applied_for -> Text,
        date_applied -> Text,
        status -> Text,
        days_since_update -> Int4,
    }
}
