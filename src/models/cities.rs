#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CityRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    /// Free-form JSON, see `city_service::parse_essentials`.
    pub essentials: Option<String>,
}

// Picker/list shape: home page, submit form, back links.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CitySummaryRow {
    pub id: String,
    pub name: String,
    pub slug: String,
}
