//! Repository for the `properties` table.

use sqlx::PgPool;
use stayio_core::search::PropertyFilter;
use stayio_core::types::DbId;

use crate::models::property::{CreateProperty, Property};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, price_per_month, security_deposit, \
     application_fee, photo_urls, amenities, highlights, is_pets_allowed, \
     is_parking_included, beds, baths, square_feet, property_type, address, city, \
     state, country, postal_code, latitude, longitude, posted_date, average_rating, \
     number_of_reviews, manager_cognito_id, created_at, updated_at";

/// Provides create and query operations for listings.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a new listing, returning the created row.
    ///
    /// The manager must already exist; otherwise the foreign key rejects the row.
    pub async fn create(pool: &PgPool, input: &CreateProperty) -> Result<Property, sqlx::Error> {
        let d = &input.details;
        let query = format!(
            "INSERT INTO properties (
                name, description, price_per_month, security_deposit, application_fee,
                photo_urls, amenities, highlights, is_pets_allowed, is_parking_included,
                beds, baths, square_feet, property_type, address, city, state, country,
                postal_code, latitude, longitude, manager_cognito_id
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                     $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(&d.name)
            .bind(&d.description)
            .bind(d.price_per_month)
            .bind(d.security_deposit)
            .bind(d.application_fee)
            .bind(&input.photo_urls)
            .bind(&d.amenities)
            .bind(&d.highlights)
            .bind(d.is_pets_allowed)
            .bind(d.is_parking_included)
            .bind(d.beds)
            .bind(d.baths)
            .bind(d.square_feet)
            .bind(&d.property_type)
            .bind(&d.address)
            .bind(&d.city)
            .bind(&d.state)
            .bind(&d.country)
            .bind(&d.postal_code)
            .bind(d.latitude)
            .bind(d.longitude)
            .bind(&input.manager_cognito_id)
            .fetch_one(pool)
            .await
    }

    /// Find a listing by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a manager's listings, most recently posted first.
    pub async fn list_by_manager(
        pool: &PgPool,
        manager_cognito_id: &str,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties
             WHERE manager_cognito_id = $1
             ORDER BY posted_date DESC, id DESC"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(manager_cognito_id)
            .fetch_all(pool)
            .await
    }

    /// Search listings with optional filters and pagination, newest first.
    pub async fn search(
        pool: &PgPool,
        filter: &PropertyFilter,
    ) -> Result<Vec<Property>, sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.location.is_some() {
            conditions.push(format!(
                "(city ILIKE ${bind_idx} ESCAPE '\\' OR state ILIKE ${bind_idx} ESCAPE '\\' \
                 OR country ILIKE ${bind_idx} ESCAPE '\\' OR address ILIKE ${bind_idx} ESCAPE '\\')"
            ));
            bind_idx += 1;
        }
        if filter.price_min.is_some() {
            conditions.push(format!("price_per_month >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.price_max.is_some() {
            conditions.push(format!("price_per_month <= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.beds.is_some() {
            conditions.push(format!("beds >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.baths.is_some() {
            conditions.push(format!("baths >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.property_type.is_some() {
            conditions.push(format!("property_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.square_feet_min.is_some() {
            conditions.push(format!("square_feet >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.square_feet_max.is_some() {
            conditions.push(format!("square_feet <= ${bind_idx}"));
            bind_idx += 1;
        }
        if !filter.amenities.is_empty() {
            conditions.push(format!("amenities @> ${bind_idx}"));
            bind_idx += 1;
        }
        if !filter.favorite_ids.is_empty() {
            conditions.push(format!("id = ANY(${bind_idx})"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM properties \
             {where_clause} \
             ORDER BY posted_date DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Property>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref location) = filter.location {
            q = q.bind(format!("%{}%", escape_like(location)));
        }
        if let Some(price_min) = filter.price_min {
            q = q.bind(price_min);
        }
        if let Some(price_max) = filter.price_max {
            q = q.bind(price_max);
        }
        if let Some(beds) = filter.beds {
            q = q.bind(beds);
        }
        if let Some(baths) = filter.baths {
            q = q.bind(baths);
        }
        if let Some(ref property_type) = filter.property_type {
            q = q.bind(property_type);
        }
        if let Some(min) = filter.square_feet_min {
            q = q.bind(min);
        }
        if let Some(max) = filter.square_feet_max {
            q = q.bind(max);
        }
        if !filter.amenities.is_empty() {
            q = q.bind(&filter.amenities);
        }
        if !filter.favorite_ids.is_empty() {
            q = q.bind(&filter.favorite_ids);
        }

        q = q.bind(filter.limit).bind(filter.offset);
        q.fetch_all(pool).await
    }
}

/// Escape `LIKE` wildcards so user input matches literally (paired with `ESCAPE '\'`).
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
