pub mod models;
pub mod store;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sqlx::SqlitePool;

use bookstall_http::error::AppError;
use bookstall_kernel::{InitCtx, Migration, Module};

use models::{NewSeller, SellerList, SellerRead, SellerUpdate};

pub(crate) const SELLERS_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS sellers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL,
        books_for_sale TEXT NOT NULL DEFAULT '[]'
    );
"#;

/// Sellers module: CRUD over registered book sellers.
pub struct SellersModule;

impl SellersModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for SellersModule {
    fn name(&self) -> &'static str {
        "sellers"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "sellers module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        Router::new()
            .route("/", post(create_seller).get(list_sellers))
            .route(
                "/{id}",
                get(get_seller).put(update_seller).delete(delete_seller),
            )
            .with_state(ctx.db.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Register a seller",
                        "tags": ["Sellers"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewSeller" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Seller created",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Seller" }
                                    }
                                }
                            },
                            "422": {
                                "description": "Invalid request body",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    },
                    "get": {
                        "summary": "List sellers",
                        "tags": ["Sellers"],
                        "responses": {
                            "200": {
                                "description": "All sellers",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "sellers": {
                                                    "type": "array",
                                                    "items": { "$ref": "#/components/schemas/Seller" }
                                                }
                                            },
                                            "required": ["sellers"]
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a seller by id",
                        "tags": ["Sellers"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer", "format": "int64" }
                        }],
                        "responses": {
                            "200": {
                                "description": "The seller",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Seller" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Seller not found",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Replace a seller's mutable fields",
                        "tags": ["Sellers"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer", "format": "int64" }
                        }],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/SellerUpdate" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated seller",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Seller" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Seller not found",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a seller",
                        "tags": ["Sellers"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer", "format": "int64" }
                        }],
                        "responses": {
                            "204": {
                                "description": "Deleted (or already absent)"
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "count_pages": { "type": "integer" },
                            "year": { "type": "integer" },
                            "seller_id": { "type": "integer", "format": "int64" }
                        },
                        "required": ["id", "title", "author", "count_pages", "year", "seller_id"]
                    },
                    "Seller": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "first_name": { "type": "string" },
                            "last_name": { "type": "string" },
                            "email": { "type": "string", "format": "email" },
                            "books_for_sale": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["id", "first_name", "last_name", "email", "books_for_sale"]
                    },
                    "NewSeller": {
                        "type": "object",
                        "properties": {
                            "first_name": { "type": "string" },
                            "last_name": { "type": "string" },
                            "email": { "type": "string", "format": "email" },
                            "password": { "type": "string" },
                            "books_for_sale": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["first_name", "last_name", "email", "password", "books_for_sale"]
                    },
                    "SellerUpdate": {
                        "type": "object",
                        "properties": {
                            "first_name": { "type": "string" },
                            "last_name": { "type": "string" },
                            "email": { "type": "string", "format": "email" },
                            "books_for_sale": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["first_name", "last_name", "email", "books_for_sale"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: SELLERS_TABLE_SQL,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "sellers module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "sellers module stopped");
        Ok(())
    }
}

/// Register a seller. The response never includes the password.
async fn create_seller(
    State(pool): State<SqlitePool>,
    Json(payload): Json<NewSeller>,
) -> Result<(StatusCode, Json<SellerRead>), AppError> {
    let record = store::insert(&pool, &payload).await?;

    tracing::info!(seller_id = record.id, "seller created");

    Ok((StatusCode::CREATED, Json(record.into_read()?)))
}

/// List all sellers, wrapped in a `sellers` envelope.
async fn list_sellers(State(pool): State<SqlitePool>) -> Result<Json<SellerList>, AppError> {
    let sellers = store::list_all(&pool)
        .await?
        .into_iter()
        .map(|record| record.into_read())
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Json(SellerList { sellers }))
}

/// Fetch one seller by id; 404 when absent.
async fn get_seller(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<SellerRead>, AppError> {
    match store::find(&pool, id).await? {
        Some(record) => Ok(Json(record.into_read()?)),
        None => Err(AppError::not_found(format!("seller {id} not found"))),
    }
}

/// Replace a seller's mutable fields; the password is never touched.
async fn update_seller(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(new_data): Json<SellerUpdate>,
) -> Result<Json<SellerRead>, AppError> {
    match store::update(&pool, id, &new_data).await? {
        Some(record) => Ok(Json(record.into_read()?)),
        None => Err(AppError::not_found(format!("seller {id} not found"))),
    }
}

/// Delete a seller. Missing ids are treated as already deleted.
async fn delete_seller(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    store::delete(&pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the sellers module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(SellersModule::new())
}
