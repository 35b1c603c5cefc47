use serde::{Deserialize, Serialize};

/// A book listed by a seller, embedded in the seller record.
///
/// `seller_id` is stored as provided; no referential check against the
/// owning seller is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub count_pages: i32,
    pub year: i32,
    pub seller_id: i64,
}

/// Request model for registering a new seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSeller {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub books_for_sale: Vec<Book>,
}

/// Request model for replacing a seller's mutable fields.
///
/// `password` is deliberately absent: updates never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub books_for_sale: Vec<Book>,
}

/// Response model for a seller. `password` is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRead {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub books_for_sale: Vec<Book>,
}

/// Response envelope for the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerList {
    pub sellers: Vec<SellerRead>,
}
