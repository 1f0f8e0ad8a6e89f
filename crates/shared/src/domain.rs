use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(GenreId);

/// Number of distinct genres with at least one sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalGenreCount {
    #[serde(rename = "total-genre-sold")]
    pub total_genre_sold: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSale {
    pub genre: String,
    /// Backend-defined date text, usually `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "date-sold")]
    pub date_sold: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreSalesSummary {
    pub genre: String,
    #[serde(rename = "sales-count")]
    pub sales_count: u64,
    #[serde(rename = "last-sale-date")]
    pub last_sale_date: String,
    #[serde(rename = "last-track-sold")]
    pub last_track_sold: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsoldGenre {
    #[serde(rename = "GenreId")]
    pub genre_id: GenreId,
    #[serde(rename = "Name")]
    pub name: String,
}
