use mongodb::bson::{doc, Document};
use serde::Deserialize;

use crate::config::ApiConfig;

/// Price ordering requested by the client. Anything other than the two
/// recognized values preserves store-native order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceAscending,
    PriceDescending,
    Unspecified,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("price-ascending") => SortOrder::PriceAscending,
            Some("price-descending") => SortOrder::PriceDescending,
            _ => SortOrder::Unspecified,
        }
    }

    pub fn sort_doc(&self) -> Option<Document> {
        match self {
            SortOrder::PriceAscending => Some(doc! { "price": 1 }),
            SortOrder::PriceDescending => Some(doc! { "price": -1 }),
            SortOrder::Unspecified => None,
        }
    }
}

/// Raw, untrusted query-string parameters for the toy listing. Values are
/// taken as strings so that non-numeric input falls back to defaults
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

/// A validated, executable toy-catalog query: pagination window, price
/// ordering, and optional free-text filter over the toy-name index.
#[derive(Debug, Clone, PartialEq)]
pub struct ToyQuery {
    pub page: i64,
    pub limit: i64,
    pub sort: SortOrder,
    pub search: String,
}

impl ToyQuery {
    /// Coerce untrusted parameters into a valid query. Unparseable or
    /// missing page/limit fall back to defaults; page is clamped to >= 1
    /// and limit to 1..=max_page_size.
    pub fn from_params(params: &ListParams, api: &ApiConfig) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(1)
            .max(1);

        let limit = params
            .limit
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(api.default_page_size)
            .clamp(1, api.max_page_size);

        Self {
            page,
            limit,
            sort: SortOrder::parse(params.sort.as_deref()),
            search: params.search.clone().unwrap_or_default(),
        }
    }

    /// Filter matching the candidate set: a `$text` search over the
    /// toy-name index when a term is present, otherwise all documents.
    /// The same filter drives both the page query and the total count.
    pub fn filter_doc(&self) -> Document {
        if self.search.is_empty() {
            doc! {}
        } else {
            doc! { "$text": { "$search": self.search.as_str() } }
        }
    }

    /// Documents to skip before the requested page. Saturates rather than
    /// overflowing for absurdly large page numbers; both operands are
    /// clamped to >= 1, so the product never goes negative.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit) as u64
    }
}
