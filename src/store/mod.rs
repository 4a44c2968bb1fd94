pub mod query;

use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::results::{DeleteResult, UpdateResult};
use mongodb::{Client, Collection, Database, IndexModel};
use thiserror::Error;

use crate::config::DatabaseConfig;
use query::ToyQuery;

pub use query::{ListParams, SortOrder};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Read-only content collections served as plain lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Banners,
    Features,
    HowItWorks,
    Gallery,
    Testimonials,
    Blogs,
}

impl ContentKind {
    pub fn collection_name(&self) -> &'static str {
        match self {
            ContentKind::Banners => "banner-contents",
            ContentKind::Features => "features",
            ContentKind::HowItWorks => "hiw-contents",
            ContentKind::Gallery => "gallery",
            ContentKind::Testimonials => "testimonials",
            ContentKind::Blogs => "blogs",
        }
    }
}

/// Handle to the document store. Constructed once at startup and cloned
/// into handlers; the driver pools connections internally.
#[derive(Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    /// Parse the connection string and select the database. The driver
    /// connects lazily, so this performs no I/O; `ping` or the first
    /// query surfaces connectivity problems.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await?;
        Ok(Self {
            db: client.database(&config.name),
        })
    }

    /// One-time startup step: the text index over the toy name must exist
    /// before the first search query executes. Index creation is
    /// idempotent on the server side.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let model = IndexModel::builder().keys(doc! { "name": "text" }).build();
        self.toys().create_index(model).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    fn toys(&self) -> Collection<Document> {
        self.db.collection("toys")
    }

    fn content(&self, kind: ContentKind) -> Collection<Document> {
        self.db.collection(kind.collection_name())
    }

    // ---- content collections -------------------------------------------

    pub async fn list_content(&self, kind: ContentKind) -> Result<Vec<Document>, StoreError> {
        let docs = self.content(kind).find(doc! {}).await?.try_collect().await?;
        Ok(docs)
    }

    pub async fn blog_by_id(&self, id: &ObjectId) -> Result<Option<Document>, StoreError> {
        let blog = self
            .content(ContentKind::Blogs)
            .find_one(doc! { "_id": *id })
            .await?;
        Ok(blog)
    }

    // ---- toy catalog -----------------------------------------------------

    /// Execute a catalog query: one find for the requested page and an
    /// independent count over the same filter, uninfluenced by pagination.
    pub async fn query_toys(&self, query: &ToyQuery) -> Result<(Vec<Document>, u64), StoreError> {
        let filter = query.filter_doc();
        let toys_collection = self.toys();

        let mut find = toys_collection
            .find(filter.clone())
            .skip(query.skip())
            .limit(query.limit);
        if let Some(sort) = query.sort.sort_doc() {
            find = find.sort(sort);
        }
        let toys: Vec<Document> = find.await?.try_collect().await?;

        let total = toys_collection.count_documents(filter).await?;
        Ok((toys, total))
    }

    pub async fn toys_by_subcategory(&self, sub_category: &str) -> Result<Vec<Document>, StoreError> {
        let toys = self
            .toys()
            .find(doc! { "subCategory": sub_category })
            .await?
            .try_collect()
            .await?;
        Ok(toys)
    }

    pub async fn toy_by_id(&self, id: &ObjectId) -> Result<Option<Document>, StoreError> {
        let toy = self.toys().find_one(doc! { "_id": *id }).await?;
        Ok(toy)
    }

    /// All toys sharing the base toy's subCategory, excluding the base
    /// toy itself.
    pub async fn related_toys(&self, base: &Document) -> Result<Vec<Document>, StoreError> {
        let sub_category = base.get("subCategory").cloned().unwrap_or(Bson::Null);
        let mut filter = doc! { "subCategory": sub_category };
        if let Ok(id) = base.get_object_id("_id") {
            filter.insert("_id", doc! { "$ne": id });
        }

        let toys = self.toys().find(filter).await?.try_collect().await?;
        Ok(toys)
    }

    /// Exact-match listing of one seller's toys with optional price sort,
    /// no pagination.
    pub async fn seller_toys(
        &self,
        email: &str,
        sort: SortOrder,
    ) -> Result<Vec<Document>, StoreError> {
        let toys_collection = self.toys();
        let mut find = toys_collection.find(doc! { "sellerEmail": email });
        if let Some(sort) = sort.sort_doc() {
            find = find.sort(sort);
        }
        let toys = find.await?.try_collect().await?;
        Ok(toys)
    }

    /// Insert a seller-submitted document verbatim and return its new id.
    pub async fn insert_toy(&self, toy: Document) -> Result<Bson, StoreError> {
        let result = self.toys().insert_one(toy).await?;
        Ok(result.inserted_id)
    }

    /// Apply a field patch to a toy, but only when the caller owns it.
    /// A zero matched count means the toy is missing or owned by someone
    /// else; callers disambiguate with `toy_by_id`.
    pub async fn update_owned_toy(
        &self,
        id: &ObjectId,
        owner_email: &str,
        patch: Document,
    ) -> Result<UpdateResult, StoreError> {
        let result = self
            .toys()
            .update_one(
                doc! { "_id": *id, "sellerEmail": owner_email },
                doc! { "$set": patch },
            )
            .await?;
        Ok(result)
    }

    /// Delete a toy the caller owns. Same ownership semantics as
    /// `update_owned_toy`.
    pub async fn delete_owned_toy(
        &self,
        id: &ObjectId,
        owner_email: &str,
    ) -> Result<DeleteResult, StoreError> {
        let result = self
            .toys()
            .delete_one(doc! { "_id": *id, "sellerEmail": owner_email })
            .await?;
        Ok(result)
    }
}
