//! Ordered URL lists owned by a fabric (images, works) or a product (images).
//!
//! Every list is unique by value and ordered by row id. Three write paths
//! exist: idempotent append, unconditional replace, and reconciliation
//! (replace only when the stored list differs), plus deletion by URL where an
//! absolute URL and its bare path are treated as the same resource.

use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use url::Url;

use models::{fabric, product};
use crate::errors::ServiceError;

/// Which owned list an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    FabricImage,
    FabricWork,
    ProductImage,
}

impl ImageKind {
    /// Entity name of the owner, used in error messages.
    pub fn owner(&self) -> &'static str {
        match self {
            ImageKind::FabricImage | ImageKind::FabricWork => "fabric",
            ImageKind::ProductImage => "product",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            ImageKind::FabricImage => "fabric_images",
            ImageKind::FabricWork => "fabric_works",
            ImageKind::ProductImage => "product_images",
        }
    }
}

// Binds the entity module, its owner column and an owner-id accessor for `$kind`.
macro_rules! with_kind {
    ($kind:expr, |$m:ident, $owner_col:ident, $owner_of:ident| $body:expr) => {
        match $kind {
            ImageKind::FabricImage => {
                use models::fabric_image as $m;
                #[allow(unused_variables)]
                let $owner_col = $m::Column::FabricId;
                #[allow(unused_variables)]
                let $owner_of = |r: &$m::Model| r.fabric_id;
                $body
            }
            ImageKind::FabricWork => {
                use models::fabric_work as $m;
                #[allow(unused_variables)]
                let $owner_col = $m::Column::FabricId;
                #[allow(unused_variables)]
                let $owner_of = |r: &$m::Model| r.fabric_id;
                $body
            }
            ImageKind::ProductImage => {
                use models::product_image as $m;
                #[allow(unused_variables)]
                let $owner_col = $m::Column::ProductId;
                #[allow(unused_variables)]
                let $owner_of = |r: &$m::Model| r.product_id;
                $body
            }
        }
    };
}

/// Stored row as exposed in entity representations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: i32,
    pub url: String,
}

/// Result of an idempotent append.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AppendOutcome {
    pub inserted: usize,
    pub skipped: usize,
}

/// Deletion request body: a single `url`, a `urls` list, or both.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DeleteTarget {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
}

impl DeleteTarget {
    pub fn single(url: impl Into<String>) -> Self {
        Self { url: Some(url.into()), urls: None }
    }

    pub fn many(urls: Vec<String>) -> Self {
        Self { url: None, urls: Some(urls) }
    }

    /// Non-blank candidates in request order.
    pub fn candidates(&self) -> Vec<String> {
        self.url
            .iter()
            .chain(self.urls.iter().flatten())
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Canonical matching key for a URL: the percent-decoded path component of
/// an absolute URL, or the raw string when it does not parse as one.
pub fn normalize_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(u) if u.has_host() => match urlencoding::decode(u.path()) {
            Ok(path) => path.into_owned(),
            Err(_) => u.path().to_string(),
        },
        _ => raw.to_string(),
    }
}

/// Drop repeated values, keeping the first occurrence of each.
pub fn dedup_urls(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.iter().filter(|u| seen.insert(u.as_str())).cloned().collect()
}

fn match_keys(candidates: &[String]) -> HashSet<String> {
    candidates
        .iter()
        .flat_map(|c| [c.clone(), normalize_url(c)])
        .collect()
}

pub(crate) async fn ensure_owner<C: ConnectionTrait>(conn: &C, kind: ImageKind, owner_id: i32) -> Result<(), ServiceError> {
    let exists = match kind {
        ImageKind::FabricImage | ImageKind::FabricWork => fabric::Entity::find_by_id(owner_id).one(conn).await?.is_some(),
        ImageKind::ProductImage => product::Entity::find_by_id(owner_id).one(conn).await?.is_some(),
    };
    if !exists {
        return Err(ServiceError::not_found(kind.owner()));
    }
    Ok(())
}

pub(crate) async fn rows<C: ConnectionTrait>(conn: &C, kind: ImageKind, owner_id: i32) -> Result<Vec<ImageRef>, ServiceError> {
    with_kind!(kind, |m, owner_col, owner_of| {
        let found = m::Entity::find()
            .filter(owner_col.eq(owner_id))
            .order_by_asc(m::Column::Id)
            .all(conn)
            .await?;
        Ok(found.into_iter().map(|r| ImageRef { id: r.id, url: r.url }).collect())
    })
}

/// Lists for many owners in one query, keyed by owner id.
pub(crate) async fn rows_for_owners<C: ConnectionTrait>(
    conn: &C,
    kind: ImageKind,
    owner_ids: &[i32],
) -> Result<HashMap<i32, Vec<ImageRef>>, ServiceError> {
    let mut grouped: HashMap<i32, Vec<ImageRef>> = HashMap::new();
    if owner_ids.is_empty() {
        return Ok(grouped);
    }
    with_kind!(kind, |m, owner_col, owner_of| {
        let found = m::Entity::find()
            .filter(owner_col.is_in(owner_ids.iter().copied()))
            .order_by_asc(m::Column::Id)
            .all(conn)
            .await?;
        for r in found {
            grouped.entry(owner_of(&r)).or_default().push(ImageRef { id: r.id, url: r.url });
        }
    });
    Ok(grouped)
}

async fn insert_urls<C: ConnectionTrait>(conn: &C, kind: ImageKind, owner_id: i32, urls: &[String]) -> Result<(), ServiceError> {
    // One row per statement keeps ids in list order on every backend.
    for url in urls {
        with_kind!(kind, |m, owner_col, owner_of| {
            let mut am = <m::ActiveModel as ActiveModelTrait>::default();
            am.set(owner_col, owner_id.into());
            am.set(m::Column::Url, url.clone().into());
            m::Entity::insert(am).exec(conn).await?;
        });
    }
    Ok(())
}

pub(crate) async fn delete_all<C: ConnectionTrait>(conn: &C, kind: ImageKind, owner_id: i32) -> Result<u64, ServiceError> {
    with_kind!(kind, |m, owner_col, owner_of| {
        let res = m::Entity::delete_many().filter(owner_col.eq(owner_id)).exec(conn).await?;
        Ok(res.rows_affected)
    })
}

async fn delete_ids<C: ConnectionTrait>(conn: &C, kind: ImageKind, ids: Vec<i32>) -> Result<u64, ServiceError> {
    if ids.is_empty() {
        return Ok(0);
    }
    with_kind!(kind, |m, owner_col, owner_of| {
        let res = m::Entity::delete_many().filter(m::Column::Id.is_in(ids)).exec(conn).await?;
        Ok(res.rows_affected)
    })
}

/// Rewrite the stored list to `desired` (de-duplicated) unless it already
/// matches in order. Returns whether anything was rewritten.
pub(crate) async fn reconcile<C: ConnectionTrait>(
    conn: &C,
    kind: ImageKind,
    owner_id: i32,
    desired: &[String],
) -> Result<bool, ServiceError> {
    let current: Vec<String> = rows(conn, kind, owner_id).await?.into_iter().map(|r| r.url).collect();
    if current == desired {
        return Ok(false);
    }
    delete_all(conn, kind, owner_id).await?;
    insert_urls(conn, kind, owner_id, &dedup_urls(desired)).await?;
    Ok(true)
}

/// Stored list for one owner, in display order.
pub async fn list(db: &DatabaseConnection, kind: ImageKind, owner_id: i32) -> Result<Vec<ImageRef>, ServiceError> {
    ensure_owner(db, kind, owner_id).await?;
    rows(db, kind, owner_id).await
}

/// Insert the URLs not already stored; repeats are skipped, not duplicated.
#[instrument(skip(db, urls), fields(table = kind.table(), count = urls.len()))]
pub async fn append(db: &DatabaseConnection, kind: ImageKind, owner_id: i32, urls: &[String]) -> Result<AppendOutcome, ServiceError> {
    let txn = db.begin().await?;
    ensure_owner(&txn, kind, owner_id).await?;
    let mut present: HashSet<String> = rows(&txn, kind, owner_id).await?.into_iter().map(|r| r.url).collect();
    let fresh: Vec<String> = urls.iter().filter(|u| present.insert((*u).clone())).cloned().collect();
    insert_urls(&txn, kind, owner_id, &fresh).await?;
    txn.commit().await?;

    let outcome = AppendOutcome { inserted: fresh.len(), skipped: urls.len() - fresh.len() };
    info!(owner_id, inserted = outcome.inserted, skipped = outcome.skipped, "image_urls_appended");
    Ok(outcome)
}

/// Delete every stored URL and insert `urls` de-duplicated. Returns the new count.
#[instrument(skip(db, urls), fields(table = kind.table(), count = urls.len()))]
pub async fn replace(db: &DatabaseConnection, kind: ImageKind, owner_id: i32, urls: &[String]) -> Result<usize, ServiceError> {
    let txn = db.begin().await?;
    ensure_owner(&txn, kind, owner_id).await?;
    delete_all(&txn, kind, owner_id).await?;
    let unique = dedup_urls(urls);
    insert_urls(&txn, kind, owner_id, &unique).await?;
    txn.commit().await?;

    info!(owner_id, stored = unique.len(), "image_urls_replaced");
    Ok(unique.len())
}

/// Delete stored rows matching any candidate, comparing raw and normalized forms on both sides.
#[instrument(skip(db, target), fields(table = kind.table()))]
pub async fn remove(db: &DatabaseConnection, kind: ImageKind, owner_id: i32, target: &DeleteTarget) -> Result<u64, ServiceError> {
    let candidates = target.candidates();
    if candidates.is_empty() {
        return Err(ServiceError::Validation("url or urls required".into()));
    }
    let keys = match_keys(&candidates);

    let txn = db.begin().await?;
    ensure_owner(&txn, kind, owner_id).await?;
    let doomed: Vec<i32> = rows(&txn, kind, owner_id)
        .await?
        .into_iter()
        .filter(|r| keys.contains(&r.url) || keys.contains(&normalize_url(&r.url)))
        .map(|r| r.id)
        .collect();
    let deleted = delete_ids(&txn, kind, doomed).await?;
    txn.commit().await?;

    info!(owner_id, deleted, "image_urls_deleted");
    Ok(deleted)
}
