use crate::manifest::Manifest;
use crate::normalize::{parse_item_id, to_meta};
use crate::query::GameQuery;
use crate::source::GameSource;
use crate::types::{ContentType, Meta};
use crate::{CatalogError, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};

/// What a catalog request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    /// Popular recent releases.
    Recent,
    /// Free-text search.
    Search(String),
}

impl CatalogRequest {
    /// Build from the optional `search` extra. Blank search text browses instead.
    pub fn from_search(search: Option<&str>) -> Self {
        match search.map(str::trim) {
            Some(text) if !text.is_empty() => CatalogRequest::Search(text.to_string()),
            _ => CatalogRequest::Recent,
        }
    }

    pub fn to_query(&self, now: DateTime<Utc>) -> GameQuery {
        match self {
            CatalogRequest::Recent => GameQuery::recent_releases(now),
            CatalogRequest::Search(text) => GameQuery::catalog_search(text),
        }
    }
}

/// The catalog and meta handlers, bound to one upstream source.
///
/// No state survives a call: every response is built from a fresh upstream
/// query, so one `Addon` can serve concurrent requests behind an `Arc`.
pub struct Addon<S> {
    source: S,
    manifest: Manifest,
}

impl<S: GameSource> Addon<S> {
    pub fn new(source: S, manifest: Manifest) -> Self {
        Self { source, manifest }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Catalog listing or search.
    ///
    /// Unknown catalogs and empty upstream results yield an empty list.
    /// Upstream failures are returned as errors.
    pub async fn catalog(&self, kind: &str, catalog_id: &str, request: CatalogRequest) -> Result<Vec<Meta>> {
        self.catalog_at(kind, catalog_id, request, Utc::now()).await
    }

    /// [`Addon::catalog`] with an explicit clock for the release window.
    pub async fn catalog_at(
        &self,
        kind: &str,
        catalog_id: &str,
        request: CatalogRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<Meta>> {
        let served = ContentType::parse(kind)
            .map(|k| self.manifest.has_catalog(k, catalog_id))
            .unwrap_or(false);
        if !served {
            debug!("Ignoring catalog request for {}/{}", kind, catalog_id);
            return Ok(Vec::new());
        }

        let query = request.to_query(now);
        let records = self.source.games(&query).await.map_err(|e| {
            warn!("{} catalog query failed: {}", self.source.name(), e);
            e
        })?;

        debug!("{} returned {} catalog records", self.source.name(), records.len());
        let metas: Vec<Meta> = records.iter().filter_map(to_meta).collect();
        if metas.len() < records.len() {
            warn!(
                "Skipped {} {} catalog records without an id",
                records.len() - metas.len(),
                self.source.name()
            );
        }
        Ok(metas)
    }

    /// Full meta item for an `igdb-<id>` identifier.
    pub async fn meta(&self, kind: &str, id: &str) -> Result<Meta> {
        if ContentType::parse(kind).is_none() {
            return Err(CatalogError::UnsupportedType(kind.to_string()));
        }

        let game_id = parse_item_id(id).ok_or_else(|| CatalogError::InvalidId(id.to_string()))?;
        let records = self.source.games(&GameQuery::by_id(game_id)).await.map_err(|e| {
            warn!("{} meta query for {} failed: {}", self.source.name(), id, e);
            e
        })?;

        records
            .first()
            .and_then(to_meta)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_search() {
        assert_eq!(CatalogRequest::from_search(None), CatalogRequest::Recent);
        assert_eq!(CatalogRequest::from_search(Some("  ")), CatalogRequest::Recent);
        assert_eq!(
            CatalogRequest::from_search(Some(" zelda ")),
            CatalogRequest::Search("zelda".to_string())
        );
    }
}
