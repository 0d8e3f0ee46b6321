use crate::query::GameQuery;
use crate::types::GameRecord;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Anything that can answer a `games` query: the live IGDB client in the
/// server, canned records in tests.
#[async_trait]
pub trait GameSource: Send + Sync {
    /// Source name (used in logs).
    fn name(&self) -> &str;

    /// Run one query and return the matching records in upstream order.
    async fn games(&self, query: &GameQuery) -> Result<Vec<GameRecord>>;
}

#[async_trait]
impl<S: GameSource + ?Sized> GameSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn games(&self, query: &GameQuery) -> Result<Vec<GameRecord>> {
        (**self).games(query).await
    }
}
