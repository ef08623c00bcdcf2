use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Collection, Document, StoreError};

/// In-process collection. Documents come back in insertion order.
#[derive(Debug)]
pub struct MemoryCollection<D> {
    documents: RwLock<Vec<D>>,
}

impl<D> MemoryCollection<D> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }
}

impl<D> Default for MemoryCollection<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<D: Document> Collection<D> for MemoryCollection<D> {
    async fn insert(&self, document: D) -> Result<D, StoreError> {
        self.documents.write().await.push(document.clone());
        Ok(document)
    }

    async fn find(&self, filter: &D::Filter) -> Result<Vec<D>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|document| document.matches(filter))
            .cloned()
            .collect())
    }

    async fn find_one_and_update(
        &self,
        filter: &D::Filter,
        update: D::Update,
    ) -> Result<Option<D>, StoreError> {
        let mut documents = self.documents.write().await;
        let Some(slot) = documents.iter_mut().find(|document| document.matches(filter)) else {
            return Ok(None);
        };

        let before = slot.clone();
        let mut after = before.clone();
        after.apply(update)?;
        *slot = after;

        Ok(Some(before))
    }

    async fn find_one_and_delete(&self, filter: &D::Filter) -> Result<Option<D>, StoreError> {
        let mut documents = self.documents.write().await;
        let position = documents
            .iter()
            .position(|document| document.matches(filter));

        Ok(position.map(|index| documents.remove(index)))
    }
}
