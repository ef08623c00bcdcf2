use std::marker::PhantomData;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use uuid::Uuid;

use super::{Collection, Document, StoreError};

/// Opens the shared connection and checks the server answers before any route is served.
pub async fn connect(url: &str) -> Result<ConnectionManager, StoreError> {
    let client = Client::open(url)?;
    let mut connection = ConnectionManager::new(client).await?;
    let _: String = redis::cmd("PING").query_async(&mut connection).await?;
    Ok(connection)
}

/// Collection of JSON documents stored under `{collection}:{id}` keys.
#[derive(Clone)]
pub struct RedisCollection<D> {
    connection: ConnectionManager,
    _document: PhantomData<fn() -> D>,
}

impl<D: Document> RedisCollection<D> {
    pub fn new(connection: ConnectionManager) -> Self {
        Self {
            connection,
            _document: PhantomData,
        }
    }

    fn key(id: Uuid) -> String {
        format!("{}:{}", D::COLLECTION, id)
    }

    fn pattern() -> String {
        format!("{}:*", D::COLLECTION)
    }

    async fn load(&self, key: &str) -> Result<Option<D>, StoreError> {
        let mut connection = self.connection.clone();
        let raw: Option<String> = connection.get(key).await?;
        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn save(&self, document: &D) -> Result<(), StoreError> {
        let json = serde_json::to_string(document)?;
        let mut connection = self.connection.clone();
        let _: () = connection.set(Self::key(document.id()), json).await?;
        Ok(())
    }

    async fn candidates(&self, filter: &D::Filter) -> Result<Vec<D>, StoreError> {
        let keys: Vec<String> = match D::pinned_id(filter) {
            Some(id) => vec![Self::key(id)],
            None => {
                let mut connection = self.connection.clone();
                connection.keys(Self::pattern()).await?
            }
        };

        let mut documents = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(document) = self.load(&key).await? {
                if document.matches(filter) {
                    documents.push(document);
                }
            }
        }
        Ok(documents)
    }
}

#[async_trait]
impl<D: Document> Collection<D> for RedisCollection<D> {
    async fn insert(&self, document: D) -> Result<D, StoreError> {
        self.save(&document).await?;
        tracing::debug!(collection = D::COLLECTION, id = %document.id(), "document inserted");
        Ok(document)
    }

    async fn find(&self, filter: &D::Filter) -> Result<Vec<D>, StoreError> {
        self.candidates(filter).await
    }

    async fn find_one_and_update(
        &self,
        filter: &D::Filter,
        update: D::Update,
    ) -> Result<Option<D>, StoreError> {
        let Some(before) = self.candidates(filter).await?.into_iter().next() else {
            return Ok(None);
        };

        let mut after = before.clone();
        after.apply(update)?;
        self.save(&after).await?;

        Ok(Some(before))
    }

    async fn find_one_and_delete(&self, filter: &D::Filter) -> Result<Option<D>, StoreError> {
        let Some(document) = self.candidates(filter).await?.into_iter().next() else {
            return Ok(None);
        };

        let mut connection = self.connection.clone();
        let removed: usize = connection.del(Self::key(document.id())).await?;
        if removed == 0 {
            // Lost a race with another delete.
            return Ok(None);
        }

        Ok(Some(document))
    }
}
