use anoncreds_ipfs_core::{
    Registration, Resolution, Resolved,
    objects::{ObjectKind, Schema},
};
use anoncreds_ipfs_gateway::ContentStore;

use crate::Registry;

impl<S: ContentStore> Registry<S> {
    pub async fn get_schema(&self, id: &str) -> Resolution<Schema> {
        let schema = self.fetch(ObjectKind::Schema, id).await?;
        Ok(Resolved::new(id.to_string(), schema))
    }

    pub async fn register_schema(&self, schema: Schema) -> Registration<Schema> {
        self.upload(ObjectKind::Schema, schema).await
    }
}
