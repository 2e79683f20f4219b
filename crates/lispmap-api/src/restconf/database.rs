// Config datastore reads
//
// The whole mapping database is small enough to fetch in one request;
// the store answers 404 when nothing has been registered yet.

use tracing::debug;

use crate::error::Error;
use crate::restconf::client::RestconfClient;
use crate::restconf::models::{MappingDatabase, MappingDatabaseDocument};

const MAPPING_DATABASE: &str = "odl-mappingservice:mapping-database";

impl RestconfClient {
    /// Fetch every virtual network with its mappings and keys.
    ///
    /// `GET /restconf/config/odl-mappingservice:mapping-database`
    ///
    /// An empty store (HTTP 404 without an error document) is returned as
    /// an empty database rather than an error.
    pub async fn mapping_database(&self) -> Result<MappingDatabase, Error> {
        let url = self.config_url(MAPPING_DATABASE)?;
        match self.get::<MappingDatabaseDocument>(url).await {
            Ok(doc) => {
                debug!(
                    vnis = doc.mapping_database.virtual_networks.len(),
                    "fetched mapping database"
                );
                Ok(doc.mapping_database)
            }
            Err(Error::NotFound { .. }) => {
                debug!("mapping database is empty");
                Ok(MappingDatabase::default())
            }
            Err(e) => Err(e),
        }
    }
}
