// RESTCONF surface of the mapping service.
//
// `client` owns transport mechanics (URLs, auth, error documents); the
// endpoint groups are inherent methods on `RestconfClient` split across
// `database` (config datastore reads) and `operations` (RPCs).

pub mod client;
pub mod database;
pub mod models;
pub mod operations;
