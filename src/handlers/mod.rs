pub mod endpoint;
pub mod generate;
pub mod mock;
pub mod sync;

pub use endpoint::{delete_endpoint, get_endpoint, update_endpoint, MessageResponse};
pub use generate::{create_endpoint, list_endpoints, EndpointListResponse, EndpointResponse};
pub use mock::dispatch_mock;
pub use sync::{clear_endpoints, sync_endpoints, SyncResponse};
