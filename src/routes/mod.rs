mod common;
mod invoice;

pub use common::{common_routes, common_routes_with_ready};
pub use invoice::invoice_routes;
