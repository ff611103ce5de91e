pub mod errors;
pub mod ledger;

pub use indy_vdr;
pub use revocation_delta;
