// Client binding for the Cardskipper membership API

pub mod client;
pub mod criteria;
pub mod environment;
pub mod error;
pub mod records;
pub mod scalar;
pub mod schema;
pub mod transport;
pub mod wire;

// Re-export key types for convenience
pub use client::CardskipperClient;
pub use criteria::MemberSearchCriteria;
pub use environment::Environment;
pub use error::ClientError;
pub use records::{
    InformationType, Member, Organisation, OrganisationChildren, OrganisationUnit, Role,
};
pub use scalar::Scalar;
pub use schema::Schema;
pub use transport::{Credentials, HttpTransport, Transport};
