mod convert;
mod error;
mod ingest;
pub mod normalize;
pub mod ship_type;
mod vessel;

pub use convert::to_udl_ais;
pub use error::AisError;
pub use ingest::AisIngest;
pub use vessel::{
    CurrentVoyage, Dimensions, GeoPoint, LastPositionUpdate, MatchedPort, Port, StaticData,
    VesselData,
};
