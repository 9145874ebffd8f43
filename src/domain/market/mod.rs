pub mod asset;
pub mod risk_band;
pub mod sector;
pub mod session;

pub use asset::{
    AssetInsights, AssetSnapshot, Market, RawAssetFields, Signal, Trend, VolumeProfile,
};
pub use risk_band::RiskBand;
pub use sector::Sector;
pub use session::{SessionActivityMode, SessionSchedule, SessionStatus, SessionWindow};
