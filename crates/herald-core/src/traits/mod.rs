//! Ports - traits implemented by the infrastructure layers

mod platform;
mod repositories;

pub use platform::ChatPlatform;
pub use repositories::{
    ConnectionRepository, GiveawayRepository, InviterStatsRepository, RepoResult,
};
