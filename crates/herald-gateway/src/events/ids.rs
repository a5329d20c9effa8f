//! Command names and component custom IDs shared by the dispatch table and
//! the platform adapter

pub const COMMAND_INVITES: &str = "invites";
pub const COMMAND_GIVEAWAY: &str = "giveaway";
pub const COMMAND_HELP: &str = "help";

/// `/invites` option naming the member to look up
pub const OPTION_USER: &str = "user";

pub const JOIN_BUTTON: &str = "gw_join";
pub const GIVEAWAY_MODAL: &str = "gw_modal";

pub const FIELD_PRIZE: &str = "gw_prize";
pub const FIELD_DESCRIPTION: &str = "gw_desc";
pub const FIELD_DURATION: &str = "gw_time";
pub const FIELD_WINNERS: &str = "gw_winners";
