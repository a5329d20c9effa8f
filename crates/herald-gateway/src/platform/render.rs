//! Message rendering
//!
//! Plain text is built by small pure functions so it can be tested without
//! a gateway; the builders below only assemble serenity payloads from it.

use serenity::all::{
    ButtonStyle, CommandOptionType, CreateActionRow, CreateButton, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateInputText, CreateModal, InputTextStyle,
};

use herald_core::{GiveawayOutcome, Snowflake, DEFAULT_DURATION_MINUTES, DEFAULT_WINNER_COUNT};
use herald_service::dto::StatsResponse;

use crate::events::ids::{
    COMMAND_GIVEAWAY, COMMAND_HELP, COMMAND_INVITES, FIELD_DESCRIPTION, FIELD_DURATION,
    FIELD_PRIZE, FIELD_WINNERS, GIVEAWAY_MODAL, JOIN_BUTTON, OPTION_USER,
};

/// Colour of a finished giveaway
pub const ENDED_COLOR: u32 = 0xFF_0000;

// Discord payload limits, in characters
pub const TITLE_LIMIT: usize = 256;
pub const DESCRIPTION_LIMIT: usize = 4096;
pub const MESSAGE_LIMIT: usize = 2000;

/// Reply to interactions that arrive outside the served guild
pub const OUTSIDE_GUILD_NOTICE: &str = "❌ This can only be used in the server.";

const WINNERS_HEADER: &str = "**Winners:**\n";
/// Room kept for the "+N more" line
const MORE_LINE_RESERVE: usize = 32;

pub fn mention(user_id: Snowflake) -> String {
    format!("<@{user_id}>")
}

/// Announcement body of a running giveaway
pub fn giveaway_body(
    description: &str,
    winner_count: i32,
    participant_count: usize,
    end_time_unix: i64,
) -> String {
    format!(
        "{description}\n\n**Winners:** {winner_count}\n**Participants:** {participant_count}\n**Ends:** <t:{end_time_unix}:R>"
    )
}

pub fn ended_title(prize: &str) -> String {
    truncate(format!("🎉 Giveaway ended: {prize}"), TITLE_LIMIT)
}

/// Announcement body once a giveaway is over
///
/// Winners that do not fit into one embed description are summarised as
/// a trailing "+N more" line.
pub fn ended_body(winners: &[Snowflake]) -> String {
    if winners.is_empty() {
        return "**Winners:**\nNo participants".to_string();
    }

    let room = DESCRIPTION_LIMIT - WINNERS_HEADER.len();
    let all = mention_chunks(winners, "\n", room);
    if let [list] = all.as_slice() {
        return format!("{WINNERS_HEADER}{list}");
    }

    let shown = mention_chunks(winners, "\n", room - MORE_LINE_RESERVE)
        .into_iter()
        .next()
        .unwrap_or_default();
    let hidden = winners.len() - shown.lines().count();
    format!("{WINNERS_HEADER}{shown}\n+{hidden} more")
}

/// Channel messages congratulating the winners; empty without winners
///
/// Large winner lists are spread over several messages so each one stays
/// within the message length limit.
pub fn congratulations(outcome: &GiveawayOutcome) -> Vec<String> {
    let prize = truncate(outcome.prize.clone(), TITLE_LIMIT);
    let message = |names: &str| format!("🎉 Congratulations {names} on winning **{prize}**!");
    let room = MESSAGE_LIMIT.saturating_sub(char_len(&message("")));

    mention_chunks(&outcome.winners, ", ", room)
        .iter()
        .map(|names| message(names.as_str()))
        .collect()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` to `limit` characters, ending with an ellipsis when shortened
fn truncate(text: String, limit: usize) -> String {
    if char_len(&text) <= limit {
        return text;
    }
    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Join mentions with `separator` into chunks of at most `room` characters
///
/// A chunk always holds at least one mention.
fn mention_chunks(winners: &[Snowflake], separator: &str, room: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for id in winners {
        let name = mention(*id);
        if !current.is_empty() && char_len(&current) + separator.len() + name.len() > room {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str(separator);
        }
        current.push_str(&name);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

pub fn help_text() -> String {
    [
        format!("`/{COMMAND_INVITES} [user]` shows invite statistics (yours by default)"),
        format!("`/{COMMAND_GIVEAWAY}` creates a giveaway (owner role only)"),
        format!("`/{COMMAND_HELP}` shows this list"),
    ]
    .join("\n")
}

pub fn stats_embed(stats: &StatsResponse, username: &str, color: u32) -> CreateEmbed {
    CreateEmbed::new()
        .colour(color)
        .title(format!("📊 Stats: {username}"))
        .field("Net", format!("**{}**", stats.net), true)
        .field("Joins", stats.joins.to_string(), true)
        .field("Leaves", stats.leaves.to_string(), true)
        .field("Fakes (90d)", stats.fakes.to_string(), true)
}

pub fn help_embed(color: u32) -> CreateEmbed {
    CreateEmbed::new()
        .colour(color)
        .title("📖 Commands")
        .description(help_text())
}

pub fn giveaway_embed(
    prize: &str,
    description: &str,
    winner_count: i32,
    participant_count: usize,
    end_time_unix: i64,
    color: u32,
) -> CreateEmbed {
    CreateEmbed::new().colour(color).title(prize).description(giveaway_body(
        description,
        winner_count,
        participant_count,
        end_time_unix,
    ))
}

pub fn ended_embed(outcome: &GiveawayOutcome) -> CreateEmbed {
    CreateEmbed::new()
        .colour(ENDED_COLOR)
        .title(ended_title(&outcome.prize))
        .description(ended_body(&outcome.winners))
}

pub fn join_row() -> CreateActionRow {
    CreateActionRow::Buttons(vec![CreateButton::new(JOIN_BUTTON)
        .label("Participate")
        .style(ButtonStyle::Primary)])
}

pub fn giveaway_modal() -> CreateModal {
    let input = |style, label: &str, id: &str| CreateInputText::new(style, label, id);

    CreateModal::new(GIVEAWAY_MODAL, "Create giveaway").components(vec![
        CreateActionRow::InputText(input(InputTextStyle::Short, "Prize", FIELD_PRIZE).required(true)),
        CreateActionRow::InputText(
            input(InputTextStyle::Paragraph, "Description", FIELD_DESCRIPTION).required(true),
        ),
        CreateActionRow::InputText(
            input(InputTextStyle::Short, "Duration (min)", FIELD_DURATION)
                .value(DEFAULT_DURATION_MINUTES.to_string())
                .required(false),
        ),
        CreateActionRow::InputText(
            input(InputTextStyle::Short, "Winners", FIELD_WINNERS)
                .value(DEFAULT_WINNER_COUNT.to_string())
                .required(false),
        ),
    ])
}

/// Guild slash commands
pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(COMMAND_INVITES)
            .description("📊 Invite statistics")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, OPTION_USER, "Member")
                    .required(false),
            ),
        CreateCommand::new(COMMAND_GIVEAWAY).description("🎉 Create a giveaway"),
        CreateCommand::new(COMMAND_HELP).description("📖 Bot commands"),
    ]
}
