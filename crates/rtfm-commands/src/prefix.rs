//! Dynamic command prefix resolution.
//!
//! Messages may start with any casing of `rtfm*`, `rm*` or `r*`. The prefix
//! handed to the command parser is the exact text the user typed, so
//! `RTFM* ping` is parsed with prefix `RTFM*` rather than the canonical form.
//! Mentioning the bot always works as well.

use crate::framework::{Data, Error};
use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use poise::serenity_prelude as serenity;
use regex::Regex;

/// Base prefixes, tried in this order.
pub const BASE_PREFIXES: [&str; 3] = ["rtfm*", "rm*", "r*"];

static PREFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives = BASE_PREFIXES
        .iter()
        .map(|prefix| regex::escape(prefix))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)^({alternatives})")).expect("prefix pattern is a valid regex")
});

/// Returns the leading prefix of `content` exactly as typed, if any.
pub fn matched_prefix(content: &str) -> Option<&str> {
    PREFIX_PATTERN
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Mention forms that invoke the bot, with the trailing space the parser expects.
pub fn mention_prefixes(bot_id: serenity::UserId) -> [String; 2] {
    [format!("<@{bot_id}> "), format!("<@!{bot_id}> ")]
}

/// Every prefix accepted for a message: the mention forms followed by the
/// matched prefix when there is one.
pub fn accepted_prefixes(content: &str, bot_id: Option<serenity::UserId>) -> Vec<String> {
    let mut prefixes: Vec<String> = bot_id
        .map(|id| mention_prefixes(id).to_vec())
        .unwrap_or_default();
    if let Some(prefix) = matched_prefix(content) {
        prefixes.push(prefix.to_string());
    }
    prefixes
}

/// Splits `content` at the first of its [`accepted_prefixes`] it starts with.
pub fn resolve_prefix(content: &str, bot_id: Option<serenity::UserId>) -> Option<(&str, &str)> {
    accepted_prefixes(content, bot_id)
        .iter()
        .find(|prefix| content.starts_with(prefix.as_str()))
        .map(|prefix| content.split_at(prefix.len()))
}

/// Hook for `PrefixFrameworkOptions::stripped_dynamic_prefix`.
pub fn strip_dynamic_prefix<'a>(
    ctx: &'a serenity::Context,
    msg: &'a serenity::Message,
    _data: &'a Data,
) -> BoxFuture<'a, Result<Option<(&'a str, &'a str)>, Error>> {
    Box::pin(async move {
        let bot_id = ctx.cache.current_user().id;
        Ok(resolve_prefix(&msg.content, Some(bot_id)))
    })
}
