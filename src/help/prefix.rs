//! Invocation prefix cleanup.

use regex::Regex;

use super::types::BotIdentity;

/// Replace mentions of the bot itself (`<@id>` or `<@!id>`) in `raw_prefix`
/// with `display_name(identity)`.
///
/// Mentions of anyone else are left as they are.
pub fn resolve_display_prefix(
    raw_prefix: &str,
    identity: &BotIdentity,
    display_name: &dyn Fn(&BotIdentity) -> String,
) -> String {
    if identity.id.is_empty() || !raw_prefix.contains("<@") {
        return raw_prefix.to_string();
    }

    let pattern = format!("<@!?{}>", regex::escape(&identity.id));
    let mention = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            tracing::warn!(%err, "could not build mention pattern");
            return raw_prefix.to_string();
        }
    };

    let name = display_name(identity);
    mention.replace_all(raw_prefix, regex::NoExpand(name.as_str())).into_owned()
}
