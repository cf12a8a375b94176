/// [`Entity`](entity::Entity) values: posts, comments and their replies.
pub mod entity;
/// Paginated user history via [`History`](history::History).
pub mod history;
/// URL extraction from comment and self-post text.
pub mod links;
pub mod listing;
/// A post with its comment tree via [`Thread`](thread::Thread).
pub mod thread;
/// Account information via [`User`](user::User).
pub mod user;

pub(crate) mod account;

/// Text rendering of reply trees.
#[cfg(feature = "display")]
pub mod tree;

/// Width ids are zero-padded to, so that they sort lexically in creation order.
pub const ID_WIDTH: usize = 6;

/// Left-pads `id` with `'0'` up to [`ID_WIDTH`] characters.
///
/// Longer ids are returned unchanged.
///
/// ```
/// assert_eq!(redownr::pad_id("2st9x"), "02st9x");
/// assert_eq!(redownr::pad_id("abcdefg"), "abcdefg");
/// ```
pub fn pad_id(id: &str) -> String {
    format!("{id:0>width$}", width = ID_WIDTH)
}

/// Strips the padding added by [`pad_id`].
///
/// An id made only of zeros unpads to `"0"`.
pub fn unpad_id(id: &str) -> &str {
    let trimmed = id.trim_start_matches('0');
    if trimmed.is_empty() && !id.is_empty() {
        &id[id.len() - 1..]
    } else {
        trimmed
    }
}

/// Drops every non-ASCII character from `text`.
pub(crate) fn asciify(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// `created_utc` arrives as a float (`1350000000.0`); keep whole seconds.
pub(crate) fn de_timestamp<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: f64 = serde::Deserialize::deserialize(d)?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(value as i64)
}

/// Like [`de_timestamp`], but for the vote and karma counters.
pub(crate) fn de_count<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<f64> = serde::Deserialize::deserialize(d)?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(value.map_or(0, |v| v as i64))
}

pub(crate) fn de_ascii<'de, D>(d: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(d)?;
    Ok(value.as_deref().map(asciify).unwrap_or_default())
}

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    pub(crate) use str_opt_ref;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_is_fixed_width_and_reversible() {
        for id in ["1", "zz", "abc", "2st9x", "c0ffee", "a0b"] {
            let padded = pad_id(id);
            assert_eq!(padded.len(), ID_WIDTH);
            assert_eq!(unpad_id(&padded), id);
        }
    }

    #[test]
    fn long_ids_pass_through() {
        assert_eq!(pad_id("abcdefgh"), "abcdefgh");
        assert_eq!(unpad_id("abcdefgh"), "abcdefgh");
    }

    #[test]
    fn all_zero_id_unpads_to_zero() {
        assert_eq!(unpad_id("000000"), "0");
        assert_eq!(unpad_id(""), "");
    }

    #[test]
    fn asciify_drops_non_ascii() {
        assert_eq!(asciify("caf\u{e9} \u{2014} ok"), "caf  ok");
        assert_eq!(asciify("plain"), "plain");
    }
}
