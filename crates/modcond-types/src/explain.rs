//! Explain registry for formula kinds.
//!
//! Maps a kind tag to a human-readable description and a minimal example node.

use crate::ids::*;
use crate::report::Dialect;

/// Explanation entry for a formula kind.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// The kind tag as it appears in the `type` field.
    pub kind: &'static str,
    /// Short description of the kind.
    pub title: &'static str,
    /// Dialects that accept this kind.
    pub dialects: &'static [Dialect],
    /// What the node matches, including defaults for absent facts.
    pub description: &'static str,
    /// A minimal node of this kind, as JSON.
    pub example: &'static str,
}

const BOTH: &[Dialect] = &[Dialect::Note, Dialect::User];
const NOTE: &[Dialect] = &[Dialect::Note];
const USER: &[Dialect] = &[Dialect::User];

const fn entry(
    kind: &'static str,
    title: &'static str,
    dialects: &'static [Dialect],
    description: &'static str,
    example: &'static str,
) -> Explanation {
    Explanation {
        kind,
        title,
        dialects,
        description,
        example,
    }
}

static REGISTRY: &[Explanation] = &[
    // --- Connectives ---
    entry(KIND_TRUE, "Always", BOTH, "Always matches.", r#"{"type":"true"}"#),
    entry(KIND_FALSE, "Never", BOTH, "Never matches.", r#"{"type":"false"}"#),
    entry(
        KIND_AND,
        "All of",
        BOTH,
        "Matches when every child matches. Children are evaluated in order and evaluation \
stops at the first child that does not match. An empty list matches.",
        r#"{"type":"and","values":[{"type":"hasText"},{"type":"hasFiles"}]}"#,
    ),
    entry(
        KIND_OR,
        "Any of",
        BOTH,
        "Matches when at least one child matches. Children are evaluated in order and \
evaluation stops at the first match. An empty list does not match.",
        r#"{"type":"or","values":[{"type":"isReply"},{"type":"isQuoted"}]}"#,
    ),
    entry(
        KIND_NOT,
        "Not",
        BOTH,
        "Matches when the child does not match.",
        r#"{"type":"not","value":{"type":"hasText"}}"#,
    ),
    // --- Note dialect ---
    entry(
        KIND_ROLE_ASSIGNED_OF,
        "Author has role",
        NOTE,
        "Matches when the author currently holds the role. `roleAssignedTo` is accepted as an alias.",
        r#"{"type":"roleAssignedOf","roleId":"9abcdefghi"}"#,
    ),
    entry(
        KIND_HAS_TEXT,
        "Has text",
        NOTE,
        "Matches when the note carries text. Text that was empty after trimming is absent.",
        r#"{"type":"hasText"}"#,
    ),
    entry(
        KIND_TEXT_MATCH_OF,
        "Text matches",
        NOTE,
        "Matches when the text matches any pattern. A plain pattern is a set of space-separated \
fragments that must all appear; `/re/flags` is a regular expression.",
        r#"{"type":"textMatchOf","pattern":["spam link","/free\\s+coins/i"]}"#,
    ),
    entry(
        KIND_HAS_MENTIONS,
        "Has mentions",
        NOTE,
        "Matches when the note mentions at least one account. A reply always counts as having mentions.",
        r#"{"type":"hasMentions"}"#,
    ),
    entry(
        KIND_MENTION_COUNT_IS,
        "Mention count is",
        NOTE,
        "Matches when the number of distinct mentioned accounts equals the value.",
        r#"{"type":"mentionCountIs","value":2}"#,
    ),
    entry(
        KIND_MENTION_COUNT_MORE_THAN_OR_EQ,
        "Mention count at least",
        NOTE,
        "Matches when the number of distinct mentioned accounts is at least the value.",
        r#"{"type":"mentionCountMoreThanOrEq","value":5}"#,
    ),
    entry(
        KIND_MENTION_COUNT_LESS_THAN,
        "Mention count below",
        NOTE,
        "Matches when the number of distinct mentioned accounts is below the value.",
        r#"{"type":"mentionCountLessThan","value":2}"#,
    ),
    entry(KIND_IS_REPLY, "Is reply", NOTE, "Matches when the note replies to another note.", r#"{"type":"isReply"}"#),
    entry(
        KIND_IS_QUOTED,
        "Is quote or renote",
        NOTE,
        "Matches when the note quotes or renotes another note.",
        r#"{"type":"isQuoted"}"#,
    ),
    entry(KIND_HAS_FILES, "Has files", NOTE, "Matches when at least one file is attached.", r#"{"type":"hasFiles"}"#),
    entry(
        KIND_FILE_COUNT_IS,
        "File count is",
        NOTE,
        "Matches when the number of attached files equals the value.",
        r#"{"type":"fileCountIs","value":4}"#,
    ),
    entry(
        KIND_FILE_COUNT_MORE_THAN_OR_EQ,
        "File count at least",
        NOTE,
        "Matches when the number of attached files is at least the value.",
        r#"{"type":"fileCountMoreThanOrEq","value":4}"#,
    ),
    entry(
        KIND_FILE_COUNT_LESS_THAN,
        "File count below",
        NOTE,
        "Matches when the number of attached files is below the value.",
        r#"{"type":"fileCountLessThan","value":1}"#,
    ),
    entry(
        KIND_FILE_TOTAL_SIZE_MORE_THAN_OR_EQ,
        "Total file size at least",
        NOTE,
        "Matches when the summed size in bytes of all files is at least the threshold.",
        r#"{"type":"fileTotalSizeMoreThanOrEq","size":10485760}"#,
    ),
    entry(
        KIND_FILE_TOTAL_SIZE_LESS_THAN,
        "Total file size below",
        NOTE,
        "Matches when the summed size in bytes of all files is below the threshold. No files sum to 0.",
        r#"{"type":"fileTotalSizeLessThan","size":1024}"#,
    ),
    entry(
        KIND_HAS_FILE_SIZE_MORE_THAN_OR_EQ,
        "Some file at least",
        NOTE,
        "Matches when any file is at least the threshold in bytes. Never matches without files.",
        r#"{"type":"hasFileSizeMoreThanOrEq","size":1048576}"#,
    ),
    entry(
        KIND_HAS_FILE_SIZE_LESS_THAN,
        "Some file below",
        NOTE,
        "Matches when any file is below the threshold in bytes. Always matches when no files are attached.",
        r#"{"type":"hasFileSizeLessThan","size":1024}"#,
    ),
    entry(
        KIND_HAS_FILE_MD5_IS,
        "File hash is",
        NOTE,
        "Matches when any file's content MD5 equals the hash.",
        r#"{"type":"hasFileMD5Is","hash":"d41d8cd98f00b204e9800998ecf8427e"}"#,
    ),
    entry(
        KIND_HAS_BROWSER_INSAFE,
        "Has browser-unsafe file",
        NOTE,
        "Matches when any file's MIME type is outside the browser-safe allow-list.",
        r#"{"type":"hasBrowserInsafe"}"#,
    ),
    entry(
        KIND_HAS_PICTURES,
        "Has pictures",
        NOTE,
        "Matches when any file's MIME type starts with `image/`.",
        r#"{"type":"hasPictures"}"#,
    ),
    entry(
        KIND_HAS_LIKELY_BLURHASH,
        "Has similar image",
        NOTE,
        "Matches when any file's perceptual hash is within `diff` of the reference, measured as the \
sum of absolute sample differences. Files without a decodable hash are skipped.",
        r#"{"type":"hasLikelyBlurhash","hash":"LEHV6nWB2yk8pyo0adR*.7kCMdnj","diff":200}"#,
    ),
    entry(KIND_HAS_HASHTAGS, "Has hashtags", NOTE, "Matches when the note carries a hashtag.", r#"{"type":"hasHashtags"}"#),
    entry(
        KIND_HASHTAG_COUNT_IS,
        "Hashtag count is",
        NOTE,
        "Matches when the number of hashtags equals the value.",
        r#"{"type":"hashtagCountIs","value":3}"#,
    ),
    entry(
        KIND_HASHTAG_COUNT_MORE_THAN_OR_EQ,
        "Hashtag count at least",
        NOTE,
        "Matches when the number of hashtags is at least the value.",
        r#"{"type":"hashtagCountMoreThanOrEq","value":10}"#,
    ),
    entry(
        KIND_HASHTAG_COUNT_LESS_THAN,
        "Hashtag count below",
        NOTE,
        "Matches when the number of hashtags is below the value.",
        r#"{"type":"hashtagCountLessThan","value":1}"#,
    ),
    entry(
        KIND_HAS_HASHTAG_MATCH_OF,
        "Hashtag matches",
        NOTE,
        "Matches when any hashtag matches any pattern.",
        r#"{"type":"hasHashtagMatchOf","pattern":"/^nsfw/i"}"#,
    ),
    // --- User dialect ---
    entry(KIND_IS_LOCAL, "Is local", USER, "Matches accounts of this instance.", r#"{"type":"isLocal"}"#),
    entry(KIND_IS_REMOTE, "Is remote", USER, "Matches accounts of other instances.", r#"{"type":"isRemote"}"#),
    entry(
        KIND_IS_FEDERATED,
        "Instance is federated",
        USER,
        "Matches remote accounts whose instance this server federates with.",
        r#"{"type":"isFederated"}"#,
    ),
    entry(
        KIND_IS_SUBSCRIBING,
        "Instance is subscribing",
        USER,
        "Matches remote accounts whose instance receives deliveries from this server.",
        r#"{"type":"isSubscribing"}"#,
    ),
    entry(
        KIND_IS_PUBLISHING,
        "Instance is publishing",
        USER,
        "Matches remote accounts whose instance delivers to this server.",
        r#"{"type":"isPublishing"}"#,
    ),
    entry(
        KIND_IS_FOREIGN,
        "Instance is foreign",
        USER,
        "Matches remote accounts whose instance has no follow relation with this server.",
        r#"{"type":"isForeign"}"#,
    ),
    entry(KIND_ROLE_ASSIGNED_TO, "Has role", USER, "Matches when the account holds the role.", r#"{"type":"roleAssignedTo","roleId":"9abcdefghi"}"#),
    entry(KIND_IS_SUSPENDED, "Is suspended", USER, "Matches suspended accounts.", r#"{"type":"isSuspended"}"#),
    entry(KIND_IS_LOCKED, "Is locked", USER, "Matches accounts that approve followers manually.", r#"{"type":"isLocked"}"#),
    entry(KIND_IS_BOT, "Is bot", USER, "Matches accounts flagged as bots.", r#"{"type":"isBot"}"#),
    entry(KIND_IS_CAT, "Is cat", USER, "Matches accounts flagged as cats.", r#"{"type":"isCat"}"#),
    entry(
        KIND_IS_EXPLORABLE,
        "Is explorable",
        USER,
        "Matches accounts that allow being found in the explore view.",
        r#"{"type":"isExplorable"}"#,
    ),
    entry(KIND_IS_MFA_ENABLED, "Uses 2FA", USER, "Matches accounts with two-factor authentication.", r#"{"type":"isMfaEnabled"}"#),
    entry(
        KIND_IS_SECURITY_KEY_AVAILABLE,
        "Has security key",
        USER,
        "Matches accounts with a registered security key.",
        r#"{"type":"isSecurityKeyAvailable"}"#,
    ),
    entry(
        KIND_IS_USING_PWLESS_LOGIN,
        "Uses passwordless login",
        USER,
        "Matches accounts that log in without a password.",
        r#"{"type":"isUsingPwlessLogin"}"#,
    ),
    entry(KIND_IS_NO_CRAWLE, "Opts out of crawling", USER, "Matches accounts that opt out of search indexing.", r#"{"type":"isNoCrawle"}"#),
    entry(KIND_IS_NO_AI, "Opts out of AI", USER, "Matches accounts that opt out of AI training.", r#"{"type":"isNoAI"}"#),
    entry(
        KIND_CREATED_LESS_THAN,
        "Created within",
        USER,
        "Matches accounts created less than `sec` seconds ago.",
        r#"{"type":"createdLessThan","sec":86400}"#,
    ),
    entry(
        KIND_CREATED_MORE_THAN,
        "Created before",
        USER,
        "Matches accounts created more than `sec` seconds ago.",
        r#"{"type":"createdMoreThan","sec":604800}"#,
    ),
    entry(
        KIND_LOGGED_IN_LESS_THAN_OR_EQ,
        "Active within",
        USER,
        "Matches accounts active at most `day` days ago. Never matches accounts without recorded activity.",
        r#"{"type":"loggedInLessThanOrEq","day":7}"#,
    ),
    entry(
        KIND_LOGGED_IN_MORE_THAN_OR_EQ,
        "Inactive for",
        USER,
        "Matches accounts last active at least `day` days ago, including accounts without recorded activity.",
        r#"{"type":"loggedInMoreThanOrEq","day":90}"#,
    ),
    entry(KIND_FOLLOWERS_LESS_THAN_OR_EQ, "Followers at most", USER, "Matches when the follower count is at most the value.", r#"{"type":"followersLessThanOrEq","value":10}"#),
    entry(KIND_FOLLOWERS_MORE_THAN_OR_EQ, "Followers at least", USER, "Matches when the follower count is at least the value.", r#"{"type":"followersMoreThanOrEq","value":100}"#),
    entry(KIND_FOLLOWING_LESS_THAN_OR_EQ, "Following at most", USER, "Matches when the following count is at most the value.", r#"{"type":"followingLessThanOrEq","value":10}"#),
    entry(KIND_FOLLOWING_MORE_THAN_OR_EQ, "Following at least", USER, "Matches when the following count is at least the value.", r#"{"type":"followingMoreThanOrEq","value":1000}"#),
    entry(KIND_NOTES_LESS_THAN_OR_EQ, "Notes at most", USER, "Matches when the note count is at most the value.", r#"{"type":"notesLessThanOrEq","value":0}"#),
    entry(KIND_NOTES_MORE_THAN_OR_EQ, "Notes at least", USER, "Matches when the note count is at least the value.", r#"{"type":"notesMoreThanOrEq","value":50}"#),
    entry(
        KIND_USERNAME_MATCH_OF,
        "Username matches",
        USER,
        "Matches when the username matches any pattern.",
        r#"{"type":"usernameMatchOf","pattern":"/^[a-z]{12}$/"}"#,
    ),
    entry(
        KIND_USERNAME_ENTROPY_MORE_THAN_OR_EQ,
        "Username entropy at least",
        USER,
        "Matches when the username's entropy score under the configured table is at least the value. \
Never matches while no valid table is configured.",
        r#"{"type":"usernameEntropyMoreThanOrEq","value":40.0}"#,
    ),
    entry(
        KIND_USERNAME_ENTROPY_LESS_THAN_OR_EQ,
        "Username entropy at most",
        USER,
        "Matches when the username's entropy score is at most the value.",
        r#"{"type":"usernameEntropyLessThanOrEq","value":10.0}"#,
    ),
    entry(
        KIND_USERNAME_ENTROPY_MEAN_MORE_THAN_OR_EQ,
        "Username entropy per character at least",
        USER,
        "Matches when the entropy score divided by the username's character count is at least the value.",
        r#"{"type":"usernameEntropyMeanMoreThanOrEq","value":3.5}"#,
    ),
    entry(
        KIND_USERNAME_ENTROPY_MEAN_LESS_THAN_OR_EQ,
        "Username entropy per character at most",
        USER,
        "Matches when the entropy score divided by the username's character count is at most the value.",
        r#"{"type":"usernameEntropyMeanLessThanOrEq","value":1.0}"#,
    ),
    entry(
        KIND_HOST_MATCH_OF,
        "Host matches",
        USER,
        "Matches when the account's host matches any pattern. Local accounts have an empty host.",
        r#"{"type":"hostMatchOf","pattern":"/\\.example$/"}"#,
    ),
    entry(KIND_NAME_MATCH_OF, "Display name matches", USER, "Matches when the display name matches any pattern.", r#"{"type":"nameMatchOf","pattern":"official"}"#),
    entry(KIND_NAME_IS_DEFAULT, "Display name unset", USER, "Matches when no display name is set.", r#"{"type":"nameIsDefault"}"#),
    entry(KIND_EMAIL_VERIFIED, "Email verified", USER, "Matches accounts with a verified email address.", r#"{"type":"emailVerified"}"#),
    entry(KIND_EMAIL_MATCH_OF, "Email matches", USER, "Matches when the email address matches any pattern.", r#"{"type":"emailMatchOf","pattern":"@mailinator.com"}"#),
    entry(KIND_AVATAR_UNSET, "Avatar unset", USER, "Matches accounts without an avatar.", r#"{"type":"avatarUnset"}"#),
    entry(
        KIND_AVATAR_LIKELY_BLURHASH,
        "Avatar similar to",
        USER,
        "Matches when the avatar's perceptual hash is within `diff` of the reference.",
        r#"{"type":"avatarLikelyBlurhash","hash":"LEHV6nWB2yk8pyo0adR*.7kCMdnj","diff":100}"#,
    ),
    entry(KIND_BANNER_UNSET, "Banner unset", USER, "Matches accounts without a banner.", r#"{"type":"bannerUnset"}"#),
    entry(
        KIND_BANNER_LIKELY_BLURHASH,
        "Banner similar to",
        USER,
        "Matches when the banner's perceptual hash is within `diff` of the reference.",
        r#"{"type":"bannerLikelyBlurhash","hash":"LEHV6nWB2yk8pyo0adR*.7kCMdnj","diff":100}"#,
    ),
    entry(KIND_HAS_TAGS, "Has profile tags", USER, "Matches accounts with at least one profile tag.", r#"{"type":"hasTags"}"#),
    entry(KIND_TAG_COUNT_IS, "Tag count is", USER, "Matches when the number of profile tags equals the value.", r#"{"type":"tagCountIs","value":3}"#),
    entry(KIND_TAG_COUNT_MORE_THAN_OR_EQ, "Tag count at least", USER, "Matches when the number of profile tags is at least the value.", r#"{"type":"tagCountMoreThanOrEq","value":10}"#),
    entry(KIND_TAG_COUNT_LESS_THAN, "Tag count below", USER, "Matches when the number of profile tags is below the value.", r#"{"type":"tagCountLessThan","value":1}"#),
    entry(KIND_HAS_TAG_MATCH_OF, "Profile tag matches", USER, "Matches when any profile tag matches any pattern.", r#"{"type":"hasTagMatchOf","pattern":"crypto"}"#),
];

/// Look up an explanation by kind tag.
///
/// Returns `None` if the kind is not recognized.
pub fn lookup_explanation(kind: &str) -> Option<&'static Explanation> {
    REGISTRY.iter().find(|e| e.kind == kind)
}

/// List every kind known to the registry, in registry order.
pub fn all_kinds() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|e| e.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_connectives() {
        for kind in CONNECTIVE_KINDS {
            let exp = lookup_explanation(kind).expect("connective explained");
            assert_eq!(exp.dialects, BOTH);
        }
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("hasTextt").is_none());
        assert!(lookup_explanation("").is_none());
    }

    #[test]
    fn every_note_kind_is_registered() {
        for kind in NOTE_LEAF_KINDS {
            let exp = lookup_explanation(kind)
                .unwrap_or_else(|| panic!("note kind {kind} should be in registry"));
            assert!(exp.dialects.contains(&Dialect::Note), "{kind}");
        }
    }

    #[test]
    fn every_user_kind_is_registered() {
        for kind in USER_LEAF_KINDS {
            let exp = lookup_explanation(kind)
                .unwrap_or_else(|| panic!("user kind {kind} should be in registry"));
            assert!(exp.dialects.contains(&Dialect::User), "{kind}");
        }
    }

    #[test]
    fn kinds_are_unique() {
        let mut seen = std::collections::BTreeSet::new();
        for kind in all_kinds() {
            assert!(seen.insert(kind), "duplicate registry entry for {kind}");
        }
    }

    #[test]
    fn examples_are_json_objects_of_their_kind() {
        for exp in REGISTRY {
            let value: serde_json::Value =
                serde_json::from_str(exp.example).expect("example parses as JSON");
            assert_eq!(value["type"], exp.kind, "example for {}", exp.kind);
        }
    }
}
