//! Stable identifiers for formula kinds.
//!
//! A kind is the value of a formula node's `type` field. The set is closed and
//! versioned here; both dialects share the connective kinds.

// Connectives
pub const KIND_TRUE: &str = "true";
pub const KIND_FALSE: &str = "false";
pub const KIND_AND: &str = "and";
pub const KIND_OR: &str = "or";
pub const KIND_NOT: &str = "not";

// Shared role membership (`roleAssignedTo` is accepted by the note dialect as an alias)
pub const KIND_ROLE_ASSIGNED_OF: &str = "roleAssignedOf";
pub const KIND_ROLE_ASSIGNED_TO: &str = "roleAssignedTo";

// Note dialect: text
pub const KIND_HAS_TEXT: &str = "hasText";
pub const KIND_TEXT_MATCH_OF: &str = "textMatchOf";

// Note dialect: mentions and references
pub const KIND_HAS_MENTIONS: &str = "hasMentions";
pub const KIND_MENTION_COUNT_IS: &str = "mentionCountIs";
pub const KIND_MENTION_COUNT_MORE_THAN_OR_EQ: &str = "mentionCountMoreThanOrEq";
pub const KIND_MENTION_COUNT_LESS_THAN: &str = "mentionCountLessThan";
pub const KIND_IS_REPLY: &str = "isReply";
pub const KIND_IS_QUOTED: &str = "isQuoted";

// Note dialect: files
pub const KIND_HAS_FILES: &str = "hasFiles";
pub const KIND_FILE_COUNT_IS: &str = "fileCountIs";
pub const KIND_FILE_COUNT_MORE_THAN_OR_EQ: &str = "fileCountMoreThanOrEq";
pub const KIND_FILE_COUNT_LESS_THAN: &str = "fileCountLessThan";
pub const KIND_FILE_TOTAL_SIZE_MORE_THAN_OR_EQ: &str = "fileTotalSizeMoreThanOrEq";
pub const KIND_FILE_TOTAL_SIZE_LESS_THAN: &str = "fileTotalSizeLessThan";
pub const KIND_HAS_FILE_SIZE_MORE_THAN_OR_EQ: &str = "hasFileSizeMoreThanOrEq";
pub const KIND_HAS_FILE_SIZE_LESS_THAN: &str = "hasFileSizeLessThan";
pub const KIND_HAS_FILE_MD5_IS: &str = "hasFileMD5Is";
pub const KIND_HAS_BROWSER_INSAFE: &str = "hasBrowserInsafe";
pub const KIND_HAS_PICTURES: &str = "hasPictures";
pub const KIND_HAS_LIKELY_BLURHASH: &str = "hasLikelyBlurhash";

// Note dialect: hashtags
pub const KIND_HAS_HASHTAGS: &str = "hasHashtags";
pub const KIND_HASHTAG_COUNT_IS: &str = "hashtagCountIs";
pub const KIND_HASHTAG_COUNT_MORE_THAN_OR_EQ: &str = "hashtagCountMoreThanOrEq";
pub const KIND_HASHTAG_COUNT_LESS_THAN: &str = "hashtagCountLessThan";
pub const KIND_HAS_HASHTAG_MATCH_OF: &str = "hasHashtagMatchOf";

// User dialect: origin and federation
pub const KIND_IS_LOCAL: &str = "isLocal";
pub const KIND_IS_REMOTE: &str = "isRemote";
pub const KIND_IS_FEDERATED: &str = "isFederated";
pub const KIND_IS_SUBSCRIBING: &str = "isSubscribing";
pub const KIND_IS_PUBLISHING: &str = "isPublishing";
pub const KIND_IS_FOREIGN: &str = "isForeign";

// User dialect: account flags
pub const KIND_IS_SUSPENDED: &str = "isSuspended";
pub const KIND_IS_LOCKED: &str = "isLocked";
pub const KIND_IS_BOT: &str = "isBot";
pub const KIND_IS_CAT: &str = "isCat";
pub const KIND_IS_EXPLORABLE: &str = "isExplorable";
pub const KIND_IS_MFA_ENABLED: &str = "isMfaEnabled";
pub const KIND_IS_SECURITY_KEY_AVAILABLE: &str = "isSecurityKeyAvailable";
pub const KIND_IS_USING_PWLESS_LOGIN: &str = "isUsingPwlessLogin";
pub const KIND_IS_NO_CRAWLE: &str = "isNoCrawle";
pub const KIND_IS_NO_AI: &str = "isNoAI";

// User dialect: time
pub const KIND_CREATED_LESS_THAN: &str = "createdLessThan";
pub const KIND_CREATED_MORE_THAN: &str = "createdMoreThan";
pub const KIND_LOGGED_IN_LESS_THAN_OR_EQ: &str = "loggedInLessThanOrEq";
pub const KIND_LOGGED_IN_MORE_THAN_OR_EQ: &str = "loggedInMoreThanOrEq";

// User dialect: counters
pub const KIND_FOLLOWERS_LESS_THAN_OR_EQ: &str = "followersLessThanOrEq";
pub const KIND_FOLLOWERS_MORE_THAN_OR_EQ: &str = "followersMoreThanOrEq";
pub const KIND_FOLLOWING_LESS_THAN_OR_EQ: &str = "followingLessThanOrEq";
pub const KIND_FOLLOWING_MORE_THAN_OR_EQ: &str = "followingMoreThanOrEq";
pub const KIND_NOTES_LESS_THAN_OR_EQ: &str = "notesLessThanOrEq";
pub const KIND_NOTES_MORE_THAN_OR_EQ: &str = "notesMoreThanOrEq";

// User dialect: names
pub const KIND_USERNAME_MATCH_OF: &str = "usernameMatchOf";
pub const KIND_USERNAME_ENTROPY_MORE_THAN_OR_EQ: &str = "usernameEntropyMoreThanOrEq";
pub const KIND_USERNAME_ENTROPY_LESS_THAN_OR_EQ: &str = "usernameEntropyLessThanOrEq";
pub const KIND_USERNAME_ENTROPY_MEAN_MORE_THAN_OR_EQ: &str = "usernameEntropyMeanMoreThanOrEq";
pub const KIND_USERNAME_ENTROPY_MEAN_LESS_THAN_OR_EQ: &str = "usernameEntropyMeanLessThanOrEq";
pub const KIND_HOST_MATCH_OF: &str = "hostMatchOf";
pub const KIND_NAME_MATCH_OF: &str = "nameMatchOf";
pub const KIND_NAME_IS_DEFAULT: &str = "nameIsDefault";
pub const KIND_EMAIL_VERIFIED: &str = "emailVerified";
pub const KIND_EMAIL_MATCH_OF: &str = "emailMatchOf";

// User dialect: images
pub const KIND_AVATAR_UNSET: &str = "avatarUnset";
pub const KIND_AVATAR_LIKELY_BLURHASH: &str = "avatarLikelyBlurhash";
pub const KIND_BANNER_UNSET: &str = "bannerUnset";
pub const KIND_BANNER_LIKELY_BLURHASH: &str = "bannerLikelyBlurhash";

// User dialect: profile tags
pub const KIND_HAS_TAGS: &str = "hasTags";
pub const KIND_TAG_COUNT_IS: &str = "tagCountIs";
pub const KIND_TAG_COUNT_MORE_THAN_OR_EQ: &str = "tagCountMoreThanOrEq";
pub const KIND_TAG_COUNT_LESS_THAN: &str = "tagCountLessThan";
pub const KIND_HAS_TAG_MATCH_OF: &str = "hasTagMatchOf";

/// Connective kinds shared by both dialects.
pub const CONNECTIVE_KINDS: &[&str] = &[KIND_TRUE, KIND_FALSE, KIND_AND, KIND_OR, KIND_NOT];

/// Leaf kinds of the note-prohibition dialect (canonical spellings only).
pub const NOTE_LEAF_KINDS: &[&str] = &[
    KIND_ROLE_ASSIGNED_OF,
    KIND_HAS_TEXT,
    KIND_TEXT_MATCH_OF,
    KIND_HAS_MENTIONS,
    KIND_MENTION_COUNT_IS,
    KIND_MENTION_COUNT_MORE_THAN_OR_EQ,
    KIND_MENTION_COUNT_LESS_THAN,
    KIND_IS_REPLY,
    KIND_IS_QUOTED,
    KIND_HAS_FILES,
    KIND_FILE_COUNT_IS,
    KIND_FILE_COUNT_MORE_THAN_OR_EQ,
    KIND_FILE_COUNT_LESS_THAN,
    KIND_FILE_TOTAL_SIZE_MORE_THAN_OR_EQ,
    KIND_FILE_TOTAL_SIZE_LESS_THAN,
    KIND_HAS_FILE_SIZE_MORE_THAN_OR_EQ,
    KIND_HAS_FILE_SIZE_LESS_THAN,
    KIND_HAS_FILE_MD5_IS,
    KIND_HAS_BROWSER_INSAFE,
    KIND_HAS_PICTURES,
    KIND_HAS_LIKELY_BLURHASH,
    KIND_HAS_HASHTAGS,
    KIND_HASHTAG_COUNT_IS,
    KIND_HASHTAG_COUNT_MORE_THAN_OR_EQ,
    KIND_HASHTAG_COUNT_LESS_THAN,
    KIND_HAS_HASHTAG_MATCH_OF,
];

/// Leaf kinds of the role-assignment dialect.
pub const USER_LEAF_KINDS: &[&str] = &[
    KIND_IS_LOCAL,
    KIND_IS_REMOTE,
    KIND_IS_FEDERATED,
    KIND_IS_SUBSCRIBING,
    KIND_IS_PUBLISHING,
    KIND_IS_FOREIGN,
    KIND_IS_SUSPENDED,
    KIND_IS_LOCKED,
    KIND_IS_BOT,
    KIND_IS_CAT,
    KIND_IS_EXPLORABLE,
    KIND_IS_MFA_ENABLED,
    KIND_IS_SECURITY_KEY_AVAILABLE,
    KIND_IS_USING_PWLESS_LOGIN,
    KIND_IS_NO_CRAWLE,
    KIND_IS_NO_AI,
    KIND_ROLE_ASSIGNED_TO,
    KIND_CREATED_LESS_THAN,
    KIND_CREATED_MORE_THAN,
    KIND_LOGGED_IN_LESS_THAN_OR_EQ,
    KIND_LOGGED_IN_MORE_THAN_OR_EQ,
    KIND_FOLLOWERS_LESS_THAN_OR_EQ,
    KIND_FOLLOWERS_MORE_THAN_OR_EQ,
    KIND_FOLLOWING_LESS_THAN_OR_EQ,
    KIND_FOLLOWING_MORE_THAN_OR_EQ,
    KIND_NOTES_LESS_THAN_OR_EQ,
    KIND_NOTES_MORE_THAN_OR_EQ,
    KIND_USERNAME_MATCH_OF,
    KIND_USERNAME_ENTROPY_MORE_THAN_OR_EQ,
    KIND_USERNAME_ENTROPY_LESS_THAN_OR_EQ,
    KIND_USERNAME_ENTROPY_MEAN_MORE_THAN_OR_EQ,
    KIND_USERNAME_ENTROPY_MEAN_LESS_THAN_OR_EQ,
    KIND_HOST_MATCH_OF,
    KIND_NAME_MATCH_OF,
    KIND_NAME_IS_DEFAULT,
    KIND_EMAIL_VERIFIED,
    KIND_EMAIL_MATCH_OF,
    KIND_AVATAR_UNSET,
    KIND_AVATAR_LIKELY_BLURHASH,
    KIND_BANNER_UNSET,
    KIND_BANNER_LIKELY_BLURHASH,
    KIND_HAS_TAGS,
    KIND_TAG_COUNT_IS,
    KIND_TAG_COUNT_MORE_THAN_OR_EQ,
    KIND_TAG_COUNT_LESS_THAN,
    KIND_HAS_TAG_MATCH_OF,
];
