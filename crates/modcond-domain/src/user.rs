//! Role-assignment dialect.
//!
//! Same connectives as the note dialect; leaves read account facts instead.
//! Time leaves compare against the evaluation instant carried by [`UserFacts`].

use crate::engine::{Capabilities, Predicate};
use crate::error::EvalError;
use crate::facts::UserFacts;
use crate::formula::Leaf;
use crate::matcher::{self, Patterns};
use crate::model::RoleId;
use crate::perceptual;
use crate::threshold::{self, Cmp};
use modcond_types::ids;
use serde::{Deserialize, Serialize};

const SECS_PER_DAY: f64 = 86_400.0;

/// Leaf predicates over a user account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UserLeaf {
    IsLocal,
    IsRemote,
    IsFederated,
    IsSubscribing,
    IsPublishing,
    IsForeign,

    IsSuspended,
    IsLocked,
    IsBot,
    IsCat,
    IsExplorable,
    IsMfaEnabled,
    IsSecurityKeyAvailable,
    IsUsingPwlessLogin,
    IsNoCrawle,
    #[serde(rename = "isNoAI")]
    IsNoAi,

    RoleAssignedTo { role_id: RoleId },

    CreatedLessThan { sec: f64 },
    CreatedMoreThan { sec: f64 },
    LoggedInLessThanOrEq { day: f64 },
    LoggedInMoreThanOrEq { day: f64 },

    FollowersLessThanOrEq { value: f64 },
    FollowersMoreThanOrEq { value: f64 },
    FollowingLessThanOrEq { value: f64 },
    FollowingMoreThanOrEq { value: f64 },
    NotesLessThanOrEq { value: f64 },
    NotesMoreThanOrEq { value: f64 },

    UsernameMatchOf { pattern: Patterns },
    UsernameEntropyMoreThanOrEq { value: f64 },
    UsernameEntropyLessThanOrEq { value: f64 },
    UsernameEntropyMeanMoreThanOrEq { value: f64 },
    UsernameEntropyMeanLessThanOrEq { value: f64 },
    HostMatchOf { pattern: Patterns },
    NameMatchOf { pattern: Patterns },
    NameIsDefault,
    EmailVerified,
    EmailMatchOf { pattern: Patterns },

    AvatarUnset,
    AvatarLikelyBlurhash { hash: String, diff: f64 },
    BannerUnset,
    BannerLikelyBlurhash { hash: String, diff: f64 },

    HasTags,
    TagCountIs { value: f64 },
    TagCountMoreThanOrEq { value: f64 },
    TagCountLessThan { value: f64 },
    HasTagMatchOf { pattern: Patterns },
}

impl Leaf for UserLeaf {
    fn kind(&self) -> &'static str {
        use UserLeaf::*;
        match self {
            IsLocal => ids::KIND_IS_LOCAL,
            IsRemote => ids::KIND_IS_REMOTE,
            IsFederated => ids::KIND_IS_FEDERATED,
            IsSubscribing => ids::KIND_IS_SUBSCRIBING,
            IsPublishing => ids::KIND_IS_PUBLISHING,
            IsForeign => ids::KIND_IS_FOREIGN,
            IsSuspended => ids::KIND_IS_SUSPENDED,
            IsLocked => ids::KIND_IS_LOCKED,
            IsBot => ids::KIND_IS_BOT,
            IsCat => ids::KIND_IS_CAT,
            IsExplorable => ids::KIND_IS_EXPLORABLE,
            IsMfaEnabled => ids::KIND_IS_MFA_ENABLED,
            IsSecurityKeyAvailable => ids::KIND_IS_SECURITY_KEY_AVAILABLE,
            IsUsingPwlessLogin => ids::KIND_IS_USING_PWLESS_LOGIN,
            IsNoCrawle => ids::KIND_IS_NO_CRAWLE,
            IsNoAi => ids::KIND_IS_NO_AI,
            RoleAssignedTo { .. } => ids::KIND_ROLE_ASSIGNED_TO,
            CreatedLessThan { .. } => ids::KIND_CREATED_LESS_THAN,
            CreatedMoreThan { .. } => ids::KIND_CREATED_MORE_THAN,
            LoggedInLessThanOrEq { .. } => ids::KIND_LOGGED_IN_LESS_THAN_OR_EQ,
            LoggedInMoreThanOrEq { .. } => ids::KIND_LOGGED_IN_MORE_THAN_OR_EQ,
            FollowersLessThanOrEq { .. } => ids::KIND_FOLLOWERS_LESS_THAN_OR_EQ,
            FollowersMoreThanOrEq { .. } => ids::KIND_FOLLOWERS_MORE_THAN_OR_EQ,
            FollowingLessThanOrEq { .. } => ids::KIND_FOLLOWING_LESS_THAN_OR_EQ,
            FollowingMoreThanOrEq { .. } => ids::KIND_FOLLOWING_MORE_THAN_OR_EQ,
            NotesLessThanOrEq { .. } => ids::KIND_NOTES_LESS_THAN_OR_EQ,
            NotesMoreThanOrEq { .. } => ids::KIND_NOTES_MORE_THAN_OR_EQ,
            UsernameMatchOf { .. } => ids::KIND_USERNAME_MATCH_OF,
            UsernameEntropyMoreThanOrEq { .. } => ids::KIND_USERNAME_ENTROPY_MORE_THAN_OR_EQ,
            UsernameEntropyLessThanOrEq { .. } => ids::KIND_USERNAME_ENTROPY_LESS_THAN_OR_EQ,
            UsernameEntropyMeanMoreThanOrEq { .. } => {
                ids::KIND_USERNAME_ENTROPY_MEAN_MORE_THAN_OR_EQ
            }
            UsernameEntropyMeanLessThanOrEq { .. } => {
                ids::KIND_USERNAME_ENTROPY_MEAN_LESS_THAN_OR_EQ
            }
            HostMatchOf { .. } => ids::KIND_HOST_MATCH_OF,
            NameMatchOf { .. } => ids::KIND_NAME_MATCH_OF,
            NameIsDefault => ids::KIND_NAME_IS_DEFAULT,
            EmailVerified => ids::KIND_EMAIL_VERIFIED,
            EmailMatchOf { .. } => ids::KIND_EMAIL_MATCH_OF,
            AvatarUnset => ids::KIND_AVATAR_UNSET,
            AvatarLikelyBlurhash { .. } => ids::KIND_AVATAR_LIKELY_BLURHASH,
            BannerUnset => ids::KIND_BANNER_UNSET,
            BannerLikelyBlurhash { .. } => ids::KIND_BANNER_LIKELY_BLURHASH,
            HasTags => ids::KIND_HAS_TAGS,
            TagCountIs { .. } => ids::KIND_TAG_COUNT_IS,
            TagCountMoreThanOrEq { .. } => ids::KIND_TAG_COUNT_MORE_THAN_OR_EQ,
            TagCountLessThan { .. } => ids::KIND_TAG_COUNT_LESS_THAN,
            HasTagMatchOf { .. } => ids::KIND_HAS_TAG_MATCH_OF,
        }
    }
}

impl<'a> Predicate<UserFacts<'a>> for UserLeaf {
    fn test(&self, facts: &UserFacts<'a>, caps: &Capabilities<'_>) -> Result<bool, EvalError> {
        use UserLeaf::*;

        let user = facts.subject;
        let remote = !user.is_local();
        let pattern_on = |text: Option<&str>, pattern: &Patterns| {
            caps.matcher
                .matches_any(text.unwrap_or(""), pattern.as_slice())
        };

        let matched = match self {
            IsLocal => !remote,
            IsRemote => remote,
            IsFederated => remote && !facts.instance().suspended,
            IsSubscribing => remote && facts.instance().following_count > 0,
            IsPublishing => remote && facts.instance().followers_count > 0,
            IsForeign => {
                let instance = facts.instance();
                remote && instance.following_count == 0 && instance.followers_count == 0
            }

            IsSuspended => user.is_suspended,
            IsLocked => user.is_locked,
            IsBot => user.is_bot,
            IsCat => user.is_cat,
            IsExplorable => user.is_explorable,
            IsMfaEnabled => user.two_factor_enabled,
            IsSecurityKeyAvailable => user.security_keys_available,
            IsUsingPwlessLogin => user.using_passwordless_login,
            IsNoCrawle => user.no_crawle,
            IsNoAi => user.prevent_ai_learning,

            RoleAssignedTo { role_id } => facts.has_role(role_id),

            CreatedLessThan { sec } => Cmp::Lt.holds(facts.account_age_secs() as f64, *sec),
            CreatedMoreThan { sec } => Cmp::Gt.holds(facts.account_age_secs() as f64, *sec),
            LoggedInLessThanOrEq { day } => facts
                .secs_since_active()
                .is_some_and(|secs| Cmp::Le.holds(secs, day * SECS_PER_DAY)),
            LoggedInMoreThanOrEq { day } => facts
                .secs_since_active()
                .is_none_or(|secs| Cmp::Ge.holds(secs, day * SECS_PER_DAY)),

            FollowersLessThanOrEq { value } => {
                threshold::amount(user.followers_count, Cmp::Le, *value)
            }
            FollowersMoreThanOrEq { value } => {
                threshold::amount(user.followers_count, Cmp::Ge, *value)
            }
            FollowingLessThanOrEq { value } => {
                threshold::amount(user.following_count, Cmp::Le, *value)
            }
            FollowingMoreThanOrEq { value } => {
                threshold::amount(user.following_count, Cmp::Ge, *value)
            }
            NotesLessThanOrEq { value } => threshold::amount(user.notes_count, Cmp::Le, *value),
            NotesMoreThanOrEq { value } => threshold::amount(user.notes_count, Cmp::Ge, *value),

            UsernameMatchOf { pattern } => pattern_on(Some(&user.username), pattern)?,
            UsernameEntropyMoreThanOrEq { value } => facts
                .username_entropy
                .is_some_and(|e| Cmp::Ge.holds(e.total, *value)),
            UsernameEntropyLessThanOrEq { value } => facts
                .username_entropy
                .is_some_and(|e| Cmp::Le.holds(e.total, *value)),
            UsernameEntropyMeanMoreThanOrEq { value } => facts
                .username_entropy
                .is_some_and(|e| Cmp::Ge.holds(e.mean, *value)),
            UsernameEntropyMeanLessThanOrEq { value } => facts
                .username_entropy
                .is_some_and(|e| Cmp::Le.holds(e.mean, *value)),
            HostMatchOf { pattern } => pattern_on(user.host.as_deref(), pattern)?,
            NameMatchOf { pattern } => pattern_on(user.name.as_deref(), pattern)?,
            NameIsDefault => user.name.as_deref().is_none_or(|n| n.trim().is_empty()),
            EmailVerified => user.email_verified,
            EmailMatchOf { pattern } => pattern_on(user.email.as_deref(), pattern)?,

            AvatarUnset => user.avatar.is_none(),
            AvatarLikelyBlurhash { hash, diff } => {
                perceptual::likely_match(caps.decoder, hash, &facts.avatar_grid, *diff)
            }
            BannerUnset => user.banner.is_none(),
            BannerLikelyBlurhash { hash, diff } => {
                perceptual::likely_match(caps.decoder, hash, &facts.banner_grid, *diff)
            }

            HasTags => !user.tags.is_empty(),
            TagCountIs { value } => threshold::count(user.tags.len(), Cmp::Eq, *value),
            TagCountMoreThanOrEq { value } => threshold::count(user.tags.len(), Cmp::Ge, *value),
            TagCountLessThan { value } => threshold::count(user.tags.len(), Cmp::Lt, *value),
            HasTagMatchOf { pattern } => matcher::any_text_matches(caps.matcher, &user.tags, pattern)?,
        };
        Ok(matched)
    }
}
