//! Note-prohibition dialect.

use crate::engine::{Capabilities, Predicate};
use crate::error::EvalError;
use crate::facts::NoteFacts;
use crate::formula::Leaf;
use crate::matcher::{self, Patterns};
use crate::model::RoleId;
use crate::perceptual;
use crate::threshold::{self, Cmp};
use modcond_types::ids;
use serde::{Deserialize, Serialize};

/// Leaf predicates over a note about to be created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NoteLeaf {
    #[serde(alias = "roleAssignedTo")]
    RoleAssignedOf { role_id: RoleId },

    HasText,
    TextMatchOf { pattern: Patterns },

    /// A reply counts as mentioning its parent's author.
    HasMentions,
    MentionCountIs { value: f64 },
    MentionCountMoreThanOrEq { value: f64 },
    MentionCountLessThan { value: f64 },
    IsReply,
    IsQuoted,

    HasFiles,
    FileCountIs { value: f64 },
    FileCountMoreThanOrEq { value: f64 },
    FileCountLessThan { value: f64 },
    FileTotalSizeMoreThanOrEq { size: f64 },
    FileTotalSizeLessThan { size: f64 },
    HasFileSizeMoreThanOrEq { size: f64 },
    /// Matches when there are no files at all.
    HasFileSizeLessThan { size: f64 },
    #[serde(rename = "hasFileMD5Is")]
    HasFileMd5Is { hash: String },
    HasBrowserInsafe,
    HasPictures,
    HasLikelyBlurhash { hash: String, diff: f64 },

    HasHashtags,
    HashtagCountIs { value: f64 },
    HashtagCountMoreThanOrEq { value: f64 },
    HashtagCountLessThan { value: f64 },
    HasHashtagMatchOf {
        #[serde(alias = "value")]
        pattern: Patterns,
    },
}

impl Leaf for NoteLeaf {
    fn kind(&self) -> &'static str {
        match self {
            NoteLeaf::RoleAssignedOf { .. } => ids::KIND_ROLE_ASSIGNED_OF,
            NoteLeaf::HasText => ids::KIND_HAS_TEXT,
            NoteLeaf::TextMatchOf { .. } => ids::KIND_TEXT_MATCH_OF,
            NoteLeaf::HasMentions => ids::KIND_HAS_MENTIONS,
            NoteLeaf::MentionCountIs { .. } => ids::KIND_MENTION_COUNT_IS,
            NoteLeaf::MentionCountMoreThanOrEq { .. } => ids::KIND_MENTION_COUNT_MORE_THAN_OR_EQ,
            NoteLeaf::MentionCountLessThan { .. } => ids::KIND_MENTION_COUNT_LESS_THAN,
            NoteLeaf::IsReply => ids::KIND_IS_REPLY,
            NoteLeaf::IsQuoted => ids::KIND_IS_QUOTED,
            NoteLeaf::HasFiles => ids::KIND_HAS_FILES,
            NoteLeaf::FileCountIs { .. } => ids::KIND_FILE_COUNT_IS,
            NoteLeaf::FileCountMoreThanOrEq { .. } => ids::KIND_FILE_COUNT_MORE_THAN_OR_EQ,
            NoteLeaf::FileCountLessThan { .. } => ids::KIND_FILE_COUNT_LESS_THAN,
            NoteLeaf::FileTotalSizeMoreThanOrEq { .. } => {
                ids::KIND_FILE_TOTAL_SIZE_MORE_THAN_OR_EQ
            }
            NoteLeaf::FileTotalSizeLessThan { .. } => ids::KIND_FILE_TOTAL_SIZE_LESS_THAN,
            NoteLeaf::HasFileSizeMoreThanOrEq { .. } => ids::KIND_HAS_FILE_SIZE_MORE_THAN_OR_EQ,
            NoteLeaf::HasFileSizeLessThan { .. } => ids::KIND_HAS_FILE_SIZE_LESS_THAN,
            NoteLeaf::HasFileMd5Is { .. } => ids::KIND_HAS_FILE_MD5_IS,
            NoteLeaf::HasBrowserInsafe => ids::KIND_HAS_BROWSER_INSAFE,
            NoteLeaf::HasPictures => ids::KIND_HAS_PICTURES,
            NoteLeaf::HasLikelyBlurhash { .. } => ids::KIND_HAS_LIKELY_BLURHASH,
            NoteLeaf::HasHashtags => ids::KIND_HAS_HASHTAGS,
            NoteLeaf::HashtagCountIs { .. } => ids::KIND_HASHTAG_COUNT_IS,
            NoteLeaf::HashtagCountMoreThanOrEq { .. } => ids::KIND_HASHTAG_COUNT_MORE_THAN_OR_EQ,
            NoteLeaf::HashtagCountLessThan { .. } => ids::KIND_HASHTAG_COUNT_LESS_THAN,
            NoteLeaf::HasHashtagMatchOf { .. } => ids::KIND_HAS_HASHTAG_MATCH_OF,
        }
    }
}

impl<'a> Predicate<NoteFacts<'a>> for NoteLeaf {
    fn test(&self, facts: &NoteFacts<'a>, caps: &Capabilities<'_>) -> Result<bool, EvalError> {
        let subject = facts.subject;
        let files = subject.files.as_deref().unwrap_or_default();

        let matched = match self {
            NoteLeaf::RoleAssignedOf { role_id } => facts.has_role(role_id),

            NoteLeaf::HasText => subject.text.is_some(),
            NoteLeaf::TextMatchOf { pattern } => caps
                .matcher
                .matches_any(subject.text.as_deref().unwrap_or(""), pattern.as_slice())?,

            NoteLeaf::HasMentions => subject.reply.is_some() || !facts.mentions.is_empty(),
            NoteLeaf::MentionCountIs { value } => {
                threshold::count(facts.mentions.len(), Cmp::Eq, *value)
            }
            NoteLeaf::MentionCountMoreThanOrEq { value } => {
                threshold::count(facts.mentions.len(), Cmp::Ge, *value)
            }
            NoteLeaf::MentionCountLessThan { value } => {
                threshold::count(facts.mentions.len(), Cmp::Lt, *value)
            }
            NoteLeaf::IsReply => subject.reply.is_some(),
            NoteLeaf::IsQuoted => subject.renote.is_some(),

            NoteLeaf::HasFiles => !files.is_empty(),
            NoteLeaf::FileCountIs { value } => threshold::count(facts.file_count(), Cmp::Eq, *value),
            NoteLeaf::FileCountMoreThanOrEq { value } => {
                threshold::count(facts.file_count(), Cmp::Ge, *value)
            }
            NoteLeaf::FileCountLessThan { value } => {
                threshold::count(facts.file_count(), Cmp::Lt, *value)
            }
            NoteLeaf::FileTotalSizeMoreThanOrEq { size } => {
                threshold::amount(total_size(facts)?, Cmp::Ge, *size)
            }
            NoteLeaf::FileTotalSizeLessThan { size } => {
                threshold::amount(total_size(facts)?, Cmp::Lt, *size)
            }
            NoteLeaf::HasFileSizeMoreThanOrEq { size } => files
                .iter()
                .any(|f| threshold::amount(f.size, Cmp::Ge, *size)),
            NoteLeaf::HasFileSizeLessThan { size } => {
                files.is_empty() || files.iter().any(|f| threshold::amount(f.size, Cmp::Lt, *size))
            }
            NoteLeaf::HasFileMd5Is { hash } => files.iter().any(|f| f.md5 == *hash),
            NoteLeaf::HasBrowserInsafe => files
                .iter()
                .any(|f| !facts.config.is_browser_safe(&f.mime)),
            NoteLeaf::HasPictures => files.iter().any(|f| f.mime.starts_with("image/")),
            NoteLeaf::HasLikelyBlurhash { hash, diff } => {
                perceptual::likely_match(caps.decoder, hash, &facts.file_grids, *diff)
            }

            NoteLeaf::HasHashtags => !subject.hashtags.is_empty(),
            NoteLeaf::HashtagCountIs { value } => {
                threshold::count(subject.hashtags.len(), Cmp::Eq, *value)
            }
            NoteLeaf::HashtagCountMoreThanOrEq { value } => {
                threshold::count(subject.hashtags.len(), Cmp::Ge, *value)
            }
            NoteLeaf::HashtagCountLessThan { value } => {
                threshold::count(subject.hashtags.len(), Cmp::Lt, *value)
            }
            NoteLeaf::HasHashtagMatchOf { pattern } => {
                matcher::any_text_matches(caps.matcher, &subject.hashtags, pattern)?
            }
        };
        Ok(matched)
    }
}

fn total_size(facts: &NoteFacts<'_>) -> Result<u64, EvalError> {
    facts.total_file_size.ok_or(EvalError::SizeOverflow)
}
