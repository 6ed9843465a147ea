//! Fact bundles read by leaves.
//!
//! Everything derived from a subject is computed once here and never changes
//! while a formula is walked.

use crate::entropy::{self, EntropyTable};
use crate::model::{ImageRef, InstanceFacts, Mention, NoteSubject, RoleId, UserSubject};
use crate::perceptual::{HashDecoder, HashGrid};
use crate::policy::EngineConfig;
use std::collections::HashSet;
use time::OffsetDateTime;

/// Facts about a note under inspection.
#[derive(Clone, Debug)]
pub struct NoteFacts<'a> {
    pub subject: &'a NoteSubject,
    pub roles: &'a [RoleId],
    /// Mentioned accounts, one entry per account id, in first-seen order.
    pub mentions: Vec<&'a Mention>,
    /// Decoded perceptual hashes of attached files. Files without a decodable
    /// hash are absent.
    pub file_grids: Vec<HashGrid>,
    /// Sum of attached file sizes. `None` when the sum does not fit in `u64`.
    pub total_file_size: Option<u64>,
    pub config: &'a EngineConfig,
}

impl<'a> NoteFacts<'a> {
    pub fn assemble(
        subject: &'a NoteSubject,
        roles: &'a [RoleId],
        decoder: &dyn HashDecoder,
        config: &'a EngineConfig,
    ) -> Self {
        let mut seen = HashSet::new();
        let mentions = subject
            .mentions
            .iter()
            .filter(|m| seen.insert(m.id.as_str()))
            .collect();

        let files = subject.files.as_deref().unwrap_or_default();
        let file_grids = files
            .iter()
            .filter_map(|f| f.blurhash.as_deref())
            .filter_map(|hash| decode_quietly(decoder, hash))
            .collect();
        let total_file_size = files
            .iter()
            .try_fold(0u64, |acc, f| acc.checked_add(f.size));

        Self {
            subject,
            roles,
            mentions,
            file_grids,
            total_file_size,
            config,
        }
    }

    pub fn file_count(&self) -> usize {
        self.subject.files.as_ref().map_or(0, Vec::len)
    }

    pub fn has_role(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }
}

/// Entropy scores of a username under the configured table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsernameEntropy {
    pub total: f64,
    pub mean: f64,
}

/// Facts about an account considered for a conditional role.
#[derive(Clone, Debug)]
pub struct UserFacts<'a> {
    pub subject: &'a UserSubject,
    pub roles: &'a [RoleId],
    /// Instant the formula is evaluated at.
    pub now: OffsetDateTime,
    /// `None` when no valid entropy table is configured.
    pub username_entropy: Option<UsernameEntropy>,
    pub avatar_grid: Option<HashGrid>,
    pub banner_grid: Option<HashGrid>,
}

impl<'a> UserFacts<'a> {
    pub fn assemble(
        subject: &'a UserSubject,
        roles: &'a [RoleId],
        now: OffsetDateTime,
        table: Option<&EntropyTable>,
        decoder: &dyn HashDecoder,
    ) -> Self {
        let username_entropy = table.map(|table| UsernameEntropy {
            total: entropy::score(&subject.username, table),
            mean: entropy::mean_score(&subject.username, table),
        });

        Self {
            subject,
            roles,
            now,
            username_entropy,
            avatar_grid: image_grid(subject.avatar.as_ref(), decoder),
            banner_grid: image_grid(subject.banner.as_ref(), decoder),
        }
    }

    pub fn has_role(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }

    /// Federation state, with an unknown instance read as all defaults.
    pub fn instance(&self) -> InstanceFacts {
        self.subject.instance.clone().unwrap_or_default()
    }

    /// Whole seconds since the account was created.
    pub fn account_age_secs(&self) -> i64 {
        (self.now - self.subject.created_at).whole_seconds()
    }

    /// Seconds since the last activity, if any was recorded.
    pub fn secs_since_active(&self) -> Option<f64> {
        self.subject
            .last_active_at
            .map(|at| (self.now - at).as_seconds_f64())
    }
}

fn image_grid(image: Option<&ImageRef>, decoder: &dyn HashDecoder) -> Option<HashGrid> {
    let hash = image?.blurhash.as_deref()?;
    decode_quietly(decoder, hash)
}

fn decode_quietly(decoder: &dyn HashDecoder, hash: &str) -> Option<HashGrid> {
    match decoder.decode(hash) {
        Ok(grid) => Some(grid),
        Err(err) => {
            tracing::trace!(error = %err, "dropping undecodable subject hash");
            None
        }
    }
}
