use crate::error::{DecodeError, MatchError};
use crate::matcher::PatternMatcher;
use crate::model::{DriveFile, Mention, NoteSubject, UserSubject};
use crate::perceptual::{HashDecoder, HashGrid};
use std::cell::Cell;
use std::collections::BTreeMap;
use time::macros::datetime;

pub fn note(user_id: &str) -> NoteSubject {
    NoteSubject {
        user_id: user_id.to_string(),
        ..NoteSubject::default()
    }
}

pub fn mention(id: &str, username: &str, host: Option<&str>) -> Mention {
    Mention {
        id: id.to_string(),
        username: username.to_string(),
        host: host.map(|h| h.to_string()),
    }
}

pub fn file(size: u64, mime: &str, blurhash: Option<&str>) -> DriveFile {
    DriveFile {
        size,
        mime: mime.to_string(),
        md5: String::new(),
        blurhash: blurhash.map(|b| b.to_string()),
    }
}

/// A local account created well before any test instant, with every flag off.
pub fn user(username: &str) -> UserSubject {
    UserSubject {
        id: format!("id-{username}"),
        username: username.to_string(),
        host: None,
        name: None,
        email: None,
        email_verified: false,
        created_at: datetime!(2020-01-01 00:00:00 UTC),
        last_active_at: None,
        followers_count: 0,
        following_count: 0,
        notes_count: 0,
        is_suspended: false,
        is_locked: false,
        is_bot: false,
        is_cat: false,
        is_explorable: false,
        two_factor_enabled: false,
        security_keys_available: false,
        using_passwordless_login: false,
        no_crawle: false,
        prevent_ai_learning: false,
        instance: None,
        avatar: None,
        banner: None,
        tags: Vec::new(),
    }
}

/// Decoder backed by a fixed hash-to-grid table. Unknown hashes fail.
#[derive(Default)]
pub struct FakeDecoder {
    grids: BTreeMap<String, Vec<u8>>,
}

impl FakeDecoder {
    pub fn with(mut self, hash: &str, samples: Vec<u8>) -> Self {
        self.grids.insert(hash.to_string(), samples);
        self
    }
}

impl HashDecoder for FakeDecoder {
    fn decode(&self, hash: &str) -> Result<HashGrid, DecodeError> {
        self.grids
            .get(hash)
            .map(|samples| HashGrid::new(samples.clone()))
            .ok_or_else(|| DecodeError::Malformed {
                hash: hash.to_string(),
                reason: "unknown test hash".to_string(),
            })
    }
}

/// Matcher that counts invocations and always fails.
#[derive(Default)]
pub struct RecordingMatcher {
    calls: Cell<usize>,
}

impl RecordingMatcher {
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PatternMatcher for RecordingMatcher {
    fn matches_any(&self, _text: &str, patterns: &[String]) -> Result<bool, MatchError> {
        self.calls.set(self.calls.get() + 1);
        Err(MatchError::Flag {
            pattern: patterns.first().cloned().unwrap_or_default(),
            flag: '!',
        })
    }
}
