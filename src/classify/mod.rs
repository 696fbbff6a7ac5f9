//! Interaction taxonomy.
//!
//! A message is first reduced to raw tags, one per content attribute it carries, and each
//! raw tag is then folded into a semantic category. Both tables are ordered constant data,
//! so the category list of a message is deterministic: categories appear in the order their
//! first raw tag appears in `CONTENT_TAGS`.

use crate::bus::events::{ContentFlags, InboundMessage};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawTag {
    Animation,
    Text,
    Audio,
    Photo,
    Sticker,
    Video,
    Voice,
    File,
    VideoNote,
    Forward,
    Repost,
    Edited,
}

/// Content tags in canonical order. `Edited` is not listed: it short-circuits.
pub const CONTENT_TAGS: [RawTag; 11] = [
    RawTag::Animation,
    RawTag::Text,
    RawTag::Audio,
    RawTag::Photo,
    RawTag::Sticker,
    RawTag::Video,
    RawTag::Voice,
    RawTag::File,
    RawTag::VideoNote,
    RawTag::Forward,
    RawTag::Repost,
];

impl RawTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Animation => "animation",
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Photo => "photo",
            Self::Sticker => "sticker",
            Self::Video => "video",
            Self::Voice => "voice",
            Self::File => "file",
            Self::VideoNote => "videoNote",
            Self::Forward => "forward",
            Self::Repost => "repost",
            Self::Edited => "edited",
        }
    }

    fn is_set(self, flags: &ContentFlags) -> bool {
        match self {
            Self::Animation => flags.animation,
            Self::Text => flags.text,
            Self::Audio => flags.audio,
            Self::Photo => flags.photo,
            Self::Sticker => flags.sticker,
            Self::Video => flags.video,
            Self::Voice => flags.voice,
            Self::File => flags.document,
            Self::VideoNote => flags.video_note,
            Self::Forward => flags.forward,
            Self::Repost => flags.repost,
            Self::Edited => flags.edited,
        }
    }
}

impl fmt::Display for RawTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Media,
    Text,
    Reaction,
    SocialInteraction,
    Content,
    EditFlag,
    ProvenanceCheck,
}

/// Number of distinct categories in the taxonomy.
pub const CATEGORY_COUNT: usize = 7;

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Text => "text",
            Self::Reaction => "reaction",
            Self::SocialInteraction => "social_interaction",
            Self::Content => "content",
            Self::EditFlag => "edit_flag",
            Self::ProvenanceCheck => "provenance_check",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Audio has no category and is dropped during mapping.
const CATEGORY_TABLE: &[(RawTag, Category)] = &[
    (RawTag::Video, Category::Media),
    (RawTag::Photo, Category::Media),
    (RawTag::File, Category::Media),
    (RawTag::Text, Category::Text),
    (RawTag::Animation, Category::Reaction),
    (RawTag::Sticker, Category::Reaction),
    (RawTag::Voice, Category::SocialInteraction),
    (RawTag::VideoNote, Category::SocialInteraction),
    (RawTag::Repost, Category::Content),
    (RawTag::Edited, Category::EditFlag),
    (RawTag::Forward, Category::ProvenanceCheck),
];

pub fn category_for(tag: RawTag) -> Option<Category> {
    CATEGORY_TABLE
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, c)| *c)
}

/// Raw tags for a message's flags. An edited message carries only `Edited`.
pub fn derive_raw_tags(flags: &ContentFlags) -> Vec<RawTag> {
    if flags.edited {
        return vec![RawTag::Edited];
    }
    CONTENT_TAGS
        .iter()
        .copied()
        .filter(|tag| tag.is_set(flags))
        .collect()
}

/// Fold raw tags into categories, keeping the first occurrence of each.
pub fn map_to_categories(tags: &[RawTag]) -> Vec<Category> {
    let mut categories = Vec::with_capacity(CATEGORY_COUNT);
    for tag in tags {
        let Some(category) = category_for(*tag) else {
            continue;
        };
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}

/// Full classification of a message into category names, ready for an `EventPayload`.
pub fn classify(msg: &InboundMessage) -> Vec<String> {
    map_to_categories(&derive_raw_tags(&msg.flags))
        .into_iter()
        .map(|c| c.as_str().to_string())
        .collect()
}
