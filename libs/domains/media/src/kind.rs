//! The three asset kinds and everything that differs between them

/// Largest promotional video accepted, just under MongoDB's document ceiling
pub const MAX_VIDEO_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Event poster image
    Poster,
    /// Event promotional video
    Video,
    /// Venue photo; a venue keeps a gallery of them
    Photo,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Poster, AssetKind::Video, AssetKind::Photo];

    pub fn collection(self) -> &'static str {
        match self {
            Self::Poster => "event_posters",
            Self::Video => "promotional_videos",
            Self::Photo => "venue_photos",
        }
    }

    /// Document field holding the owning entity's id
    pub fn owner_field(self) -> &'static str {
        match self {
            Self::Poster | Self::Video => "event_id",
            Self::Photo => "venue_id",
        }
    }

    fn owner_noun(self) -> &'static str {
        match self {
            Self::Poster | Self::Video => "event",
            Self::Photo => "venue",
        }
    }

    /// Short lowercase name used in id errors ("poster", "video", "photo")
    pub fn label(self) -> &'static str {
        match self {
            Self::Poster => "poster",
            Self::Video => "video",
            Self::Photo => "photo",
        }
    }

    /// Route segment shared by the metadata and file endpoints
    pub fn segment(self) -> &'static str {
        match self {
            Self::Poster => "event_poster",
            Self::Video => "promotional_video",
            Self::Photo => "venue_photo",
        }
    }

    /// Segment of the list-all endpoint, if the kind has one
    pub fn gallery_segment(self) -> Option<&'static str> {
        match self {
            Self::Photo => Some("venue_photos"),
            Self::Poster | Self::Video => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Poster => "Posters",
            Self::Video => "Videos",
            Self::Photo => "Venue Photos",
        }
    }

    pub fn default_filename(self) -> &'static str {
        self.label()
    }

    pub fn default_content_type(self) -> &'static str {
        match self {
            Self::Poster | Self::Photo => "image/jpeg",
            Self::Video => "video/mp4",
        }
    }

    pub fn max_bytes(self) -> Option<usize> {
        match self {
            Self::Video => Some(MAX_VIDEO_BYTES),
            Self::Poster | Self::Photo => None,
        }
    }

    pub fn upload_path(self) -> String {
        format!("/upload_{}/{{{}}}", self.segment(), self.owner_field())
    }

    pub fn latest_path(self) -> String {
        format!("/{}/{{{}}}", self.segment(), self.owner_field())
    }

    pub fn file_path(self) -> String {
        format!("/{}/file/{{{}_id}}", self.segment(), self.label())
    }

    pub fn gallery_path(self) -> Option<String> {
        self.gallery_segment()
            .map(|segment| format!("/{}/{{{}}}", segment, self.owner_field()))
    }

    pub fn uploaded_message(self) -> &'static str {
        match self {
            Self::Poster => "Event poster uploaded",
            Self::Video => "Promotional video uploaded",
            Self::Photo => "Venue photo uploaded",
        }
    }

    pub fn none_for_owner_message(self, owner_id: &str) -> String {
        let what = match self {
            Self::Poster => "poster",
            Self::Video => "promotional video",
            Self::Photo => "photo",
        };
        format!("No {what} found for {} {owner_id}", self.owner_noun())
    }

    pub fn not_found_message(self, asset_id: &str) -> String {
        let label = self.label();
        let mut chars = label.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{capitalized} with ID {asset_id} not found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(AssetKind::Poster.upload_path(), "/upload_event_poster/{event_id}");
        assert_eq!(AssetKind::Poster.latest_path(), "/event_poster/{event_id}");
        assert_eq!(AssetKind::Poster.file_path(), "/event_poster/file/{poster_id}");
        assert_eq!(
            AssetKind::Video.upload_path(),
            "/upload_promotional_video/{event_id}"
        );
        assert_eq!(
            AssetKind::Video.file_path(),
            "/promotional_video/file/{video_id}"
        );
        assert_eq!(AssetKind::Photo.latest_path(), "/venue_photo/{venue_id}");
        assert_eq!(AssetKind::Photo.file_path(), "/venue_photo/file/{photo_id}");
        assert_eq!(
            AssetKind::Photo.gallery_path().as_deref(),
            Some("/venue_photos/{venue_id}")
        );
        assert_eq!(AssetKind::Poster.gallery_path(), None);
    }

    #[test]
    fn test_only_videos_are_capped() {
        assert_eq!(AssetKind::Video.max_bytes(), Some(16 * 1024 * 1024));
        assert_eq!(AssetKind::Poster.max_bytes(), None);
        assert_eq!(AssetKind::Photo.max_bytes(), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AssetKind::Video.none_for_owner_message("e1"),
            "No promotional video found for event e1"
        );
        assert_eq!(
            AssetKind::Photo.none_for_owner_message("v1"),
            "No photo found for venue v1"
        );
        assert_eq!(
            AssetKind::Poster.not_found_message("abc"),
            "Poster with ID abc not found"
        );
    }
}
