use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use worship_domain::id::{
    AvailabilityId, MessageId, MinistryId, MinistryMemberId, ServiceId, ServiceMemberId,
    ServiceSongId, SongId, UserId,
};
use worship_domain::role::{MemberRole, UserRole};
use worship_domain::service::ServiceStatus;

/// Length of a ministry join code.
pub const MINISTRY_CODE_LEN: usize = 4;

// ── Users ────────────────────────────────────────────────────────────────────

/// User account. `password_hash` is a PHC string and never leaves the service.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub external_id: Option<String>,
    pub username: String,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a locally registered account. `password` is plaintext; the store hashes it.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: UserRole,
}

/// Profile asserted by the identity provider, keyed by its subject id.
///
/// `username` is only used when the account does not exist yet.
#[derive(Debug, Clone, Default)]
pub struct UpsertUser {
    pub external_id: String,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

// ── Ministries ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Ministry {
    pub id: MinistryId,
    pub name: String,
    pub code: String,
    pub created_by: UserId,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMinistry {
    pub name: String,
    pub code: String,
    pub created_by: UserId,
    pub logo: Option<String>,
}

/// A join code is four ASCII uppercase letters or digits.
pub fn is_valid_ministry_code(code: &str) -> bool {
    code.len() == MINISTRY_CODE_LEN
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinistryMember {
    pub id: MinistryMemberId,
    pub ministry_id: MinistryId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMinistryMember {
    pub ministry_id: MinistryId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MinistryMemberPatch {
    pub role: Option<MemberRole>,
    pub position: Option<Option<String>>,
}

impl MinistryMemberPatch {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.position.is_none()
    }
}

// ── Songs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: SongId,
    pub ministry_id: MinistryId,
    pub title: String,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub bpm: Option<i32>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub chord_link: Option<String>,
    pub lyrics_link: Option<String>,
    pub audio_link: Option<String>,
    pub video_link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSong {
    pub ministry_id: MinistryId,
    pub title: String,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub bpm: Option<i32>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub chord_link: Option<String>,
    pub lyrics_link: Option<String>,
    pub audio_link: Option<String>,
    pub video_link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SongPatch {
    pub title: Option<String>,
    pub artist: Option<Option<String>>,
    pub key: Option<Option<String>>,
    pub bpm: Option<Option<i32>>,
    pub duration: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub chord_link: Option<Option<String>>,
    pub lyrics_link: Option<Option<String>>,
    pub audio_link: Option<Option<String>>,
    pub video_link: Option<Option<String>>,
}

impl SongPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.key.is_none()
            && self.bpm.is_none()
            && self.duration.is_none()
            && self.category.is_none()
            && self.chord_link.is_none()
            && self.lyrics_link.is_none()
            && self.audio_link.is_none()
            && self.video_link.is_none()
    }

    pub fn apply(self, song: &mut Song) {
        if let Some(title) = self.title {
            song.title = title;
        }
        if let Some(artist) = self.artist {
            song.artist = artist;
        }
        if let Some(key) = self.key {
            song.key = key;
        }
        if let Some(bpm) = self.bpm {
            song.bpm = bpm;
        }
        if let Some(duration) = self.duration {
            song.duration = duration;
        }
        if let Some(category) = self.category {
            song.category = category;
        }
        if let Some(link) = self.chord_link {
            song.chord_link = link;
        }
        if let Some(link) = self.lyrics_link {
            song.lyrics_link = link;
        }
        if let Some(link) = self.audio_link {
            song.audio_link = link;
        }
        if let Some(link) = self.video_link {
            song.video_link = link;
        }
    }
}

// ── Services ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub ministry_id: MinistryId,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub service_type: Option<String>,
    pub notes: Option<String>,
    pub status: ServiceStatus,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub ministry_id: MinistryId,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub service_type: Option<String>,
    pub notes: Option<String>,
    pub status: ServiceStatus,
}

#[derive(Debug, Clone, Default)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub service_type: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub status: Option<ServiceStatus>,
}

impl ServicePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.service_type.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }

    pub fn apply(self, service: &mut Service) {
        if let Some(name) = self.name {
            service.name = name;
        }
        if let Some(date) = self.date {
            service.date = date;
        }
        if let Some(time) = self.time {
            service.time = time;
        }
        if let Some(service_type) = self.service_type {
            service.service_type = service_type;
        }
        if let Some(notes) = self.notes {
            service.notes = notes;
        }
        if let Some(status) = self.status {
            service.status = status;
        }
    }
}

/// Roster entry: a user serving in a position at one service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceMember {
    pub id: ServiceMemberId,
    pub service_id: ServiceId,
    pub user_id: UserId,
    pub position: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewServiceMember {
    pub service_id: ServiceId,
    pub user_id: UserId,
    pub position: String,
}

/// Setlist entry. Entries are played in ascending `order`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSong {
    pub id: ServiceSongId,
    pub service_id: ServiceId,
    pub song_id: SongId,
    pub order: i32,
    pub key: Option<String>,
}

impl ServiceSong {
    /// Key to play in: the setlist override, else the song's own key.
    pub fn effective_key<'a>(&'a self, song: &'a Song) -> Option<&'a str> {
        self.key.as_deref().or(song.key.as_deref())
    }
}

#[derive(Debug, Clone)]
pub struct NewServiceSong {
    pub service_id: ServiceId,
    pub song_id: SongId,
    pub order: i32,
    pub key: Option<String>,
}

/// A service with its roster and setlist, created in one atomic step.
///
/// Members are given as ministry membership ids; songs are placed in the given order.
#[derive(Debug, Clone)]
pub struct ServicePlan {
    pub service: NewService,
    pub member_ids: Vec<MinistryMemberId>,
    pub song_ids: Vec<SongId>,
}

#[derive(Debug, Clone)]
pub struct ServiceLineup {
    pub service: Service,
    pub members: Vec<ServiceMember>,
    pub songs: Vec<ServiceSong>,
}

// ── Availability ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub id: AvailabilityId,
    pub user_id: UserId,
    pub ministry_id: MinistryId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAvailability {
    pub user_id: UserId,
    pub ministry_id: MinistryId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

// ── Messages ─────────────────────────────────────────────────────────────────

/// Team message. `recipient_id == None` is a broadcast to the ministry.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub ministry_id: MinistryId,
    pub sender_id: UserId,
    pub recipient_id: Option<UserId>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Message {
    /// True when `user` sent or directly received this message.
    pub fn involves(&self, user: UserId) -> bool {
        self.sender_id == user || self.recipient_id == Some(user)
    }

    /// Broadcasts are visible to the whole team, direct messages only to
    /// their two participants.
    pub fn is_visible_to(&self, user: UserId) -> bool {
        self.recipient_id.is_none() || self.involves(user)
    }

    /// True for a direct message exchanged between `a` and `b`, in either direction.
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        match self.recipient_id {
            Some(recipient) => {
                (self.sender_id == a && recipient == b) || (self.sender_id == b && recipient == a)
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub ministry_id: MinistryId,
    pub sender_id: UserId,
    pub recipient_id: Option<UserId>,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(key: Option<&str>) -> Song {
        Song {
            id: SongId(1),
            ministry_id: MinistryId(1),
            title: "Way Maker".into(),
            artist: None,
            key: key.map(str::to_owned),
            bpm: None,
            duration: None,
            category: None,
            chord_link: None,
            lyrics_link: None,
            audio_link: None,
            video_link: None,
        }
    }

    fn entry(key: Option<&str>) -> ServiceSong {
        ServiceSong {
            id: ServiceSongId(1),
            service_id: ServiceId(1),
            song_id: SongId(1),
            order: 1,
            key: key.map(str::to_owned),
        }
    }

    #[test]
    fn should_accept_valid_ministry_codes() {
        assert!(is_valid_ministry_code("ABCD"));
        assert!(is_valid_ministry_code("ICB7"));
    }

    #[test]
    fn should_reject_malformed_ministry_codes() {
        assert!(!is_valid_ministry_code("abcd"));
        assert!(!is_valid_ministry_code("ABC"));
        assert!(!is_valid_ministry_code("ABCDE"));
        assert!(!is_valid_ministry_code("AB-D"));
    }

    #[test]
    fn should_prefer_setlist_key_over_song_key() {
        let song = song(Some("D"));
        assert_eq!(entry(Some("E")).effective_key(&song), Some("E"));
        assert_eq!(entry(None).effective_key(&song), Some("D"));
        assert_eq!(entry(None).effective_key(&self::song(None)), None);
    }

    #[test]
    fn should_apply_only_present_song_fields() {
        let mut target = song(Some("D"));
        target.artist = Some("Sinach".into());
        SongPatch {
            title: Some("Way Maker (Live)".into()),
            artist: Some(None),
            ..Default::default()
        }
        .apply(&mut target);
        assert_eq!(target.title, "Way Maker (Live)");
        assert_eq!(target.artist, None);
        assert_eq!(target.key.as_deref(), Some("D"));
    }

    #[test]
    fn should_report_empty_patches() {
        assert!(SongPatch::default().is_empty());
        assert!(ServicePatch::default().is_empty());
        assert!(MinistryMemberPatch::default().is_empty());
        assert!(
            !ServicePatch {
                notes: Some(None),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn should_match_sender_or_direct_recipient() {
        let message = Message {
            id: MessageId(1),
            ministry_id: MinistryId(1),
            sender_id: UserId(1),
            recipient_id: Some(UserId(2)),
            content: "rehearsal at 7".into(),
            created_at: Utc::now(),
            read: false,
        };
        assert!(message.involves(UserId(1)));
        assert!(message.involves(UserId(2)));
        assert!(!message.involves(UserId(3)));
        assert!(message.is_between(UserId(2), UserId(1)));
        assert!(!message.is_between(UserId(1), UserId(3)));
        assert!(!message.is_visible_to(UserId(3)));
    }

    #[test]
    fn should_show_broadcast_to_everyone_but_no_conversation() {
        let broadcast = Message {
            id: MessageId(2),
            ministry_id: MinistryId(1),
            sender_id: UserId(1),
            recipient_id: None,
            content: "welcome".into(),
            created_at: Utc::now(),
            read: false,
        };
        assert!(broadcast.is_visible_to(UserId(3)));
        assert!(!broadcast.is_between(UserId(1), UserId(3)));
    }
}
