use chrono::{NaiveTime, Utc};
use tracing::info;

use worship_domain::role::UserRole;
use worship_domain::service::ServiceStatus;

use crate::domain::repository::Storage;
use crate::domain::types::{
    NewMinistry, NewService, NewServiceMember, NewServiceSong, NewSong, NewUser,
};
use crate::error::MinistryServiceError;

pub const DEMO_USERNAME: &str = "admin";
pub const DEMO_PASSWORD: &str = "password";
pub const DEMO_MINISTRY_CODE: &str = "ICBT";

struct DemoSong {
    title: &'static str,
    artist: &'static str,
    key: &'static str,
    bpm: i32,
    duration: &'static str,
    category: &'static str,
    slug: &'static str,
}

const DEMO_SONGS: [DemoSong; 3] = [
    DemoSong {
        title: "Great Are You Lord",
        artist: "All Sons & Daughters",
        key: "D",
        bpm: 88,
        duration: "4:45",
        category: "Worship",
        slug: "great-are-you-lord",
    },
    DemoSong {
        title: "What A Beautiful Name",
        artist: "Hillsong Worship",
        key: "D",
        bpm: 74,
        duration: "5:30",
        category: "Worship",
        slug: "what-a-beautiful-name",
    },
    DemoSong {
        title: "Way Maker",
        artist: "Sinach",
        key: "E",
        bpm: 68,
        duration: "6:15",
        category: "Praise",
        slug: "way-maker",
    },
];

/// Populate an empty store with one admin, one ministry, three songs and a
/// service for today with a full setlist. Deterministic apart from
/// timestamps, ids and the service date.
pub async fn seed_demo_data<S>(storage: &S) -> Result<(), MinistryServiceError>
where
    S: Storage + ?Sized,
{
    let admin = storage
        .create_user(NewUser {
            username: DEMO_USERNAME.to_owned(),
            password: DEMO_PASSWORD.to_owned(),
            email: Some("admin@example.com".to_owned()),
            first_name: Some("Admin".to_owned()),
            last_name: Some("User".to_owned()),
            role: UserRole::Admin,
            ..Default::default()
        })
        .await?;

    let (ministry, _leader) = storage
        .create_ministry_with_leader(
            NewMinistry {
                name: "ICB IGUA TEMI".to_owned(),
                code: DEMO_MINISTRY_CODE.to_owned(),
                created_by: admin.id,
                logo: None,
            },
            Some("Worship Leader".to_owned()),
        )
        .await?;

    let mut songs = Vec::with_capacity(DEMO_SONGS.len());
    for demo in &DEMO_SONGS {
        let song = storage
            .create_song(NewSong {
                ministry_id: ministry.id,
                title: demo.title.to_owned(),
                artist: Some(demo.artist.to_owned()),
                key: Some(demo.key.to_owned()),
                bpm: Some(demo.bpm),
                duration: Some(demo.duration.to_owned()),
                category: Some(demo.category.to_owned()),
                chord_link: Some(format!("https://example.com/chords/{}", demo.slug)),
                lyrics_link: Some(format!("https://example.com/lyrics/{}", demo.slug)),
                audio_link: Some(format!("https://example.com/audio/{}", demo.slug)),
                video_link: Some(format!("https://example.com/video/{}", demo.slug)),
            })
            .await?;
        songs.push(song);
    }

    let service = storage
        .create_service(NewService {
            ministry_id: ministry.id,
            name: "Sunday Celebration Service".to_owned(),
            date: Utc::now().date_naive(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            service_type: Some("Sunday Service".to_owned()),
            notes: Some("Main service of the week".to_owned()),
            status: ServiceStatus::Pending,
        })
        .await?;

    for (song, order) in songs.iter().zip(1..) {
        storage
            .create_service_song(NewServiceSong {
                service_id: service.id,
                song_id: song.id,
                order,
                key: song.key.clone(),
            })
            .await?;
    }

    storage
        .create_service_member(NewServiceMember {
            service_id: service.id,
            user_id: admin.id,
            position: "Worship Leader".to_owned(),
        })
        .await?;

    info!(ministry_id = %ministry.id, "seeded demo data");
    Ok(())
}
