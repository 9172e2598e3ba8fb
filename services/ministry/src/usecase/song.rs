use worship_domain::id::{MinistryId, SongId, UserId};

use crate::domain::repository::{MinistryMemberRepository, MinistryRepository, SongRepository};
use crate::domain::types::{NewSong, Song, SongPatch};
use crate::error::MinistryServiceError;
use crate::usecase::access::require_membership;

async fn find_song<R>(repo: &R, song_id: SongId) -> Result<Song, MinistryServiceError>
where
    R: SongRepository + ?Sized,
{
    repo.find_song(song_id)
        .await?
        .ok_or(MinistryServiceError::SongNotFound)
}

// ── ListSongs ────────────────────────────────────────────────────────────────

pub struct ListSongsUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> ListSongsUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub async fn execute(
        &self,
        ministry_id: MinistryId,
        caller: UserId,
    ) -> Result<Vec<Song>, MinistryServiceError> {
        require_membership(self.repo, ministry_id, caller).await?;
        self.repo.list_songs(ministry_id).await
    }
}

// ── CreateSong ───────────────────────────────────────────────────────────────

pub struct CreateSongUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> CreateSongUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub async fn execute(
        &self,
        caller: UserId,
        song: NewSong,
    ) -> Result<Song, MinistryServiceError> {
        require_membership(self.repo, song.ministry_id, caller).await?;
        if song.title.trim().is_empty() {
            return Err(MinistryServiceError::InvalidInput);
        }
        self.repo.create_song(song).await
    }
}

// ── GetSong ──────────────────────────────────────────────────────────────────

pub struct GetSongUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> GetSongUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub async fn execute(
        &self,
        song_id: SongId,
        caller: UserId,
    ) -> Result<Song, MinistryServiceError> {
        let song = find_song(self.repo, song_id).await?;
        require_membership(self.repo, song.ministry_id, caller).await?;
        Ok(song)
    }
}

// ── UpdateSong ───────────────────────────────────────────────────────────────

pub struct UpdateSongUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> UpdateSongUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub async fn execute(
        &self,
        song_id: SongId,
        caller: UserId,
        patch: SongPatch,
    ) -> Result<Song, MinistryServiceError> {
        let song = find_song(self.repo, song_id).await?;
        require_membership(self.repo, song.ministry_id, caller).await?;
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(MinistryServiceError::InvalidInput);
        }
        self.repo
            .update_song(song_id, patch)
            .await?
            .ok_or(MinistryServiceError::SongNotFound)
    }
}

// ── DeleteSong ───────────────────────────────────────────────────────────────

pub struct DeleteSongUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> DeleteSongUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + SongRepository + ?Sized,
{
    pub async fn execute(
        &self,
        song_id: SongId,
        caller: UserId,
    ) -> Result<(), MinistryServiceError> {
        let song = find_song(self.repo, song_id).await?;
        require_membership(self.repo, song.ministry_id, caller).await?;
        if !self.repo.delete_song(song_id).await? {
            return Err(MinistryServiceError::SongNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::UserRepository;
    use crate::infra::memory::MemoryStorage;
    use crate::infra::seed::DEMO_USERNAME;

    async fn leader_and_ministry(storage: &MemoryStorage) -> (UserId, MinistryId) {
        let admin = storage
            .find_user_by_username(DEMO_USERNAME)
            .await
            .unwrap()
            .unwrap();
        let ministry = storage.list_ministries().await.unwrap()[0].id;
        (admin.id, ministry)
    }

    fn new_song(ministry_id: MinistryId, title: &str) -> NewSong {
        NewSong {
            ministry_id,
            title: title.into(),
            artist: Some("Elevation Worship".into()),
            key: Some("B".into()),
            bpm: Some(72),
            duration: None,
            category: None,
            chord_link: None,
            lyrics_link: None,
            audio_link: None,
            video_link: None,
        }
    }

    #[tokio::test]
    async fn should_create_and_list_songs() {
        let storage = MemoryStorage::with_demo_data().await.unwrap();
        let (leader, ministry) = leader_and_ministry(&storage).await;

        let song = CreateSongUseCase { repo: &storage }
            .execute(leader, new_song(ministry, "Graves Into Gardens"))
            .await
            .unwrap();

        let songs = ListSongsUseCase { repo: &storage }
            .execute(ministry, leader)
            .await
            .unwrap();
        assert_eq!(songs.len(), 4);
        assert_eq!(songs.last().map(|s| s.id), Some(song.id));
    }

    #[tokio::test]
    async fn should_reject_blank_title() {
        let storage = MemoryStorage::with_demo_data().await.unwrap();
        let (leader, ministry) = leader_and_ministry(&storage).await;

        let result = CreateSongUseCase { repo: &storage }
            .execute(leader, new_song(ministry, "  "))
            .await;
        assert!(matches!(result, Err(MinistryServiceError::InvalidInput)));
    }

    #[tokio::test]
    async fn should_patch_only_given_fields() {
        let storage = MemoryStorage::with_demo_data().await.unwrap();
        let (leader, ministry) = leader_and_ministry(&storage).await;
        let song = CreateSongUseCase { repo: &storage }
            .execute(leader, new_song(ministry, "Graves Into Gardens"))
            .await
            .unwrap();

        let updated = UpdateSongUseCase { repo: &storage }
            .execute(
                song.id,
                leader,
                SongPatch {
                    key: Some(Some("A".into())),
                    artist: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.key.as_deref(), Some("A"));
        assert_eq!(updated.artist, None);
        assert_eq!(updated.bpm, Some(72));
        assert_eq!(updated.title, song.title);
    }

    #[tokio::test]
    async fn should_delete_song_once() {
        let storage = MemoryStorage::with_demo_data().await.unwrap();
        let (leader, ministry) = leader_and_ministry(&storage).await;
        let song = CreateSongUseCase { repo: &storage }
            .execute(leader, new_song(ministry, "Graves Into Gardens"))
            .await
            .unwrap();

        let delete = DeleteSongUseCase { repo: &storage };
        delete.execute(song.id, leader).await.unwrap();
        let again = delete.execute(song.id, leader).await;
        assert!(matches!(again, Err(MinistryServiceError::SongNotFound)));
    }
}
